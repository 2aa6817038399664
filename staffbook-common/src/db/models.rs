//! Database row models
//!
//! Employees reference their department through `department_id` only; the
//! department side never holds a collection. Related rows are fetched with an
//! explicit query when needed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Department {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub salary: i64,
    pub department_id: i64,
}
