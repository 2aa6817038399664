//! HTTP API handlers for staffbook-server

pub mod departments;
pub mod employees;
pub mod health;
pub mod search;

pub use health::health_routes;

use axum::body::Bytes;
use serde_json::Value;
use sqlx::SqlitePool;

use staffbook_common::{Department, Employee};

use crate::error::{ApiError, ApiResult};
use crate::services;

const DEPARTMENT: &str = "Department";
const EMPLOYEE: &str = "Employee";

/// Decode a request body as JSON
fn parse_body(body: &Bytes) -> ApiResult<Value> {
    serde_json::from_slice(body).map_err(|_| ApiError::BadRequest("Invalid JSON payload".to_string()))
}

/// Resolve a path id to a department; unparsable ids are unknown ids
async fn find_department(pool: &SqlitePool, raw_id: &str) -> ApiResult<Department> {
    let Ok(id) = raw_id.parse::<i64>() else {
        return Err(ApiError::not_found(DEPARTMENT, raw_id));
    };

    services::departments::get_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found(DEPARTMENT, id))
}

/// Resolve a path id to an employee; unparsable ids are unknown ids
async fn find_employee(pool: &SqlitePool, raw_id: &str) -> ApiResult<Employee> {
    let Ok(id) = raw_id.parse::<i64>() else {
        return Err(ApiError::not_found(EMPLOYEE, raw_id));
    };

    services::employees::get_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found(EMPLOYEE, id))
}
