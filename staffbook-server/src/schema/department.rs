//! Department payloads and response shapes

use serde::Serialize;
use serde_json::Value;
use sqlx::SqlitePool;
use std::collections::HashMap;

use staffbook_common::{Department, Employee};

use super::{EmployeeSummary, Mode, Payload, ValidationErrors, MISSING};
use crate::services::{departments, employees};

/// Fields accepted on load
pub const FIELDS: [&str; 1] = ["name"];

pub const NAME_MIN: usize = 4;
pub const NAME_MAX: usize = 50;

/// Validated payload for creating a department
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDepartment {
    pub name: String,
}

/// Validated partial update; `None` leaves the stored value unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentChanges {
    pub name: Option<String>,
}

impl From<NewDepartment> for DepartmentChanges {
    fn from(new: NewDepartment) -> Self {
        Self {
            name: Some(new.name),
        }
    }
}

/// Load a complete department payload
pub fn load(value: &Value) -> Result<NewDepartment, ValidationErrors> {
    let changes = load_changes(value, Mode::Full)?;
    match changes.name {
        Some(name) => Ok(NewDepartment { name }),
        None => Err(ValidationErrors::single("name", MISSING)),
    }
}

/// Load a department payload under the given mode
pub fn load_changes(value: &Value, mode: Mode<'_>) -> Result<DepartmentChanges, ValidationErrors> {
    let mut payload = Payload::open(value, &FIELDS, mode)?;
    let name = payload.string("name", NAME_MIN, NAME_MAX);
    payload.finish()?;

    Ok(DepartmentChanges { name })
}

/// Department as returned by the API, with its employees and average salary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentOut {
    pub id: i64,
    pub name: String,
    pub avg_salary: f64,
    pub employees: Vec<EmployeeSummary>,
}

/// Department nested inside an employee, without its employee list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentSummary {
    pub id: i64,
    pub name: String,
    pub avg_salary: f64,
}

impl DepartmentOut {
    pub fn new(department: Department, employees: &[Employee]) -> Self {
        Self {
            id: department.id,
            name: department.name,
            avg_salary: departments::average_salary(employees),
            employees: employees.iter().map(EmployeeSummary::from).collect(),
        }
    }
}

impl DepartmentSummary {
    pub fn new(department: Department, employees: &[Employee]) -> Self {
        Self {
            id: department.id,
            name: department.name,
            avg_salary: departments::average_salary(employees),
        }
    }

    /// Look up a department and compute its average salary
    pub async fn load(
        pool: &SqlitePool,
        department_id: i64,
    ) -> staffbook_common::Result<Option<Self>> {
        let Some(department) = departments::get_by_id(pool, department_id).await? else {
            return Ok(None);
        };
        let members = employees::get_all_for_department(pool, department_id).await?;
        Ok(Some(Self::new(department, &members)))
    }
}

/// Serialize one department, fetching its employees
pub async fn dump(pool: &SqlitePool, department: Department) -> staffbook_common::Result<DepartmentOut> {
    let members = employees::get_all_for_department(pool, department.id).await?;
    Ok(DepartmentOut::new(department, &members))
}

/// Serialize many departments with a single employee query
pub async fn dump_many(
    pool: &SqlitePool,
    list: Vec<Department>,
) -> staffbook_common::Result<Vec<DepartmentOut>> {
    let mut by_department: HashMap<i64, Vec<Employee>> = HashMap::new();
    for employee in employees::get_all(pool).await? {
        by_department
            .entry(employee.department_id)
            .or_default()
            .push(employee);
    }

    Ok(list
        .into_iter()
        .map(|department| {
            let members = by_department.remove(&department.id).unwrap_or_default();
            DepartmentOut::new(department, &members)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_load_valid() {
        let department = load(&json!({ "name": "Dep 3" })).unwrap();
        assert_eq!(department.name, "Dep 3");
    }

    #[test]
    fn test_load_missing_name() {
        let errors = load(&json!({})).unwrap_err();
        assert_eq!(errors.get("name").unwrap(), [MISSING]);
    }

    #[test]
    fn test_load_name_length_bounds() {
        let errors = load(&json!({ "name": "Dep" })).unwrap_err();
        assert_eq!(
            errors.get("name").unwrap(),
            ["Length must be between 4 and 50."]
        );

        let long_name = "x".repeat(51);
        assert!(load(&json!({ "name": long_name })).is_err());
        assert!(load(&json!({ "name": "x".repeat(50) })).is_ok());
    }

    #[test]
    fn test_load_rejects_unknown_and_read_only_fields() {
        let errors = load(&json!({ "title": "Dep 3" })).unwrap_err();
        assert_eq!(errors.get("title").unwrap(), [super::super::UNKNOWN]);
        assert_eq!(errors.get("name").unwrap(), [MISSING]);

        let errors = load(&json!({ "name": "Dep 3", "avg_salary": 10 })).unwrap_err();
        assert!(errors.get("avg_salary").is_some());
    }

    #[test]
    fn test_load_rejects_non_object() {
        let errors = load(&json!(["Dep 3"])).unwrap_err();
        assert_eq!(
            errors.get(super::super::SCHEMA_KEY).unwrap(),
            [super::super::INVALID_INPUT]
        );
    }

    #[test]
    fn test_partial_load_allows_empty_payload() {
        let changes = load_changes(&json!({}), Mode::Partial).unwrap();
        assert_eq!(changes, DepartmentChanges::default());

        // Present fields are still validated
        assert!(load_changes(&json!({ "name": "ab" }), Mode::Partial).is_err());
    }

    #[test]
    fn test_department_out_shape() {
        let department = Department {
            id: 1,
            name: "Dep 1".to_string(),
        };
        let members = vec![
            Employee {
                id: 1,
                name: "Employee 1".to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(1991, 1, 1).unwrap(),
                salary: 1000,
                department_id: 1,
            },
            Employee {
                id: 2,
                name: "Employee 2".to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(1992, 2, 2).unwrap(),
                salary: 1000,
                department_id: 1,
            },
        ];

        let value = serde_json::to_value(DepartmentOut::new(department, &members)).unwrap();

        assert_eq!(value["avg_salary"], 1000.0);
        assert_eq!(value["employees"][0]["date_of_birth"], "1991-01-01");
        assert!(value["employees"][0].get("department").is_none());
        assert!(value["employees"][0].get("department_id").is_none());
    }
}
