//! Employee payloads and response shapes

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use sqlx::SqlitePool;
use std::collections::HashMap;

use staffbook_common::Employee;

use super::{DepartmentSummary, Mode, Payload, ValidationErrors, MISSING};

/// Fields accepted on load
pub const FIELDS: [&str; 4] = ["name", "date_of_birth", "salary", "department_id"];

pub const NAME_MIN: usize = 4;
pub const NAME_MAX: usize = 100;
pub const SALARY_MIN: i64 = 1;

/// Validated payload for creating an employee
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub salary: i64,
    pub department_id: i64,
}

/// Validated partial update; `None` leaves the stored value unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeChanges {
    pub name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub salary: Option<i64>,
    pub department_id: Option<i64>,
}

impl EmployeeChanges {
    /// Complete record, or the errors for whichever fields are still missing
    fn into_new(self) -> Result<NewEmployee, ValidationErrors> {
        match (self.name, self.date_of_birth, self.salary, self.department_id) {
            (Some(name), Some(date_of_birth), Some(salary), Some(department_id)) => Ok(NewEmployee {
                name,
                date_of_birth,
                salary,
                department_id,
            }),
            (name, date_of_birth, salary, department_id) => {
                let mut errors = ValidationErrors::new();
                let present = [
                    ("name", name.is_some()),
                    ("date_of_birth", date_of_birth.is_some()),
                    ("salary", salary.is_some()),
                    ("department_id", department_id.is_some()),
                ];
                for (field, is_present) in present {
                    if !is_present {
                        errors.add(field, MISSING);
                    }
                }
                Err(errors)
            }
        }
    }
}

impl From<NewEmployee> for EmployeeChanges {
    fn from(new: NewEmployee) -> Self {
        Self {
            name: Some(new.name),
            date_of_birth: Some(new.date_of_birth),
            salary: Some(new.salary),
            department_id: Some(new.department_id),
        }
    }
}

/// Load a complete employee payload
pub fn load(value: &Value) -> Result<NewEmployee, ValidationErrors> {
    load_changes(value, Mode::Full)?.into_new()
}

/// Load an employee payload for a department given by the URL
///
/// `department_id` may be omitted; whatever the payload says, the URL wins.
pub fn load_for_department(value: &Value, department_id: i64) -> Result<NewEmployee, ValidationErrors> {
    let mut changes = load_changes(value, Mode::FullExcept(&["department_id"]))?;
    changes.department_id = Some(department_id);
    changes.into_new()
}

/// Load an employee payload under the given mode
pub fn load_changes(value: &Value, mode: Mode<'_>) -> Result<EmployeeChanges, ValidationErrors> {
    let mut payload = Payload::open(value, &FIELDS, mode)?;

    let changes = EmployeeChanges {
        name: payload.string("name", NAME_MIN, NAME_MAX),
        date_of_birth: payload.date("date_of_birth"),
        salary: payload.integer("salary", Some(SALARY_MIN)),
        department_id: payload.integer("department_id", None),
    };
    payload.finish()?;

    Ok(changes)
}

/// Employee nested inside a department, without the back-reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeSummary {
    pub id: i64,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub salary: i64,
}

impl From<&Employee> for EmployeeSummary {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.name.clone(),
            date_of_birth: employee.date_of_birth,
            salary: employee.salary,
        }
    }
}

/// Employee as returned by the API, with a summary of its department
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeOut {
    pub id: i64,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub salary: i64,
    pub department: Option<DepartmentSummary>,
}

impl EmployeeOut {
    pub fn new(employee: Employee, department: Option<DepartmentSummary>) -> Self {
        Self {
            id: employee.id,
            name: employee.name,
            date_of_birth: employee.date_of_birth,
            salary: employee.salary,
            department,
        }
    }
}

/// Serialize one employee, fetching its department summary
pub async fn dump(pool: &SqlitePool, employee: Employee) -> staffbook_common::Result<EmployeeOut> {
    let department = DepartmentSummary::load(pool, employee.department_id).await?;
    Ok(EmployeeOut::new(employee, department))
}

/// Serialize many employees, loading each distinct department once
pub async fn dump_many(
    pool: &SqlitePool,
    list: Vec<Employee>,
) -> staffbook_common::Result<Vec<EmployeeOut>> {
    let mut summaries: HashMap<i64, Option<DepartmentSummary>> = HashMap::new();
    let mut out = Vec::with_capacity(list.len());

    for employee in list {
        let department = match summaries.get(&employee.department_id) {
            Some(summary) => summary.clone(),
            None => {
                let summary = DepartmentSummary::load(pool, employee.department_id).await?;
                summaries.insert(employee.department_id, summary.clone());
                summary
            }
        };
        out.push(EmployeeOut::new(employee, department));
    }

    Ok(out)
}
