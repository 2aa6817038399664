//! Employee operations

use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{info, warn};

use staffbook_common::{Employee, Result};

use crate::schema::{EmployeeChanges, NewEmployee};

const SELECT_EMPLOYEES: &str =
    "SELECT id, name, date_of_birth, salary, department_id FROM employees";

/// All employees ordered by id
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Employee>> {
    let employees = sqlx::query_as::<_, Employee>(&format!("{} ORDER BY id", SELECT_EMPLOYEES))
        .fetch_all(pool)
        .await?;

    Ok(employees)
}

/// Employee by primary key, `None` when absent
pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Employee>> {
    let employee = sqlx::query_as::<_, Employee>(&format!("{} WHERE id = ?", SELECT_EMPLOYEES))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(employee)
}

/// Employees whose department_id equals `department_id`
pub async fn get_all_for_department(pool: &SqlitePool, department_id: i64) -> Result<Vec<Employee>> {
    let employees = sqlx::query_as::<_, Employee>(&format!(
        "{} WHERE department_id = ? ORDER BY id",
        SELECT_EMPLOYEES
    ))
    .bind(department_id)
    .fetch_all(pool)
    .await?;

    Ok(employees)
}

/// Insert an employee and return it with its assigned id
pub async fn create(pool: &SqlitePool, new: NewEmployee) -> Result<Employee> {
    let mut tx = pool.begin().await?;

    let employee = sqlx::query_as::<_, Employee>(
        r#"
        INSERT INTO employees (name, date_of_birth, salary, department_id)
        VALUES (?, ?, ?, ?)
        RETURNING id, name, date_of_birth, salary, department_id
        "#,
    )
    .bind(&new.name)
    .bind(new.date_of_birth)
    .bind(new.salary)
    .bind(new.department_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    info!(
        "Created employee {} in department {}",
        employee.id, employee.department_id
    );
    Ok(employee)
}

/// Apply the provided fields and persist
pub async fn update(pool: &SqlitePool, employee: &Employee, changes: EmployeeChanges) -> Result<Employee> {
    let mut updated = employee.clone();
    if let Some(name) = changes.name {
        updated.name = name;
    }
    if let Some(date_of_birth) = changes.date_of_birth {
        updated.date_of_birth = date_of_birth;
    }
    if let Some(salary) = changes.salary {
        updated.salary = salary;
    }
    if let Some(department_id) = changes.department_id {
        updated.department_id = department_id;
    }

    let mut tx = pool.begin().await?;

    let updated = sqlx::query_as::<_, Employee>(
        r#"
        UPDATE employees
        SET name = ?, date_of_birth = ?, salary = ?, department_id = ?
        WHERE id = ?
        RETURNING id, name, date_of_birth, salary, department_id
        "#,
    )
    .bind(&updated.name)
    .bind(updated.date_of_birth)
    .bind(updated.salary)
    .bind(updated.department_id)
    .bind(updated.id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    info!("Updated employee {}", updated.id);
    Ok(updated)
}

/// Remove a single employee
pub async fn delete(pool: &SqlitePool, employee: Employee) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(employee.id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!("Deleted employee {} ({})", employee.id, employee.name);
    Ok(())
}

/// Employees born on `date`, or in `date..=date_for_interval` when given
///
/// The bounds are used as given: a range whose end precedes its start
/// matches nothing.
pub async fn get_by_date_of_birth(
    pool: &SqlitePool,
    date: NaiveDate,
    date_for_interval: Option<NaiveDate>,
) -> Result<Vec<Employee>> {
    by_date_of_birth(pool, None, date, date_for_interval).await
}

/// Same as [`get_by_date_of_birth`], limited to one department
pub async fn get_by_date_of_birth_from_department(
    pool: &SqlitePool,
    department_id: i64,
    date: NaiveDate,
    date_for_interval: Option<NaiveDate>,
) -> Result<Vec<Employee>> {
    by_date_of_birth(pool, Some(department_id), date, date_for_interval).await
}

async fn by_date_of_birth(
    pool: &SqlitePool,
    department_id: Option<i64>,
    date: NaiveDate,
    date_for_interval: Option<NaiveDate>,
) -> Result<Vec<Employee>> {
    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT_EMPLOYEES);

    match date_for_interval {
        None => {
            query.push(" WHERE date_of_birth = ").push_bind(date);
        }
        Some(until) => {
            if until < date {
                warn!(
                    "Date of birth range {} .. {} is reversed; no employee can match",
                    date, until
                );
            }
            query
                .push(" WHERE date_of_birth BETWEEN ")
                .push_bind(date)
                .push(" AND ")
                .push_bind(until);
        }
    }

    if let Some(department_id) = department_id {
        query.push(" AND department_id = ").push_bind(department_id);
    }

    query.push(" ORDER BY id");

    let employees = query.build_query_as::<Employee>().fetch_all(pool).await?;
    Ok(employees)
}
