//! Department operations

use sqlx::SqlitePool;
use tracing::info;

use staffbook_common::{Department, Employee, Result};

use super::employees;
use crate::schema::{DepartmentChanges, NewDepartment};

/// All departments ordered by id
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Department>> {
    let departments = sqlx::query_as::<_, Department>("SELECT id, name FROM departments ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(departments)
}

/// Department by primary key, `None` when absent
pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Department>> {
    let department = sqlx::query_as::<_, Department>("SELECT id, name FROM departments WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(department)
}

/// Insert a department and return it with its assigned id
pub async fn create(pool: &SqlitePool, new: NewDepartment) -> Result<Department> {
    let mut tx = pool.begin().await?;

    let department = sqlx::query_as::<_, Department>(
        "INSERT INTO departments (name) VALUES (?) RETURNING id, name",
    )
    .bind(&new.name)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    info!("Created department {} ({})", department.id, department.name);
    Ok(department)
}

/// Apply the provided fields and persist
pub async fn update(
    pool: &SqlitePool,
    department: &Department,
    changes: DepartmentChanges,
) -> Result<Department> {
    let mut updated = department.clone();
    if let Some(name) = changes.name {
        updated.name = name;
    }

    let mut tx = pool.begin().await?;

    let updated = sqlx::query_as::<_, Department>(
        "UPDATE departments SET name = ? WHERE id = ? RETURNING id, name",
    )
    .bind(&updated.name)
    .bind(updated.id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    info!("Updated department {}", updated.id);
    Ok(updated)
}

/// Remove a department; its employees go with it
pub async fn delete(pool: &SqlitePool, department: Department) -> Result<()> {
    let mut tx = pool.begin().await?;

    let cascaded: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees WHERE department_id = ?")
        .bind(department.id)
        .fetch_one(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM departments WHERE id = ?")
        .bind(department.id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!(
        "Deleted department {} ({}) and {} employees",
        department.id, department.name, cascaded
    );
    Ok(())
}

/// Employees belonging to the department
pub async fn employees_of(pool: &SqlitePool, department: &Department) -> Result<Vec<Employee>> {
    employees::get_all_for_department(pool, department.id).await
}

/// Average salary of the department's employees, rounded to 2 places
pub async fn get_avg_salary(pool: &SqlitePool, department: &Department) -> Result<f64> {
    let members = employees_of(pool, department).await?;
    Ok(average_salary(&members))
}

/// Mean salary rounded to 2 decimal places, 0 for an empty list
pub fn average_salary(employees: &[Employee]) -> f64 {
    if employees.is_empty() {
        return 0.0;
    }

    let total: i64 = employees.iter().map(|e| e.salary).sum();
    let mean = total as f64 / employees.len() as f64;
    (mean * 100.0).round() / 100.0
}
