//! Sample data for demos and tests
//!
//! Two departments and five employees. `Dep 1` averages 1000, `Dep 2`
//! averages 2000.

use crate::Result;
use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::info;

/// (name, (year, month, day), salary, department index into DEPARTMENTS)
const EMPLOYEES: [(&str, (i32, u32, u32), i64, usize); 5] = [
    ("Employee 1", (1991, 1, 1), 1000, 0),
    ("Employee 2", (1992, 2, 2), 1000, 0),
    ("Employee 3", (1993, 3, 3), 2000, 1),
    ("Employee 4", (1994, 4, 4), 2000, 1),
    ("Employee 5", (1995, 5, 5), 2000, 1),
];

const DEPARTMENTS: [&str; 2] = ["Dep 1", "Dep 2"];

/// Insert the sample data set in one transaction
///
/// Fails with a unique violation if the departments already exist.
pub async fn populate(pool: &SqlitePool) -> Result<()> {
    let mut tx = pool.begin().await?;

    let mut department_ids = Vec::with_capacity(DEPARTMENTS.len());
    for name in DEPARTMENTS {
        let id: i64 = sqlx::query_scalar("INSERT INTO departments (name) VALUES (?) RETURNING id")
            .bind(name)
            .fetch_one(&mut *tx)
            .await?;
        department_ids.push(id);
    }

    for (name, (year, month, day), salary, department) in EMPLOYEES {
        let date_of_birth = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| crate::Error::InvalidInput(format!("bad sample date for {}", name)))?;

        sqlx::query(
            "INSERT INTO employees (name, date_of_birth, salary, department_id) VALUES (?, ?, ?, ?)",
        )
        .bind(name)
        .bind(date_of_birth)
        .bind(salary)
        .bind(department_ids[department])
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!(
        "Seeded {} departments and {} employees",
        DEPARTMENTS.len(),
        EMPLOYEES.len()
    );

    Ok(())
}
