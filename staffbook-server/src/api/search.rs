//! Date-of-birth search
//!
//! `date_of_birth` alone matches that exact date. With `date_for_interval`
//! the match is the inclusive range between the two, taken in the order
//! given.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use super::find_department;
use crate::error::{ApiError, ApiResult};
use crate::schema::{employee, parse_date, EmployeeOut};
use crate::services::employees;
use crate::AppState;

/// Query parameters for date-of-birth search
#[derive(Debug, Default, Deserialize)]
pub struct DateOfBirthQuery {
    /// Exact date, or start of the range (YYYY-MM-DD)
    pub date_of_birth: Option<String>,

    /// End of the range (YYYY-MM-DD)
    pub date_for_interval: Option<String>,
}

impl DateOfBirthQuery {
    /// Parsed bounds; a missing or empty start date is an error
    pub fn bounds(&self) -> ApiResult<(NaiveDate, Option<NaiveDate>)> {
        let start = match non_empty(&self.date_of_birth) {
            Some(text) => date_param(text)?,
            None => return Err(ApiError::BadRequest("Enter search data".to_string())),
        };

        let end = match non_empty(&self.date_for_interval) {
            Some(text) => Some(date_param(text)?),
            None => None,
        };

        Ok((start, end))
    }
}

fn non_empty(param: &Option<String>) -> Option<&str> {
    param.as_deref().map(str::trim).filter(|text| !text.is_empty())
}

/// Unwrap the extracted query, answering a malformed query string with the
/// usual JSON error body
fn search_query(
    query: Result<Query<DateOfBirthQuery>, QueryRejection>,
) -> ApiResult<DateOfBirthQuery> {
    query
        .map(|Query(query)| query)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

fn date_param(text: &str) -> ApiResult<NaiveDate> {
    parse_date(text).ok_or_else(|| ApiError::BadRequest(format!("Not a valid date: {}", text)))
}

/// GET /api/v1/employees/search?date_of_birth=..&date_for_interval=..
pub async fn search_all(
    State(state): State<AppState>,
    query: Result<Query<DateOfBirthQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<EmployeeOut>>> {
    let (start, end) = search_query(query)?.bounds()?;

    let found = employees::get_by_date_of_birth(&state.db, start, end).await?;
    Ok(Json(employee::dump_many(&state.db, found).await?))
}

/// GET /api/v1/departments/:id/employees/search?date_of_birth=..&date_for_interval=..
///
/// The dates are checked before the department is looked up.
pub async fn search_department(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<DateOfBirthQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<EmployeeOut>>> {
    let (start, end) = search_query(query)?.bounds()?;
    let department = find_department(&state.db, &id).await?;

    let found =
        employees::get_by_date_of_birth_from_department(&state.db, department.id, start, end)
            .await?;
    Ok(Json(employee::dump_many(&state.db, found).await?))
}
