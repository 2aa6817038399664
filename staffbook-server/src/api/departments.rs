//! Department resources
//!
//! `/departments`, `/departments/:id` and the nested
//! `/departments/:id/employees` collection.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use super::{find_department, parse_body};
use crate::error::{ApiError, ApiResult};
use crate::schema::{department, employee, DepartmentOut, EmployeeOut, Mode};
use crate::services::{departments, employees};
use crate::AppState;

const UNIQUE_NAME: &str = "Department names should be unique.";
const INVALID_DEPARTMENT: &str = "Not valid department id";

/// GET /api/v1/departments
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<DepartmentOut>>> {
    let all = departments::get_all(&state.db).await?;
    Ok(Json(department::dump_many(&state.db, all).await?))
}

/// POST /api/v1/departments
pub async fn create(State(state): State<AppState>, body: Bytes) -> ApiResult<impl IntoResponse> {
    let new = department::load(&parse_body(&body)?)?;

    let created = departments::create(&state.db, new)
        .await
        .map_err(ApiError::constraint(UNIQUE_NAME))?;

    let out = department::dump(&state.db, created).await?;
    Ok((StatusCode::CREATED, Json(out)))
}

/// GET /api/v1/departments/:id
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DepartmentOut>> {
    let found = find_department(&state.db, &id).await?;
    Ok(Json(department::dump(&state.db, found).await?))
}

/// PUT /api/v1/departments/:id
pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<DepartmentOut>> {
    change(&state, &id, &body, Mode::Full).await.map(Json)
}

/// PATCH /api/v1/departments/:id
pub async fn modify(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<DepartmentOut>> {
    change(&state, &id, &body, Mode::Partial).await.map(Json)
}

/// Shared body of PUT and PATCH; the department must exist before the
/// payload is looked at
async fn change(state: &AppState, id: &str, body: &Bytes, mode: Mode<'_>) -> ApiResult<DepartmentOut> {
    let found = find_department(&state.db, id).await?;
    let changes = department::load_changes(&parse_body(body)?, mode)?;

    let updated = departments::update(&state.db, &found, changes)
        .await
        .map_err(ApiError::constraint(UNIQUE_NAME))?;

    Ok(department::dump(&state.db, updated).await?)
}

/// DELETE /api/v1/departments/:id
///
/// Employees of the department are removed with it.
pub async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    let found = find_department(&state.db, &id).await?;
    departments::delete(&state.db, found).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/departments/:id/employees
pub async fn list_employees(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<EmployeeOut>>> {
    let found = find_department(&state.db, &id).await?;
    let members = departments::employees_of(&state.db, &found).await?;
    Ok(Json(employee::dump_many(&state.db, members).await?))
}

/// POST /api/v1/departments/:id/employees
///
/// The department in the URL is authoritative; a `department_id` in the
/// payload is validated and then ignored.
pub async fn create_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let found = find_department(&state.db, &id).await?;
    let new = employee::load_for_department(&parse_body(&body)?, found.id)?;

    let created = employees::create(&state.db, new)
        .await
        .map_err(ApiError::constraint(INVALID_DEPARTMENT))?;

    let out = employee::dump(&state.db, created).await?;
    Ok((StatusCode::CREATED, Json(out)))
}
