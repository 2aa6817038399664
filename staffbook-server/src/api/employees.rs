//! Employee resources

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use super::{find_employee, parse_body};
use crate::error::{ApiError, ApiResult};
use crate::schema::{employee, EmployeeOut, Mode};
use crate::services::employees;
use crate::AppState;

const INVALID_DEPARTMENT: &str = "Not valid department id";

/// GET /api/v1/employees
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<EmployeeOut>>> {
    let all = employees::get_all(&state.db).await?;
    Ok(Json(employee::dump_many(&state.db, all).await?))
}

/// POST /api/v1/employees
pub async fn create(State(state): State<AppState>, body: Bytes) -> ApiResult<impl IntoResponse> {
    let new = employee::load(&parse_body(&body)?)?;

    let created = employees::create(&state.db, new)
        .await
        .map_err(ApiError::constraint(INVALID_DEPARTMENT))?;

    let out = employee::dump(&state.db, created).await?;
    Ok((StatusCode::CREATED, Json(out)))
}

/// GET /api/v1/employees/:id
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<EmployeeOut>> {
    let found = find_employee(&state.db, &id).await?;
    Ok(Json(employee::dump(&state.db, found).await?))
}

/// PUT /api/v1/employees/:id
pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<EmployeeOut>> {
    change(&state, &id, &body, Mode::Full).await.map(Json)
}

/// PATCH /api/v1/employees/:id
pub async fn modify(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<EmployeeOut>> {
    change(&state, &id, &body, Mode::Partial).await.map(Json)
}

async fn change(state: &AppState, id: &str, body: &Bytes, mode: Mode<'_>) -> ApiResult<EmployeeOut> {
    let found = find_employee(&state.db, id).await?;
    let changes = employee::load_changes(&parse_body(body)?, mode)?;

    let updated = employees::update(&state.db, &found, changes)
        .await
        .map_err(ApiError::constraint(INVALID_DEPARTMENT))?;

    Ok(employee::dump(&state.db, updated).await?)
}

/// DELETE /api/v1/employees/:id
pub async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    let found = find_employee(&state.db, &id).await?;
    employees::delete(&state.db, found).await?;
    Ok(StatusCode::NO_CONTENT)
}
