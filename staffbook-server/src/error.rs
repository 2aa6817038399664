//! Error types for staffbook-server
//!
//! Every failure is answered with a JSON body carrying a `message` key. For
//! validation failures `message` holds the per-field error map.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::schema::ValidationErrors;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// No row with the requested id (404)
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// Payload failed schema validation (400)
    #[error("Validation failed: {0:?}")]
    Validation(ValidationErrors),

    /// Invalid request, including translated constraint violations (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// staffbook-common error (500)
    #[error("Common error: {0}")]
    Common(#[from] staffbook_common::Error),
}

impl ApiError {
    /// Not-found error for an entity name and the id as the caller wrote it
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        ApiError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Translate a store-level constraint violation into a fixed 400 message
    ///
    /// Other common errors pass through untouched.
    pub fn constraint(message: &'static str) -> impl FnOnce(staffbook_common::Error) -> ApiError {
        move |err| {
            if err.is_constraint_violation() {
                ApiError::BadRequest(message.to_string())
            } else {
                ApiError::Common(err)
            }
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound { entity, id } => (
                StatusCode::NOT_FOUND,
                json!({ "message": format!("{} with id {} not found", entity, id) }),
            ),
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, json!({ "message": errors }))
            }
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, json!({ "message": message }))
            }
            ApiError::Common(err) => {
                error!("Request failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
