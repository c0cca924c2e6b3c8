pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use crate::validation::{FieldError, field_errors};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Standard error body for everything except field validation and not-found.
///
/// ```json
/// {
///   "code": 1003,
///   "error": "INVALID_JSON",
///   "message": "Invalid JSON format"
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Body of a 400 caused by failed field rules: `{ "errors": [{ "field", "message" }] }`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorBody {
    pub errors: Vec<FieldError>,
}

/// Body of a 404: `{ "error": "<message>" }`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NotFoundBody {
    #[schema(example = "Product Not Found")]
    pub error: String,
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Validation failed: {} field error(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(field_errors(&errors))
    }
}

fn error_response(status: StatusCode, code: ErrorCode, message: String) -> Response {
    let body = Json(ErrorResponse {
        code: code.code(),
        error: code.as_str().to_string(),
        message,
        details: None,
    });
    (status, body).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    count = errors.len(),
                    "Request validation failed: {:?}",
                    errors
                );
                (StatusCode::BAD_REQUEST, Json(ValidationErrorBody { errors })).into_response()
            }
            AppError::NotFound(message) => {
                tracing::info!(error_code = ErrorCode::NotFound.code(), "Not found: {}", message);
                (StatusCode::NOT_FOUND, Json(NotFoundBody { error: message })).into_response()
            }
            AppError::InvalidJson(detail) => {
                tracing::warn!(
                    error_code = ErrorCode::InvalidJson.code(),
                    "Rejected request body: {}",
                    detail
                );
                error_response(
                    StatusCode::BAD_REQUEST,
                    ErrorCode::InvalidJson,
                    format!("{}: {}", ErrorCode::InvalidJson.default_message(), detail),
                )
            }
            AppError::BadRequest(message) => {
                tracing::info!(error_code = ErrorCode::BadRequest.code(), "Bad request: {}", message);
                error_response(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, message)
            }
            AppError::Database(detail) => {
                tracing::error!(
                    error_code = ErrorCode::DatabaseError.code(),
                    "Database error: {}",
                    detail
                );
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DatabaseError,
                    ErrorCode::DatabaseError.default_message().to_string(),
                )
            }
            AppError::InternalServerError(detail) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    detail
                );
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InternalError,
                    ErrorCode::InternalError.default_message().to_string(),
                )
            }
            AppError::ServiceUnavailable(message) => {
                tracing::warn!("Service unavailable: {}", message);
                error_response(
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorCode::ServiceUnavailable,
                    message,
                )
            }
        }
    }
}
