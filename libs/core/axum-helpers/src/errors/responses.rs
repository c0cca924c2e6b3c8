//! Reusable OpenAPI response types for consistent API documentation.

use super::{ErrorResponse, NotFoundBody, ValidationErrorBody};
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Bad Request - one or more field rules failed",
    content_type = "application/json",
    example = json!({
        "errors": [
            {"field": "name", "message": "Product name is required"},
            {"field": "price", "message": "Invalid price"}
        ]
    })
)]
pub struct ValidationFailedResponse(pub ValidationErrorBody);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - body is not valid JSON",
    content_type = "application/json",
    example = json!({
        "code": 1003,
        "error": "INVALID_JSON",
        "message": "Invalid JSON format: expected value at line 1 column 1"
    })
)]
pub struct InvalidJsonResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({"error": "Product Not Found"})
)]
pub struct NotFoundResponse(pub NotFoundBody);

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "code": 2003,
        "error": "DATABASE_ERROR",
        "message": "Database error occurred"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);
