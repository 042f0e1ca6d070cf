//! Error handler for converting AppError to HTTP responses.
//!
//! Maps the error taxonomy onto HTTP status codes: validation and bad
//! requests to 400, missing resources to 404, and infrastructure
//! failures to 500. Infrastructure details are logged here with full
//! context and replaced by a generic wrapper in the response body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match &self {
            AppError::NotFound {
                entity,
                field,
                value,
            } => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(
                    "NOT_FOUND",
                    &format!("{entity} with {field}={value} not found"),
                ),
            ),
            AppError::Validation { field, reason } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("VALIDATION_ERROR", &format!("{field}: {reason}")),
            ),
            AppError::BadRequest { message } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("BAD_REQUEST", message),
            ),
            AppError::Storage { operation, source } => {
                tracing::error!(operation = %operation, error = ?source, "Storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("STORAGE_ERROR", "Failed to persist job state")
                        .with_details(operation),
                )
            }
            AppError::Scheduler { operation, source } => {
                tracing::error!(operation = %operation, error = ?source, "Scheduler failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("SCHEDULER_ERROR", "Failed to synchronize the crontab")
                        .with_details(operation),
                )
            }
            AppError::Configuration { key, source } => {
                tracing::error!(key = %key, error = ?source, "Configuration failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("CONFIGURATION_ERROR", &format!("Configuration error: {key}")),
                )
            }
            AppError::Internal { source } => {
                tracing::error!(error = ?source, "Unhandled internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred"),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}
