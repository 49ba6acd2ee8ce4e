//! API error handling

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use domain_directory::DirectoryError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::Validation(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg.clone())
            }
            // Internals stay in the logs
            ApiError::Internal(detail) => {
                error!(detail = %detail, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An unexpected error occurred".to_string(),
                )
            }
            ApiError::Database(detail) => {
                error!(detail = %detail, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

impl From<DirectoryError> for ApiError {
    fn from(err: DirectoryError) -> Self {
        let message = err.to_string();
        match err {
            DirectoryError::InvalidFormat(_) | DirectoryError::MissingHeadquarter { .. } => {
                ApiError::BadRequest(message)
            }
            DirectoryError::EmptyField { .. } | DirectoryError::HeadquarterMismatch { .. } => {
                ApiError::Validation(message)
            }
            DirectoryError::NotFound(_) => ApiError::NotFound(message),
            DirectoryError::AlreadyExists(_) => ApiError::Conflict(message),
            DirectoryError::StorageFailure(_) => ApiError::Database(message),
            DirectoryError::Unexpected(_) => ApiError::Internal(message),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{FormatError, SwiftCode};

    fn status_of(error: DirectoryError) -> StatusCode {
        ApiError::from(error).into_response().status()
    }

    #[test]
    fn test_directory_error_statuses() {
        let code = SwiftCode::parse("CITIPLPP123").unwrap();

        assert_eq!(
            status_of(DirectoryError::InvalidFormat(FormatError::Institution)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(DirectoryError::HeadquarterMismatch {
                code: code.clone(),
                supplied: true,
                expected: false,
            }),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(DirectoryError::code_not_found(&code)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(DirectoryError::AlreadyExists(code.clone())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(DirectoryError::MissingHeadquarter {
                headquarter: code.headquarter_code(),
                branch: code,
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(DirectoryError::StorageFailure("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(DirectoryError::Unexpected("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
