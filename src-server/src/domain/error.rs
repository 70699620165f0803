//! Domain-level errors and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<rusqlite::Error> for DomainError {
    fn from(err: rusqlite::Error) -> Self {
        DomainError::Internal(err.to_string())
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            DomainError::NotFound(_) => (StatusCode::NOT_FOUND, "Not found".to_string()),
            DomainError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            DomainError::Internal(msg) => {
                // Details stay in the log
                error!(error = %msg, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            DomainError::NotFound("x".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            DomainError::InvalidInput("bad amount".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            DomainError::Internal("disk I/O error".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_sqlite_errors_are_internal() {
        let err: DomainError = rusqlite::Error::InvalidQuery.into();
        assert!(matches!(err, DomainError::Internal(_)));
    }
}
