//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use coursehub_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Handler error carrying an [`AppError`] across the HTTP boundary.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// HTTP status for an error kind.
    pub fn status(kind: ErrorKind) -> StatusCode {
        match kind {
            ErrorKind::Authentication
            | ErrorKind::TokenInvalid
            | ErrorKind::TokenExpired
            | ErrorKind::TokenRevoked => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict | ErrorKind::CannotDeleteChildren => StatusCode::CONFLICT,
            ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::Internal
            | ErrorKind::Database
            | ErrorKind::Cache
            | ErrorKind::Configuration
            | ErrorKind::Serialization => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = Self::status(err.kind);

        // Server-side details stay in the logs.
        let message = if status.is_server_error() {
            tracing::error!(kind = %err.kind, error = %err.message, source = ?err.source, "Internal server error");
            "Internal server error".to_string()
        } else {
            err.message
        };

        let body = ApiErrorResponse {
            error: err.kind.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

/// Result alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::status(ErrorKind::TokenRevoked), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::status(ErrorKind::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::status(ErrorKind::CannotDeleteChildren),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::status(ErrorKind::Validation),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::status(ErrorKind::Cache),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_response_status() {
        let response = ApiError::from(AppError::not_found("Node x not found")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
