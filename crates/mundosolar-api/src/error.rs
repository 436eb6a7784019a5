//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use mundosolar_core::error::{AppError, ErrorKind};
use mundosolar_core::types::response::ApiErrorResponse;

impl IntoResponse for AppErrorResponse {
    fn into_response(self) -> Response {
        let (status, error_code) = match self.0.kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ErrorKind::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ErrorKind::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
            ErrorKind::ExternalService => (StatusCode::BAD_GATEWAY, "EXTERNAL_SERVICE"),
            ErrorKind::Database
            | ErrorKind::Internal
            | ErrorKind::Configuration
            | ErrorKind::Serialization => {
                tracing::error!(error = %self.0, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        // Database details never reach the client.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error".to_string()
        } else {
            self.0.message.clone()
        };

        let body = ApiErrorResponse {
            success: false,
            error: error_code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

/// Newtype implementing `IntoResponse` for [`AppError`] (a foreign type
/// from the core crate).
#[derive(Debug)]
pub struct AppErrorResponse(pub AppError);

impl From<AppError> for AppErrorResponse {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Result alias for handlers: any `AppError` becomes an HTTP response.
pub type HandlerResult<T> = Result<T, AppErrorResponse>;
