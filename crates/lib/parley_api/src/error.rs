//! Application error types.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use parley_core::{ChatError, ErrorKind};
use thiserror::Error;
use tracing::debug;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream response error: {0}")]
    UpstreamResponse(String),

    #[error("Upstream transport error: {0}")]
    UpstreamTransport(String),

    #[error("Upstream timeout: {0}")]
    UpstreamTimeout(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Validation(m) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorKind::Validation.as_str(),
                m.as_str(),
            ),
            AppError::UpstreamResponse(m) => (
                StatusCode::BAD_GATEWAY,
                ErrorKind::UpstreamResponse.as_str(),
                m.as_str(),
            ),
            AppError::UpstreamTransport(m) => (
                StatusCode::BAD_GATEWAY,
                ErrorKind::UpstreamTransport.as_str(),
                m.as_str(),
            ),
            AppError::UpstreamTimeout(m) => (
                StatusCode::GATEWAY_TIMEOUT,
                ErrorKind::UpstreamTransport.as_str(),
                m.as_str(),
            ),
            AppError::UnsupportedMediaType(m) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "unsupported_media_type",
                m.as_str(),
            ),
        };
        let body = Json(ErrorResponse {
            status: "error".to_string(),
            error: error.to_string(),
            message: message.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        match e.kind {
            ErrorKind::Validation => AppError::Validation(e.message),
            ErrorKind::UpstreamResponse => AppError::UpstreamResponse(e.message),
            ErrorKind::UpstreamTransport if e.is_timeout() => AppError::UpstreamTimeout(e.message),
            ErrorKind::UpstreamTransport => AppError::UpstreamTransport(e.message),
        }
    }
}

/// Maps body rejections to fixed messages; serde's detail goes to the log only.
impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        debug!(detail = %e.body_text(), "rejected request body");
        match e {
            JsonRejection::MissingJsonContentType(_) => AppError::UnsupportedMediaType(
                "Expected request with `Content-Type: application/json`.".into(),
            ),
            JsonRejection::JsonSyntaxError(_) => {
                AppError::Validation("The request body is not valid JSON.".into())
            }
            JsonRejection::JsonDataError(_) => AppError::Validation(
                "The request body must be an object with a string message field.".into(),
            ),
            _ => AppError::Validation("The request body could not be read.".into()),
        }
    }
}
