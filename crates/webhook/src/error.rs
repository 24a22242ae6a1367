//! HTTP-facing errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use line_messaging::LineError;
use thiserror::Error;
use tracing::{error, warn};

/// Errors returned from the webhook endpoint.
#[derive(Debug, Error)]
pub enum AppError {
    /// Signature header missing or not matching the body.
    #[error("invalid signature")]
    InvalidSignature,

    /// Body is not a webhook payload.
    #[error("malformed body: {0}")]
    MalformedBody(String),

    /// Anything else.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<LineError> for AppError {
    fn from(err: LineError) -> Self {
        match err {
            LineError::InvalidSignature => AppError::InvalidSignature,
            LineError::Json(e) => AppError::MalformedBody(e.to_string()),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InvalidSignature => {
                warn!("Rejected webhook with invalid signature");
                (StatusCode::BAD_REQUEST, "Invalid signature").into_response()
            }
            AppError::MalformedBody(detail) => {
                warn!("Rejected malformed webhook body: {}", detail);
                (StatusCode::BAD_REQUEST, "Malformed body").into_response()
            }
            AppError::Internal(detail) => {
                error!("Webhook failed: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}
