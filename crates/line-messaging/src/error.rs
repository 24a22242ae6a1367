//! Error types for line-messaging.

use thiserror::Error;

/// Errors that can occur when talking to the LINE platform.
#[derive(Debug, Error)]
pub enum LineError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The webhook signature did not match the body.
    #[error("Invalid signature")]
    InvalidSignature,

    /// The reply API answered with an error status.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A reply was rejected before sending.
    #[error("Send failed: {0}")]
    SendFailed(String),
}
