//! Error types for orchestrator operations.

use thiserror::Error;

/// Errors that can occur while building or using the orchestrator.
///
/// Provider failures are deliberately absent: they are folded into
/// [`ReplyOutcome`](crate::ReplyOutcome) and never surface as errors.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Invalid configuration detected at startup.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Outbound reply could not be delivered.
    #[error("send failed: {0}")]
    SendFailed(String),
}
