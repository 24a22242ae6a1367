//! Error types for prompt construction.

use thiserror::Error;

/// Errors that can occur when building a [`Prompt`](crate::Prompt).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    /// The text was empty or contained only whitespace.
    #[error("prompt is empty")]
    Empty,
}
