//! Provider descriptors and reply outcomes.

use std::time::Duration;

use provider_core::ProviderFailure;

/// Static description of one configured provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSpec {
    /// Unique provider id, used for provenance and logs.
    pub id: String,
    /// Endpoint the provider talks to, informational only.
    pub endpoint: String,
    /// Per-attempt time budget.
    pub timeout: Duration,
    /// Position in the fallback order, 1 is tried first.
    pub priority: usize,
}

/// A failed attempt against one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptFailure {
    /// Provider that failed.
    pub provider_id: String,
    /// Why it failed.
    pub failure: ProviderFailure,
}

/// Result of one orchestrated request.
///
/// Always carries user-visible text: either a provider reply or the
/// configured fallback text when every provider failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyOutcome {
    /// Text to send back to the user.
    pub text: String,
    /// Provider whose reply was used, `None` when the fallback text was used.
    pub answered_by: Option<String>,
    /// Provider ids attempted, in order.
    pub attempted: Vec<String>,
    /// Failures collected before the answer, in attempt order.
    pub failures: Vec<AttemptFailure>,
}

impl ReplyOutcome {
    /// Whether every provider failed.
    pub fn is_fallback(&self) -> bool {
        self.answered_by.is_none()
    }

    /// Provenance label for logs: the provider id or `"none"`.
    pub fn answered_by_label(&self) -> &str {
        self.answered_by.as_deref().unwrap_or("none")
    }
}
