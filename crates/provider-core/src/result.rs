//! Provider result types.

use std::fmt;

use thiserror::Error;

/// The outcome of a single provider attempt.
///
/// Failure is an ordinary value here. Callers match on it instead of
/// catching provider-specific errors.
pub type ProviderResult = Result<ProviderReply, ProviderFailure>;

/// A usable reply from a provider.
///
/// The text is always non-blank; see [`ProviderReply::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderReply {
    /// The reply text, trimmed.
    pub text: String,
    /// Id of the provider that produced the reply.
    pub provider_id: String,
}

impl ProviderReply {
    /// Build a reply, applying the empty-content policy.
    ///
    /// Blank or whitespace-only text becomes a
    /// [`FailureKind::EmptyContent`] failure instead of a reply.
    pub fn new(provider_id: impl Into<String>, text: impl AsRef<str>) -> ProviderResult {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ProviderFailure::empty_content("reply text is blank"));
        }
        Ok(Self {
            text: trimmed.to_string(),
            provider_id: provider_id.into(),
        })
    }
}

/// Classification of a provider failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// No response within the time budget.
    Timeout,
    /// Connection, DNS or TLS failure (and anything unexpected).
    Transport,
    /// The endpoint answered with a non-2xx status.
    HttpError {
        /// HTTP status code.
        status: u16,
    },
    /// The body could not be parsed per the provider's schema.
    MalformedResponse,
    /// The body parsed but the reply field was blank.
    EmptyContent,
}

impl FailureKind {
    /// Short machine-friendly label, used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            FailureKind::Timeout => "timeout",
            FailureKind::Transport => "transport",
            FailureKind::HttpError { .. } => "http_error",
            FailureKind::MalformedResponse => "malformed_response",
            FailureKind::EmptyContent => "empty_content",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::HttpError { status } => write!(f, "http_error({})", status),
            other => f.write_str(other.label()),
        }
    }
}

/// A failed provider attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {detail}")]
pub struct ProviderFailure {
    /// What went wrong.
    pub kind: FailureKind,
    /// Human-readable detail for logs. Never shown to end users.
    pub detail: String,
}

impl ProviderFailure {
    /// Create a failure of the given kind.
    pub fn new(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    /// The call did not finish within its budget.
    pub fn timeout(detail: impl Into<String>) -> Self {
        Self::new(FailureKind::Timeout, detail)
    }

    /// Connection-level failure.
    pub fn transport(detail: impl Into<String>) -> Self {
        Self::new(FailureKind::Transport, detail)
    }

    /// Non-success HTTP status.
    pub fn http(status: u16, detail: impl Into<String>) -> Self {
        Self::new(FailureKind::HttpError { status }, detail)
    }

    /// Unparseable body.
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::new(FailureKind::MalformedResponse, detail)
    }

    /// Blank reply.
    pub fn empty_content(detail: impl Into<String>) -> Self {
        Self::new(FailureKind::EmptyContent, detail)
    }
}
