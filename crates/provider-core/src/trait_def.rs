//! The Provider trait definition.

use std::time::Duration;

use async_trait::async_trait;

use crate::prompt::Prompt;
use crate::result::ProviderResult;

/// Timeout used when a provider does not declare its own.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(15);

/// A uniform adapter over one AI completion backend.
///
/// Implementations perform at most one outbound call per [`ask`](Self::ask)
/// and never retry; fallback across providers is the caller's job.
/// This trait is object-safe and can be used with `Arc<dyn Provider>`.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Stable identifier, used for logging and reply provenance.
    fn id(&self) -> &str;

    /// Ask the provider for a reply within `timeout`.
    ///
    /// Every outcome, including timeouts and malformed bodies, is returned
    /// as a [`ProviderResult`].
    async fn ask(&self, prompt: &Prompt, timeout: Duration) -> ProviderResult;

    /// Endpoint description for logs. Defaults to empty.
    fn endpoint(&self) -> &str {
        ""
    }

    /// The timeout this provider should get when the caller has none.
    fn default_timeout(&self) -> Duration {
        DEFAULT_PROVIDER_TIMEOUT
    }

    /// Ask using [`default_timeout`](Self::default_timeout).
    async fn ask_default(&self, prompt: &Prompt) -> ProviderResult {
        self.ask(prompt, self.default_timeout()).await
    }
}
