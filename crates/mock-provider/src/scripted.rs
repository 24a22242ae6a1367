//! Scripted provider implementation - returns a canned outcome.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use provider_core::{FailureKind, Prompt, Provider, ProviderFailure, ProviderReply, ProviderResult};

#[derive(Debug, Clone)]
enum Script {
    Reply(String),
    Fail(ProviderFailure),
}

/// A provider that returns the same outcome on every call and counts calls.
///
/// Replies still go through [`ProviderReply::new`], so scripting a blank
/// reply yields an `EmptyContent` failure exactly like a real backend would.
#[derive(Debug)]
pub struct ScriptedProvider {
    id: String,
    script: Script,
    timeout: Duration,
    calls: AtomicUsize,
    last_timeout: std::sync::Mutex<Option<Duration>>,
}

impl ScriptedProvider {
    fn with_script(id: impl Into<String>, script: Script) -> Self {
        Self {
            id: id.into(),
            script,
            timeout: provider_core::DEFAULT_PROVIDER_TIMEOUT,
            calls: AtomicUsize::new(0),
            last_timeout: std::sync::Mutex::new(None),
        }
    }

    /// A provider that always replies with `text`.
    pub fn replying(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::with_script(id, Script::Reply(text.into()))
    }

    /// A provider that always fails with `kind`.
    pub fn failing(id: impl Into<String>, kind: FailureKind) -> Self {
        Self::with_script(
            id,
            Script::Fail(ProviderFailure::new(kind, "scripted failure")),
        )
    }

    /// Override the default timeout this provider advertises.
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Number of times [`Provider::ask`] has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The timeout passed to the most recent call, if any.
    pub fn last_timeout(&self) -> Option<Duration> {
        *self
            .last_timeout
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn default_timeout(&self) -> Duration {
        self.timeout
    }

    async fn ask(&self, _prompt: &Prompt, timeout: Duration) -> ProviderResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self
            .last_timeout
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(timeout);

        match &self.script {
            Script::Reply(text) => ProviderReply::new(&self.id, text),
            Script::Fail(failure) => Err(failure.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replying_counts_calls() {
        let provider = ScriptedProvider::replying("p1", "星期三");
        let prompt = Prompt::new("今天星期幾？").unwrap();

        assert_eq!(provider.calls(), 0);
        let reply = provider.ask(&prompt, Duration::from_millis(50)).await.unwrap();
        assert_eq!(reply.text, "星期三");
        assert_eq!(provider.calls(), 1);
        assert_eq!(provider.last_timeout(), Some(Duration::from_millis(50)));
    }

    #[tokio::test]
    async fn test_failing() {
        let provider = ScriptedProvider::failing("p1", FailureKind::HttpError { status: 500 });
        let prompt = Prompt::new("hi").unwrap();

        let failure = provider.ask_default(&prompt).await.unwrap_err();
        assert_eq!(failure.kind, FailureKind::HttpError { status: 500 });
    }

    #[tokio::test]
    async fn test_blank_script_is_empty_content() {
        let provider = ScriptedProvider::replying("p1", "   ");
        let prompt = Prompt::new("hi").unwrap();

        let failure = provider.ask_default(&prompt).await.unwrap_err();
        assert_eq!(failure.kind, FailureKind::EmptyContent);
    }
}
