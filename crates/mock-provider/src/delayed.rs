//! Delayed provider implementation - wraps another provider with artificial delay.

use std::time::Duration;

use async_trait::async_trait;
use provider_core::{Prompt, Provider, ProviderResult};
use tokio::time::sleep;

/// A provider that wraps another provider and adds artificial delay.
///
/// The delay ignores the caller's timeout, which makes this useful for
/// simulating a backend that hangs past its budget.
pub struct DelayedProvider<P: Provider> {
    inner: P,
    delay: Duration,
}

impl<P: Provider> DelayedProvider<P> {
    /// Create a new DelayedProvider wrapping the given provider with the specified delay.
    pub fn new(inner: P, delay: Duration) -> Self {
        Self { inner, delay }
    }

    /// Create a provider with a delay in milliseconds.
    pub fn with_millis(inner: P, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }

    /// Create a provider with a delay in seconds.
    pub fn with_secs(inner: P, secs: u64) -> Self {
        Self::new(inner, Duration::from_secs(secs))
    }

    /// The wrapped provider.
    pub fn inner(&self) -> &P {
        &self.inner
    }
}

#[async_trait]
impl<P: Provider> Provider for DelayedProvider<P> {
    fn id(&self) -> &str {
        self.inner.id()
    }

    fn default_timeout(&self) -> Duration {
        self.inner.default_timeout()
    }

    async fn ask(&self, prompt: &Prompt, timeout: Duration) -> ProviderResult {
        sleep(self.delay).await;
        self.inner.ask(prompt, timeout).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EchoProvider;
    use std::time::Instant;

    #[tokio::test]
    async fn test_delayed_provider() {
        let provider = DelayedProvider::with_millis(EchoProvider::new("echo"), 100);
        let prompt = Prompt::new("test").unwrap();

        let start = Instant::now();
        let reply = provider.ask_default(&prompt).await.unwrap();
        let elapsed = start.elapsed();

        assert_eq!(reply.text, "test");
        assert!(elapsed >= Duration::from_millis(100));
    }

    #[test]
    fn test_id_is_inner_id() {
        let provider = DelayedProvider::with_millis(EchoProvider::new("slow"), 0);
        assert_eq!(provider.id(), "slow");
    }
}
