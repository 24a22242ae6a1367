//! Echo provider implementation - echoes prompts back.

use std::time::Duration;

use async_trait::async_trait;
use provider_core::{Prompt, Provider, ProviderReply, ProviderResult};

/// A simple provider that echoes the prompt back.
///
/// Useful for exercising the webhook flow without any AI backend.
#[derive(Debug, Clone)]
pub struct EchoProvider {
    id: String,
    /// Optional prefix to add before the echo.
    prefix: Option<String>,
}

impl EchoProvider {
    /// Create a new EchoProvider with no prefix.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            prefix: None,
        }
    }

    /// Create a new EchoProvider with a custom prefix.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mock_provider::EchoProvider;
    ///
    /// let provider = EchoProvider::with_prefix("echo", "Echo: ");
    /// // Will respond with "Echo: <prompt>"
    /// ```
    pub fn with_prefix(id: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            prefix: Some(prefix.into()),
        }
    }
}

#[async_trait]
impl Provider for EchoProvider {
    fn id(&self) -> &str {
        &self.id
    }

    async fn ask(&self, prompt: &Prompt, _timeout: Duration) -> ProviderResult {
        let text = match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, prompt),
            None => prompt.to_string(),
        };
        ProviderReply::new(&self.id, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_echo_no_prefix() {
        let provider = EchoProvider::new("echo");
        let prompt = Prompt::new("Hello!").unwrap();

        let reply = provider.ask_default(&prompt).await.unwrap();
        assert_eq!(reply.text, "Hello!");
        assert_eq!(reply.provider_id, "echo");
    }

    #[tokio::test]
    async fn test_echo_with_prefix() {
        let provider = EchoProvider::with_prefix("echo", "Echo: ");
        let prompt = Prompt::new("Hello!").unwrap();

        let reply = provider.ask_default(&prompt).await.unwrap();
        assert_eq!(reply.text, "Echo: Hello!");
    }

    #[test]
    fn test_provider_id() {
        assert_eq!(EchoProvider::new("echo-1").id(), "echo-1");
    }
}
