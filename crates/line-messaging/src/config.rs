//! Configuration types for line-messaging.

use std::env;

use crate::error::LineError;

/// Default LINE API base URL.
pub const DEFAULT_API_URL: &str = "https://api.line.me";

/// Configuration for a LINE Messaging API channel.
#[derive(Clone)]
pub struct LineConfig {
    /// Base URL of the Messaging API (e.g., "https://api.line.me").
    pub api_url: String,
    /// Channel secret, used to verify webhook signatures.
    pub channel_secret: String,
    /// Channel access token, used for the reply API.
    pub channel_access_token: String,
}

impl std::fmt::Debug for LineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineConfig")
            .field("api_url", &self.api_url)
            .field("channel_secret", &"<redacted>")
            .field("channel_access_token", &"<redacted>")
            .finish()
    }
}

impl LineConfig {
    /// Create a configuration against the default API URL.
    pub fn new(channel_secret: impl Into<String>, channel_access_token: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            channel_secret: channel_secret.into(),
            channel_access_token: channel_access_token.into(),
        }
    }

    /// Point the client at a different API base URL.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Load from environment variables.
    ///
    /// Required: `LINE_CHANNEL_SECRET`, `LINE_CHANNEL_ACCESS_TOKEN`.
    /// Optional: `LINE_API_URL` (default: https://api.line.me).
    pub fn from_env() -> Result<Self, LineError> {
        let required = |name: &str| {
            env::var(name)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| LineError::Config(format!("{} not set", name)))
        };

        let channel_secret = required("LINE_CHANNEL_SECRET")?;
        let channel_access_token = required("LINE_CHANNEL_ACCESS_TOKEN")?;
        let api_url = env::var("LINE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Ok(Self {
            api_url,
            channel_secret,
            channel_access_token,
        })
    }

    /// Get the reply endpoint URL.
    pub fn reply_url(&self) -> String {
        format!("{}/v2/bot/message/reply", self.api_url.trim_end_matches('/'))
    }
}
