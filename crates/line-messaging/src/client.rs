//! LINE Messaging API HTTP client.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::LineConfig;
use crate::error::LineError;
use crate::types::{Message, ReplyRequest, MAX_REPLY_MESSAGES};

/// Error body returned by the Messaging API.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Client for the LINE Messaging API.
#[derive(Clone)]
pub struct LineClient {
    http: Client,
    config: LineConfig,
}

impl LineClient {
    /// Create a new client.
    pub fn new(config: LineConfig) -> Result<Self, LineError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(LineError::Http)?;

        info!("LINE client ready for {}", config.api_url);
        Ok(Self { http, config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &LineConfig {
        &self.config
    }

    /// Reply to an event with up to five messages.
    ///
    /// A reply token can be used once; this call is never retried.
    pub async fn reply(&self, reply_token: &str, messages: Vec<Message>) -> Result<(), LineError> {
        if messages.is_empty() {
            return Err(LineError::SendFailed("no messages to send".to_string()));
        }
        if messages.len() > MAX_REPLY_MESSAGES {
            return Err(LineError::SendFailed(format!(
                "at most {} messages per reply, got {}",
                MAX_REPLY_MESSAGES,
                messages.len()
            )));
        }
        if messages
            .iter()
            .any(|m| matches!(m, Message::Text { text } if text.trim().is_empty()))
        {
            return Err(LineError::SendFailed("text message is empty".to_string()));
        }

        let request = ReplyRequest::new(reply_token, messages);
        let url = self.config.reply_url();
        debug!("Reply request to {}: {} message(s)", url, request.messages.len());

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.channel_access_token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|e| e.message)
            .unwrap_or(body);

        Err(LineError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Reply to an event with a single text message.
    pub async fn reply_text(&self, reply_token: &str, text: &str) -> Result<(), LineError> {
        self.reply(reply_token, vec![Message::text(text)]).await
    }
}
