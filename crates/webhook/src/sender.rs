//! LINE transport for outbound replies.

use async_trait::async_trait;
use line_messaging::{LineClient, Message};
use orchestrator::{OrchestratorError, OutboundMessage, ReplySender};

/// [`ReplySender`] backed by the LINE reply API.
pub struct LineReplySender {
    client: LineClient,
}

impl LineReplySender {
    /// Wrap a LINE client.
    pub fn new(client: LineClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReplySender for LineReplySender {
    async fn send_reply(
        &self,
        reply_token: &str,
        message: &OutboundMessage,
    ) -> Result<(), OrchestratorError> {
        let message = match message {
            OutboundMessage::Text(text) => Message::text(text.as_str()),
            OutboundMessage::Image {
                original_url,
                preview_url,
            } => Message::image(original_url.as_str(), preview_url.as_str()),
        };

        self.client
            .reply(reply_token, vec![message])
            .await
            .map_err(|e| OrchestratorError::SendFailed(e.to_string()))
    }
}
