//! Inbound text routing.

use std::sync::Arc;

use provider_core::{ImageGenerator, Prompt};
use tracing::{debug, info, warn};

use crate::access::AccessGate;
use crate::commands::Command;
use crate::message::OutboundMessage;
use crate::orchestrator::ReplyOrchestrator;

/// Help text shown for the help command.
pub const HELP_TEXT: &str = "我是 AI 聊天機器人，直接傳訊息給我就會回覆你。

指令：
• /help 或 幫助 - 顯示這段說明
• /image <描述> 或 畫圖 <描述> - 依照描述產生一張圖片

如果所有 AI 服務都暫時無法使用，我會回覆一段固定的錯誤訊息。";

/// Reply sent to senders outside the allow-list.
pub const NOT_AUTHORIZED_TEXT: &str = "抱歉，你沒有使用這個機器人的權限。";

/// Reply for an image command without a description.
pub const IMAGE_USAGE_TEXT: &str = "請在指令後面加上圖片描述，例如：/image 一隻在海邊的貓";

/// Reply for an image command when no generator is configured.
pub const IMAGE_DISABLED_TEXT: &str = "目前沒有開啟圖片產生功能。";

/// Reply when image generation fails.
pub const IMAGE_FAILED_TEXT: &str = "抱歉，圖片產生失敗！";

/// Turns one inbound text into at most one outbound reply.
///
/// Commands are answered locally without touching the providers or the
/// access gate. All other text is gated and then handed to the
/// [`ReplyOrchestrator`].
pub struct MessageRouter {
    orchestrator: ReplyOrchestrator,
    gate: AccessGate,
    images: Option<Arc<dyn ImageGenerator>>,
}

impl MessageRouter {
    /// Create a router without image generation.
    pub fn new(orchestrator: ReplyOrchestrator, gate: AccessGate) -> Self {
        Self {
            orchestrator,
            gate,
            images: None,
        }
    }

    /// Enable the image command.
    pub fn with_image_generator(mut self, generator: Arc<dyn ImageGenerator>) -> Self {
        info!("Image command enabled via {}", generator.name());
        self.images = Some(generator);
        self
    }

    /// The provider orchestrator.
    pub fn orchestrator(&self) -> &ReplyOrchestrator {
        &self.orchestrator
    }

    /// The access gate.
    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    /// Handle text from `sender_id`.
    ///
    /// Returns `None` when the text is blank and nothing should be sent.
    pub async fn handle(&self, sender_id: &str, raw_text: &str) -> Option<OutboundMessage> {
        let text = raw_text.trim();
        if text.is_empty() {
            debug!("Dropping blank message from {}", sender_id);
            return None;
        }

        if let Some(command) = Command::parse(text) {
            debug!("Command from {}: {:?}", sender_id, command);
            return Some(match command {
                Command::Help => OutboundMessage::text(HELP_TEXT),
                Command::Image(description) => self.handle_image(description).await,
            });
        }

        if !self.gate.authorize(sender_id).await {
            info!("Rejected message from unauthorized sender {}", sender_id);
            return Some(OutboundMessage::text(NOT_AUTHORIZED_TEXT));
        }

        let prompt = match Prompt::new(text) {
            Ok(prompt) => prompt,
            Err(e) => {
                debug!("Dropping message from {}: {}", sender_id, e);
                return None;
            }
        };

        let outcome = self.orchestrator.ask(&prompt).await;
        info!(
            "Reply for {} answered by {} after {} attempt(s)",
            sender_id,
            outcome.answered_by_label(),
            outcome.attempted.len()
        );
        Some(OutboundMessage::Text(outcome.text))
    }

    async fn handle_image(&self, description: Option<String>) -> OutboundMessage {
        let Some(generator) = &self.images else {
            return OutboundMessage::text(IMAGE_DISABLED_TEXT);
        };
        let Some(prompt) = description.and_then(|d| Prompt::new(d).ok()) else {
            return OutboundMessage::text(IMAGE_USAGE_TEXT);
        };

        match generator.generate(&prompt).await {
            Ok(image) => OutboundMessage::Image {
                original_url: image.url,
                preview_url: image.preview_url,
            },
            Err(failure) => {
                warn!("Image generation via {} failed: {}", generator.name(), failure);
                OutboundMessage::text(IMAGE_FAILED_TEXT)
            }
        }
    }
}
