//! Types for the reply API.

use serde::Serialize;

/// Maximum number of message objects in one reply.
pub const MAX_REPLY_MESSAGES: usize = 5;

/// Maximum characters in one text message.
pub const MAX_TEXT_CHARS: usize = 5000;

/// Body of `POST /v2/bot/message/reply`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest {
    /// Reply token from the webhook event.
    pub reply_token: String,
    /// Messages to send (1 to 5).
    pub messages: Vec<Message>,
}

impl ReplyRequest {
    /// Create a reply with the given messages.
    pub fn new(reply_token: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            reply_token: reply_token.into(),
            messages,
        }
    }
}

/// A message object sent to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Message {
    /// Plain text.
    Text {
        /// Message text.
        text: String,
    },
    /// Image by URL.
    #[serde(rename_all = "camelCase")]
    Image {
        /// Full-size image URL (HTTPS).
        original_content_url: String,
        /// Preview image URL (HTTPS).
        preview_image_url: String,
    },
}

impl Message {
    /// A text message, truncated to [`MAX_TEXT_CHARS`] characters.
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        let text = if text.chars().count() > MAX_TEXT_CHARS {
            text.chars().take(MAX_TEXT_CHARS).collect()
        } else {
            text
        };
        Message::Text { text }
    }

    /// An image message.
    pub fn image(original_content_url: impl Into<String>, preview_image_url: impl Into<String>) -> Self {
        Message::Image {
            original_content_url: original_content_url.into(),
            preview_image_url: preview_image_url.into(),
        }
    }
}
