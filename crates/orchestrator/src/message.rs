//! Outbound message type.

/// A reply to be delivered to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundMessage {
    /// Plain text reply.
    Text(String),
    /// Image reply by URL.
    Image {
        /// Full-size image URL.
        original_url: String,
        /// Preview image URL.
        preview_url: String,
    },
}

impl OutboundMessage {
    /// Create a text message.
    pub fn text(text: impl Into<String>) -> Self {
        OutboundMessage::Text(text.into())
    }

    /// The text, if this is a text message.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            OutboundMessage::Text(text) => Some(text),
            OutboundMessage::Image { .. } => None,
        }
    }
}
