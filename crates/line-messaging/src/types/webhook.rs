//! Webhook payload and event types.

use serde::{Deserialize, Serialize};

/// The body of a webhook delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    /// User ID of the bot that received the events.
    #[serde(default)]
    pub destination: String,

    /// Events in this delivery. Empty for the console's verify request.
    #[serde(default)]
    pub events: Vec<Event>,
}

impl WebhookPayload {
    /// Decode a raw webhook body.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}

/// A single webhook event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Event type (e.g., "message", "follow", "postback").
    #[serde(rename = "type")]
    pub event_type: String,

    /// Token for replying to this event. Absent for events that cannot be replied to.
    #[serde(default)]
    pub reply_token: Option<String>,

    /// Where the event came from.
    #[serde(default)]
    pub source: Option<Source>,

    /// Event time (milliseconds since epoch).
    #[serde(default)]
    pub timestamp: u64,

    /// Channel state: "active" or "standby".
    #[serde(default)]
    pub mode: Option<String>,

    /// Message content for message events.
    #[serde(default)]
    pub message: Option<EventMessage>,
}

impl Event {
    /// The text of a text message event, if this is one.
    pub fn text(&self) -> Option<&str> {
        if self.event_type != "message" {
            return None;
        }
        self.message
            .as_ref()
            .filter(|m| m.message_type == "text")
            .and_then(|m| m.text.as_deref())
    }

    /// Identifier of the sending user, falling back to the group or room.
    pub fn sender_id(&self) -> Option<&str> {
        self.source.as_ref().and_then(Source::sender_id)
    }

    /// Whether the channel is in standby mode for this event.
    pub fn is_standby(&self) -> bool {
        self.mode.as_deref() == Some("standby")
    }
}

/// Event source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    /// Source type: "user", "group" or "room".
    #[serde(rename = "type")]
    pub source_type: String,

    /// Sending user ID.
    #[serde(default)]
    pub user_id: Option<String>,

    /// Group ID for group chats.
    #[serde(default)]
    pub group_id: Option<String>,

    /// Room ID for multi-person chats.
    #[serde(default)]
    pub room_id: Option<String>,
}

impl Source {
    /// User ID if present, otherwise the group or room ID.
    pub fn sender_id(&self) -> Option<&str> {
        self.user_id
            .as_deref()
            .or(self.group_id.as_deref())
            .or(self.room_id.as_deref())
    }
}

/// The message object of a message event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventMessage {
    /// Message ID.
    #[serde(default)]
    pub id: String,

    /// Message type (e.g., "text", "image", "sticker").
    #[serde(rename = "type")]
    pub message_type: String,

    /// Text content for text messages.
    #[serde(default)]
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT_DELIVERY: &str = r#"{
        "destination": "Uxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx",
        "events": [{
            "type": "message",
            "message": {"type": "text", "id": "14353798921116", "text": "今天星期幾？"},
            "webhookEventId": "01FZ74A0TDDPYRVKNK77XKC3ZR",
            "deliveryContext": {"isRedelivery": false},
            "timestamp": 1625665242211,
            "source": {"type": "user", "userId": "U80696558e1aa831b8c2d1aa3a3b6b5e7"},
            "replyToken": "757913772c4646b784d4b7ce46d12671",
            "mode": "active"
        }]
    }"#;

    #[test]
    fn test_parse_text_event() {
        let payload = WebhookPayload::from_slice(TEXT_DELIVERY.as_bytes()).unwrap();
        assert_eq!(payload.events.len(), 1);

        let event = &payload.events[0];
        assert_eq!(event.text(), Some("今天星期幾？"));
        assert_eq!(event.sender_id(), Some("U80696558e1aa831b8c2d1aa3a3b6b5e7"));
        assert_eq!(
            event.reply_token.as_deref(),
            Some("757913772c4646b784d4b7ce46d12671")
        );
        assert!(!event.is_standby());
    }

    #[test]
    fn test_sticker_event_has_no_text() {
        let body = r#"{"events":[{"type":"message","replyToken":"t",
            "source":{"type":"user","userId":"U1"},
            "message":{"type":"sticker","id":"1","packageId":"446","stickerId":"1988"}}]}"#;
        let payload = WebhookPayload::from_slice(body.as_bytes()).unwrap();
        assert_eq!(payload.events[0].text(), None);
    }

    #[test]
    fn test_follow_event_has_no_text() {
        let body = r#"{"events":[{"type":"follow","replyToken":"t","source":{"type":"user","userId":"U1"}}]}"#;
        let payload = WebhookPayload::from_slice(body.as_bytes()).unwrap();
        assert_eq!(payload.events[0].text(), None);
        assert_eq!(payload.events[0].sender_id(), Some("U1"));
    }

    #[test]
    fn test_group_source_without_user() {
        let source = Source {
            source_type: "group".to_string(),
            user_id: None,
            group_id: Some("C123".to_string()),
            room_id: None,
        };
        assert_eq!(source.sender_id(), Some("C123"));
    }

    #[test]
    fn test_verify_request_has_no_events() {
        let payload = WebhookPayload::from_slice(br#"{"destination":"U0","events":[]}"#).unwrap();
        assert!(payload.events.is_empty());
    }
}
