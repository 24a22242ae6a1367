//! Types for the LINE Messaging API.

mod reply;
mod webhook;

pub use reply::{Message, ReplyRequest, MAX_REPLY_MESSAGES, MAX_TEXT_CHARS};
pub use webhook::{Event, EventMessage, Source, WebhookPayload};
