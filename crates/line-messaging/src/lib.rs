//! LINE Messaging API client library.
//!
//! This crate covers the parts of the LINE Messaging API the relay needs:
//!
//! - Verifying the `X-Line-Signature` header of webhook deliveries
//! - Decoding webhook payloads into [`Event`]s
//! - Replying to an event through the reply API
//!
//! # Example
//!
//! ```no_run
//! use line_messaging::{verify_signature, LineClient, LineConfig, WebhookPayload};
//!
//! # async fn example(body: &[u8], signature: &str) -> Result<(), line_messaging::LineError> {
//! let config = LineConfig::from_env()?;
//! verify_signature(&config.channel_secret, body, signature)?;
//!
//! let payload = WebhookPayload::from_slice(body)?;
//! let client = LineClient::new(config)?;
//! for event in &payload.events {
//!     if let (Some(token), Some(text)) = (event.reply_token.as_deref(), event.text()) {
//!         client.reply_text(token, text).await?;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod signature;
pub mod types;

pub use client::LineClient;
pub use config::LineConfig;
pub use error::LineError;
pub use signature::{sign, verify_signature, SIGNATURE_HEADER};
pub use types::*;

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
