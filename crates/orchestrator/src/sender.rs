//! Reply sender trait.

use async_trait::async_trait;

use crate::error::OrchestratorError;
use crate::message::OutboundMessage;

/// Trait for delivering a reply to the messaging platform.
///
/// Abstracted to support different transports (LINE, tests, etc.)
#[async_trait]
pub trait ReplySender: Send + Sync {
    /// Deliver one reply addressed by `reply_token`.
    ///
    /// # Arguments
    /// * `reply_token` - Opaque handle from the inbound event
    /// * `message` - The reply to send
    async fn send_reply(
        &self,
        reply_token: &str,
        message: &OutboundMessage,
    ) -> Result<(), OrchestratorError>;
}
