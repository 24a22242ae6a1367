//! Reply orchestration for the LINE relay.
//!
//! This crate turns one inbound chat text into at most one reply:
//!
//! - [`MessageRouter`] answers commands locally, gates everything else
//!   through the [`AccessGate`], and forwards allowed text to the
//!   [`ReplyOrchestrator`].
//! - [`ReplyOrchestrator`] asks providers in priority order and falls back
//!   to a fixed text when all of them fail.
//! - [`ReplySender`] is the seam to the messaging platform.
//!
//! # Architecture
//!
//! ```text
//! inbound text
//!      ↓
//! ┌──────────────────────────────────────────────┐
//! │                MESSAGE ROUTER                │
//! │                                              │
//! │  blank?            → drop                    │
//! │  help / image cmd  → local reply             │
//! │  not allowed       → fixed refusal           │
//! │  otherwise         → ReplyOrchestrator       │
//! │                        p0 → p1 → … → fallback│
//! └──────────────────────────────────────────────┘
//!      ↓
//! OutboundMessage → ReplySender
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use orchestrator::{AccessGate, MessageRouter, ReplyOrchestrator};
//!
//! let orchestrator = ReplyOrchestrator::builder()
//!     .provider(Arc::new(primary))
//!     .provider(Arc::new(backup))
//!     .build()?;
//! let router = MessageRouter::new(orchestrator, AccessGate::auto_enroll());
//!
//! if let Some(reply) = router.handle("U1234", "今天星期幾？").await {
//!     sender.send_reply(reply_token, &reply).await?;
//! }
//! ```

mod access;
mod commands;
mod error;
mod message;
mod orchestrator;
mod outcome;
mod router;
mod sender;

pub use access::{AccessGate, AccessMode};
pub use commands::{Command, HELP_TOKENS, IMAGE_TOKENS};
pub use error::OrchestratorError;
pub use message::OutboundMessage;
pub use orchestrator::{ReplyOrchestrator, ReplyOrchestratorBuilder, DEFAULT_FALLBACK_TEXT};
pub use outcome::{AttemptFailure, ProviderSpec, ReplyOutcome};
pub use router::{
    MessageRouter, HELP_TEXT, IMAGE_DISABLED_TEXT, IMAGE_FAILED_TEXT, IMAGE_USAGE_TEXT,
    NOT_AUTHORIZED_TEXT,
};
pub use sender::ReplySender;

// Re-export provider-core for convenience
pub use provider_core;
