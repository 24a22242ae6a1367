//! Core trait and types for AI completion providers.
//!
//! This crate provides the shared interface for every backend the relay can
//! ask for a reply. It defines:
//!
//! - [`Provider`] - The trait that all provider adapters implement
//! - [`Prompt`] - A validated, non-blank user message
//! - [`ProviderResult`] - Either a [`ProviderReply`] or a typed [`ProviderFailure`]
//! - [`ImageGenerator`] - Trait for the image-generation collaborator
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use provider_core::{async_trait, Prompt, Provider, ProviderReply, ProviderResult};
//!
//! struct ShoutProvider;
//!
//! #[async_trait]
//! impl Provider for ShoutProvider {
//!     fn id(&self) -> &str {
//!         "shout"
//!     }
//!
//!     async fn ask(&self, prompt: &Prompt, _timeout: Duration) -> ProviderResult {
//!         ProviderReply::new(self.id(), prompt.as_str().to_uppercase())
//!     }
//! }
//! ```

mod error;
mod images;
mod prompt;
mod result;
mod trait_def;

pub use error::PromptError;
pub use images::{GeneratedImage, ImageGenerator};
pub use prompt::Prompt;
pub use result::{FailureKind, ProviderFailure, ProviderReply, ProviderResult};
pub use trait_def::{Provider, DEFAULT_PROVIDER_TIMEOUT};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
