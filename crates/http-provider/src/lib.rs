//! HTTP completion provider adapters.
//!
//! This crate provides [`HttpProvider`], a [`Provider`] implementation that
//! talks to a remote completion endpoint over HTTP, and
//! [`OpenAiImageGenerator`] for the image command.
//!
//! # Features
//!
//! - OpenAI-compatible chat completions (`chat` schema)
//! - Plain `{"prompt": ...}` → `{"reply": ...}` endpoints (`reply` schema)
//! - Per-provider timeout, reply field name and stripped prefixes
//! - Every failure classified as a [`FailureKind`], never returned as an error
//! - Configurable via environment variables prefixed with the provider id
//!
//! # Usage
//!
//! ```rust,no_run
//! use http_provider::{HttpProvider, HttpProviderConfig};
//! use provider_core::{Prompt, Provider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads OPENAI_API_KEY, OPENAI_MODEL, OPENAI_TIMEOUT_MS, ...
//!     let provider = HttpProvider::new(HttpProviderConfig::from_env("openai")?)?;
//!
//!     let prompt = Prompt::new("今天星期幾？")?;
//!     match provider.ask_default(&prompt).await {
//!         Ok(reply) => println!("{}", reply.text),
//!         Err(failure) => eprintln!("{} failed: {}", provider.id(), failure),
//!     }
//!     Ok(())
//! }
//! ```

mod api_types;
mod config;
mod images;
mod provider;

pub use config::{
    env_prefix, HttpProviderConfig, HttpProviderConfigBuilder, ImageGeneratorConfig,
    ProviderConfigError, ResponseSchema, DEFAULT_API_URL, DEFAULT_MODEL, DEFAULT_REPLY_FIELD,
};
pub use images::OpenAiImageGenerator;
pub use provider::HttpProvider;

// Re-export provider-core types for convenience
pub use provider_core::{
    async_trait, FailureKind, ImageGenerator, Prompt, Provider, ProviderFailure, ProviderReply,
    ProviderResult,
};
