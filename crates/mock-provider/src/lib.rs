//! Mock provider implementations for reply orchestration tests.
//!
//! This crate provides mock implementations of the `Provider` trait:
//! - `EchoProvider` - Echoes the prompt back, optionally prefixed
//! - `ScriptedProvider` - Returns a fixed reply or failure and counts calls
//! - `DelayedProvider` - Wraps another provider with artificial latency
//! - `PanickingProvider` - Panics on every call
//!
//! For real backends, use the `http-provider` crate instead.
//!
//! # Example
//!
//! ```rust
//! use mock_provider::{EchoProvider, Prompt, Provider};
//!
//! #[tokio::main]
//! async fn main() {
//!     let provider = EchoProvider::new("echo");
//!     let prompt = Prompt::new("Hello!").unwrap();
//!
//!     let reply = provider.ask_default(&prompt).await.unwrap();
//!     assert_eq!(reply.text, "Hello!");
//! }
//! ```

mod delayed;
mod echo;
mod panicking;
mod scripted;

// Re-export provider-core types for convenience
pub use provider_core::{
    async_trait, FailureKind, Prompt, Provider, ProviderFailure, ProviderReply, ProviderResult,
};

// Export mock implementations
pub use delayed::DelayedProvider;
pub use echo::EchoProvider;
pub use panicking::PanickingProvider;
pub use scripted::ScriptedProvider;
