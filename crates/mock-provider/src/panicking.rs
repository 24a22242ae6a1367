//! Panicking provider implementation - simulates an adapter bug.

use std::time::Duration;

use async_trait::async_trait;
use provider_core::{Prompt, Provider, ProviderResult};

/// A provider whose `ask` panics.
///
/// Used to check that a buggy adapter cannot abort handling of a message.
#[derive(Debug, Clone)]
pub struct PanickingProvider {
    id: String,
}

impl PanickingProvider {
    /// Create a new PanickingProvider.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Provider for PanickingProvider {
    fn id(&self) -> &str {
        &self.id
    }

    async fn ask(&self, _prompt: &Prompt, _timeout: Duration) -> ProviderResult {
        panic!("provider {} blew up", self.id)
    }
}
