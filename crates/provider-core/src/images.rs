//! Image generation support.
//!
//! The relay treats image generation as a collaborator behind a trait, so
//! the message router can dispatch an image directive without knowing which
//! backend is in use.

use async_trait::async_trait;

use crate::prompt::Prompt;
use crate::result::ProviderFailure;

/// A generated image, addressed by a public HTTPS URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Full-size image URL.
    pub url: String,
    /// Preview image URL. Backends without thumbnails reuse `url`.
    pub preview_url: String,
}

impl GeneratedImage {
    /// An image whose preview is the image itself.
    pub fn single(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            preview_url: url.clone(),
            url,
        }
    }
}

/// Trait for backends that turn a prompt into an image.
///
/// Failures use the same [`ProviderFailure`] classification as text
/// providers.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate one image for the prompt.
    async fn generate(&self, prompt: &Prompt) -> Result<GeneratedImage, ProviderFailure>;

    /// Human-readable backend name.
    fn name(&self) -> &str;
}
