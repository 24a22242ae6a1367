//! OpenAI-compatible image generation.

use provider_core::{async_trait, GeneratedImage, ImageGenerator, Prompt, ProviderFailure};
use reqwest::Client;
use tracing::{debug, info};

use crate::api_types::{error_message, ImageRequest, ImageResponse};
use crate::config::{ImageGeneratorConfig, ProviderConfigError};

/// Image generator backed by `/v1/images/generations`.
pub struct OpenAiImageGenerator {
    client: Client,
    config: ImageGeneratorConfig,
}

impl OpenAiImageGenerator {
    /// Create a new generator.
    pub fn new(config: ImageGeneratorConfig) -> Result<Self, ProviderConfigError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderConfigError::HttpClient(e.to_string()))?;

        info!(
            "OpenAiImageGenerator initialized with model: {}, size: {}",
            config.model, config.size
        );

        Ok(Self { client, config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &ImageGeneratorConfig {
        &self.config
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImageGenerator {
    async fn generate(&self, prompt: &Prompt) -> Result<GeneratedImage, ProviderFailure> {
        let url = format!(
            "{}/v1/images/generations",
            self.config.api_url.trim_end_matches('/')
        );
        let request = ImageRequest {
            model: &self.config.model,
            prompt: prompt.as_str(),
            n: 1,
            size: &self.config.size,
        };

        debug!("Requesting image from {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderFailure::timeout(e.to_string())
                } else {
                    ProviderFailure::transport(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderFailure::transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ProviderFailure::http(status.as_u16(), error_message(&body)));
        }

        let parsed: ImageResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderFailure::malformed(format!("failed to parse response: {}", e)))?;

        parsed
            .data
            .into_iter()
            .find_map(|image| image.url)
            .filter(|url| !url.trim().is_empty())
            .map(GeneratedImage::single)
            .ok_or_else(|| ProviderFailure::empty_content("no image url in response"))
    }

    fn name(&self) -> &str {
        "OpenAiImageGenerator"
    }
}
