//! HttpProvider implementation.

use std::time::Duration;

use provider_core::{async_trait, Prompt, Provider, ProviderFailure, ProviderReply, ProviderResult};
use reqwest::Client;
use tracing::{debug, info};

use crate::api_types::{
    error_message, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ReplyRequest,
};
use crate::config::{HttpProviderConfig, ProviderConfigError, ResponseSchema};

/// A provider that asks a remote completion endpoint over HTTP.
///
/// Each [`ask`](Provider::ask) issues exactly one POST. The whole exchange
/// (connect, send, read body) is bounded by the caller's timeout; when the
/// budget runs out the request future is dropped and its response, if it
/// ever arrives, is discarded.
pub struct HttpProvider {
    client: Client,
    config: HttpProviderConfig,
    endpoint: String,
}

impl HttpProvider {
    /// Create a new HttpProvider with the given configuration.
    pub fn new(config: HttpProviderConfig) -> Result<Self, ProviderConfigError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ProviderConfigError::HttpClient(e.to_string()))?;

        let endpoint = config.endpoint_url();

        info!(
            "HttpProvider {} initialized: endpoint={}, schema={:?}, timeout={:?}",
            config.id, endpoint, config.schema, config.timeout
        );

        Ok(Self {
            client,
            config,
            endpoint,
        })
    }

    /// Create an HttpProvider for `id` from environment variables.
    ///
    /// See [`HttpProviderConfig::from_env`] for the variables read.
    pub fn from_env(id: &str) -> Result<Self, ProviderConfigError> {
        Self::new(HttpProviderConfig::from_env(id)?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &HttpProviderConfig {
        &self.config
    }

    fn build_chat_request(&self, prompt: &Prompt) -> ChatCompletionRequest {
        let mut messages = Vec::new();

        if let Some(ref system_prompt) = self.config.system_prompt {
            messages.push(ChatMessage::system(system_prompt.clone()));
        }
        messages.push(ChatMessage::user(prompt.as_str()));

        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }

    /// Perform the request without any time bound.
    async fn request(&self, prompt: &Prompt) -> ProviderResult {
        let builder = self.client.post(&self.endpoint);
        let builder = match self.config.schema {
            ResponseSchema::ChatCompletions => builder.json(&self.build_chat_request(prompt)),
            ResponseSchema::JsonReply { .. } => builder.json(&ReplyRequest {
                prompt: prompt.as_str(),
            }),
        };
        let builder = if self.config.api_key.is_empty() {
            builder
        } else {
            builder.bearer_auth(&self.config.api_key)
        };

        debug!("Sending request to {} ({} chars)", self.endpoint, prompt.char_count());

        let response = builder.send().await.map_err(classify_reqwest_error)?;
        let status = response.status();
        let body = response.text().await.map_err(classify_reqwest_error)?;

        if !status.is_success() {
            return Err(ProviderFailure::http(status.as_u16(), error_message(&body)));
        }

        let text = match &self.config.schema {
            ResponseSchema::ChatCompletions => parse_chat_body(&body)?,
            ResponseSchema::JsonReply { field } => parse_reply_body(&body, field)?,
        };

        ProviderReply::new(&self.config.id, strip_prefixes(&text, &self.config.strip_prefixes))
    }
}

#[async_trait]
impl Provider for HttpProvider {
    fn id(&self) -> &str {
        &self.config.id
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn default_timeout(&self) -> Duration {
        self.config.timeout
    }

    async fn ask(&self, prompt: &Prompt, timeout: Duration) -> ProviderResult {
        match tokio::time::timeout(timeout, self.request(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(ProviderFailure::timeout(format!(
                "no response from {} within {:?}",
                self.endpoint, timeout
            ))),
        }
    }
}

/// Map a reqwest error onto the failure taxonomy.
fn classify_reqwest_error(err: reqwest::Error) -> ProviderFailure {
    if err.is_timeout() {
        ProviderFailure::timeout(err.to_string())
    } else {
        ProviderFailure::transport(err.to_string())
    }
}

/// Extract reply text from an OpenAI-compatible chat completion body.
fn parse_chat_body(body: &str) -> Result<String, ProviderFailure> {
    let completion: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| ProviderFailure::malformed(format!("failed to parse response: {}", e)))?;

    if let Some(usage) = &completion.usage {
        debug!(
            "Token usage ({}) - prompt: {}, completion: {}, total: {}",
            completion.model.as_deref().unwrap_or("unknown model"),
            usage.prompt_tokens,
            usage.completion_tokens,
            usage.total_tokens
        );
    }

    let choice = completion
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderFailure::malformed("response has no choices"))?;

    choice
        .message
        .content
        .ok_or_else(|| ProviderFailure::empty_content("choice has no content"))
}

/// Extract reply text from a `{"<field>": "..."}` body.
fn parse_reply_body(body: &str, field: &str) -> Result<String, ProviderFailure> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| ProviderFailure::malformed(format!("failed to parse response: {}", e)))?;

    match value.get(field) {
        Some(serde_json::Value::String(text)) => Ok(text.clone()),
        Some(serde_json::Value::Null) => {
            Err(ProviderFailure::empty_content(format!("field {} is null", field)))
        }
        Some(other) => Err(ProviderFailure::malformed(format!(
            "field {} is not a string: {}",
            field, other
        ))),
        None => Err(ProviderFailure::malformed(format!("missing field {}", field))),
    }
}

/// Remove the first matching configured prefix and surrounding whitespace.
fn strip_prefixes(text: &str, prefixes: &[String]) -> String {
    let trimmed = text.trim();
    prefixes
        .iter()
        .find_map(|prefix| trimmed.strip_prefix(prefix.as_str()))
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}
