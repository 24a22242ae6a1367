//! Process configuration.

use std::collections::HashSet;
use std::env;
use std::net::SocketAddr;

use http_provider::{HttpProviderConfig, ImageGeneratorConfig, ProviderConfigError};
use line_messaging::{LineConfig, LineError};
use orchestrator::{AccessMode, OrchestratorError, DEFAULT_FALLBACK_TEXT};
use thiserror::Error;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

/// Provider ids used when `PROVIDERS` is unset.
pub const DEFAULT_PROVIDERS: &str = "openai";

/// Startup configuration errors. All of them are fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// LINE channel settings are missing or invalid.
    #[error("LINE configuration: {0}")]
    Line(#[from] LineError),

    /// A provider could not be configured.
    #[error("provider configuration: {0}")]
    Provider(#[from] ProviderConfigError),

    /// The orchestrator rejected the provider list.
    #[error(transparent)]
    Orchestrator(#[from] OrchestratorError),

    /// A variable has an unusable value.
    #[error("invalid value for {var}: {value}")]
    Invalid { var: String, value: String },
}

/// Everything the relay needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// LINE channel settings.
    pub line: LineConfig,
    /// Listen address.
    pub bind_addr: SocketAddr,
    /// Providers in fallback order.
    pub providers: Vec<HttpProviderConfig>,
    /// Text sent when every provider fails.
    pub fallback_text: String,
    /// Prefix replies with the answering provider id.
    pub tag_replies: bool,
    /// Allow-list mode.
    pub access: AccessMode,
    /// Image backend, `None` disables the image command.
    pub image: Option<ImageGeneratorConfig>,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// Required environment variables:
    /// - `LINE_CHANNEL_SECRET`
    /// - `LINE_CHANNEL_ACCESS_TOKEN`
    ///
    /// Optional environment variables:
    /// - `LINE_API_URL` - LINE API base URL
    /// - `BIND_ADDR` - Listen address (default: 0.0.0.0:5000)
    /// - `PROVIDERS` - Comma-separated provider ids in priority order (default: openai)
    /// - `FALLBACK_REPLY` - Text sent when every provider fails
    /// - `TAG_REPLIES` - Prefix replies with `[provider-id]` (default: false)
    /// - `ALLOWED_USERS` - Comma-separated sender ids; empty enrolls the first sender
    /// - `IMAGE_API_KEY` and friends - Enable the image command
    ///
    /// Each provider id reads its own `<ID>_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let line = LineConfig::from_env()?;

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse().map_err(|_| ConfigError::Invalid {
            var: "BIND_ADDR".to_string(),
            value: bind_raw.clone(),
        })?;

        let provider_ids = get("PROVIDERS").unwrap_or_else(|| DEFAULT_PROVIDERS.to_string());
        let ids = split_list(&provider_ids);
        if ids.is_empty() {
            return Err(ConfigError::Invalid {
                var: "PROVIDERS".to_string(),
                value: provider_ids,
            });
        }
        let providers = ids
            .iter()
            .map(|id| HttpProviderConfig::from_env(id))
            .collect::<Result<Vec<_>, _>>()?;

        let tag_replies = match get("TAG_REPLIES") {
            Some(value) => parse_bool(&value).ok_or_else(|| ConfigError::Invalid {
                var: "TAG_REPLIES".to_string(),
                value,
            })?,
            None => false,
        };

        let allowed: HashSet<String> = get("ALLOWED_USERS")
            .map(|v| split_list(&v).into_iter().collect())
            .unwrap_or_default();
        let access = if allowed.is_empty() {
            AccessMode::AutoEnroll
        } else {
            AccessMode::Static(allowed)
        };

        Ok(Self {
            line,
            bind_addr,
            providers,
            fallback_text: get("FALLBACK_REPLY").unwrap_or_else(|| DEFAULT_FALLBACK_TEXT.to_string()),
            tag_replies,
            access,
            image: ImageGeneratorConfig::from_env(),
        })
    }
}

fn get(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
