//! Configuration for HttpProvider and the image generator.

use std::env;
use std::time::Duration;

use thiserror::Error;

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "https://api.openai.com";

/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default JSON field holding the reply for the `reply` schema.
pub const DEFAULT_REPLY_FIELD: &str = "reply";

const DEFAULT_TIMEOUT_MS: u64 = 15_000;
const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";
const DEFAULT_IMAGE_SIZE: &str = "1024x1024";
const DEFAULT_IMAGE_TIMEOUT_MS: u64 = 60_000;

/// Errors that can occur while loading provider configuration.
#[derive(Debug, Error)]
pub enum ProviderConfigError {
    /// A required environment variable is not set.
    #[error("{0} not set")]
    Missing(String),

    /// An environment variable has a value that cannot be used.
    #[error("invalid value for {var}: {value:?}")]
    Invalid {
        /// Variable name.
        var: String,
        /// Offending value.
        value: String,
    },

    /// The HTTP client could not be built.
    #[error("failed to create HTTP client: {0}")]
    HttpClient(String),
}

/// How the provider's endpoint expects to be called and answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseSchema {
    /// OpenAI-compatible `/v1/chat/completions`.
    ChatCompletions,
    /// `POST {api_url}` with `{"prompt": ...}`, reply read from `field`.
    JsonReply {
        /// Name of the JSON field holding the reply text.
        field: String,
    },
}

impl ResponseSchema {
    /// Parse a schema name (`chat` or `reply`).
    pub fn parse(name: &str, reply_field: impl Into<String>) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "chat" | "openai" => Some(Self::ChatCompletions),
            "reply" | "json" => Some(Self::JsonReply {
                field: reply_field.into(),
            }),
            _ => None,
        }
    }
}

impl Default for ResponseSchema {
    fn default() -> Self {
        Self::ChatCompletions
    }
}

/// Configuration for one HttpProvider.
#[derive(Debug, Clone)]
pub struct HttpProviderConfig {
    /// Provider id, used for provenance and env var lookup.
    pub id: String,

    /// API base URL (chat schema) or full endpoint URL (reply schema).
    pub api_url: String,

    /// API key for bearer authentication. May be empty for the reply schema.
    pub api_key: String,

    /// Model name to use (chat schema only).
    pub model: String,

    /// Endpoint schema.
    pub schema: ResponseSchema,

    /// Default time budget for one call.
    pub timeout: Duration,

    /// Optional system prompt (chat schema only).
    pub system_prompt: Option<String>,

    /// Maximum tokens for response.
    pub max_tokens: Option<u32>,

    /// Temperature for generation (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// Prefixes removed from the start of generated text.
    pub strip_prefixes: Vec<String>,
}

impl Default for HttpProviderConfig {
    fn default() -> Self {
        Self {
            id: "openai".to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            schema: ResponseSchema::default(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            system_prompt: None,
            max_tokens: None,
            temperature: None,
            strip_prefixes: Vec::new(),
        }
    }
}

/// Environment variable prefix for a provider id.
///
/// `openai` → `OPENAI`, `backup-llm` → `BACKUP_LLM`.
pub fn env_prefix(id: &str) -> String {
    id.trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect()
}

impl HttpProviderConfig {
    /// Create configuration for provider `id` from environment variables.
    ///
    /// With `P = env_prefix(id)`:
    ///
    /// Required environment variables:
    /// - `P_API_KEY` - API key (required for the `chat` schema only)
    ///
    /// Optional environment variables:
    /// - `P_API_URL` - API URL (default: https://api.openai.com)
    /// - `P_MODEL` - Model name (default: gpt-3.5-turbo)
    /// - `P_SCHEMA` - `chat` or `reply` (default: chat)
    /// - `P_REPLY_FIELD` - Reply field for the `reply` schema (default: reply)
    /// - `P_TIMEOUT_MS` - Per-call timeout in milliseconds (default: 15000)
    /// - `P_SYSTEM_PROMPT` - System prompt
    /// - `P_MAX_TOKENS` - Max tokens
    /// - `P_TEMPERATURE` - Temperature
    /// - `P_STRIP_PREFIXES` - `|`-separated prefixes removed from replies
    pub fn from_env(id: &str) -> Result<Self, ProviderConfigError> {
        let prefix = env_prefix(id);
        let var = |name: &str| format!("{}_{}", prefix, name);
        let get = |name: &str| {
            env::var(var(name))
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let reply_field = get("REPLY_FIELD").unwrap_or_else(|| DEFAULT_REPLY_FIELD.to_string());
        let schema = match get("SCHEMA") {
            Some(name) => ResponseSchema::parse(&name, reply_field).ok_or_else(|| {
                ProviderConfigError::Invalid {
                    var: var("SCHEMA"),
                    value: name.clone(),
                }
            })?,
            None => ResponseSchema::ChatCompletions,
        };

        let api_key = match (&schema, get("API_KEY")) {
            (_, Some(key)) => key,
            (ResponseSchema::ChatCompletions, None) => {
                return Err(ProviderConfigError::Missing(var("API_KEY")))
            }
            (ResponseSchema::JsonReply { .. }, None) => String::new(),
        };

        let api_url = get("API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let model = get("MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let timeout_ms = match get("TIMEOUT_MS") {
            Some(value) => match value.parse::<u64>() {
                Ok(ms) if ms > 0 => ms,
                _ => {
                    return Err(ProviderConfigError::Invalid {
                        var: var("TIMEOUT_MS"),
                        value,
                    })
                }
            },
            None => DEFAULT_TIMEOUT_MS,
        };

        let max_tokens = get("MAX_TOKENS").and_then(|v| v.parse().ok());
        let temperature = get("TEMPERATURE").and_then(|v| v.parse().ok());

        let strip_prefixes = get("STRIP_PREFIXES")
            .map(|v| {
                v.split('|')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            id: id.trim().to_string(),
            api_url,
            api_key,
            model,
            schema,
            timeout: Duration::from_millis(timeout_ms),
            system_prompt: get("SYSTEM_PROMPT"),
            max_tokens,
            temperature,
            strip_prefixes,
        })
    }

    /// Create a new config builder for provider `id`.
    pub fn builder(id: impl Into<String>) -> HttpProviderConfigBuilder {
        HttpProviderConfigBuilder {
            config: HttpProviderConfig {
                id: id.into(),
                ..Default::default()
            },
        }
    }

    /// The URL a completion request is posted to.
    pub fn endpoint_url(&self) -> String {
        let base = self.api_url.trim_end_matches('/');
        match self.schema {
            ResponseSchema::ChatCompletions => format!("{}/v1/chat/completions", base),
            ResponseSchema::JsonReply { .. } => base.to_string(),
        }
    }
}

/// Builder for HttpProviderConfig.
#[derive(Debug)]
pub struct HttpProviderConfigBuilder {
    config: HttpProviderConfig,
}

impl HttpProviderConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Use the `reply` schema with the given reply field.
    pub fn reply_schema(mut self, field: impl Into<String>) -> Self {
        self.config.schema = ResponseSchema::JsonReply {
            field: field.into(),
        };
        self
    }

    /// Set the timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the system prompt.
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    /// Set the max tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = Some(tokens);
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Add a prefix to strip from replies.
    pub fn strip_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.strip_prefixes.push(prefix.into());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> HttpProviderConfig {
        self.config
    }
}

/// Configuration for the OpenAI-compatible image generator.
#[derive(Debug, Clone)]
pub struct ImageGeneratorConfig {
    /// API base URL.
    pub api_url: String,
    /// API key for bearer authentication.
    pub api_key: String,
    /// Image model.
    pub model: String,
    /// Requested image size, e.g. `1024x1024`.
    pub size: String,
    /// Time budget for one generation.
    pub timeout: Duration,
}

impl ImageGeneratorConfig {
    /// Create a config with defaults and the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_IMAGE_MODEL.to_string(),
            size: DEFAULT_IMAGE_SIZE.to_string(),
            timeout: Duration::from_millis(DEFAULT_IMAGE_TIMEOUT_MS),
        }
    }

    /// Load from environment. Returns `None` when `IMAGE_API_KEY` is unset,
    /// which disables the image command.
    ///
    /// Optional: `IMAGE_API_URL`, `IMAGE_MODEL`, `IMAGE_SIZE`.
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("IMAGE_API_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty())?;
        let mut config = Self::new(api_key.trim());
        if let Ok(url) = env::var("IMAGE_API_URL") {
            config.api_url = url;
        }
        if let Ok(model) = env::var("IMAGE_MODEL") {
            config.model = model;
        }
        if let Ok(size) = env::var("IMAGE_SIZE") {
            config.size = size;
        }
        Some(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpProviderConfig::default();

        assert_eq!(config.api_url, "https://api.openai.com");
        assert!(config.api_key.is_empty());
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.schema, ResponseSchema::ChatCompletions);
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert!(config.strip_prefixes.is_empty());
    }

    #[test]
    fn test_env_prefix() {
        assert_eq!(env_prefix("openai"), "OPENAI");
        assert_eq!(env_prefix("backup-llm"), "BACKUP_LLM");
        assert_eq!(env_prefix(" gemini2 "), "GEMINI2");
    }

    #[test]
    fn test_schema_parse() {
        assert_eq!(
            ResponseSchema::parse("CHAT", "reply"),
            Some(ResponseSchema::ChatCompletions)
        );
        assert_eq!(
            ResponseSchema::parse("reply", "answer"),
            Some(ResponseSchema::JsonReply {
                field: "answer".to_string()
            })
        );
        assert_eq!(ResponseSchema::parse("grpc", "reply"), None);
    }

    #[test]
    fn test_endpoint_url() {
        let chat = HttpProviderConfig::builder("a")
            .api_url("http://localhost:9000/")
            .build();
        assert_eq!(chat.endpoint_url(), "http://localhost:9000/v1/chat/completions");

        let reply = HttpProviderConfig::builder("b")
            .api_url("http://localhost:9000/ask")
            .reply_schema("reply")
            .build();
        assert_eq!(reply.endpoint_url(), "http://localhost:9000/ask");
    }

    #[test]
    fn test_builder_all_options() {
        let config = HttpProviderConfig::builder("backup")
            .api_key("my-key")
            .api_url("https://custom.api.com")
            .model("gpt-4o-mini")
            .timeout(Duration::from_millis(250))
            .system_prompt("You are helpful")
            .max_tokens(512)
            .temperature(0.5)
            .strip_prefix("AI:")
            .build();

        assert_eq!(config.id, "backup");
        assert_eq!(config.api_key, "my-key");
        assert_eq!(config.api_url, "https://custom.api.com");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.system_prompt, Some("You are helpful".to_string()));
        assert_eq!(config.max_tokens, Some(512));
        assert_eq!(config.temperature, Some(0.5));
        assert_eq!(config.strip_prefixes, vec!["AI:".to_string()]);
    }

    // Environment-based tests are combined into a single test to avoid
    // race conditions when tests run in parallel (env vars are process-global).
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_all_vars() {
            for name in [
                "API_KEY",
                "API_URL",
                "MODEL",
                "SCHEMA",
                "REPLY_FIELD",
                "TIMEOUT_MS",
                "SYSTEM_PROMPT",
                "MAX_TOKENS",
                "TEMPERATURE",
                "STRIP_PREFIXES",
            ] {
                std::env::remove_var(format!("TESTPROV_{}", name));
            }
            std::env::remove_var("IMAGE_API_KEY");
            std::env::remove_var("IMAGE_MODEL");
        }

        // Scenario 1: chat schema without API key should error
        clear_all_vars();
        match HttpProviderConfig::from_env("testprov") {
            Err(ProviderConfigError::Missing(var)) => assert_eq!(var, "TESTPROV_API_KEY"),
            other => panic!("Expected Missing error, got {:?}", other),
        }

        // Scenario 2: only API key set, defaults used
        clear_all_vars();
        std::env::set_var("TESTPROV_API_KEY", "test-env-key");
        let config = HttpProviderConfig::from_env("testprov").unwrap();
        assert_eq!(config.id, "testprov");
        assert_eq!(config.api_key, "test-env-key");
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout, Duration::from_millis(15_000));

        // Scenario 3: reply schema needs no key, custom field and prefixes
        clear_all_vars();
        std::env::set_var("TESTPROV_SCHEMA", "reply");
        std::env::set_var("TESTPROV_API_URL", "http://localhost:7000/ask");
        std::env::set_var("TESTPROV_REPLY_FIELD", "answer");
        std::env::set_var("TESTPROV_TIMEOUT_MS", "2500");
        std::env::set_var("TESTPROV_STRIP_PREFIXES", "AI: | Bot：");
        let config = HttpProviderConfig::from_env("testprov").unwrap();
        assert!(config.api_key.is_empty());
        assert_eq!(
            config.schema,
            ResponseSchema::JsonReply {
                field: "answer".to_string()
            }
        );
        assert_eq!(config.timeout, Duration::from_millis(2500));
        assert_eq!(config.strip_prefixes, vec!["AI:", "Bot："]);

        // Scenario 4: invalid timeout and schema are rejected
        clear_all_vars();
        std::env::set_var("TESTPROV_API_KEY", "k");
        std::env::set_var("TESTPROV_TIMEOUT_MS", "0");
        assert!(matches!(
            HttpProviderConfig::from_env("testprov"),
            Err(ProviderConfigError::Invalid { .. })
        ));
        std::env::set_var("TESTPROV_TIMEOUT_MS", "100");
        std::env::set_var("TESTPROV_SCHEMA", "soap");
        assert!(matches!(
            HttpProviderConfig::from_env("testprov"),
            Err(ProviderConfigError::Invalid { .. })
        ));

        // Scenario 5: image generator is optional
        clear_all_vars();
        assert!(ImageGeneratorConfig::from_env().is_none());
        std::env::set_var("IMAGE_API_KEY", "img-key");
        std::env::set_var("IMAGE_MODEL", "dall-e-2");
        let image = ImageGeneratorConfig::from_env().unwrap();
        assert_eq!(image.api_key, "img-key");
        assert_eq!(image.model, "dall-e-2");
        assert_eq!(image.size, "1024x1024");

        // Cleanup
        clear_all_vars();
    }
}
