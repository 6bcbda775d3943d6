//! Upstream provider configuration.
//!
//! Resolved once at startup and shared read-only for the lifetime of the
//! process.

use std::env;
use std::fmt;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant.";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors raised while resolving [`ProviderConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY is required")]
    MissingApiKey,

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Settings for the upstream chat-completion provider.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Bearer API key. Never logged.
    pub api_key: String,
    /// Model identifier sent with every completion request.
    pub model: String,
    /// System message prepended to every conversation.
    pub system_prompt: String,
    /// Base URL of an OpenAI-compatible API, without the trailing path.
    pub base_url: String,
    /// Upper bound on a single upstream call.
    pub timeout: Duration,
}

impl ProviderConfig {
    /// Creates a config with defaults for everything but the API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Reads configuration from environment variables.
    ///
    /// | Variable              | Default                           |
    /// |-----------------------|-----------------------------------|
    /// | `OPENAI_API_KEY`      | required                          |
    /// | `OPENAI_MODEL`        | `gpt-4o-mini`                     |
    /// | `CHAT_SYSTEM_PROMPT`  | `You are a helpful AI assistant.` |
    /// | `OPENAI_BASE_URL`     | `https://api.openai.com/v1`       |
    /// | `OPENAI_TIMEOUT_SECS` | `30`                              |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("OPENAI_API_KEY").ok_or(ConfigError::MissingApiKey)?;
        let mut config = Self::new(api_key);

        if let Some(model) = get("OPENAI_MODEL") {
            config.model = model;
        }
        if let Some(prompt) = get("CHAT_SYSTEM_PROMPT") {
            config.system_prompt = prompt;
        }
        if let Some(base_url) = get("OPENAI_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(raw) = get("OPENAI_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|e| ConfigError::Invalid {
                key: "OPENAI_TIMEOUT_SECS",
                reason: format!("{e}"),
            })?;
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    key: "OPENAI_TIMEOUT_SECS",
                    reason: "must be greater than zero".into(),
                });
            }
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("system_prompt", &self.system_prompt)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
