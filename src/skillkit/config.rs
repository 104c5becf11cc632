//! Configuration for SkillKit.
//!
//! [`SkillKitConfig`] carries what the simulated retrieval skills need to reach a chat
//! completion service. Build it by hand or read it from the environment; no config-file
//! parsing dependencies are involved.
//!
//! # Example
//!
//! ```rust
//! use skillkit::SkillKitConfig;
//! use std::time::Duration;
//!
//! let config = SkillKitConfig::new("sk-test")
//!     .with_model("gpt-4o-mini")
//!     .with_request_timeout(Duration::from_secs(10));
//! assert_eq!(config.model, "gpt-4o-mini");
//! ```

use crate::clients::openai::OpenAIClient;
use std::error::Error;
use std::fmt;
use std::time::Duration;

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "OPEN_AI_SECRET";
/// Environment variable overriding the model name.
pub const MODEL_VAR: &str = "OPEN_AI_MODEL";
/// Environment variable pointing at an OpenAI-compatible endpoint.
pub const BASE_URL_VAR: &str = "OPEN_AI_BASE_URL";
/// Environment variable overriding the request timeout, in whole seconds.
pub const TIMEOUT_VAR: &str = "SKILLKIT_TIMEOUT_SECS";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";
/// Upper bound on a single generation round trip.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is not set.
    MissingVar(String),
    /// An environment variable is set but cannot be parsed.
    InvalidValue { var: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingVar(var) => write!(f, "Missing environment variable: {}", var),
            ConfigError::InvalidValue { var, value } => {
                write!(f, "Invalid value for {}: {:?}", var, value)
            }
        }
    }
}

impl Error for ConfigError {}

/// Settings for the chat completion service behind the retrieval skills.
#[derive(Debug, Clone)]
pub struct SkillKitConfig {
    /// Secret used to authenticate against the chat endpoint.
    pub api_key: String,
    /// Model (or deployment) name injected into each request.
    pub model: String,
    /// Optional OpenAI-compatible base URL; `None` targets api.openai.com.
    pub base_url: Option<String>,
    /// Timeout applied to every generation call.
    pub request_timeout: Duration,
}

impl SkillKitConfig {
    /// Config with the given key and default model, endpoint and timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Override the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Target an OpenAI-compatible endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Override the per-call timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        let api_key = get(API_KEY_VAR).ok_or_else(|| ConfigError::MissingVar(API_KEY_VAR.into()))?;
        let mut config = Self::new(api_key);

        if let Some(model) = get(MODEL_VAR) {
            config.model = model;
        }
        config.base_url = get(BASE_URL_VAR);

        if let Some(raw) = get(TIMEOUT_VAR) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    var: TIMEOUT_VAR.to_string(),
                    value: raw.clone(),
                })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Build the chat client described by this configuration.
    pub fn build_client(&self) -> OpenAIClient {
        match &self.base_url {
            Some(base_url) => OpenAIClient::new_with_base_url(&self.api_key, &self.model, base_url),
            None => OpenAIClient::new_with_model_string(&self.api_key, &self.model),
        }
    }
}
