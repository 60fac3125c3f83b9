//! Main settings module
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `HIRING_AGENT_` environment variables. The API key is only ever read from
//! the environment and is never serialized back out.

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{endpoints, env as env_keys, limits};
use crate::ConfigError;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - relaxed validation
    #[default]
    Development,
    /// Staging mode
    Staging,
    /// Production mode - all validations enforced
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Runtime environment
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Generation backend configuration
    #[serde(default)]
    pub llm: LlmSettings,

    /// Dialogue engine configuration
    #[serde(default)]
    pub agent: AgentSettings,
}

/// Generation backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// OpenAI-compatible base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// API key, read from the environment; never logged or serialized
    #[serde(skip_serializing, default = "default_api_key")]
    pub api_key: String,

    /// Maximum tokens for a conversational reply
    #[serde(default = "default_reply_max_tokens")]
    pub max_tokens: usize,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    endpoints::DEFAULT_LLM_ENDPOINT.to_string()
}

fn default_model() -> String {
    endpoints::DEFAULT_MODEL.to_string()
}

fn default_api_key() -> String {
    std::env::var(env_keys::API_KEY).unwrap_or_default()
}

fn default_reply_max_tokens() -> usize {
    limits::REPLY_MAX_TOKENS
}

fn default_temperature() -> f32 {
    0.65
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: default_api_key(),
            max_tokens: default_reply_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LlmSettings {
    /// Validate required values for the given environment
    pub fn validate(&self, environment: RuntimeEnvironment) -> Result<(), ConfigError> {
        if self.api_key.is_empty() {
            if environment.is_production() {
                return Err(ConfigError::MissingField(format!(
                    "llm.api_key (set {})",
                    env_keys::API_KEY
                )));
            }
            tracing::warn!("No API key configured; generation calls will fail");
        }
        if self.endpoint.is_empty() {
            return Err(ConfigError::MissingField("llm.endpoint".to_string()));
        }
        Ok(())
    }
}

/// Dialogue engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSettings {
    /// Language tag passed downstream in every system instruction
    #[serde(default = "default_language")]
    pub language: String,

    /// Maximum transcript turns forwarded as generation context
    #[serde(default = "default_max_history_turns")]
    pub max_history_turns: usize,
}

fn default_language() -> String {
    "English".to_string()
}

fn default_max_history_turns() -> usize {
    20
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            language: default_language(),
            max_history_turns: default_max_history_turns(),
        }
    }
}

/// Load settings from an optional file plus environment overrides
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(false));
    }

    let config = builder
        .add_source(Environment::with_prefix("HIRING_AGENT").separator("__"))
        .build()?;

    let settings: Settings = config.try_deserialize()?;
    settings.llm.validate(settings.environment)?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let settings = Settings::default();
        assert_eq!(settings.llm.model, endpoints::DEFAULT_MODEL);
        assert_eq!(settings.llm.max_tokens, limits::REPLY_MAX_TOKENS);
        assert_eq!(settings.agent.language, "English");
        assert!(!settings.environment.is_production());
    }

    #[test]
    fn settings_deserialize_from_toml() {
        let settings: Settings = toml::from_str(
            r#"
            environment = "staging"

            [llm]
            model = "llama-3.1-8b-instant"
            temperature = 0.3

            [agent]
            language = "Hindi"
            "#,
        )
        .unwrap();
        assert_eq!(settings.environment, RuntimeEnvironment::Staging);
        assert_eq!(settings.llm.model, "llama-3.1-8b-instant");
        assert_eq!(settings.agent.language, "Hindi");
        // unspecified fields fall back to defaults
        assert_eq!(settings.llm.max_tokens, limits::REPLY_MAX_TOKENS);
    }
}
