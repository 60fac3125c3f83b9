//! Configuration management for the hiring agent
//!
//! Supports loading configuration from:
//! - TOML files
//! - Environment variables (HIRING_AGENT_ prefix)
//! - Built-in defaults

pub mod constants;
pub mod settings;

pub use settings::{
    load_settings, AgentSettings, LlmSettings, RuntimeEnvironment, Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
