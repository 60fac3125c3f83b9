//! Core error type shared across capability boundaries

use thiserror::Error;

/// Core errors
#[derive(Error, Debug)]
pub enum Error {
    /// Text generation capability failed
    #[error("Generation error: {0}")]
    Generation(String),

    /// Structured extraction produced unusable output
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Document could not be read
    #[error("Document error: {0}")]
    Document(String),

    /// Session state violation
    #[error("Session error: {0}")]
    Session(String),

    /// Configuration problem
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Core result alias
pub type Result<T> = std::result::Result<T, Error>;
