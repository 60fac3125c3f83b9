//! Generation backend integration
//!
//! Features:
//! - OpenAI-compatible chat completions backend (Groq)
//! - Stage-aware system prompt building
//! - Structured generation: technical questions and resume field extraction
//!
//! Every failure mode maps to a fixed user-facing fallback sentence; no
//! generation error ever aborts a dialogue turn.

pub mod backend;
pub mod extract;
pub mod prompt;

pub use backend::{
    ChatCompletionsBackend, GenerationOptions, GenerationResult, LlmBackend, LlmConfig,
};
pub use extract::{strip_code_fences, LlmFieldExtractor, LlmQuestionGenerator};
pub use prompt::{Message, PromptBuilder, Role};

use thiserror::Error;

/// LLM errors
#[derive(Error, Debug)]
pub enum LlmError {
    /// Transient throttling by the provider
    #[error("Rate limited")]
    RateLimited,

    /// Misconfigured credential or endpoint; will not recover without help
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Generation error: {0}")]
    Generation(String),
}

impl LlmError {
    /// Fixed user-facing reply substituted when generation fails.
    ///
    /// Three distinct sentences cover the taxonomy: transient throttling,
    /// fatal misconfiguration, and everything else. The turn always completes
    /// with one of these; the session remains usable on the next turn.
    pub fn fallback_reply(&self) -> &'static str {
        match self {
            LlmError::RateLimited => {
                "We're experiencing high traffic right now. Please wait a moment and try again."
            }
            LlmError::Configuration(_) => {
                "There's a configuration issue on our side. Please contact support."
            }
            _ => "I hit a brief technical hiccup. Could you repeat that?",
        }
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

impl From<LlmError> for hiring_agent_core::Error {
    fn from(err: LlmError) -> Self {
        hiring_agent_core::Error::Generation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_sentences_are_distinct() {
        let rate = LlmError::RateLimited.fallback_reply();
        let config = LlmError::Configuration("bad key".into()).fallback_reply();
        let other = LlmError::Timeout.fallback_reply();
        assert_ne!(rate, config);
        assert_ne!(rate, other);
        assert_ne!(config, other);
    }

    #[test]
    fn unknown_errors_share_generic_fallback() {
        assert_eq!(
            LlmError::Network("dns".into()).fallback_reply(),
            LlmError::InvalidResponse("shape".into()).fallback_reply(),
        );
    }
}
