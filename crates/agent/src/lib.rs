//! Screening dialogue engine
//!
//! Orchestrates a guided candidate-screening interview:
//! - Fixed linear stage protocol with per-stage field collection
//! - Turn handling with validation, sentiment logging, and exit detection
//! - Technical Q&A sub-loop over a generated question set
//! - Resume pre-fill reconciliation with forward-only fast-forward
//! - Concurrent multi-session hosting via an isolated session registry
//!
//! The engine treats text generation, question generation, resume field
//! extraction, and document text extraction as pluggable capabilities
//! behind the traits in the core crate.

pub mod document;
pub mod handler;
pub mod questions;
pub mod reconciler;
pub mod session;
pub mod sessions;
pub mod stage_config;

pub use document::PlainTextExtractor;
pub use handler::ScreeningAgent;
pub use questions::QuestionSet;
pub use reconciler::{reconcile, ReconcileOutcome};
pub use session::{InterviewSession, SentimentRecord};
pub use sessions::{SessionHandle, SessionRegistry};
pub use stage_config::{descriptor, StageDescriptor, StageValidator};

use thiserror::Error;

use hiring_agent_config::ConfigError;
use hiring_agent_llm::LlmError;

/// Agent errors
#[derive(Error, Debug)]
pub enum AgentError {
    /// Uploaded document yielded no usable text
    #[error("Document error: {0}")]
    Document(String),

    /// Session state violation (e.g. export before completion)
    #[error("Session error: {0}")]
    Session(String),

    #[error("Generation error: {0}")]
    Llm(#[from] LlmError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Core(#[from] hiring_agent_core::Error),
}
