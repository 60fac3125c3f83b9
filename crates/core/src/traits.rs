//! Capability traits consumed by the screening engine
//!
//! The engine treats question generation, resume field extraction, and
//! document text extraction as pluggable external capabilities. Production
//! implementations live in the llm crate; tests use in-process mocks.

use async_trait::async_trait;

use crate::candidate::ExtractedFields;
use crate::error::Result;

/// Generates role-specific technical interview questions.
///
/// Contract: given the declared tech stack and experience free text, return
/// an ordered list of question strings, one foundational / two intermediate /
/// one advanced, each answerable verbally in under two minutes and none
/// requiring written code. Callers must tolerate short or malformed output
/// and substitute a deterministic fallback set.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(&self, tech_stack: &str, experience: &str) -> Result<Vec<String>>;
}

/// Extracts the canonical profile fields from raw resume text.
///
/// Malformed or unparsable output is reported as an error; callers treat it
/// as an empty mapping.
#[async_trait]
pub trait FieldExtractor: Send + Sync {
    async fn extract(&self, raw_text: &str) -> Result<ExtractedFields>;
}

/// Extracts free text from an uploaded binary document.
///
/// An empty result means the document was unreadable; the caller skips
/// pre-fill entirely and collects fields stage by stage.
pub trait DocumentExtractor: Send + Sync {
    fn extract_text(&self, bytes: &[u8]) -> Result<String>;
}
