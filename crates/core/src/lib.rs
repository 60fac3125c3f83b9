//! Core traits and types for the hiring agent
//!
//! This crate provides foundational types used across all other crates:
//! - Interview stage machine and transcript types
//! - Candidate profile with privacy masking
//! - Capability traits for pluggable backends (question generation,
//!   field extraction, document extraction)
//! - Error types

pub mod candidate;
pub mod conversation;
pub mod error;
pub mod traits;

pub use candidate::{
    mask_email, mask_phone, CandidateProfile, ExtractedFields, ProfileField, FIELD_ORDER,
};
pub use conversation::{InterviewStage, Turn, TurnRole, STAGE_ORDER};
pub use error::{Error, Result};
pub use traits::{DocumentExtractor, FieldExtractor, QuestionGenerator};
