//! Conversation types: interview stages and transcript turns
//!
//! The screening protocol is a fixed linear sequence of stages. Unlike a
//! free-form sales dialogue there is no branching: stages only ever move
//! forward, and `Closing` is terminal and absorbing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Interview stage in the screening protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStage {
    /// Initial welcome, asks for the candidate's name
    #[default]
    Greeting,
    /// Collecting the candidate's full name
    FullName,
    /// Collecting the email address
    Email,
    /// Collecting the phone number
    Phone,
    /// Collecting years of professional experience
    Experience,
    /// Collecting the desired role
    Position,
    /// Collecting current city and country
    Location,
    /// Collecting the declared technology stack
    TechStack,
    /// Technical Q&A sub-loop over the generated question set
    TechnicalQuestions,
    /// Terminal wrap-up; absorbing
    Closing,
}

/// Canonical stage ordering. Transitions walk this table forward only.
pub const STAGE_ORDER: [InterviewStage; 10] = [
    InterviewStage::Greeting,
    InterviewStage::FullName,
    InterviewStage::Email,
    InterviewStage::Phone,
    InterviewStage::Experience,
    InterviewStage::Position,
    InterviewStage::Location,
    InterviewStage::TechStack,
    InterviewStage::TechnicalQuestions,
    InterviewStage::Closing,
];

impl InterviewStage {
    /// Position of this stage in the canonical ordering
    pub fn position(&self) -> usize {
        STAGE_ORDER
            .iter()
            .position(|s| s == self)
            .expect("stage present in STAGE_ORDER")
    }

    /// Next stage in the ordering. `advance(Closing)` is a no-op.
    pub fn advance(&self) -> InterviewStage {
        STAGE_ORDER
            .get(self.position() + 1)
            .copied()
            .unwrap_or(*self)
    }

    /// Unconditional jump to `Closing`, usable from any stage.
    pub fn force_close(&self) -> InterviewStage {
        InterviewStage::Closing
    }

    /// Jump forward to `target` if it occurs strictly after this stage.
    /// Never moves backward; a no-op for equal or earlier targets.
    pub fn fast_forward(&self, target: InterviewStage) -> InterviewStage {
        if target.position() > self.position() {
            target
        } else {
            *self
        }
    }

    /// Whether this is the terminal stage
    pub fn is_terminal(&self) -> bool {
        matches!(self, InterviewStage::Closing)
    }

    /// Fraction of the protocol completed, for progress reporting
    pub fn progress(&self) -> f32 {
        self.position() as f32 / (STAGE_ORDER.len() - 1) as f32
    }

    /// Human-readable stage name
    pub fn display_name(&self) -> &'static str {
        match self {
            InterviewStage::Greeting => "Welcome",
            InterviewStage::FullName => "Full Name",
            InterviewStage::Email => "Email",
            InterviewStage::Phone => "Phone",
            InterviewStage::Experience => "Experience",
            InterviewStage::Position => "Desired Role",
            InterviewStage::Location => "Location",
            InterviewStage::TechStack => "Tech Stack",
            InterviewStage::TechnicalQuestions => "Technical Questions",
            InterviewStage::Closing => "Complete",
        }
    }
}

impl std::fmt::Display for InterviewStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Role in a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    /// Candidate message
    User,
    /// Agent message
    Assistant,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for TurnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single turn in the transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// Role of the speaker
    pub role: TurnRole,
    /// Content of the turn
    pub content: String,
    /// When the turn occurred
    pub timestamp: DateTime<Utc>,
    /// Stage when this turn occurred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<InterviewStage>,
}

impl Turn {
    /// Create a new turn
    pub fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
            stage: None,
        }
    }

    /// Create a user turn
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(TurnRole::User, content)
    }

    /// Create an assistant turn
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(TurnRole::Assistant, content)
    }

    /// Tag the turn with the stage it occurred in
    pub fn at_stage(mut self, stage: InterviewStage) -> Self {
        self.stage = Some(stage);
        self
    }

    /// Get word count
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_walks_canonical_order() {
        for pair in STAGE_ORDER.windows(2) {
            assert_eq!(pair[0].advance(), pair[1]);
        }
    }

    #[test]
    fn advance_is_noop_at_closing() {
        assert_eq!(InterviewStage::Closing.advance(), InterviewStage::Closing);
    }

    #[test]
    fn force_close_from_any_stage() {
        for stage in STAGE_ORDER {
            assert_eq!(stage.force_close(), InterviewStage::Closing);
        }
    }

    #[test]
    fn fast_forward_never_moves_backward() {
        for current in STAGE_ORDER {
            for target in STAGE_ORDER {
                let result = current.fast_forward(target);
                if target.position() <= current.position() {
                    assert_eq!(result, current);
                } else {
                    assert_eq!(result, target);
                }
            }
        }
    }

    #[test]
    fn progress_is_monotonic() {
        assert_eq!(InterviewStage::Greeting.progress(), 0.0);
        assert_eq!(InterviewStage::Closing.progress(), 1.0);
        assert!(InterviewStage::Email.progress() < InterviewStage::TechStack.progress());
    }

    #[test]
    fn turn_creation() {
        let turn = Turn::user("I have three years of backend experience");
        assert_eq!(turn.role, TurnRole::User);
        assert!(turn.word_count() > 0);

        let turn = Turn::assistant("Thanks!").at_stage(InterviewStage::Email);
        assert_eq!(turn.stage, Some(InterviewStage::Email));
    }
}
