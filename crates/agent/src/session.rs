//! Interview session state
//!
//! One session owns everything mutable about a single candidate's screening:
//! profile, stage, transcript, sentiment log, and the technical question set.
//! Sessions are never shared between candidates; the registry hands out one
//! exclusively-locked handle per session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use hiring_agent_config::constants::limits;
use hiring_agent_core::{CandidateProfile, Error, InterviewStage, Result, Turn, TurnRole};
use hiring_agent_text_processing::SentimentScore;

use crate::questions::QuestionSet;

/// Per-turn sentiment record. The stored text is a truncated excerpt, never
/// the full utterance, so the log stays safe to export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentRecord {
    pub stage: InterviewStage,
    pub excerpt: String,
    pub score: SentimentScore,
    pub timestamp: DateTime<Utc>,
}

/// Mutable state for one screening conversation
#[derive(Debug, Clone)]
pub struct InterviewSession {
    id: Uuid,
    language: String,
    stage: InterviewStage,
    profile: CandidateProfile,
    transcript: Vec<Turn>,
    sentiment_log: Vec<SentimentRecord>,
    questions: Option<QuestionSet>,
    resume_prefilled: bool,
    ended: bool,
    started_at: DateTime<Utc>,
}

impl InterviewSession {
    /// Create a fresh session at the greeting stage
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            language: language.into(),
            stage: InterviewStage::default(),
            profile: CandidateProfile::new(),
            transcript: Vec::new(),
            sentiment_log: Vec::new(),
            questions: None,
            resume_prefilled: false,
            ended: false,
            started_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn stage(&self) -> InterviewStage {
        self.stage
    }

    /// Apply a stage computed by the handler or reconciler
    pub fn set_stage(&mut self, stage: InterviewStage) {
        if stage != self.stage {
            tracing::debug!(session = %self.id, from = %self.stage, to = %stage, "Stage transition");
        }
        self.stage = stage;
    }

    pub fn profile(&self) -> &CandidateProfile {
        &self.profile
    }

    pub fn profile_mut(&mut self) -> &mut CandidateProfile {
        &mut self.profile
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn push_turn(&mut self, turn: Turn) {
        self.transcript.push(turn);
    }

    /// Rolling window of recent turns forwarded as generation context.
    /// A trailing user turn is excluded; the handler folds the live
    /// utterance into its instruction instead.
    pub fn context_window(&self, max_turns: usize) -> &[Turn] {
        let turns = match self.transcript.last() {
            Some(turn) if turn.role == TurnRole::User => {
                &self.transcript[..self.transcript.len() - 1]
            }
            _ => &self.transcript[..],
        };
        let start = turns.len().saturating_sub(max_turns);
        &turns[start..]
    }

    /// Append a sentiment record, truncating the utterance excerpt
    pub fn record_sentiment(&mut self, stage: InterviewStage, text: &str, score: SentimentScore) {
        let excerpt: String = text.chars().take(limits::SENTIMENT_TEXT_LIMIT).collect();
        self.sentiment_log.push(SentimentRecord {
            stage,
            excerpt,
            score,
            timestamp: Utc::now(),
        });
    }

    pub fn sentiment_log(&self) -> &[SentimentRecord] {
        &self.sentiment_log
    }

    /// Mean polarity over the whole session, if anything was logged
    pub fn average_polarity(&self) -> Option<f32> {
        if self.sentiment_log.is_empty() {
            return None;
        }
        let sum: f32 = self.sentiment_log.iter().map(|r| r.score.polarity).sum();
        Some(sum / self.sentiment_log.len() as f32)
    }

    pub fn questions(&self) -> Option<&QuestionSet> {
        self.questions.as_ref()
    }

    pub fn questions_mut(&mut self) -> Option<&mut QuestionSet> {
        self.questions.as_mut()
    }

    pub fn set_questions(&mut self, questions: QuestionSet) {
        self.questions = Some(questions);
    }

    pub fn resume_prefilled(&self) -> bool {
        self.resume_prefilled
    }

    pub fn mark_resume_prefilled(&mut self) {
        self.resume_prefilled = true;
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn mark_ended(&mut self) {
        self.ended = true;
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Wipe all conversation state, keeping the id and language.
    /// The only path out of the terminal stage.
    pub fn reset(&mut self) {
        self.stage = InterviewStage::default();
        self.profile = CandidateProfile::new();
        self.transcript.clear();
        self.sentiment_log.clear();
        self.questions = None;
        self.resume_prefilled = false;
        self.ended = false;
        self.started_at = Utc::now();
    }

    /// Masked JSON snapshot of the completed screening.
    ///
    /// Only available once the session has reached the terminal stage; the
    /// profile inside is the masked view, never raw contact data.
    pub fn export_masked(&self) -> Result<serde_json::Value> {
        if !self.stage.is_terminal() {
            return Err(Error::Session(format!(
                "export requires a completed session, current stage is {}",
                self.stage
            )));
        }

        Ok(json!({
            "session_id": self.id,
            "started_at": self.started_at,
            "exported_at": Utc::now(),
            "profile": self.profile.masked_json(),
            "questions_asked": self.questions.as_ref().map(QuestionSet::questions),
            "sentiment": {
                "turns_scored": self.sentiment_log.len(),
                "average_polarity": self.average_polarity(),
            },
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hiring_agent_core::ProfileField;
    use hiring_agent_text_processing::SentimentAnalyzer;

    #[test]
    fn new_session_starts_at_greeting() {
        let session = InterviewSession::new("English");
        assert_eq!(session.stage(), InterviewStage::Greeting);
        assert!(!session.is_ended());
        assert_eq!(session.profile().filled_count(), 0);
    }

    #[test]
    fn sentiment_excerpt_is_truncated() {
        let mut session = InterviewSession::new("English");
        let long = "x".repeat(500);
        session.record_sentiment(
            InterviewStage::Experience,
            &long,
            SentimentAnalyzer::new().score(&long),
        );
        assert_eq!(
            session.sentiment_log()[0].excerpt.chars().count(),
            limits::SENTIMENT_TEXT_LIMIT
        );
    }

    #[test]
    fn context_window_excludes_trailing_user_turn() {
        let mut session = InterviewSession::new("English");
        session.push_turn(Turn::assistant("Welcome!"));
        session.push_turn(Turn::user("Asha Rao"));
        let window = session.context_window(10);
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].role, TurnRole::Assistant);
    }

    #[test]
    fn context_window_caps_length() {
        let mut session = InterviewSession::new("English");
        for i in 0..30 {
            session.push_turn(Turn::assistant(format!("turn {i}")));
        }
        assert_eq!(session.context_window(20).len(), 20);
    }

    #[test]
    fn export_gated_on_terminal_stage() {
        let mut session = InterviewSession::new("English");
        session.profile_mut().set(ProfileField::Email, "john.doe@example.com");
        assert!(session.export_masked().is_err());

        session.set_stage(InterviewStage::Closing);
        let exported = session.export_masked().unwrap();
        assert_eq!(
            exported["profile"]["email"].as_str(),
            Some("j******e@example.com")
        );
    }

    #[test]
    fn reset_clears_everything_but_identity() {
        let mut session = InterviewSession::new("Hindi");
        let id = session.id();
        session.profile_mut().set(ProfileField::FullName, "Asha");
        session.set_stage(InterviewStage::Closing);
        session.mark_ended();

        session.reset();
        assert_eq!(session.id(), id);
        assert_eq!(session.language(), "Hindi");
        assert_eq!(session.stage(), InterviewStage::Greeting);
        assert!(!session.is_ended());
        assert_eq!(session.profile().filled_count(), 0);
    }
}
