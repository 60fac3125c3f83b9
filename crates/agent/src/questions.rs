//! Technical question set and cursor
//!
//! The Q&A sub-loop inside the technical-questions stage is its own small
//! state object: a fixed ordered question list plus a cursor. Generated
//! output is accepted when at least three of the four requested questions
//! are usable; short sets are topped up from the deterministic fallback
//! set, and anything worse is replaced by it wholesale.

use serde::{Deserialize, Serialize};

use hiring_agent_config::constants::limits;

/// Generic fallback questions derived from the first listed technology.
/// Used whenever generation fails or returns too little usable material.
pub fn fallback_questions(tech_stack: &str) -> Vec<String> {
    let first = tech_stack
        .split(',')
        .next()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or("your primary technology");

    vec![
        format!(
            "Can you describe a project where you used {first} and what your specific \
             contribution was?"
        ),
        format!(
            "What do you consider the most important best practices when working with {first}?"
        ),
        format!(
            "Tell me about a challenging problem you ran into with {first} and how you \
             approached it."
        ),
        format!("How do you stay up to date with {first} and its wider ecosystem?"),
    ]
}

/// Ordered question list with a cursor over the next question to ask
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSet {
    questions: Vec<String>,
    cursor: usize,
}

impl QuestionSet {
    /// Build a set from generated output.
    ///
    /// Blank entries are dropped; fewer than three usable questions rejects
    /// the whole batch in favor of the fallback set. Exactly three is
    /// accepted and topped up to four from the fallback set.
    pub fn from_generated(generated: Vec<String>, tech_stack: &str) -> Self {
        let mut usable: Vec<String> = generated
            .into_iter()
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty())
            .collect();

        if usable.len() < limits::MIN_USABLE_QUESTIONS {
            tracing::warn!(
                usable = usable.len(),
                "Too few usable generated questions; using fallback set"
            );
            return Self::fallback(tech_stack);
        }

        usable.truncate(limits::TECHNICAL_QUESTION_COUNT);
        for candidate in fallback_questions(tech_stack) {
            if usable.len() >= limits::TECHNICAL_QUESTION_COUNT {
                break;
            }
            if !usable.contains(&candidate) {
                usable.push(candidate);
            }
        }

        Self {
            questions: usable,
            cursor: 0,
        }
    }

    /// The deterministic fallback set, cursor at the first question
    pub fn fallback(tech_stack: &str) -> Self {
        Self {
            questions: fallback_questions(tech_stack),
            cursor: 0,
        }
    }

    /// Question the cursor currently points at
    pub fn current(&self) -> &str {
        &self.questions[self.cursor]
    }

    /// Whether the cursor has reached the last question
    pub fn is_last(&self) -> bool {
        self.cursor + 1 >= self.questions.len()
    }

    /// Move the cursor forward and return the new current question.
    /// Callers check `is_last` first; at the end this is a no-op.
    pub fn advance(&mut self) -> &str {
        if !self.is_last() {
            self.cursor += 1;
        }
        self.current()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }
}
