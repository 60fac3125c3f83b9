//! Dialogue turn handler
//!
//! `ScreeningAgent` drives one screening conversation per session through
//! the fixed stage protocol. A user turn is processed as a small pipeline:
//! exit detection, junk filtering, sentiment logging, validation, field
//! storage, stage transition, and finally reply generation. Field storage
//! and stage advancement happen before the generation call, so a failed
//! generation never loses captured data; the turn still completes with a
//! fixed fallback sentence.

use std::sync::Arc;

use hiring_agent_config::{AgentSettings, Settings};
use hiring_agent_core::{
    DocumentExtractor, ExtractedFields, FieldExtractor, InterviewStage, ProfileField,
    QuestionGenerator, Turn, TurnRole,
};
use hiring_agent_llm::{
    ChatCompletionsBackend, LlmBackend, LlmConfig, LlmFieldExtractor, LlmQuestionGenerator,
    Message, PromptBuilder,
};
use hiring_agent_text_processing::{is_exit_signal, is_junk, SentimentAnalyzer};

use crate::document::PlainTextExtractor;
use crate::questions::QuestionSet;
use crate::reconciler::{reconcile, ReconcileOutcome};
use crate::session::InterviewSession;
use crate::stage_config::descriptor;
use crate::AgentError;

/// Screening conversation engine
pub struct ScreeningAgent {
    backend: Arc<dyn LlmBackend>,
    question_generator: Arc<dyn QuestionGenerator>,
    field_extractor: Arc<dyn FieldExtractor>,
    document_extractor: Arc<dyn DocumentExtractor>,
    sentiment: SentimentAnalyzer,
    settings: AgentSettings,
}

impl ScreeningAgent {
    /// Create an agent over explicit capability implementations
    pub fn new(
        backend: Arc<dyn LlmBackend>,
        question_generator: Arc<dyn QuestionGenerator>,
        field_extractor: Arc<dyn FieldExtractor>,
        document_extractor: Arc<dyn DocumentExtractor>,
        settings: AgentSettings,
    ) -> Self {
        Self {
            backend,
            question_generator,
            field_extractor,
            document_extractor,
            sentiment: SentimentAnalyzer::new(),
            settings,
        }
    }

    /// Create an agent with the production capability stack
    pub fn from_settings(settings: &Settings) -> Result<Self, AgentError> {
        let backend = Arc::new(ChatCompletionsBackend::new(LlmConfig::from(&settings.llm))?);
        Ok(Self::new(
            backend.clone(),
            Arc::new(LlmQuestionGenerator::new(backend.clone())),
            Arc::new(LlmFieldExtractor::new(backend)),
            Arc::new(PlainTextExtractor),
            settings.agent.clone(),
        ))
    }

    /// Start a fresh session in the configured language
    pub fn new_session(&self) -> InterviewSession {
        InterviewSession::new(&self.settings.language)
    }

    /// Produce the opening assistant message.
    ///
    /// A fresh session gets the standard welcome asking for the candidate's
    /// name, and moves off the greeting stage so the reply lands on the name
    /// field. A session already fast-forwarded by a resume upload is opened
    /// at its current stage instead, confirming what is on file.
    pub async fn open_conversation(&self, session: &mut InterviewSession) -> String {
        let stage = session.stage();
        let instruction = if stage == InterviewStage::Greeting {
            "Begin the screening conversation.".to_string()
        } else {
            "Begin the screening conversation, acknowledging the details already on file."
                .to_string()
        };

        let reply = self.generate(session, stage, &instruction).await;
        session.push_turn(Turn::assistant(&reply).at_stage(stage));
        if stage == InterviewStage::Greeting {
            session.set_stage(stage.fast_forward(InterviewStage::FullName));
        }
        reply
    }

    /// Pre-fill the profile from an uploaded resume document.
    ///
    /// Unreadable documents are reported as an error and leave the session
    /// untouched; extraction failures degrade to an empty mapping, which the
    /// reconciler treats as a no-op.
    pub async fn ingest_resume(
        &self,
        session: &mut InterviewSession,
        bytes: &[u8],
    ) -> Result<ReconcileOutcome, AgentError> {
        let text = self
            .document_extractor
            .extract_text(bytes)
            .map_err(|e| AgentError::Document(e.to_string()))?;
        if text.is_empty() {
            return Err(AgentError::Document(
                "no text could be extracted from the document".to_string(),
            ));
        }

        let extracted = match self.field_extractor.extract(&text).await {
            Ok(fields) => fields,
            Err(err) => {
                tracing::warn!(error = %err, "Resume field extraction failed; treating as empty");
                ExtractedFields::default()
            }
        };

        let stage = session.stage();
        let outcome = reconcile(session.profile_mut(), stage, &extracted);
        session.set_stage(outcome.stage_after);
        if outcome.merged > 0 {
            session.mark_resume_prefilled();
            let noun = if outcome.merged == 1 { "detail" } else { "details" };
            let confirmation = format!(
                "Thanks for your resume! I was able to fill in {} {} from it, so we \
                 can skip ahead.",
                outcome.merged, noun
            );
            session.push_turn(Turn::assistant(confirmation).at_stage(outcome.stage_after));
        }
        Ok(outcome)
    }

    /// Handle one user turn end to end. Always returns an assistant reply;
    /// no failure aborts the turn.
    pub async fn handle_turn(&self, session: &mut InterviewSession, utterance: &str) -> String {
        let input = utterance.trim().to_string();
        let mut stage = session.stage();
        session.push_turn(Turn::user(&input).at_stage(stage));

        // Exit tokens close the session from any stage, before anything else
        if is_exit_signal(&input) {
            stage = stage.force_close();
            session.set_stage(stage);
            session.mark_ended();
            return self.reply(session, stage, &input).await;
        }

        // A junk turn is void: clarify without touching stage, profile,
        // or the sentiment log
        if !stage.is_terminal() && is_junk(&input) {
            let instruction = format!(
                "The candidate sent unclear input: \"{input}\". Politely ask them to clarify."
            );
            return self.reply(session, stage, &instruction).await;
        }

        let score = self.sentiment.score(&input);
        session.record_sentiment(stage, &input, score);

        let desc = descriptor(stage);
        if let Some(validator) = &desc.validator {
            if !(validator.check)(&input) {
                let reply = validator.error_message.to_string();
                session.push_turn(Turn::assistant(&reply).at_stage(stage));
                return reply;
            }
        }
        if let Some(field) = desc.field {
            session.profile_mut().set(field, input.as_str());
        }

        let instruction = match stage {
            InterviewStage::TechStack => {
                let first = self.start_assessment(session, &input).await;
                stage = stage.advance();
                session.set_stage(stage);
                format!(
                    "The candidate's tech stack is: \"{input}\". Acknowledge it warmly in one \
                     sentence, say the technical assessment is starting, then ask exactly this \
                     question, verbatim: \"{first}\""
                )
            }
            InterviewStage::TechnicalQuestions => match self.next_question(session).await {
                Some(question) => format!(
                    "The candidate answered: \"{input}\". Give one brief encouraging sentence, \
                     then ask exactly this question, verbatim: \"{question}\""
                ),
                None => {
                    stage = stage.force_close();
                    session.set_stage(stage);
                    session.mark_ended();
                    format!(
                        "The candidate answered: \"{input}\". That was the final question; \
                         close out the screening."
                    )
                }
            },
            InterviewStage::Closing => input.clone(),
            _ => {
                stage = stage.advance();
                session.set_stage(stage);
                input.clone()
            }
        };

        self.reply(session, stage, &instruction).await
    }

    /// Generate the question set for the declared stack and leave the cursor
    /// on the first question
    async fn start_assessment(&self, session: &mut InterviewSession, tech_stack: &str) -> String {
        let experience = session
            .profile()
            .get(ProfileField::Experience)
            .unwrap_or("unspecified")
            .to_string();

        let set = match self.question_generator.generate(tech_stack, &experience).await {
            Ok(generated) => QuestionSet::from_generated(generated, tech_stack),
            Err(err) => {
                tracing::warn!(error = %err, "Question generation failed; using fallback set");
                QuestionSet::fallback(tech_stack)
            }
        };
        let first = set.current().to_string();
        session.set_questions(set);
        first
    }

    /// Advance the Q&A cursor. `None` means the set is exhausted and the
    /// session should close. A session fast-forwarded straight into the
    /// assessment has no set yet; one is generated from the stored profile.
    async fn next_question(&self, session: &mut InterviewSession) -> Option<String> {
        if session.questions().is_none() {
            let tech_stack = session
                .profile()
                .get(ProfileField::TechStack)
                .unwrap_or("general software engineering")
                .to_string();
            let first = self.start_assessment(session, &tech_stack).await;
            return Some(first);
        }

        let set = session.questions_mut()?;
        if set.is_last() {
            None
        } else {
            Some(set.advance().to_string())
        }
    }

    /// Generate a reply for the stage and append it to the transcript
    async fn reply(
        &self,
        session: &mut InterviewSession,
        stage: InterviewStage,
        instruction: &str,
    ) -> String {
        let reply = self.generate(session, stage, instruction).await;
        session.push_turn(Turn::assistant(&reply).at_stage(stage));
        reply
    }

    /// Invoke the generation backend with the stage system instruction and
    /// rolling history. Failures map to a fixed fallback sentence; the turn
    /// never aborts.
    async fn generate(
        &self,
        session: &InterviewSession,
        stage: InterviewStage,
        instruction: &str,
    ) -> String {
        let system = PromptBuilder::new(session.language())
            .with_profile(session.profile().masked_json())
            .with_resume_prefilled(session.resume_prefilled())
            .build_system(stage, descriptor(stage).task);

        let history = session.context_window(self.settings.max_history_turns);
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(Message::system(system));
        for turn in history {
            messages.push(match turn.role {
                TurnRole::User => Message::user(&turn.content),
                TurnRole::Assistant => Message::assistant(&turn.content),
            });
        }
        messages.push(Message::user(instruction));

        match self.backend.generate(&messages).await {
            Ok(result) => {
                tracing::debug!(session = %session.id(), stage = %stage, tokens = result.tokens, "Generated reply");
                result.text
            }
            Err(err) => {
                tracing::warn!(session = %session.id(), stage = %stage, error = %err, "Generation failed; substituting fallback reply");
                err.fallback_reply().to_string()
            }
        }
    }
}
