//! End-to-end screening flow over mocked capabilities

use std::sync::Arc;

use async_trait::async_trait;

use hiring_agent_agent::{AgentError, InterviewSession, PlainTextExtractor, ScreeningAgent};
use hiring_agent_config::AgentSettings;
use hiring_agent_core::{
    Error, ExtractedFields, FieldExtractor, InterviewStage, ProfileField, QuestionGenerator,
    Result,
};
use hiring_agent_llm::{GenerationOptions, GenerationResult, LlmBackend, LlmError, Message};

/// Echoes the final instruction back, so assertions can see what the
/// handler asked the backend to say
struct StubBackend;

#[async_trait]
impl LlmBackend for StubBackend {
    async fn generate_with_options(
        &self,
        messages: &[Message],
        _options: GenerationOptions,
    ) -> std::result::Result<GenerationResult, LlmError> {
        let last = messages.last().map(|m| m.content.clone()).unwrap_or_default();
        Ok(GenerationResult {
            text: format!("reply: {last}"),
            tokens: 0,
            total_time_ms: 0,
        })
    }

    fn model_name(&self) -> &str {
        "stub"
    }
}

struct RateLimitedBackend;

#[async_trait]
impl LlmBackend for RateLimitedBackend {
    async fn generate_with_options(
        &self,
        _messages: &[Message],
        _options: GenerationOptions,
    ) -> std::result::Result<GenerationResult, LlmError> {
        Err(LlmError::RateLimited)
    }

    fn model_name(&self) -> &str {
        "rate-limited"
    }
}

struct FixedQuestions(Vec<String>);

#[async_trait]
impl QuestionGenerator for FixedQuestions {
    async fn generate(&self, _tech_stack: &str, _experience: &str) -> Result<Vec<String>> {
        Ok(self.0.clone())
    }
}

struct FailingQuestions;

#[async_trait]
impl QuestionGenerator for FailingQuestions {
    async fn generate(&self, _tech_stack: &str, _experience: &str) -> Result<Vec<String>> {
        Err(Error::Generation("service unavailable".to_string()))
    }
}

struct FixedExtractor(ExtractedFields);

#[async_trait]
impl FieldExtractor for FixedExtractor {
    async fn extract(&self, _raw_text: &str) -> Result<ExtractedFields> {
        Ok(self.0.clone())
    }
}

fn four_questions() -> Vec<String> {
    vec![
        "Q1?".to_string(),
        "Q2?".to_string(),
        "Q3?".to_string(),
        "Q4?".to_string(),
    ]
}

fn agent_with(
    backend: Arc<dyn LlmBackend>,
    questions: Arc<dyn QuestionGenerator>,
    extractor: Arc<dyn FieldExtractor>,
) -> ScreeningAgent {
    ScreeningAgent::new(
        backend,
        questions,
        extractor,
        Arc::new(PlainTextExtractor),
        AgentSettings::default(),
    )
}

fn stub_agent() -> ScreeningAgent {
    agent_with(
        Arc::new(StubBackend),
        Arc::new(FixedQuestions(four_questions())),
        Arc::new(FixedExtractor(ExtractedFields::default())),
    )
}

#[tokio::test]
async fn tech_stack_turn_generates_questions_and_advances() {
    let agent = stub_agent();
    let mut session = agent.new_session();
    session.set_stage(InterviewStage::TechStack);
    session.profile_mut().set(ProfileField::Experience, "3 years");

    let reply = agent.handle_turn(&mut session, "Python, Django, PostgreSQL").await;

    assert_eq!(
        session.profile().get(ProfileField::TechStack),
        Some("Python, Django, PostgreSQL")
    );
    assert_eq!(session.stage(), InterviewStage::TechnicalQuestions);
    let questions = session.questions().unwrap();
    assert_eq!(questions.len(), 4);
    assert_eq!(questions.cursor(), 0);
    // the first question is asked verbatim
    assert!(reply.contains("Q1?"));
}

#[tokio::test]
async fn technical_loop_walks_all_questions_then_closes() {
    let agent = stub_agent();
    let mut session = agent.new_session();
    session.set_stage(InterviewStage::TechStack);

    agent.handle_turn(&mut session, "Rust, Tokio").await;
    assert_eq!(session.stage(), InterviewStage::TechnicalQuestions);

    let reply = agent.handle_turn(&mut session, "My first answer").await;
    assert!(reply.contains("Q2?"));
    assert_eq!(session.questions().unwrap().cursor(), 1);
    assert_eq!(session.stage(), InterviewStage::TechnicalQuestions);

    agent.handle_turn(&mut session, "Second answer").await;
    agent.handle_turn(&mut session, "Third answer").await;
    assert_eq!(session.questions().unwrap().cursor(), 3);
    assert!(!session.is_ended());

    // answering the last question closes the session
    agent.handle_turn(&mut session, "Final answer").await;
    assert_eq!(session.stage(), InterviewStage::Closing);
    assert!(session.is_ended());
}

#[tokio::test]
async fn resume_prefill_fast_forwards_to_first_missing_field() {
    let agent = agent_with(
        Arc::new(StubBackend),
        Arc::new(FixedQuestions(four_questions())),
        Arc::new(FixedExtractor(ExtractedFields {
            full_name: Some("Asha Rao".to_string()),
            email: Some("asha@x.com".to_string()),
            ..ExtractedFields::default()
        })),
    );
    let mut session = agent.new_session();

    let outcome = agent
        .ingest_resume(&mut session, b"Asha Rao\nasha@x.com\nBackend engineer")
        .await
        .unwrap();

    assert_eq!(outcome.merged, 2);
    assert_eq!(session.stage(), InterviewStage::Phone);
    assert_eq!(session.profile().get(ProfileField::FullName), Some("Asha Rao"));
    assert_eq!(session.profile().get(ProfileField::Email), Some("asha@x.com"));
    assert!(session.resume_prefilled());

    // the candidate is told how much was pre-filled
    assert_eq!(session.transcript().len(), 1);
    assert!(session.transcript()[0].content.contains("2 details"));

    // a second pass over the same data changes nothing
    let outcome = agent
        .ingest_resume(&mut session, b"Asha Rao\nasha@x.com\nBackend engineer")
        .await
        .unwrap();
    assert_eq!(outcome.merged, 0);
    assert_eq!(session.stage(), InterviewStage::Phone);
    assert_eq!(session.transcript().len(), 1);
}

#[tokio::test]
async fn unreadable_resume_leaves_session_untouched() {
    let agent = stub_agent();
    let mut session = agent.new_session();

    let result = agent.ingest_resume(&mut session, b"").await;
    assert!(matches!(result, Err(AgentError::Document(_))));
    assert_eq!(session.stage(), InterviewStage::Greeting);
    assert_eq!(session.profile().filled_count(), 0);
}

#[tokio::test]
async fn junk_turn_is_void() {
    let agent = stub_agent();
    let mut session = agent.new_session();
    session.set_stage(InterviewStage::Email);

    let reply = agent.handle_turn(&mut session, "!!!!").await;

    assert_eq!(session.stage(), InterviewStage::Email);
    assert_eq!(session.profile().filled_count(), 0);
    assert!(session.sentiment_log().is_empty());
    assert!(reply.contains("!!!!"));
}

#[tokio::test]
async fn invalid_phone_is_rejected_without_advancing() {
    let agent = stub_agent();
    let mut session = agent.new_session();
    session.set_stage(InterviewStage::Phone);

    let reply = agent.handle_turn(&mut session, "123456").await;
    assert!(reply.contains("7 to 15 digits"));
    assert_eq!(session.stage(), InterviewStage::Phone);
    assert_eq!(session.profile().get(ProfileField::Phone), None);

    agent.handle_turn(&mut session, "+1 (555) 123-4567").await;
    assert_eq!(
        session.profile().get(ProfileField::Phone),
        Some("+1 (555) 123-4567")
    );
    assert_eq!(session.stage(), InterviewStage::Experience);
}

#[tokio::test]
async fn exit_token_closes_from_any_stage() {
    let agent = stub_agent();
    let mut session = agent.new_session();
    session.set_stage(InterviewStage::Experience);

    agent.handle_turn(&mut session, "ok bye now").await;
    assert_eq!(session.stage(), InterviewStage::Closing);
    assert!(session.is_ended());
    // the exit turn is not stored as a field value
    assert_eq!(session.profile().get(ProfileField::Experience), None);
}

#[tokio::test]
async fn near_miss_exit_token_is_treated_as_an_answer() {
    let agent = stub_agent();
    let mut session = agent.new_session();
    session.set_stage(InterviewStage::Experience);

    agent.handle_turn(&mut session, "goodbyee").await;
    assert_eq!(session.stage(), InterviewStage::Position);
    assert_eq!(session.profile().get(ProfileField::Experience), Some("goodbyee"));
}

#[tokio::test]
async fn generation_failure_keeps_captured_data() {
    let agent = agent_with(
        Arc::new(RateLimitedBackend),
        Arc::new(FixedQuestions(four_questions())),
        Arc::new(FixedExtractor(ExtractedFields::default())),
    );
    let mut session = agent.new_session();
    session.set_stage(InterviewStage::Location);

    let reply = agent.handle_turn(&mut session, "Bengaluru, India").await;

    assert_eq!(reply, LlmError::RateLimited.fallback_reply());
    assert_eq!(
        session.profile().get(ProfileField::Location),
        Some("Bengaluru, India")
    );
    assert_eq!(session.stage(), InterviewStage::TechStack);
}

#[tokio::test]
async fn question_generation_failure_uses_fallback_set() {
    let agent = agent_with(
        Arc::new(StubBackend),
        Arc::new(FailingQuestions),
        Arc::new(FixedExtractor(ExtractedFields::default())),
    );
    let mut session = agent.new_session();
    session.set_stage(InterviewStage::TechStack);

    let reply = agent.handle_turn(&mut session, "Go, Kubernetes").await;

    assert_eq!(session.stage(), InterviewStage::TechnicalQuestions);
    let questions = session.questions().unwrap();
    assert_eq!(questions.len(), 4);
    assert!(questions.questions().iter().all(|q| q.contains("Go")));
    assert!(reply.contains("Go"));
}

#[tokio::test]
async fn export_is_masked_and_gated_on_completion() {
    let agent = stub_agent();
    let mut session = agent.new_session();
    session.profile_mut().set(ProfileField::Email, "john.doe@example.com");
    session.profile_mut().set(ProfileField::Phone, "+1 (555) 123-4567");
    session.set_stage(InterviewStage::Experience);

    assert!(session.export_masked().is_err());

    agent.handle_turn(&mut session, "done").await;
    assert_eq!(session.stage(), InterviewStage::Closing);

    let exported = session.export_masked().unwrap();
    assert_eq!(
        exported["profile"]["email"].as_str(),
        Some("j******e@example.com")
    );
    assert_eq!(exported["profile"]["phone"].as_str(), Some("*******4567"));
}

#[tokio::test]
async fn opening_moves_a_fresh_session_onto_the_name_stage() {
    let agent = stub_agent();
    let mut session = agent.new_session();

    let reply = agent.open_conversation(&mut session).await;
    assert!(!reply.is_empty());
    assert_eq!(session.stage(), InterviewStage::FullName);
    assert_eq!(session.transcript().len(), 1);

    // the name lands in the profile and the flow continues to email
    agent.handle_turn(&mut session, "Asha Rao").await;
    assert_eq!(session.profile().get(ProfileField::FullName), Some("Asha Rao"));
    assert_eq!(session.stage(), InterviewStage::Email);
}
