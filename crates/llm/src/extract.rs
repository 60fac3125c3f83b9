//! Structured generation: technical questions and resume field extraction
//!
//! Both capabilities lean on a best-effort text model to produce JSON.
//! Output is sanitized (code fences stripped, first JSON value located)
//! before parsing; anything that still fails to parse is reported as an
//! extraction error so callers can apply their deterministic fallbacks.

use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use hiring_agent_config::constants::limits;
use hiring_agent_core::{Error, ExtractedFields, FieldExtractor, QuestionGenerator, Result};

use crate::backend::{GenerationOptions, LlmBackend};
use crate::prompt::Message;

static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```(?:json)?").expect("valid fence pattern"));

/// First JSON array in a blob of model output, non-greedy across lines
static JSON_ARRAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\[.*?\]").expect("valid array pattern"));

/// Remove markdown code fences and surrounding backticks from model output
pub fn strip_code_fences(text: &str) -> String {
    CODE_FENCE
        .replace_all(text, "")
        .trim()
        .trim_matches('`')
        .trim()
        .to_string()
}

fn first_json_array(text: &str) -> Option<&str> {
    JSON_ARRAY.find(text).map(|m| m.as_str())
}

fn first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// LLM-backed technical question generator
pub struct LlmQuestionGenerator {
    backend: Arc<dyn LlmBackend>,
}

impl LlmQuestionGenerator {
    pub fn new(backend: Arc<dyn LlmBackend>) -> Self {
        Self { backend }
    }

    fn build_prompt(tech_stack: &str, experience: &str) -> String {
        format!(
            r#"Senior technical interviewer. Generate exactly 4 interview questions for:
Tech Stack: {tech_stack}
Experience: {experience}

RULES:
- Do NOT ask to write, debug, or explain code.
- Conceptual, scenario-based, or experience-based only.
- Specific to declared technologies.
- Mix: 1 foundational, 2 intermediate, 1 advanced.
- Verbally answerable in under 2 minutes.
- Return ONLY valid JSON array of 4 strings. No markdown.

Example: ["Q1?","Q2?","Q3?","Q4?"]"#
        )
    }

    /// Parse a JSON string array out of raw model output, keeping only
    /// non-empty string elements
    fn parse_questions(raw: &str) -> Result<Vec<String>> {
        let cleaned = strip_code_fences(raw);
        let array = first_json_array(&cleaned)
            .ok_or_else(|| Error::Extraction("no JSON array in output".to_string()))?;
        let values: Vec<serde_json::Value> = serde_json::from_str(array)
            .map_err(|e| Error::Extraction(format!("invalid question array: {}", e)))?;

        Ok(values
            .into_iter()
            .filter_map(|v| match v {
                serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
                _ => None,
            })
            .collect())
    }
}

#[async_trait]
impl QuestionGenerator for LlmQuestionGenerator {
    async fn generate(&self, tech_stack: &str, experience: &str) -> Result<Vec<String>> {
        let prompt = Self::build_prompt(tech_stack, experience);
        let result = self
            .backend
            .generate_with_options(
                &[Message::user(prompt)],
                GenerationOptions {
                    max_tokens: Some(limits::STRUCTURED_MAX_TOKENS),
                    temperature: Some(0.6),
                },
            )
            .await
            .map_err(|e| Error::Generation(e.to_string()))?;

        let questions = Self::parse_questions(&result.text)?;
        tracing::debug!(count = questions.len(), "Parsed generated questions");
        Ok(questions)
    }
}

/// LLM-backed resume field extractor
pub struct LlmFieldExtractor {
    backend: Arc<dyn LlmBackend>,
}

impl LlmFieldExtractor {
    pub fn new(backend: Arc<dyn LlmBackend>) -> Self {
        Self { backend }
    }

    fn build_prompt(raw_text: &str) -> String {
        let excerpt: String = raw_text.chars().take(limits::RESUME_EXCERPT_LIMIT).collect();
        format!(
            r#"Resume parser. Extract fields from the text below.
Return ONLY a valid JSON object with exactly these keys (null if not found):
{{"full_name":"...","email":"...","phone":"...","experience":"...",
  "desired_position":"...","location":"...","tech_stack":"..."}}

Rules:
- experience: years as string e.g. "3 years"
- tech_stack: comma-separated technologies
- desired_position: job title or objective if present
- Return ONLY the JSON. No markdown, no preamble.

Resume:
"""
{excerpt}
"""
"#
        )
    }

    fn parse_fields(raw: &str) -> Result<ExtractedFields> {
        let cleaned = strip_code_fences(raw);
        let object = first_json_object(&cleaned)
            .ok_or_else(|| Error::Extraction("no JSON object in output".to_string()))?;
        serde_json::from_str(object)
            .map_err(|e| Error::Extraction(format!("invalid field mapping: {}", e)))
    }
}

#[async_trait]
impl FieldExtractor for LlmFieldExtractor {
    async fn extract(&self, raw_text: &str) -> Result<ExtractedFields> {
        let prompt = Self::build_prompt(raw_text);
        let result = self
            .backend
            .generate_with_options(
                &[Message::user(prompt)],
                GenerationOptions {
                    max_tokens: Some(limits::STRUCTURED_MAX_TOKENS),
                    temperature: Some(0.1),
                },
            )
            .await
            .map_err(|e| Error::Generation(e.to_string()))?;

        let fields = Self::parse_fields(&result.text)?;
        tracing::debug!(
            filled = fields.present().count(),
            "Parsed resume field extraction"
        );
        Ok(fields)
    }
}
