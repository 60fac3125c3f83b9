//! LLM backend implementations
//!
//! Supports any OpenAI-compatible chat completions API; the default
//! configuration targets Groq. Each call is a single request: failed turns
//! surface a fixed fallback sentence immediately rather than retrying, so
//! the dialogue never stalls behind a backoff loop.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use hiring_agent_config::LlmSettings;

use crate::prompt::Message;
use crate::LlmError;

/// LLM configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Model name/ID
    pub model: String,
    /// OpenAI-compatible base URL
    pub endpoint: String,
    /// API key
    pub api_key: String,
    /// Maximum tokens to generate
    pub max_tokens: usize,
    /// Temperature
    pub temperature: f32,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self::from(&LlmSettings::default())
    }
}

impl From<&LlmSettings> for LlmConfig {
    fn from(settings: &LlmSettings) -> Self {
        Self {
            model: settings.model.clone(),
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
            timeout: Duration::from_secs(settings.timeout_secs),
        }
    }
}

/// Per-call overrides for structured generation. `None` falls back to the
/// backend configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerationOptions {
    pub max_tokens: Option<usize>,
    pub temperature: Option<f32>,
}

/// LLM generation result
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// Generated text
    pub text: String,
    /// Completion tokens reported by the provider
    pub tokens: usize,
    /// Total generation time (ms)
    pub total_time_ms: u64,
}

/// LLM backend trait
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Generate a response with per-call options
    async fn generate_with_options(
        &self,
        messages: &[Message],
        options: GenerationOptions,
    ) -> Result<GenerationResult, LlmError>;

    /// Generate a response with the configured defaults
    async fn generate(&self, messages: &[Message]) -> Result<GenerationResult, LlmError> {
        self.generate_with_options(messages, GenerationOptions::default())
            .await
    }

    /// Get model name
    fn model_name(&self) -> &str;
}

/// OpenAI-compatible chat completions backend
#[derive(Clone)]
pub struct ChatCompletionsBackend {
    client: Client,
    config: LlmConfig,
}

impl ChatCompletionsBackend {
    /// Create a new backend
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        if config.api_key.is_empty() {
            return Err(LlmError::Configuration("API key is not set".to_string()));
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn api_url(&self) -> String {
        format!("{}/chat/completions", self.config.endpoint.trim_end_matches('/'))
    }

    /// Map a non-success HTTP status to the error taxonomy.
    /// 429 is transient, 401/403 is a credential problem, other 4xx are API
    /// misuse, 5xx are provider-side.
    fn classify_status(status: reqwest::StatusCode, body: String) -> LlmError {
        match status.as_u16() {
            429 => LlmError::RateLimited,
            401 | 403 => LlmError::Configuration(format!("Authentication failed: {}", body)),
            s if (500..600).contains(&s) => {
                LlmError::Network(format!("Server error {}: {}", status, body))
            }
            _ => LlmError::Api(format!("{}: {}", status, body)),
        }
    }
}

#[async_trait]
impl LlmBackend for ChatCompletionsBackend {
    async fn generate_with_options(
        &self,
        messages: &[Message],
        options: GenerationOptions,
    ) -> Result<GenerationResult, LlmError> {
        let start = std::time::Instant::now();

        let request = ChatRequest {
            model: &self.config.model,
            messages,
            max_tokens: options.max_tokens.unwrap_or(self.config.max_tokens),
            temperature: options.temperature.unwrap_or(self.config.temperature),
        };

        let response = self
            .client
            .post(self.api_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let err = Self::classify_status(status, body);
            tracing::warn!(status = %status, error = %err, "Generation request failed");
            return Err(err);
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("empty choices".to_string()))?;

        Ok(GenerationResult {
            text: choice.message.content.trim().to_string(),
            tokens: parsed
                .usage
                .map(|u| u.completion_tokens)
                .unwrap_or_default(),
            total_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    max_tokens: usize,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct ChatUsage {
    #[serde(default)]
    completion_tokens: usize,
}
