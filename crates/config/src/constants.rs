//! Centralized constants

/// Default endpoints and model identifiers
pub mod endpoints {
    /// OpenAI-compatible chat completions base URL (Groq)
    pub const DEFAULT_LLM_ENDPOINT: &str = "https://api.groq.com/openai/v1";
    /// Default conversation model
    pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
}

/// Limits applied by the dialogue engine
pub mod limits {
    /// Maximum tokens for a conversational reply
    pub const REPLY_MAX_TOKENS: usize = 300;
    /// Maximum tokens for structured generation (questions, extraction)
    pub const STRUCTURED_MAX_TOKENS: usize = 400;
    /// Characters of an utterance kept in a sentiment log entry
    pub const SENTIMENT_TEXT_LIMIT: usize = 80;
    /// Characters of resume text forwarded to the field extractor
    pub const RESUME_EXCERPT_LIMIT: usize = 4000;
    /// Number of technical questions per interview
    pub const TECHNICAL_QUESTION_COUNT: usize = 4;
    /// Minimum usable generated questions before falling back
    pub const MIN_USABLE_QUESTIONS: usize = 3;
}

/// Environment variable names
pub mod env {
    /// API key for the generation backend
    pub const API_KEY: &str = "GROQ_API_KEY";
}
