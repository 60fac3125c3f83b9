//! Text processing for the hiring agent
//!
//! Pure lexical components with no async or network dependencies:
//! - Sentiment scoring (polarity + subjectivity with keyword boosts)
//! - Junk input detection
//! - Exit-signal detection

pub mod sentiment;
pub mod signals;

pub use sentiment::{SentimentAnalyzer, SentimentLabel, SentimentScore};
pub use signals::{is_exit_signal, is_junk};
