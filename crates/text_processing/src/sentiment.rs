//! Lexicon-based sentiment scoring
//!
//! Scores a user utterance into polarity [-1, 1] and subjectivity [0, 1],
//! with domain keyword boosts on top of the base lexicon. Candidates talking
//! about interviews use a narrow emotional vocabulary, so a compact lexicon
//! with explicit boost sets performs well enough for per-turn mood tracking.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Polarity lexicon: word -> weight in [-1, 1]
static LEXICON: Lazy<HashMap<&'static str, f32>> = Lazy::new(|| {
    HashMap::from([
        // positive
        ("good", 0.6),
        ("great", 0.8),
        ("excellent", 0.9),
        ("amazing", 0.85),
        ("fantastic", 0.85),
        ("love", 0.7),
        ("like", 0.4),
        ("happy", 0.7),
        ("glad", 0.6),
        ("excited", 0.7),
        ("enjoy", 0.6),
        ("interesting", 0.4),
        ("comfortable", 0.4),
        ("strong", 0.4),
        ("perfect", 0.8),
        ("awesome", 0.8),
        ("best", 0.7),
        ("well", 0.3),
        ("yes", 0.2),
        ("sure", 0.2),
        ("thanks", 0.4),
        ("easy", 0.3),
        // negative
        ("bad", -0.6),
        ("terrible", -0.9),
        ("awful", -0.85),
        ("hate", -0.8),
        ("hard", -0.3),
        ("difficult", -0.4),
        ("worried", -0.5),
        ("nervous", -0.4),
        ("unsure", -0.3),
        ("confused", -0.4),
        ("struggle", -0.5),
        ("fail", -0.6),
        ("failed", -0.6),
        ("poor", -0.5),
        ("stressed", -0.5),
        ("worst", -0.8),
        ("no", -0.2),
        ("never", -0.3),
        ("boring", -0.5),
        ("lost", -0.4),
    ])
});

/// Boost sets: presence of any member shifts polarity by +/- 0.25
static POSITIVE_BOOST: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "excited",
        "great",
        "love",
        "happy",
        "excellent",
        "amazing",
        "good",
        "fantastic",
        "eager",
        "passionate",
        "confident",
        "ready",
        "thrilled",
    ])
});

static NEGATIVE_BOOST: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "nervous",
        "unsure",
        "worried",
        "difficult",
        "hard",
        "struggle",
        "bad",
        "fail",
        "terrible",
        "hate",
        "confused",
        "lost",
        "stressed",
    ])
});

/// Words that mark an utterance as subjective rather than factual
static SUBJECTIVE_MARKERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "feel", "feels", "felt", "think", "believe", "hope", "wish", "really", "very",
        "absolutely", "maybe", "probably", "personally", "honestly", "definitely",
    ])
});

/// Classified sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }

    /// Classify a polarity score. Thresholds at +/- 0.1.
    pub fn from_polarity(polarity: f32) -> Self {
        if polarity > 0.1 {
            SentimentLabel::Positive
        } else if polarity < -0.1 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sentiment score for a single utterance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub label: SentimentLabel,
    /// Polarity in [-1, 1]
    pub polarity: f32,
    /// Subjectivity in [0, 1]
    pub subjectivity: f32,
}

impl SentimentScore {
    /// Neutral zero score, used when there is nothing to analyze
    pub fn neutral() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            polarity: 0.0,
            subjectivity: 0.0,
        }
    }
}

/// Lexicon-based sentiment analyzer
#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Score an utterance into polarity and subjectivity
    pub fn score(&self, text: &str) -> SentimentScore {
        let tokens: Vec<String> = text
            .to_lowercase()
            .split_whitespace()
            .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
            .filter(|t| !t.is_empty())
            .collect();

        if tokens.is_empty() {
            return SentimentScore::neutral();
        }

        let mut sum = 0.0_f32;
        let mut scored = 0usize;
        let mut subjective = 0usize;

        for (i, token) in tokens.iter().enumerate() {
            if let Some(weight) = LEXICON.get(token.as_str()) {
                // simple negation: "not good" flips the weight
                let negated = i > 0 && matches!(tokens[i - 1].as_str(), "not" | "n't" | "dont" | "don't");
                sum += if negated { -weight } else { *weight };
                scored += 1;
                subjective += 1;
            } else if SUBJECTIVE_MARKERS.contains(token.as_str()) {
                subjective += 1;
            }
        }

        let mut polarity = if scored > 0 { sum / scored as f32 } else { 0.0 };

        let token_set: HashSet<&str> = tokens.iter().map(String::as_str).collect();
        if !token_set.is_disjoint(&POSITIVE_BOOST) {
            polarity = (polarity + 0.25).min(1.0);
        }
        if !token_set.is_disjoint(&NEGATIVE_BOOST) {
            polarity = (polarity - 0.25).max(-1.0);
        }

        let subjectivity = (subjective as f32 / tokens.len() as f32).clamp(0.0, 1.0);

        let polarity = round2(polarity);
        SentimentScore {
            label: SentimentLabel::from_polarity(polarity),
            polarity,
            subjectivity: round2(subjectivity),
        }
    }
}

fn round2(v: f32) -> f32 {
    (v * 100.0).round() / 100.0
}
