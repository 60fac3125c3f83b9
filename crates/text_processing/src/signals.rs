//! Junk and exit-signal detection
//!
//! Two cheap lexical gates that run before any other turn processing:
//! exit signals force the conversation to its terminal stage, junk input
//! short-circuits the turn with a clarification request.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Closed set of tokens that terminate data collection
static EXIT_KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from(["exit", "quit", "bye", "goodbye", "end", "stop", "done"])
});

/// Pure punctuation noise: four or more consecutive non-alphanumeric
/// characters and nothing else
static GIBBERISH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^a-zA-Z0-9]{4,}$").expect("valid gibberish pattern"));

/// True when any whitespace-delimited token, case-insensitively, equals one
/// of the exit keywords. Matching is token-exact: "goodbyee" does not exit.
pub fn is_exit_signal(text: &str) -> bool {
    text.to_lowercase()
        .split_whitespace()
        .any(|token| EXIT_KEYWORDS.contains(token))
}

/// True when the trimmed text is too short to process (fewer than two
/// characters) or is pure punctuation noise.
pub fn is_junk(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.chars().count() < 2 || GIBBERISH.is_match(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_is_token_exact() {
        assert!(is_exit_signal("bye"));
        assert!(is_exit_signal("ok bye now"));
        assert!(is_exit_signal("QUIT"));
        assert!(!is_exit_signal("goodbyee"));
        assert!(!is_exit_signal("the end-game"));
    }

    #[test]
    fn junk_short_input() {
        assert!(is_junk(""));
        assert!(is_junk(" a "));
        assert!(!is_junk("ab"));
    }

    #[test]
    fn junk_punctuation_noise() {
        assert!(is_junk("!!!!"));
        assert!(is_junk("?!?!?!"));
        assert!(!is_junk("!!a!!"));
        assert!(!is_junk("C++"));
    }
}
