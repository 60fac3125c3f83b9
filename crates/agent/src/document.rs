//! Document text extraction
//!
//! Default implementation for plain-text uploads. Binary formats plug in
//! through the same trait; an empty result always means "unreadable, skip
//! pre-fill" rather than an error.

use hiring_agent_core::{DocumentExtractor, Result};

/// Extracts text from UTF-8 documents, dropping control characters and
/// decoding artifacts
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl DocumentExtractor for PlainTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String> {
        let decoded = String::from_utf8_lossy(bytes);
        let cleaned: String = decoded
            .chars()
            .filter(|c| *c == '\n' || *c == '\t' || (*c != '\u{FFFD}' && !c.is_control()))
            .collect();
        Ok(cleaned.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_plain_text_through() {
        let text = PlainTextExtractor
            .extract_text("Asha Rao\nasha@x.com\nRust, PostgreSQL".as_bytes())
            .unwrap();
        assert!(text.contains("asha@x.com"));
    }

    #[test]
    fn strips_decoding_artifacts() {
        let bytes = [b'A', 0xFF, 0xFE, b'B', 0x00, b'\n', b'C'];
        let text = PlainTextExtractor.extract_text(&bytes).unwrap();
        assert_eq!(text, "AB\nC");
    }

    #[test]
    fn empty_input_yields_empty_text() {
        assert_eq!(PlainTextExtractor.extract_text(b"").unwrap(), "");
        assert_eq!(PlainTextExtractor.extract_text(b"   \n  ").unwrap(), "");
    }
}
