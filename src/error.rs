//! Structured error types for the report engine.
//!
//! The variants cover the real failure sources: JSON parsing, invalid
//! page/layout inputs, font registration, and file I/O. Layout itself never
//! half-fails: a run either returns a complete instruction list or errors
//! before producing any output.

use thiserror::Error;

/// The unified error type returned by all public API functions.
#[derive(Debug, Error)]
pub enum LaudoError {
    /// JSON input failed to parse as a valid report document.
    #[error("failed to parse report: {source}")]
    Parse {
        source: serde_json::Error,
        hint: String,
    },

    /// Page geometry or a wrap width violates the layout constraints.
    /// Rejected up front, before any instruction is emitted.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// A font could not be parsed or registered.
    #[error("font error: {0}")]
    Font(String),

    /// File I/O failed while reading a report or writing the output.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl LaudoError {
    /// A human-oriented hint for parse failures, when one applies.
    pub fn hint(&self) -> Option<&str> {
        match self {
            LaudoError::Parse { hint, .. } if !hint.is_empty() => Some(hint),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for LaudoError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the report schema. Check field names and types."
                    .to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input — is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        LaudoError::Parse { source: e, hint }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_failure(json: &str) -> LaudoError {
        serde_json::from_str::<crate::report::Report>(json)
            .map(|_| ())
            .expect_err("parse should fail")
            .into()
    }

    #[test]
    fn test_syntax_error_hint() {
        let err = parse_failure("{ not json");
        assert!(err.hint().unwrap().contains("trailing commas"));
        assert!(err.to_string().starts_with("failed to parse report:"));
    }

    #[test]
    fn test_data_error_hint() {
        let err = parse_failure(r#"{ "components": 7 }"#);
        assert!(err.hint().unwrap().contains("report schema"));
    }

    #[test]
    fn test_eof_error_hint() {
        let err = parse_failure("{ \"title\":");
        assert!(err.hint().unwrap().contains("truncated"));
    }

    #[test]
    fn test_invalid_layout_has_no_hint() {
        let err = LaudoError::InvalidLayout("page width must be positive".to_string());
        assert!(err.hint().is_none());
        assert_eq!(err.to_string(), "invalid layout: page width must be positive");
    }

    #[test]
    fn test_parse_error_preserves_source() {
        use std::error::Error;
        let err = parse_failure("{");
        assert!(err.source().is_some());
    }
}
