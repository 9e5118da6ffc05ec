//! Syntax error type for parser diagnostics
//!
//! A parse never fails hard: errors are collected on the side with a source
//! range, a categorized code, and an optional fix hint.

use rowan::{TextRange, TextSize};
use thiserror::Error;

use super::codes::ErrorCode;

/// A syntax or lexical error with location, message, and category
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code} {message}")]
pub struct SyntaxError {
    /// Human-readable error message
    pub message: String,
    /// Source location
    pub range: TextRange,
    /// Categorized error code
    pub code: ErrorCode,
    /// Optional suggestion for fixing the error
    pub hint: Option<String>,
}

impl SyntaxError {
    /// Create a new syntax error
    pub fn new(message: impl Into<String>, range: TextRange, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            range,
            code,
            hint: None,
        }
    }

    /// Create an error at a specific offset with zero-width range
    pub fn at_offset(message: impl Into<String>, offset: TextSize, code: ErrorCode) -> Self {
        Self::new(message, TextRange::empty(offset), code)
    }

    /// Add a hint to this error
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Check if this is a lexical (rather than syntactic) error
    pub fn is_lexical(&self) -> bool {
        self.code.is_lexical()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = SyntaxError::new(
            "expected ';'",
            TextRange::empty(TextSize::new(4)),
            ErrorCode::E0201,
        );
        assert_eq!(err.to_string(), "E0201 expected ';'");
    }

    #[test]
    fn test_hint_builder() {
        let err = SyntaxError::at_offset("empty enum body", TextSize::new(0), ErrorCode::E0206)
            .with_hint("add at least one member");
        assert_eq!(err.hint.as_deref(), Some("add at least one member"));
        assert!(!err.is_lexical());
    }
}
