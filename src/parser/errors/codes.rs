//! Error code definitions for parser diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (invalid tokens)
//! - E02xx: Structural errors (braces, semicolons, delimiters)
//! - E03xx: Declaration errors (statements, members)
//! - E04xx: Expression errors
//! - E09xx: Generic/fallback errors

use std::fmt;

/// Error codes for parser diagnostics
///
/// Each error code represents a specific category of parse error,
/// enabling filtering, documentation, and IDE integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Lexical errors (invalid tokens)
    // =========================================================================
    /// Invalid or unexpected character in source
    E0101,
    /// Unterminated string literal
    E0102,
    /// Unterminated block comment
    E0103,
    /// Invalid escape sequence in string literal
    E0104,
    /// Unterminated backticked identifier
    E0105,

    // =========================================================================
    // E02xx: Structural errors (braces, semicolons, delimiters)
    // =========================================================================
    /// Missing semicolon
    E0201,
    /// Unclosed brace `{`
    E0202,
    /// Unclosed parenthesis `(`
    E0203,
    /// Unclosed bracket `[`
    E0204,
    /// Unclosed angle bracket `<`
    E0205,
    /// Empty body where at least one member is required
    E0206,
    /// Missing body (neither `;` nor `{` where one is required)
    E0207,

    // =========================================================================
    // E03xx: Declaration errors (statements, members)
    // =========================================================================
    /// Missing identifier/name
    E0301,
    /// Decorators are not valid on this statement kind
    E0302,
    /// Missing `:` between a property name and its type
    E0303,
    /// Missing operation signature (neither `(` nor `is`)
    E0304,
    /// Missing literal value for an enum member
    E0305,

    // =========================================================================
    // E04xx: Expression errors
    // =========================================================================
    /// Expected an expression
    E0401,
    /// Expected a reference expression
    E0402,

    // =========================================================================
    // E09xx: Generic/fallback errors
    // =========================================================================
    /// Unexpected token
    E0901,
}

impl ErrorCode {
    /// Short description of the error category
    pub fn description(&self) -> &'static str {
        match self {
            Self::E0101 => "invalid character",
            Self::E0102 => "unterminated string literal",
            Self::E0103 => "unterminated block comment",
            Self::E0104 => "invalid escape sequence",
            Self::E0105 => "unterminated backticked identifier",
            Self::E0201 => "missing semicolon",
            Self::E0202 => "unclosed brace",
            Self::E0203 => "unclosed parenthesis",
            Self::E0204 => "unclosed bracket",
            Self::E0205 => "unclosed angle bracket",
            Self::E0206 => "empty body",
            Self::E0207 => "missing body",
            Self::E0301 => "missing name",
            Self::E0302 => "misplaced decorator",
            Self::E0303 => "missing type annotation",
            Self::E0304 => "missing operation signature",
            Self::E0305 => "missing enum member value",
            Self::E0401 => "expected expression",
            Self::E0402 => "expected reference",
            Self::E0901 => "unexpected token",
        }
    }

    /// Check if this is a lexical error code
    pub fn is_lexical(&self) -> bool {
        matches!(
            self,
            Self::E0101 | Self::E0102 | Self::E0103 | Self::E0104 | Self::E0105
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
