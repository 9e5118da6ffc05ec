//! Foundation types for the TypeSpec syntax crate.
//!
//! This module provides fundamental types used throughout the parser:
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//!
//! This module has NO dependencies on other tsp-syntax modules.

mod position;

pub use position::{LineCol, LineIndex, TextRange, TextSize};

// Re-export text-size for callers that need the raw types
pub use text_size;
