//! Parser error handling module
//!
//! This module provides the diagnostic surface for the TypeSpec parser:
//! - Categorized error codes for filtering and documentation
//! - Context-aware error messages
//! - Suggestions/hints for common mistakes

mod codes;
mod context;
mod error;

pub use codes::ErrorCode;
pub use context::ParseContext;
pub use error::SyntaxError;
