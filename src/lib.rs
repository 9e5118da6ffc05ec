//! # tsp-syntax
//!
//! Lossless lexer, parser, and concrete syntax tree for the TypeSpec
//! interface-definition language.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! parser    → Logos lexer, recursive-descent parser, CST, typed AST
//!   ↓
//! base      → Primitives (TextRange, LineIndex)
//! ```
//!
//! ## Quick start
//!
//! ```
//! use tsp_syntax::parse;
//!
//! let parse = parse("model Pet { name: string }");
//! assert!(parse.ok());
//! assert_eq!(parse.syntax().text().to_string(), "model Pet { name: string }");
//! ```

/// Foundation types: TextRange, LineCol, LineIndex
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, typed AST layer
pub mod parser;

// Re-export the primary entry points
pub use parser::{
    Parse, SyntaxElement, SyntaxError, SyntaxKind, SyntaxNode, SyntaxToken, ast, parse,
};

// Re-export foundation types
pub use base::{LineCol, LineIndex, TextRange, TextSize};
