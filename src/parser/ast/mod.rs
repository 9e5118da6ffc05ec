//! Typed AST wrappers over the untyped rowan CST.
//!
//! This module provides strongly-typed accessors for TypeSpec syntax nodes.
//! Each struct wraps a SyntaxNode and provides methods to access children.

use smol_str::SmolStr;

use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};

// ============================================================================
// Helper utilities for reducing code duplication
// ============================================================================

/// Find the name token of a declaration that starts with an introducer
/// keyword (`model`, `enum`, `op`, ...).
///
/// Keywords are contextual and legal as names, so the introducer itself
/// would match; skip the first significant token before looking.
#[inline]
fn declared_name_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| !t.kind().is_trivia())
        .skip(1)
        .find(|t| t.kind().is_name())
}

/// Find the name token of a member whose name comes first (model
/// properties, enum members). String literals are legal member names.
#[inline]
fn member_name_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind().is_name() || t.kind().is_string_literal())
}

/// Check if a syntax node has a direct child token of the specified kind.
#[inline]
fn has_token(node: &SyntaxNode, kind: SyntaxKind) -> bool {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .any(|t| t.kind() == kind)
}

/// Turn a name token into its declared text: backticked identifiers lose
/// their delimiters, string-literal names are unescaped.
fn name_token_text(token: &SyntaxToken) -> SmolStr {
    let text = token.text();
    match token.kind() {
        SyntaxKind::BACKTICK_IDENT => {
            SmolStr::new(text.trim_start_matches('`').trim_end_matches('`'))
        }
        kind if kind.is_string_literal() => SmolStr::new(unescape_string_literal(text)),
        _ => SmolStr::new(text),
    }
}

/// Macro to generate a method that finds the first child of a specific AST type.
macro_rules! first_child_method {
    ($name:ident, $type:ident) => {
        #[doc = concat!("Get the first `", stringify!($type), "` child of this node.")]
        pub fn $name(&self) -> Option<$type> {
            self.0.children().find_map($type::cast)
        }
    };
}

/// Macro to generate a method that returns an iterator over children of a specific AST type.
macro_rules! children_method {
    ($name:ident, $type:ident) => {
        #[doc = concat!("Get all `", stringify!($type), "` children of this node.")]
        pub fn $name(&self) -> impl Iterator<Item = $type> + '_ {
            self.0.children().filter_map($type::cast)
        }
    };
}

/// Macro to generate the boilerplate for a single-kind AST node wrapper.
macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(pub(crate) SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;

    /// Find all descendant nodes of a specific AST type
    fn descendants<T: AstNode>(&self) -> impl Iterator<Item = T> {
        self.syntax().descendants().filter_map(T::cast)
    }
}

// Submodules — declared after macros so macro_rules! are in scope
mod expressions;
mod statements;

// Re-export all public types so external code sees a flat namespace
pub use self::expressions::*;
pub use self::statements::*;
