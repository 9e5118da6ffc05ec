//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree.
//! It follows the TypeSpec grammar structure.

/// All syntax kinds (tokens and nodes) in TypeSpec
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (statements, bodies, expressions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not grammatically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // =========================================================================
    // IDENTIFIERS & LITERALS
    // =========================================================================
    IDENT,                        // plainIdentifier
    BACKTICK_IDENT,               // `any text`
    DECIMAL_LITERAL,              // 0, -0, 3.14, 1e10
    HEX_INTEGER_LITERAL,          // 0x1F
    BINARY_INTEGER_LITERAL,       // 0b101
    QUOTED_STRING_LITERAL,        // "hello"
    TRIPLE_QUOTED_STRING_LITERAL, // """hello"""

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,    // {
    R_BRACE,    // }
    L_BRACKET,  // [
    R_BRACKET,  // ]
    L_PAREN,    // (
    R_PAREN,    // )
    SEMICOLON,  // ;
    COLON,      // :
    COMMA,      // ,
    DOT,        // .
    ELLIPSIS,   // ... (spread)
    EQ,         // =
    LT,         // <
    GT,         // >
    QUESTION,   // ?
    AT,         // @
    AT_AT,      // @@
    PIPE,       // |
    AMP,        // &

    // =========================================================================
    // KEYWORDS (contextual: accepted as names wherever an identifier fits)
    // =========================================================================
    IMPORT_KW,
    USING_KW,
    NAMESPACE_KW,
    MODEL_KW,
    SCALAR_KW,
    INTERFACE_KW,
    ENUM_KW,
    ALIAS_KW,
    OP_KW,
    IS_KW,
    EXTENDS_KW,
    VALUEOF_KW,
    TRUE_KW,
    FALSE_KW,

    // =========================================================================
    // COMPOSITE NODES (non-terminals in the grammar)
    // =========================================================================
    // Root
    SOURCE_FILE,

    // Statements
    NAMESPACE_STATEMENT,
    IMPORT_STATEMENT,
    USING_STATEMENT,
    MODEL_STATEMENT,
    SCALAR_STATEMENT,
    INTERFACE_STATEMENT,
    ENUM_STATEMENT,
    ALIAS_STATEMENT,
    AUGMENT_DECORATOR_STATEMENT,
    OPERATION_STATEMENT,
    EMPTY_STATEMENT,

    // Namespace
    NAMESPACE_BODY,

    // Decorators
    DECORATOR_LIST,
    DECORATOR,
    DECORATOR_ARGUMENTS,

    // Names
    MEMBER_EXPRESSION,

    // Templates
    TEMPLATE_PARAMETERS,
    TEMPLATE_PARAMETER_LIST,
    TEMPLATE_PARAMETER,
    TEMPLATE_CONSTRAINT,
    TEMPLATE_DEFAULT,
    TEMPLATE_ARGUMENTS,

    // Models
    MODEL_IS_HERITAGE,
    MODEL_EXTENDS_HERITAGE,
    MODEL_EXPRESSION,
    MODEL_BODY,
    MODEL_PROPERTY,
    MODEL_SPREAD_PROPERTY,

    // Scalars
    SCALAR_EXTENDS,

    // Interfaces
    INTERFACE_HERITAGE,
    INTERFACE_BODY,
    INTERFACE_MEMBER,

    // Enums
    ENUM_BODY,
    ENUM_MEMBER,
    ENUM_SPREAD_MEMBER,
    ENUM_MEMBER_VALUE,

    // Operations
    OPERATION_SIGNATURE_DECLARATION,
    OPERATION_SIGNATURE_REFERENCE,

    // Expressions
    EXPRESSION_LIST,
    UNION_EXPRESSION,
    INTERSECTION_EXPRESSION,
    VALUE_OF_EXPRESSION,
    ARRAY_EXPRESSION,
    TUPLE_EXPRESSION,
    REFERENCE_EXPRESSION,
    REFERENCE_EXPRESSION_LIST,
    PARENTHESIZED_EXPRESSION,
    LITERAL,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT
        )
    }

    /// Check if this is a comment token
    pub fn is_comment(self) -> bool {
        matches!(self, Self::LINE_COMMENT | Self::BLOCK_COMMENT)
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::IMPORT_KW as u16) && (self as u16) <= (Self::FALSE_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_BRACE as u16) && (self as u16) <= (Self::AMP as u16)
    }

    /// Check if this token can serve as a name. Keywords are contextual in
    /// TypeSpec: `model model { model: string }` is legal source.
    pub fn is_name(self) -> bool {
        matches!(self, Self::IDENT | Self::BACKTICK_IDENT) || self.is_keyword()
    }

    /// Check if this is a string literal token (either quoting form)
    pub fn is_string_literal(self) -> bool {
        matches!(
            self,
            Self::QUOTED_STRING_LITERAL | Self::TRIPLE_QUOTED_STRING_LITERAL
        )
    }

    /// Check if this is a numeric literal token
    pub fn is_numeric_literal(self) -> bool {
        matches!(
            self,
            Self::DECIMAL_LITERAL | Self::HEX_INTEGER_LITERAL | Self::BINARY_INTEGER_LITERAL
        )
    }

    /// Check if this token can begin a literal expression
    pub fn is_literal_token(self) -> bool {
        self.is_string_literal()
            || self.is_numeric_literal()
            || matches!(self, Self::TRUE_KW | Self::FALSE_KW)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TspLanguage {}

impl rowan::Language for TspLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<TspLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<TspLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<TspLanguage>;
pub type SyntaxNodeChildren = rowan::SyntaxNodeChildren<TspLanguage>;
