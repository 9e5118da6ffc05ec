//! Logos-based lexer for TypeSpec
//!
//! Fast tokenization using the logos crate. Comments and whitespace lex as
//! trivia tokens so the CST stays lossless; anything no rule matches becomes
//! an `ERROR` token that the parser reports with a lexical error code.

use super::syntax_kind::SyntaxKind;
use crate::parser::errors::ErrorCode;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Pick a lexical error code for an `ERROR` token based on its leading text.
pub(crate) fn classify_lex_error(text: &str) -> ErrorCode {
    if text.starts_with('"') {
        ErrorCode::E0102
    } else if text.starts_with("/*") {
        ErrorCode::E0103
    } else if text.starts_with('`') {
        ErrorCode::E0105
    } else {
        ErrorCode::E0101
    }
}

/// Find the byte offset of the first invalid escape sequence in a string
/// literal's raw token text, if any. Recognized escapes: `\"`, `\\`, `\r`,
/// `\n`, `\t`, `` \` ``.
pub(crate) fn first_invalid_escape(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            match bytes.get(i + 1) {
                Some(b'"') | Some(b'\\') | Some(b'r') | Some(b'n') | Some(b't') | Some(b'`') => {
                    i += 2;
                }
                _ => return Some(i),
            }
        } else {
            i += 1;
        }
    }
    None
}

/// Scan a triple-quoted string body after the opening `"""`.
///
/// Terminates at the first closing `"""` (a `\` consumes the following
/// character first, so escaped quotes do not close the literal). Bumps the
/// logos lexer past the consumed text; returns false when unterminated.
fn lex_triple_quoted(lex: &mut logos::Lexer<LogosToken>) -> bool {
    let rest = lex.remainder().as_bytes();
    let mut i = 0;
    while i < rest.len() {
        if rest[i..].starts_with(b"\"\"\"") {
            lex.bump(i + 3);
            return true;
        }
        if rest[i] == b'\\' {
            i += 2;
        } else {
            i += 1;
        }
    }
    lex.bump(rest.len());
    false
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"//[^\r\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*[^/])*\*+/")]
    BlockComment,

    // =========================================================================
    // IDENTIFIERS & LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_$]*")]
    Ident,

    #[regex(r"`[^`]*`")]
    BacktickIdent,

    // No other leading zeros: `01` lexes as two decimal literals.
    #[regex(r"[+-]?(0|[1-9][0-9]*)(\.[0-9]+)?(e[+-]?[0-9]+)?")]
    Decimal,

    #[regex(r"0x[0-9a-fA-F]+")]
    HexInteger,

    #[regex(r"0b[01]+")]
    BinaryInteger,

    // Escapes lex permissively; the parser validates them (E0104).
    #[regex(r#""([^"\\\r\n]|\\[^\r\n])*""#)]
    QuotedString,

    #[token(r#"""""#, lex_triple_quoted)]
    TripleQuotedString,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("...")]
    Ellipsis,

    #[token("@@")]
    AtAt,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("?")]
    Question,
    #[token("@")]
    At,
    #[token("|")]
    Pipe,
    #[token("&")]
    Amp,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("import")]
    ImportKw,
    #[token("using")]
    UsingKw,
    #[token("namespace")]
    NamespaceKw,
    #[token("model")]
    ModelKw,
    #[token("scalar")]
    ScalarKw,
    #[token("interface")]
    InterfaceKw,
    #[token("enum")]
    EnumKw,
    #[token("alias")]
    AliasKw,
    #[token("op")]
    OpKw,
    #[token("is")]
    IsKw,
    #[token("extends")]
    ExtendsKw,
    #[token("valueof")]
    ValueofKw,
    #[token("true")]
    TrueKw,
    #[token("false")]
    FalseKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            // Trivia
            Whitespace => SyntaxKind::WHITESPACE,
            LineComment => SyntaxKind::LINE_COMMENT,
            BlockComment => SyntaxKind::BLOCK_COMMENT,

            // Identifiers & literals
            Ident => SyntaxKind::IDENT,
            BacktickIdent => SyntaxKind::BACKTICK_IDENT,
            Decimal => SyntaxKind::DECIMAL_LITERAL,
            HexInteger => SyntaxKind::HEX_INTEGER_LITERAL,
            BinaryInteger => SyntaxKind::BINARY_INTEGER_LITERAL,
            QuotedString => SyntaxKind::QUOTED_STRING_LITERAL,
            TripleQuotedString => SyntaxKind::TRIPLE_QUOTED_STRING_LITERAL,

            // Punctuation
            Ellipsis => SyntaxKind::ELLIPSIS,
            AtAt => SyntaxKind::AT_AT,
            LBrace => SyntaxKind::L_BRACE,
            RBrace => SyntaxKind::R_BRACE,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            Semicolon => SyntaxKind::SEMICOLON,
            Colon => SyntaxKind::COLON,
            Comma => SyntaxKind::COMMA,
            Dot => SyntaxKind::DOT,
            Eq => SyntaxKind::EQ,
            Lt => SyntaxKind::LT,
            Gt => SyntaxKind::GT,
            Question => SyntaxKind::QUESTION,
            At => SyntaxKind::AT,
            Pipe => SyntaxKind::PIPE,
            Amp => SyntaxKind::AMP,

            // Keywords
            ImportKw => SyntaxKind::IMPORT_KW,
            UsingKw => SyntaxKind::USING_KW,
            NamespaceKw => SyntaxKind::NAMESPACE_KW,
            ModelKw => SyntaxKind::MODEL_KW,
            ScalarKw => SyntaxKind::SCALAR_KW,
            InterfaceKw => SyntaxKind::INTERFACE_KW,
            EnumKw => SyntaxKind::ENUM_KW,
            AliasKw => SyntaxKind::ALIAS_KW,
            OpKw => SyntaxKind::OP_KW,
            IsKw => SyntaxKind::IS_KW,
            ExtendsKw => SyntaxKind::EXTENDS_KW,
            ValueofKw => SyntaxKind::VALUEOF_KW,
            TrueKw => SyntaxKind::TRUE_KW,
            FalseKw => SyntaxKind::FALSE_KW,
        }
    }
}
