//! Recursive descent parser for TypeSpec
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST.
//!
//! Trivia policy: `at`/`eat`/`expect`/`nth` look through whitespace and
//! comments; `bump` attaches any pending trivia before the token it consumes.
//! Rule functions consume pending trivia into the *enclosing* node before
//! opening their own, so node ranges cover exactly the matched source text
//! with leading/trailing extras outside the construct.

use super::lexer::{self, Lexer, Token};
use super::syntax_kind::SyntaxKind;
use crate::parser::errors::{ErrorCode, ParseContext, SyntaxError};
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse TypeSpec source code into a CST
pub fn parse(input: &str) -> Parse {
    let _span = tracing::trace_span!("parse", len = input.len()).entered();
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens, input.len() as u32);
    parser.parse_source_file();
    let parse = parser.finish();
    if !parse.errors.is_empty() {
        tracing::debug!(count = parse.errors.len(), "parse produced diagnostics");
    }
    parse
}

/// Statement-boundary tokens used to resynchronize after an error
const STATEMENT_RECOVERY: &[SyntaxKind] = &[
    SyntaxKind::SEMICOLON,
    SyntaxKind::R_BRACE,
    SyntaxKind::IMPORT_KW,
    SyntaxKind::USING_KW,
    SyntaxKind::NAMESPACE_KW,
    SyntaxKind::MODEL_KW,
    SyntaxKind::SCALAR_KW,
    SyntaxKind::INTERFACE_KW,
    SyntaxKind::ENUM_KW,
    SyntaxKind::ALIAS_KW,
    SyntaxKind::OP_KW,
    SyntaxKind::AT,
    SyntaxKind::AT_AT,
];

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
    contexts: Vec<ParseContext>,
    end_offset: u32,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>], end_offset: u32) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
            contexts: vec![ParseContext::TopLevel],
            end_offset,
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection (looks through trivia)
    // =========================================================================

    fn npos(&self) -> usize {
        let mut idx = self.pos;
        while idx < self.tokens.len() && self.tokens[idx].kind.is_trivia() {
            idx += 1;
        }
        idx
    }

    fn current_token(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.npos())
    }

    fn current_kind(&self) -> SyntaxKind {
        self.current_token()
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::ERROR)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current_token().is_some_and(|t| t.kind == kind)
    }

    fn at_eof(&self) -> bool {
        self.npos() >= self.tokens.len()
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        let mut idx = self.pos;
        let mut seen = 0;
        while idx < self.tokens.len() {
            let kind = self.tokens[idx].kind;
            if !kind.is_trivia() {
                if seen == n {
                    return kind;
                }
                seen += 1;
            }
            idx += 1;
        }
        SyntaxKind::ERROR
    }

    fn at_expression_start(&self) -> bool {
        self.current_token().is_some_and(|t| {
            matches!(
                t.kind,
                SyntaxKind::PIPE
                    | SyntaxKind::AMP
                    | SyntaxKind::L_PAREN
                    | SyntaxKind::L_BRACE
                    | SyntaxKind::L_BRACKET
            ) || t.kind.is_literal_token()
                || t.kind.is_name()
        })
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump_raw(&mut self) {
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn skip_trivia(&mut self) {
        while self
            .tokens
            .get(self.pos)
            .is_some_and(|t| t.kind.is_trivia())
        {
            self.bump_raw();
        }
    }

    /// Consume the next significant token, attaching pending trivia first
    fn bump(&mut self) {
        self.skip_trivia();
        self.bump_raw();
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind, code: ErrorCode) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {}", token_name(kind)), code);
            false
        }
    }

    /// Consume an identifier, backticked identifier, or contextual keyword
    fn eat_name(&mut self) -> bool {
        if self.current_token().is_some_and(|t| t.kind.is_name()) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect_name(&mut self) {
        if !self.eat_name() {
            self.error("expected identifier", ErrorCode::E0301);
        }
    }

    /// Consume a string literal token, reporting any invalid escape sequence
    fn bump_string(&mut self) {
        if let Some(token) = self.current_token() {
            if let Some(idx) = lexer::first_invalid_escape(token.text) {
                let start = token.offset + TextSize::new(idx as u32);
                let len = (token.text.len() - idx).min(2) as u32;
                self.errors.push(SyntaxError::new(
                    "invalid escape sequence in string literal",
                    TextRange::at(start, TextSize::new(len)),
                    ErrorCode::E0104,
                ));
            }
        }
        self.bump();
    }

    /// Report a lexical error for the current `ERROR` token and consume it
    fn bump_lex_error(&mut self) {
        if let Some(token) = self.current_token() {
            let code = lexer::classify_lex_error(token.text);
            let range = TextRange::at(token.offset, TextSize::of(token.text));
            self.errors
                .push(SyntaxError::new(code.description(), range, code));
            self.bump();
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>, code: ErrorCode) {
        let context = self
            .contexts
            .last()
            .copied()
            .unwrap_or(ParseContext::TopLevel);
        let message = format!("{} {}", message.into(), context.description());
        let range = self
            .current_token()
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .unwrap_or_else(|| TextRange::empty(TextSize::new(self.end_offset)));
        self.errors.push(SyntaxError::new(message, range, code));
    }

    fn error_recover(&mut self, message: impl Into<String>, code: ErrorCode, recovery: &[SyntaxKind]) {
        self.error(message, code);
        self.builder.start_node(SyntaxKind::ERROR.into());
        // Always consume at least one token to make progress
        let mut consumed = false;
        while !self.at_eof() && !recovery.contains(&self.current_kind()) {
            self.bump();
            consumed = true;
        }
        if !consumed && !self.at_eof() {
            self.bump();
        }
        self.builder.finish_node();
    }

    fn push_context(&mut self, context: ParseContext) {
        self.contexts.push(context);
    }

    fn pop_context(&mut self) {
        self.contexts.pop();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    /// Open a node at the next significant token, attaching pending trivia
    /// to the enclosing node first
    fn start_node(&mut self, kind: SyntaxKind) {
        self.skip_trivia();
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    /// Take a checkpoint at the next significant token
    fn checkpoint(&mut self) -> Checkpoint {
        self.skip_trivia();
        self.builder.checkpoint()
    }

    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    // =========================================================================
    // Statement grammar
    // =========================================================================

    /// SourceFile = (Statement | Comment)*
    fn parse_source_file(&mut self) {
        self.builder.start_node(SyntaxKind::SOURCE_FILE.into());

        loop {
            if self.at_eof() {
                break;
            }
            let pos_before = self.pos;
            self.parse_statement();
            // Safety: if we didn't make progress, force-skip a token
            if self.pos == pos_before && !self.at_eof() {
                self.error("unexpected token", ErrorCode::E0901);
                self.bump();
            }
        }

        self.skip_trivia();
        self.builder.finish_node();
    }

    /// Statement = Namespace | Import | Using | Model | Scalar | Interface
    ///           | Enum | Alias | AugmentDecorator | Operation | ';'
    ///
    /// Decorator lists are valid only on namespace, model, scalar, enum and
    /// operation statements; anywhere else they are reported but kept in the
    /// tree so editing tools still see them.
    fn parse_statement(&mut self) {
        let cp = self.checkpoint();
        let has_decorators = self.at(SyntaxKind::AT);
        if has_decorators {
            self.parse_decorator_list();
        }

        match self.current_kind() {
            SyntaxKind::NAMESPACE_KW => self.parse_namespace_statement(cp),
            SyntaxKind::MODEL_KW => self.parse_model_statement(cp),
            SyntaxKind::SCALAR_KW => self.parse_scalar_statement(cp),
            SyntaxKind::ENUM_KW => self.parse_enum_statement(cp),
            SyntaxKind::OP_KW => self.parse_operation_statement(cp),
            SyntaxKind::IMPORT_KW => {
                self.deny_decorators(has_decorators);
                self.parse_import_statement(cp);
            }
            SyntaxKind::USING_KW => {
                self.deny_decorators(has_decorators);
                self.parse_using_statement(cp);
            }
            SyntaxKind::INTERFACE_KW => {
                self.deny_decorators(has_decorators);
                self.parse_interface_statement(cp);
            }
            SyntaxKind::ALIAS_KW => {
                self.deny_decorators(has_decorators);
                self.parse_alias_statement(cp);
            }
            SyntaxKind::AT_AT => {
                self.deny_decorators(has_decorators);
                self.parse_augment_decorator_statement(cp);
            }
            SyntaxKind::SEMICOLON => {
                self.deny_decorators(has_decorators);
                self.start_node_at(cp, SyntaxKind::EMPTY_STATEMENT);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::ERROR => {
                if self.at_eof() {
                    self.error("unexpected end of file", ErrorCode::E0901);
                } else {
                    self.bump_lex_error();
                }
            }
            kind => {
                self.error_recover(
                    format!("unexpected token {kind:?}"),
                    ErrorCode::E0901,
                    STATEMENT_RECOVERY,
                );
            }
        }
    }

    fn deny_decorators(&mut self, has_decorators: bool) {
        if has_decorators {
            self.error(
                "decorators are not valid on this statement",
                ErrorCode::E0302,
            );
        }
    }

    /// Namespace = DecoratorList? 'namespace' MemberPath (';' | '{' Statement* '}')
    fn parse_namespace_statement(&mut self, cp: Checkpoint) {
        self.start_node_at(cp, SyntaxKind::NAMESPACE_STATEMENT);

        self.bump(); // namespace
        self.parse_member_path();

        if self.eat(SyntaxKind::SEMICOLON) {
            // File-scoped namespace declaration
        } else if self.at(SyntaxKind::L_BRACE) {
            self.parse_namespace_body();
        } else {
            self.error("expected ';' or '{' after namespace name", ErrorCode::E0207);
        }

        self.finish_node();
    }

    /// NamespaceBody = '{' Statement* '}'
    fn parse_namespace_body(&mut self) {
        self.start_node(SyntaxKind::NAMESPACE_BODY);
        self.bump(); // {
        self.push_context(ParseContext::NamespaceBody);

        loop {
            if self.at_eof() || self.at(SyntaxKind::R_BRACE) {
                break;
            }
            let pos_before = self.pos;
            self.parse_statement();
            if self.pos == pos_before && !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
                self.error("unexpected token", ErrorCode::E0901);
                self.bump();
            }
        }

        self.pop_context();
        self.expect(SyntaxKind::R_BRACE, ErrorCode::E0202);
        self.finish_node();
    }

    /// Import = 'import' StringLiteral ';'
    fn parse_import_statement(&mut self, cp: Checkpoint) {
        self.start_node_at(cp, SyntaxKind::IMPORT_STATEMENT);

        self.bump(); // import
        if self.current_kind().is_string_literal() {
            self.bump_string();
        } else {
            self.error("expected import path string", ErrorCode::E0301);
        }
        self.expect(SyntaxKind::SEMICOLON, ErrorCode::E0201);

        self.finish_node();
    }

    /// Using = 'using' MemberPath ';'
    fn parse_using_statement(&mut self, cp: Checkpoint) {
        self.start_node_at(cp, SyntaxKind::USING_STATEMENT);

        self.bump(); // using
        self.parse_member_path();
        self.expect(SyntaxKind::SEMICOLON, ErrorCode::E0201);

        self.finish_node();
    }

    /// Model = DecoratorList? 'model' Name TemplateParameters?
    ///         (IsHeritage ';' | (IsHeritage | ExtendsHeritage)? ModelExpression)
    fn parse_model_statement(&mut self, cp: Checkpoint) {
        self.start_node_at(cp, SyntaxKind::MODEL_STATEMENT);

        self.bump(); // model
        self.expect_name();
        if self.at(SyntaxKind::LT) {
            self.parse_template_parameters();
        }

        let mut has_is = false;
        if self.at(SyntaxKind::IS_KW) {
            has_is = true;
            self.start_node(SyntaxKind::MODEL_IS_HERITAGE);
            self.bump();
            self.parse_expression();
            self.finish_node();
        } else if self.at(SyntaxKind::EXTENDS_KW) {
            self.start_node(SyntaxKind::MODEL_EXTENDS_HERITAGE);
            self.bump();
            self.parse_expression();
            self.finish_node();
        }

        if has_is && self.eat(SyntaxKind::SEMICOLON) {
            // `model X is T;`
        } else if self.at(SyntaxKind::L_BRACE) {
            self.parse_model_expression();
        } else if has_is {
            self.error("expected ';' or '{'", ErrorCode::E0207);
        } else {
            self.error("expected '{'", ErrorCode::E0207);
        }

        self.finish_node();
    }

    /// ModelExpression = '{' ModelBody? '}'
    fn parse_model_expression(&mut self) {
        self.start_node(SyntaxKind::MODEL_EXPRESSION);
        self.bump(); // {
        self.push_context(ParseContext::ModelBody);

        if !self.at(SyntaxKind::R_BRACE) && !self.at_eof() {
            self.start_node(SyntaxKind::MODEL_BODY);
            loop {
                if self.at_eof() || self.at(SyntaxKind::R_BRACE) {
                    break;
                }
                let kind = self.current_kind();
                if kind == SyntaxKind::ELLIPSIS
                    || kind == SyntaxKind::AT
                    || kind.is_name()
                    || kind.is_string_literal()
                {
                    self.parse_model_property();
                } else {
                    self.error_recover(
                        "expected model property",
                        ErrorCode::E0901,
                        &[SyntaxKind::R_BRACE],
                    );
                }
            }
            self.finish_node();
        }

        self.pop_context();
        self.expect(SyntaxKind::R_BRACE, ErrorCode::E0202);
        self.finish_node();
    }

    /// ModelProperty = SpreadProperty
    ///               | DecoratorList? (Name | StringLiteral) '?'? ':' Expression (',' | ';')?
    fn parse_model_property(&mut self) {
        if self.at(SyntaxKind::ELLIPSIS) {
            // No trailing separator on spread properties
            self.start_node(SyntaxKind::MODEL_SPREAD_PROPERTY);
            self.bump(); // ...
            self.parse_reference_expression_required();
            self.finish_node();
            return;
        }

        let cp = self.checkpoint();
        if self.at(SyntaxKind::AT) {
            self.parse_decorator_list();
        }
        self.start_node_at(cp, SyntaxKind::MODEL_PROPERTY);

        if self.current_kind().is_string_literal() {
            self.bump_string();
        } else if !self.eat_name() {
            self.error("expected property name", ErrorCode::E0301);
        }
        self.eat(SyntaxKind::QUESTION);
        self.expect(SyntaxKind::COLON, ErrorCode::E0303);
        self.parse_expression();
        if self.at(SyntaxKind::COMMA) || self.at(SyntaxKind::SEMICOLON) {
            self.bump();
        }

        self.finish_node();
    }

    /// Scalar = DecoratorList? 'scalar' Name TemplateParameters? ScalarExtends? ';'
    fn parse_scalar_statement(&mut self, cp: Checkpoint) {
        self.start_node_at(cp, SyntaxKind::SCALAR_STATEMENT);

        self.bump(); // scalar
        self.expect_name();
        if self.at(SyntaxKind::LT) {
            self.parse_template_parameters();
        }
        if self.at(SyntaxKind::EXTENDS_KW) {
            self.start_node(SyntaxKind::SCALAR_EXTENDS);
            self.bump();
            self.parse_expression();
            self.finish_node();
        }
        self.expect(SyntaxKind::SEMICOLON, ErrorCode::E0201);

        self.finish_node();
    }

    /// Interface = 'interface' Name TemplateParameters? InterfaceHeritage?
    ///             '{' InterfaceBody? '}'
    fn parse_interface_statement(&mut self, cp: Checkpoint) {
        self.start_node_at(cp, SyntaxKind::INTERFACE_STATEMENT);

        self.bump(); // interface
        self.expect_name();
        if self.at(SyntaxKind::LT) {
            self.parse_template_parameters();
        }
        if self.at(SyntaxKind::EXTENDS_KW) {
            self.start_node(SyntaxKind::INTERFACE_HERITAGE);
            self.bump();
            self.parse_reference_expression_list();
            self.finish_node();
        }

        if !self.at(SyntaxKind::L_BRACE) {
            self.error("expected '{'", ErrorCode::E0207);
            self.finish_node();
            return;
        }
        self.bump(); // {
        self.push_context(ParseContext::InterfaceBody);

        if !self.at(SyntaxKind::R_BRACE) && !self.at_eof() {
            self.start_node(SyntaxKind::INTERFACE_BODY);
            loop {
                if self.at_eof() || self.at(SyntaxKind::R_BRACE) {
                    break;
                }
                if self.current_kind().is_name() {
                    self.parse_interface_member();
                } else {
                    self.error_recover(
                        "expected interface member",
                        ErrorCode::E0901,
                        &[SyntaxKind::R_BRACE],
                    );
                }
            }
            self.finish_node();
        }

        self.pop_context();
        self.expect(SyntaxKind::R_BRACE, ErrorCode::E0202);
        self.finish_node();
    }

    /// InterfaceMember = 'op'? Name OperationSignature ';'
    fn parse_interface_member(&mut self) {
        self.start_node(SyntaxKind::INTERFACE_MEMBER);

        // `op` is optional and also a legal member name, so only treat it as
        // the keyword when a name follows. `op is X;` is the exception: there
        // `is` opens a reference signature for a member named `op`.
        if self.at(SyntaxKind::OP_KW)
            && self.nth(1).is_name()
            && !(self.nth(1) == SyntaxKind::IS_KW && self.nth(2).is_name())
        {
            self.bump();
        }
        self.expect_name();
        self.parse_operation_signature();
        self.expect(SyntaxKind::SEMICOLON, ErrorCode::E0201);

        self.finish_node();
    }

    /// Enum = DecoratorList? 'enum' Name '{' EnumBody '}'
    ///
    /// An explicit `{}` with zero members is a syntax error: the body, when
    /// braces are present, must declare at least one member.
    fn parse_enum_statement(&mut self, cp: Checkpoint) {
        self.start_node_at(cp, SyntaxKind::ENUM_STATEMENT);

        self.bump(); // enum
        self.expect_name();

        if !self.at(SyntaxKind::L_BRACE) {
            self.error("expected '{'", ErrorCode::E0207);
            self.finish_node();
            return;
        }
        self.bump(); // {
        self.push_context(ParseContext::EnumBody);

        if self.at(SyntaxKind::R_BRACE) {
            let range = self
                .current_token()
                .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
                .unwrap_or_else(|| TextRange::empty(TextSize::new(self.end_offset)));
            self.errors.push(
                SyntaxError::new(
                    "enum body must declare at least one member",
                    range,
                    ErrorCode::E0206,
                )
                .with_hint("add at least one member"),
            );
        } else if !self.at_eof() {
            self.start_node(SyntaxKind::ENUM_BODY);
            loop {
                if self.at_eof() || self.at(SyntaxKind::R_BRACE) {
                    break;
                }
                let kind = self.current_kind();
                if kind == SyntaxKind::ELLIPSIS {
                    self.start_node(SyntaxKind::ENUM_SPREAD_MEMBER);
                    self.bump();
                    self.parse_reference_expression_required();
                    self.finish_node();
                } else if kind == SyntaxKind::AT || kind.is_name() || kind.is_string_literal() {
                    self.parse_enum_member();
                } else {
                    self.error_recover(
                        "expected enum member",
                        ErrorCode::E0901,
                        &[SyntaxKind::R_BRACE],
                    );
                }
            }
            self.finish_node();
        }

        self.pop_context();
        self.expect(SyntaxKind::R_BRACE, ErrorCode::E0202);
        self.finish_node();
    }

    /// EnumMember = DecoratorList? (Name | StringLiteral)
    ///              (':' (NumericLiteral | StringLiteral))? (',' | ';')?
    fn parse_enum_member(&mut self) {
        let cp = self.checkpoint();
        if self.at(SyntaxKind::AT) {
            self.parse_decorator_list();
        }
        self.start_node_at(cp, SyntaxKind::ENUM_MEMBER);

        if self.current_kind().is_string_literal() {
            self.bump_string();
        } else if !self.eat_name() {
            self.error("expected enum member name", ErrorCode::E0301);
        }

        if self.at(SyntaxKind::COLON) {
            self.start_node(SyntaxKind::ENUM_MEMBER_VALUE);
            self.bump(); // :
            let kind = self.current_kind();
            if kind.is_numeric_literal() || kind.is_string_literal() {
                self.start_node(SyntaxKind::LITERAL);
                if kind.is_string_literal() {
                    self.bump_string();
                } else {
                    self.bump();
                }
                self.finish_node();
            } else {
                self.error("expected numeric or string literal", ErrorCode::E0305);
            }
            self.finish_node();
        }

        if self.at(SyntaxKind::COMMA) || self.at(SyntaxKind::SEMICOLON) {
            self.bump();
        }

        self.finish_node();
    }

    /// Alias = 'alias' Name TemplateParameters? '=' Expression ';'
    fn parse_alias_statement(&mut self, cp: Checkpoint) {
        self.start_node_at(cp, SyntaxKind::ALIAS_STATEMENT);

        self.bump(); // alias
        self.expect_name();
        if self.at(SyntaxKind::LT) {
            self.parse_template_parameters();
        }
        self.expect(SyntaxKind::EQ, ErrorCode::E0901);
        self.parse_expression();
        self.expect(SyntaxKind::SEMICOLON, ErrorCode::E0201);

        self.finish_node();
    }

    /// AugmentDecorator = '@@' MemberPath DecoratorArguments?
    ///
    /// Deliberately no trailing terminator; a following `;` parses as an
    /// empty statement.
    fn parse_augment_decorator_statement(&mut self, cp: Checkpoint) {
        self.start_node_at(cp, SyntaxKind::AUGMENT_DECORATOR_STATEMENT);

        self.bump(); // @@
        self.parse_member_path();
        if self.at(SyntaxKind::L_PAREN) {
            self.parse_decorator_arguments();
        }

        self.finish_node();
    }

    /// Operation = DecoratorList? 'op' Name TemplateParameters?
    ///             OperationSignature ';'
    fn parse_operation_statement(&mut self, cp: Checkpoint) {
        self.start_node_at(cp, SyntaxKind::OPERATION_STATEMENT);

        self.bump(); // op
        self.expect_name();
        if self.at(SyntaxKind::LT) {
            self.parse_template_parameters();
        }
        self.parse_operation_signature();
        self.expect(SyntaxKind::SEMICOLON, ErrorCode::E0201);

        self.finish_node();
    }

    /// OperationSignature = '(' ModelProperty* ')' ':' Expression
    ///                    | 'is' ReferenceExpression
    fn parse_operation_signature(&mut self) {
        if self.at(SyntaxKind::L_PAREN) {
            self.start_node(SyntaxKind::OPERATION_SIGNATURE_DECLARATION);
            self.bump(); // (
            self.push_context(ParseContext::ParameterList);

            loop {
                if self.at_eof() || self.at(SyntaxKind::R_PAREN) {
                    break;
                }
                let kind = self.current_kind();
                if kind == SyntaxKind::ELLIPSIS
                    || kind == SyntaxKind::AT
                    || kind.is_name()
                    || kind.is_string_literal()
                {
                    self.parse_model_property();
                } else {
                    self.error_recover(
                        "expected parameter",
                        ErrorCode::E0901,
                        &[SyntaxKind::R_PAREN, SyntaxKind::R_BRACE],
                    );
                }
            }

            self.pop_context();
            self.expect(SyntaxKind::R_PAREN, ErrorCode::E0203);
            self.expect(SyntaxKind::COLON, ErrorCode::E0303);
            self.parse_expression();
            self.finish_node();
        } else if self.at(SyntaxKind::IS_KW) {
            self.start_node(SyntaxKind::OPERATION_SIGNATURE_REFERENCE);
            self.bump(); // is
            self.parse_reference_expression_required();
            self.finish_node();
        } else {
            self.error("expected '(' or 'is' in operation signature", ErrorCode::E0304);
        }
    }

    // =========================================================================
    // Decorators
    // =========================================================================

    /// DecoratorList = Decorator+
    fn parse_decorator_list(&mut self) {
        self.start_node(SyntaxKind::DECORATOR_LIST);
        while self.at(SyntaxKind::AT) {
            self.parse_decorator();
        }
        self.finish_node();
    }

    /// Decorator = '@' MemberPath DecoratorArguments?
    fn parse_decorator(&mut self) {
        self.start_node(SyntaxKind::DECORATOR);
        self.bump(); // @
        self.parse_member_path();
        if self.at(SyntaxKind::L_PAREN) {
            self.parse_decorator_arguments();
        }
        self.finish_node();
    }

    /// DecoratorArguments = '(' ExpressionList? ')'
    fn parse_decorator_arguments(&mut self) {
        self.start_node(SyntaxKind::DECORATOR_ARGUMENTS);
        self.bump(); // (
        self.push_context(ParseContext::DecoratorArguments);
        if !self.at(SyntaxKind::R_PAREN) && !self.at_eof() {
            self.parse_expression_list();
        }
        self.pop_context();
        self.expect(SyntaxKind::R_PAREN, ErrorCode::E0203);
        self.finish_node();
    }

    // =========================================================================
    // Names & templates
    // =========================================================================

    /// MemberPath = Name ('.' Name)*
    ///
    /// A dotted path becomes a MEMBER_EXPRESSION node; a single segment stays
    /// a bare identifier token.
    fn parse_member_path(&mut self) {
        let cp = self.checkpoint();
        if !self.eat_name() {
            self.error("expected identifier", ErrorCode::E0301);
            return;
        }
        if self.at(SyntaxKind::DOT) {
            self.start_node_at(cp, SyntaxKind::MEMBER_EXPRESSION);
            while self.eat(SyntaxKind::DOT) {
                if !self.eat_name() {
                    self.error("expected identifier after '.'", ErrorCode::E0301);
                    break;
                }
            }
            self.finish_node();
        }
    }

    /// TemplateParameters = '<' TemplateParameterList '>'
    ///
    /// Declaration-site entry point; no trailing comma.
    fn parse_template_parameters(&mut self) {
        self.start_node(SyntaxKind::TEMPLATE_PARAMETERS);
        self.bump(); // <
        self.push_context(ParseContext::TemplateParameterList);

        self.start_node(SyntaxKind::TEMPLATE_PARAMETER_LIST);
        self.parse_template_parameter();
        while self.eat(SyntaxKind::COMMA) {
            self.parse_template_parameter();
        }
        self.finish_node();

        self.pop_context();
        self.expect(SyntaxKind::GT, ErrorCode::E0205);
        self.finish_node();
    }

    /// TemplateParameter = Name TemplateConstraint? TemplateDefault?
    fn parse_template_parameter(&mut self) {
        self.start_node(SyntaxKind::TEMPLATE_PARAMETER);
        self.expect_name();
        if self.at(SyntaxKind::EXTENDS_KW) {
            self.start_node(SyntaxKind::TEMPLATE_CONSTRAINT);
            self.bump();
            self.parse_expression();
            self.finish_node();
        }
        if self.at(SyntaxKind::EQ) {
            self.start_node(SyntaxKind::TEMPLATE_DEFAULT);
            self.bump();
            self.parse_expression();
            self.finish_node();
        }
        self.finish_node();
    }

    /// TemplateArguments = '<' ExpressionList '>'
    ///
    /// Use-site entry point, selected purely by reference context.
    fn parse_template_arguments(&mut self) {
        self.start_node(SyntaxKind::TEMPLATE_ARGUMENTS);
        self.bump(); // <
        self.push_context(ParseContext::TemplateArgumentList);
        if self.at(SyntaxKind::GT) {
            self.error("expected template arguments", ErrorCode::E0401);
        } else {
            self.parse_expression_list();
        }
        self.pop_context();
        self.expect(SyntaxKind::GT, ErrorCode::E0205);
        self.finish_node();
    }

    // =========================================================================
    // Expression grammar (precedence climbing, tightest to loosest:
    // array suffix, valueof, '&', '|')
    // =========================================================================

    fn parse_expression(&mut self) {
        self.push_context(ParseContext::Expression);
        self.parse_union_expression();
        self.pop_context();
    }

    /// UnionExpression = Expression? '|' Expression (left-associative)
    ///
    /// The left operand may be absent only here, at the expression entry
    /// point, so in-progress input like `alias X = | A;` still parses.
    fn parse_union_expression(&mut self) {
        let cp = self.checkpoint();
        if !self.at(SyntaxKind::PIPE) {
            self.parse_intersection_expression(true);
        }
        while self.at(SyntaxKind::PIPE) {
            self.start_node_at(cp, SyntaxKind::UNION_EXPRESSION);
            self.bump(); // |
            self.parse_intersection_expression(false);
            self.finish_node();
        }
    }

    /// IntersectionExpression = Expression? '&' Expression (left-associative)
    fn parse_intersection_expression(&mut self, at_entry: bool) {
        let cp = self.checkpoint();
        if !(at_entry && self.at(SyntaxKind::AMP)) {
            self.parse_value_of_expression();
        }
        while self.at(SyntaxKind::AMP) {
            self.start_node_at(cp, SyntaxKind::INTERSECTION_EXPRESSION);
            self.bump(); // &
            self.parse_value_of_expression();
            self.finish_node();
        }
    }

    /// ValueOfExpression = 'valueof' ValueOfExpression | ArrayOrPrimary
    fn parse_value_of_expression(&mut self) {
        if self.at(SyntaxKind::VALUEOF_KW) {
            self.start_node(SyntaxKind::VALUE_OF_EXPRESSION);
            self.bump();
            self.parse_value_of_expression();
            self.finish_node();
        } else {
            self.parse_array_or_primary();
        }
    }

    /// ArrayExpression = PrimaryExpression ('[' ']')*
    ///
    /// A bare `[ ]` pair directly after a complete primary is the postfix
    /// array suffix; any other `[` starts a tuple only in primary position.
    fn parse_array_or_primary(&mut self) {
        let cp = self.checkpoint();
        self.parse_primary_expression();
        while self.at(SyntaxKind::L_BRACKET) && self.nth(1) == SyntaxKind::R_BRACKET {
            self.start_node_at(cp, SyntaxKind::ARRAY_EXPRESSION);
            self.bump(); // [
            self.bump(); // ]
            self.finish_node();
        }
    }

    /// PrimaryExpression = Literal | ReferenceExpression | Parenthesized
    ///                   | ModelExpression | TupleExpression
    fn parse_primary_expression(&mut self) {
        let kind = self.current_kind();
        if kind.is_literal_token() {
            self.start_node(SyntaxKind::LITERAL);
            if kind.is_string_literal() {
                self.bump_string();
            } else {
                self.bump();
            }
            self.finish_node();
        } else if kind == SyntaxKind::L_PAREN {
            self.start_node(SyntaxKind::PARENTHESIZED_EXPRESSION);
            self.bump(); // (
            self.parse_expression();
            self.expect(SyntaxKind::R_PAREN, ErrorCode::E0203);
            self.finish_node();
        } else if kind == SyntaxKind::L_BRACE {
            self.parse_model_expression();
        } else if kind == SyntaxKind::L_BRACKET {
            self.start_node(SyntaxKind::TUPLE_EXPRESSION);
            self.bump(); // [
            self.push_context(ParseContext::Tuple);
            if !self.at(SyntaxKind::R_BRACKET) && !self.at_eof() {
                self.parse_expression_list();
            }
            self.pop_context();
            self.expect(SyntaxKind::R_BRACKET, ErrorCode::E0204);
            self.finish_node();
        } else if kind.is_name() {
            self.parse_reference_expression();
        } else if kind == SyntaxKind::ERROR && !self.at_eof() {
            self.bump_lex_error();
        } else {
            self.error("expected expression", ErrorCode::E0401);
        }
    }

    /// ReferenceExpression = MemberPath TemplateArguments?
    fn parse_reference_expression(&mut self) {
        self.start_node(SyntaxKind::REFERENCE_EXPRESSION);
        self.parse_member_path();
        if self.at(SyntaxKind::LT) {
            self.parse_template_arguments();
        }
        self.finish_node();
    }

    fn parse_reference_expression_required(&mut self) {
        if self.current_kind().is_name() {
            self.parse_reference_expression();
        } else {
            self.error("expected reference", ErrorCode::E0402);
        }
    }

    /// ReferenceExpressionList = ReferenceExpression (',' ReferenceExpression)* ','?
    fn parse_reference_expression_list(&mut self) {
        self.start_node(SyntaxKind::REFERENCE_EXPRESSION_LIST);
        self.parse_reference_expression_required();
        while self.eat(SyntaxKind::COMMA) {
            if !self.current_kind().is_name() {
                break; // trailing comma
            }
            self.parse_reference_expression();
        }
        self.finish_node();
    }

    /// ExpressionList = Expression (',' Expression)* ','?
    fn parse_expression_list(&mut self) {
        self.start_node(SyntaxKind::EXPRESSION_LIST);
        self.parse_expression();
        while self.eat(SyntaxKind::COMMA) {
            if !self.at_expression_start() {
                break; // trailing comma
            }
            self.parse_expression();
        }
        self.finish_node();
    }
}

/// Display name for a token kind in "expected ..." messages
fn token_name(kind: SyntaxKind) -> &'static str {
    match kind {
        SyntaxKind::SEMICOLON => "';'",
        SyntaxKind::COLON => "':'",
        SyntaxKind::COMMA => "','",
        SyntaxKind::EQ => "'='",
        SyntaxKind::L_BRACE => "'{'",
        SyntaxKind::R_BRACE => "'}'",
        SyntaxKind::L_PAREN => "'('",
        SyntaxKind::R_PAREN => "')'",
        SyntaxKind::L_BRACKET => "'['",
        SyntaxKind::R_BRACKET => "']'",
        SyntaxKind::LT => "'<'",
        SyntaxKind::GT => "'>'",
        _ => "token",
    }
}
