use smol_str::SmolStr;

use super::*;

// ============================================================================
// Expressions
// ============================================================================

/// Any type or value expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    Union(UnionExpression),
    Intersection(IntersectionExpression),
    ValueOf(ValueOfExpression),
    Array(ArrayExpression),
    Tuple(TupleExpression),
    Model(ModelExpression),
    Reference(ReferenceExpression),
    Parenthesized(ParenthesizedExpression),
    Literal(Literal),
}

impl AstNode for Expression {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::UNION_EXPRESSION
                | SyntaxKind::INTERSECTION_EXPRESSION
                | SyntaxKind::VALUE_OF_EXPRESSION
                | SyntaxKind::ARRAY_EXPRESSION
                | SyntaxKind::TUPLE_EXPRESSION
                | SyntaxKind::MODEL_EXPRESSION
                | SyntaxKind::REFERENCE_EXPRESSION
                | SyntaxKind::PARENTHESIZED_EXPRESSION
                | SyntaxKind::LITERAL
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        let expression = match node.kind() {
            SyntaxKind::UNION_EXPRESSION => Self::Union(UnionExpression(node)),
            SyntaxKind::INTERSECTION_EXPRESSION => {
                Self::Intersection(IntersectionExpression(node))
            }
            SyntaxKind::VALUE_OF_EXPRESSION => Self::ValueOf(ValueOfExpression(node)),
            SyntaxKind::ARRAY_EXPRESSION => Self::Array(ArrayExpression(node)),
            SyntaxKind::TUPLE_EXPRESSION => Self::Tuple(TupleExpression(node)),
            SyntaxKind::MODEL_EXPRESSION => Self::Model(ModelExpression(node)),
            SyntaxKind::REFERENCE_EXPRESSION => Self::Reference(ReferenceExpression(node)),
            SyntaxKind::PARENTHESIZED_EXPRESSION => {
                Self::Parenthesized(ParenthesizedExpression(node))
            }
            SyntaxKind::LITERAL => Self::Literal(Literal(node)),
            _ => return None,
        };
        Some(expression)
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Union(e) => e.syntax(),
            Self::Intersection(e) => e.syntax(),
            Self::ValueOf(e) => e.syntax(),
            Self::Array(e) => e.syntax(),
            Self::Tuple(e) => e.syntax(),
            Self::Model(e) => e.syntax(),
            Self::Reference(e) => e.syntax(),
            Self::Parenthesized(e) => e.syntax(),
            Self::Literal(e) => e.syntax(),
        }
    }
}

/// Split a binary expression node into operands before and after the
/// operator token. The left operand may be absent.
fn split_at_operator(node: &SyntaxNode, operator: SyntaxKind) -> (Option<Expression>, Option<Expression>) {
    let mut lhs = None;
    let mut rhs = None;
    let mut seen_operator = false;
    for element in node.children_with_tokens() {
        match element {
            rowan::NodeOrToken::Token(token) if token.kind() == operator => {
                seen_operator = true;
            }
            rowan::NodeOrToken::Node(child) => {
                if let Some(expression) = Expression::cast(child) {
                    if seen_operator {
                        rhs = Some(expression);
                        break;
                    }
                    lhs = Some(expression);
                }
            }
            _ => {}
        }
    }
    (lhs, rhs)
}

ast_node!(UnionExpression, UNION_EXPRESSION);
ast_node!(IntersectionExpression, INTERSECTION_EXPRESSION);
ast_node!(ValueOfExpression, VALUE_OF_EXPRESSION);
ast_node!(ArrayExpression, ARRAY_EXPRESSION);
ast_node!(TupleExpression, TUPLE_EXPRESSION);
ast_node!(ModelExpression, MODEL_EXPRESSION);
ast_node!(ReferenceExpression, REFERENCE_EXPRESSION);
ast_node!(ParenthesizedExpression, PARENTHESIZED_EXPRESSION);
ast_node!(Literal, LITERAL);
ast_node!(ExpressionList, EXPRESSION_LIST);
ast_node!(TemplateArguments, TEMPLATE_ARGUMENTS);
ast_node!(MemberExpression, MEMBER_EXPRESSION);

impl UnionExpression {
    /// Left operand; `None` for an in-progress `| A` variant
    pub fn lhs(&self) -> Option<Expression> {
        split_at_operator(&self.0, SyntaxKind::PIPE).0
    }

    pub fn rhs(&self) -> Option<Expression> {
        split_at_operator(&self.0, SyntaxKind::PIPE).1
    }
}

impl IntersectionExpression {
    /// Left operand; `None` for an in-progress `& A` variant
    pub fn lhs(&self) -> Option<Expression> {
        split_at_operator(&self.0, SyntaxKind::AMP).0
    }

    pub fn rhs(&self) -> Option<Expression> {
        split_at_operator(&self.0, SyntaxKind::AMP).1
    }
}

impl ValueOfExpression {
    first_child_method!(inner, Expression);
}

impl ArrayExpression {
    first_child_method!(element_type, Expression);
}

impl TupleExpression {
    /// Element expressions in order
    pub fn elements(&self) -> impl Iterator<Item = Expression> + '_ {
        self.0
            .children()
            .filter_map(ExpressionList::cast)
            .flat_map(|list| list.expressions().collect::<Vec<_>>())
    }
}

impl ModelExpression {
    first_child_method!(body, ModelBody);
}

impl ParenthesizedExpression {
    first_child_method!(inner, Expression);
}

impl ExpressionList {
    children_method!(expressions, Expression);
}

impl ReferenceExpression {
    first_child_method!(template_arguments, TemplateArguments);

    /// The referenced path, e.g. `TypeSpec.int32`
    pub fn path(&self) -> Option<SmolStr> {
        if let Some(member) = self.0.children().find_map(MemberExpression::cast) {
            return Some(member.path());
        }
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind().is_name())
            .map(|t| super::name_token_text(&t))
    }
}

impl TemplateArguments {
    /// Argument expressions in order
    pub fn arguments(&self) -> impl Iterator<Item = Expression> + '_ {
        self.0
            .children()
            .filter_map(ExpressionList::cast)
            .flat_map(|list| list.expressions().collect::<Vec<_>>())
    }
}

impl MemberExpression {
    /// Path segments in order, delimiters stripped
    pub fn segments(&self) -> impl Iterator<Item = SmolStr> + '_ {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind().is_name())
            .map(|t| super::name_token_text(&t))
    }

    /// The full dotted path as written, e.g. `Pets.Api.Pet`
    pub fn path(&self) -> SmolStr {
        let mut path = String::new();
        for (i, segment) in self.segments().enumerate() {
            if i > 0 {
                path.push('.');
            }
            path.push_str(&segment);
        }
        SmolStr::new(path)
    }
}

// ============================================================================
// Literals
// ============================================================================

/// The lexical class of a literal expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Boolean,
    Decimal,
    HexInteger,
    BinaryInteger,
    String,
}

impl Literal {
    fn token(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| !t.kind().is_trivia())
    }

    pub fn kind(&self) -> Option<LiteralKind> {
        let kind = match self.token()?.kind() {
            SyntaxKind::TRUE_KW | SyntaxKind::FALSE_KW => LiteralKind::Boolean,
            SyntaxKind::DECIMAL_LITERAL => LiteralKind::Decimal,
            SyntaxKind::HEX_INTEGER_LITERAL => LiteralKind::HexInteger,
            SyntaxKind::BINARY_INTEGER_LITERAL => LiteralKind::BinaryInteger,
            SyntaxKind::QUOTED_STRING_LITERAL | SyntaxKind::TRIPLE_QUOTED_STRING_LITERAL => {
                LiteralKind::String
            }
            _ => return None,
        };
        Some(kind)
    }

    /// The literal's source text, delimiters included
    pub fn text(&self) -> Option<SmolStr> {
        self.token().map(|t| SmolStr::new(t.text()))
    }

    /// For string literals, the unescaped value
    pub fn string_value(&self) -> Option<String> {
        let token = self.token()?;
        if token.kind().is_string_literal() {
            Some(unescape_string_literal(token.text()))
        } else {
            None
        }
    }

    pub fn boolean_value(&self) -> Option<bool> {
        match self.token()?.kind() {
            SyntaxKind::TRUE_KW => Some(true),
            SyntaxKind::FALSE_KW => Some(false),
            _ => None,
        }
    }
}

// ============================================================================
// String escape handling
// ============================================================================

/// Decode a string literal token into its value.
///
/// Accepts both `"..."` and `"""..."""` forms and strips the delimiters.
/// Recognized escapes are `\"`, `\\`, `\r`, `\n`, `\t` and `` \` ``;
/// an unrecognized escape is kept verbatim (the parser has already
/// reported it).
pub fn unescape_string_literal(text: &str) -> String {
    let inner = if let Some(stripped) = text
        .strip_prefix(r#"""""#)
        .and_then(|t| t.strip_suffix(r#"""""#))
    {
        stripped
    } else {
        text.strip_prefix('"')
            .and_then(|t| t.strip_suffix('"'))
            .unwrap_or(text)
    };

    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => value.push('"'),
            Some('\\') => value.push('\\'),
            Some('r') => value.push('\r'),
            Some('n') => value.push('\n'),
            Some('t') => value.push('\t'),
            Some('`') => value.push('`'),
            Some(other) => {
                value.push('\\');
                value.push(other);
            }
            None => value.push('\\'),
        }
    }
    value
}

/// Encode a value as a quoted string literal, escaping as needed.
///
/// Inverse of [`unescape_string_literal`] for the quoted form:
/// `unescape_string_literal(&escape_string_value(v)) == v` for any `v`.
pub fn escape_string_value(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');
    for c in value.chars() {
        match c {
            '"' => literal.push_str("\\\""),
            '\\' => literal.push_str("\\\\"),
            '\r' => literal.push_str("\\r"),
            '\n' => literal.push_str("\\n"),
            '\t' => literal.push_str("\\t"),
            _ => literal.push(c),
        }
    }
    literal.push('"');
    literal
}
