//! Parser Tests - Expressions
//!
//! Operator precedence, array suffixes, valueof, tuples, template
//! arguments, and literal forms.

use rstest::rstest;
use tsp_syntax::parser::{
    AstNode, Expression, LiteralKind, SourceFile, Statement, parse,
};

fn parses(input: &str) -> bool {
    parse(input).ok()
}

/// Parse `alias X = <expr>;` and return the aliased expression
fn alias_value(expression: &str) -> Expression {
    let input = format!("alias X = {expression};");
    let result = parse(&input);
    assert!(result.ok(), "Failed to parse `{}`: {:?}", input, result.errors);
    let file = SourceFile::cast(result.syntax()).unwrap();
    let Some(Statement::Alias(alias)) = file.statements().next() else {
        panic!("expected alias statement");
    };
    alias.value().expect("alias has a value")
}

// ============================================================================
// Precedence
// ============================================================================

#[test]
fn test_union_binds_looser_than_intersection() {
    // A | B & C parses as A | (B & C)
    let Expression::Union(union) = alias_value("A | B & C") else {
        panic!("expected union at the root");
    };
    assert!(matches!(union.lhs(), Some(Expression::Reference(_))));
    assert!(matches!(union.rhs(), Some(Expression::Intersection(_))));
}

#[test]
fn test_union_is_left_associative() {
    // A | B | C parses as (A | B) | C
    let Expression::Union(outer) = alias_value("A | B | C") else {
        panic!("expected union at the root");
    };
    let Some(Expression::Union(inner)) = outer.lhs() else {
        panic!("expected nested union on the left");
    };
    assert!(matches!(inner.lhs(), Some(Expression::Reference(_))));
    assert!(matches!(inner.rhs(), Some(Expression::Reference(_))));
    assert!(matches!(outer.rhs(), Some(Expression::Reference(_))));
}

#[test]
fn test_intersection_is_left_associative() {
    let Expression::Intersection(outer) = alias_value("A & B & C") else {
        panic!("expected intersection at the root");
    };
    assert!(matches!(outer.lhs(), Some(Expression::Intersection(_))));
}

#[test]
fn test_parentheses_override_precedence() {
    // (A | B) & C keeps the union inside the parens
    let Expression::Intersection(intersection) = alias_value("(A | B) & C") else {
        panic!("expected intersection at the root");
    };
    let Some(Expression::Parenthesized(parens)) = intersection.lhs() else {
        panic!("expected parenthesized lhs");
    };
    assert!(matches!(parens.inner(), Some(Expression::Union(_))));
}

#[test]
fn test_array_binds_tighter_than_intersection() {
    // A[] & B parses as (A[]) & B
    let Expression::Intersection(intersection) = alias_value("A[] & B") else {
        panic!("expected intersection at the root");
    };
    assert!(matches!(intersection.lhs(), Some(Expression::Array(_))));
}

#[test]
fn test_postfix_binds_tightest() {
    // A | B[] parses as A | (B[])
    let Expression::Union(union) = alias_value("A | B[]") else {
        panic!("expected union at the root");
    };
    assert!(matches!(union.lhs(), Some(Expression::Reference(_))));
    assert!(matches!(union.rhs(), Some(Expression::Array(_))));
}

#[test]
fn test_valueof_binds_looser_than_array() {
    // valueof string[] parses as valueof (string[])
    let Expression::ValueOf(value_of) = alias_value("valueof string[]") else {
        panic!("expected valueof at the root");
    };
    assert!(matches!(value_of.inner(), Some(Expression::Array(_))));
}

#[test]
fn test_union_of_valueof() {
    // valueof A | valueof B parses as (valueof A) | (valueof B)
    let Expression::Union(union) = alias_value("valueof A | valueof B") else {
        panic!("expected union at the root");
    };
    assert!(matches!(union.lhs(), Some(Expression::ValueOf(_))));
    assert!(matches!(union.rhs(), Some(Expression::ValueOf(_))));
}

// ============================================================================
// Missing left operands (entry position only)
// ============================================================================

#[rstest]
#[case("| A")]
#[case("| A | B")]
#[case("& A")]
fn test_leading_operator_tolerated(#[case] expression: &str) {
    let input = format!("alias X = {expression};");
    assert!(parses(&input), "Failed to parse: {}", input);
}

#[test]
fn test_leading_union_has_no_lhs() {
    let Expression::Union(union) = alias_value("| A") else {
        panic!("expected union at the root");
    };
    assert!(union.lhs().is_none());
    assert!(matches!(union.rhs(), Some(Expression::Reference(_))));
}

#[test]
fn test_doubled_operator_is_error() {
    // Nested positions require a right operand
    assert!(!parses("alias X = A | | B;"));
    assert!(!parses("alias X = A & & B;"));
}

// ============================================================================
// Arrays and tuples
// ============================================================================

#[test]
fn test_nested_array_suffix() {
    let Expression::Array(outer) = alias_value("string[][]") else {
        panic!("expected array at the root");
    };
    assert!(matches!(outer.element_type(), Some(Expression::Array(_))));
}

#[rstest]
#[case("[]", 0)]
#[case("[string]", 1)]
#[case("[string, int32]", 2)]
#[case("[string, int32, ]", 2)]
#[case("[[A], [B]]", 2)]
fn test_tuple_elements(#[case] expression: &str, #[case] count: usize) {
    let Expression::Tuple(tuple) = alias_value(expression) else {
        panic!("expected tuple for: {}", expression);
    };
    assert_eq!(tuple.elements().count(), count);
}

// ============================================================================
// References and template arguments
// ============================================================================

#[test]
fn test_reference_with_template_arguments() {
    let Expression::Reference(reference) = alias_value("Box<string>") else {
        panic!("expected reference at the root");
    };
    assert_eq!(reference.path().as_deref(), Some("Box"));
    let arguments: Vec<_> = reference
        .template_arguments()
        .unwrap()
        .arguments()
        .collect();
    assert_eq!(arguments.len(), 1);
    assert!(matches!(arguments[0], Expression::Reference(_)));
}

#[rstest]
#[case("Box<T>")]
#[case("Map<string, int32>")]
#[case("Map<string, int32, >")]
#[case("Outer<Inner<T>>")]
#[case("Pets.Api.Pet")]
#[case("Paged<Pets.Api.Pet[]>")]
fn test_reference_forms(#[case] expression: &str) {
    let input = format!("alias X = {expression};");
    assert!(parses(&input), "Failed to parse: {}", input);
}

#[test]
fn test_dotted_reference_path() {
    let Expression::Reference(reference) = alias_value("Pets.Api.Pet") else {
        panic!("expected reference at the root");
    };
    assert_eq!(reference.path().as_deref(), Some("Pets.Api.Pet"));
}

#[test]
fn test_empty_template_arguments_is_error() {
    assert!(!parses("alias X = Box<>;"));
}

// ============================================================================
// Literals
// ============================================================================

#[rstest]
#[case("0", LiteralKind::Decimal)]
#[case("-0", LiteralKind::Decimal)]
#[case("+7", LiteralKind::Decimal)]
#[case("3.14", LiteralKind::Decimal)]
#[case("1e10", LiteralKind::Decimal)]
#[case("12e+3", LiteralKind::Decimal)]
#[case("2.5e-1", LiteralKind::Decimal)]
#[case("0x1F", LiteralKind::HexInteger)]
#[case("0b101", LiteralKind::BinaryInteger)]
#[case("true", LiteralKind::Boolean)]
#[case("false", LiteralKind::Boolean)]
#[case("\"text\"", LiteralKind::String)]
#[case("\"\"\"multi\nline\"\"\"", LiteralKind::String)]
fn test_literal_kinds(#[case] expression: &str, #[case] kind: LiteralKind) {
    let Expression::Literal(literal) = alias_value(expression) else {
        panic!("expected literal for: {}", expression);
    };
    assert_eq!(literal.kind(), Some(kind));
}

#[rstest]
// Leading zeros, bare exponents, and trailing dots do not lex as one number
#[case("alias X = 01;")]
#[case("alias X = 1e;")]
#[case("alias X = 3.;")]
#[case("alias X = .5;")]
#[case("alias X = 0x;")]
#[case("alias X = 0b;")]
fn test_malformed_numbers_rejected(#[case] input: &str) {
    assert!(!parses(input), "Expected error for: {}", input);
}

#[test]
fn test_boolean_value() {
    let Expression::Literal(literal) = alias_value("true") else {
        panic!("expected literal");
    };
    assert_eq!(literal.boolean_value(), Some(true));
}

#[test]
fn test_string_literal_unescaped_value() {
    let Expression::Literal(literal) = alias_value(r#""line\none""#) else {
        panic!("expected literal");
    };
    assert_eq!(literal.string_value().as_deref(), Some("line\none"));
}

#[rstest]
#[case(r#""plain""#)]
#[case(r#""with \"quotes\"""#)]
#[case(r#""tab\there\nand newline""#)]
fn test_string_literal_round_trip(#[case] source: &str) {
    use tsp_syntax::parser::{escape_string_value, unescape_string_literal};
    // Decoding then re-encoding reproduces the original literal text
    assert_eq!(escape_string_value(&unescape_string_literal(source)), source);
}

// ============================================================================
// Model expressions in type position
// ============================================================================

#[rstest]
#[case("{ name: string }")]
#[case("{}")]
#[case("{ a: string, b: { c: int32 } }")]
#[case("{ ...Base }")]
fn test_model_expression(#[case] expression: &str) {
    let input = format!("alias X = {expression};");
    assert!(parses(&input), "Failed to parse: {}", input);
}
