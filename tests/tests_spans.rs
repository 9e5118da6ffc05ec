//! Parser Tests - Spans and Losslessness
//!
//! Node ranges must cover exactly the matched source text, the tree must
//! reproduce the input byte-for-byte, and trivia must not change tree shape.

use rstest::rstest;
use tsp_syntax::parser::{AstNode, SourceFile, Statement, SyntaxKind, parse};
use tsp_syntax::{LineCol, LineIndex, TextRange};

fn source_file(input: &str) -> SourceFile {
    SourceFile::cast(parse(input).syntax()).unwrap()
}

// ============================================================================
// Lossless round trip
// ============================================================================

#[rstest]
#[case("")]
#[case("   \n\t  ")]
#[case("// just a comment\n")]
#[case("/* block */ model M {} // trailing\n")]
#[case("namespace P {\n  // inner\n  model A {}\n}\n")]
#[case("model M {\n  a: string; /* mid */ b: int32\n}")]
#[case("model Broken; @@aug(X) enum E {} garbage here")]
fn test_tree_text_matches_input(#[case] input: &str) {
    let result = parse(input);
    assert_eq!(result.syntax().text().to_string(), input);
}

// ============================================================================
// Exact node ranges
// ============================================================================

#[test]
fn test_statement_range_excludes_surrounding_trivia() {
    let input = "  model Pet {}  \n";
    let file = source_file(input);
    let model = file.statements().next().unwrap();
    let range = model.syntax().text_range();
    assert_eq!(&input[range], "model Pet {}");
}

#[test]
fn test_ranges_with_interleaved_comments() {
    let input = "// header\nmodel A {} /* between */ enum B { X }\n";
    let file = source_file(input);
    let ranges: Vec<_> = file
        .statements()
        .map(|s| {
            let range = s.syntax().text_range();
            input[range].to_string()
        })
        .collect();
    assert_eq!(ranges, vec!["model A {}", "enum B { X }"]);
}

#[test]
fn test_property_range_is_exact() {
    let input = "model M {   name: string ,  other: int32   }";
    let file = source_file(input);
    let Some(Statement::Model(model)) = file.statements().next() else {
        panic!("expected model statement");
    };
    let texts: Vec<_> = model
        .body()
        .unwrap()
        .body()
        .unwrap()
        .properties()
        .map(|p| input[p.syntax().text_range()].to_string())
        .collect();
    // The optional separator belongs to the property, trivia does not
    assert_eq!(texts, vec!["name: string ,", "other: int32"]);
}

#[test]
fn test_expression_range_is_exact() {
    let input = "alias X =  A | B ;";
    let file = source_file(input);
    let Some(Statement::Alias(alias)) = file.statements().next() else {
        panic!("expected alias statement");
    };
    let range = alias.value().unwrap().syntax().text_range();
    assert_eq!(&input[range], "A | B");
}

#[test]
fn test_error_range_points_at_offending_token() {
    let input = "model M { broken }";
    let result = parse(input);
    assert!(!result.ok());
    let range = result.errors[0].range;
    assert_eq!(&input[range], "}");
}

#[test]
fn test_error_at_end_of_file_has_empty_range() {
    let input = "using P";
    let result = parse(input);
    assert!(!result.ok());
    assert_eq!(
        result.errors[0].range,
        TextRange::empty((input.len() as u32).into())
    );
}

// ============================================================================
// Trivia insensitivity
// ============================================================================

/// Preorder traversal of the tree with trivia tokens removed
fn significant_shape(input: &str) -> Vec<(SyntaxKind, Option<String>)> {
    parse(input)
        .syntax()
        .preorder_with_tokens()
        .filter_map(|event| match event {
            rowan::WalkEvent::Enter(element) => Some(element),
            rowan::WalkEvent::Leave(_) => None,
        })
        .filter_map(|element| match element {
            rowan::NodeOrToken::Node(node) => Some((node.kind(), None)),
            rowan::NodeOrToken::Token(token) => {
                if token.kind().is_trivia() {
                    None
                } else {
                    Some((token.kind(), Some(token.text().to_string())))
                }
            }
        })
        .collect()
}

#[rstest]
#[case(
    "model Pet { name: string; age: int32 }",
    "model Pet {\n  // the name\n  name: string;\n\n  /* age */ age: int32\n}"
)]
#[case("alias X=A|B&C;", "alias X = A | B & C ;")]
#[case(
    "@doc(\"d\")@get op list():Pet[];",
    "@doc(\"d\")\n@get\nop list(): Pet[] ;"
)]
fn test_trivia_does_not_change_shape(#[case] compact: &str, #[case] spaced: &str) {
    assert!(parse(compact).ok());
    assert!(parse(spaced).ok());
    assert_eq!(significant_shape(compact), significant_shape(spaced));
}

// ============================================================================
// Line/column conversion over parse results
// ============================================================================

#[test]
fn test_error_position_in_line_col() {
    let input = "model A {}\nmodel M { broken }\n";
    let result = parse(input);
    assert!(!result.ok());
    let index = LineIndex::new(input);
    let position = index.line_col(result.errors[0].range.start());
    assert_eq!(position, LineCol { line: 1, col: 17 });
}
