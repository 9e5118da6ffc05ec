//! Parser Tests - Statements
//!
//! Top-level statement forms: namespaces, imports, using, scalars,
//! interfaces, aliases, operations, augment decorators.

use rstest::rstest;
use tsp_syntax::parser::{AstNode, ErrorCode, SourceFile, Statement, parse};

fn parses(input: &str) -> bool {
    parse(input).ok()
}

fn source_file(input: &str) -> SourceFile {
    SourceFile::cast(parse(input).syntax()).unwrap()
}

// ============================================================================
// Namespaces
// ============================================================================

#[rstest]
#[case("namespace Pets;")]
#[case("namespace Pets.Api.V2;")]
#[case("namespace Pets {}")]
#[case("namespace Pets { model Pet {} }")]
#[case("@service namespace Pets { namespace Inner { scalar id extends string; } }")]
fn test_namespace(#[case] input: &str) {
    assert!(parses(input), "Failed to parse: {}", input);
}

#[test]
fn test_file_scoped_namespace_shape() {
    let file = source_file("namespace Pets.Api;");
    let Some(Statement::Namespace(ns)) = file.statements().next() else {
        panic!("expected namespace statement");
    };
    assert!(ns.is_file_scoped());
    assert_eq!(ns.path().as_deref(), Some("Pets.Api"));
}

#[test]
fn test_namespace_body_statement_count() {
    let file = source_file("namespace P { model A {} model B {} enum C { X } }");
    let Some(Statement::Namespace(ns)) = file.statements().next() else {
        panic!("expected namespace statement");
    };
    assert_eq!(ns.body().unwrap().statements().count(), 3);
}

// ============================================================================
// Imports and using
// ============================================================================

#[rstest]
#[case("import \"./library.tsp\";")]
#[case("import \"@typespec/http\";")]
#[case("using TypeSpec.Http;")]
#[case("using Single;")]
fn test_import_using(#[case] input: &str) {
    assert!(parses(input), "Failed to parse: {}", input);
}

#[test]
fn test_import_path_is_unescaped() {
    let file = source_file(r#"import "dir\\file.tsp";"#);
    let Some(Statement::Import(import)) = file.statements().next() else {
        panic!("expected import statement");
    };
    assert_eq!(import.path().as_deref(), Some("dir\\file.tsp"));
}

#[test]
fn test_using_path() {
    let file = source_file("using TypeSpec.Http;");
    let Some(Statement::Using(using)) = file.statements().next() else {
        panic!("expected using statement");
    };
    assert_eq!(using.path().as_deref(), Some("TypeSpec.Http"));
}

// ============================================================================
// Scalars
// ============================================================================

#[rstest]
#[case("scalar uuid;")]
#[case("scalar uuid extends string;")]
#[case("@secret scalar password extends string;")]
#[case("scalar Wrapper<T> extends T;")]
fn test_scalar(#[case] input: &str) {
    assert!(parses(input), "Failed to parse: {}", input);
}

// ============================================================================
// Interfaces
// ============================================================================

#[rstest]
#[case("interface Store {}")]
#[case("interface Store { get(id: string): Item; }")]
#[case("interface Store { op get(id: string): Item; op list(): Item[]; }")]
#[case("interface Store extends Readable {}")]
#[case("interface Store extends Readable, Writable, { }")]
#[case("interface Paged<T> { next(): T; }")]
#[case("interface Store { getAlias is get; }")]
fn test_interface(#[case] input: &str) {
    assert!(parses(input), "Failed to parse: {}", input);
}

#[test]
fn test_interface_member_names() {
    let file = source_file("interface S { op get(): A; put(x: B): C; op(): D; }");
    let Some(Statement::Interface(interface)) = file.statements().next() else {
        panic!("expected interface statement");
    };
    let names: Vec<_> = interface
        .body()
        .unwrap()
        .members()
        .filter_map(|m| m.name())
        .collect();
    // Third member is named `op`: no name follows, so the keyword is the name
    assert_eq!(names, vec!["get", "put", "op"]);
}

#[test]
fn test_interface_member_named_op_with_reference_signature() {
    // `op` here is the member name and `is X` its signature, not the prefix
    let result = parse("interface I { op is X; }");
    assert!(result.ok(), "errors: {:?}", result.errors);
    let file = SourceFile::cast(result.syntax()).unwrap();
    let Some(Statement::Interface(interface)) = file.statements().next() else {
        panic!("expected interface statement");
    };
    let names: Vec<_> = interface
        .body()
        .unwrap()
        .members()
        .filter_map(|m| m.name())
        .collect();
    assert_eq!(names, vec!["op"]);
}

#[rstest]
// The prefix reading still wins when a name follows `op`
#[case("interface I { op read is X; }")]
#[case("interface I { op is(): T; }")]
fn test_op_prefix_still_recognized(#[case] input: &str) {
    assert!(parses(input), "Failed to parse: {}", input);
}

// ============================================================================
// Operations
// ============================================================================

#[rstest]
#[case("op ping(): void;")]
#[case("op read(id: string): Pet;")]
#[case("op read(@path id: string, filter?: string): Pet | Error;")]
#[case("op readAlias is read;")]
#[case("op batch<T>(items: T[]): T[];")]
#[case("@get op list(): Pet[];")]
fn test_operation(#[case] input: &str) {
    assert!(parses(input), "Failed to parse: {}", input);
}

#[test]
fn test_operation_missing_signature() {
    let result = parse("op broken;");
    assert!(!result.ok());
    assert!(result.errors.iter().any(|e| e.code == ErrorCode::E0304));
}

// ============================================================================
// Aliases
// ============================================================================

#[rstest]
#[case("alias Id = string;")]
#[case("alias Pair<A, B> = [A, B];")]
#[case("alias Constrained<T extends string, U = int32> = T | U;")]
fn test_alias(#[case] input: &str) {
    assert!(parses(input), "Failed to parse: {}", input);
}

#[test]
fn test_alias_missing_value() {
    let result = parse("alias Id = ;");
    assert!(!result.ok());
    assert!(result.errors.iter().any(|e| e.code == ErrorCode::E0401));
}

// ============================================================================
// Augment decorators
// ============================================================================

#[rstest]
// No trailing terminator on augment decorator statements
#[case("@@doc(Pet, \"a pet\")")]
#[case("@@visibility(Pets.Pet.name, \"read\")")]
#[case("@@deprecated(Old)\nmodel New {}")]
fn test_augment_decorator(#[case] input: &str) {
    assert!(parses(input), "Failed to parse: {}", input);
}

#[test]
fn test_augment_followed_by_semicolon_is_empty_statement() {
    let file = source_file("@@doc(Pet, \"a pet\");");
    let statements: Vec<_> = file.statements().collect();
    assert_eq!(statements.len(), 2);
    assert!(matches!(statements[0], Statement::AugmentDecorator(_)));
    assert!(matches!(statements[1], Statement::Empty(_)));
}

// ============================================================================
// Decorator placement
// ============================================================================

#[rstest]
#[case("@doc(\"d\") namespace P;")]
#[case("@doc(\"d\") model M {}")]
#[case("@doc(\"d\") scalar s;")]
#[case("@doc(\"d\") enum E { A }")]
#[case("@doc(\"d\") op f(): void;")]
fn test_decorators_allowed(#[case] input: &str) {
    assert!(parses(input), "Failed to parse: {}", input);
}

#[rstest]
#[case("@doc(\"d\") import \"./x.tsp\";")]
#[case("@doc(\"d\") using P;")]
#[case("@doc(\"d\") interface I {}")]
#[case("@doc(\"d\") alias A = string;")]
fn test_decorators_rejected(#[case] input: &str) {
    let result = parse(input);
    assert!(
        result.errors.iter().any(|e| e.code == ErrorCode::E0302),
        "expected misplaced-decorator error for: {}",
        input
    );
    // The statement itself still lands in the tree
    let file = SourceFile::cast(result.syntax()).unwrap();
    assert!(file.statements().next().is_some());
}

#[test]
fn test_decorator_order_preserved() {
    let file = source_file("@first @second(1) @third model M {}");
    let Some(Statement::Model(model)) = file.statements().next() else {
        panic!("expected model statement");
    };
    let paths: Vec<_> = model
        .decorators()
        .unwrap()
        .decorators()
        .filter_map(|d| d.path())
        .collect();
    assert_eq!(paths, vec!["first", "second", "third"]);
}

// ============================================================================
// Statement counting and recovery
// ============================================================================

#[test]
fn test_item_count_skips_empty_statements() {
    let file = source_file(";; model A {} ; enum B { X } ;");
    assert_eq!(file.items().count(), 2);
    assert_eq!(file.statements().count(), 6);
}

#[test]
fn test_recovery_keeps_following_statements() {
    let result = parse("model = broken\nmodel Fine {}\nenum Also { Good }");
    assert!(!result.ok());
    let file = SourceFile::cast(result.syntax()).unwrap();
    let models = file
        .statements()
        .filter(|s| matches!(s, Statement::Model(_)))
        .count();
    let enums = file
        .statements()
        .filter(|s| matches!(s, Statement::Enum(_)))
        .count();
    assert_eq!(models, 2);
    assert_eq!(enums, 1);
}

#[test]
fn test_missing_semicolon_code() {
    let result = parse("using P");
    assert!(!result.ok());
    assert_eq!(result.errors[0].code, ErrorCode::E0201);
}
