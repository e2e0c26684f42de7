//! Expression and statement parsing tests
//!
//! Covers operator precedence from the grammar table, assignment targets,
//! signal paths, action calls and collection literals.

#![allow(clippy::unwrap_used)]

use datastar::parser::ast::{AstNode, BinaryExpression, SourceFile, Statement, UnaryExpression};
use datastar::parser::{SyntaxKind, parse};
use rstest::rstest;

use crate::helpers::parse_helpers::{assert_parses, first_expr_kind, top_level_kinds};

// ============================================================================
// Operators
// ============================================================================

#[rstest]
#[case("a ?? b", SyntaxKind::QUESTION_QUESTION)]
#[case("a || b", SyntaxKind::PIPE_PIPE)]
#[case("a && b", SyntaxKind::AMP_AMP)]
#[case("a | b", SyntaxKind::PIPE)]
#[case("a ^ b", SyntaxKind::CARET)]
#[case("a & b", SyntaxKind::AMP)]
#[case("a == b", SyntaxKind::EQ_EQ)]
#[case("a !== b", SyntaxKind::BANG_EQ_EQ)]
#[case("a <= b", SyntaxKind::LT_EQ)]
#[case("a in b", SyntaxKind::IN_KW)]
#[case("a instanceof b", SyntaxKind::INSTANCEOF_KW)]
#[case("a >>> b", SyntaxKind::GT_GT_GT)]
#[case("a % b", SyntaxKind::PERCENT)]
#[case("a ** b", SyntaxKind::STAR_STAR)]
fn test_binary_operator(#[case] source: &str, #[case] op: SyntaxKind) {
    let parse = assert_parses(source);
    let binary = parse
        .syntax()
        .descendants()
        .find_map(BinaryExpression::cast)
        .unwrap();
    assert_eq!(binary.op_kind(), Some(op));
    assert!(binary.lhs().is_some());
    assert!(binary.rhs().is_some());
}

#[rstest]
#[case("!$open", SyntaxKind::BANG)]
#[case("~mask", SyntaxKind::TILDE)]
#[case("-1", SyntaxKind::MINUS)]
#[case("+$value", SyntaxKind::PLUS)]
#[case("typeof x", SyntaxKind::TYPEOF_KW)]
#[case("void 0", SyntaxKind::VOID_KW)]
#[case("delete obj.key", SyntaxKind::DELETE_KW)]
fn test_prefix_operator(#[case] source: &str, #[case] op: SyntaxKind) {
    let parse = assert_parses(source);
    let unary = parse
        .syntax()
        .descendants()
        .find_map(UnaryExpression::cast)
        .unwrap();
    assert_eq!(unary.op_kind(), Some(op));
    assert!(!unary.is_postfix());
    assert!(unary.operand().is_some());
}

#[rstest]
#[case("$count++", SyntaxKind::PLUS_PLUS)]
#[case("$count--", SyntaxKind::MINUS_MINUS)]
fn test_postfix_operator(#[case] source: &str, #[case] op: SyntaxKind) {
    let parse = assert_parses(source);
    let unary = parse
        .syntax()
        .descendants()
        .find_map(UnaryExpression::cast)
        .unwrap();
    assert_eq!(unary.op_kind(), Some(op));
    assert!(unary.is_postfix());
}

#[rstest]
#[case("$a = 1", SyntaxKind::EQ)]
#[case("$a += 1", SyntaxKind::PLUS_EQ)]
#[case("$a -= 1", SyntaxKind::MINUS_EQ)]
#[case("$a **= 2", SyntaxKind::STAR_STAR_EQ)]
#[case("$a ??= 'x'", SyntaxKind::QUESTION_QUESTION_EQ)]
#[case("$a ||= true", SyntaxKind::PIPE_PIPE_EQ)]
#[case("$a >>>= 1", SyntaxKind::GT_GT_GT_EQ)]
fn test_assignment_operator(#[case] source: &str, #[case] op: SyntaxKind) {
    let parse = assert_parses(source);
    let file = SourceFile::cast(parse.syntax()).unwrap();
    let Some(Statement::Assignment(assignment)) = file.statements().next() else {
        panic!("expected an assignment in {source:?}");
    };
    assert_eq!(assignment.op_kind(), Some(op));
    assert!(assignment.target().is_some());
    assert!(assignment.value().is_some());
}

#[rstest]
#[case("$a", SyntaxKind::SIGNAL_REFERENCE)]
#[case("el.value", SyntaxKind::MEMBER_EXPRESSION)]
#[case("items[0]", SyntaxKind::COMPUTED_MEMBER_EXPRESSION)]
#[case("$user.name", SyntaxKind::SIGNAL_REFERENCE)]
fn test_assignment_targets(#[case] target: &str, #[case] kind: SyntaxKind) {
    let source = format!("{target} = 1");
    assert_parses(&source);
    assert_eq!(first_expr_kind(&source), kind);
}

#[test]
fn test_multiplicative_binds_tighter_than_additive() {
    let parse = assert_parses("1 + 2 * 3");
    let root = parse.syntax().descendants().find_map(BinaryExpression::cast).unwrap();
    assert_eq!(root.op_kind(), Some(SyntaxKind::PLUS));
    let rhs = root.rhs().unwrap();
    assert_eq!(rhs.syntax().kind(), SyntaxKind::BINARY_EXPRESSION);
}

#[test]
fn test_logical_and_binds_tighter_than_or() {
    let parse = assert_parses("a || b && c");
    let root = parse.syntax().descendants().find_map(BinaryExpression::cast).unwrap();
    assert_eq!(root.op_kind(), Some(SyntaxKind::PIPE_PIPE));
}

#[test]
fn test_unary_binds_tighter_than_binary() {
    let parse = assert_parses("!a && b");
    let root = parse.syntax().descendants().find_map(BinaryExpression::cast).unwrap();
    assert_eq!(root.lhs().unwrap().syntax().kind(), SyntaxKind::UNARY_EXPRESSION);
}

#[test]
fn test_parentheses_override_precedence() {
    let parse = assert_parses("(1 + 2) * 3");
    let root = parse.syntax().descendants().find_map(BinaryExpression::cast).unwrap();
    assert_eq!(root.op_kind(), Some(SyntaxKind::STAR));
    assert_eq!(
        root.lhs().unwrap().syntax().kind(),
        SyntaxKind::PARENTHESIZED_EXPRESSION
    );
}

// ============================================================================
// Signals, actions, calls
// ============================================================================

#[rstest]
#[case("$foo")]
#[case("$user-name")]
#[case("$user.profile.email")]
#[case("$list[0].name")]
#[case("$form?.field")]
fn test_signal_reference_is_one_node(#[case] source: &str) {
    let parse = assert_parses(source);
    let signal = parse
        .syntax()
        .descendants()
        .find(|n| n.kind() == SyntaxKind::SIGNAL_REFERENCE)
        .unwrap();
    assert_eq!(signal.text().to_string(), source);
}

#[rstest]
#[case("@get('/endpoint')")]
#[case("@post('/submit', {contentType: 'form'})")]
#[case("@setAll('foo.*', true)")]
#[case("@toggleAll()")]
fn test_action_calls(#[case] source: &str) {
    let parse = assert_parses(source);
    assert!(parse
        .syntax()
        .descendants()
        .any(|n| n.kind() == SyntaxKind::ACTION_CALL));
}

#[test]
fn test_method_call_chain() {
    let parse = assert_parses("el.value.trim().toUpperCase()");
    let calls = parse
        .syntax()
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::CALL_EXPRESSION)
        .count();
    assert_eq!(calls, 2);
}

#[test]
fn test_optional_chaining() {
    let parse = assert_parses("obj?.a?.[key]");
    let kinds: Vec<_> = parse.syntax().descendants().map(|n| n.kind()).collect();
    assert!(kinds.contains(&SyntaxKind::MEMBER_EXPRESSION));
    assert!(kinds.contains(&SyntaxKind::COMPUTED_MEMBER_EXPRESSION));
}

#[test]
fn test_arrow_function_bodies() {
    assert_parses("$items.map(item => item.id)");
    assert_parses("$items.reduce((acc, n) => acc + n, 0)");
    assert_parses("setTimeout(() => $done, 100)");
}

// ============================================================================
// Literals and collections
// ============================================================================

#[rstest]
#[case("42")]
#[case("3.14")]
#[case("1e-3")]
#[case("'single'")]
#[case("\"double\"")]
#[case("`template`")]
#[case("true")]
#[case("null")]
#[case("undefined")]
fn test_literals(#[case] source: &str) {
    let parse = assert_parses(source);
    assert!(parse
        .syntax()
        .descendants()
        .any(|n| n.kind() == SyntaxKind::LITERAL));
}

#[test]
fn test_nested_collections() {
    let parse = assert_parses("{items: [1, [2, 3]], meta: {ok: true}, ...rest, [key]: 'v', 'quoted': 0}");
    let objects = parse
        .syntax()
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::OBJECT)
        .count();
    assert_eq!(objects, 2);
    assert!(parse
        .syntax()
        .descendants()
        .any(|n| n.kind() == SyntaxKind::SPREAD_ELEMENT));
}

#[test]
fn test_array_spread() {
    assert_parses("[...$a, ...$b]");
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_statement_sequence() {
    assert_eq!(
        top_level_kinds("$a = 1; $b = 2; @get('/x')"),
        vec![SyntaxKind::SEQUENCE_EXPRESSION]
    );
    let file = SourceFile::cast(parse("$a = 1; $b = 2; @get('/x')").syntax()).unwrap();
    assert_eq!(file.statements().count(), 3);
}

#[test]
fn test_single_statement_is_not_a_sequence() {
    assert_eq!(
        top_level_kinds("$a = 1"),
        vec![SyntaxKind::ASSIGNMENT_STATEMENT]
    );
}

#[test]
fn test_statements_across_lines() {
    let source = "$a = 1;\n$b = $a * 2;\n";
    let parse = assert_parses(source);
    let file = SourceFile::cast(parse.syntax()).unwrap();
    assert_eq!(file.statements().count(), 2);
}
