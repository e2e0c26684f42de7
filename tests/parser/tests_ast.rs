//! Typed AST accessor tests

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use datastar::parser::ast::{
    AstNode, Element, Expr, LiteralKind, PathSegment, PropertyKey, SourceFile, Statement,
    StringLiteral, unescape,
};
use datastar::parser::{SyntaxKind, parse};
use rstest::rstest;

fn source_file(text: &str) -> SourceFile {
    SourceFile::cast(parse(text).syntax()).unwrap()
}

fn only_expr(text: &str) -> Expr {
    match source_file(text).statements().next() {
        Some(Statement::Expression(stmt)) => stmt.expr().unwrap(),
        other => panic!("expected an expression statement, got {other:?}"),
    }
}

#[test]
fn test_action_call_accessors() {
    let Expr::Primary(primary) = only_expr("@post('/submit', {retry: 3}, ...$extra)") else {
        panic!("expected a primary expression");
    };
    let action = primary.action_call().unwrap();
    assert_eq!(action.name().unwrap().text(), "post");
    let args = action.args();
    assert_eq!(args.len(), 3);
    assert!(matches!(args[0], Element::Expr(_)));
    assert!(matches!(args[2], Element::Spread(_)));
}

#[test]
fn test_signal_segments() {
    let Expr::Primary(primary) = only_expr("$form.items[0]?.label") else {
        panic!("expected a primary expression");
    };
    let signal = primary.signal().unwrap();
    assert_eq!(signal.name().unwrap().text(), "form");
    let segments = signal.segments();
    assert_eq!(segments.len(), 3);
    assert!(matches!(&segments[0], PathSegment::Name { name, optional: false } if name.text() == "items"));
    assert!(matches!(&segments[1], PathSegment::Index { optional: false, .. }));
    assert!(matches!(&segments[2], PathSegment::Name { name, optional: true } if name.text() == "label"));
    assert_eq!(signal.path(), None);
}

#[test]
fn test_signal_path_string() {
    let Some(Statement::Assignment(assignment)) = source_file("$user.profile.email = ''").statements().next() else {
        panic!("expected an assignment");
    };
    let Some(Expr::Signal(signal)) = assignment.target() else {
        panic!("expected a signal target");
    };
    assert_eq!(signal.path().as_deref(), Some("user.profile.email"));
}

#[test]
fn test_conditional_branches() {
    let Expr::Conditional(cond) = only_expr("$ok ? 'yes' : 'no'") else {
        panic!("expected a conditional");
    };
    assert!(cond.condition().is_some());
    assert!(cond.then_branch().is_some());
    assert!(cond.else_branch().is_some());
}

#[test]
fn test_arrow_function_parts() {
    let Expr::Call(call) = only_expr("list.map((a, b) => a + b)") else {
        panic!("expected a call");
    };
    let args = call.arguments().unwrap();
    let Some(Element::Expr(Expr::Arrow(arrow))) = args.elements().next() else {
        panic!("expected an arrow function argument");
    };
    let params: Vec<_> = arrow.params().iter().map(|t| t.text().to_string()).collect();
    assert_eq!(params, vec!["a", "b"]);
    assert!(matches!(arrow.body(), Some(Expr::Binary(_))));
}

#[test]
fn test_member_expressions() {
    let Expr::Member(member) = only_expr("a?.b") else {
        panic!("expected a member expression");
    };
    assert!(member.is_optional());
    assert_eq!(member.property().unwrap().text(), "b");

    let Expr::ComputedMember(computed) = only_expr("a[i + 1]") else {
        panic!("expected a computed member expression");
    };
    assert!(!computed.is_optional());
    assert!(matches!(computed.index(), Some(Expr::Binary(_))));
}

#[test]
fn test_object_properties() {
    let Expr::Primary(primary) = only_expr("{plain: 1, 'quoted key': 2, [dyn]: 3, ...rest}") else {
        panic!("expected a primary expression");
    };
    let object = primary.object().unwrap();
    let names: Vec<_> = object.properties().map(|p| p.key_name()).collect();
    assert_eq!(
        names,
        vec![Some("plain".to_string()), Some("quoted key".to_string()), None]
    );
    let computed = object.properties().nth(2).unwrap();
    assert!(matches!(computed.key(), Some(PropertyKey::Computed(Some(_)))));
    assert_eq!(object.spreads().count(), 1);
}

#[rstest]
#[case("42", 42.0)]
#[case("0.5", 0.5)]
#[case("2e3", 2000.0)]
fn test_number_values(#[case] text: &str, #[case] expected: f64) {
    let Expr::Primary(primary) = only_expr(text) else {
        panic!("expected a primary expression");
    };
    assert_eq!(primary.literal().unwrap().number_value(), Some(expected));
}

#[test]
fn test_literal_kinds() {
    let Expr::Primary(primary) = only_expr("[true, null, undefined, 'x']") else {
        panic!("expected a primary expression");
    };
    let kinds: Vec<_> = primary
        .array()
        .unwrap()
        .elements()
        .map(|element| match element {
            Element::Expr(Expr::Primary(p)) => p.literal().unwrap().kind().unwrap(),
            other => panic!("unexpected element {other:?}"),
        })
        .collect();
    assert_eq!(kinds[0], LiteralKind::Boolean(true));
    assert_eq!(kinds[1], LiteralKind::Null);
    assert_eq!(kinds[2], LiteralKind::Undefined);
    assert!(matches!(kinds[3], LiteralKind::String(_)));
}

#[rstest]
#[case(r"'plain'", "plain")]
#[case(r#""a\"b""#, "a\"b")]
#[case(r"'tab\there'", "tab\there")]
#[case(r"'\x41B\u{43}'", "ABC")]
#[case(r"`multi\
line`", "multiline")]
fn test_string_values(#[case] text: &str, #[case] expected: &str) {
    let parse = parse(text);
    let string = parse
        .syntax()
        .descendants()
        .find_map(StringLiteral::cast)
        .unwrap();
    assert_eq!(string.value().as_deref(), Some(expected));
}

#[test]
fn test_unescape_unknown_escape_keeps_char() {
    assert_eq!(unescape(r"\q\\"), "q\\");
}

#[test]
fn test_statement_kinds_in_sequence() {
    let statements: Vec<_> = source_file("$a = 1, $b++, @get('/x')")
        .statements()
        .map(|s| s.syntax().kind())
        .collect();
    assert_eq!(
        statements,
        vec![
            SyntaxKind::ASSIGNMENT_STATEMENT,
            SyntaxKind::EXPRESSION_STATEMENT,
            SyntaxKind::EXPRESSION_STATEMENT
        ]
    );
}
