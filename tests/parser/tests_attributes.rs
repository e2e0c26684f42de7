//! Attribute name parsing tests

#![allow(clippy::unwrap_used)]

use datastar::parser::ast::{AstNode, SourceFile};
use datastar::parser::{ErrorCode, SyntaxKind, parse, parse_attribute};
use datastar::language;
use rstest::rstest;

use crate::helpers::parse_helpers::{assert_error_code, assert_parses};

#[test]
fn test_every_plugin_parses() {
    for plugin in language().plugins() {
        let source = format!("data-{}", plugin.name);
        let parse = assert_parses(&source);
        let attr = SourceFile::cast(parse.syntax()).unwrap().attribute().unwrap();
        assert_eq!(attr.plugin_name().unwrap().text(), plugin.name);
    }
}

#[rstest]
#[case("data-on:click", "on", Some("click"), None)]
#[case("data-on:click__once", "on", Some("click"), Some("once"))]
#[case("data-on:keydown__window", "on", Some("keydown"), Some("window"))]
#[case("data-signals:user-name", "signals", Some("user-name"), None)]
#[case("data-class:hidden", "class", Some("hidden"), None)]
#[case("data-on-interval__duration.1s", "on-interval", None, Some("duration.1s"))]
#[case("data-ignore__self", "ignore", None, Some("self"))]
#[case("data-on-signal-patch-filter", "on-signal-patch-filter", None, None)]
fn test_attribute_parts(
    #[case] source: &str,
    #[case] plugin: &str,
    #[case] key: Option<&str>,
    #[case] modifier: Option<&str>,
) {
    let parse = assert_parses(source);
    let attr = SourceFile::cast(parse.syntax()).unwrap().attribute().unwrap();
    assert_eq!(attr.plugin_name().unwrap().text(), plugin);
    assert_eq!(attr.key().as_ref().map(|t| t.text()), key);
    assert_eq!(attr.modifier().as_ref().map(|t| t.text()), modifier);
}

#[test]
fn test_modifier_argument() {
    let parse = assert_parses("data-on:input__debounce.500ms");
    let attr = SourceFile::cast(parse.syntax()).unwrap().attribute().unwrap();
    assert_eq!(attr.modifier_name().as_deref(), Some("debounce"));
    assert_eq!(attr.modifier_argument().as_deref(), Some("500ms"));
}

#[test]
fn test_attribute_with_surrounding_whitespace() {
    let parse = assert_parses("  data-show ");
    assert_eq!(
        parse.syntax().children().map(|n| n.kind()).collect::<Vec<_>>(),
        vec![SyntaxKind::DATASTAR_ATTRIBUTE]
    );
}

#[rstest]
#[case("data-nope", ErrorCode::E0301)]
#[case("data-", ErrorCode::E0301)]
#[case("data-on:", ErrorCode::E0302)]
#[case("data-on:bad_key", ErrorCode::E0302)]
#[case("data-on:click__", ErrorCode::E0303)]
#[case("data-on:click!", ErrorCode::E0304)]
#[case("data-show more", ErrorCode::E0304)]
fn test_attribute_errors(#[case] source: &str, #[case] code: ErrorCode) {
    let parse = assert_error_code(source, code);
    assert!(parse.has_error_nodes());
}

#[test]
fn test_forced_attribute_mode() {
    let parse = parse_attribute("on:click");
    assert_eq!(parse.errors()[0].code, ErrorCode::E0304);
    assert_eq!(parse.text(), "on:click");
}

#[test]
fn test_auto_mode_picks_expression_without_prefix() {
    let parse = parse("show");
    assert!(parse.ok());
    assert!(SourceFile::cast(parse.syntax()).unwrap().attribute().is_none());
}

#[rstest]
#[case(" \tdata-show", true)]
#[case("\x0Bdata-show", false)]
#[case("\u{3000}data-show", false)]
fn test_auto_mode_leading_whitespace(#[case] source: &str, #[case] attribute: bool) {
    let parse = parse(source);
    assert_eq!(parse.text(), source);
    let has_attribute = parse
        .syntax()
        .descendants()
        .any(|n| n.kind() == SyntaxKind::DATASTAR_ATTRIBUTE);
    assert_eq!(has_attribute, attribute, "{source:?}");
}
