//! Language handle and grammar table tests

#![allow(clippy::unwrap_used)]

use datastar::grammar::{Assoc, DATASTAR, GrammarTable, PluginTier};
use datastar::parser::SyntaxKind;
use datastar::{datastar_language, language, try_language};
use rstest::rstest;

#[test]
fn test_handle_is_shared() {
    assert_eq!(language(), try_language().unwrap());
    assert_eq!(language().as_raw(), datastar_language());
}

#[rstest]
#[case(SyntaxKind::SOURCE_FILE, "source_file", true)]
#[case(SyntaxKind::SIGNAL_REFERENCE, "signal_reference", true)]
#[case(SyntaxKind::IDENT, "identifier", true)]
#[case(SyntaxKind::PLUS_EQ, "+=", false)]
#[case(SyntaxKind::TYPEOF_KW, "typeof", false)]
fn test_symbol_round_trip(#[case] kind: SyntaxKind, #[case] name: &str, #[case] named: bool) {
    let lang = language();
    assert_eq!(lang.symbol_name(kind), name);
    assert_eq!(lang.node_kind_is_named(kind), named);
    assert_eq!(lang.symbol_for_name(name, named), Some(kind));
}

#[test]
fn test_unknown_symbol_name() {
    assert_eq!(language().symbol_for_name("no_such_node", true), None);
}

#[rstest]
#[case(SyntaxKind::QUESTION_QUESTION, SyntaxKind::PIPE_PIPE)]
#[case(SyntaxKind::PIPE_PIPE, SyntaxKind::AMP_AMP)]
#[case(SyntaxKind::EQ_EQ, SyntaxKind::LT)]
#[case(SyntaxKind::PLUS, SyntaxKind::STAR)]
#[case(SyntaxKind::STAR, SyntaxKind::STAR_STAR)]
fn test_operator_precedence_order(#[case] looser: SyntaxKind, #[case] tighter: SyntaxKind) {
    let lang = language();
    let looser = lang.binary_operator(looser).unwrap();
    let tighter = lang.binary_operator(tighter).unwrap();
    assert!(looser.precedence < tighter.precedence);
}

#[test]
fn test_binary_operators_are_left_associative() {
    let plus = language().binary_operator(SyntaxKind::PLUS).unwrap();
    assert_eq!(plus.assoc, Assoc::Left);
    assert!(language().binary_operator(SyntaxKind::EQ).is_none());
}

#[test]
fn test_plugin_tiers() {
    let lang = language();
    assert_eq!(lang.plugin("on").unwrap().tier, PluginTier::Standard);
    assert_eq!(lang.plugin("persist").unwrap().tier, PluginTier::Pro);
    assert!(lang.plugin("missing").is_none());
    assert_eq!(lang.plugins().count(), 31);
}

#[test]
fn test_table_matches_shipped_definition() {
    let table = GrammarTable::from_definition(&DATASTAR).unwrap();
    assert_eq!(table.name(), language().name());
    assert_eq!(table.symbols().len(), language().symbol_count());
}
