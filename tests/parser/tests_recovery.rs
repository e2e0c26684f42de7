//! Error recovery tests
//!
//! Every input must produce a tree covering the whole text, with an `ERROR`
//! node for each reported problem and valid siblings left intact.

#![allow(clippy::unwrap_used)]

use datastar::parser::{ErrorCode, SyntaxKind, parse};
use datastar::{TextRange, TextSize};
use rstest::rstest;

use crate::helpers::parse_helpers::assert_error_code;

#[rstest]
#[case("$a = 'unterminated", ErrorCode::E0102)]
#[case("$a = 1 # 2", ErrorCode::E0101)]
#[case("[1 2]", ErrorCode::E0201)]
#[case("{a: 1", ErrorCode::E0202)]
#[case("(1 + 2", ErrorCode::E0203)]
#[case("[1, 2", ErrorCode::E0204)]
#[case("$a)", ErrorCode::E0205)]
#[case("1 + 2 = 3", ErrorCode::E0403)]
#[case("@get('/x'", ErrorCode::E0404)]
#[case("f(1,)", ErrorCode::E0405)]
#[case("; $a", ErrorCode::E0406)]
#[case("1 +", ErrorCode::E0402)]
#[case("$a = !", ErrorCode::E0402)]
#[case("$a ? : 1", ErrorCode::E0402)]
fn test_error_codes(#[case] source: &str, #[case] code: ErrorCode) {
    let parse = assert_error_code(source, code);
    assert!(parse.has_error_nodes(), "{source:?} should have ERROR nodes");
}

#[test]
fn test_errors_are_sorted_by_position() {
    let parse = parse("$a = ; $b = ]; [1 2");
    let starts: Vec<_> = parse.errors().iter().map(|e| e.range.start()).collect();
    let mut sorted = starts.clone();
    sorted.sort();
    assert_eq!(starts, sorted);
    assert!(parse.errors().len() >= 3);
}

#[test]
fn test_valid_statement_survives_broken_neighbour() {
    let parse = parse("$a = (1 + ; $b = 2");
    assert!(!parse.ok());
    let assignments = parse
        .syntax()
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::ASSIGNMENT_STATEMENT)
        .count();
    assert_eq!(assignments, 2);
}

#[test]
fn test_unclosed_call_points_at_opener() {
    let parse = parse("@post('/x', {a: 1}");
    let error = parse
        .errors()
        .iter()
        .find(|e| e.code == ErrorCode::E0404)
        .unwrap();
    assert_eq!(error.related.len(), 1);
    assert_eq!(
        error.related[0].range,
        TextRange::new(TextSize::new(5), TextSize::new(6))
    );
}

#[test]
fn test_invalid_character_range() {
    let parse = parse("$a = 1 # 2");
    let error = parse.errors().iter().find(|e| e.code == ErrorCode::E0101).unwrap();
    assert_eq!(error.range, TextRange::new(TextSize::new(7), TextSize::new(8)));
}

#[test]
fn test_error_format_includes_code() {
    let parse = parse("[1 2]");
    let formatted = parse.errors()[0].format();
    assert!(formatted.starts_with("E0201: "), "got {formatted:?}");
}

#[rstest]
#[case("")]
#[case("$")]
#[case("@")]
#[case("{{{{")]
#[case(")))")]
#[case("$a = = = 1")]
#[case("data-on:click__ junk")]
#[case("'é' + \"ü")]
#[case("a ? b")]
#[case("(x, => y")]
fn test_lossless_on_garbage(#[case] source: &str) {
    let parse = parse(source);
    assert_eq!(parse.text(), source);
    assert_eq!(
        parse.syntax().text_range(),
        TextRange::new(TextSize::new(0), TextSize::of(source))
    );
    assert_eq!(parse.has_error_nodes(), !parse.ok());
}
