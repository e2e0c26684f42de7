//! Incremental reparse tests
//!
//! A reparse must always agree with a fresh parse of the new text, whichever
//! strategy it takes internally.

#![allow(clippy::unwrap_used)]

use datastar::parser::{Parser, parse_expression};
use datastar::{ParserConfig, SourceMode, TextEdit, TextRange, TextSize, language};
use rstest::rstest;

use crate::helpers::parse_helpers::{assert_reparse_matches, edit};

#[rstest]
// token text changes
#[case("$count = 1", 9..10, "100")]
#[case("@get('/a'); @post('/b')", 5..9, "'/users/1'")]
#[case("$a = x + y", 5..6, "width")]
// whitespace only
#[case("$a=1", 2..2, " ")]
#[case("$a = 1;\n$b = 2", 6..8, ";  \n")]
// inside collections
#[case("$o = {a: 1, b: [2, 3]}", 16..17, "20, 21")]
#[case("@post('/x', {retry: true})", 20..24, "false, delay: 100")]
#[case("[[1], [2], [3]]", 7..8, "2, [2.5]")]
// structure changes
#[case("$a = 1", 6..6, "; $b = 2")]
#[case("$a = [1, 2]", 10..11, "")]
#[case("$a = {b: 1}", 5..6, "[")]
#[case("data-on:click", 8..13, "submit__prevent")]
#[case("data-show", 0..5, "")]
// broken input before and after
#[case("$a = (; $b = [1, 2]", 14..15, "3")]
#[case("[1 2]; $c = ", 1..2, "10,")]
#[case("$a = '", 5..6, "'x'")]
fn test_reparse_matches_full_parse(
    #[case] text: &str,
    #[case] range: std::ops::Range<u32>,
    #[case] replacement: &str,
) {
    assert_reparse_matches(text, range, replacement);
}

#[test]
fn test_typing_one_character_at_a_time() {
    let parser = Parser::default();
    let target = "$items = [1, {a: 'x'}]; @get('/y')";
    let mut text = String::new();
    let mut current = parser.parse(&text);
    for (idx, c) in target.char_indices() {
        let offset = TextSize::new(idx as u32);
        let edit = TextEdit::insert(offset, c.encode_utf8(&mut [0; 4]));
        text.push(c);
        current = parser.reparse(&current, &[edit], &text).unwrap();
        assert_eq!(current, parser.parse(&text), "after typing {text:?}");
    }
}

#[test]
fn test_deleting_one_character_at_a_time() {
    let parser = Parser::default();
    let mut text = "$a = [1, (2 + 3)]; $b = {c: $a}".to_string();
    let mut current = parser.parse(&text);
    while !text.is_empty() {
        let start = TextSize::new(text.len() as u32 / 2);
        let range = TextRange::at(start, TextSize::new(1));
        text.remove(u32::from(start) as usize);
        current = parser.reparse(&current, &[TextEdit::delete(range)], &text).unwrap();
        assert_eq!(current, parser.parse(&text), "after deleting in {text:?}");
    }
}

#[test]
fn test_reparse_with_forced_mode() {
    let parser = Parser::with_config(
        language(),
        ParserConfig::default().with_mode(SourceMode::Expression),
    );
    let old = parser.parse("data - show");
    let (edit, new_text) = edit("data - show", 7..11, "hide");
    let reparsed = parser.reparse(&old, &[edit], &new_text).unwrap();
    assert_eq!(reparsed, parse_expression(&new_text));
}

#[test]
fn test_reparse_mode_switch_is_full_parse() {
    // Adding `data-` flips auto mode from expressions to an attribute
    let (edit, new_text) = edit("show", 0..0, "data-");
    let parser = Parser::default();
    let old = parser.parse("show");
    let reparsed = parser.reparse(&old, &[edit], &new_text).unwrap();
    assert!(reparsed.ok());
    assert_eq!(reparsed, parser.parse(&new_text));
}
