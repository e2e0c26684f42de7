//! Highlighting tests over whole inputs

#![allow(clippy::unwrap_used)]

use datastar::highlight::{HighlightTag, highlight, highlight_range};
use datastar::parser::parse;
use datastar::{LineCol, LineIndex, TextRange, TextSize};
use rstest::rstest;

fn tag_of(source: &str, needle: &str) -> Option<HighlightTag> {
    let start = source.find(needle).unwrap() as u32;
    let range = TextRange::at(TextSize::new(start), TextSize::of(needle));
    highlight(&parse(source))
        .into_iter()
        .find(|span| span.range == range)
        .map(|span| span.tag)
}

#[rstest]
#[case("$open = !$open", "open", HighlightTag::Signal)]
#[case("@get('/items')", "get", HighlightTag::Function)]
#[case("el.focus()", "focus", HighlightTag::Function)]
#[case("el.value", "value", HighlightTag::Property)]
#[case("evt.key === 'Enter'", "===", HighlightTag::Operator)]
#[case("{ready: false}", "ready", HighlightTag::Property)]
#[case("{ready: false}", "false", HighlightTag::Boolean)]
#[case("typeof x", "typeof", HighlightTag::Keyword)]
#[case("[1, 2]", ",", HighlightTag::Delimiter)]
#[case("[1, 2]", "[", HighlightTag::Bracket)]
#[case("data-class:active__case.kebab", "class", HighlightTag::Attribute)]
#[case("data-class:active__case.kebab", "active", HighlightTag::Label)]
#[case("data-class:active__case.kebab", "case.kebab", HighlightTag::Modifier)]
fn test_tag(#[case] source: &str, #[case] needle: &str, #[case] expected: HighlightTag) {
    assert_eq!(tag_of(source, needle), Some(expected), "{needle:?} in {source:?}");
}

#[test]
fn test_spans_are_sorted_and_disjoint() {
    let source = "$a = [1, 'x\\ty', {b: $c?.d}]; @post('/e', {f: () => g(1)})";
    let spans = highlight(&parse(source));
    assert!(!spans.is_empty());
    for pair in spans.windows(2) {
        assert!(pair[0].range.end() <= pair[1].range.start(), "{pair:?}");
    }
}

#[test]
fn test_string_escape_spans() {
    let source = r"'a\nb'";
    let spans = highlight(&parse(source));
    let tags: Vec<_> = spans.iter().map(|s| (&source[s.range], s.tag)).collect();
    assert_eq!(
        tags,
        vec![
            ("'a", HighlightTag::String),
            (r"\n", HighlightTag::Escape),
            ("b'", HighlightTag::String),
        ]
    );
}

#[test]
fn test_octal_escape_is_one_span() {
    let source = r"'\101\7x'";
    let spans = highlight(&parse(source));
    let escapes: Vec<_> = spans
        .iter()
        .filter(|s| s.tag == HighlightTag::Escape)
        .map(|s| &source[s.range])
        .collect();
    assert_eq!(escapes, vec![r"\101", r"\7"]);
}

#[test]
fn test_highlight_range_limits_output() {
    let source = "$a = 1; $b = 2; $c = 3";
    let parse = parse(source);
    let window = TextRange::new(TextSize::new(8), TextSize::new(14));
    let spans = highlight_range(&parse, window);
    assert!(spans.iter().all(|s| s.range.intersect(window).is_some()));
    assert!(spans.len() < highlight(&parse).len());
}

#[test]
fn test_span_line_cols() {
    let source = "$a = 1;\n  @get('/x')";
    let parse = parse(source);
    let index = LineIndex::new(source);
    let span = highlight(&parse)
        .into_iter()
        .find(|s| s.tag == HighlightTag::Function)
        .unwrap();
    assert_eq!(span.line_cols(&index).0, LineCol { line: 1, col: 2 });
}

#[test]
fn test_every_tag_has_a_capture_name() {
    let names: Vec<_> = HighlightTag::ALL.iter().map(|t| t.as_str()).collect();
    let mut unique = names.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), names.len());
}
