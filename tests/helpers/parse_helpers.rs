//! Parse assertion helpers.

#![allow(clippy::unwrap_used)]

use datastar::parser::{ErrorCode, Parse, SyntaxKind, parse};
use datastar::{Parser, TextEdit, TextRange, TextSize};

/// Parse `source` and assert it produced no errors.
pub fn assert_parses(source: &str) -> Parse {
    let result = parse(source);
    assert!(
        result.ok(),
        "Expected no errors for {:?}, got:\n{}",
        source,
        result
            .errors()
            .iter()
            .map(|e| format!("  {}", e.format()))
            .collect::<Vec<_>>()
            .join("\n")
    );
    assert_eq!(result.text(), source, "tree must be lossless");
    result
}

/// Parse `source` and assert the first error carries `code`.
pub fn assert_error_code(source: &str, code: ErrorCode) -> Parse {
    let result = parse(source);
    assert!(!result.ok(), "Expected {:?} for {:?}, got no errors", code, source);
    assert_eq!(
        result.errors()[0].code,
        code,
        "Wrong first error for {:?}: {:?}",
        source,
        result.errors()
    );
    assert_eq!(result.text(), source, "tree must be lossless");
    result
}

/// Kinds of the root's child nodes
pub fn top_level_kinds(source: &str) -> Vec<SyntaxKind> {
    parse(source).syntax().children().map(|n| n.kind()).collect()
}

/// Kind of the first expression node inside the first statement
pub fn first_expr_kind(source: &str) -> SyntaxKind {
    let stmt = parse(source).syntax().first_child().unwrap();
    stmt.first_child().unwrap().kind()
}

/// Replace `range` of `text` and return the edit plus the new text
pub fn edit(text: &str, range: std::ops::Range<u32>, replacement: &str) -> (TextEdit, String) {
    let mut new_text = text.to_string();
    new_text.replace_range(range.start as usize..range.end as usize, replacement);
    let edit = TextEdit::replace(
        TextRange::new(TextSize::new(range.start), TextSize::new(range.end)),
        replacement,
    );
    (edit, new_text)
}

/// Reparse after one edit and assert the result equals a fresh parse.
pub fn assert_reparse_matches(text: &str, range: std::ops::Range<u32>, replacement: &str) {
    let parser = Parser::default();
    let old = parser.parse(text);
    let (edit, new_text) = edit(text, range, replacement);
    let reparsed = parser.reparse(&old, &[edit], &new_text).unwrap();
    let full = parser.parse(&new_text);
    assert_eq!(reparsed.text(), new_text);
    assert_eq!(reparsed.debug_tree(), full.debug_tree(), "tree for {new_text:?}");
    assert_eq!(reparsed.errors(), full.errors(), "errors for {new_text:?}");
}
