//! Syntax highlighting from the CST.
//!
//! Every non-trivia token is classified by its kind and, for identifiers, by
//! the node it sits in. String literals are split so escape sequences get
//! their own spans.

use rowan::{TextRange, TextSize};

use crate::base::{LineCol, LineIndex};
use crate::parser::ast::escape_sequences;
use crate::parser::{Parse, SyntaxKind, SyntaxNode, SyntaxToken};

/// Highlight class of a span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HighlightTag {
    Keyword,
    String,
    Escape,
    Number,
    Boolean,
    /// `null`, `undefined`
    Constant,
    Variable,
    /// A `$signal` reference
    Signal,
    /// Action names and called identifiers
    Function,
    Property,
    Operator,
    Bracket,
    Delimiter,
    /// `data-` and the plugin name
    Attribute,
    /// The plugin key
    Label,
    Modifier,
    Error,
}

impl HighlightTag {
    pub const ALL: &'static [HighlightTag] = &[
        HighlightTag::Keyword,
        HighlightTag::String,
        HighlightTag::Escape,
        HighlightTag::Number,
        HighlightTag::Boolean,
        HighlightTag::Constant,
        HighlightTag::Variable,
        HighlightTag::Signal,
        HighlightTag::Function,
        HighlightTag::Property,
        HighlightTag::Operator,
        HighlightTag::Bracket,
        HighlightTag::Delimiter,
        HighlightTag::Attribute,
        HighlightTag::Label,
        HighlightTag::Modifier,
        HighlightTag::Error,
    ];

    /// Capture name in the dotted highlight-query convention
    pub fn as_str(self) -> &'static str {
        match self {
            HighlightTag::Keyword => "keyword",
            HighlightTag::String => "string",
            HighlightTag::Escape => "string.escape",
            HighlightTag::Number => "number",
            HighlightTag::Boolean => "boolean",
            HighlightTag::Constant => "constant.builtin",
            HighlightTag::Variable => "variable",
            HighlightTag::Signal => "variable.builtin",
            HighlightTag::Function => "function",
            HighlightTag::Property => "property",
            HighlightTag::Operator => "operator",
            HighlightTag::Bracket => "punctuation.bracket",
            HighlightTag::Delimiter => "punctuation.delimiter",
            HighlightTag::Attribute => "attribute",
            HighlightTag::Label => "label",
            HighlightTag::Modifier => "modifier",
            HighlightTag::Error => "error",
        }
    }

    /// Position in [`HighlightTag::ALL`], for index-based token legends
    pub fn to_index(self) -> u32 {
        HighlightTag::ALL
            .iter()
            .position(|tag| *tag == self)
            .unwrap_or_default() as u32
    }
}

/// A highlighted range of the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HighlightSpan {
    pub range: TextRange,
    pub tag: HighlightTag,
}

impl HighlightSpan {
    /// Start and end of the span as line/column positions
    pub fn line_cols(&self, index: &LineIndex) -> (LineCol, LineCol) {
        (index.line_col(self.range.start()), index.line_col(self.range.end()))
    }
}

/// Highlight spans for the whole tree, sorted by position and non-overlapping
pub fn highlight(parse: &Parse) -> Vec<HighlightSpan> {
    let root = parse.syntax();
    let range = root.text_range();
    highlight_range(parse, range)
}

/// Highlight spans for tokens intersecting `range`
pub fn highlight_range(parse: &Parse, range: TextRange) -> Vec<HighlightSpan> {
    let mut spans = Vec::new();
    let tokens = parse
        .syntax()
        .descendants_with_tokens()
        .filter_map(|element| element.into_token())
        .filter(|token| !token.kind().is_trivia())
        .filter(|token| token.text_range().intersect(range).is_some());

    for token in tokens {
        if token.kind() == SyntaxKind::STRING {
            push_string(&token, &mut spans);
        } else if let Some(tag) = classify(&token) {
            spans.push(HighlightSpan {
                range: token.text_range(),
                tag,
            });
        }
    }
    spans
}

/// Split a string token into `String` and `Escape` spans
fn push_string(token: &SyntaxToken, spans: &mut Vec<HighlightSpan>) {
    let start = token.text_range().start();
    let at = |offset: usize| start + TextSize::new(offset as u32);
    let mut last = 0;
    for (escape, _) in escape_sequences(token.text()) {
        if escape.start > last {
            spans.push(HighlightSpan {
                range: TextRange::new(at(last), at(escape.start)),
                tag: HighlightTag::String,
            });
        }
        spans.push(HighlightSpan {
            range: TextRange::new(at(escape.start), at(escape.end)),
            tag: HighlightTag::Escape,
        });
        last = escape.end;
    }
    if last < token.text().len() {
        spans.push(HighlightSpan {
            range: TextRange::new(at(last), token.text_range().end()),
            tag: HighlightTag::String,
        });
    }
}

fn classify(token: &SyntaxToken) -> Option<HighlightTag> {
    let kind = token.kind();
    let parent = token.parent();
    let parent_kind = parent.as_ref().map(|p| p.kind());

    let tag = match kind {
        SyntaxKind::ERROR => HighlightTag::Error,
        SyntaxKind::DATA_PREFIX | SyntaxKind::PLUGIN_NAME => HighlightTag::Attribute,
        SyntaxKind::PLUGIN_KEY => HighlightTag::Label,
        SyntaxKind::MODIFIER => HighlightTag::Modifier,
        SyntaxKind::UNDERSCORE_UNDERSCORE => HighlightTag::Delimiter,
        SyntaxKind::NUMBER => HighlightTag::Number,
        SyntaxKind::TRUE_KW | SyntaxKind::FALSE_KW => HighlightTag::Boolean,
        SyntaxKind::NULL_KW | SyntaxKind::UNDEFINED_KW => HighlightTag::Constant,
        k if k.is_keyword() => HighlightTag::Keyword,
        SyntaxKind::DOLLAR | SyntaxKind::SIGNAL_IDENT => HighlightTag::Signal,
        SyntaxKind::AT => HighlightTag::Function,
        SyntaxKind::IDENT => classify_ident(parent.as_ref()?),
        SyntaxKind::L_PAREN
        | SyntaxKind::R_PAREN
        | SyntaxKind::L_BRACKET
        | SyntaxKind::R_BRACKET
        | SyntaxKind::L_BRACE
        | SyntaxKind::R_BRACE => HighlightTag::Bracket,
        SyntaxKind::QUESTION | SyntaxKind::COLON
            if parent_kind == Some(SyntaxKind::CONDITIONAL_EXPRESSION) =>
        {
            HighlightTag::Operator
        }
        SyntaxKind::COMMA
        | SyntaxKind::SEMICOLON
        | SyntaxKind::COLON
        | SyntaxKind::DOT
        | SyntaxKind::QUESTION_DOT => HighlightTag::Delimiter,
        k if k.is_punct() => HighlightTag::Operator,
        _ => return None,
    };
    Some(tag)
}

fn classify_ident(parent: &SyntaxNode) -> HighlightTag {
    match parent.kind() {
        SyntaxKind::ACTION_NAME => HighlightTag::Function,
        SyntaxKind::PROPERTY => HighlightTag::Property,
        SyntaxKind::MEMBER_EXPRESSION if is_callee(parent) => HighlightTag::Function,
        SyntaxKind::MEMBER_EXPRESSION => HighlightTag::Property,
        SyntaxKind::PRIMARY_EXPRESSION if is_callee(parent) => HighlightTag::Function,
        _ => HighlightTag::Variable,
    }
}

/// Whether `node` is the callee of a call expression
fn is_callee(node: &SyntaxNode) -> bool {
    node.parent()
        .filter(|p| p.kind() == SyntaxKind::CALL_EXPRESSION)
        .and_then(|p| p.first_child())
        .is_some_and(|callee| &callee == node)
}
