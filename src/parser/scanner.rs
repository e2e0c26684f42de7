//! Hand-written scanner for Datastar attribute names
//!
//! Attribute names are not expression syntax: which characters form a token
//! depends on the position inside the name (`data-` prefix, plugin name,
//! `:key`, `__modifier`). Logos cannot express that, so this scanner walks
//! the input directly and produces the same [`Token`] stream the parser
//! consumes.
//!
//! ```text
//! data-on:click__debounce.500ms
//! ^^^^^                           DATA_PREFIX
//!      ^^                         PLUGIN_NAME (longest match from the plugin table)
//!        ^                        COLON
//!         ^^^^^                   PLUGIN_KEY  ([a-zA-Z0-9-]+, stops at "__")
//!              ^^                 UNDERSCORE_UNDERSCORE
//!                ^^^^^^^^^^^^^    MODIFIER    ([a-zA-Z0-9_-]+(\.[a-zA-Z0-9_-]+)?)
//! ```

use super::lexer::Token;
use super::syntax_kind::SyntaxKind;
use crate::grammar::GrammarTable;
use rowan::TextSize;

/// Where we are inside the attribute name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Prefix,
    PluginName,
    AfterName,
    Key,
    AfterKey,
    Modifier,
    Done,
}

struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    tokens: Vec<Token<'a>>,
}

impl<'a> Scanner<'a> {
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn push(&mut self, kind: SyntaxKind, len: usize) {
        let text = &self.input[self.pos..self.pos + len];
        self.tokens.push(Token {
            kind,
            text,
            offset: TextSize::new(self.pos as u32),
        });
        self.pos += len;
    }

    fn run_len(&self, pred: impl Fn(u8) -> bool) -> usize {
        self.rest().bytes().take_while(|b| pred(*b)).count()
    }

    /// Everything up to the next whitespace becomes one ERROR token
    fn push_garbage(&mut self) {
        let len = self
            .rest()
            .char_indices()
            .find(|(_, c)| c.is_ascii_whitespace())
            .map(|(idx, _)| idx)
            .unwrap_or(self.rest().len());
        self.push(SyntaxKind::ERROR, len);
    }
}

fn is_key_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-'
}

fn is_modifier_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// Length of a plugin key at the start of `rest`, or `None` when the key is
/// followed by a lone `_` (the key may only be terminated by `__`).
fn plugin_key_len(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    let len = bytes.iter().take_while(|b| is_key_char(**b)).count();
    match (bytes.get(len), bytes.get(len + 1)) {
        (Some(b'_'), Some(b'_')) => Some(len),
        (Some(b'_'), _) => None,
        _ => Some(len),
    }
}

/// Length of a modifier at the start of `rest`
fn modifier_len(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    let head = bytes.iter().take_while(|b| is_modifier_char(**b)).count();
    if head == 0 {
        return 0;
    }
    if bytes.get(head) == Some(&b'.') {
        let tail = bytes[head + 1..]
            .iter()
            .take_while(|b| is_modifier_char(**b))
            .count();
        if tail > 0 {
            return head + 1 + tail;
        }
    }
    head
}

/// Scan a Datastar attribute name into tokens
pub fn scan_attribute<'a>(input: &'a str, grammar: &GrammarTable) -> Vec<Token<'a>> {
    let mut scanner = Scanner {
        input,
        pos: 0,
        tokens: Vec::new(),
    };
    let mut state = State::Prefix;

    while scanner.pos < input.len() {
        let ws = scanner.run_len(|b| b.is_ascii_whitespace());
        if ws > 0 {
            scanner.push(SyntaxKind::WHITESPACE, ws);
            // Whitespace ends the name
            if state != State::Prefix {
                state = State::Done;
            }
            continue;
        }

        let rest = scanner.rest();
        state = match state {
            State::Prefix => {
                if rest.starts_with("data-") {
                    scanner.push(SyntaxKind::DATA_PREFIX, 5);
                    State::PluginName
                } else {
                    scanner.push_garbage();
                    State::Done
                }
            }
            State::PluginName => match grammar.longest_plugin_prefix(rest) {
                Some(plugin) => {
                    scanner.push(SyntaxKind::PLUGIN_NAME, plugin.name.len());
                    State::AfterName
                }
                None => {
                    let len = scanner.run_len(is_key_char);
                    if len > 0 {
                        scanner.push(SyntaxKind::ERROR, len);
                        State::AfterName
                    } else {
                        scanner.push_garbage();
                        State::Done
                    }
                }
            },
            State::AfterName | State::AfterKey if rest.starts_with("__") => {
                scanner.push(SyntaxKind::UNDERSCORE_UNDERSCORE, 2);
                State::Modifier
            }
            State::AfterName if rest.starts_with(':') => {
                scanner.push(SyntaxKind::COLON, 1);
                State::Key
            }
            State::Key => match plugin_key_len(rest) {
                Some(len) if len > 0 => {
                    scanner.push(SyntaxKind::PLUGIN_KEY, len);
                    State::AfterKey
                }
                Some(_) => {
                    scanner.push_garbage();
                    State::Done
                }
                None => {
                    // The key and its lone underscore form one bad token
                    let len = scanner.run_len(is_modifier_char);
                    scanner.push(SyntaxKind::ERROR, len);
                    State::Done
                }
            },
            State::Modifier => {
                let len = modifier_len(rest);
                if len > 0 {
                    scanner.push(SyntaxKind::MODIFIER, len);
                } else {
                    scanner.push_garbage();
                }
                State::Done
            }
            State::AfterName | State::AfterKey | State::Done => {
                scanner.push_garbage();
                State::Done
            }
        };
    }

    scanner.tokens
}
