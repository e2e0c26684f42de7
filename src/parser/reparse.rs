//! Incremental reparsing
//!
//! After an edit, the old and new texts are relexed and their token streams
//! compared. Depending on how much changed, the old tree is returned as is,
//! patched token by token, patched by reparsing one enclosing `[...]`/`{...}`
//! collection, or thrown away for a full parse. Every path produces the same
//! tree and errors a full parse of the new text would.

use rowan::{GreenToken, NodeOrToken, TextRange, TextSize};
use tracing::{debug, warn};

use super::errors::SyntaxError;
use super::lexer::{self, Token};
use super::parse::Parse;
use super::parser::Parser;
use super::syntax_kind::{SyntaxKind, SyntaxNode};
use crate::base::TextEdit;
use crate::error::EditError;

/// Most changed tokens patched in place before falling back to reparsing
const MAX_TOKEN_PATCHES: usize = 16;

/// The part of the text the edits touched, in new-text coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ChangedRegion {
    /// Bytes at the start that no edit touched
    prefix: TextSize,
    /// Bytes at the end that no edit touched
    suffix: TextSize,
}

/// Check `edits` turn `old_text` into `new_text` and return the region they
/// touched
fn validate_edits(
    old_text: &str,
    edits: &[TextEdit],
    new_text: &str,
) -> Result<ChangedRegion, EditError> {
    let old_len = TextSize::of(old_text);
    let mut len = old_len;
    let mut prefix = old_len;
    let mut suffix = old_len;
    let mut prefix_edit = 0;
    let mut suffix_edit = 0;

    for (index, edit) in edits.iter().enumerate() {
        if edit.start > edit.old_end || edit.start > edit.new_end {
            let end = if edit.start > edit.old_end {
                edit.old_end
            } else {
                edit.new_end
            };
            return Err(EditError::InvertedRange {
                index,
                start: edit.start.into(),
                end: end.into(),
            });
        }
        if edit.old_end > len {
            return Err(EditError::OutOfBounds {
                index,
                old_end: edit.old_end.into(),
                len: len.into(),
            });
        }
        if edit.start < prefix {
            prefix = edit.start;
            prefix_edit = index;
        }
        let untouched_tail = len - edit.old_end;
        if untouched_tail < suffix {
            suffix = untouched_tail;
            suffix_edit = index;
        }
        len = len - (edit.old_end - edit.start) + (edit.new_end - edit.start);
    }

    let new_len = TextSize::of(new_text);
    if len != new_len {
        return Err(EditError::LengthMismatch {
            expected: len.into(),
            actual: new_len.into(),
        });
    }

    // Prefix and suffix may overlap when edits cancel out
    let suffix = suffix.min(new_len - prefix).min(old_len - prefix);
    let region = ChangedRegion { prefix, suffix };

    for (offset, index) in [(prefix, prefix_edit), (new_len - suffix, suffix_edit)] {
        if !new_text.is_char_boundary(offset.into()) {
            return Err(EditError::NotCharBoundary {
                index,
                offset: offset.into(),
            });
        }
    }

    let (old_bytes, new_bytes) = (old_text.as_bytes(), new_text.as_bytes());
    let p = usize::from(prefix);
    let s = usize::from(suffix);
    let unchanged = old_bytes[..p] == new_bytes[..p]
        && old_bytes[old_bytes.len() - s..] == new_bytes[new_bytes.len() - s..];
    if !unchanged {
        return Err(EditError::UnchangedRegionDiffers {
            start: prefix.into(),
            end: (new_len - suffix).into(),
        });
    }

    Ok(region)
}

fn same_token(a: &Token<'_>, b: &Token<'_>) -> bool {
    a.kind == b.kind && a.text == b.text
}

/// Number of equal leading and trailing tokens; never overlapping
fn common_ends(old: &[Token<'_>], new: &[Token<'_>]) -> (usize, usize) {
    let prefix = old
        .iter()
        .zip(new)
        .take_while(|(a, b)| same_token(a, b))
        .count();
    let max_suffix = old.len().min(new.len()) - prefix;
    let suffix = old
        .iter()
        .rev()
        .zip(new.iter().rev())
        .take(max_suffix)
        .take_while(|(a, b)| same_token(a, b))
        .count();
    (prefix, suffix)
}

/// Whether every bracket in `tokens` is matched by one of the same type
fn is_balanced(tokens: &[Token<'_>]) -> bool {
    let mut stack = Vec::new();
    for token in tokens {
        let kind = token.kind;
        let closer = match kind {
            SyntaxKind::L_PAREN => Some(SyntaxKind::R_PAREN),
            SyntaxKind::L_BRACKET => Some(SyntaxKind::R_BRACKET),
            SyntaxKind::L_BRACE => Some(SyntaxKind::R_BRACE),
            _ => None,
        };
        if let Some(closer) = closer {
            stack.push(closer);
        } else if kind.is_closing_delimiter() && stack.pop() != Some(kind) {
            return false;
        }
    }
    stack.is_empty()
}

impl Parser {
    /// Reparse after `edits` turned the text of `old` into `new_text`
    ///
    /// Edits are applied in order, each in the coordinates produced by the
    /// ones before it. Invalid edits fail with an [`EditError`] and are never
    /// clamped. The result is always identical to `self.parse(new_text)`.
    pub fn reparse(&self, old: &Parse, edits: &[TextEdit], new_text: &str) -> Result<Parse, EditError> {
        let old_text = old.text();
        let region = validate_edits(&old_text, edits, new_text)?;

        if &old.config != self.config() || old.language != self.language() {
            debug!("[REPARSE] configuration changed, full parse");
            return Ok(self.parse(new_text));
        }
        let mode = self.config().mode.resolve(new_text);
        if self.config().mode.resolve(&old_text) != mode {
            debug!("[REPARSE] source mode changed, full parse");
            return Ok(self.parse(new_text));
        }

        let grammar = self.language().grammar();
        let old_tokens = lexer::tokenize(&old_text, mode, grammar);
        let new_tokens = lexer::tokenize(new_text, mode, grammar);

        let root = old.syntax();
        let tree_token_count = root
            .descendants_with_tokens()
            .filter(|element| element.as_token().is_some())
            .count();
        if tree_token_count != old_tokens.len() {
            warn!(
                "[REPARSE] tree has {} tokens but the old text lexes to {}, full parse",
                tree_token_count,
                old_tokens.len()
            );
            return Ok(self.parse(new_text));
        }

        let (prefix, suffix) = common_ends(&old_tokens, &new_tokens);
        if prefix == old_tokens.len() && prefix == new_tokens.len() {
            debug!("[REPARSE] token streams identical, reusing tree");
            return Ok(old.clone());
        }

        let ends = (prefix, suffix);
        if let Some(parse) = self.patch_tokens(old, &old_tokens, &new_tokens, ends, new_text) {
            debug!(
                "[REPARSE] patched {} tokens in place",
                old_tokens.len() - prefix - suffix
            );
            return Ok(parse);
        }

        if let Some(parse) = self.reparse_collection(old, &root, &old_tokens, &new_tokens, ends, new_text) {
            return Ok(parse);
        }

        debug!(
            "[REPARSE] no reusable subtree for edit at {}..{}, full parse",
            u32::from(region.prefix),
            u32::from(TextSize::of(new_text) - region.suffix)
        );
        Ok(self.parse(new_text))
    }

    /// Same token kinds, only some texts changed: swap the token texts
    fn patch_tokens(
        &self,
        old: &Parse,
        old_tokens: &[Token<'_>],
        new_tokens: &[Token<'_>],
        (prefix, suffix): (usize, usize),
        new_text: &str,
    ) -> Option<Parse> {
        if old_tokens.len() != new_tokens.len() {
            return None;
        }
        let changed = prefix..old_tokens.len() - suffix;
        if changed.len() > MAX_TOKEN_PATCHES {
            return None;
        }
        // ERROR token text shows up in error messages
        let kinds_match = changed.clone().all(|i| {
            old_tokens[i].kind == new_tokens[i].kind && old_tokens[i].kind != SyntaxKind::ERROR
        });
        if !kinds_match {
            return None;
        }

        let mut green = old.green.clone();
        for i in changed {
            let root = SyntaxNode::new_root(green.clone());
            let token = root
                .descendants_with_tokens()
                .filter_map(|element| element.into_token())
                .nth(i)?;
            // Keep the tree's kind: a keyword used as a property key is an IDENT there
            let replacement = GreenToken::new(token.kind().into(), new_tokens[i].text);
            green = token.replace_with(replacement);
        }

        // Every error offset is a token boundary; move it to the same boundary
        // in the new token stream
        let mut boundaries: Vec<(TextSize, TextSize)> = old_tokens
            .iter()
            .zip(new_tokens)
            .map(|(o, n)| (o.offset, n.offset))
            .collect();
        boundaries.push((old.green.text_len(), TextSize::of(new_text)));
        let map = |offset: TextSize| {
            boundaries
                .binary_search_by_key(&offset, |(o, _)| *o)
                .ok()
                .map(|idx| boundaries[idx].1)
        };

        let mut errors = old.errors.clone();
        for error in &mut errors {
            let offsets = std::iter::once(error.range)
                .chain(error.related.iter().map(|r| r.range))
                .flat_map(|r| [r.start(), r.end()]);
            for offset in offsets {
                map(offset)?;
            }
            error.map_offsets(|offset| map(offset).unwrap_or(offset));
        }

        Some(Parse::new(green, errors, self.config().clone(), self.language()))
    }

    /// Reparse the smallest `[...]`/`{...}` enclosing every changed token
    fn reparse_collection(
        &self,
        old: &Parse,
        root: &SyntaxNode,
        old_tokens: &[Token<'_>],
        new_tokens: &[Token<'_>],
        (prefix, suffix): (usize, usize),
        new_text: &str,
    ) -> Option<Parse> {
        if prefix == 0 {
            return None;
        }
        let index_of = |offset: TextSize| {
            old_tokens
                .binary_search_by_key(&offset, |t| t.offset)
                .ok()
        };
        let anchor = root
            .token_at_offset(old_tokens[prefix - 1].offset)
            .right_biased()?;

        let changed_end = old_tokens.len() - suffix;
        let (node, first, last) = anchor.parent_ancestors().find_map(|node| {
            let closer = match node.kind() {
                SyntaxKind::ARRAY => SyntaxKind::R_BRACKET,
                SyntaxKind::OBJECT => SyntaxKind::R_BRACE,
                _ => return None,
            };
            let first = index_of(node.first_token()?.text_range().start())?;
            let last_token = match node.last_child_or_token()? {
                NodeOrToken::Token(token) if token.kind() == closer => token,
                _ => return None,
            };
            let last = index_of(last_token.text_range().start())?;
            (first < prefix && last >= changed_end).then_some((node, first, last))
        })?;

        let new_last = last + new_tokens.len() - old_tokens.len();
        let old_region = &old_tokens[first..=last];
        let new_region = &new_tokens[first..=new_last];
        if !is_balanced(old_region) || !is_balanced(new_region) {
            return None;
        }

        let depth = node.ancestors().count() as u32 - 1;
        let (green, inner_errors) = self.parse_collection(new_region, node.kind(), depth)?;

        let old_start = old_region[0].offset;
        let old_end = old_region[old_region.len() - 1].end();
        let new_end = new_region[new_region.len() - 1].end();
        let shift = |offset: TextSize| {
            if offset <= old_start {
                Some(offset)
            } else if offset >= old_end {
                Some(offset - old_end + new_end)
            } else {
                None
            }
        };

        let mut errors: Vec<SyntaxError> = Vec::with_capacity(old.errors.len() + inner_errors.len());
        for error in &old.errors {
            let start = error.range.start();
            if start > old_start && start < old_end {
                // Reported while parsing the collection; replaced below
                continue;
            }
            let offsets = std::iter::once(error.range)
                .chain(error.related.iter().map(|r| r.range))
                .flat_map(|r| [r.start(), r.end()]);
            for offset in offsets {
                shift(offset)?;
            }
            let mut error = error.clone();
            error.map_offsets(|offset| shift(offset).unwrap_or(offset));
            errors.push(error);
        }
        errors.extend(inner_errors);
        errors.sort_by_key(|e| e.range.start());

        let new_root = node.replace_with(green);
        if new_root.text_len() != TextSize::of(new_text) {
            return None;
        }
        debug!(
            "[REPARSE] reparsed {:?} at {:?}",
            node.kind(),
            TextRange::new(old_start, old_end)
        );
        Some(Parse::new(new_root, errors, self.config().clone(), self.language()))
    }
}
