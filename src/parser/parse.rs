//! The result of parsing a source text

use rowan::{GreenNode, NodeOrToken};

use super::errors::SyntaxError;
use super::syntax_kind::{SyntaxKind, SyntaxNode};
use crate::config::ParserConfig;
use crate::language::Language;

/// Result of parsing: a lossless green tree plus the syntax errors found
///
/// The tree always covers the whole input, so [`text`](Parse::text) returns
/// exactly the string that was parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    pub(crate) green: GreenNode,
    pub(crate) errors: Vec<SyntaxError>,
    pub(crate) config: ParserConfig,
    pub(crate) language: Language,
}

impl Parse {
    pub(crate) fn new(
        green: GreenNode,
        errors: Vec<SyntaxError>,
        config: ParserConfig,
        language: Language,
    ) -> Self {
        Self {
            green,
            errors,
            config,
            language,
        }
    }

    /// Get the root syntax node
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    /// Syntax errors, ordered by start offset
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// The configuration the tree was parsed with
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Check if the tree contains any `ERROR` node or token
    pub fn has_error_nodes(&self) -> bool {
        self.syntax()
            .descendants_with_tokens()
            .any(|element| element.kind() == SyntaxKind::ERROR)
    }

    /// All `ERROR` nodes, in document order
    pub fn error_nodes(&self) -> Vec<SyntaxNode> {
        self.syntax()
            .descendants()
            .filter(|node| node.kind() == SyntaxKind::ERROR)
            .collect()
    }

    /// The source text, reconstructed from the tree
    pub fn text(&self) -> String {
        self.syntax().text().to_string()
    }

    /// Render named nodes as an S-expression: `(source_file (expression_statement ...))`
    ///
    /// Named tokens show up as leaves (`(identifier)`); anonymous tokens,
    /// trivia and invalid tokens are omitted.
    pub fn to_sexp(&self) -> String {
        let mut out = String::new();
        self.write_sexp(&self.syntax(), &mut out);
        out
    }

    fn write_sexp(&self, node: &SyntaxNode, out: &mut String) {
        out.push('(');
        out.push_str(self.language.symbol_name(node.kind()));
        for child in node.children_with_tokens() {
            match child {
                NodeOrToken::Node(child) => {
                    out.push(' ');
                    self.write_sexp(&child, out);
                }
                NodeOrToken::Token(token) => {
                    let kind = token.kind();
                    if kind != SyntaxKind::ERROR && self.language.node_kind_is_named(kind) {
                        out.push_str(" (");
                        out.push_str(self.language.symbol_name(kind));
                        out.push(')');
                    }
                }
            }
        }
        out.push(')');
    }

    /// Indented dump of every node and token with its range
    pub fn debug_tree(&self) -> String {
        format!("{:#?}", self.syntax())
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::{SyntaxKind, parse};

    #[test]
    fn test_to_sexp_skips_anonymous_tokens() {
        let parse = parse("[null, undefined]");
        assert_eq!(
            parse.to_sexp(),
            "(source_file (expression_statement (primary_expression (array \
             (primary_expression (literal (null_literal))) \
             (primary_expression (literal (undefined_literal)))))))"
        );
    }

    #[test]
    fn test_to_sexp_shows_error_nodes() {
        let parse = parse("$a = ");
        assert_eq!(
            parse.to_sexp(),
            "(source_file (assignment_statement (signal_reference (signal_identifier)) (ERROR)))"
        );
    }

    #[test]
    fn test_error_nodes() {
        let parse = parse("(1 + ]");
        assert!(parse.has_error_nodes());
        let nodes = parse.error_nodes();
        assert!(!nodes.is_empty());
        assert!(nodes.iter().all(|n| n.kind() == SyntaxKind::ERROR));
    }

    #[test]
    fn test_debug_tree() {
        let parse = parse("$a");
        let dump = parse.debug_tree();
        assert!(dump.starts_with("SOURCE_FILE@0..2"));
        assert!(dump.contains("SIGNAL_IDENT@1..2 \"a\""));
    }
}
