//! Rowan-based incremental parser for Datastar
//!
//! This module provides a lossless, incremental parser using:
//! - **logos** for fast expression lexing
//! - a hand-written scanner for `data-*` attribute names
//! - **rowan** for the CST (Concrete Syntax Tree)
//!
//! This is the rust-analyzer approach: we build a lossless CST that preserves
//! all whitespace and invalid input, then extract an AST layer on top.
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) / attribute scanner → Tokens with SyntaxKind
//!     ↓
//! Parser (grammar table drives operator precedence) → GreenNode tree
//!     ↓
//! SyntaxNode (rowan) → CST with parent pointers
//!     ↓
//! AST layer → Typed wrappers over SyntaxNode
//! ```
//!
//! ## Incremental Reparsing
//!
//! When text changes, we:
//! 1. Relex and diff the old and new token streams
//! 2. Patch changed tokens in place, or reparse the smallest enclosing
//!    array/object
//! 3. Reuse unchanged green nodes (they're immutable and cheap to share)

#[allow(clippy::module_inception)]
mod parser;

pub mod ast;
pub mod errors;
mod lexer;
mod parse;
mod reparse;
mod scanner;
mod syntax_kind;

pub use errors::{ErrorCode, SyntaxError};
pub use lexer::{Lexer, Token, tokenize};
pub use parse::Parse;
pub use parser::{Parser, parse, parse_attribute, parse_expression};
pub use syntax_kind::{
    DatastarLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxNodeChildren, SyntaxToken,
};

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, TextRange, TextSize};
