//! # datastar-syntax
//!
//! Grammar, parser and typed syntax tree for Datastar attribute names
//! (`data-on:click__debounce.500ms`) and attribute-value expressions
//! (`$count++; @get('/endpoint')`).
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! highlight → Token classification for editors
//!   ↓
//! parser    → Lexer, attribute scanner, error-tolerant parser, AST, reparse
//!   ↓
//! language  → Process-wide grammar handle and loader entry point
//!   ↓
//! grammar   → Symbol, operator and plugin tables
//!   ↓
//! base      → Primitives (TextRange, LineIndex, TextEdit)
//! ```
//!
//! ## Example
//!
//! ```
//! use datastar::parser::{Parser, SyntaxKind};
//!
//! let parser = Parser::default();
//! let parse = parser.parse("$count += 1");
//! assert!(parse.ok());
//! assert_eq!(
//!     parse.syntax().first_child().map(|n| n.kind()),
//!     Some(SyntaxKind::ASSIGNMENT_STATEMENT)
//! );
//! ```

// ============================================================================
// MODULES (dependency order: base → grammar → language → parser → highlight)
// ============================================================================

/// Foundation types: TextRange, line index, edit descriptors
pub mod base;

/// Parser configuration
pub mod config;

/// Errors returned as `Err`: grammar initialization and edit misuse
pub mod error;

/// The Datastar grammar table
pub mod grammar;

/// Language handle and loader entry point
pub mod language;

/// Parser: lexers, recursive-descent parser, typed AST, incremental reparse
pub mod parser;

/// Syntax highlighting
pub mod highlight;

// Re-export commonly needed items
pub use config::{ParserConfig, SourceMode};
pub use error::{EditError, LanguageError};
pub use highlight::{HighlightSpan, HighlightTag, highlight};
pub use language::{Language, datastar_language, language, try_language};
pub use parser::{Parse, Parser, parse, parse_attribute, parse_expression};

// Re-export foundation types
pub use base::{LineCol, LineIndex, TextEdit, TextRange, TextSize};
