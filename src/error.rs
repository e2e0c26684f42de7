//! Errors surfaced to callers as `Err`.
//!
//! Syntax errors are not here: they are data inside a [`Parse`](crate::parser::Parse).

use thiserror::Error;

use crate::parser::SyntaxKind;

/// The grammar table could not be built.
///
/// This is a configuration error of the crate itself; it is reported once and
/// never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LanguageError {
    /// A syntax kind has no entry in the symbol table.
    #[error("syntax kind {0:?} has no symbol entry")]
    MissingSymbol(SyntaxKind),

    /// A syntax kind has more than one entry in the symbol table.
    #[error("syntax kind {0:?} has more than one symbol entry")]
    DuplicateSymbol(SyntaxKind),

    /// Two symbols share the same name and visibility.
    #[error("symbol name `{name}` (named: {named}) is used more than once")]
    DuplicateSymbolName { name: &'static str, named: bool },

    /// An operator token appears twice in the precedence tables.
    #[error("operator {0:?} has conflicting precedence entries")]
    ConflictingOperator(SyntaxKind),

    /// A precedence table entry names a token that is not an operator.
    #[error("{0:?} is not an operator token")]
    NotAnOperator(SyntaxKind),

    /// A plugin name appears twice.
    #[error("plugin `{0}` is declared more than once")]
    DuplicatePlugin(&'static str),

    /// A plugin name contains characters the attribute scanner cannot produce.
    #[error("plugin name `{0}` is not a valid attribute segment")]
    InvalidPluginName(&'static str),

    /// The plugin table is empty.
    #[error("the plugin table is empty")]
    NoPlugins,
}

/// An edit descriptor handed to an incremental reparse is invalid.
///
/// These are programming errors of the caller: offsets are never clamped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// `start > old_end` or `start > new_end`.
    #[error("edit {index}: start {start} is past its end ({end})")]
    InvertedRange { index: usize, start: u32, end: u32 },

    /// `old_end` lies past the end of the text the edit applies to.
    #[error("edit {index}: old end {old_end} is past the end of the text ({len})")]
    OutOfBounds { index: usize, old_end: u32, len: u32 },

    /// An offset splits a UTF-8 character of the new text.
    #[error("edit {index}: offset {offset} is not on a character boundary")]
    NotCharBoundary { index: usize, offset: u32 },

    /// Applying the edits to the old text does not give the new text's length.
    #[error("edits produce a text of {expected} bytes, but the new text has {actual}")]
    LengthMismatch { expected: u32, actual: u32 },

    /// Text outside the edited range differs between the old and new text.
    #[error("text outside the edited range {start}..{end} changed")]
    UnchangedRegionDiffers { start: u32, end: u32 },
}
