//! Parse context tracking for context-aware error messages
//!
//! The parser keeps a stack of contexts so errors can say where in the
//! source structure they occurred and which closing token ends the
//! construct being recovered.

use super::codes::ErrorCode;
use crate::parser::SyntaxKind;

/// Represents the current parsing context
///
/// Used to generate context-aware error messages and to pick the closer
/// and error code when a delimited construct is left open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParseContext {
    /// Between top-level statements
    #[default]
    Statements,
    /// Inside a `data-*` attribute name
    Attribute,
    /// Inside the `(...)` of a call or action call
    Arguments,
    /// Inside the `(...)` of an arrow function
    Parameters,
    /// Inside `[...]` array elements
    Array,
    /// Inside `{...}` object properties
    Object,
    /// Inside `(...)` grouping
    Parenthesized,
    /// Inside the `[...]` of a computed member or signal path index
    Index,
}

impl ParseContext {
    /// Get a human-readable description of this context for error messages
    pub fn description(&self) -> &'static str {
        match self {
            Self::Statements => "at top level",
            Self::Attribute => "in attribute name",
            Self::Arguments => "in argument list",
            Self::Parameters => "in parameter list",
            Self::Array => "in array",
            Self::Object => "in object",
            Self::Parenthesized => "in parenthesized expression",
            Self::Index => "in index expression",
        }
    }

    /// Get a description of what is expected in this context
    pub fn expected_description(&self) -> &'static str {
        match self {
            Self::Statements => "a statement",
            Self::Attribute => "`data-`, a plugin name, `:key` or `__modifier`",
            Self::Arguments => "an argument",
            Self::Parameters => "a parameter name",
            Self::Array => "an element",
            Self::Object => "a property (`key: value`) or `...spread`",
            Self::Parenthesized | Self::Index => "an expression",
        }
    }

    /// The token that closes this context, if it is delimited
    pub fn closer(&self) -> Option<SyntaxKind> {
        match self {
            Self::Arguments | Self::Parameters | Self::Parenthesized => Some(SyntaxKind::R_PAREN),
            Self::Array | Self::Index => Some(SyntaxKind::R_BRACKET),
            Self::Object => Some(SyntaxKind::R_BRACE),
            Self::Statements | Self::Attribute => None,
        }
    }

    /// Error code reported when the closing token is missing
    pub fn unclosed_code(&self) -> ErrorCode {
        match self {
            Self::Arguments => ErrorCode::E0404,
            Self::Parameters | Self::Parenthesized => ErrorCode::E0203,
            Self::Array | Self::Index => ErrorCode::E0204,
            Self::Object => ErrorCode::E0202,
            Self::Statements | Self::Attribute => ErrorCode::E0902,
        }
    }
}
