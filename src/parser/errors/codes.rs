//! Error code definitions for parser diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (invalid tokens)
//! - E02xx: Structural errors (delimiters, separators)
//! - E03xx: Attribute name errors (plugin, key, modifier)
//! - E04xx: Expression errors
//! - E09xx: Generic/fallback errors

use std::fmt;

/// Error codes for parser diagnostics
///
/// Each error code represents a specific category of parse error,
/// enabling filtering, documentation, and editor integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Lexical errors (invalid tokens)
    // =========================================================================
    /// Invalid or unexpected character in source
    E0101,
    /// Unterminated string literal
    E0102,

    // =========================================================================
    // E02xx: Structural errors (delimiters, separators)
    // =========================================================================
    /// Missing `,` or `;` between elements
    E0201,
    /// Unclosed brace `{`
    E0202,
    /// Unclosed parenthesis `(`
    E0203,
    /// Unclosed bracket `[`
    E0204,
    /// Unexpected closing delimiter
    E0205,

    // =========================================================================
    // E03xx: Attribute name errors
    // =========================================================================
    /// Plugin name not in the plugin table
    E0301,
    /// Invalid plugin key after `:`
    E0302,
    /// Invalid modifier after `__`
    E0303,
    /// Unexpected token in attribute name
    E0304,

    // =========================================================================
    // E04xx: Expression errors
    // =========================================================================
    /// Missing operand in expression
    E0402,
    /// Left-hand side cannot be assigned to
    E0403,
    /// Unclosed function/action call
    E0404,
    /// Invalid argument in call
    E0405,
    /// Missing expression where expected
    E0406,
    /// Nesting exceeds the configured limit
    E0407,

    // =========================================================================
    // E09xx: Generic/fallback errors
    // =========================================================================
    /// Unexpected token in current context
    E0901,
    /// Expected a specific token
    E0902,
}

impl ErrorCode {
    /// Every error code, in numeric order
    pub const ALL: &'static [ErrorCode] = &[
        Self::E0101,
        Self::E0102,
        Self::E0201,
        Self::E0202,
        Self::E0203,
        Self::E0204,
        Self::E0205,
        Self::E0301,
        Self::E0302,
        Self::E0303,
        Self::E0304,
        Self::E0402,
        Self::E0403,
        Self::E0404,
        Self::E0405,
        Self::E0406,
        Self::E0407,
        Self::E0901,
        Self::E0902,
    ];

    /// Get the string representation of the error code (e.g., "E0201")
    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexical
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            // Structural
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
            Self::E0204 => "E0204",
            Self::E0205 => "E0205",
            // Attribute
            Self::E0301 => "E0301",
            Self::E0302 => "E0302",
            Self::E0303 => "E0303",
            Self::E0304 => "E0304",
            // Expression
            Self::E0402 => "E0402",
            Self::E0403 => "E0403",
            Self::E0404 => "E0404",
            Self::E0405 => "E0405",
            Self::E0406 => "E0406",
            Self::E0407 => "E0407",
            // Generic
            Self::E0901 => "E0901",
            Self::E0902 => "E0902",
        }
    }

    /// Get the default message template for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            // Lexical
            Self::E0101 => "invalid character",
            Self::E0102 => "unterminated string literal",
            // Structural
            Self::E0201 => "missing separator",
            Self::E0202 => "unclosed brace",
            Self::E0203 => "unclosed parenthesis",
            Self::E0204 => "unclosed bracket",
            Self::E0205 => "unexpected closing delimiter",
            // Attribute
            Self::E0301 => "unknown plugin",
            Self::E0302 => "invalid plugin key",
            Self::E0303 => "invalid modifier",
            Self::E0304 => "unexpected token in attribute name",
            // Expression
            Self::E0402 => "missing operand",
            Self::E0403 => "invalid assignment target",
            Self::E0404 => "unclosed call",
            Self::E0405 => "invalid argument",
            Self::E0406 => "expected expression",
            Self::E0407 => "expression nested too deeply",
            // Generic
            Self::E0901 => "unexpected token",
            Self::E0902 => "expected token",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
