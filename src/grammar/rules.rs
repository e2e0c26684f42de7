//! The Datastar grammar definition
//!
//! Static data only: symbol names, operator precedence and the plugin
//! vocabulary. [`GrammarTable::build`](super::GrammarTable::build) validates
//! and indexes it once per process.

use super::table::{Assoc, GrammarDefinition, PluginTier};
use crate::parser::SyntaxKind;

/// Binding power of the constructs that are not plain binary operators
///
/// Higher binds tighter. Binary operators sit between `CONDITIONAL` and
/// `PREFIX` (see [`BINARY_OPERATORS`]).
pub struct Precedence;

impl Precedence {
    /// Statement level (`a = 1, b = 2`)
    pub const SEQUENCE: u8 = 0;
    /// `x => body`
    pub const ARROW: u8 = 1;
    /// `c ? a : b`
    pub const CONDITIONAL: u8 = 2;
    /// `!x`, `-x`, `typeof x`, ...
    pub const PREFIX: u8 = 15;
    /// `x++`, `x--`
    pub const POSTFIX: u8 = 16;
    /// `f()`, `a.b`, `a?.b`, `a[i]`
    pub const MEMBER: u8 = 17;
}

use SyntaxKind::*;

pub(crate) const SYMBOLS: &[(SyntaxKind, &str, bool)] = &[
    (WHITESPACE, "whitespace", false),
    (IDENT, "identifier", true),
    (SIGNAL_IDENT, "signal_identifier", true),
    (NUMBER, "number_literal", true),
    (STRING, "string_content", false),
    (DATA_PREFIX, "data-", false),
    (PLUGIN_NAME, "plugin_name", true),
    (PLUGIN_KEY, "plugin_key", true),
    (MODIFIER, "modifier", true),
    (UNDERSCORE_UNDERSCORE, "__", false),
    (L_PAREN, "(", false),
    (R_PAREN, ")", false),
    (L_BRACKET, "[", false),
    (R_BRACKET, "]", false),
    (L_BRACE, "{", false),
    (R_BRACE, "}", false),
    (COMMA, ",", false),
    (SEMICOLON, ";", false),
    (COLON, ":", false),
    (DOT, ".", false),
    (DOT_DOT_DOT, "...", false),
    (QUESTION_DOT, "?.", false),
    (QUESTION, "?", false),
    (DOLLAR, "$", false),
    (AT, "@", false),
    (FAT_ARROW, "=>", false),
    (EQ, "=", false),
    (PLUS_EQ, "+=", false),
    (MINUS_EQ, "-=", false),
    (STAR_EQ, "*=", false),
    (SLASH_EQ, "/=", false),
    (PERCENT_EQ, "%=", false),
    (STAR_STAR_EQ, "**=", false),
    (AMP_AMP_EQ, "&&=", false),
    (PIPE_PIPE_EQ, "||=", false),
    (QUESTION_QUESTION_EQ, "??=", false),
    (AMP_EQ, "&=", false),
    (PIPE_EQ, "|=", false),
    (CARET_EQ, "^=", false),
    (LT_LT_EQ, "<<=", false),
    (GT_GT_EQ, ">>=", false),
    (GT_GT_GT_EQ, ">>>=", false),
    (EQ_EQ, "==", false),
    (EQ_EQ_EQ, "===", false),
    (BANG_EQ, "!=", false),
    (BANG_EQ_EQ, "!==", false),
    (LT, "<", false),
    (LT_EQ, "<=", false),
    (GT, ">", false),
    (GT_EQ, ">=", false),
    (LT_LT, "<<", false),
    (GT_GT, ">>", false),
    (GT_GT_GT, ">>>", false),
    (PLUS, "+", false),
    (MINUS, "-", false),
    (STAR, "*", false),
    (SLASH, "/", false),
    (PERCENT, "%", false),
    (STAR_STAR, "**", false),
    (AMP, "&", false),
    (AMP_AMP, "&&", false),
    (PIPE, "|", false),
    (PIPE_PIPE, "||", false),
    (CARET, "^", false),
    (TILDE, "~", false),
    (BANG, "!", false),
    (QUESTION_QUESTION, "??", false),
    (PLUS_PLUS, "++", false),
    (MINUS_MINUS, "--", false),
    (TRUE_KW, "true", false),
    (FALSE_KW, "false", false),
    (NULL_KW, "null_literal", true),
    (UNDEFINED_KW, "undefined_literal", true),
    (TYPEOF_KW, "typeof", false),
    (VOID_KW, "void", false),
    (DELETE_KW, "delete", false),
    (IN_KW, "in", false),
    (INSTANCEOF_KW, "instanceof", false),
    (SOURCE_FILE, "source_file", true),
    (DATASTAR_ATTRIBUTE, "datastar_attribute", true),
    (EXPRESSION_STATEMENT, "expression_statement", true),
    (ASSIGNMENT_STATEMENT, "assignment_statement", true),
    (SEQUENCE_EXPRESSION, "sequence_expression", true),
    (PRIMARY_EXPRESSION, "primary_expression", true),
    (SIGNAL_REFERENCE, "signal_reference", true),
    (ACTION_CALL, "action_call", true),
    (ACTION_NAME, "action_name", true),
    (BINARY_EXPRESSION, "binary_expression", true),
    (UNARY_EXPRESSION, "unary_expression", true),
    (CONDITIONAL_EXPRESSION, "conditional_expression", true),
    (CALL_EXPRESSION, "call_expression", true),
    (MEMBER_EXPRESSION, "member_expression", true),
    (COMPUTED_MEMBER_EXPRESSION, "computed_member_expression", true),
    (PARENTHESIZED_EXPRESSION, "parenthesized_expression", true),
    (ARROW_FUNCTION, "arrow_function", true),
    (PARAMETER_LIST, "parameter_list", true),
    (ARGUMENTS, "arguments", true),
    (LITERAL, "literal", true),
    (STRING_LITERAL, "string_literal", true),
    (BOOLEAN_LITERAL, "boolean_literal", true),
    (ARRAY, "array", true),
    (OBJECT, "object", true),
    (PROPERTY, "property", true),
    (SPREAD_ELEMENT, "spread_element", true),
    (ERROR, "ERROR", true),
    (EOF, "end", false),
];

/// Binary operators, loosest first
pub(crate) const BINARY_OPERATORS: &[(SyntaxKind, u8, Assoc)] = &[
    (QUESTION_QUESTION, 3, Assoc::Left),
    (PIPE_PIPE, 4, Assoc::Left),
    (AMP_AMP, 5, Assoc::Left),
    (PIPE, 6, Assoc::Left),
    (CARET, 7, Assoc::Left),
    (AMP, 8, Assoc::Left),
    (EQ_EQ, 9, Assoc::Left),
    (BANG_EQ, 9, Assoc::Left),
    (EQ_EQ_EQ, 9, Assoc::Left),
    (BANG_EQ_EQ, 9, Assoc::Left),
    (LT, 10, Assoc::Left),
    (LT_EQ, 10, Assoc::Left),
    (GT, 10, Assoc::Left),
    (GT_EQ, 10, Assoc::Left),
    (IN_KW, 10, Assoc::Left),
    (INSTANCEOF_KW, 10, Assoc::Left),
    (LT_LT, 11, Assoc::Left),
    (GT_GT, 11, Assoc::Left),
    (GT_GT_GT, 11, Assoc::Left),
    (PLUS, 12, Assoc::Left),
    (MINUS, 12, Assoc::Left),
    (STAR, 13, Assoc::Left),
    (SLASH, 13, Assoc::Left),
    (PERCENT, 13, Assoc::Left),
    (STAR_STAR, 14, Assoc::Left),
];

pub(crate) const PREFIX_OPERATORS: &[SyntaxKind] =
    &[BANG, TILDE, MINUS, PLUS, TYPEOF_KW, VOID_KW, DELETE_KW];

pub(crate) const POSTFIX_OPERATORS: &[SyntaxKind] = &[PLUS_PLUS, MINUS_MINUS];

pub(crate) const ASSIGNMENT_OPERATORS: &[SyntaxKind] = &[
    EQ,
    PLUS_EQ,
    MINUS_EQ,
    STAR_EQ,
    SLASH_EQ,
    PERCENT_EQ,
    STAR_STAR_EQ,
    AMP_AMP_EQ,
    PIPE_PIPE_EQ,
    QUESTION_QUESTION_EQ,
    AMP_EQ,
    PIPE_EQ,
    CARET_EQ,
    LT_LT_EQ,
    GT_GT_EQ,
    GT_GT_GT_EQ,
];

pub(crate) const PLUGINS: &[(&str, PluginTier)] = &[
    // Standard plugins
    ("attr", PluginTier::Standard),
    ("bind", PluginTier::Standard),
    ("class", PluginTier::Standard),
    ("computed", PluginTier::Standard),
    ("effect", PluginTier::Standard),
    ("ignore", PluginTier::Standard),
    ("ignore-morph", PluginTier::Standard),
    ("indicator", PluginTier::Standard),
    ("init", PluginTier::Standard),
    ("json-signals", PluginTier::Standard),
    ("on", PluginTier::Standard),
    ("on-intersect", PluginTier::Standard),
    ("on-interval", PluginTier::Standard),
    ("on-signal-patch", PluginTier::Standard),
    ("on-signal-patch-filter", PluginTier::Standard),
    ("preserve-attr", PluginTier::Standard),
    ("ref", PluginTier::Standard),
    ("show", PluginTier::Standard),
    ("signals", PluginTier::Standard),
    ("style", PluginTier::Standard),
    ("text", PluginTier::Standard),
    // Pro plugins
    ("animate", PluginTier::Pro),
    ("custom-validity", PluginTier::Pro),
    ("on-raf", PluginTier::Pro),
    ("on-resize", PluginTier::Pro),
    ("persist", PluginTier::Pro),
    ("query-string", PluginTier::Pro),
    ("replace-url", PluginTier::Pro),
    ("rocket", PluginTier::Pro),
    ("scroll-into-view", PluginTier::Pro),
    ("view-transition", PluginTier::Pro),
];

/// The grammar shipped with this crate
pub const DATASTAR: GrammarDefinition = GrammarDefinition {
    name: "datastar",
    symbols: SYMBOLS,
    binary_operators: BINARY_OPERATORS,
    prefix_operators: PREFIX_OPERATORS,
    postfix_operators: POSTFIX_OPERATORS,
    assignment_operators: ASSIGNMENT_OPERATORS,
    plugins: PLUGINS,
};
