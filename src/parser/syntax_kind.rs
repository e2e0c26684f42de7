//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree.
//! It follows the Datastar grammar structure: an attribute name
//! (`data-on:click__debounce.500ms`) or a sequence of expression statements.

/// All syntax kinds (tokens and nodes) in Datastar
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (statements, expressions, attributes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    WHITESPACE = 0,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,              // foo
    SIGNAL_IDENT,       // foo-bar (only after `$` and inside a signal path)
    NUMBER,             // 42, 3.14, 1e10
    STRING,             // "a", 'a', `a`

    // =========================================================================
    // ATTRIBUTE TOKENS
    // =========================================================================
    DATA_PREFIX,        // data-
    PLUGIN_NAME,        // on, bind, signals, ...
    PLUGIN_KEY,         // click (in data-on:click)
    MODIFIER,           // debounce.500ms
    UNDERSCORE_UNDERSCORE, // __

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_PAREN,            // (
    R_PAREN,            // )
    L_BRACKET,          // [
    R_BRACKET,          // ]
    L_BRACE,            // {
    R_BRACE,            // }
    COMMA,              // ,
    SEMICOLON,          // ;
    COLON,              // :
    DOT,                // .
    DOT_DOT_DOT,        // ...
    QUESTION_DOT,       // ?.
    QUESTION,           // ?
    DOLLAR,             // $
    AT,                 // @
    FAT_ARROW,          // =>

    // =========================================================================
    // ASSIGNMENT OPERATORS
    // =========================================================================
    EQ,                 // =
    PLUS_EQ,            // +=
    MINUS_EQ,           // -=
    STAR_EQ,            // *=
    SLASH_EQ,           // /=
    PERCENT_EQ,         // %=
    STAR_STAR_EQ,       // **=
    AMP_AMP_EQ,         // &&=
    PIPE_PIPE_EQ,       // ||=
    QUESTION_QUESTION_EQ, // ??=
    AMP_EQ,             // &=
    PIPE_EQ,            // |=
    CARET_EQ,           // ^=
    LT_LT_EQ,           // <<=
    GT_GT_EQ,           // >>=
    GT_GT_GT_EQ,        // >>>=

    // =========================================================================
    // OPERATORS
    // =========================================================================
    EQ_EQ,              // ==
    EQ_EQ_EQ,           // ===
    BANG_EQ,            // !=
    BANG_EQ_EQ,         // !==
    LT,                 // <
    LT_EQ,              // <=
    GT,                 // >
    GT_EQ,              // >=
    LT_LT,              // <<
    GT_GT,              // >>
    GT_GT_GT,           // >>>
    PLUS,               // +
    MINUS,              // -
    STAR,               // *
    SLASH,              // /
    PERCENT,            // %
    STAR_STAR,          // **
    AMP,                // &
    AMP_AMP,            // &&
    PIPE,               // |
    PIPE_PIPE,          // ||
    CARET,              // ^
    TILDE,              // ~
    BANG,               // !
    QUESTION_QUESTION,  // ??
    PLUS_PLUS,          // ++
    MINUS_MINUS,        // --

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    TRUE_KW,
    FALSE_KW,
    NULL_KW,
    UNDEFINED_KW,
    TYPEOF_KW,
    VOID_KW,
    DELETE_KW,
    IN_KW,
    INSTANCEOF_KW,

    // =========================================================================
    // NODES - Root
    // =========================================================================
    SOURCE_FILE,
    DATASTAR_ATTRIBUTE,

    // =========================================================================
    // NODES - Statements
    // =========================================================================
    EXPRESSION_STATEMENT,
    ASSIGNMENT_STATEMENT,
    SEQUENCE_EXPRESSION,

    // =========================================================================
    // NODES - Expressions
    // =========================================================================
    PRIMARY_EXPRESSION,
    SIGNAL_REFERENCE,
    ACTION_CALL,
    ACTION_NAME,
    BINARY_EXPRESSION,
    UNARY_EXPRESSION,
    CONDITIONAL_EXPRESSION,
    CALL_EXPRESSION,
    MEMBER_EXPRESSION,
    COMPUTED_MEMBER_EXPRESSION,
    PARENTHESIZED_EXPRESSION,
    ARROW_FUNCTION,
    PARAMETER_LIST,
    ARGUMENTS,

    // =========================================================================
    // NODES - Literals and collections
    // =========================================================================
    LITERAL,
    STRING_LITERAL,
    BOOLEAN_LITERAL,
    ARRAY,
    OBJECT,
    PROPERTY,
    SPREAD_ELEMENT,

    // =========================================================================
    // SPECIAL
    // =========================================================================
    /// Unrecognized input: a lexer error token or a node wrapping a malformed span
    ERROR,
    /// End of input; returned by lookahead, never stored in a tree
    EOF,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE)
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::TRUE_KW as u16) && (self as u16) <= (Self::INSTANCEOF_KW as u16)
    }

    /// Check if this is a punctuation or operator token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_PAREN as u16) && (self as u16) <= (Self::MINUS_MINUS as u16)
    }

    /// Check if this is an assignment operator token (`=`, `+=`, ...)
    pub fn is_assignment_op(self) -> bool {
        (self as u16) >= (Self::EQ as u16) && (self as u16) <= (Self::GT_GT_GT_EQ as u16)
    }

    /// Check if this is a literal token
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::NUMBER | Self::STRING | Self::TRUE_KW | Self::FALSE_KW | Self::NULL_KW | Self::UNDEFINED_KW
        )
    }

    /// Check if this kind only ever appears as a leaf
    pub fn is_token(self) -> bool {
        (self as u16) < (Self::SOURCE_FILE as u16) || self == Self::ERROR
    }

    /// Opening delimiters `(`, `[`, `{`
    pub fn is_opening_delimiter(self) -> bool {
        matches!(self, Self::L_PAREN | Self::L_BRACKET | Self::L_BRACE)
    }

    /// Closing delimiters `)`, `]`, `}`
    pub fn is_closing_delimiter(self) -> bool {
        matches!(self, Self::R_PAREN | Self::R_BRACKET | Self::R_BRACE)
    }

    /// Convert a raw kind value, rejecting values outside the enum
    pub fn from_raw(raw: u16) -> Option<SyntaxKind> {
        if raw < SyntaxKind::__LAST as u16 {
            Some(rowan::SyntaxKind(raw).into())
        } else {
            None
        }
    }

    /// Iterate over every kind, in declaration order
    pub fn all() -> impl Iterator<Item = SyntaxKind> {
        (0..SyntaxKind::__LAST as u16).filter_map(SyntaxKind::from_raw)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DatastarLanguage {}

impl rowan::Language for DatastarLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<DatastarLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<DatastarLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<DatastarLanguage>;
pub type SyntaxNodeChildren = rowan::SyntaxNodeChildren<DatastarLanguage>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_round_trip_covers_every_kind() {
        let kinds: Vec<_> = SyntaxKind::all().collect();
        assert_eq!(kinds.len(), SyntaxKind::__LAST as usize);
        assert_eq!(kinds[0], SyntaxKind::WHITESPACE);
        assert_eq!(*kinds.last().unwrap(), SyntaxKind::EOF);
        assert!(SyntaxKind::from_raw(SyntaxKind::__LAST as u16).is_none());
    }

    #[test]
    fn test_classification() {
        assert!(SyntaxKind::WHITESPACE.is_trivia());
        assert!(SyntaxKind::TYPEOF_KW.is_keyword());
        assert!(!SyntaxKind::IDENT.is_keyword());
        assert!(SyntaxKind::GT_GT_GT_EQ.is_assignment_op());
        assert!(!SyntaxKind::EQ_EQ.is_assignment_op());
        assert!(SyntaxKind::MINUS_MINUS.is_punct());
        assert!(SyntaxKind::ERROR.is_token());
        assert!(!SyntaxKind::BINARY_EXPRESSION.is_token());
    }
}
