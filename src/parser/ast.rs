//! Typed AST wrappers over the untyped rowan CST.
//!
//! This module provides strongly-typed accessors for Datastar syntax nodes.
//! Each struct wraps a SyntaxNode and provides methods to access children.
//! Accessors return `Option` because the tree may be incomplete: the parser
//! keeps going after errors, leaving `ERROR` nodes where pieces are missing.

use std::ops::Range;

use smol_str::SmolStr;

use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

// ============================================================================
// Helper macros
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

/// Direct child tokens of a node, skipping trivia
fn tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> + '_ {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| !t.kind().is_trivia())
}

fn token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    tokens(node).find(|t| t.kind() == kind)
}

fn has_token(node: &SyntaxNode, kind: SyntaxKind) -> bool {
    token(node, kind).is_some()
}

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    /// The attribute name, when the source was parsed as one
    pub fn attribute(&self) -> Option<DatastarAttribute> {
        self.0.children().find_map(DatastarAttribute::cast)
    }

    /// Top-level statements, with sequences flattened
    pub fn statements(&self) -> impl Iterator<Item = Statement> + '_ {
        self.0.children().filter_map(Statement::cast).flat_map(|stmt| match stmt {
            Statement::Sequence(seq) => seq.statements().collect::<Vec<_>>(),
            other => vec![other],
        })
    }
}

// ============================================================================
// Attribute
// ============================================================================

ast_node!(DatastarAttribute, DATASTAR_ATTRIBUTE);

impl DatastarAttribute {
    pub fn plugin_name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::PLUGIN_NAME)
    }

    /// The `click` of `data-on:click`
    pub fn key(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::PLUGIN_KEY)
    }

    /// The whole modifier token, e.g. `debounce.500ms`
    pub fn modifier(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::MODIFIER)
    }

    /// The modifier up to its `.` argument: `debounce` of `debounce.500ms`
    pub fn modifier_name(&self) -> Option<SmolStr> {
        let modifier = self.modifier()?;
        let text = modifier.text();
        Some(SmolStr::new(text.split_once('.').map_or(text, |(name, _)| name)))
    }

    /// The modifier's `.` argument: `500ms` of `debounce.500ms`
    pub fn modifier_argument(&self) -> Option<SmolStr> {
        let modifier = self.modifier()?;
        modifier.text().split_once('.').map(|(_, arg)| SmolStr::new(arg))
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Statement {
    Expression(ExpressionStatement),
    Assignment(AssignmentStatement),
    Sequence(SequenceExpression),
}

impl AstNode for Statement {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::EXPRESSION_STATEMENT
                | SyntaxKind::ASSIGNMENT_STATEMENT
                | SyntaxKind::SEQUENCE_EXPRESSION
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::EXPRESSION_STATEMENT => Some(Self::Expression(ExpressionStatement(node))),
            SyntaxKind::ASSIGNMENT_STATEMENT => Some(Self::Assignment(AssignmentStatement(node))),
            SyntaxKind::SEQUENCE_EXPRESSION => Some(Self::Sequence(SequenceExpression(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Expression(n) => n.syntax(),
            Self::Assignment(n) => n.syntax(),
            Self::Sequence(n) => n.syntax(),
        }
    }
}

ast_node!(ExpressionStatement, EXPRESSION_STATEMENT);

impl ExpressionStatement {
    pub fn expr(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

ast_node!(AssignmentStatement, ASSIGNMENT_STATEMENT);

impl AssignmentStatement {
    /// The assigned signal, member or computed member
    pub fn target(&self) -> Option<Expr> {
        self.0.first_child().and_then(Expr::cast)
    }

    pub fn op(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| t.kind().is_assignment_op())
    }

    pub fn op_kind(&self) -> Option<SyntaxKind> {
        self.op().map(|t| t.kind())
    }

    /// Right-hand side
    pub fn value(&self) -> Option<Expr> {
        let op = self.op()?;
        self.0
            .children()
            .filter(|n| n.text_range().start() >= op.text_range().end())
            .find_map(Expr::cast)
    }
}

ast_node!(SequenceExpression, SEQUENCE_EXPRESSION);

impl SequenceExpression {
    pub fn statements(&self) -> impl Iterator<Item = Statement> + '_ {
        self.0.children().filter_map(Statement::cast)
    }
}

// ============================================================================
// Expressions
// ============================================================================

/// Any expression node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Primary(PrimaryExpression),
    /// A bare signal, as the target of an assignment
    Signal(SignalReference),
    Binary(BinaryExpression),
    Unary(UnaryExpression),
    Conditional(ConditionalExpression),
    Call(CallExpression),
    Member(MemberExpression),
    ComputedMember(ComputedMemberExpression),
    Parenthesized(ParenthesizedExpression),
    Arrow(ArrowFunction),
}

impl AstNode for Expr {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::PRIMARY_EXPRESSION
                | SyntaxKind::SIGNAL_REFERENCE
                | SyntaxKind::BINARY_EXPRESSION
                | SyntaxKind::UNARY_EXPRESSION
                | SyntaxKind::CONDITIONAL_EXPRESSION
                | SyntaxKind::CALL_EXPRESSION
                | SyntaxKind::MEMBER_EXPRESSION
                | SyntaxKind::COMPUTED_MEMBER_EXPRESSION
                | SyntaxKind::PARENTHESIZED_EXPRESSION
                | SyntaxKind::ARROW_FUNCTION
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::PRIMARY_EXPRESSION => Some(Self::Primary(PrimaryExpression(node))),
            SyntaxKind::SIGNAL_REFERENCE => Some(Self::Signal(SignalReference(node))),
            SyntaxKind::BINARY_EXPRESSION => Some(Self::Binary(BinaryExpression(node))),
            SyntaxKind::UNARY_EXPRESSION => Some(Self::Unary(UnaryExpression(node))),
            SyntaxKind::CONDITIONAL_EXPRESSION => {
                Some(Self::Conditional(ConditionalExpression(node)))
            }
            SyntaxKind::CALL_EXPRESSION => Some(Self::Call(CallExpression(node))),
            SyntaxKind::MEMBER_EXPRESSION => Some(Self::Member(MemberExpression(node))),
            SyntaxKind::COMPUTED_MEMBER_EXPRESSION => {
                Some(Self::ComputedMember(ComputedMemberExpression(node)))
            }
            SyntaxKind::PARENTHESIZED_EXPRESSION => {
                Some(Self::Parenthesized(ParenthesizedExpression(node)))
            }
            SyntaxKind::ARROW_FUNCTION => Some(Self::Arrow(ArrowFunction(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Primary(n) => n.syntax(),
            Self::Signal(n) => n.syntax(),
            Self::Binary(n) => n.syntax(),
            Self::Unary(n) => n.syntax(),
            Self::Conditional(n) => n.syntax(),
            Self::Call(n) => n.syntax(),
            Self::Member(n) => n.syntax(),
            Self::ComputedMember(n) => n.syntax(),
            Self::Parenthesized(n) => n.syntax(),
            Self::Arrow(n) => n.syntax(),
        }
    }
}

ast_node!(PrimaryExpression, PRIMARY_EXPRESSION);

impl PrimaryExpression {
    /// A plain identifier (`el`, `evt`)
    pub fn ident(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::IDENT)
    }

    pub fn signal(&self) -> Option<SignalReference> {
        self.0.children().find_map(SignalReference::cast)
    }

    pub fn action_call(&self) -> Option<ActionCall> {
        self.0.children().find_map(ActionCall::cast)
    }

    pub fn literal(&self) -> Option<Literal> {
        self.0.children().find_map(Literal::cast)
    }

    pub fn array(&self) -> Option<Array> {
        self.0.children().find_map(Array::cast)
    }

    pub fn object(&self) -> Option<Object> {
        self.0.children().find_map(Object::cast)
    }
}

ast_node!(SignalReference, SIGNAL_REFERENCE);

/// One step of a signal path after the root name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// `.name` or `?.name`
    Name { name: SyntaxToken, optional: bool },
    /// `[expr]` or `?.[expr]`
    Index { index: Option<Expr>, optional: bool },
}

impl SignalReference {
    /// The first name after `$`
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::SIGNAL_IDENT)
    }

    /// Path segments after the root name, in order
    pub fn segments(&self) -> Vec<PathSegment> {
        let mut segments = Vec::new();
        let mut optional = false;
        let mut seen_root = false;
        for element in self.0.children_with_tokens() {
            match element {
                rowan::NodeOrToken::Token(t) => match t.kind() {
                    SyntaxKind::QUESTION_DOT => optional = true,
                    SyntaxKind::DOT => optional = false,
                    SyntaxKind::SIGNAL_IDENT if !seen_root => seen_root = true,
                    SyntaxKind::SIGNAL_IDENT => {
                        segments.push(PathSegment::Name { name: t, optional });
                        optional = false;
                    }
                    SyntaxKind::L_BRACKET => {}
                    SyntaxKind::R_BRACKET => optional = false,
                    _ => {}
                },
                rowan::NodeOrToken::Node(n) => {
                    if let Some(index) = Expr::cast(n) {
                        segments.push(PathSegment::Index {
                            index: Some(index),
                            optional,
                        });
                    }
                }
            }
        }
        segments
    }

    /// The dotted path (`user.name`), if the reference has no index segments
    pub fn path(&self) -> Option<SmolStr> {
        let mut path = self.name()?.text().to_string();
        for segment in self.segments() {
            match segment {
                PathSegment::Name { name, .. } => {
                    path.push('.');
                    path.push_str(name.text());
                }
                PathSegment::Index { .. } => return None,
            }
        }
        Some(SmolStr::from(path))
    }
}

ast_node!(ActionCall, ACTION_CALL);

impl ActionCall {
    /// The name after `@`
    pub fn name(&self) -> Option<SyntaxToken> {
        let action_name = self.0.children().find(|n| n.kind() == SyntaxKind::ACTION_NAME)?;
        token(&action_name, SyntaxKind::IDENT)
    }

    pub fn arguments(&self) -> Option<Arguments> {
        self.0.children().find_map(Arguments::cast)
    }

    /// Argument elements; empty for `@get()`
    pub fn args(&self) -> Vec<Element> {
        self.arguments()
            .map(|args| args.elements().collect())
            .unwrap_or_default()
    }
}

ast_node!(Arguments, ARGUMENTS);

impl Arguments {
    pub fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        self.0.children().filter_map(Element::cast)
    }
}

ast_node!(BinaryExpression, BINARY_EXPRESSION);

impl BinaryExpression {
    pub fn lhs(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn rhs(&self) -> Option<Expr> {
        self.0.children().filter_map(Expr::cast).nth(1)
    }

    pub fn op(&self) -> Option<SyntaxToken> {
        tokens(&self.0).next()
    }

    pub fn op_kind(&self) -> Option<SyntaxKind> {
        self.op().map(|t| t.kind())
    }
}

ast_node!(UnaryExpression, UNARY_EXPRESSION);

impl UnaryExpression {
    pub fn op(&self) -> Option<SyntaxToken> {
        tokens(&self.0).next()
    }

    pub fn op_kind(&self) -> Option<SyntaxKind> {
        self.op().map(|t| t.kind())
    }

    pub fn operand(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    /// `x++` / `x--` rather than a prefix operator
    pub fn is_postfix(&self) -> bool {
        matches!(
            self.0.first_child_or_token().map(|e| e.kind()),
            Some(kind) if !kind.is_token()
        )
    }
}

ast_node!(ConditionalExpression, CONDITIONAL_EXPRESSION);

impl ConditionalExpression {
    pub fn condition(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn then_branch(&self) -> Option<Expr> {
        self.0.children().filter_map(Expr::cast).nth(1)
    }

    pub fn else_branch(&self) -> Option<Expr> {
        self.0.children().filter_map(Expr::cast).nth(2)
    }
}

ast_node!(CallExpression, CALL_EXPRESSION);

impl CallExpression {
    pub fn callee(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn arguments(&self) -> Option<Arguments> {
        self.0.children().find_map(Arguments::cast)
    }
}

ast_node!(MemberExpression, MEMBER_EXPRESSION);

impl MemberExpression {
    pub fn object(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn property(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::IDENT)
    }

    /// `a?.b`
    pub fn is_optional(&self) -> bool {
        has_token(&self.0, SyntaxKind::QUESTION_DOT)
    }
}

ast_node!(ComputedMemberExpression, COMPUTED_MEMBER_EXPRESSION);

impl ComputedMemberExpression {
    pub fn object(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn index(&self) -> Option<Expr> {
        self.0.children().filter_map(Expr::cast).nth(1)
    }

    /// `a?.[i]`
    pub fn is_optional(&self) -> bool {
        has_token(&self.0, SyntaxKind::QUESTION_DOT)
    }
}

ast_node!(ParenthesizedExpression, PARENTHESIZED_EXPRESSION);

impl ParenthesizedExpression {
    pub fn expr(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

ast_node!(ArrowFunction, ARROW_FUNCTION);

impl ArrowFunction {
    /// Parameter names, for both `x => ...` and `(a, b) => ...`
    pub fn params(&self) -> Vec<SyntaxToken> {
        match self.0.children().find(|n| n.kind() == SyntaxKind::PARAMETER_LIST) {
            Some(list) => tokens(&list).filter(|t| t.kind() == SyntaxKind::IDENT).collect(),
            None => token(&self.0, SyntaxKind::IDENT).into_iter().collect(),
        }
    }

    pub fn body(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

// ============================================================================
// Literals and collections
// ============================================================================

ast_node!(Literal, LITERAL);

/// What a literal is
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    String(StringLiteral),
    Number(SyntaxToken),
    Boolean(bool),
    Null,
    Undefined,
}

impl Literal {
    pub fn kind(&self) -> Option<LiteralKind> {
        if let Some(string) = self.0.children().find_map(StringLiteral::cast) {
            return Some(LiteralKind::String(string));
        }
        if let Some(boolean) = self.0.children().find(|n| n.kind() == SyntaxKind::BOOLEAN_LITERAL) {
            return Some(LiteralKind::Boolean(has_token(&boolean, SyntaxKind::TRUE_KW)));
        }
        let token = tokens(&self.0).next()?;
        match token.kind() {
            SyntaxKind::NUMBER => Some(LiteralKind::Number(token)),
            SyntaxKind::NULL_KW => Some(LiteralKind::Null),
            SyntaxKind::UNDEFINED_KW => Some(LiteralKind::Undefined),
            _ => None,
        }
    }

    /// Numeric value of a number literal
    pub fn number_value(&self) -> Option<f64> {
        match self.kind()? {
            LiteralKind::Number(token) => token.text().parse().ok(),
            _ => None,
        }
    }

    pub fn bool_value(&self) -> Option<bool> {
        match self.kind()? {
            LiteralKind::Boolean(value) => Some(value),
            _ => None,
        }
    }
}

ast_node!(StringLiteral, STRING_LITERAL);

impl StringLiteral {
    pub fn token(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::STRING)
    }

    /// The quote character: `"`, `'` or `` ` ``
    pub fn quote(&self) -> Option<char> {
        self.token()?.text().chars().next()
    }

    /// The string's value with escape sequences decoded
    pub fn value(&self) -> Option<String> {
        let token = self.token()?;
        let text = token.text();
        let inner = text.get(1..text.len().saturating_sub(1))?;
        Some(unescape(inner))
    }
}

/// Byte ranges of the escape sequences in a string token's text, with the
/// character each one stands for (`None` for a line continuation)
pub(crate) fn escape_sequences(text: &str) -> Vec<(Range<usize>, Option<char>)> {
    let bytes = text.as_bytes();
    let mut escapes = Vec::new();
    let mut idx = 0;
    while idx < bytes.len() {
        if bytes[idx] != b'\\' {
            idx += 1;
            continue;
        }
        let start = idx;
        let Some(c) = text[idx + 1..].chars().next() else {
            break;
        };
        let mut end = idx + 1 + c.len_utf8();
        let value = match c {
            'n' => Some('\n'),
            't' => Some('\t'),
            'r' => Some('\r'),
            'b' => Some('\u{8}'),
            'f' => Some('\u{c}'),
            'v' => Some('\u{b}'),
            '0'..='7' => {
                // Legacy octal: at most three digits, never above \377
                let max = if c <= '3' { 2 } else { 1 };
                end += bytes[end..]
                    .iter()
                    .take(max)
                    .take_while(|b| (b'0'..=b'7').contains(*b))
                    .count();
                u32::from_str_radix(&text[start + 1..end], 8)
                    .ok()
                    .and_then(char::from_u32)
            }
            '\n' => None,
            'x' => match hex_value(text.get(end..end + 2)) {
                Some(value) => {
                    end += 2;
                    char::from_u32(value)
                }
                None => Some('x'),
            },
            'u' if text[end..].starts_with('{') => match text[end..].find('}') {
                Some(close) => {
                    let value = hex_value(text.get(end + 1..end + close));
                    end += close + 1;
                    value.and_then(char::from_u32).or(Some('\u{fffd}'))
                }
                None => Some('u'),
            },
            'u' => match hex_value(text.get(end..end + 4)) {
                Some(value) => {
                    end += 4;
                    Some(char::from_u32(value).unwrap_or('\u{fffd}'))
                }
                None => Some('u'),
            },
            other => Some(other),
        };
        escapes.push((start..end, value));
        idx = end;
    }
    escapes
}

fn hex_value(digits: Option<&str>) -> Option<u32> {
    let digits = digits?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

/// Decode the escape sequences of a string literal's contents
pub fn unescape(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut last = 0;
    for (range, value) in escape_sequences(inner) {
        out.push_str(&inner[last..range.start]);
        if let Some(c) = value {
            out.push(c);
        }
        last = range.end;
    }
    out.push_str(&inner[last..]);
    out
}

/// An item of an array or argument list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Element {
    Expr(Expr),
    Spread(SpreadElement),
}

impl AstNode for Element {
    fn can_cast(kind: SyntaxKind) -> bool {
        kind == SyntaxKind::SPREAD_ELEMENT || Expr::can_cast(kind)
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        if node.kind() == SyntaxKind::SPREAD_ELEMENT {
            Some(Self::Spread(SpreadElement(node)))
        } else {
            Expr::cast(node).map(Self::Expr)
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Expr(n) => n.syntax(),
            Self::Spread(n) => n.syntax(),
        }
    }
}

ast_node!(Array, ARRAY);

impl Array {
    pub fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        self.0.children().filter_map(Element::cast)
    }
}

ast_node!(Object, OBJECT);

impl Object {
    pub fn properties(&self) -> impl Iterator<Item = Property> + '_ {
        self.0.children().filter_map(Property::cast)
    }

    pub fn spreads(&self) -> impl Iterator<Item = SpreadElement> + '_ {
        self.0.children().filter_map(SpreadElement::cast)
    }
}

ast_node!(Property, PROPERTY);

/// The key of an object property
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    Ident(SyntaxToken),
    String(StringLiteral),
    Computed(Option<Expr>),
}

impl Property {
    pub fn key(&self) -> Option<PropertyKey> {
        for element in self.0.children_with_tokens() {
            match element {
                rowan::NodeOrToken::Token(t) if t.kind() == SyntaxKind::IDENT => {
                    return Some(PropertyKey::Ident(t));
                }
                rowan::NodeOrToken::Token(t) if t.kind() == SyntaxKind::L_BRACKET => {
                    let index = self.0.children().find_map(Expr::cast);
                    return Some(PropertyKey::Computed(index));
                }
                rowan::NodeOrToken::Node(n) if n.kind() == SyntaxKind::STRING_LITERAL => {
                    return Some(PropertyKey::String(StringLiteral(n)));
                }
                rowan::NodeOrToken::Token(t) if t.kind() == SyntaxKind::COLON => return None,
                _ => {}
            }
        }
        None
    }

    /// The key as a string, unless it is computed
    pub fn key_name(&self) -> Option<String> {
        match self.key()? {
            PropertyKey::Ident(t) => Some(t.text().to_string()),
            PropertyKey::String(s) => s.value(),
            PropertyKey::Computed(_) => None,
        }
    }

    pub fn value(&self) -> Option<Expr> {
        let colon = token(&self.0, SyntaxKind::COLON)?;
        self.0
            .children()
            .filter(|n| n.text_range().start() >= colon.text_range().end())
            .find_map(Expr::cast)
    }
}

ast_node!(SpreadElement, SPREAD_ELEMENT);

impl SpreadElement {
    pub fn expr(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}
