//! Recursive descent parser for Datastar
//!
//! Builds a rowan GreenNode tree from tokens. Statements, attribute names and
//! collections are parsed by recursive descent; operator expressions by
//! precedence climbing over the grammar table's operator entries.
//! Supports error recovery and produces a lossless CST: every token,
//! including whitespace and invalid input, ends up in the tree.

use rayon::prelude::*;
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, NodeOrToken, TextRange, TextSize};
use rustc_hash::FxHashMap;
use tracing::trace;

use super::errors::{ErrorCode, ParseContext, SyntaxError};
use super::lexer::{self, Token};
use super::parse::Parse;
use super::syntax_kind::SyntaxKind;
use crate::config::{ParserConfig, SourceMode};
use crate::grammar::{GrammarTable, Precedence};
use crate::language::{Language, language};

/// A Datastar parser
///
/// Holds the language and configuration only; every call to
/// [`parse`](Parser::parse) owns its working state, so one parser can be
/// shared between threads.
#[derive(Debug, Clone)]
pub struct Parser {
    language: Language,
    config: ParserConfig,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(language())
    }
}

impl Parser {
    pub fn new(language: Language) -> Self {
        Self::with_config(language, ParserConfig::default())
    }

    pub fn with_config(language: Language, config: ParserConfig) -> Self {
        Self { language, config }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a complete source text
    ///
    /// Never fails: unrecognized input becomes `ERROR` nodes and the tree
    /// always covers the whole text.
    pub fn parse(&self, text: &str) -> Parse {
        let mode = self.config.mode.resolve(text);
        let tokens = lexer::tokenize(text, mode, self.language.grammar());
        self.parse_tokens(&tokens, mode, TextSize::of(text))
    }

    /// Parse many texts in parallel
    pub fn parse_batch<S>(&self, texts: &[S]) -> Vec<Parse>
    where
        S: AsRef<str> + Sync,
    {
        texts.par_iter().map(|text| self.parse(text.as_ref())).collect()
    }

    pub(crate) fn parse_tokens(&self, tokens: &[Token<'_>], mode: SourceMode, len: TextSize) -> Parse {
        trace!(
            "[PARSE] {} tokens, {} bytes, mode {:?}",
            tokens.len(),
            u32::from(len),
            mode
        );
        let mut state = ParseState::new(tokens, self.language.grammar(), self.config.max_nesting, len);
        state.source_file(mode);
        state.finish(self.config.clone(), self.language)
    }

    /// Parse a single `[...]` or `{...}` collection in isolation
    ///
    /// `tokens` must span exactly the collection and `depth` is the number of
    /// nodes enclosing it. Returns `None` when the tokens do not form one
    /// complete collection or the nesting limit was reached.
    pub(crate) fn parse_collection(
        &self,
        tokens: &[Token<'_>],
        kind: SyntaxKind,
        depth: u32,
    ) -> Option<(GreenNode, Vec<SyntaxError>)> {
        let end = tokens.last()?.end();
        let mut state = ParseState::new(tokens, self.language.grammar(), self.config.max_nesting, end);
        state.depth = depth;
        match kind {
            SyntaxKind::ARRAY => state.array(),
            SyntaxKind::OBJECT => state.object(),
            _ => return None,
        }
        if state.pos != tokens.len() || state.errors.iter().any(|e| e.code == ErrorCode::E0407) {
            return None;
        }
        let closer = if kind == SyntaxKind::ARRAY {
            SyntaxKind::R_BRACKET
        } else {
            SyntaxKind::R_BRACE
        };
        let green = state.builder.finish();
        match green.children().last() {
            Some(NodeOrToken::Token(token)) if SyntaxKind::from(token.kind()) == closer => {
                Some((green, state.errors))
            }
            _ => None,
        }
    }
}

/// Parse a source text with the default parser
pub fn parse(text: &str) -> Parse {
    Parser::default().parse(text)
}

/// Parse a text as a `data-*` attribute name
pub fn parse_attribute(text: &str) -> Parse {
    Parser::with_config(language(), ParserConfig::default().with_mode(SourceMode::Attribute)).parse(text)
}

/// Parse a text as attribute-value statements
pub fn parse_expression(text: &str) -> Parse {
    Parser::with_config(language(), ParserConfig::default().with_mode(SourceMode::Expression)).parse(text)
}

/// Tokens that may begin an expression
fn starts_expression(grammar: &GrammarTable, kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::IDENT
            | SyntaxKind::DOLLAR
            | SyntaxKind::AT
            | SyntaxKind::NUMBER
            | SyntaxKind::STRING
            | SyntaxKind::TRUE_KW
            | SyntaxKind::FALSE_KW
            | SyntaxKind::NULL_KW
            | SyntaxKind::UNDEFINED_KW
            | SyntaxKind::L_PAREN
            | SyntaxKind::L_BRACKET
            | SyntaxKind::L_BRACE
    ) || grammar.is_prefix_operator(kind)
}

fn is_separator(kind: SyntaxKind) -> bool {
    matches!(kind, SyntaxKind::COMMA | SyntaxKind::SEMICOLON)
}

/// For every token index, the index of the first closing delimiter at or
/// after it that sits at the same bracket depth
///
/// Depth counts every opener and closer regardless of kind, so `(]` nets to
/// zero. Built in one pass per token slice; recovery then answers "which
/// closer ends this group" without rescanning the rest of the input.
struct DepthClosers {
    next: Vec<Option<usize>>,
}

impl DepthClosers {
    fn new(tokens: &[Token<'_>]) -> Self {
        let mut levels = Vec::with_capacity(tokens.len());
        let mut level = 0i64;
        for token in tokens {
            levels.push(level);
            if token.kind.is_opening_delimiter() {
                level += 1;
            } else if token.kind.is_closing_delimiter() {
                level -= 1;
            }
        }

        // A closer at the same level is reached before the level can drop
        // below it, so the nearest one to the right is the answer.
        let mut next = vec![None; tokens.len() + 1];
        let mut nearest: FxHashMap<i64, usize> = FxHashMap::default();
        for (idx, token) in tokens.iter().enumerate().rev() {
            if token.kind.is_closing_delimiter() {
                nearest.insert(levels[idx], idx);
            }
            next[idx] = nearest.get(&levels[idx]).copied();
        }
        Self { next }
    }

    fn first_at_depth(&self, idx: usize) -> Option<usize> {
        self.next.get(idx).copied().flatten()
    }
}

/// The parser state for a single parse
struct ParseState<'t> {
    tokens: &'t [Token<'t>],
    closers: DepthClosers,
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
    grammar: &'static GrammarTable,
    contexts: Vec<ParseContext>,
    /// Nodes currently open in the builder
    depth: u32,
    max_nesting: u32,
    /// End of the last non-trivia token consumed
    last_end: TextSize,
    /// End of the input
    end: TextSize,
}

impl<'t> ParseState<'t> {
    fn new(
        tokens: &'t [Token<'t>],
        grammar: &'static GrammarTable,
        max_nesting: u32,
        end: TextSize,
    ) -> Self {
        let start = tokens.first().map(|t| t.offset).unwrap_or(end);
        Self {
            tokens,
            closers: DepthClosers::new(tokens),
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
            grammar,
            contexts: Vec::new(),
            depth: 0,
            max_nesting,
            last_end: start,
            end,
        }
    }

    fn finish(mut self, config: ParserConfig, language: Language) -> Parse {
        // Stable: errors at one offset keep the order they were found in
        self.errors.sort_by_key(|e| e.range.start());
        Parse::new(self.builder.finish(), self.errors, config, language)
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    /// The n-th non-trivia token from the current position
    fn nth_token(&self, n: usize) -> Option<&'t Token<'t>> {
        let tokens = self.tokens;
        tokens[self.pos..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .nth(n)
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        self.nth_token(n).map(|t| t.kind).unwrap_or(SyntaxKind::EOF)
    }

    fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    fn at_eof(&self) -> bool {
        self.at(SyntaxKind::EOF)
    }

    /// Range of the current token, or an empty range at the end of input
    fn current_range(&self) -> TextRange {
        self.nth_token(0)
            .map(|t| TextRange::new(t.offset, t.end()))
            .unwrap_or_else(|| TextRange::empty(self.end))
    }

    /// Offset where the next element added to the tree will start
    fn consumed_offset(&self) -> TextSize {
        self.tokens.get(self.pos).map(|t| t.offset).unwrap_or(self.end)
    }

    fn context(&self) -> ParseContext {
        self.contexts.last().copied().unwrap_or_default()
    }

    /// Human-readable name of a token kind for error messages
    ///
    /// Messages never quote token text so that they only depend on token
    /// kinds.
    fn describe(&self, kind: SyntaxKind) -> String {
        match kind {
            SyntaxKind::EOF => "end of input".to_string(),
            SyntaxKind::IDENT => "identifier".to_string(),
            SyntaxKind::SIGNAL_IDENT => "signal name".to_string(),
            SyntaxKind::NUMBER => "number".to_string(),
            SyntaxKind::STRING => "string".to_string(),
            SyntaxKind::ERROR => "invalid token".to_string(),
            SyntaxKind::PLUGIN_NAME => "plugin name".to_string(),
            SyntaxKind::PLUGIN_KEY => "plugin key".to_string(),
            SyntaxKind::MODIFIER => "modifier".to_string(),
            SyntaxKind::NULL_KW => "`null`".to_string(),
            SyntaxKind::UNDEFINED_KW => "`undefined`".to_string(),
            _ => format!("`{}`", self.grammar.symbol(kind).name),
        }
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump_trivia(&mut self) {
        let tokens = self.tokens;
        while let Some(token) = tokens.get(self.pos) {
            if !token.kind.is_trivia() {
                break;
            }
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn bump(&mut self) {
        let kind = self.current();
        self.bump_as(kind);
    }

    /// Consume the current token, recording it with `kind`
    fn bump_as(&mut self, kind: SyntaxKind) {
        self.bump_trivia();
        let tokens = self.tokens;
        if let Some(token) = tokens.get(self.pos) {
            self.builder.token(kind.into(), token.text);
            self.last_end = token.end();
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume the current token and return its range
    fn bump_range(&mut self) -> TextRange {
        let range = self.current_range();
        self.bump();
        range
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.bump_trivia();
        self.builder.start_node(kind.into());
        self.depth += 1;
    }

    fn checkpoint(&mut self) -> Checkpoint {
        self.bump_trivia();
        self.builder.checkpoint()
    }

    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
        self.depth += 1;
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
        self.depth -= 1;
    }

    /// Wrap everything since `checkpoint` in a finished node
    fn wrap(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.start_node_at(checkpoint, kind);
        self.finish_node();
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    /// Report something missing at the current position as an empty ERROR node
    fn missing(&mut self, code: ErrorCode, message: impl Into<String>) {
        let error = SyntaxError::at_offset(message, self.consumed_offset(), code);
        self.missing_error(error);
    }

    fn missing_error(&mut self, mut error: SyntaxError) {
        error.range = TextRange::empty(self.consumed_offset());
        self.builder.start_node(SyntaxKind::ERROR.into());
        self.builder.finish_node();
        self.errors.push(error);
    }

    /// Consume the current token into an ERROR node
    fn error_bump(&mut self, code: ErrorCode, message: impl Into<String>) {
        let range = self.current_range();
        self.start_node(SyntaxKind::ERROR);
        self.bump();
        self.finish_node();
        self.errors.push(SyntaxError::new(message, range, code));
    }

    /// Consume a token the lexer could not classify
    fn error_token(&mut self) {
        let token = self.nth_token(0);
        let text = token.map(|t| t.text).unwrap_or("");
        let (code, message) = if text.starts_with(['"', '\'', '`']) {
            (ErrorCode::E0102, "unterminated string literal".to_string())
        } else {
            (ErrorCode::E0101, format!("invalid character `{}`", text))
        };
        self.error_bump(code, message);
    }

    /// Consume tokens that do not belong here, up to the next place the
    /// current context can resume
    ///
    /// Brackets are skipped as balanced groups. Stops before a closing
    /// delimiter at depth 0, before a depth-0 `,` when `stop_at_comma`, or at
    /// the end of input.
    fn skip_junk(&mut self, code: ErrorCode, stop_at_comma: bool) {
        let found = self.current();
        let start = self.current_range().start();
        let message = SyntaxError::in_context(
            &self.describe(found),
            self.context(),
            TextRange::empty(start),
            code,
        )
        .message;

        self.start_node(SyntaxKind::ERROR);
        let mut depth = 0u32;
        loop {
            let kind = self.current();
            if kind == SyntaxKind::EOF {
                break;
            }
            if depth == 0
                && (kind.is_closing_delimiter() || (stop_at_comma && kind == SyntaxKind::COMMA))
            {
                break;
            }
            if kind.is_opening_delimiter() {
                depth += 1;
            } else if kind.is_closing_delimiter() {
                depth -= 1;
            }
            self.bump();
        }
        self.finish_node();
        let range = TextRange::new(start, self.last_end.max(start));
        self.errors.push(SyntaxError::new(message, range, code));
    }

    /// Whether `closer` appears before any other depth-0 closing delimiter
    fn closer_ahead(&self, closer: SyntaxKind) -> bool {
        self.closers
            .first_at_depth(self.pos)
            .is_some_and(|idx| self.tokens[idx].kind == closer)
    }

    /// Close a delimited construct opened at `open`
    fn expect_closer(&mut self, context: ParseContext, opener: SyntaxKind, open: TextRange) {
        let Some(closer) = context.closer() else {
            return;
        };
        if self.eat(closer) {
            return;
        }
        if !self.at_eof() && self.closer_ahead(closer) {
            self.skip_junk(ErrorCode::E0901, false);
            self.bump();
            return;
        }
        let message = format!(
            "expected {} {}, found {}",
            self.describe(closer),
            context.description(),
            self.describe(self.current())
        );
        let code = context.unclosed_code();
        let error = SyntaxError::at_offset(message, self.consumed_offset(), code)
            .with_related(format!("{} opened here", self.describe(opener)), open);
        self.missing_error(error);
    }

    /// Expression nested deeper than the configured limit: the rest of it
    /// becomes one ERROR node
    fn nesting_error(&mut self) -> SyntaxKind {
        let start = self.current_range().start();
        self.start_node(SyntaxKind::ERROR);
        let mut depth = 0u32;
        loop {
            let kind = self.current();
            if kind == SyntaxKind::EOF {
                break;
            }
            if depth == 0 && (kind.is_closing_delimiter() || is_separator(kind)) {
                break;
            }
            if kind.is_opening_delimiter() {
                depth += 1;
            } else if kind.is_closing_delimiter() {
                depth -= 1;
            }
            self.bump();
        }
        self.finish_node();
        let range = TextRange::new(start, self.last_end.max(start));
        self.errors.push(SyntaxError::new(
            format!("expression nested deeper than {} levels", self.max_nesting),
            range,
            ErrorCode::E0407,
        ));
        SyntaxKind::ERROR
    }

    // =========================================================================
    // Source file
    // =========================================================================

    /// SourceFile = DatastarAttribute | Statement+
    fn source_file(&mut self, mode: SourceMode) {
        self.builder.start_node(SyntaxKind::SOURCE_FILE.into());
        self.depth += 1;
        match mode {
            SourceMode::Attribute => self.attribute(),
            SourceMode::Auto | SourceMode::Expression => self.statements(),
        }
        self.bump_trivia();
        self.finish_node();
    }

    // =========================================================================
    // Attribute names
    // =========================================================================

    /// DatastarAttribute = 'data-' PluginName ('__' Modifier | ':' PluginKey ('__' Modifier)?)?
    fn attribute(&mut self) {
        if self.at_eof() {
            return;
        }
        self.contexts.push(ParseContext::Attribute);
        self.start_node(SyntaxKind::DATASTAR_ATTRIBUTE);

        if self.eat(SyntaxKind::DATA_PREFIX) {
            match self.current() {
                SyntaxKind::PLUGIN_NAME => self.bump(),
                SyntaxKind::ERROR => {
                    let text = self.nth_token(0).map(|t| t.text).unwrap_or("");
                    let message = format!("unknown plugin `{}`", text);
                    self.error_bump(ErrorCode::E0301, message);
                }
                _ => self.missing(ErrorCode::E0301, "expected a plugin name after `data-`"),
            }

            if self.eat(SyntaxKind::COLON) {
                match self.current() {
                    SyntaxKind::PLUGIN_KEY => self.bump(),
                    SyntaxKind::ERROR => self.error_bump(
                        ErrorCode::E0302,
                        "invalid plugin key: a key may only contain letters, digits and `-`",
                    ),
                    _ => self.missing(ErrorCode::E0302, "expected a plugin key after `:`"),
                }
            }

            if self.eat(SyntaxKind::UNDERSCORE_UNDERSCORE) {
                match self.current() {
                    SyntaxKind::MODIFIER => self.bump(),
                    SyntaxKind::ERROR => self.error_bump(ErrorCode::E0303, "invalid modifier"),
                    _ => self.missing(ErrorCode::E0303, "expected a modifier after `__`"),
                }
            }
        } else {
            self.missing(ErrorCode::E0304, "expected `data-`");
        }

        if !self.at_eof() {
            let start = self.current_range().start();
            self.start_node(SyntaxKind::ERROR);
            while !self.at_eof() {
                self.bump();
            }
            self.finish_node();
            self.errors.push(SyntaxError::new(
                ErrorCode::E0304.default_message(),
                TextRange::new(start, self.last_end),
                ErrorCode::E0304,
            ));
        }

        self.finish_node();
        self.contexts.pop();
    }

    // =========================================================================
    // Statements
    // =========================================================================

    /// Statement ((',' | ';') Statement)* with an optional trailing separator
    fn statements(&mut self) {
        let mut seen_statement = false;
        loop {
            let kind = self.current();
            match kind {
                SyntaxKind::EOF => break,
                k if is_separator(k) => {
                    if seen_statement && self.nth(1) == SyntaxKind::EOF {
                        self.bump();
                    } else {
                        let message = format!("expected a statement before {}", self.describe(k));
                        self.error_bump(ErrorCode::E0406, message);
                    }
                }
                k if starts_expression(self.grammar, k) => {
                    self.statement_or_sequence();
                    seen_statement = true;
                }
                SyntaxKind::ERROR => self.error_token(),
                k if k.is_closing_delimiter() => {
                    let message = format!("unexpected closing {}", self.describe(k));
                    self.error_bump(ErrorCode::E0205, message);
                }
                k => {
                    let error = SyntaxError::in_context(
                        &self.describe(k),
                        ParseContext::Statements,
                        self.current_range(),
                        ErrorCode::E0901,
                    );
                    self.error_bump(ErrorCode::E0901, error.message);
                }
            }
        }
    }

    /// A statement, or a flat sequence of statements joined by `,`/`;`
    fn statement_or_sequence(&mut self) {
        let checkpoint = self.checkpoint();
        self.statement();
        if !(is_separator(self.current()) && self.nth(1) != SyntaxKind::EOF) {
            return;
        }
        self.start_node_at(checkpoint, SyntaxKind::SEQUENCE_EXPRESSION);
        while is_separator(self.current()) && self.nth(1) != SyntaxKind::EOF {
            self.bump();
            self.statement();
        }
        self.finish_node();
    }

    /// AssignmentStatement = Lhs AssignmentOp Expression
    /// ExpressionStatement = Expression
    fn statement(&mut self) {
        let checkpoint = self.checkpoint();
        let start = self.consumed_offset();

        let lhs = if self.at(SyntaxKind::DOLLAR) {
            // A bare signal reference is an assignment target, not a primary
            self.signal_reference();
            if self.grammar.is_assignment_operator(self.current()) {
                SyntaxKind::SIGNAL_REFERENCE
            } else {
                self.wrap(checkpoint, SyntaxKind::PRIMARY_EXPRESSION);
                self.infix_loop(checkpoint, Precedence::SEQUENCE, SyntaxKind::PRIMARY_EXPRESSION)
            }
        } else {
            self.expression_bp(Precedence::SEQUENCE)
        };

        if !self.grammar.is_assignment_operator(self.current()) {
            self.wrap(checkpoint, SyntaxKind::EXPRESSION_STATEMENT);
            return;
        }

        let assignable = matches!(
            lhs,
            SyntaxKind::SIGNAL_REFERENCE
                | SyntaxKind::MEMBER_EXPRESSION
                | SyntaxKind::COMPUTED_MEMBER_EXPRESSION
                | SyntaxKind::ERROR
        );
        if !assignable {
            let range = TextRange::new(start, self.consumed_offset().max(start));
            self.wrap(checkpoint, SyntaxKind::ERROR);
            self.errors.push(
                SyntaxError::new(
                    format!("cannot assign to {}", self.grammar.symbol(lhs).name),
                    range,
                    ErrorCode::E0403,
                )
                .with_hint("only signals and member expressions can be assigned to"),
            );
        }

        self.start_node_at(checkpoint, SyntaxKind::ASSIGNMENT_STATEMENT);
        let op = self.current();
        self.bump();
        self.operand(Precedence::SEQUENCE, op);
        self.finish_node();
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// Parse an expression whose operators all bind at least as tightly as
    /// `min`; returns the kind of the outermost node
    fn expression_bp(&mut self, min: u8) -> SyntaxKind {
        if self.depth >= self.max_nesting {
            return self.nesting_error();
        }
        let checkpoint = self.checkpoint();
        let lhs = self.prefix(min);
        self.infix_loop(checkpoint, min, lhs)
    }

    /// The expression after operator `op`
    ///
    /// When nothing that can begin an expression follows, the operand is
    /// reported missing here instead of as a generic missing expression.
    fn operand(&mut self, min: u8, op: SyntaxKind) -> SyntaxKind {
        let kind = self.current();
        let recoverable = matches!(
            kind,
            SyntaxKind::ERROR | SyntaxKind::DOT_DOT_DOT | SyntaxKind::SIGNAL_IDENT
        );
        if starts_expression(self.grammar, kind) || recoverable {
            return self.expression_bp(min);
        }
        let message = format!(
            "expected an operand after {}, found {}",
            self.describe(op),
            self.describe(kind)
        );
        self.missing(ErrorCode::E0402, message);
        SyntaxKind::ERROR
    }

    fn prefix(&mut self, min: u8) -> SyntaxKind {
        let kind = self.current();
        if self.grammar.is_prefix_operator(kind) {
            self.start_node(SyntaxKind::UNARY_EXPRESSION);
            self.bump();
            self.operand(Precedence::PREFIX, kind);
            self.finish_node();
            return SyntaxKind::UNARY_EXPRESSION;
        }
        match kind {
            SyntaxKind::L_PAREN if min <= Precedence::ARROW && self.paren_is_arrow() => {
                self.arrow_function()
            }
            SyntaxKind::L_PAREN => self.parenthesized(),
            SyntaxKind::IDENT
                if min <= Precedence::ARROW && self.nth(1) == SyntaxKind::FAT_ARROW =>
            {
                self.arrow_function()
            }
            _ => self.primary(),
        }
    }

    fn infix_loop(&mut self, checkpoint: Checkpoint, min: u8, lhs: SyntaxKind) -> SyntaxKind {
        let mut lhs = lhs;
        loop {
            let op = self.current();

            if let Some(binary) = self.grammar.binary_operator(op).copied() {
                if binary.precedence < min {
                    break;
                }
                self.start_node_at(checkpoint, SyntaxKind::BINARY_EXPRESSION);
                self.bump();
                self.operand(binary.right_precedence(), op);
                self.finish_node();
                lhs = SyntaxKind::BINARY_EXPRESSION;
                continue;
            }

            lhs = match op {
                SyntaxKind::QUESTION if Precedence::CONDITIONAL >= min => {
                    self.start_node_at(checkpoint, SyntaxKind::CONDITIONAL_EXPRESSION);
                    self.bump();
                    self.operand(Precedence::SEQUENCE, SyntaxKind::QUESTION);
                    if self.eat(SyntaxKind::COLON) {
                        self.operand(Precedence::CONDITIONAL, SyntaxKind::COLON);
                    } else {
                        let message = format!(
                            "expected `:` in conditional expression, found {}",
                            self.describe(self.current())
                        );
                        self.missing(ErrorCode::E0902, message);
                    }
                    self.finish_node();
                    SyntaxKind::CONDITIONAL_EXPRESSION
                }
                k if self.grammar.is_postfix_operator(k) && Precedence::POSTFIX >= min => {
                    self.start_node_at(checkpoint, SyntaxKind::UNARY_EXPRESSION);
                    self.bump();
                    self.finish_node();
                    SyntaxKind::UNARY_EXPRESSION
                }
                SyntaxKind::L_PAREN if Precedence::MEMBER >= min => {
                    self.start_node_at(checkpoint, SyntaxKind::CALL_EXPRESSION);
                    self.call_arguments();
                    self.finish_node();
                    SyntaxKind::CALL_EXPRESSION
                }
                SyntaxKind::QUESTION_DOT
                    if Precedence::MEMBER >= min && self.nth(1) == SyntaxKind::L_BRACKET =>
                {
                    self.start_node_at(checkpoint, SyntaxKind::COMPUTED_MEMBER_EXPRESSION);
                    self.bump();
                    self.index();
                    self.finish_node();
                    SyntaxKind::COMPUTED_MEMBER_EXPRESSION
                }
                SyntaxKind::DOT | SyntaxKind::QUESTION_DOT if Precedence::MEMBER >= min => {
                    self.start_node_at(checkpoint, SyntaxKind::MEMBER_EXPRESSION);
                    self.bump();
                    if !self.eat(SyntaxKind::IDENT) {
                        let message = format!(
                            "expected a property name after {}, found {}",
                            self.describe(op),
                            self.describe(self.current())
                        );
                        self.missing(ErrorCode::E0902, message);
                    }
                    self.finish_node();
                    SyntaxKind::MEMBER_EXPRESSION
                }
                SyntaxKind::L_BRACKET if Precedence::MEMBER >= min => {
                    self.start_node_at(checkpoint, SyntaxKind::COMPUTED_MEMBER_EXPRESSION);
                    self.index();
                    self.finish_node();
                    SyntaxKind::COMPUTED_MEMBER_EXPRESSION
                }
                _ => break,
            };
        }
        lhs
    }

    /// `[` Expression `]`, shared by computed members, signal paths and keys
    fn index(&mut self) {
        self.contexts.push(ParseContext::Index);
        let open = self.bump_range();
        self.expression_bp(Precedence::SEQUENCE);
        self.expect_closer(ParseContext::Index, SyntaxKind::L_BRACKET, open);
        self.contexts.pop();
    }

    /// Whether the `(` at the current position opens an arrow function's
    /// parameter list
    fn paren_is_arrow(&self) -> bool {
        let Some(open) = (self.pos..self.tokens.len()).find(|&i| !self.tokens[i].kind.is_trivia())
        else {
            return false;
        };
        let Some(close) = self.closers.first_at_depth(open + 1) else {
            return false;
        };
        self.tokens[close + 1..]
            .iter()
            .find(|t| !t.kind.is_trivia())
            .map(|t| t.kind)
            == Some(SyntaxKind::FAT_ARROW)
    }

    /// ArrowFunction = (Identifier | '(' ParameterList? ')') '=>' Expression
    fn arrow_function(&mut self) -> SyntaxKind {
        self.start_node(SyntaxKind::ARROW_FUNCTION);
        if self.at(SyntaxKind::IDENT) {
            self.bump();
        } else {
            self.contexts.push(ParseContext::Parameters);
            let open = self.bump_range();
            if !self.at(SyntaxKind::R_PAREN) && !self.at_eof() {
                self.start_node(SyntaxKind::PARAMETER_LIST);
                self.list_items(ParseContext::Parameters, false, Self::parameter);
                self.finish_node();
            }
            self.expect_closer(ParseContext::Parameters, SyntaxKind::L_PAREN, open);
            self.contexts.pop();
        }
        if !self.eat(SyntaxKind::FAT_ARROW) {
            self.missing(ErrorCode::E0902, "expected `=>`");
        }
        self.expression_bp(Precedence::ARROW);
        self.finish_node();
        SyntaxKind::ARROW_FUNCTION
    }

    fn parameter(&mut self) {
        self.bump();
    }

    /// ParenthesizedExpression = '(' Expression ')'
    fn parenthesized(&mut self) -> SyntaxKind {
        self.start_node(SyntaxKind::PARENTHESIZED_EXPRESSION);
        self.contexts.push(ParseContext::Parenthesized);
        let open = self.bump_range();
        self.expression_bp(Precedence::SEQUENCE);
        self.expect_closer(ParseContext::Parenthesized, SyntaxKind::L_PAREN, open);
        self.contexts.pop();
        self.finish_node();
        SyntaxKind::PARENTHESIZED_EXPRESSION
    }

    /// PrimaryExpression = Identifier | SignalReference | ActionCall | Literal | Array | Object
    fn primary(&mut self) -> SyntaxKind {
        let kind = self.current();
        match kind {
            SyntaxKind::IDENT
            | SyntaxKind::DOLLAR
            | SyntaxKind::AT
            | SyntaxKind::NUMBER
            | SyntaxKind::STRING
            | SyntaxKind::TRUE_KW
            | SyntaxKind::FALSE_KW
            | SyntaxKind::NULL_KW
            | SyntaxKind::UNDEFINED_KW
            | SyntaxKind::L_BRACKET
            | SyntaxKind::L_BRACE => {
                self.start_node(SyntaxKind::PRIMARY_EXPRESSION);
                match kind {
                    SyntaxKind::IDENT => self.bump(),
                    SyntaxKind::DOLLAR => self.signal_reference(),
                    SyntaxKind::AT => self.action_call(),
                    SyntaxKind::L_BRACKET => self.array(),
                    SyntaxKind::L_BRACE => self.object(),
                    _ => self.literal(),
                }
                self.finish_node();
                SyntaxKind::PRIMARY_EXPRESSION
            }
            _ => self.missing_expression(),
        }
    }

    fn missing_expression(&mut self) -> SyntaxKind {
        let kind = self.current();
        match kind {
            SyntaxKind::ERROR => self.error_token(),
            SyntaxKind::DOT_DOT_DOT | SyntaxKind::SIGNAL_IDENT => {
                let error = SyntaxError::in_context(
                    &self.describe(kind),
                    self.context(),
                    self.current_range(),
                    ErrorCode::E0901,
                );
                self.error_bump(ErrorCode::E0901, error.message);
            }
            _ => {
                let message = format!("expected expression, found {}", self.describe(kind));
                self.missing(ErrorCode::E0406, message);
            }
        }
        SyntaxKind::ERROR
    }

    /// SignalReference = '$' SignalIdent ('.' SignalIdent | '?.' SignalIdent | '[' Expression ']' | '?.' '[' Expression ']')*
    fn signal_reference(&mut self) {
        self.start_node(SyntaxKind::SIGNAL_REFERENCE);
        self.bump();
        self.expect_signal_ident(SyntaxKind::DOLLAR);
        loop {
            match self.current() {
                SyntaxKind::DOT => {
                    self.bump();
                    self.expect_signal_ident(SyntaxKind::DOT);
                }
                SyntaxKind::QUESTION_DOT => {
                    self.bump();
                    if self.at(SyntaxKind::L_BRACKET) {
                        self.index();
                    } else {
                        self.expect_signal_ident(SyntaxKind::QUESTION_DOT);
                    }
                }
                SyntaxKind::L_BRACKET => self.index(),
                _ => break,
            }
        }
        self.finish_node();
    }

    fn expect_signal_ident(&mut self, after: SyntaxKind) {
        if !self.eat(SyntaxKind::SIGNAL_IDENT) {
            let message = format!(
                "expected a signal name after {}, found {}",
                self.describe(after),
                self.describe(self.current())
            );
            self.missing(ErrorCode::E0902, message);
        }
    }

    /// ActionCall = ActionName '(' Arguments? ')'
    fn action_call(&mut self) {
        self.start_node(SyntaxKind::ACTION_CALL);
        self.start_node(SyntaxKind::ACTION_NAME);
        self.bump();
        if !self.eat(SyntaxKind::IDENT) {
            let message = format!(
                "expected an action name after `@`, found {}",
                self.describe(self.current())
            );
            self.missing(ErrorCode::E0902, message);
        }
        self.finish_node();
        if self.at(SyntaxKind::L_PAREN) {
            self.call_arguments();
        } else {
            let message = format!(
                "expected `(` after action name, found {}",
                self.describe(self.current())
            );
            self.missing(ErrorCode::E0404, message);
        }
        self.finish_node();
    }

    /// '(' Arguments? ')'
    fn call_arguments(&mut self) {
        self.contexts.push(ParseContext::Arguments);
        let open = self.bump_range();
        if !self.at(SyntaxKind::R_PAREN) && !self.at_eof() {
            self.start_node(SyntaxKind::ARGUMENTS);
            self.list_items(ParseContext::Arguments, false, Self::element);
            self.finish_node();
        }
        self.expect_closer(ParseContext::Arguments, SyntaxKind::L_PAREN, open);
        self.contexts.pop();
    }

    /// Literal = StringLiteral | Number | BooleanLiteral | 'null' | 'undefined'
    fn literal(&mut self) {
        self.start_node(SyntaxKind::LITERAL);
        match self.current() {
            SyntaxKind::STRING => {
                self.start_node(SyntaxKind::STRING_LITERAL);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::TRUE_KW | SyntaxKind::FALSE_KW => {
                self.start_node(SyntaxKind::BOOLEAN_LITERAL);
                self.bump();
                self.finish_node();
            }
            _ => self.bump(),
        }
        self.finish_node();
    }

    /// Array = '[' (Element (',' Element)* ','?)? ']'
    fn array(&mut self) {
        self.start_node(SyntaxKind::ARRAY);
        self.contexts.push(ParseContext::Array);
        let open = self.bump_range();
        self.list_items(ParseContext::Array, true, Self::element);
        self.expect_closer(ParseContext::Array, SyntaxKind::L_BRACKET, open);
        self.contexts.pop();
        self.finish_node();
    }

    /// Object = '{' (Member (',' Member)* ','?)? '}'
    fn object(&mut self) {
        self.start_node(SyntaxKind::OBJECT);
        self.contexts.push(ParseContext::Object);
        let open = self.bump_range();
        self.list_items(ParseContext::Object, true, Self::object_member);
        self.expect_closer(ParseContext::Object, SyntaxKind::L_BRACE, open);
        self.contexts.pop();
        self.finish_node();
    }

    /// Expression | SpreadElement
    fn element(&mut self) {
        if self.at(SyntaxKind::DOT_DOT_DOT) {
            self.spread_element();
        } else {
            self.expression_bp(Precedence::SEQUENCE);
        }
    }

    /// SpreadElement = '...' Expression
    fn spread_element(&mut self) {
        self.start_node(SyntaxKind::SPREAD_ELEMENT);
        self.bump();
        self.expression_bp(Precedence::SEQUENCE);
        self.finish_node();
    }

    /// Property = (Identifier | StringLiteral | '[' Expression ']') ':' Expression
    fn object_member(&mut self) {
        if self.at(SyntaxKind::DOT_DOT_DOT) {
            self.spread_element();
            return;
        }
        self.start_node(SyntaxKind::PROPERTY);
        match self.current() {
            SyntaxKind::IDENT => self.bump(),
            k if k.is_keyword() => self.bump_as(SyntaxKind::IDENT),
            SyntaxKind::STRING => {
                self.start_node(SyntaxKind::STRING_LITERAL);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::L_BRACKET => self.index(),
            k => {
                let message = format!("expected a property key, found {}", self.describe(k));
                self.missing(ErrorCode::E0902, message);
            }
        }
        if self.eat(SyntaxKind::COLON) {
            self.expression_bp(Precedence::SEQUENCE);
        } else {
            let message = format!(
                "expected `:` after property key, found {}",
                self.describe(self.current())
            );
            self.missing(ErrorCode::E0902, message);
            if starts_expression(self.grammar, self.current()) {
                self.expression_bp(Precedence::SEQUENCE);
            }
        }
        self.finish_node();
    }

    /// Whether `kind` can begin one item of a list in `context`
    fn starts_item(&self, context: ParseContext, kind: SyntaxKind) -> bool {
        match context {
            ParseContext::Parameters => kind == SyntaxKind::IDENT,
            ParseContext::Object => {
                matches!(
                    kind,
                    SyntaxKind::IDENT
                        | SyntaxKind::STRING
                        | SyntaxKind::L_BRACKET
                        | SyntaxKind::DOT_DOT_DOT
                ) || kind.is_keyword()
            }
            _ => kind == SyntaxKind::DOT_DOT_DOT || starts_expression(self.grammar, kind),
        }
    }

    /// Comma-separated items up to (not including) the closing delimiter
    ///
    /// Every iteration consumes at least one token or stops, so malformed
    /// input cannot stall the loop.
    fn list_items(&mut self, context: ParseContext, allow_trailing: bool, item: fn(&mut Self)) {
        let Some(closer) = context.closer() else {
            return;
        };
        let missing_code = if context == ParseContext::Arguments {
            ErrorCode::E0405
        } else {
            ErrorCode::E0406
        };
        let mut after_comma = false;
        loop {
            let kind = self.current();
            if kind == closer || kind == SyntaxKind::EOF || kind.is_closing_delimiter() {
                if after_comma && !allow_trailing {
                    let message = format!(
                        "expected {} after `,`, found {}",
                        context.expected_description(),
                        self.describe(kind)
                    );
                    self.missing(missing_code, message);
                }
                break;
            }
            if kind == SyntaxKind::COMMA {
                let message = format!(
                    "expected {} before `,`",
                    context.expected_description()
                );
                self.missing(missing_code, message);
                self.bump();
                after_comma = true;
                continue;
            }
            if !self.starts_item(context, kind) {
                self.skip_junk(ErrorCode::E0901, true);
                after_comma = false;
                continue;
            }

            item(self);
            after_comma = false;

            let next = self.current();
            if next == SyntaxKind::COMMA {
                self.bump();
                after_comma = true;
            } else if next != closer
                && next != SyntaxKind::EOF
                && !next.is_closing_delimiter()
                && self.starts_item(context, next)
            {
                let message = format!(
                    "expected `,` between items {}, found {}",
                    context.description(),
                    self.describe(next)
                );
                self.missing(ErrorCode::E0201, message);
            }
        }
    }
}
