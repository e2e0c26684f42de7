//! Logos-based lexer for Datastar expressions
//!
//! Fast tokenization using the logos crate. Logos is context-free, so the
//! wrapper around it tracks just enough state to lex signal paths the way the
//! grammar expects: after `$` (and after `.`/`?.` inside a signal path) a name
//! may contain hyphens and keywords are plain names.

use super::syntax_kind::SyntaxKind;
use crate::config::SourceMode;
use crate::grammar::GrammarTable;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

impl Token<'_> {
    /// Byte offset just past the end of this token
    pub fn end(&self) -> TextSize {
        self.offset + TextSize::of(self.text)
    }
}

/// What kind of name the previous token asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ExpectName {
    #[default]
    Nothing,
    /// After `$`, or after `.`/`?.` continuing a signal path
    Signal,
    /// After `@`, or after `.`/`?.` of a member access
    Plain,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
    expect: ExpectName,
    in_signal_path: bool,
    after_optional_in_path: bool,
    /// One entry per open `[`: whether it indexes into a signal path
    brackets: Vec<bool>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
            expect: ExpectName::Nothing,
            in_signal_path: false,
            after_optional_in_path: false,
            brackets: Vec::new(),
        }
    }

    fn is_name_like(kind: SyntaxKind) -> bool {
        kind == SyntaxKind::IDENT || kind.is_keyword()
    }

    /// Extend the current token over `[a-zA-Z0-9_-]*`
    fn extend_signal_name(&mut self) {
        let extra = self
            .inner
            .remainder()
            .bytes()
            .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_' || *b == b'-')
            .count();
        if extra > 0 {
            self.inner.bump(extra);
        }
    }

    fn transition(&mut self, kind: SyntaxKind) {
        match kind {
            SyntaxKind::DOLLAR => {
                self.expect = ExpectName::Signal;
                self.in_signal_path = false;
                self.after_optional_in_path = false;
            }
            SyntaxKind::SIGNAL_IDENT => {
                self.expect = ExpectName::Nothing;
                self.in_signal_path = true;
                self.after_optional_in_path = false;
            }
            SyntaxKind::DOT | SyntaxKind::QUESTION_DOT => {
                if self.in_signal_path {
                    self.expect = ExpectName::Signal;
                    self.after_optional_in_path = kind == SyntaxKind::QUESTION_DOT;
                } else {
                    self.expect = ExpectName::Plain;
                    self.after_optional_in_path = false;
                }
                self.in_signal_path = false;
            }
            SyntaxKind::AT => {
                self.expect = ExpectName::Plain;
                self.in_signal_path = false;
                self.after_optional_in_path = false;
            }
            SyntaxKind::L_BRACKET => {
                self.brackets
                    .push(self.in_signal_path || self.after_optional_in_path);
                self.reset();
            }
            SyntaxKind::R_BRACKET => {
                let resumes_path = self.brackets.pop().unwrap_or(false);
                self.reset();
                self.in_signal_path = resumes_path;
            }
            _ => self.reset(),
        }
    }

    fn reset(&mut self) {
        self.expect = ExpectName::Nothing;
        self.in_signal_path = false;
        self.after_optional_in_path = false;
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;

        let mut kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        if !kind.is_trivia() {
            if Self::is_name_like(kind) {
                match self.expect {
                    ExpectName::Signal => {
                        self.extend_signal_name();
                        kind = SyntaxKind::SIGNAL_IDENT;
                    }
                    ExpectName::Plain => kind = SyntaxKind::IDENT,
                    ExpectName::Nothing => {}
                }
            }
            self.transition(kind);
        }

        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        Some(Token { kind, text, offset })
    }
}

/// Tokenize a source text in the given mode
///
/// Attribute names are handled by the hand-written scanner, everything else
/// by the logos lexer.
pub fn tokenize<'a>(input: &'a str, mode: SourceMode, grammar: &GrammarTable) -> Vec<Token<'a>> {
    match mode.resolve(input) {
        SourceMode::Attribute => super::scanner::scan_attribute(input, grammar),
        _ => Lexer::new(input).collect(),
    }
}

/// How a string literal ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringEnd {
    Closed,
    Unterminated,
}

/// Scan the rest of a string literal opened by `quote`
fn lex_string(lex: &mut logos::Lexer<LogosToken>, quote: char) -> StringEnd {
    let mut escaped = false;
    let mut end = None;
    for (idx, c) in lex.remainder().char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            end = Some(idx + c.len_utf8());
            break;
        }
    }
    match end {
        Some(len) => {
            lex.bump(len);
            StringEnd::Closed
        }
        None => {
            let rest = lex.remainder().len();
            lex.bump(rest);
            StringEnd::Unterminated
        }
    }
}

/// Extend an integer with an optional fraction and exponent:
/// `\d+(\.\d+)?([eE][+-]?\d+)?`
fn lex_number_tail(lex: &mut logos::Lexer<LogosToken>) -> bool {
    let rest = lex.remainder().as_bytes();
    let digits = |from: usize| rest[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut len = 0;
    if rest.first() == Some(&b'.') {
        let fraction = digits(1);
        if fraction > 0 {
            len = 1 + fraction;
        }
    }
    if matches!(rest.get(len), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(rest.get(len + 1), Some(b'+' | b'-')));
        let exponent = digits(len + 1 + sign);
        if exponent > 0 {
            len += 1 + sign + exponent;
        }
    }
    if len > 0 {
        lex.bump(len);
    }
    true
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"[0-9]+", lex_number_tail)]
    Number,

    #[token("\"", |lex| lex_string(lex, '"'))]
    #[token("'", |lex| lex_string(lex, '\''))]
    #[token("`", |lex| lex_string(lex, '`'))]
    String(StringEnd),

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("...")]
    DotDotDot,
    #[token("?.")]
    QuestionDot,
    #[token("=>")]
    FatArrow,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("**=")]
    StarStarEq,
    #[token("&&=")]
    AmpAmpEq,
    #[token("||=")]
    PipePipeEq,
    #[token("??=")]
    QuestionQuestionEq,
    #[token("&=")]
    AmpEq,
    #[token("|=")]
    PipeEq,
    #[token("^=")]
    CaretEq,
    #[token("<<=")]
    LtLtEq,
    #[token(">>=")]
    GtGtEq,
    #[token(">>>=")]
    GtGtGtEq,
    #[token("==")]
    EqEq,
    #[token("===")]
    EqEqEq,
    #[token("!=")]
    BangEq,
    #[token("!==")]
    BangEqEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("<<")]
    LtLt,
    #[token(">>")]
    GtGt,
    #[token(">>>")]
    GtGtGt,
    #[token("**")]
    StarStar,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("??")]
    QuestionQuestion,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("?")]
    Question,
    #[token("$")]
    Dollar,
    #[token("@")]
    At,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,
    #[token("!")]
    Bang,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("true")]
    TrueKw,
    #[token("false")]
    FalseKw,
    #[token("null")]
    NullKw,
    #[token("undefined")]
    UndefinedKw,
    #[token("typeof")]
    TypeofKw,
    #[token("void")]
    VoidKw,
    #[token("delete")]
    DeleteKw,
    #[token("in")]
    InKw,
    #[token("instanceof")]
    InstanceofKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            Whitespace => SyntaxKind::WHITESPACE,

            Ident => SyntaxKind::IDENT,
            Number => SyntaxKind::NUMBER,
            String(StringEnd::Closed) => SyntaxKind::STRING,
            String(StringEnd::Unterminated) => SyntaxKind::ERROR,

            DotDotDot => SyntaxKind::DOT_DOT_DOT,
            QuestionDot => SyntaxKind::QUESTION_DOT,
            FatArrow => SyntaxKind::FAT_ARROW,
            PlusEq => SyntaxKind::PLUS_EQ,
            MinusEq => SyntaxKind::MINUS_EQ,
            StarEq => SyntaxKind::STAR_EQ,
            SlashEq => SyntaxKind::SLASH_EQ,
            PercentEq => SyntaxKind::PERCENT_EQ,
            StarStarEq => SyntaxKind::STAR_STAR_EQ,
            AmpAmpEq => SyntaxKind::AMP_AMP_EQ,
            PipePipeEq => SyntaxKind::PIPE_PIPE_EQ,
            QuestionQuestionEq => SyntaxKind::QUESTION_QUESTION_EQ,
            AmpEq => SyntaxKind::AMP_EQ,
            PipeEq => SyntaxKind::PIPE_EQ,
            CaretEq => SyntaxKind::CARET_EQ,
            LtLtEq => SyntaxKind::LT_LT_EQ,
            GtGtEq => SyntaxKind::GT_GT_EQ,
            GtGtGtEq => SyntaxKind::GT_GT_GT_EQ,
            EqEq => SyntaxKind::EQ_EQ,
            EqEqEq => SyntaxKind::EQ_EQ_EQ,
            BangEq => SyntaxKind::BANG_EQ,
            BangEqEq => SyntaxKind::BANG_EQ_EQ,
            LtEq => SyntaxKind::LT_EQ,
            GtEq => SyntaxKind::GT_EQ,
            LtLt => SyntaxKind::LT_LT,
            GtGt => SyntaxKind::GT_GT,
            GtGtGt => SyntaxKind::GT_GT_GT,
            StarStar => SyntaxKind::STAR_STAR,
            AmpAmp => SyntaxKind::AMP_AMP,
            PipePipe => SyntaxKind::PIPE_PIPE,
            QuestionQuestion => SyntaxKind::QUESTION_QUESTION,
            PlusPlus => SyntaxKind::PLUS_PLUS,
            MinusMinus => SyntaxKind::MINUS_MINUS,

            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            LBrace => SyntaxKind::L_BRACE,
            RBrace => SyntaxKind::R_BRACE,
            Comma => SyntaxKind::COMMA,
            Semicolon => SyntaxKind::SEMICOLON,
            Colon => SyntaxKind::COLON,
            Dot => SyntaxKind::DOT,
            Question => SyntaxKind::QUESTION,
            Dollar => SyntaxKind::DOLLAR,
            At => SyntaxKind::AT,
            Eq => SyntaxKind::EQ,
            Lt => SyntaxKind::LT,
            Gt => SyntaxKind::GT,
            Plus => SyntaxKind::PLUS,
            Minus => SyntaxKind::MINUS,
            Star => SyntaxKind::STAR,
            Slash => SyntaxKind::SLASH,
            Percent => SyntaxKind::PERCENT,
            Amp => SyntaxKind::AMP,
            Pipe => SyntaxKind::PIPE,
            Caret => SyntaxKind::CARET,
            Tilde => SyntaxKind::TILDE,
            Bang => SyntaxKind::BANG,

            TrueKw => SyntaxKind::TRUE_KW,
            FalseKw => SyntaxKind::FALSE_KW,
            NullKw => SyntaxKind::NULL_KW,
            UndefinedKw => SyntaxKind::UNDEFINED_KW,
            TypeofKw => SyntaxKind::TYPEOF_KW,
            VoidKw => SyntaxKind::VOID_KW,
            DeleteKw => SyntaxKind::DELETE_KW,
            InKw => SyntaxKind::IN_KW,
            InstanceofKw => SyntaxKind::INSTANCEOF_KW,
        }
    }
}
