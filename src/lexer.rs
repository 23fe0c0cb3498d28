use std::borrow::Cow;
use std::fmt;

use crate::dialect::{Dialect, KeywordTable};
use crate::token::{Span, Token, TokenKind};

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Double-quoted string still open at end of input.
    UnterminatedString,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedString => {
                write!(f, "unterminated string literal")
            }
        }
    }
}

/// Error produced during lexing.
///
/// Lexing never stops on an error: the offending token is still emitted
/// and the error is recorded on the side.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", span.line, span.column)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

/// Tokenize a source string with the base dialect.
///
/// The returned tokens always end with exactly one [`TokenKind::Eof`].
#[must_use]
pub fn tokenize(input: &str) -> (Vec<Token>, Vec<LexError>) {
    tokenize_with(input, Dialect::default())
}

/// Tokenize a source string with the given keyword dialect.
#[must_use]
#[tracing::instrument(skip_all, fields(source_len = input.len(), dialect = %dialect))]
pub fn tokenize_with(input: &str, dialect: Dialect) -> (Vec<Token>, Vec<LexError>) {
    let mut lexer = Lexer::with_dialect(input, dialect);
    let tokens = lexer.by_ref().collect();
    (tokens, lexer.take_errors())
}

/// Pull-based scanner over a source string.
///
/// Call [`Lexer::next_token`] repeatedly; once the input is exhausted it
/// keeps returning the end-of-file token. As an [`Iterator`] it yields
/// every token up to and including the first end-of-file token.
pub struct Lexer<'a> {
    input: &'a str,
    /// Byte offset of the next unread character.
    pos: usize,
    line: usize,
    col: usize,
    keywords: &'static KeywordTable,
    errors: Vec<LexError>,
    finished: bool,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_dialect(input, Dialect::default())
    }

    #[must_use]
    pub fn with_dialect(input: &'a str, dialect: Dialect) -> Self {
        Self::with_keywords(input, dialect.keywords())
    }

    #[must_use]
    pub fn with_keywords(input: &'a str, keywords: &'static KeywordTable) -> Self {
        let start = if input.starts_with('\u{FEFF}') {
            '\u{FEFF}'.len_utf8()
        } else {
            0
        };
        Self {
            input,
            pos: start,
            line: 1,
            col: 1,
            keywords,
            errors: Vec::new(),
            finished: false,
        }
    }

    /// Swap the active keyword table. Only affects tokens scanned after
    /// the call.
    pub fn set_dialect(&mut self, dialect: Dialect) {
        tracing::trace!(%dialect, line = self.line, "switching keyword dialect");
        self.keywords = dialect.keywords();
    }

    #[must_use]
    pub const fn keywords(&self) -> &'static KeywordTable {
        self.keywords
    }

    /// Errors recorded so far.
    #[must_use]
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<LexError> {
        std::mem::take(&mut self.errors)
    }

    /// Scan and return the next token.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let span = self.span();
        let Some(ch) = self.peek() else {
            return Token::new(TokenKind::Eof, "", span);
        };

        match ch {
            '\n' => self.single(TokenKind::Newline, span),
            '"' => self.read_string(span),
            '=' => self.one_or_two(TokenKind::Assign, TokenKind::Eq, span),
            '!' => self.one_or_two(TokenKind::Bang, TokenKind::NotEq, span),
            '<' => self.one_or_two(TokenKind::Lt, TokenKind::Lte, span),
            '>' => self.one_or_two(TokenKind::Gt, TokenKind::Gte, span),
            '+' => self.single(TokenKind::Plus, span),
            '-' => self.single(TokenKind::Minus, span),
            '*' => self.single(TokenKind::Asterisk, span),
            '/' => self.single(TokenKind::Slash, span),
            ',' => self.single(TokenKind::Comma, span),
            '(' => self.single(TokenKind::LParen, span),
            ')' => self.single(TokenKind::RParen, span),
            '{' => self.single(TokenKind::LBrace, span),
            '}' => self.single(TokenKind::RBrace, span),
            '[' => self.single(TokenKind::LBracket, span),
            ']' => self.single(TokenKind::RBracket, span),
            '~' => self.single(TokenKind::Tilde, span),
            c if is_digit(c) => self.read_number(span),
            c if is_letter(c) => self.read_identifier(span),
            _ => self.single(TokenKind::Illegal, span),
        }
    }

    const fn span(&self) -> Span {
        Span {
            line: self.line,
            column: self.col,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.input[self.pos..].chars().nth(1)
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn eat_while(&mut self, pred: fn(char) -> bool) {
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.advance();
        }
    }

    fn skip_whitespace(&mut self) {
        self.eat_while(|c| matches!(c, ' ' | '\t' | '\r'));
    }

    fn single(&mut self, kind: TokenKind, span: Span) -> Token {
        let start = self.pos;
        self.advance();
        Token::new(kind, &self.input[start..self.pos], span)
    }

    /// `=`, `!`, `<` and `>` become a two-character token when followed by
    /// `=`.
    fn one_or_two(&mut self, one: TokenKind, two: TokenKind, span: Span) -> Token {
        let start = self.pos;
        self.advance();
        let kind = if self.peek() == Some('=') {
            self.advance();
            two
        } else {
            one
        };
        Token::new(kind, &self.input[start..self.pos], span)
    }

    fn read_number(&mut self, span: Span) -> Token {
        let start = self.pos;
        self.eat_while(is_digit);

        let mut kind = TokenKind::Integer;
        if self.peek() == Some('.') && self.peek_second().is_some_and(is_digit) {
            self.advance(); // skip .
            self.eat_while(is_digit);
            kind = TokenKind::Float;
        }

        Token::new(kind, &self.input[start..self.pos], span)
    }

    fn read_identifier(&mut self, span: Span) -> Token {
        let start = self.pos;
        self.eat_while(is_ident_continue);
        let word = &self.input[start..self.pos];

        match self.keywords.lookup(word) {
            Some(keyword) => Token::new(keyword.kind, keyword.base, span),
            None => Token::new(TokenKind::Identifier, word, span),
        }
    }

    /// Token text keeps the quotes and escapes exactly as written.
    fn read_string(&mut self, span: Span) -> Token {
        let start = self.pos;
        self.advance(); // skip opening quote

        let mut closed = false;
        while let Some(ch) = self.advance() {
            match ch {
                '"' => {
                    closed = true;
                    break;
                }
                '\\' if self.peek() == Some('"') => {
                    self.advance();
                }
                _ => {}
            }
        }

        if !closed {
            tracing::debug!(line = span.line, column = span.column, "unterminated string");
            self.errors.push(LexError {
                kind: LexErrorKind::UnterminatedString,
                span,
            });
        }

        Token::new(TokenKind::String, &self.input[start..self.pos], span)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.finished = true;
        }
        Some(token)
    }
}

/// First code point of every Unicode 16.0 `Nd` block, in ascending order.
/// Each block holds the digits zero to nine in order.
const DECIMAL_ZEROS: [u32; 76] = [
    0x0030, 0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66,
    0x0CE6, 0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0, 0x1810, 0x1946,
    0x19D0, 0x1A80, 0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620, 0xA8D0, 0xA900, 0xA9D0,
    0xA9F0, 0xAA50, 0xABF0, 0xFF10, 0x104A0, 0x10D30, 0x10D40, 0x11066, 0x110F0, 0x11136,
    0x111D0, 0x112F0, 0x11450, 0x114D0, 0x11650, 0x116C0, 0x116D0, 0x116DA, 0x11730, 0x118E0,
    0x11950, 0x11BF0, 0x11C50, 0x11D50, 0x11DA0, 0x11F50, 0x16130, 0x16A60, 0x16AC0, 0x16B50,
    0x16D70, 0x1CCF0, 0x1D7CE, 0x1D7D8, 0x1D7E2, 0x1D7EC, 0x1D7F6, 0x1E140, 0x1E2F0, 0x1E4F0,
    0x1E5F1, 0x1E950, 0x1FBF0,
];

/// Value of a decimal digit from any script.
#[must_use]
pub fn decimal_value(c: char) -> Option<u32> {
    if let Some(d) = c.to_digit(10) {
        return Some(d);
    }
    if c.is_ascii() {
        return None;
    }
    let cp = u32::from(c);
    DECIMAL_ZEROS
        .iter()
        .find(|&&zero| (zero..zero + 10).contains(&cp))
        .map(|zero| cp - zero)
}

fn is_digit(c: char) -> bool {
    decimal_value(c).is_some()
}

fn is_letter(c: char) -> bool {
    c.is_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    is_letter(c) || is_digit(c) || c == '_'
}

/// Rewrite decimal digits of any script as ASCII so that numeric text
/// can go through `str::parse`.
pub(crate) fn normalize_digits(text: &str) -> Cow<'_, str> {
    if text.is_ascii() {
        return Cow::Borrowed(text);
    }
    text.chars()
        .map(|c| match decimal_value(c) {
            Some(d) => char::from_digit(d, 10).unwrap_or(c),
            None => c,
        })
        .collect::<String>()
        .into()
}
