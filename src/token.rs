use std::fmt;

/// Source location for error reporting.
///
/// Both fields are 1-based. `column` counts Unicode scalar values, so a
/// Cyrillic letter and an ASCII letter each advance it by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Span {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Token kinds produced by the lexer.
///
/// Keyword kinds are dialect independent: the Kazakh `болсын` and the
/// Turkish `olsun` both lex to [`TokenKind::Let`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input. Zero-length, repeated forever once reached.
    Eof,
    /// A character that cannot start any token.
    Illegal,
    /// Statement terminator `\n`.
    Newline,

    Identifier,
    Integer,
    Float,
    /// Double-quoted string (`"..."`).
    String,

    /// `=`
    Assign,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `!`
    Bang,
    /// `*`
    Asterisk,
    /// `/`
    Slash,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    Lte,
    /// `>=`
    Gte,
    /// `==`
    Eq,
    /// `!=`
    NotEq,

    Comma,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    Function,
    Let,
    True,
    False,
    If,
    Else,
    Elsif,
    Return,
    And,
    Or,
    For,
    While,

    /// Dialect directive marker `~`.
    Tilde,
}

impl TokenKind {
    /// Whether this kind is produced through a keyword table lookup.
    #[must_use]
    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            Self::Function
                | Self::Let
                | Self::True
                | Self::False
                | Self::If
                | Self::Else
                | Self::Elsif
                | Self::Return
                | Self::And
                | Self::Or
                | Self::For
                | Self::While
        )
    }

    /// Human readable name used in diagnostics.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Eof => "end of file",
            Self::Illegal => "illegal character",
            Self::Newline => "newline",
            Self::Identifier => "identifier",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Assign => "'='",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Bang => "'!'",
            Self::Asterisk => "'*'",
            Self::Slash => "'/'",
            Self::Lt => "'<'",
            Self::Gt => "'>'",
            Self::Lte => "'<='",
            Self::Gte => "'>='",
            Self::Eq => "'=='",
            Self::NotEq => "'!='",
            Self::Comma => "','",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::Function => "keyword 'fn'",
            Self::Let => "keyword 'let'",
            Self::True => "keyword 'true'",
            Self::False => "keyword 'false'",
            Self::If => "keyword 'if'",
            Self::Else => "keyword 'else'",
            Self::Elsif => "keyword 'elsif'",
            Self::Return => "keyword 'return'",
            Self::And => "keyword 'and'",
            Self::Or => "keyword 'or'",
            Self::For => "keyword 'for'",
            Self::While => "keyword 'while'",
            Self::Tilde => "'~'",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A single token with its kind, text, and source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// Short description of the token for "found ..." messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of file".to_string(),
            TokenKind::Newline => "newline".to_string(),
            _ => format!("'{}'", self.text),
        }
    }
}
