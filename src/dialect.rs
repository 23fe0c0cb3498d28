//! Keyword dialect tables.
//!
//! A dialect maps localized keyword spellings to a canonical
//! [`TokenKind`] and a canonical base spelling. Every dialect therefore
//! lexes to the same token stream, which is what lets a single parser
//! serve all of them.

use std::fmt;
use std::str::FromStr;

use crate::token::TokenKind;

/// One row of a keyword table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordEntry {
    /// Spelling as written in source.
    pub spelling: &'static str,
    pub kind: TokenKind,
    /// Canonical spelling shared by all dialects (`"let"`, `"fn"`, ...).
    pub base: &'static str,
}

const fn entry(spelling: &'static str, kind: TokenKind, base: &'static str) -> KeywordEntry {
    KeywordEntry {
        spelling,
        kind,
        base,
    }
}

/// Immutable keyword table handed to a lexer at construction.
#[derive(Debug, PartialEq, Eq)]
pub struct KeywordTable {
    name: &'static str,
    entries: &'static [KeywordEntry],
}

impl KeywordTable {
    /// Build a table from static entries. Lets hosts plug in dialects
    /// beyond the bundled ones.
    #[must_use]
    pub const fn new(name: &'static str, entries: &'static [KeywordEntry]) -> Self {
        Self { name, entries }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn entries(&self) -> &'static [KeywordEntry] {
        self.entries
    }

    /// Resolve an identifier. `None` means it is a plain identifier.
    #[must_use]
    pub fn lookup(&self, spelling: &str) -> Option<&'static KeywordEntry> {
        self.entries.iter().find(|e| e.spelling == spelling)
    }

    /// Localized spelling of a canonical keyword kind.
    #[must_use]
    pub fn spelling_of(&self, kind: TokenKind) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.spelling)
    }
}

pub static ENG_KEYWORDS: KeywordTable = KeywordTable::new(
    "eng",
    &[
        entry("fn", TokenKind::Function, "fn"),
        entry("let", TokenKind::Let, "let"),
        entry("true", TokenKind::True, "true"),
        entry("false", TokenKind::False, "false"),
        entry("if", TokenKind::If, "if"),
        entry("else", TokenKind::Else, "else"),
        entry("elsif", TokenKind::Elsif, "elsif"),
        entry("return", TokenKind::Return, "return"),
        entry("and", TokenKind::And, "and"),
        entry("or", TokenKind::Or, "or"),
        entry("for", TokenKind::For, "for"),
        entry("while", TokenKind::While, "while"),
    ],
);

/// Kazakh (Cyrillic script).
pub static QZQ_KEYWORDS: KeywordTable = KeywordTable::new(
    "qzq",
    &[
        entry("фн", TokenKind::Function, "fn"),
        entry("болсын", TokenKind::Let, "let"),
        entry("шын", TokenKind::True, "true"),
        entry("жалған", TokenKind::False, "false"),
        entry("егер", TokenKind::If, "if"),
        entry("әйтпесе", TokenKind::Else, "else"),
        entry("егер_әйтпесе", TokenKind::Elsif, "elsif"),
        entry("қайтару", TokenKind::Return, "return"),
        entry("және", TokenKind::And, "and"),
        entry("немесе", TokenKind::Or, "or"),
        entry("үшін", TokenKind::For, "for"),
        entry("уақытша", TokenKind::While, "while"),
    ],
);

/// Turkish.
pub static TRK_KEYWORDS: KeywordTable = KeywordTable::new(
    "trk",
    &[
        entry("fn", TokenKind::Function, "fn"),
        entry("olsun", TokenKind::Let, "let"),
        entry("doğru", TokenKind::True, "true"),
        entry("yanlış", TokenKind::False, "false"),
        entry("eğer", TokenKind::If, "if"),
        entry("yoksa", TokenKind::Else, "else"),
        entry("yok_eğer", TokenKind::Elsif, "elsif"),
        entry("döndür", TokenKind::Return, "return"),
        entry("ve", TokenKind::And, "and"),
        entry("veya", TokenKind::Or, "or"),
        entry("için", TokenKind::For, "for"),
        entry("iken", TokenKind::While, "while"),
    ],
);

/// Bundled keyword dialects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Base dialect (English keywords).
    #[default]
    Eng,
    /// Kazakh.
    Qzq,
    /// Turkish.
    Trk,
}

impl Dialect {
    pub const ALL: [Self; 3] = [Self::Eng, Self::Qzq, Self::Trk];

    #[must_use]
    pub fn keywords(self) -> &'static KeywordTable {
        match self {
            Self::Eng => &ENG_KEYWORDS,
            Self::Qzq => &QZQ_KEYWORDS,
            Self::Trk => &TRK_KEYWORDS,
        }
    }

    #[must_use]
    pub fn code(self) -> &'static str {
        self.keywords().name()
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Returned when a dialect name is not one of the bundled codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dialect '{0}', expected one of: eng, qzq, trk")]
pub struct UnknownDialect(pub String);

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownDialect(s.to_string()))
    }
}
