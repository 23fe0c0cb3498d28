//! Lexer and Pratt parser for the oq scripting language.
//!
//! Source text can be written in any of the bundled keyword dialects.
//! Every dialect lexes to the same canonical tokens, so a single parser
//! produces the same tree whichever dialect a program uses.
//!
//! # Quick start
//!
//! ## Parse a program
//!
//! ```
//! use oq_syntax::{Expression, Statement, parse};
//!
//! let program = parse("let x = 1 + 2 * 3\nx").unwrap();
//! assert_eq!(program.statements.len(), 2);
//! assert!(matches!(program.statements[0], Statement::Let(_)));
//! assert!(matches!(
//!     program.statements[1].as_expression(),
//!     Some(Expression::Identifier(_))
//! ));
//! ```
//!
//! ## Parse another dialect
//!
//! ```
//! use oq_syntax::{Dialect, TokenKind, parse_with, tokenize_with};
//!
//! let (tokens, _) = tokenize_with("olsun x = doğru", Dialect::Trk);
//! assert_eq!(tokens[0].kind, TokenKind::Let);
//! assert_eq!(tokens[0].text, "let");
//!
//! assert!(parse_with("болсын x = шын", Dialect::Qzq).is_ok());
//! ```
//!
//! ## Report diagnostics
//!
//! ```
//! use oq_syntax::parse;
//!
//! let errors = parse("let = 5").unwrap_err();
//! assert_eq!(errors[0].line(), 1);
//! assert_eq!(
//!     errors[0].to_string(),
//!     "expected identifier, got '=' at line 1, column 5"
//! );
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod dialect;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{
    BlockStatement, BooleanLiteral, CallExpression, Expression, ExpressionStatement, FloatLiteral,
    ForStatement, FunctionDeclaration, GroupedExpression, Identifier, IfStatement,
    InfixExpression, InfixOperator, IntegerLiteral, LetStatement, PrefixExpression,
    PrefixOperator, Program, ReturnStatement, Statement, StringLiteral, WhileStatement,
};
pub use dialect::{Dialect, KeywordEntry, KeywordTable, UnknownDialect};
pub use lexer::{LexError, LexErrorKind, Lexer, tokenize, tokenize_with};
pub use parser::{
    MAX_NESTING_DEPTH, ParseError, ParseErrorKind, Parser, Precedence, parse, parse_with,
};
pub use token::{Span, Token, TokenKind};

/// Unified diagnostic covering both lexing and parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A lexer error.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// A parser error.
    #[error("{0}")]
    Parse(#[from] ParseError),
}

impl Error {
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Lex(e) => e.span,
            Self::Parse(e) => e.span,
        }
    }

    #[must_use]
    pub const fn line(&self) -> usize {
        self.span().line
    }

    #[must_use]
    pub const fn column(&self) -> usize {
        self.span().column
    }

    /// The message without its location suffix.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Lex(e) => e.kind.to_string(),
            Self::Parse(e) => e.kind.to_string(),
        }
    }
}
