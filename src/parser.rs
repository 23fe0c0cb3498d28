use std::fmt;

use crate::Error;
use crate::ast::{
    BlockStatement, BooleanLiteral, CallExpression, Expression, ExpressionStatement,
    FloatLiteral, ForStatement, FunctionDeclaration, GroupedExpression, Identifier, IfStatement,
    InfixExpression, InfixOperator, IntegerLiteral, LetStatement, PrefixExpression,
    PrefixOperator, Program, ReturnStatement, Statement, StringLiteral, WhileStatement,
};
use crate::dialect::Dialect;
use crate::lexer::{Lexer, normalize_digits};
use crate::token::{Span, Token, TokenKind};

/// Classifies a parser error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The current token cannot begin an expression.
    NoPrefixParseFunction { found: String },
    /// `-` applied to something other than a number literal.
    NegationRequiresNumber { found: String },
    /// Integer text that does not fit an `i64`.
    InvalidInteger { text: String },
    /// Float text that does not convert to an `f64`.
    InvalidFloat { text: String },
    /// A statement followed by something other than its terminator.
    ExpectedStatementEnd { found: String },
    /// A specific token was required next.
    UnexpectedToken { expected: TokenKind, found: String },
    /// Expressions or blocks nested deeper than the parser allows.
    NestingTooDeep { limit: usize },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPrefixParseFunction { found } => {
                write!(f, "no prefix parse function for {found}")
            }
            Self::NegationRequiresNumber { found } => {
                write!(f, "'-' can only negate a number literal, got {found}")
            }
            Self::InvalidInteger { text } => {
                write!(f, "could not parse \"{text}\" as integer")
            }
            Self::InvalidFloat { text } => {
                write!(f, "could not parse \"{text}\" as float")
            }
            Self::ExpectedStatementEnd { found } => {
                write!(f, "expected end of statement, got {found}")
            }
            Self::UnexpectedToken { expected, found } => {
                write!(f, "expected {expected}, got {found}")
            }
            Self::NestingTooDeep { limit } => {
                write!(f, "nesting exceeds the limit of {limit} levels")
            }
        }
    }
}

/// Error produced during parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", span.line, span.column)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl ParseError {
    const fn at(token: &Token, kind: ParseErrorKind) -> Self {
        Self {
            kind,
            span: token.span,
        }
    }
}

/// Parse a source string written in the base dialect.
///
/// # Errors
///
/// Returns every lexer and parser diagnostic, ordered by position, if
/// any was recorded. No partial tree is returned in that case; see
/// [`Parser::parse_recovering`] for that.
pub fn parse(input: &str) -> Result<Program, Vec<Error>> {
    parse_with(input, Dialect::default())
}

/// Parse a source string written in the given dialect.
#[tracing::instrument(skip_all, fields(source_len = input.len(), dialect = %dialect))]
pub fn parse_with(input: &str, dialect: Dialect) -> Result<Program, Vec<Error>> {
    let (program, errors) = Parser::with_dialect(input, dialect).parse_recovering();
    if errors.is_empty() {
        Ok(program)
    } else {
        Err(errors)
    }
}

/// Binding precedence, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    /// `=`
    Assign,
    /// `or`
    Or,
    /// `and`
    And,
    /// `==` `!=`
    Equals,
    /// `<` `>` `<=` `>=`
    LessGreater,
    /// `+` `-`
    Sum,
    /// `*` `/`
    Product,
    /// `-x` `!x`
    Prefix,
    /// `f(x)`
    Call,
}

impl Precedence {
    /// Precedence of a token in infix position.
    #[must_use]
    pub fn of(kind: TokenKind) -> Self {
        infix_rule(kind).map_or(Self::Lowest, InfixRule::precedence)
    }
}

/// How a token in infix position continues an expression.
#[derive(Debug, Clone, Copy)]
enum InfixRule {
    Binary(InfixOperator),
    Call,
}

impl InfixRule {
    const fn precedence(self) -> Precedence {
        match self {
            Self::Binary(op) => match op {
                InfixOperator::Assign => Precedence::Assign,
                InfixOperator::Or => Precedence::Or,
                InfixOperator::And => Precedence::And,
                InfixOperator::Eq | InfixOperator::NotEq => Precedence::Equals,
                InfixOperator::Lt | InfixOperator::Gt | InfixOperator::Lte | InfixOperator::Gte => {
                    Precedence::LessGreater
                }
                InfixOperator::Add | InfixOperator::Subtract => Precedence::Sum,
                InfixOperator::Multiply | InfixOperator::Divide => Precedence::Product,
            },
            Self::Call => Precedence::Call,
        }
    }
}

/// Infix registry.
const fn infix_rule(kind: TokenKind) -> Option<InfixRule> {
    let op = match kind {
        TokenKind::LParen => return Some(InfixRule::Call),
        TokenKind::Assign => InfixOperator::Assign,
        TokenKind::Or => InfixOperator::Or,
        TokenKind::And => InfixOperator::And,
        TokenKind::Eq => InfixOperator::Eq,
        TokenKind::NotEq => InfixOperator::NotEq,
        TokenKind::Lt => InfixOperator::Lt,
        TokenKind::Gt => InfixOperator::Gt,
        TokenKind::Lte => InfixOperator::Lte,
        TokenKind::Gte => InfixOperator::Gte,
        TokenKind::Plus => InfixOperator::Add,
        TokenKind::Minus => InfixOperator::Subtract,
        TokenKind::Asterisk => InfixOperator::Multiply,
        TokenKind::Slash => InfixOperator::Divide,
        _ => return None,
    };
    Some(InfixRule::Binary(op))
}

type PrefixParseFn<'a> = fn(&mut Parser<'a>) -> Result<Expression, ParseError>;

/// Deepest nesting of expressions and blocks accepted before parsing
/// gives up on a statement.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Pratt parser with one token of lookahead.
///
/// The parser owns its lexer. `current` is the token under examination
/// and `peek` the one after it; every parse function starts with
/// `current` on the first token of its construct and leaves `current`
/// on the last one.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    peek: Token,
    errors: Vec<Error>,
    depth: usize,
}

impl<'a> Parser<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_dialect(input, Dialect::default())
    }

    #[must_use]
    pub fn with_dialect(input: &'a str, dialect: Dialect) -> Self {
        let mut lexer = Lexer::with_dialect(input, dialect);
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            current,
            peek,
            errors: Vec::new(),
            depth: 0,
        }
    }

    /// Diagnostics recorded so far, ordered by position once parsing
    /// has finished.
    #[must_use]
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Parse the whole input.
    ///
    /// Returns `None` if any diagnostic was recorded; the partially
    /// built tree is discarded and the diagnostics are available from
    /// [`Parser::errors`].
    pub fn parse_program(&mut self) -> Option<Program> {
        let program = self.parse_statements();
        self.collect_lexer_errors();
        if self.errors.is_empty() {
            Some(program)
        } else {
            tracing::debug!(errors = self.errors.len(), "discarding partial program");
            None
        }
    }

    /// Parse the whole input and return whatever was built alongside the
    /// diagnostics. Statements that failed to parse are left out of the
    /// tree.
    #[must_use]
    pub fn parse_recovering(mut self) -> (Program, Vec<Error>) {
        let program = self.parse_statements();
        self.collect_lexer_errors();
        (program, self.errors)
    }

    fn parse_statements(&mut self) -> Program {
        let mut program = Program::default();

        while !self.current_is(TokenKind::Eof) {
            if self.current_is(TokenKind::Newline) {
                self.advance();
                continue;
            }

            match self.parse_statement() {
                Ok(statement) => {
                    program.statements.push(statement);
                    if self.peek_is(TokenKind::Newline) || self.peek_is(TokenKind::Eof) {
                        self.advance();
                    } else {
                        let error = self.statement_end_error();
                        self.advance();
                        self.recover(error, false);
                    }
                }
                Err(error) => self.recover(error, false),
            }
        }

        program
    }

    fn collect_lexer_errors(&mut self) {
        let lex_errors = self.lexer.take_errors();
        if lex_errors.is_empty() {
            return;
        }
        self.errors.extend(lex_errors.into_iter().map(Error::from));
        self.errors.sort_by_key(Error::span);
    }

    // -- Token cursor --

    fn advance(&mut self) {
        let next = self.lexer.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
    }

    fn current_is(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    fn expect_peek(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.peek_is(kind) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::at(
                &self.peek,
                ParseErrorKind::UnexpectedToken {
                    expected: kind,
                    found: self.peek.describe(),
                },
            ))
        }
    }

    fn statement_end_error(&self) -> ParseError {
        ParseError::at(
            &self.peek,
            ParseErrorKind::ExpectedStatementEnd {
                found: self.peek.describe(),
            },
        )
    }

    /// Record `error` and skip to the next newline or end of file. Inside
    /// a block a closing brace also ends the skip.
    fn recover(&mut self, error: ParseError, in_block: bool) {
        tracing::debug!(%error, "skipping to next statement");
        self.errors.push(error.into());
        while !matches!(self.current.kind, TokenKind::Newline | TokenKind::Eof)
            && !(in_block && self.current_is(TokenKind::RBrace))
        {
            self.advance();
        }
    }

    /// Count one level of nesting, failing at the current token once
    /// [`MAX_NESTING_DEPTH`] is reached. Pair with [`Parser::leave`].
    fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            tracing::debug!(depth = self.depth, "nesting limit reached");
            return Err(ParseError::at(
                &self.current,
                ParseErrorKind::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
            ));
        }
        self.depth += 1;
        Ok(())
    }

    const fn leave(&mut self) {
        self.depth -= 1;
    }

    fn current_identifier(&self) -> Identifier {
        Identifier {
            token: self.current.clone(),
            value: self.current.text.clone(),
        }
    }

    // -- Statements --

    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        match self.current.kind {
            TokenKind::Let => self.parse_let_statement().map(Statement::Let),
            TokenKind::Return => self.parse_return_statement().map(Statement::Return),
            TokenKind::LBrace => self.parse_block_statement().map(Statement::Block),
            TokenKind::If => self.parse_if_statement().map(Statement::If),
            TokenKind::Function => self.parse_function_declaration().map(Statement::Function),
            TokenKind::For => self.parse_for_statement().map(Statement::For),
            TokenKind::While => self.parse_while_statement().map(Statement::While),
            _ => self
                .parse_expression_statement()
                .map(Statement::Expression),
        }
    }

    fn parse_expression_statement(&mut self) -> Result<ExpressionStatement, ParseError> {
        let token = self.current.clone();
        let expression = self.parse_expression(Precedence::Lowest)?;
        Ok(ExpressionStatement { token, expression })
    }

    fn parse_let_statement(&mut self) -> Result<LetStatement, ParseError> {
        let token = self.current.clone();
        self.expect_peek(TokenKind::Identifier)?;
        let name = self.current_identifier();
        self.expect_peek(TokenKind::Assign)?;
        self.advance();
        let value = self.parse_expression(Precedence::Lowest)?;
        Ok(LetStatement { token, name, value })
    }

    fn parse_return_statement(&mut self) -> Result<ReturnStatement, ParseError> {
        let token = self.current.clone();
        if matches!(
            self.peek.kind,
            TokenKind::Newline | TokenKind::Eof | TokenKind::RBrace
        ) {
            return Ok(ReturnStatement { token, value: None });
        }
        self.advance();
        let value = self.parse_expression(Precedence::Lowest)?;
        Ok(ReturnStatement {
            token,
            value: Some(value),
        })
    }

    /// Expects `current` on `{`; leaves it on the matching `}`.
    fn parse_block_statement(&mut self) -> Result<BlockStatement, ParseError> {
        self.enter()?;
        let block = self.parse_block_body();
        self.leave();
        block
    }

    fn parse_block_body(&mut self) -> Result<BlockStatement, ParseError> {
        let token = self.current.clone();
        let mut statements = Vec::new();
        self.advance();

        while !self.current_is(TokenKind::RBrace) && !self.current_is(TokenKind::Eof) {
            if self.current_is(TokenKind::Newline) {
                self.advance();
                continue;
            }

            match self.parse_statement() {
                Ok(statement) => {
                    statements.push(statement);
                    if matches!(
                        self.peek.kind,
                        TokenKind::Newline | TokenKind::RBrace | TokenKind::Eof
                    ) {
                        self.advance();
                    } else {
                        let error = self.statement_end_error();
                        self.advance();
                        self.recover(error, true);
                    }
                }
                Err(error) => self.recover(error, true),
            }
        }

        if !self.current_is(TokenKind::RBrace) {
            return Err(ParseError::at(
                &self.current,
                ParseErrorKind::UnexpectedToken {
                    expected: TokenKind::RBrace,
                    found: self.current.describe(),
                },
            ));
        }

        Ok(BlockStatement { token, statements })
    }

    /// Handles both `if` and `elsif`.
    fn parse_if_statement(&mut self) -> Result<IfStatement, ParseError> {
        let token = self.current.clone();
        self.advance();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::LBrace)?;
        let consequence = self.parse_block_statement()?;

        let alternative = match self.peek.kind {
            TokenKind::Else => {
                self.advance();
                self.expect_peek(TokenKind::LBrace)?;
                Some(self.parse_block_statement()?)
            }
            TokenKind::Elsif => {
                self.advance();
                let elsif_token = self.current.clone();
                let nested = self.parse_if_statement()?;
                Some(BlockStatement {
                    token: elsif_token,
                    statements: vec![Statement::If(nested)],
                })
            }
            _ => None,
        };

        Ok(IfStatement {
            token,
            condition,
            consequence,
            alternative,
        })
    }

    fn parse_function_declaration(&mut self) -> Result<FunctionDeclaration, ParseError> {
        let token = self.current.clone();
        self.expect_peek(TokenKind::Identifier)?;
        let name = self.current_identifier();
        self.expect_peek(TokenKind::LParen)?;
        let parameters = self.parse_function_parameters()?;
        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block_statement()?;
        Ok(FunctionDeclaration {
            token,
            name,
            parameters,
            body,
        })
    }

    fn parse_function_parameters(&mut self) -> Result<Vec<Identifier>, ParseError> {
        let mut parameters = Vec::new();
        if self.peek_is(TokenKind::RParen) {
            self.advance();
            return Ok(parameters);
        }

        self.expect_peek(TokenKind::Identifier)?;
        parameters.push(self.current_identifier());
        while self.peek_is(TokenKind::Comma) {
            self.advance();
            self.expect_peek(TokenKind::Identifier)?;
            parameters.push(self.current_identifier());
        }

        self.expect_peek(TokenKind::RParen)?;
        Ok(parameters)
    }

    /// `for (init, cond, incr) { ... }` where every clause may be empty.
    fn parse_for_statement(&mut self) -> Result<ForStatement, ParseError> {
        let token = self.current.clone();
        self.expect_peek(TokenKind::LParen)?;

        let initializer = if self.peek_is(TokenKind::Comma) {
            None
        } else {
            self.advance();
            let statement = if self.current_is(TokenKind::Let) {
                Statement::Let(self.parse_let_statement()?)
            } else {
                Statement::Expression(self.parse_expression_statement()?)
            };
            Some(Box::new(statement))
        };
        self.expect_peek(TokenKind::Comma)?;

        let condition = if self.peek_is(TokenKind::Comma) {
            None
        } else {
            self.advance();
            Some(self.parse_expression(Precedence::Lowest)?)
        };
        self.expect_peek(TokenKind::Comma)?;

        let incrementor = if self.peek_is(TokenKind::RParen) {
            None
        } else {
            self.advance();
            Some(self.parse_expression_statement()?)
        };
        self.expect_peek(TokenKind::RParen)?;

        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block_statement()?;

        Ok(ForStatement {
            token,
            initializer,
            condition,
            incrementor,
            body,
        })
    }

    fn parse_while_statement(&mut self) -> Result<WhileStatement, ParseError> {
        let token = self.current.clone();
        self.advance();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block_statement()?;
        Ok(WhileStatement {
            token,
            condition,
            body,
        })
    }

    // -- Expressions --

    /// Prefix registry.
    fn prefix_rule(kind: TokenKind) -> Option<PrefixParseFn<'a>> {
        match kind {
            TokenKind::Identifier => Some(Self::parse_identifier),
            TokenKind::Integer => Some(Self::parse_integer_literal),
            TokenKind::Float => Some(Self::parse_float_literal),
            TokenKind::String => Some(Self::parse_string_literal),
            TokenKind::True | TokenKind::False => Some(Self::parse_boolean_literal),
            TokenKind::Bang | TokenKind::Minus => Some(Self::parse_prefix_expression),
            TokenKind::LParen => Some(Self::parse_grouped_expression),
            TokenKind::Eof
            | TokenKind::Illegal
            | TokenKind::Newline
            | TokenKind::Assign
            | TokenKind::Plus
            | TokenKind::Asterisk
            | TokenKind::Slash
            | TokenKind::Lt
            | TokenKind::Gt
            | TokenKind::Lte
            | TokenKind::Gte
            | TokenKind::Eq
            | TokenKind::NotEq
            | TokenKind::Comma
            | TokenKind::RParen
            | TokenKind::LBrace
            | TokenKind::RBrace
            | TokenKind::LBracket
            | TokenKind::RBracket
            | TokenKind::Function
            | TokenKind::Let
            | TokenKind::If
            | TokenKind::Else
            | TokenKind::Elsif
            | TokenKind::Return
            | TokenKind::And
            | TokenKind::Or
            | TokenKind::For
            | TokenKind::While
            | TokenKind::Tilde => None,
        }
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Result<Expression, ParseError> {
        self.enter()?;
        let expression = self.parse_expression_at(precedence);
        self.leave();
        expression
    }

    fn parse_expression_at(&mut self, precedence: Precedence) -> Result<Expression, ParseError> {
        let Some(prefix) = Self::prefix_rule(self.current.kind) else {
            return Err(ParseError::at(
                &self.current,
                ParseErrorKind::NoPrefixParseFunction {
                    found: self.current.describe(),
                },
            ));
        };
        let mut left = prefix(self)?;

        while let Some(rule) = infix_rule(self.peek.kind) {
            if precedence >= rule.precedence() {
                break;
            }
            self.advance();
            left = match rule {
                InfixRule::Binary(operator) => self.parse_infix_expression(left, operator)?,
                InfixRule::Call => self.parse_call_expression(left)?,
            };
        }

        Ok(left)
    }

    fn parse_identifier(&mut self) -> Result<Expression, ParseError> {
        Ok(Expression::Identifier(self.current_identifier()))
    }

    fn parse_integer_literal(&mut self) -> Result<Expression, ParseError> {
        let token = self.current.clone();
        let value = normalize_digits(&token.text)
            .parse::<i64>()
            .map_err(|_| {
                ParseError::at(
                    &token,
                    ParseErrorKind::InvalidInteger {
                        text: token.text.clone(),
                    },
                )
            })?;
        Ok(Expression::Integer(IntegerLiteral { token, value }))
    }

    fn parse_float_literal(&mut self) -> Result<Expression, ParseError> {
        let token = self.current.clone();
        let value = normalize_digits(&token.text)
            .parse::<f64>()
            .map_err(|_| {
                ParseError::at(
                    &token,
                    ParseErrorKind::InvalidFloat {
                        text: token.text.clone(),
                    },
                )
            })?;
        Ok(Expression::Float(FloatLiteral { token, value }))
    }

    fn parse_string_literal(&mut self) -> Result<Expression, ParseError> {
        let token = self.current.clone();
        let value = unquote(&token.text);
        Ok(Expression::String(StringLiteral { token, value }))
    }

    fn parse_boolean_literal(&mut self) -> Result<Expression, ParseError> {
        Ok(Expression::Boolean(BooleanLiteral {
            token: self.current.clone(),
            value: self.current_is(TokenKind::True),
        }))
    }

    /// `!` takes any operand; `-` only a direct integer or float literal.
    fn parse_prefix_expression(&mut self) -> Result<Expression, ParseError> {
        let token = self.current.clone();
        let operator = if token.kind == TokenKind::Minus {
            PrefixOperator::Negate
        } else {
            PrefixOperator::Not
        };
        self.advance();
        let right = self.parse_expression(Precedence::Prefix)?;

        if operator == PrefixOperator::Negate && !right.is_numeric_literal() {
            return Err(ParseError::at(
                right.token(),
                ParseErrorKind::NegationRequiresNumber {
                    found: format!("{} {}", right.kind_name(), right.token().describe()),
                },
            ));
        }

        Ok(Expression::Prefix(PrefixExpression {
            token,
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_grouped_expression(&mut self) -> Result<Expression, ParseError> {
        let token = self.current.clone();
        self.advance();
        let expression = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;
        Ok(Expression::Grouped(GroupedExpression {
            token,
            expression: Box::new(expression),
        }))
    }

    /// Left associative, except `=` which binds to the right.
    fn parse_infix_expression(
        &mut self,
        left: Expression,
        operator: InfixOperator,
    ) -> Result<Expression, ParseError> {
        let token = self.current.clone();
        let precedence = if operator == InfixOperator::Assign {
            Precedence::Lowest
        } else {
            Precedence::of(token.kind)
        };
        self.advance();
        let right = self.parse_expression(precedence)?;
        Ok(Expression::Infix(InfixExpression {
            token,
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_call_expression(&mut self, function: Expression) -> Result<Expression, ParseError> {
        let token = self.current.clone();
        let mut arguments = Vec::new();

        if self.peek_is(TokenKind::RParen) {
            self.advance();
        } else {
            self.advance();
            arguments.push(self.parse_expression(Precedence::Lowest)?);
            while self.peek_is(TokenKind::Comma) {
                self.advance();
                self.advance();
                arguments.push(self.parse_expression(Precedence::Lowest)?);
            }
            self.expect_peek(TokenKind::RParen)?;
        }

        Ok(Expression::Call(CallExpression {
            token,
            function: Box::new(function),
            arguments,
        }))
    }
}

/// Strip the quotes of a string token and resolve `\"`. An unterminated
/// string only loses its opening quote.
fn unquote(text: &str) -> String {
    let mut value = String::with_capacity(text.len());
    let mut chars = text.chars().skip(1).peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' => break,
            '\\' if chars.peek() == Some(&'"') => {
                value.push('"');
                chars.next();
            }
            _ => value.push(ch),
        }
    }
    value
}
