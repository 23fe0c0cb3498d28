use std::fmt;

use crate::token::Token;

/// Root of a parsed source file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

/// Statement node. Statements are newline terminated.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Expression(ExpressionStatement),
    Let(LetStatement),
    Return(ReturnStatement),
    Block(BlockStatement),
    If(IfStatement),
    Function(FunctionDeclaration),
    For(ForStatement),
    While(WhileStatement),
}

/// An expression used as a statement: `x + 5`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub token: Token,
    pub expression: Expression,
}

/// `let name = value`
#[derive(Debug, Clone, PartialEq)]
pub struct LetStatement {
    pub token: Token,
    pub name: Identifier,
    pub value: Expression,
}

/// `return value`; the value may be omitted.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub token: Token,
    pub value: Option<Expression>,
}

/// `{ ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub token: Token,
    pub statements: Vec<Statement>,
}

/// `if cond { ... } else { ... }`.
///
/// An `elsif` chain is stored as an alternative block whose only
/// statement is the nested `IfStatement`.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub token: Token,
    pub condition: Expression,
    pub consequence: BlockStatement,
    pub alternative: Option<BlockStatement>,
}

/// `fn name(a, b) { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub token: Token,
    pub name: Identifier,
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
}

/// `for (let i = 0, i < 10, i = i + 1) { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    pub token: Token,
    pub initializer: Option<Box<Statement>>,
    pub condition: Option<Expression>,
    pub incrementor: Option<ExpressionStatement>,
    pub body: BlockStatement,
}

/// `while cond { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub token: Token,
    pub condition: Expression,
    pub body: BlockStatement,
}

impl Statement {
    /// Token the statement was parsed from.
    #[must_use]
    pub const fn token(&self) -> &Token {
        match self {
            Self::Expression(s) => &s.token,
            Self::Let(s) => &s.token,
            Self::Return(s) => &s.token,
            Self::Block(s) => &s.token,
            Self::If(s) => &s.token,
            Self::Function(s) => &s.token,
            Self::For(s) => &s.token,
            Self::While(s) => &s.token,
        }
    }

    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Expression(_) => "ExpressionStatement",
            Self::Let(_) => "LetStatement",
            Self::Return(_) => "ReturnStatement",
            Self::Block(_) => "BlockStatement",
            Self::If(_) => "IfStatement",
            Self::Function(_) => "FunctionDeclaration",
            Self::For(_) => "ForStatement",
            Self::While(_) => "WhileStatement",
        }
    }

    /// The wrapped expression, for expression statements.
    #[must_use]
    pub const fn as_expression(&self) -> Option<&Expression> {
        match self {
            Self::Expression(s) => Some(&s.expression),
            _ => None,
        }
    }
}

/// Expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    Integer(IntegerLiteral),
    Float(FloatLiteral),
    String(StringLiteral),
    Boolean(BooleanLiteral),
    Prefix(PrefixExpression),
    Infix(InfixExpression),
    Call(CallExpression),
    Grouped(GroupedExpression),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerLiteral {
    pub token: Token,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatLiteral {
    pub token: Token,
    pub value: f64,
}

/// String literal. `value` is unquoted; `token.text` keeps the quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteral {
    pub token: Token,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanLiteral {
    pub token: Token,
    pub value: bool,
}

/// `-x`, `!x`
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpression {
    pub token: Token,
    pub operator: PrefixOperator,
    pub right: Box<Expression>,
}

/// `a + b`, `x == y`
#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpression {
    pub token: Token,
    pub left: Box<Expression>,
    pub operator: InfixOperator,
    pub right: Box<Expression>,
}

/// `callee(arg1, arg2)`
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub token: Token,
    pub function: Box<Expression>,
    pub arguments: Vec<Expression>,
}

/// `(expr)`
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedExpression {
    pub token: Token,
    pub expression: Box<Expression>,
}

impl Expression {
    /// Token the expression was parsed from. For infix and call
    /// expressions this is the operator or `(` token.
    #[must_use]
    pub const fn token(&self) -> &Token {
        match self {
            Self::Identifier(e) => &e.token,
            Self::Integer(e) => &e.token,
            Self::Float(e) => &e.token,
            Self::String(e) => &e.token,
            Self::Boolean(e) => &e.token,
            Self::Prefix(e) => &e.token,
            Self::Infix(e) => &e.token,
            Self::Call(e) => &e.token,
            Self::Grouped(e) => &e.token,
        }
    }

    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Identifier(_) => "Identifier",
            Self::Integer(_) => "IntegerLiteral",
            Self::Float(_) => "FloatLiteral",
            Self::String(_) => "StringLiteral",
            Self::Boolean(_) => "BooleanLiteral",
            Self::Prefix(_) => "PrefixExpression",
            Self::Infix(_) => "InfixExpression",
            Self::Call(_) => "CallExpression",
            Self::Grouped(_) => "GroupedExpression",
        }
    }

    /// Whether this is directly an integer or float literal.
    #[must_use]
    pub const fn is_numeric_literal(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_))
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefixOperator {
    /// `!`
    Not,
    /// `-`
    Negate,
}

impl PrefixOperator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Not => "!",
            Self::Negate => "-",
        }
    }
}

impl fmt::Display for PrefixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfixOperator {
    Assign,
    Or,
    And,
    Eq,
    NotEq,
    Lt,
    Gt,
    Lte,
    Gte,
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl InfixOperator {
    /// Canonical spelling. Logical operators use the base dialect
    /// keywords.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::Or => "or",
            Self::And => "and",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Lte => "<=",
            Self::Gte => ">=",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }
}

impl fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
