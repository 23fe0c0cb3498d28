//! Statement parsing tests.

mod common;

use common::{parse_err, parse_ok, render, single_statement};
use oq_syntax::{Dialect, Error, ParseErrorKind, Span, Statement, TokenKind};

// -----------------------------------------------------------
// let / return.
// -----------------------------------------------------------

#[test]
fn let_statements() {
    let program = parse_ok("let x = 5\nlet y = true\nlet foobar = y", Dialect::Eng);
    let names: Vec<_> = program
        .statements
        .iter()
        .map(|s| match s {
            Statement::Let(l) => l.name.value.as_str(),
            other => panic!("expected let, got {}", other.kind_name()),
        })
        .collect();
    assert_eq!(names, vec!["x", "y", "foobar"]);
}

#[test]
fn let_statement_token_and_value() {
    let Statement::Let(stmt) = single_statement("let sum = 1 + 2") else {
        panic!("expected let");
    };
    assert_eq!(stmt.token.kind, TokenKind::Let);
    assert_eq!(stmt.name.token.span, Span::new(1, 5));
    assert_eq!(render(&stmt.value), "(1 + 2)");
}

#[test]
fn let_requires_assign() {
    let errors = parse_err("let x 5");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message(), "expected '=', got '5'");
}

#[test]
fn return_with_value() {
    let Statement::Return(stmt) = single_statement("return 2 * x") else {
        panic!("expected return");
    };
    assert_eq!(render(stmt.value.as_ref().expect("value")), "(2 * x)");
}

#[test]
fn bare_return() {
    let Statement::Return(stmt) = single_statement("return") else {
        panic!("expected return");
    };
    assert!(stmt.value.is_none());
}

// -----------------------------------------------------------
// Blocks and terminators.
// -----------------------------------------------------------

#[test]
fn statements_need_their_own_line() {
    let errors = parse_err("let a = 1 let b = 2");
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        Error::Parse(e) if matches!(e.kind, ParseErrorKind::ExpectedStatementEnd { .. })
    ));
    assert_eq!(errors[0].span(), Span::new(1, 11));
}

#[test]
fn nested_block_statement() {
    let Statement::Block(block) = single_statement("{\n  let a = 1\n  {\n    a\n  }\n}") else {
        panic!("expected block");
    };
    assert_eq!(block.statements.len(), 2);
    assert!(matches!(block.statements[1], Statement::Block(_)));
}

#[test]
fn single_line_block() {
    let Statement::Block(block) = single_statement("{ 1 }") else {
        panic!("expected block");
    };
    assert_eq!(block.statements.len(), 1);
}

#[test]
fn empty_block() {
    let Statement::Block(block) = single_statement("{}") else {
        panic!("expected block");
    };
    assert!(block.statements.is_empty());
}

#[test]
fn unclosed_block_is_reported() {
    let errors = parse_err("{\n  1\n");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message(), "expected '}', got end of file");
    assert_eq!(errors[0].span(), Span::new(3, 1));
}

#[test]
fn error_inside_block_does_not_swallow_following_statements() {
    let errors = parse_err("{\n  +\n  let = 1\n  ok\n}\nlet x = )");
    let lines: Vec<_> = errors.iter().map(Error::line).collect();
    assert_eq!(lines, vec![2, 3, 6]);
}

#[test]
fn error_before_closing_brace_on_same_line() {
    let errors = parse_err("{ 1 + }\nx");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].span(), Span::new(1, 7));
}

// -----------------------------------------------------------
// if / elsif / else.
// -----------------------------------------------------------

#[test]
fn if_without_else() {
    let Statement::If(stmt) = single_statement("if x < y {\n  x\n}") else {
        panic!("expected if");
    };
    assert_eq!(render(&stmt.condition), "(x < y)");
    assert_eq!(stmt.consequence.statements.len(), 1);
    assert!(stmt.alternative.is_none());
}

#[test]
fn if_else() {
    let Statement::If(stmt) = single_statement("if x { 1 } else { 2 }") else {
        panic!("expected if");
    };
    let alternative = stmt.alternative.expect("else block");
    assert_eq!(alternative.token.kind, TokenKind::LBrace);
    assert_eq!(alternative.statements.len(), 1);
}

#[test]
fn elsif_chain_nests() {
    let Statement::If(stmt) = single_statement("if a { 1 } elsif b { 2 } elsif c { 3 } else { 4 }")
    else {
        panic!("expected if");
    };
    let first = stmt.alternative.expect("elsif");
    assert_eq!(first.token.kind, TokenKind::Elsif);
    let Statement::If(second) = &first.statements[0] else {
        panic!("expected nested if");
    };
    assert_eq!(render(&second.condition), "b");
    let Some(alt) = &second.alternative else {
        panic!("expected second elsif");
    };
    let Statement::If(third) = &alt.statements[0] else {
        panic!("expected nested if");
    };
    assert_eq!(render(&third.condition), "c");
    assert!(third.alternative.is_some());
}

#[test]
fn else_on_next_line_is_rejected() {
    let errors = parse_err("if a {\n  1\n}\nelse {\n  2\n}");
    assert!(errors.iter().any(|e| e.line() == 4));
}

#[test]
fn if_requires_brace() {
    let errors = parse_err("if a 1");
    assert_eq!(errors[0].message(), "expected '{', got '1'");
}

// -----------------------------------------------------------
// Functions.
// -----------------------------------------------------------

#[test]
fn function_declaration() {
    let Statement::Function(func) = single_statement("fn add(a, b) {\n  return a + b\n}") else {
        panic!("expected fn");
    };
    assert_eq!(func.name.value, "add");
    let params: Vec<_> = func.parameters.iter().map(|p| p.value.as_str()).collect();
    assert_eq!(params, vec!["a", "b"]);
    assert_eq!(func.body.statements.len(), 1);
}

#[test]
fn function_without_parameters() {
    let Statement::Function(func) = single_statement("fn noop() {}") else {
        panic!("expected fn");
    };
    assert!(func.parameters.is_empty());
}

#[test]
fn function_parameters_must_be_identifiers() {
    let errors = parse_err("fn f(1) {}");
    assert_eq!(errors[0].message(), "expected identifier, got '1'");
}

#[test]
fn function_requires_name() {
    let errors = parse_err("fn (a) {}");
    assert_eq!(errors[0].span(), Span::new(1, 4));
}

// -----------------------------------------------------------
// Loops.
// -----------------------------------------------------------

#[test]
fn for_with_all_clauses() {
    let Statement::For(stmt) = single_statement("for (let i = 0, i < 3, i = i + 1) {\n  i\n}")
    else {
        panic!("expected for");
    };
    assert!(matches!(
        stmt.initializer.as_deref(),
        Some(Statement::Let(l)) if l.name.value == "i"
    ));
    assert_eq!(render(stmt.condition.as_ref().expect("cond")), "(i < 3)");
    assert_eq!(
        render(&stmt.incrementor.as_ref().expect("incr").expression),
        "(i = (i + 1))"
    );
    assert_eq!(stmt.body.statements.len(), 1);
}

#[test]
fn for_with_empty_clauses() {
    let Statement::For(stmt) = single_statement("for (, , ) {}") else {
        panic!("expected for");
    };
    assert!(stmt.initializer.is_none());
    assert!(stmt.condition.is_none());
    assert!(stmt.incrementor.is_none());
}

#[test]
fn for_with_expression_initializer() {
    let Statement::For(stmt) = single_statement("for (i = 0, , ) {}") else {
        panic!("expected for");
    };
    assert!(matches!(
        stmt.initializer.as_deref(),
        Some(Statement::Expression(_))
    ));
}

#[test]
fn for_requires_commas() {
    assert!(!parse_err("for (let i = 0; i < 3) {}").is_empty());
}

#[test]
fn while_loop() {
    let Statement::While(stmt) = single_statement("while n > 0 {\n  n = n - 1\n}") else {
        panic!("expected while");
    };
    assert_eq!(render(&stmt.condition), "(n > 0)");
    assert_eq!(stmt.body.statements.len(), 1);
}
