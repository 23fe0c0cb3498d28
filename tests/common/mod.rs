#![allow(dead_code)]

use oq_syntax::{
    Dialect, Error, Expression, Program, Statement, TokenKind, parse_with, tokenize_with,
};

/// Token kinds of `input`, EOF included.
pub fn kinds(input: &str, dialect: Dialect) -> Vec<TokenKind> {
    tokenize_with(input, dialect)
        .0
        .iter()
        .map(|t| t.kind)
        .collect()
}

/// Parse and fail the test on any diagnostic.
pub fn parse_ok(input: &str, dialect: Dialect) -> Program {
    parse_with(input, dialect).unwrap_or_else(|errors| {
        let messages: Vec<_> = errors.iter().map(ToString::to_string).collect();
        panic!(
            "unexpected diagnostics\n--- input ---\n{input}\n--- errors ---\n{}",
            messages.join("\n")
        )
    })
}

/// Parse and return the diagnostics; fail the test if there are none.
pub fn parse_err(input: &str) -> Vec<Error> {
    match parse_with(input, Dialect::Eng) {
        Ok(program) => panic!("expected diagnostics for {input:?}, got {program:?}"),
        Err(errors) => errors,
    }
}

pub fn single_statement(input: &str) -> Statement {
    let mut program = parse_ok(input, Dialect::Eng);
    assert_eq!(program.statements.len(), 1, "input: {input:?}");
    program.statements.remove(0)
}

pub fn single_expression(input: &str) -> Expression {
    match single_statement(input) {
        Statement::Expression(s) => s.expression,
        other => panic!("expected expression statement, got {}", other.kind_name()),
    }
}

/// Fully parenthesized rendering of an expression.
pub fn render(expr: &Expression) -> String {
    match expr {
        Expression::Identifier(e) => e.value.clone(),
        Expression::Integer(e) => e.value.to_string(),
        Expression::Float(e) => e.value.to_string(),
        Expression::String(e) => format!("{:?}", e.value),
        Expression::Boolean(e) => e.value.to_string(),
        Expression::Prefix(e) => format!("({}{})", e.operator, render(&e.right)),
        Expression::Infix(e) => {
            format!("({} {} {})", render(&e.left), e.operator, render(&e.right))
        }
        Expression::Call(e) => {
            let args: Vec<_> = e.arguments.iter().map(render).collect();
            format!("{}({})", render(&e.function), args.join(", "))
        }
        Expression::Grouped(e) => render(&e.expression),
    }
}

/// One line per statement, nested blocks indented. Used to compare trees
/// across dialects without comparing spans.
pub fn outline(program: &Program) -> String {
    let mut out = String::new();
    for statement in &program.statements {
        outline_statement(statement, 0, &mut out);
    }
    out
}

fn outline_statement(statement: &Statement, depth: usize, out: &mut String) {
    let pad = "  ".repeat(depth);
    match statement {
        Statement::Expression(s) => out.push_str(&format!("{pad}{}\n", render(&s.expression))),
        Statement::Let(s) => {
            out.push_str(&format!("{pad}let {} = {}\n", s.name.value, render(&s.value)));
        }
        Statement::Return(s) => match &s.value {
            Some(value) => out.push_str(&format!("{pad}return {}\n", render(value))),
            None => out.push_str(&format!("{pad}return\n")),
        },
        Statement::Block(s) => {
            out.push_str(&format!("{pad}block\n"));
            for inner in &s.statements {
                outline_statement(inner, depth + 1, out);
            }
        }
        Statement::If(s) => {
            out.push_str(&format!("{pad}if {}\n", render(&s.condition)));
            for inner in &s.consequence.statements {
                outline_statement(inner, depth + 1, out);
            }
            if let Some(alternative) = &s.alternative {
                out.push_str(&format!("{pad}else\n"));
                for inner in &alternative.statements {
                    outline_statement(inner, depth + 1, out);
                }
            }
        }
        Statement::Function(s) => {
            let params: Vec<_> = s.parameters.iter().map(|p| p.value.as_str()).collect();
            out.push_str(&format!("{pad}fn {}({})\n", s.name.value, params.join(", ")));
            for inner in &s.body.statements {
                outline_statement(inner, depth + 1, out);
            }
        }
        Statement::For(s) => {
            out.push_str(&format!("{pad}for\n"));
            if let Some(init) = &s.initializer {
                outline_statement(init, depth + 1, out);
            }
            if let Some(condition) = &s.condition {
                out.push_str(&format!("{pad}  cond {}\n", render(condition)));
            }
            if let Some(incr) = &s.incrementor {
                out.push_str(&format!("{pad}  incr {}\n", render(&incr.expression)));
            }
            for inner in &s.body.statements {
                outline_statement(inner, depth + 1, out);
            }
        }
        Statement::While(s) => {
            out.push_str(&format!("{pad}while {}\n", render(&s.condition)));
            for inner in &s.body.statements {
                outline_statement(inner, depth + 1, out);
            }
        }
    }
}
