//! Lex the same program in every bundled dialect.

use oq_syntax::{Dialect, Statement, parse_with, tokenize_with};

const SOURCES: [(Dialect, &str); 3] = [
    (Dialect::Eng, "let x = 10\nwhile x > 0 {\n  x = x - 1\n}\n"),
    (Dialect::Qzq, "болсын x = 10\nуақытша x > 0 {\n  x = x - 1\n}\n"),
    (Dialect::Trk, "olsun x = 10\niken x > 0 {\n  x = x - 1\n}\n"),
];

fn main() {
    for (dialect, source) in SOURCES {
        println!("--- {dialect} ---");
        let (tokens, _) = tokenize_with(source, dialect);
        for token in tokens.iter().take(4) {
            println!("  {}  {:<12} {:?}", token.span, token.kind.describe(), token.text);
        }

        match parse_with(source, dialect) {
            Ok(program) => {
                let kinds: Vec<_> = program.statements.iter().map(Statement::kind_name).collect();
                println!("  statements: {}", kinds.join(", "));
            }
            Err(errors) => {
                for error in errors {
                    println!("  error: {error}");
                }
            }
        }
    }
}
