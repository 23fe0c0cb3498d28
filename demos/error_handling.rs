//! Demonstrate diagnostics for invalid oq input.

use oq_syntax::{Error, Parser};

fn main() {
    // Unterminated string literal
    match oq_syntax::parse("let greeting = \"unclosed\n") {
        Ok(_) => println!("Parsed OK (unexpected)"),
        Err(errors) => {
            for error in &errors {
                match error {
                    Error::Lex(e) => {
                        println!("Lex error: {e}");
                        println!("  Kind: {:?}", e.kind);
                    }
                    Error::Parse(e) => println!("Parse error: {e}"),
                }
            }
        }
    }

    println!();

    // Several broken lines: each one is reported, the good ones are kept
    let source = "let x = 1\nlet = 2\n-true\nx + 1\nif x {\n";
    let (program, errors) = Parser::new(source).parse_recovering();
    println!("Recovered {} statement(s)", program.statements.len());
    for error in &errors {
        println!(
            "  line {}, column {}: {}",
            error.line(),
            error.column(),
            error.message()
        );
    }
}
