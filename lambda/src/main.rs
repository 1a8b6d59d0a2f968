use anyhow::Result;
use util::{
    repl::{self, Flow, Repl},
    ResultExt as _,
};

use crate::store::Definitions;
use crate::validate::SyntaxError;

mod ast;
mod chars;
mod parser;
mod print;
mod store;
mod validate;

struct Interpreter {
    definitions: Definitions,
}

impl Interpreter {
    fn new() -> Self {
        Interpreter {
            definitions: Definitions::new(),
        }
    }

    fn process(&mut self, line: &str) {
        match validate::validate(line) {
            Err(error) => diagnose(line, error),
            Ok(classification) => {
                let handle = parser::build(line, classification);
                println!("{handle}");
                if let Some(identifier) = handle.identifier.clone() {
                    self.definitions.set(identifier, handle.term);
                }
            }
        }
    }
}

/// `ERROR: <message>`, the offending line, and a caret under the
/// reported offset.
fn diagnostic(line: &str, error: SyntaxError) -> String {
    format!(
        "ERROR: {error}\n\t{line}\n\t{caret:>width$}",
        caret = '^',
        width = error.offset() + 1
    )
}

fn diagnose(line: &str, error: SyntaxError) {
    println!("{}", diagnostic(line, error));
}

impl Repl for Interpreter {
    type Error = std::convert::Infallible;
    const PROMPT: &'static str = "λ> ";

    fn evaluate(&mut self, input: String) -> Result<Flow, Self::Error> {
        // any line opening with the sentinel ends the session
        if input.starts_with(':') {
            return Ok(Flow::Break);
        }
        self.process(&input);
        Ok(Flow::Continue)
    }
}

fn main() -> Result<()> {
    println!("λ-calculus reader: `expr` parses, `name = expr` defines, `:` quits.");
    repl::start_repl(Interpreter::new()).staticalize()
}
