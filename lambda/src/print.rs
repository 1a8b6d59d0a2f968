//! Minimal-parenthesization rendering. An explicit task stack drives
//! the traversal, so print depth is bounded by the heap rather than the
//! call stack.

use std::fmt;

use crate::ast::{Handle, Identifier, Term};

enum Task<'a> {
    Term(&'a Term),
    Text(&'static str),
}

/// Function position needs parentheses when a lone abstraction would
/// swallow the following argument, or when the function is itself an
/// application ending in one.
fn function_needs_parens(function: &Term) -> bool {
    match function {
        Term::Abstraction(_, _) => true,
        Term::Application(_, argument) => matches!(argument.as_ref(), Term::Abstraction(_, _)),
        _ => false,
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(subscript) = self.subscript {
            write!(f, "{subscript}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tasks = vec![Task::Term(self)];
        while let Some(task) = tasks.pop() {
            match task {
                Task::Text(text) => f.write_str(text)?,
                Task::Term(Term::Free(identifier) | Term::Bound(identifier)) => {
                    write!(f, "{identifier}")?;
                }
                Task::Term(Term::Numeral(n)) => write!(f, "{n}")?,
                Task::Term(Term::Abstraction(parameter, body)) => {
                    write!(f, "λ{parameter}. ")?;
                    tasks.push(Task::Term(body));
                }
                Task::Term(Term::Application(function, argument)) => {
                    // pushed in reverse of emission order; the argument
                    // is parenthesized only to keep display
                    // left-associative
                    if matches!(argument.as_ref(), Term::Application(_, _)) {
                        tasks.push(Task::Text(")"));
                        tasks.push(Task::Term(argument));
                        tasks.push(Task::Text(" ("));
                    } else {
                        tasks.push(Task::Term(argument));
                        tasks.push(Task::Text(" "));
                    }
                    if function_needs_parens(function) {
                        tasks.push(Task::Text(")"));
                        tasks.push(Task::Term(function));
                        tasks.push(Task::Text("("));
                    } else {
                        tasks.push(Task::Term(function));
                    }
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(identifier) = &self.identifier {
            write!(f, "{identifier} = ")?;
        }
        self.term.fmt(f)
    }
}
