//! The stack-automaton term builder. Runs only on lines the validator
//! accepted, so it has no error surface of its own.

use std::rc::Rc;

use crate::ast::{Handle, IdentRef, Identifier, Term};
use crate::chars::{self, is_digit};
use crate::validate::Classification;

/// One operand-stack entry. `Incomplete` is an abstraction whose body
/// has not been attached yet; it is turned into `Term::Abstraction`
/// during reduction and never escapes this module.
enum Frame {
    /// Scope boundary opened by `(`, plus one at the bottom of the
    /// stack for the whole line.
    Sentinel,
    Term(Term),
    Incomplete(IdentRef),
}

/// Builds the term for a validated line. Iterative throughout: nesting
/// depth costs heap, not call stack.
pub fn build(line: &str, classification: Classification) -> Handle {
    Builder::new(line).run(classification)
}

struct Builder<'a> {
    line: &'a str,
    pos: usize,
    stack: Vec<Frame>,
    /// Binders of the currently open abstractions, innermost last.
    scopes: Vec<IdentRef>,
    /// Distinct identifiers seen free so far, in first-appearance order.
    free_variables: Vec<IdentRef>,
}

impl<'a> Builder<'a> {
    fn new(line: &'a str) -> Self {
        Builder {
            line,
            pos: 0,
            stack: Vec::new(),
            scopes: Vec::new(),
            free_variables: Vec::new(),
        }
    }

    fn run(mut self, classification: Classification) -> Handle {
        let identifier = match classification {
            Classification::Definition => Some(self.definition_name()),
            Classification::Temporary => None,
        };

        self.stack.push(Frame::Sentinel);

        let bytes = self.line.as_bytes();
        self.pos = chars::skip_whitespace(bytes, self.pos);
        while self.pos < bytes.len() {
            match bytes[self.pos] {
                b'(' => {
                    self.stack.push(Frame::Sentinel);
                    self.pos += 1;
                }
                b')' => {
                    self.reduce();
                    self.pos += 1;
                }
                b'\\' | chars::LAMBDA_LEAD => self.abstraction(),
                c if is_digit(c) => {
                    let n = self.numeral();
                    self.push_term(Term::Numeral(n));
                }
                _ => {
                    let identifier = self.identifier();
                    let occurrence = self.resolve(identifier);
                    self.push_term(occurrence);
                }
            }
            self.pos = chars::skip_whitespace(bytes, self.pos);
        }

        self.reduce();

        let term = match self.stack.pop() {
            Some(Frame::Term(term)) => term,
            // the validator rejects lines holding no expression
            _ => unreachable!("validated line built no term"),
        };

        Handle {
            term,
            identifier,
            free_variables: self.free_variables,
        }
    }

    /// Consumes the leading `name[subscript] =` of a definition line.
    fn definition_name(&mut self) -> IdentRef {
        let bytes = self.line.as_bytes();
        self.pos = chars::skip_whitespace(bytes, self.pos);
        let identifier = self.identifier();
        self.pos = chars::skip_whitespace(bytes, self.pos);
        // the validator guaranteed the `=`
        self.pos += 1;
        identifier
    }

    /// Consumes `\x.`/`λx.`: opens an incomplete abstraction and its
    /// binding scope. The scope closes when the abstraction does.
    fn abstraction(&mut self) {
        let bytes = self.line.as_bytes();
        self.pos += if bytes[self.pos] == b'\\' { 1 } else { 2 };
        self.pos = chars::skip_whitespace(bytes, self.pos);
        let parameter = self.identifier();
        self.pos = chars::skip_whitespace(bytes, self.pos);
        // the validator guaranteed the dot
        self.pos += 1;
        self.stack.push(Frame::Incomplete(parameter.clone()));
        self.scopes.push(parameter);
    }

    /// Scans a name run and splits a maximal trailing digit run off as
    /// the subscript: `x12` is (`x`, 12), `a1b2` is (`a1b`, 2). A run
    /// with no letters is kept whole as a subscript-less name.
    fn identifier(&mut self) -> IdentRef {
        let start = self.pos;
        self.pos = chars::skip_name(self.line.as_bytes(), self.pos);
        let run = &self.line[start..self.pos];

        let mut split = run.len();
        while split > 0 && run.as_bytes()[split - 1].is_ascii_digit() {
            split -= 1;
        }
        let (name, subscript) = if split == 0 || split == run.len() {
            (run, None)
        } else {
            (&run[..split], Some(digits_value(&run[split..])))
        };
        Rc::new(Identifier::new(name, subscript))
    }

    fn numeral(&mut self) -> u64 {
        let start = self.pos;
        let bytes = self.line.as_bytes();
        while self.pos < bytes.len() && is_digit(bytes[self.pos]) {
            self.pos += 1;
        }
        digits_value(&self.line[start..self.pos])
    }

    /// Resolves a name occurrence: innermost open binder first (this is
    /// what makes `\x.\x. x` bind the inner `x`), then the free table,
    /// else a fresh free-table entry. Matches share the stored `Rc`.
    fn resolve(&mut self, identifier: IdentRef) -> Term {
        if let Some(binder) = self
            .scopes
            .iter()
            .rev()
            .find(|binder| binder.as_ref() == identifier.as_ref())
        {
            return Term::Bound(binder.clone());
        }
        if let Some(free) = self
            .free_variables
            .iter()
            .find(|free| free.as_ref() == identifier.as_ref())
        {
            return Term::Free(free.clone());
        }
        self.free_variables.push(identifier.clone());
        Term::Free(identifier)
    }

    /// Pushes a completed term, eagerly folding it as the argument of
    /// whatever completed term sits on top: juxtaposition application
    /// is left-associative without lookahead.
    fn push_term(&mut self, term: Term) {
        let term = match self.stack.pop() {
            Some(Frame::Term(function)) => Term::Application(function.into(), term.into()),
            Some(other) => {
                self.stack.push(other);
                term
            }
            None => term,
        };
        self.stack.push(Frame::Term(term));
    }

    /// Pops frames down to and including the nearest sentinel, closing
    /// abstractions innermost-out (each close also pops its scope
    /// entry) and folding anything else left-associatively, then pushes
    /// the result so it can become an argument across the boundary.
    fn reduce(&mut self) {
        let mut reduced: Option<Term> = None;
        loop {
            match self.stack.pop() {
                Some(Frame::Term(term)) => {
                    reduced = Some(match reduced.take() {
                        Some(argument) => Term::Application(term.into(), argument.into()),
                        None => term,
                    });
                }
                Some(Frame::Incomplete(parameter)) => {
                    self.scopes.pop();
                    // a body exists: the validator refuses `\x.)` forms
                    if let Some(body) = reduced.take() {
                        reduced = Some(Term::Abstraction(parameter, body.into()));
                    }
                }
                Some(Frame::Sentinel) | None => break,
            }
        }
        if let Some(term) = reduced {
            self.push_term(term);
        }
    }
}

/// Saturating decimal accumulation; the validator cannot bound the
/// length of a digit run.
fn digits_value(digits: &str) -> u64 {
    digits.bytes().fold(0u64, |n, d| {
        n.saturating_mul(10).saturating_add(u64::from(d - b'0'))
    })
}
