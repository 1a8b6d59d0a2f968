use std::rc::Rc;

/// A name plus its optional numeric subscript, used both for variables
/// and for definition names. `x` and `x1` are distinct, and so is an
/// unsubscripted `x` from `x0`.
#[derive(PartialEq, Eq, Debug)]
pub struct Identifier {
    pub name: String,
    pub subscript: Option<u64>,
}

pub type IdentRef = Rc<Identifier>;

impl Identifier {
    pub fn new(name: impl Into<String>, subscript: Option<u64>) -> Identifier {
        Identifier {
            name: name.into(),
            subscript,
        }
    }
}

#[derive(PartialEq, Eq, Debug)]
pub enum Term {
    /// `x`, not bound by any enclosing abstraction in its line
    Free(IdentRef),
    /// `x`, sharing its identifier with the enclosing binder
    Bound(IdentRef),
    /// `42`
    Numeral(u64),
    /// `λx. t`
    Abstraction(IdentRef, Box<Term>),
    /// `t t`
    Application(Box<Term>, Box<Term>),
}

/// The parser's output: one term, the definition name if the line read
/// `name = expr`, and every distinct identifier occurring free.
/// Numerals bind no name and never enter `free_variables`.
#[derive(Debug)]
pub struct Handle {
    pub term: Term,
    pub identifier: Option<IdentRef>,
    pub free_variables: Vec<IdentRef>,
}
