use thiserror::Error;

use crate::chars::{self, is_digit, is_name_char, is_valid_char};

/// Syntax faults, each carrying the byte offset of the offending
/// character (or the end-of-line offset for truncated input). Detected
/// before any term is allocated.
#[derive(Error, PartialEq, Eq, Clone, Copy, Debug)]
pub enum SyntaxError {
    #[error("invalid character")]
    InvalidCharacter(usize),
    #[error("unexpected operator")]
    UnexpectedOperator(usize),
    #[error("expected argument after lambda operator")]
    ExpectedArgument(usize),
    #[error("expected dot after lambda operator and argument")]
    ExpectedDot(usize),
    #[error("invalid parenthesis")]
    InvalidParenthesis(usize),
    #[error("expression expected")]
    ExpressionExpected(usize),
}

impl SyntaxError {
    pub fn offset(&self) -> usize {
        match *self {
            SyntaxError::InvalidCharacter(at)
            | SyntaxError::UnexpectedOperator(at)
            | SyntaxError::ExpectedArgument(at)
            | SyntaxError::ExpectedDot(at)
            | SyntaxError::InvalidParenthesis(at)
            | SyntaxError::ExpressionExpected(at) => at,
        }
    }
}

/// How a valid line is to be built: a named definition (`name = expr`)
/// or an anonymous expression.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Classification {
    Definition,
    Temporary,
}

/// Single left-to-right scan rejecting malformed input, so the parser
/// only ever runs on lines it cannot fail on. Tracks parenthesis depth,
/// whether an expression is still pending, and whether the line opened
/// with `name =`. First error wins; no allocation.
pub fn validate(line: &str) -> Result<Classification, SyntaxError> {
    use SyntaxError::*;

    let bytes = line.as_bytes();
    let mut classification: Option<Classification> = None;
    let mut expression_expected = true;
    let mut depth = 0usize;
    let mut pos = chars::skip_whitespace(bytes, 0);

    while pos < bytes.len() {
        let c = bytes[pos];
        if !is_valid_char(c) {
            return Err(InvalidCharacter(pos));
        }
        match c {
            b'.' | b'=' => return Err(UnexpectedOperator(pos)),
            b'(' => {
                depth += 1;
                expression_expected = true;
                classification.get_or_insert(Classification::Temporary);
                pos += 1;
            }
            b')' => {
                if depth == 0 {
                    return Err(InvalidParenthesis(pos));
                }
                if expression_expected {
                    return Err(ExpressionExpected(pos));
                }
                depth -= 1;
                pos += 1;
            }
            b'\\' | chars::LAMBDA_LEAD => {
                pos = lambda_operator(bytes, pos)?;
                pos = chars::skip_whitespace(bytes, pos);
                if pos >= bytes.len() || !is_name_char(bytes[pos]) {
                    return Err(ExpectedArgument(pos));
                }
                pos = chars::skip_whitespace(bytes, chars::skip_name(bytes, pos));
                if pos >= bytes.len() || bytes[pos] != b'.' {
                    return Err(ExpectedDot(pos));
                }
                expression_expected = true;
                classification.get_or_insert(Classification::Temporary);
                pos += 1;
            }
            _ => {
                // a name or numeral run; whitespace never reaches here
                let start = pos;
                pos = chars::skip_name(bytes, pos);
                expression_expected = false;
                if classification.is_none() {
                    if is_digit(bytes[start]) {
                        // names start with a letter, so a digit-led run
                        // can never open a definition
                        classification = Some(Classification::Temporary);
                    } else {
                        let after = chars::skip_whitespace(bytes, pos);
                        if after < bytes.len() && bytes[after] == b'=' {
                            classification = Some(Classification::Definition);
                            expression_expected = true;
                            pos = after + 1;
                        } else {
                            classification = Some(Classification::Temporary);
                        }
                    }
                }
            }
        }
        pos = chars::skip_whitespace(bytes, pos);
    }

    if depth != 0 {
        return Err(InvalidParenthesis(bytes.len()));
    }
    if expression_expected {
        return Err(ExpressionExpected(bytes.len()));
    }
    Ok(classification.unwrap_or(Classification::Temporary))
}

/// Consumes the abstraction operator: one byte for `\`, two for `λ`.
/// A lead byte without the `λ` trail is just an invalid character.
fn lambda_operator(bytes: &[u8], pos: usize) -> Result<usize, SyntaxError> {
    if bytes[pos] == b'\\' {
        Ok(pos + 1)
    } else if bytes.get(pos + 1) == Some(&chars::LAMBDA_TRAIL) {
        Ok(pos + 2)
    } else {
        Err(SyntaxError::InvalidCharacter(pos))
    }
}

#[cfg(test)]
mod test {
    use super::{Classification::*, SyntaxError::*, *};

    #[test]
    fn classification() {
        assert_eq!(validate("x y"), Ok(Temporary));
        assert_eq!(validate("(x)"), Ok(Temporary));
        assert_eq!(validate("λx. x"), Ok(Temporary));
        assert_eq!(validate("42"), Ok(Temporary));
        assert_eq!(validate("id = \\x. x"), Ok(Definition));
        assert_eq!(validate("f2 = λx. x 2"), Ok(Definition));
        assert_eq!(validate("  spaced  =  y  "), Ok(Definition));
    }

    #[test]
    fn invalid_characters() {
        assert_eq!(validate("a $ b"), Err(InvalidCharacter(2)));
        assert_eq!(validate("é"), Err(InvalidCharacter(0)));
        // a lead byte that does not continue into `λ`
        assert_eq!(validate("ν"), Err(InvalidCharacter(0)));
    }

    #[test]
    fn operators_out_of_place() {
        assert_eq!(validate(". x"), Err(UnexpectedOperator(0)));
        assert_eq!(validate("= x"), Err(UnexpectedOperator(0)));
        assert_eq!(validate("x = y = z"), Err(UnexpectedOperator(6)));
        assert_eq!(validate("5 = x"), Err(UnexpectedOperator(2)));
    }

    #[test]
    fn abstraction_headers() {
        assert_eq!(validate("\\. x"), Err(ExpectedArgument(1)));
        assert_eq!(validate("λ. x"), Err(ExpectedArgument(2)));
        assert_eq!(validate("\\"), Err(ExpectedArgument(1)));
        assert_eq!(validate("\\x x"), Err(ExpectedDot(3)));
        assert_eq!(validate("\\x"), Err(ExpectedDot(2)));
    }

    #[test]
    fn parenthesis_errors() {
        assert_eq!(validate("(a"), Err(InvalidParenthesis(2)));
        assert_eq!(validate("a b)"), Err(InvalidParenthesis(3)));
        assert_eq!(validate("(a))"), Err(InvalidParenthesis(3)));
        assert_eq!(validate("a ()"), Err(ExpressionExpected(3)));
        assert_eq!(validate("(\\x. ) y"), Err(ExpressionExpected(5)));
    }

    #[test]
    fn pending_expression_at_end() {
        assert_eq!(validate(""), Err(ExpressionExpected(0)));
        assert_eq!(validate("   "), Err(ExpressionExpected(3)));
        assert_eq!(validate("x ="), Err(ExpressionExpected(3)));
        assert_eq!(validate("\\x."), Err(ExpressionExpected(3)));
    }
}
