//! Character classification and the byte-offset scanners shared by the
//! validator and the parser.

/// Lead byte of the two-byte UTF-8 encoding of `λ`.
pub const LAMBDA_LEAD: u8 = 0xCE;
/// Trail byte of `λ`. Only ever valid right after [`LAMBDA_LEAD`].
pub const LAMBDA_TRAIL: u8 = 0xBB;

pub fn is_name_char(c: u8) -> bool {
    c.is_ascii_alphanumeric()
}

pub fn is_digit(c: u8) -> bool {
    c.is_ascii_digit()
}

pub fn is_valid_char(c: u8) -> bool {
    is_name_char(c) || matches!(c, b'\\' | b'.' | b'(' | b')' | b'=' | b' ' | LAMBDA_LEAD)
}

pub fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos] == b' ' {
        pos += 1;
    }
    pos
}

pub fn skip_name(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && is_name_char(bytes[pos]) {
        pos += 1;
    }
    pos
}
