//! Tokenizer for the algebraic expression language.
//!
//! Recognizes:
//! - Numbers (`12`, `1.5`, `.5`, `2e-3`)
//! - Identifiers (`x`, `sin`, `pi`, `nthRoot`)
//! - Operators `+ - * / ^` and punctuation `( ) ,`

use crate::error::ExprError;

/// A token of an algebraic expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal.
    Number(f64),
    /// Identifier: variable, constant or function name.
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
    Comma,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Number(v) => write!(f, "{v}"),
            Token::Ident(name) => write!(f, "{name}"),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Star => f.write_str("*"),
            Token::Slash => f.write_str("/"),
            Token::Caret => f.write_str("^"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::Comma => f.write_str(","),
        }
    }
}

/// A token with the byte offset where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub offset: usize,
}

/// Tokenizes the whole input.
///
/// # Errors
///
/// Returns [`ExprError::UnexpectedChar`] for characters outside the language
/// and [`ExprError::BadNumber`] for malformed numeric literals.
pub fn tokenize(input: &str) -> Result<Vec<SpannedToken>, ExprError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let ch = bytes[pos];
        if ch.is_ascii_whitespace() {
            pos += 1;
            continue;
        }

        let start = pos;
        let token = match ch {
            b'+' => Token::Plus,
            b'-' => Token::Minus,
            b'*' => Token::Star,
            b'/' => Token::Slash,
            b'^' => Token::Caret,
            b'(' => Token::LParen,
            b')' => Token::RParen,
            b',' => Token::Comma,
            b'0'..=b'9' | b'.' => {
                let (value, end) = read_number(input, start)?;
                pos = end;
                tokens.push(SpannedToken {
                    token: Token::Number(value),
                    offset: start,
                });
                continue;
            }
            c if c.is_ascii_alphabetic() || c == b'_' => {
                let end = scan_while(bytes, start, |b| b.is_ascii_alphanumeric() || b == b'_');
                pos = end;
                tokens.push(SpannedToken {
                    token: Token::Ident(input[start..end].to_string()),
                    offset: start,
                });
                continue;
            }
            _ => {
                let bad = input[start..].chars().next().unwrap_or('\u{fffd}');
                return Err(ExprError::UnexpectedChar(bad, start));
            }
        };
        tokens.push(SpannedToken { token, offset: start });
        pos += 1;
    }

    Ok(tokens)
}

/// Returns `true` if `name` appears as a standalone identifier in `input`.
///
/// Identifier boundaries follow the tokenizer, so `x` never matches inside
/// `exp` or `max`. Input that does not tokenize is scanned leniently.
#[must_use]
pub fn references_identifier(input: &str, name: &str) -> bool {
    match tokenize(input) {
        Ok(tokens) => tokens
            .iter()
            .any(|t| matches!(&t.token, Token::Ident(id) if id == name)),
        Err(_) => input
            .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .any(|word| word == name),
    }
}

fn scan_while(bytes: &[u8], mut pos: usize, pred: impl Fn(u8) -> bool) -> usize {
    while pos < bytes.len() && pred(bytes[pos]) {
        pos += 1;
    }
    pos
}

/// Reads a decimal literal with an optional exponent.
///
/// An `e` is only consumed as an exponent marker when digits follow it, so
/// `2e` lexes as `2` followed by the constant `e`.
fn read_number(input: &str, start: usize) -> Result<(f64, usize), ExprError> {
    let bytes = input.as_bytes();
    let mut pos = scan_while(bytes, start, |b| b.is_ascii_digit());
    if pos < bytes.len() && bytes[pos] == b'.' {
        pos = scan_while(bytes, pos + 1, |b| b.is_ascii_digit());
    }
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut exp = pos + 1;
        if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
            exp += 1;
        }
        if exp < bytes.len() && bytes[exp].is_ascii_digit() {
            pos = scan_while(bytes, exp, |b| b.is_ascii_digit());
        }
    }

    let text = &input[start..pos];
    if text == "." {
        return Err(ExprError::BadNumber(text.to_string()));
    }
    text.parse::<f64>()
        .map(|v| (v, pos))
        .map_err(|_| ExprError::BadNumber(text.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Token> {
        tokenize(input).unwrap().into_iter().map(|t| t.token).collect()
    }

    #[test]
    fn numbers_and_operators() {
        assert_eq!(
            kinds("1.5 + .5*2e-3"),
            vec![
                Token::Number(1.5),
                Token::Plus,
                Token::Number(0.5),
                Token::Star,
                Token::Number(2e-3),
            ]
        );
    }

    #[test]
    fn e_without_digits_is_an_identifier() {
        assert_eq!(
            kinds("2e^x"),
            vec![
                Token::Number(2.0),
                Token::Ident("e".into()),
                Token::Caret,
                Token::Ident("x".into()),
            ]
        );
    }

    #[test]
    fn implicit_product_splits_number_and_name() {
        assert_eq!(kinds("3x"), vec![Token::Number(3.0), Token::Ident("x".into())]);
    }

    #[test]
    fn rejects_unknown_characters() {
        assert_eq!(tokenize("x; 1"), Err(ExprError::UnexpectedChar(';', 1)));
    }

    #[test]
    fn lone_dot_is_malformed() {
        assert!(matches!(tokenize("1 + ."), Err(ExprError::BadNumber(_))));
    }

    #[test]
    fn identifier_reference_uses_word_boundaries() {
        assert!(references_identifier("x^2 + 1", "x"));
        assert!(references_identifier("2x", "x"));
        assert!(!references_identifier("exp(2) + max(1, 3)", "x"));
        assert!(!references_identifier("xy", "x"));
    }
}
