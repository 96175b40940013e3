//! Keystroke validation for the calculator buffer.
//!
//! Decides whether a token may be appended to the current expression and
//! what the buffer looks like afterwards. Nothing here mutates state; the
//! engine applies the returned text.

use super::buffer::DEFAULT_TEXT;
use super::error::ErrorKind;
use super::token::Token;

/// Binary operators that separate segments.
pub fn is_binary_operator(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/')
}

/// Operators for the adjacency check. The decimal point counts as one.
fn is_operator_like(c: char) -> bool {
    is_binary_operator(c) || c == '.'
}

/// The text after the last binary operator in `buffer`.
pub fn last_segment(buffer: &str) -> &str {
    buffer.rsplit(is_binary_operator).next().unwrap_or(buffer)
}

/// Compute the buffer text after appending `token`.
///
/// Rules, in order:
/// 1. A lone `"0"` is replaced by anything but a decimal point.
/// 2. A decimal point on `"0"` gives `"0."`.
/// 3. A decimal point is rejected if the last segment already has one.
/// 4. An operator (or decimal point) directly after an operator (or decimal
///    point) is rejected, unless it is a minus sign.
/// 5. Anything else, percent included, is appended.
///
/// Control tokens don't append anything and leave the text unchanged.
pub fn validate_append(buffer: &str, token: Token) -> Result<String, ErrorKind> {
    let Some(ch) = token.as_char() else {
        return Ok(buffer.to_string());
    };

    if buffer == DEFAULT_TEXT {
        return Ok(if token == Token::Decimal {
            "0.".to_string()
        } else {
            ch.to_string()
        });
    }

    if token == Token::Decimal && last_segment(buffer).contains('.') {
        return Err(ErrorKind::MultipleDecimalPoints);
    }

    // Minus is exempt so a negative operand can follow an operator ("5+-3").
    if let Some(last) = buffer.chars().last()
        && is_operator_like(last)
        && is_operator_like(ch)
        && ch != '-'
    {
        return Err(ErrorKind::ConsecutiveOperators);
    }

    let mut text = String::with_capacity(buffer.len() + 1);
    text.push_str(buffer);
    text.push(ch);
    Ok(text)
}
