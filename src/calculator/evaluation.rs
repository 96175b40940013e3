//! Expression evaluation and result formatting.
//!
//! Runs the buffer text through the division-by-zero check, the percent
//! rewrite and the parser, then classifies and formats the value.

use tracing::debug;

use super::error::ErrorKind;
use super::parser::parse;
use super::percent::prepare;

/// Fractional digits kept when formatting a non-integral result.
const MAX_FRACTION_DIGITS: usize = 8;

/// Result of a successful evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    /// The expression as typed, before percent rewriting.
    pub expression: String,
    /// The numeric value.
    pub value: f64,
    /// Formatted for display.
    pub display: String,
}

/// Whether the text contains `/0` that isn't the start of `/0.<digit>`.
///
/// This is a textual check, so `6/0.5` passes while `6/02` is rejected.
pub fn has_division_by_zero(text: &str) -> bool {
    text.match_indices("/0").any(|(i, _)| {
        let mut rest = text[i + 2..].chars();
        !matches!(
            (rest.next(), rest.next()),
            (Some('.'), Some(d)) if d.is_ascii_digit()
        )
    })
}

/// Evaluate a buffer expression.
pub fn evaluate_expression(input: &str) -> Result<Evaluation, ErrorKind> {
    if has_division_by_zero(input) {
        return Err(ErrorKind::DivisionByZero);
    }

    let prepared = prepare(input);
    let expr = parse(&prepared).map_err(|e| {
        debug!(expression = %prepared, error = %e, "parse failed");
        ErrorKind::from(e)
    })?;
    let value = expr.eval();
    debug!(expression = %prepared, tree = %expr, value, "evaluated");

    if value.is_nan() {
        return Err(ErrorKind::InvalidCalculation);
    }
    if value.is_infinite() {
        return Err(ErrorKind::Overflow);
    }

    Ok(Evaluation {
        expression: input.to_string(),
        display: format_result(value),
        value,
    })
}

/// Format a finite value for display.
///
/// Integral values have no decimal point; others keep up to eight
/// fractional digits with trailing zeros stripped.
pub fn format_result(value: f64) -> String {
    if value.fract() == 0.0 {
        // f64's Display never switches to exponent notation.
        return if value == 0.0 {
            "0".to_string()
        } else {
            format!("{value}")
        };
    }

    let formatted = format!("{:.*}", MAX_FRACTION_DIGITS, value);
    match formatted.trim_end_matches('0').trim_end_matches('.') {
        "-0" => "0".to_string(),
        trimmed => trimmed.to_string(),
    }
}

/// Parse the longest numeric prefix of `text`, ignoring whatever follows.
///
/// Accepts leading whitespace, an optional sign, digits with an optional
/// fraction, and an optional exponent. Returns `None` if there are no
/// digits at the start.
pub fn leading_number(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// Square root of the buffer's leading number, as display text.
pub fn square_root(text: &str) -> Result<String, ErrorKind> {
    let value = leading_number(text).ok_or(ErrorKind::InvalidCalculation)?;
    if value < 0.0 {
        return Err(ErrorKind::NegativeSqrt);
    }
    let root = value.sqrt();
    if root.is_infinite() {
        return Err(ErrorKind::Overflow);
    }
    debug!(operand = value, root, "square root");
    Ok(if root == 0.0 {
        "0".to_string()
    } else {
        format!("{root}")
    })
}
