//! Failure taxonomy for the calculator engine.
//!
//! Every failure the engine can classify maps to one [`ErrorKind`], and its
//! `Display` output is the message shown to the user.

use serde::Serialize;
use thiserror::Error;

/// A classified calculator failure.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// The expression matched the textual `/0` check.
    #[error("Cannot divide by zero")]
    DivisionByZero,
    /// The expression could not be parsed, or evaluated to NaN.
    #[error("Invalid calculation")]
    InvalidCalculation,
    /// The expression evaluated to an infinite value.
    #[error("Result is too large")]
    Overflow,
    /// Square root was requested on a negative operand.
    #[error("Cannot calculate square root of a negative number")]
    NegativeSqrt,
    /// A second decimal point was typed into the same number.
    #[error("A number can only have one decimal point")]
    MultipleDecimalPoints,
    /// An operator was typed directly after another operator.
    #[error("Cannot have multiple operators in sequence")]
    ConsecutiveOperators,
}

impl ErrorKind {
    /// The user-facing message for this kind.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Reason an expression failed to parse.
///
/// Never shown to the user directly; it always surfaces as
/// [`ErrorKind::InvalidCalculation`].
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("unexpected character {ch:?} at {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("malformed number {text:?} at {pos}")]
    BadNumber { text: String, pos: usize },

    #[error("unexpected {found} at {pos}")]
    UnexpectedToken { found: String, pos: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("parentheses nested too deeply at {pos}")]
    TooDeep { pos: usize },
}

impl From<ParseError> for ErrorKind {
    fn from(_: ParseError) -> Self {
        ErrorKind::InvalidCalculation
    }
}
