//! Input tokens accepted by the calculator engine.

/// A binary arithmetic operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }
}

/// One atomic unit of calculator input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    /// A digit `0`-`9`.
    Digit(u8),
    /// The decimal point.
    Decimal,
    /// One of the four binary operators.
    Operator(Operator),
    /// The percent marker.
    Percent,
    OpenParen,
    CloseParen,
    /// Reset the buffer and the previous expression.
    Clear,
    /// Remove the last character.
    Delete,
    /// Evaluate the buffer.
    Equals,
    /// Replace the buffer with its square root.
    SquareRoot,
}

impl Token {
    /// A digit token, if `d` is a single decimal digit.
    pub fn digit(d: u8) -> Option<Self> {
        (d <= 9).then_some(Self::Digit(d))
    }

    /// Map a printable character to a token.
    pub fn from_char(c: char) -> Option<Self> {
        if let Some(d) = c.to_digit(10) {
            return Self::digit(d as u8);
        }
        if let Some(op) = Operator::from_char(c) {
            return Some(Self::Operator(op));
        }
        match c {
            '.' => Some(Self::Decimal),
            '%' => Some(Self::Percent),
            '(' => Some(Self::OpenParen),
            ')' => Some(Self::CloseParen),
            '=' => Some(Self::Equals),
            '√' => Some(Self::SquareRoot),
            _ => None,
        }
    }

    /// Map a key name, as reported by a keyboard layer, to a token.
    ///
    /// Named keys are matched case-insensitively; any other single character
    /// falls back to [`Token::from_char`].
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "enter" | "return" => return Some(Self::Equals),
            "backspace" | "delete" => return Some(Self::Delete),
            "escape" | "esc" => return Some(Self::Clear),
            "sqrt" => return Some(Self::SquareRoot),
            _ => {}
        }

        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }

    /// The text this token appends to the buffer, if it appends any.
    ///
    /// `None` for control tokens and for a `Digit` outside `0..=9`.
    pub fn as_char(self) -> Option<char> {
        match self {
            Self::Digit(d) => char::from_digit(d as u32, 10),
            Self::Decimal => Some('.'),
            Self::Operator(op) => Some(op.symbol()),
            Self::Percent => Some('%'),
            Self::OpenParen => Some('('),
            Self::CloseParen => Some(')'),
            Self::Clear | Self::Delete | Self::Equals | Self::SquareRoot => None,
        }
    }
}
