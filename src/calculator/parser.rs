//! Arithmetic expression parser.
//!
//! A small recursive-descent parser over `+ - * /`, parentheses, unary sign
//! and decimal literals. Grammar:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-')* primary
//! primary := NUMBER | '(' expr ')'
//! ```
//!
//! Operator runs are stored flat and sign runs collapse to one negation, so
//! the tree is only as deep as the parenthesis nesting, which is capped at
//! [`MAX_DEPTH`].

use std::fmt;

use super::error::ParseError;
use super::token::Operator;

/// Deepest parenthesis nesting accepted.
pub const MAX_DEPTH: usize = 256;

/// A parsed expression tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Number(f64),
    Neg(Box<Expr>),
    /// `first op1 rest1 op2 rest2 ...`, folded left to right.
    Chain {
        first: Box<Expr>,
        rest: Vec<(Operator, Expr)>,
    },
}

impl Expr {
    /// Evaluate with IEEE semantics; division by zero gives infinity or NaN.
    pub fn eval(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Neg(inner) => -inner.eval(),
            Self::Chain { first, rest } => {
                rest.iter().fold(first.eval(), |acc, (op, rhs)| {
                    let b = rhs.eval();
                    match op {
                        Operator::Add => acc + b,
                        Operator::Subtract => acc - b,
                        Operator::Multiply => acc * b,
                        Operator::Divide => acc / b,
                    }
                })
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Neg(inner) => write!(f, "(-{inner})"),
            Self::Chain { first, rest } => {
                write!(f, "({first}")?;
                for (op, rhs) in rest {
                    write!(f, " {} {rhs}", op.symbol())?;
                }
                write!(f, ")")
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Lexeme {
    Number(f64),
    Op(Operator),
    Open,
    Close,
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "number {n}"),
            Self::Op(op) => write!(f, "'{}'", op.symbol()),
            Self::Open => write!(f, "'('"),
            Self::Close => write!(f, "')'"),
        }
    }
}

/// A lexeme and its byte offset in the source text.
type Spanned = (Lexeme, usize);

fn tokenize(text: &str) -> Result<Vec<Spanned>, ParseError> {
    let mut out = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(pos, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let mut end = pos;
            let mut seen_dot = false;
            while let Some(&(i, d)) = chars.peek() {
                if d.is_ascii_digit() || (d == '.' && !seen_dot) {
                    seen_dot |= d == '.';
                    end = i + d.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            let literal = &text[pos..end];
            let value = literal
                .parse::<f64>()
                .map_err(|_| ParseError::BadNumber {
                    text: literal.to_string(),
                    pos,
                })?;
            out.push((Lexeme::Number(value), pos));
            continue;
        }

        let lexeme = match c {
            '(' => Lexeme::Open,
            ')' => Lexeme::Close,
            _ => match Operator::from_char(c) {
                Some(op) => Lexeme::Op(op),
                None => return Err(ParseError::UnexpectedChar { ch: c, pos }),
            },
        };
        out.push((lexeme, pos));
        chars.next();
    }

    Ok(out)
}

struct Parser {
    lexemes: Vec<Spanned>,
    cursor: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<Lexeme> {
        self.lexemes.get(self.cursor).map(|&(l, _)| l)
    }

    fn bump(&mut self) -> Option<Spanned> {
        let next = self.lexemes.get(self.cursor).copied();
        if next.is_some() {
            self.cursor += 1;
        }
        next
    }

    fn unexpected(&self) -> ParseError {
        match self.lexemes.get(self.cursor) {
            Some(&(lexeme, pos)) => ParseError::UnexpectedToken {
                found: lexeme.to_string(),
                pos,
            },
            None => ParseError::UnexpectedEnd,
        }
    }

    fn expr(&mut self) -> Result<Expr, ParseError> {
        let first = self.term()?;
        let mut rest = Vec::new();
        while let Some(Lexeme::Op(op @ (Operator::Add | Operator::Subtract))) = self.peek() {
            self.bump();
            rest.push((op, self.term()?));
        }
        Ok(chain(first, rest))
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        let first = self.unary()?;
        let mut rest = Vec::new();
        while let Some(Lexeme::Op(op @ (Operator::Multiply | Operator::Divide))) = self.peek() {
            self.bump();
            rest.push((op, self.unary()?));
        }
        Ok(chain(first, rest))
    }

    fn unary(&mut self) -> Result<Expr, ParseError> {
        let mut negate = false;
        while let Some(Lexeme::Op(op @ (Operator::Add | Operator::Subtract))) = self.peek() {
            self.bump();
            negate ^= op == Operator::Subtract;
        }
        let operand = self.primary()?;
        Ok(if negate {
            Expr::Neg(Box::new(operand))
        } else {
            operand
        })
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        match self.peek() {
            Some(Lexeme::Number(n)) => {
                self.bump();
                Ok(Expr::Number(n))
            }
            Some(Lexeme::Open) => {
                let Some((_, pos)) = self.bump() else {
                    return Err(ParseError::UnexpectedEnd);
                };
                if self.depth == MAX_DEPTH {
                    return Err(ParseError::TooDeep { pos });
                }
                self.depth += 1;
                let inner = self.expr()?;
                self.depth -= 1;
                match self.peek() {
                    Some(Lexeme::Close) => {
                        self.bump();
                        Ok(inner)
                    }
                    _ => Err(self.unexpected()),
                }
            }
            _ => Err(self.unexpected()),
        }
    }
}

fn chain(first: Expr, rest: Vec<(Operator, Expr)>) -> Expr {
    if rest.is_empty() {
        first
    } else {
        Expr::Chain {
            first: Box::new(first),
            rest,
        }
    }
}

/// Parse `text` into an expression tree.
pub fn parse(text: &str) -> Result<Expr, ParseError> {
    let mut parser = Parser {
        lexemes: tokenize(text)?,
        cursor: 0,
        depth: 0,
    };
    let expr = parser.expr()?;
    if parser.peek().is_some() {
        return Err(parser.unexpected());
    }
    Ok(expr)
}
