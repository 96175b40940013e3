//! Calculator engine.
//!
//! This module provides functionality to:
//! - Validate keystrokes so the typed expression stays well-formed
//! - Rewrite percent notation and evaluate expressions without `eval`
//! - Classify failures and manage the transient error notification

mod buffer;
mod engine;
mod error;
mod evaluation;
mod parser;
mod percent;
mod reporter;
mod token;
mod validation;

pub use buffer::{DEFAULT_TEXT, InputBuffer};
pub use engine::{Engine, EngineOptions, EngineState};
pub use error::{ErrorKind, ParseError};
pub use evaluation::{
    Evaluation, evaluate_expression, format_result, has_division_by_zero, leading_number,
    square_root,
};
pub use parser::{Expr, MAX_DEPTH, parse};
pub use percent::{prepare, rewrite_percent};
pub use reporter::{DEFAULT_DISMISS_AFTER, DisplayError, ErrorReporter};
pub use token::{Operator, Token};
pub use validation::{last_segment, validate_append};
