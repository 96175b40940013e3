//! Percent notation rewriting.
//!
//! `N%` is turned into `(N/100)*` before parsing, so `200*50%` becomes
//! `200*(50/100)*` and the evaluator never sees a `%`.

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A number immediately followed by a percent marker.
    static ref PERCENT: Regex = Regex::new(r"(\d+(?:\.\d+)?)%").unwrap();

    /// A rewrite-produced multiplication with nothing to multiply: at the end
    /// of the text or right before a closing parenthesis.
    static ref DANGLING_MULTIPLY: Regex = Regex::new(r"/100\)\*(\)|$)").unwrap();
}

/// Rewrite every `<digits>(.<digits>)?%` into `(<digits>(.<digits>)?/100)*`.
pub fn rewrite_percent(text: &str) -> Cow<'_, str> {
    PERCENT.replace_all(text, "($1/100)*")
}

/// Rewrite percent notation and drop the multiplications left dangling by
/// a trailing percent, so `50%` evaluates as `(50/100)`.
pub fn prepare(text: &str) -> String {
    let rewritten = rewrite_percent(text);
    DANGLING_MULTIPLY
        .replace_all(&rewritten, "/100)$1")
        .into_owned()
}
