//! The calculator engine: one buffer, one error reporter, one operation at
//! a time.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, trace};

use super::buffer::InputBuffer;
use super::evaluation::{evaluate_expression, square_root};
use super::reporter::{DEFAULT_DISMISS_AFTER, DisplayError, ErrorReporter};
use super::token::Token;
use super::validation::validate_append;

/// Snapshot of what a caller should display.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EngineState {
    #[serde(rename = "display")]
    pub display_text: String,
    #[serde(rename = "previous")]
    pub previous_expression: Option<String>,
    #[serde(rename = "error")]
    pub pending_error: Option<DisplayError>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineOptions {
    /// How long an error notification stays visible.
    pub error_display: Duration,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            error_display: DEFAULT_DISMISS_AFTER,
        }
    }
}

/// A keystroke-driven calculator.
///
/// Operations take `&mut self` and run to completion, so a single owner
/// serializes all mutation. Share across threads behind a `Mutex`.
#[derive(Debug, Default)]
pub struct Engine {
    buffer: InputBuffer,
    reporter: ErrorReporter,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EngineOptions) -> Self {
        Self {
            buffer: InputBuffer::new(),
            reporter: ErrorReporter::new(options.error_display),
        }
    }

    pub fn display(&self) -> &str {
        self.buffer.text()
    }

    pub fn previous(&self) -> Option<&str> {
        self.buffer.previous()
    }

    /// Current state, with the error notification as visible right now.
    pub fn state(&self) -> EngineState {
        self.state_at(Instant::now())
    }

    /// Current state, with the error notification as visible at `now`.
    pub fn state_at(&self, now: Instant) -> EngineState {
        EngineState {
            display_text: self.buffer.text().to_string(),
            previous_expression: self.buffer.previous().map(str::to_string),
            pending_error: self.reporter.visible_at(now).cloned(),
        }
    }

    /// Number of errors reported so far.
    pub fn error_generation(&self) -> u64 {
        self.reporter.generation()
    }

    /// Feed one token. Control tokens dispatch to their operation.
    pub fn append_token(&mut self, token: Token) -> EngineState {
        match token {
            Token::Clear => return self.clear(),
            Token::Delete => return self.delete(),
            Token::Equals => return self.evaluate(),
            Token::SquareRoot => return self.square_root(),
            _ => {}
        }

        if token.as_char().is_none() {
            trace!(?token, "ignored token");
            return self.state();
        }

        match validate_append(self.buffer.text(), token) {
            Ok(text) => {
                debug!(?token, buffer = %text, "token accepted");
                self.buffer.set(text);
                self.reporter.dismiss();
            }
            Err(kind) => {
                debug!(?token, buffer = %self.buffer.text(), "token rejected");
                self.reporter.report(kind, &mut self.buffer);
            }
        }
        self.state()
    }

    /// Feed one character; characters with no token are ignored.
    pub fn append_char(&mut self, c: char) -> EngineState {
        match Token::from_char(c) {
            Some(token) => self.append_token(token),
            None => {
                trace!(?c, "ignored character");
                self.state()
            }
        }
    }

    /// Feed a key by name (`Enter`, `Backspace`, `Escape`, `Sqrt`, or a
    /// single character); unknown keys are ignored.
    pub fn append_key(&mut self, key: &str) -> EngineState {
        match Token::from_key(key) {
            Some(token) => self.append_token(token),
            None => {
                trace!(key, "ignored key");
                self.state()
            }
        }
    }

    /// Feed every character of `text` in order.
    pub fn append_str(&mut self, text: &str) -> EngineState {
        for c in text.chars() {
            self.append_char(c);
        }
        self.state()
    }

    /// Remove the last character.
    pub fn delete(&mut self) -> EngineState {
        self.buffer.delete_last();
        self.reporter.dismiss();
        self.state()
    }

    /// Reset to `"0"` and forget the previous expression.
    pub fn clear(&mut self) -> EngineState {
        self.buffer.clear();
        self.reporter.dismiss();
        self.state()
    }

    /// Evaluate the buffer. The text as typed becomes the previous
    /// expression whether or not evaluation succeeds, so a failed expression
    /// stays visible as context next to the error (see DESIGN.md, "Previous
    /// expression on evaluation failure").
    pub fn evaluate(&mut self) -> EngineState {
        let expression = self.buffer.text().to_string();
        self.buffer.set_previous(expression.as_str());

        match evaluate_expression(&expression) {
            Ok(result) => {
                debug!(%expression, display = %result.display, "evaluation succeeded");
                self.buffer.set(result.display);
                self.reporter.dismiss();
            }
            Err(kind) => {
                self.reporter.report(kind, &mut self.buffer);
            }
        }
        self.state()
    }

    /// Replace the buffer with the square root of its leading number.
    pub fn square_root(&mut self) -> EngineState {
        match square_root(self.buffer.text()) {
            Ok(text) => {
                self.buffer.set(text);
                self.reporter.dismiss();
            }
            Err(kind) => {
                self.reporter.report(kind, &mut self.buffer);
            }
        }
        self.state()
    }

    /// Hide the pending error notification.
    pub fn dismiss_error(&mut self) -> EngineState {
        self.reporter.dismiss();
        self.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::error::ErrorKind;

    fn error_kind(state: &EngineState) -> Option<ErrorKind> {
        state.pending_error.as_ref().map(|e| e.kind)
    }

    #[test]
    fn test_initial_state() {
        let engine = Engine::new();
        let state = engine.state();
        assert_eq!(state.display_text, "0");
        assert_eq!(state.previous_expression, None);
        assert_eq!(state.pending_error, None);
    }

    #[test]
    fn test_control_tokens_dispatch() {
        let mut engine = Engine::new();
        engine.append_str("12+3");
        assert_eq!(engine.append_token(Token::Delete).display_text, "12+");
        assert_eq!(engine.append_token(Token::Clear).display_text, "0");
        engine.append_str("9");
        assert_eq!(engine.append_token(Token::SquareRoot).display_text, "3");
        engine.append_str("+1");
        let state = engine.append_token(Token::Equals);
        assert_eq!(state.display_text, "4");
        assert_eq!(state.previous_expression.as_deref(), Some("3+1"));
    }

    #[test]
    fn test_unknown_input_ignored() {
        let mut engine = Engine::new();
        engine.append_str("12");
        let generation = engine.error_generation();
        let state = engine.append_char('x');
        assert_eq!(state.display_text, "12");
        assert_eq!(state.pending_error, None);
        let state = engine.append_key("F12");
        assert_eq!(state.display_text, "12");
        assert_eq!(engine.error_generation(), generation);
    }

    #[test]
    fn test_out_of_range_digit_ignored() {
        let mut engine = Engine::new();
        engine.append_str("5*/");
        let pending = engine.state().pending_error;
        assert!(pending.is_some());

        let state = engine.append_token(Token::Digit(12));
        assert_eq!(state.display_text, "0");
        assert_eq!(state.pending_error, pending);
        assert_eq!(engine.error_generation(), 1);
    }

    #[test]
    fn test_deep_input_is_classified() {
        let mut engine = Engine::new();
        engine.append_str("5");
        engine.append_str(&"-".repeat(10_000));
        let state = engine.append_str("3=");
        assert_eq!(state.display_text, "8");

        engine.append_str("1+");
        engine.append_str(&"(".repeat(10_000));
        let state = engine.append_str("3=");
        assert_eq!(error_kind(&state), Some(ErrorKind::InvalidCalculation));
        assert_eq!(state.display_text, "0");

        assert_eq!(engine.append_str("2*3=").display_text, "6");
    }

    #[test]
    fn test_keys() {
        let mut engine = Engine::new();
        for key in ["7", "*", "6", "Enter"] {
            engine.append_key(key);
        }
        assert_eq!(engine.display(), "42");
        engine.append_key("Backspace");
        assert_eq!(engine.display(), "4");
        engine.append_key("Escape");
        assert_eq!(engine.display(), "0");
        assert_eq!(engine.previous(), None);
    }

    #[test]
    fn test_validation_error_keeps_previous() {
        let mut engine = Engine::new();
        engine.append_str("5+3=");
        engine.append_str("+");
        let state = engine.append_str("*");
        assert_eq!(error_kind(&state), Some(ErrorKind::ConsecutiveOperators));
        assert_eq!(state.display_text, "0");
        assert_eq!(state.previous_expression.as_deref(), Some("5+3"));
    }

    #[test]
    fn test_evaluation_error_keeps_snapshot() {
        let mut engine = Engine::new();
        let state = engine.append_str("7/0=");
        assert_eq!(error_kind(&state), Some(ErrorKind::DivisionByZero));
        assert_eq!(state.display_text, "0");
        assert_eq!(state.previous_expression.as_deref(), Some("7/0"));
    }

    #[test]
    fn test_mutation_dismisses_error() {
        let mut engine = Engine::new();
        engine.append_str("5/0=");
        assert!(engine.state().pending_error.is_some());
        let state = engine.append_str("1");
        assert_eq!(state.pending_error, None);
        assert_eq!(state.display_text, "1");
    }

    #[test]
    fn test_error_expires() {
        let mut engine = Engine::with_options(EngineOptions {
            error_display: Duration::from_millis(50),
        });
        engine.append_str("5/0=");
        let later = Instant::now() + Duration::from_millis(50);
        let state = engine.state_at(later);
        assert_eq!(state.pending_error, None);
        assert_eq!(state.display_text, "0");
    }

    #[test]
    fn test_repeated_error_is_fresh() {
        let mut engine = Engine::new();
        let first = engine.append_str("5/0=").pending_error.unwrap();
        let second = engine.append_str("5/0=").pending_error.unwrap();
        assert_eq!(first.message, second.message);
        assert_eq!(second.generation, first.generation + 1);
    }

    #[test]
    fn test_result_can_be_extended() {
        let mut engine = Engine::new();
        engine.append_str("1/4=");
        assert_eq!(engine.display(), "0.25");
        let state = engine.append_str("*4=");
        assert_eq!(state.display_text, "1");
        assert_eq!(state.previous_expression.as_deref(), Some("0.25*4"));
    }

    #[test]
    fn test_state_serializes() {
        let mut engine = Engine::new();
        engine.append_str("5+3=");
        let json = serde_json::to_value(engine.state()).unwrap();
        assert_eq!(json["display"], "8");
        assert_eq!(json["previous"], "5+3");
        assert!(json["error"].is_null());
    }
}
