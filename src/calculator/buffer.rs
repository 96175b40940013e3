//! Expression buffer state.

/// Buffer content after a reset.
pub const DEFAULT_TEXT: &str = "0";

/// The expression typed so far, plus the last committed expression.
///
/// The text is never empty; every operation that would empty it leaves
/// [`DEFAULT_TEXT`] instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
    previous: Option<String>,
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBuffer {
    pub fn new() -> Self {
        Self {
            text: DEFAULT_TEXT.to_string(),
            previous: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    /// Reset the text to `"0"` and forget the previous expression.
    pub fn clear(&mut self) {
        self.reset();
        self.previous = None;
    }

    /// Reset the text to `"0"`, keeping the previous expression.
    pub fn reset(&mut self) {
        self.text = DEFAULT_TEXT.to_string();
    }

    /// Remove the last character.
    pub fn delete_last(&mut self) {
        self.text.pop();
        if self.text.is_empty() {
            self.reset();
        }
    }

    /// Replace the text wholesale. Empty input resets to `"0"`.
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        if self.text.is_empty() {
            self.reset();
        }
    }

    /// Record the expression that produced the current result.
    pub fn set_previous(&mut self, expression: impl Into<String>) {
        self.previous = Some(expression.into());
    }
}
