//! Error display state.
//!
//! Turns classified failures into user-facing notifications. Each report
//! bumps a generation counter so an identical error raised twice in a row
//! still shows up as a new notification. Notifications expire after a fixed
//! duration; expiry only hides them and never touches the buffer.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::warn;

use super::buffer::InputBuffer;
use super::error::ErrorKind;

/// How long an error stays visible unless replaced.
pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_millis(3000);

/// An error notification ready for display.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DisplayError {
    pub kind: ErrorKind,
    pub message: String,
    /// Increases with every report, starting at 1.
    pub generation: u64,
    #[serde(skip)]
    pub raised_at: Instant,
}

#[derive(Debug)]
pub struct ErrorReporter {
    generation: u64,
    dismiss_after: Duration,
    pending: Option<DisplayError>,
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new(DEFAULT_DISMISS_AFTER)
    }
}

impl ErrorReporter {
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            generation: 0,
            dismiss_after,
            pending: None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Report `kind` now. See [`ErrorReporter::report_at`].
    pub fn report(&mut self, kind: ErrorKind, buffer: &mut InputBuffer) -> DisplayError {
        self.report_at(kind, buffer, Instant::now())
    }

    /// Report `kind` as raised at `now`: reset the buffer text and replace
    /// any pending notification with a fresh one.
    pub fn report_at(
        &mut self,
        kind: ErrorKind,
        buffer: &mut InputBuffer,
        now: Instant,
    ) -> DisplayError {
        buffer.reset();
        self.generation += 1;

        let error = DisplayError {
            kind,
            message: kind.message(),
            generation: self.generation,
            raised_at: now,
        };
        warn!(?kind, generation = self.generation, "{}", error.message);

        self.pending = Some(error.clone());
        error
    }

    /// Hide the pending notification, if any.
    pub fn dismiss(&mut self) {
        self.pending = None;
    }

    /// The pending notification if it hasn't expired at `now`.
    pub fn visible_at(&self, now: Instant) -> Option<&DisplayError> {
        self.pending
            .as_ref()
            .filter(|e| now.saturating_duration_since(e.raised_at) < self.dismiss_after)
    }
}
