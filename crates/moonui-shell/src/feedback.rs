//! Transient copy-button feedback.
//!
//! Lives beside the shell but is not part of it: each snippet's copy button
//! owns one of these and re-renders its label from it.

use std::time::Duration;

/// How long "Copied!" or "Error" stays on the button.
pub const FEEDBACK_DURATION: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyState {
    #[default]
    Idle,
    Copied,
    Failed,
}

/// Auto-reverting copy feedback. Times are host milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CopyFeedback {
    state: CopyState,
    since: f64,
}

impl CopyFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of a clipboard write at `now`.
    pub fn record(&mut self, succeeded: bool, now: f64) {
        self.state = if succeeded {
            CopyState::Copied
        } else {
            CopyState::Failed
        };
        self.since = now;
    }

    /// Revert to idle once the feedback window has passed.
    /// Returns `true` when the label changed.
    pub fn tick(&mut self, now: f64) -> bool {
        if self.state != CopyState::Idle && now - self.since >= FEEDBACK_DURATION.as_millis() as f64 {
            self.state = CopyState::Idle;
            return true;
        }
        false
    }

    pub fn state(&self) -> CopyState {
        self.state
    }

    pub fn label(&self) -> &'static str {
        match self.state {
            CopyState::Idle => "Copy",
            CopyState::Copied => "Copied!",
            CopyState::Failed => "Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_copied_then_reverts() {
        let mut fb = CopyFeedback::new();
        assert_eq!(fb.label(), "Copy");

        fb.record(true, 1000.0);
        assert_eq!(fb.label(), "Copied!");

        assert!(!fb.tick(2500.0));
        assert_eq!(fb.state(), CopyState::Copied);

        assert!(fb.tick(3000.0));
        assert_eq!(fb.label(), "Copy");
    }

    #[test]
    fn failure_shows_error() {
        let mut fb = CopyFeedback::new();
        fb.record(false, 0.0);
        assert_eq!(fb.label(), "Error");
    }

    #[test]
    fn recopy_restarts_window() {
        let mut fb = CopyFeedback::new();
        fb.record(true, 0.0);
        fb.record(true, 1500.0);

        assert!(!fb.tick(2100.0));
        assert!(fb.tick(3500.0));
    }
}
