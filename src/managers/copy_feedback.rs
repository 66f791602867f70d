//! Copy button feedback for QRGen.
//!
//! After a successful image copy the button reads "Copied!" for two seconds and
//! then reverts. Another copy before the deadline pushes the deadline out again;
//! there is no cancellation.

use std::time::{Duration, Instant};

pub const REVERT_DELAY: Duration = Duration::from_secs(2);
pub const IDLE_LABEL: &str = "Copy";
pub const COPIED_LABEL: &str = "✅ Copied!";

/// Restart-on-repeat label timer.
#[derive(Debug, Clone)]
pub struct CopyFeedback {
    idle_label: String,
    active_label: String,
    revert_at: Option<Instant>,
}

impl Default for CopyFeedback {
    fn default() -> Self {
        Self::new(IDLE_LABEL, COPIED_LABEL)
    }
}

impl CopyFeedback {
    pub fn new(idle_label: impl Into<String>, active_label: impl Into<String>) -> Self {
        Self {
            idle_label: idle_label.into(),
            active_label: active_label.into(),
            revert_at: None,
        }
    }

    /// Shows the active label and (re)starts the revert delay from `now`.
    pub fn trigger(&mut self, now: Instant) {
        self.revert_at = Some(now + REVERT_DELAY);
    }

    /// When the label is due to revert, if it is currently active.
    pub fn deadline(&self) -> Option<Instant> {
        self.revert_at
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.revert_at.is_some_and(|at| now < at)
    }

    pub fn label(&self, now: Instant) -> &str {
        if self.is_active(now) {
            &self.active_label
        } else {
            &self.idle_label
        }
    }

    /// Clears an expired deadline. Returns `true` exactly once per revert.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.revert_at {
            Some(at) if now >= at => {
                self.revert_at = None;
                true
            }
            _ => false,
        }
    }
}
