//! Frame-polled layout retries
//!
//! Card boxes may not be settled when the carousel is set up (images and
//! fonts still loading) or right after a resize. Layout is attempted
//! immediately and then once per animation frame until it succeeds or the
//! attempt budget runs out.

use log::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutRetry {
    max_attempts: u32,
    failed_attempts: u32,
    pending: bool,
}

impl LayoutRetry {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            failed_attempts: 0,
            pending: false,
        }
    }

    /// Start over with a full budget.
    pub fn restart(&mut self) {
        self.failed_attempts = 0;
        self.pending = true;
    }

    pub fn cancel(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    /// Record the outcome of one attempt. Returns whether another attempt
    /// should follow on the next frame.
    pub fn record(&mut self, succeeded: bool) -> bool {
        if !self.pending {
            return false;
        }
        if succeeded {
            self.pending = false;
            return false;
        }
        self.failed_attempts += 1;
        if self.failed_attempts >= self.max_attempts {
            debug!(
                "layout not settled after {} attempts; giving up",
                self.failed_attempts
            );
            self.pending = false;
        }
        self.pending
    }
}
