//! Capability failures and the best-effort policy applied to them.
//!
//! Host capabilities (pointer capture, playback, measurement, observers)
//! are allowed to fail. None of those failures are fatal to the carousel:
//! callers route them through [`BestEffort`], which logs and discards the
//! error so the feature is skipped instead of aborting the operation.

use log::debug;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapabilityError {
    #[error("capability not supported by host")]
    Unsupported,
    #[error("request rejected by host: {0}")]
    Rejected(String),
    #[error("element not ready")]
    NotReady,
    #[error("host error: {0}")]
    Host(String),
}

pub type CapabilityResult<T> = Result<T, CapabilityError>;

/// Explicit discard of capability failures.
pub trait BestEffort<T> {
    /// Log the failure (with `context`) at debug level and yield `None`.
    fn best_effort(self, context: &str) -> Option<T>;
}

impl<T> BestEffort<T> for CapabilityResult<T> {
    fn best_effort(self, context: &str) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(err) => {
                debug!("{context} skipped: {err}");
                None
            }
        }
    }
}
