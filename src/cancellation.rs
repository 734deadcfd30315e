//! Cooperative cancellation
//!
//! The executor never cancels a run by itself. Callers hand a token to their
//! collaborators (loaders, renderers) and those report cancellation by returning
//! [`ReportingError::interrupted`].

use crate::error::{ReportingError, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag signalling that a run should stop
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// `Err(Interrupted)` once [`cancel`](Self::cancel) has been called
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(ReportingError::interrupted());
        }
        Ok(())
    }
}
