//! Process-wide single-slot cache of the most recent assessment.
//!
//! Last write wins. The slot is keyed by nothing, so concurrent users
//! overwrite each other; the report endpoint always shows whichever
//! prediction finished last.

use std::sync::{Mutex, PoisonError};

use tracing::debug;

use crate::assessment::Assessment;

#[derive(Debug, Default)]
pub struct LastResult {
    slot: Mutex<Option<Assessment>>,
}

impl LastResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached assessment.
    pub fn store(&self, assessment: Assessment) {
        debug!(result = %assessment.result, "caching last result");
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(assessment);
    }

    /// Copy of the cached assessment, if any prediction has been made.
    pub fn snapshot(&self) -> Option<Assessment> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_empty(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}
