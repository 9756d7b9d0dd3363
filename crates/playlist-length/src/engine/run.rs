use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::extractor::error::PlaylistError;

/// Hands out run tokens; beginning a run supersedes every earlier one.
#[derive(Debug, Default)]
pub struct RunTracker {
    generation: Arc<AtomicU64>,
}

impl RunTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> RunToken {
        let id = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        RunToken {
            generation: Arc::clone(&self.generation),
            id,
        }
    }
}

/// Identity of one run, checked between suspension points.
#[derive(Debug, Clone)]
pub struct RunToken {
    generation: Arc<AtomicU64>,
    id: u64,
}

impl RunToken {
    /// A token that is never superseded.
    pub fn detached() -> Self {
        RunTracker::new().begin()
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_current(&self) -> bool {
        self.generation.load(Ordering::Acquire) == self.id
    }

    pub fn ensure_current(&self) -> Result<(), PlaylistError> {
        if self.is_current() {
            Ok(())
        } else {
            Err(PlaylistError::Superseded)
        }
    }
}
