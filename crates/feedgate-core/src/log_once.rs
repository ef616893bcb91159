//! Process-wide "log once" deduplication.
//!
//! Repeated identical diagnostics (the same lookup failure for every run of a
//! feed, the same "no matches" search) are emitted on first sighting only.
//! One `LogOnce` is created per process run and shared via `Arc` with every
//! component that reports such messages; tests create a fresh instance.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

/// Set of messages already emitted, keyed by exact text.
#[derive(Debug, Default)]
pub struct LogOnce {
    seen: Mutex<HashSet<String>>,
}

impl LogOnce {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.seen.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Records `msg`; true if it had not been seen before.
    pub fn first_sighting(&self, msg: &str) -> bool {
        let mut seen = self.lock();
        if seen.contains(msg) {
            return false;
        }
        seen.insert(msg.to_string());
        true
    }

    /// Emits `msg` at info level on first sighting. Returns whether it was emitted.
    pub fn info(&self, msg: &str) -> bool {
        let first = self.first_sighting(msg);
        if first {
            tracing::info!("{}", msg);
        }
        first
    }

    /// Emits `msg` at warn level on first sighting. Returns whether it was emitted.
    pub fn warn(&self, msg: &str) -> bool {
        let first = self.first_sighting(msg);
        if first {
            tracing::warn!("{}", msg);
        }
        first
    }

    pub fn seen(&self, msg: &str) -> bool {
        self.lock().contains(msg)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
