//! Focused-window title shared between the tracker thread and the scheduler.

use std::sync::Arc;

use arc_swap::ArcSwap;

/// Value held before any window has been resolved
pub const NO_WINDOW_TITLE: &str = "No window title";

/// Single-writer, lock-free-reader cell holding the last known window title.
///
/// The title is published as a whole `Arc<String>` swap, so a reader sees either
/// the previous title or the new one, never a mix. Reads are eventually
/// consistent with the writer; no ordering between a publish and a given tick
/// is promised.
#[derive(Debug, Clone)]
pub struct SharedTitle {
    inner: Arc<ArcSwap<String>>,
}

impl SharedTitle {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(NO_WINDOW_TITLE.to_string())),
        }
    }

    /// Replace the current title. Blank titles are rejected and leave the
    /// previous value in place; returns whether the value was stored.
    pub fn publish(&self, title: &str) -> bool {
        if title.trim().is_empty() {
            return false;
        }
        self.inner.store(Arc::new(title.to_string()));
        true
    }

    /// Snapshot of the current title.
    pub fn get(&self) -> Arc<String> {
        self.inner.load_full()
    }
}

impl Default for SharedTitle {
    fn default() -> Self {
        Self::new()
    }
}
