//! Process-wide state handed to both loops at startup.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::core::shared_title::SharedTitle;
use crate::ui::markup::Markup;

/// Longest uninterrupted sleep between shutdown checks
const SLICE: Duration = Duration::from_millis(100);

/// Cooperative cancellation flag observed by the tracker and the scheduler
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
    flag: Arc<AtomicBool>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Sleep for at least `duration` unless shutdown is requested first.
    ///
    /// Returns `true` if the signal fired during the wait.
    pub fn sleep(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;
        loop {
            if self.is_triggered() {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            thread::sleep((deadline - now).min(SLICE));
        }
    }
}

/// Explicit context replacing module-level globals.
///
/// The tracker holds a clone of `title` as its only writer; the scheduler's
/// title field reads it.
#[derive(Debug, Clone)]
pub struct StatusContext {
    pub title: SharedTitle,
    pub markup: Markup,
    pub shutdown: ShutdownSignal,
}

impl StatusContext {
    pub fn new(markup: Markup) -> Self {
        Self {
            title: SharedTitle::new(),
            markup,
            shutdown: ShutdownSignal::new(),
        }
    }
}
