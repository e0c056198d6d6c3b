//! Active-window title tracking.
//!
//! [`FocusTracker`] mirrors the window manager's active window title into a
//! [`SharedTitle`]. It is best effort: any failure while resolving a title
//! leaves the previous value in place and the tracker keeps waiting for the
//! next notification.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::context::ShutdownSignal;
use crate::core::shared_title::SharedTitle;
use crate::error::Result;

/// Upper bound on a single wait, so shutdown is noticed promptly
const WAIT_TIMEOUT: Duration = Duration::from_millis(250);

/// `App — document` style separators: a dash surrounded by whitespace
static TITLE_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+[-–—]\s+").expect("valid separator regex"));

/// Connection to a windowing system that reports active-window changes
pub trait WindowSource {
    /// Block for at most `timeout` waiting for an active-window change.
    ///
    /// Returns `Ok(true)` when a change notification arrived. An error means
    /// the connection itself is unusable.
    fn wait_for_change(&mut self, timeout: Duration) -> Result<bool>;

    /// Resolve the raw name of the currently active window.
    fn active_title(&mut self) -> Result<String>;
}

/// Strip a title-bar prefix like `"Editor — "`, keeping the trailing segment.
///
/// Control characters are replaced with spaces and the result is trimmed.
/// Returns `None` when nothing printable remains. Applying it to its own
/// output returns the same string.
pub fn strip_title_suffix(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    let cleaned = cleaned.trim();

    let tail = match TITLE_SEPARATOR.find_iter(cleaned).last() {
        Some(sep) => cleaned[sep.end()..].trim(),
        None => cleaned,
    };

    if tail.is_empty() {
        None
    } else {
        Some(tail.to_string())
    }
}

/// Owns the windowing connection and is the only writer of the title
pub struct FocusTracker<S: WindowSource> {
    source: S,
    title: SharedTitle,
}

impl<S: WindowSource> FocusTracker<S> {
    pub fn new(source: S, title: SharedTitle) -> Self {
        Self { source, title }
    }

    /// Resolve the active window once and publish its title.
    ///
    /// Returns whether the shared title was updated.
    pub fn refresh(&mut self) -> bool {
        match self.source.active_title() {
            Ok(raw) => match strip_title_suffix(&raw) {
                Some(title) => self.title.publish(&title),
                None => false,
            },
            Err(_) => false,
        }
    }

    /// Run until `shutdown` fires or the connection breaks.
    ///
    /// The connection is dropped when this returns.
    pub fn run(mut self, shutdown: &ShutdownSignal) {
        log::info!("Focus tracker started");
        self.refresh();

        while !shutdown.is_triggered() {
            match self.source.wait_for_change(WAIT_TIMEOUT) {
                Ok(true) => {
                    if self.refresh() {
                        log::debug!("Active window title: {}", self.title.get());
                    }
                }
                Ok(false) => {}
                Err(e) => {
                    log::error!("Lost windowing system connection: {}", e);
                    break;
                }
            }
        }

        log::info!("Focus tracker stopped");
    }
}
