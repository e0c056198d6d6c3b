// Integration tests for the focus tracker thread and the shared title
// Uses a scripted window source instead of an X server

use barline::core::{FocusTracker, SharedTitle, ShutdownSignal, WindowSource, NO_WINDOW_TITLE};
use barline::{BarError, Result};
use std::collections::HashSet;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

/// Each message is one change notification plus what resolving it returns
struct ScriptedSource {
    events: Receiver<std::result::Result<String, ()>>,
    pending: Option<std::result::Result<String, ()>>,
}

impl WindowSource for ScriptedSource {
    fn wait_for_change(&mut self, timeout: Duration) -> Result<bool> {
        match self.events.recv_timeout(timeout) {
            Ok(next) => {
                self.pending = Some(next);
                Ok(true)
            }
            Err(RecvTimeoutError::Timeout) => Ok(false),
            Err(RecvTimeoutError::Disconnected) => Err(BarError::display("connection closed")),
        }
    }

    fn active_title(&mut self) -> Result<String> {
        match self.pending.take() {
            Some(Ok(title)) => Ok(title),
            Some(Err(())) => Err(BarError::display("BadWindow")),
            None => Err(BarError::display("no active window")),
        }
    }
}

fn start_tracker(
    title: &SharedTitle,
    shutdown: &ShutdownSignal,
) -> (Sender<std::result::Result<String, ()>>, thread::JoinHandle<()>) {
    let (tx, rx) = mpsc::channel();
    let source = ScriptedSource {
        events: rx,
        pending: None,
    };
    let title = title.clone();
    let shutdown = shutdown.clone();
    let handle = thread::spawn(move || FocusTracker::new(source, title).run(&shutdown));
    (tx, handle)
}

fn wait_for_title(title: &SharedTitle, expected: &str) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if title.get().as_str() == expected {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    false
}

#[test]
fn test_window_name_update_is_stripped_and_published() {
    let title = SharedTitle::new();
    let shutdown = ShutdownSignal::new();
    let (tx, handle) = start_tracker(&title, &shutdown);

    assert_eq!(title.get().as_str(), NO_WINDOW_TITLE);
    tx.send(Ok("Editor — project.txt".to_string())).unwrap();
    assert!(wait_for_title(&title, "project.txt"));

    shutdown.trigger();
    handle.join().unwrap();
}

#[test]
fn test_failed_resolution_keeps_previous_title() {
    let title = SharedTitle::new();
    let shutdown = ShutdownSignal::new();
    let (tx, handle) = start_tracker(&title, &shutdown);

    tx.send(Ok("Terminal - htop".to_string())).unwrap();
    assert!(wait_for_title(&title, "htop"));

    let mut seen = HashSet::new();
    tx.send(Err(())).unwrap();
    tx.send(Ok("   ".to_string())).unwrap();
    tx.send(Err(())).unwrap();
    tx.send(Ok("Browser — docs".to_string())).unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        let current = title.get();
        seen.insert(current.to_string());
        if current.as_str() == "docs" {
            break;
        }
        thread::sleep(Duration::from_millis(1));
    }

    let allowed: HashSet<String> = ["htop", "docs"].iter().map(|s| s.to_string()).collect();
    assert!(seen.contains("docs"), "final title never published");
    assert!(seen.is_subset(&allowed), "unexpected titles observed: {:?}", seen);

    shutdown.trigger();
    handle.join().unwrap();
}

#[test]
fn test_tracker_stops_on_shutdown() {
    let title = SharedTitle::new();
    let shutdown = ShutdownSignal::new();
    let (_tx, handle) = start_tracker(&title, &shutdown);

    thread::sleep(Duration::from_millis(20));
    let start = Instant::now();
    shutdown.trigger();
    handle.join().unwrap();

    assert!(start.elapsed() < Duration::from_secs(2));
    assert_eq!(title.get().as_str(), NO_WINDOW_TITLE);
}

#[test]
fn test_tracker_exits_when_connection_is_lost() {
    let title = SharedTitle::new();
    let shutdown = ShutdownSignal::new();
    let (tx, handle) = start_tracker(&title, &shutdown);

    tx.send(Ok("Files — home".to_string())).unwrap();
    assert!(wait_for_title(&title, "home"));
    drop(tx);

    handle.join().unwrap();
    assert!(!shutdown.is_triggered());
    assert_eq!(title.get().as_str(), "home");
}
