// Integration tests for the scheduler tick loop
// Covers cadence, per-tick failure isolation and concurrent title reads

use barline::core::metrics::{MetricSource, TitleSource};
use barline::core::{
    FocusTracker, OutputMode, SharedTitle, ShutdownSignal, StatusScheduler, WindowSource,
    WireEmitter, NO_WINDOW_TITLE,
};
use barline::ui::Markup;
use barline::{BarError, Result};
use std::cell::Cell;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// Records the time of every flush along with the bytes written
#[derive(Clone, Default)]
struct TimedSink {
    bytes: Arc<Mutex<Vec<u8>>>,
    flushes: Arc<Mutex<Vec<Instant>>>,
}

impl Write for TimedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes.lock().unwrap().push(Instant::now());
        Ok(())
    }
}

impl TimedSink {
    fn lines(&self) -> Vec<String> {
        String::from_utf8(self.bytes.lock().unwrap().clone())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

struct Constant(&'static str);

impl MetricSource for Constant {
    fn name(&self) -> &str {
        "constant"
    }

    fn query(&self) -> Result<String> {
        Ok(self.0.to_string())
    }
}

/// Fails on the given call numbers (1-based)
struct FailsOn {
    calls: Cell<usize>,
    failing: Vec<usize>,
}

impl MetricSource for FailsOn {
    fn name(&self) -> &str {
        "flaky"
    }

    fn query(&self) -> Result<String> {
        let call = self.calls.get() + 1;
        self.calls.set(call);
        if self.failing.contains(&call) {
            Err(BarError::command("sensors", "exit status: 1"))
        } else {
            Ok(format!("ok{}", call))
        }
    }
}

fn stop_after(shutdown: &ShutdownSignal, delay: Duration) -> thread::JoinHandle<()> {
    let shutdown = shutdown.clone();
    thread::spawn(move || {
        thread::sleep(delay);
        shutdown.trigger();
    })
}

#[test]
fn test_ticks_are_at_least_interval_apart() {
    let sink = TimedSink::default();
    let interval = Duration::from_millis(40);
    let mut scheduler = StatusScheduler::new(
        vec![Box::new(Constant("up"))],
        WireEmitter::new(sink.clone(), OutputMode::Plain),
        Markup::None,
        " | ",
        interval,
    );

    let shutdown = ShutdownSignal::new();
    let stopper = stop_after(&shutdown, Duration::from_millis(300));
    scheduler.run(&shutdown).unwrap();
    stopper.join().unwrap();

    let flushes = sink.flushes.lock().unwrap().clone();
    assert!(flushes.len() >= 3, "expected several ticks, got {}", flushes.len());
    for pair in flushes.windows(2) {
        assert!(pair[1].duration_since(pair[0]) >= interval);
    }
    assert!(sink.lines().iter().all(|l| l == "up"));
}

#[test]
fn test_failure_blanks_only_its_tick() {
    let sink = TimedSink::default();
    let mut scheduler = StatusScheduler::new(
        vec![
            Box::new(Constant("left")),
            Box::new(FailsOn {
                calls: Cell::new(0),
                failing: vec![2],
            }),
        ],
        WireEmitter::new(sink.clone(), OutputMode::Plain),
        Markup::None,
        " | ",
        Duration::from_millis(1),
    );

    for _ in 0..3 {
        scheduler.tick().unwrap();
    }

    assert_eq!(sink.lines(), vec!["left | ok1", "", "left | ok3"]);
}

struct ChannelSource {
    titles: std::sync::mpsc::Receiver<String>,
    pending: Option<String>,
}

impl WindowSource for ChannelSource {
    fn wait_for_change(&mut self, timeout: Duration) -> Result<bool> {
        match self.titles.recv_timeout(timeout) {
            Ok(t) => {
                self.pending = Some(t);
                Ok(true)
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => Ok(false),
            Err(_) => Err(BarError::display("closed")),
        }
    }

    fn active_title(&mut self) -> Result<String> {
        self.pending
            .take()
            .ok_or_else(|| BarError::display("no active window"))
    }
}

#[test]
fn test_title_read_while_tracker_writes() {
    let title = SharedTitle::new();
    let shutdown = ShutdownSignal::new();
    let (tx, rx) = std::sync::mpsc::channel();

    let tracker = {
        let source = ChannelSource {
            titles: rx,
            pending: None,
        };
        let title = title.clone();
        let shutdown = shutdown.clone();
        thread::spawn(move || FocusTracker::new(source, title).run(&shutdown))
    };

    let feeder = thread::spawn(move || {
        for i in 0..200 {
            if tx.send(format!("App — doc{}", i % 4)).is_err() {
                break;
            }
            thread::sleep(Duration::from_millis(1));
        }
    });

    let sink = TimedSink::default();
    let mut scheduler = StatusScheduler::new(
        vec![Box::new(TitleSource::new(title.clone(), Markup::None))],
        WireEmitter::new(sink.clone(), OutputMode::Plain),
        Markup::None,
        " | ",
        Duration::from_millis(2),
    );
    let stopper = stop_after(&shutdown, Duration::from_millis(250));
    scheduler.run(&shutdown).unwrap();

    stopper.join().unwrap();
    feeder.join().unwrap();
    tracker.join().unwrap();

    let allowed = [NO_WINDOW_TITLE, "doc0", "doc1", "doc2", "doc3"];
    let lines = sink.lines();
    assert!(!lines.is_empty());
    for line in lines {
        assert!(allowed.contains(&line.as_str()), "unexpected title line {:?}", line);
    }
}
