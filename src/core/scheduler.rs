//! Fixed-interval tick loop composing and emitting status lines.

use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use crate::core::context::ShutdownSignal;
use crate::core::emitter::WireEmitter;
use crate::core::metrics::MetricSource;
use crate::error::Result;
use crate::ui::markup::Markup;

/// One component of a composed line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusField {
    pub label: Option<String>,
    pub value: String,
}

impl StatusField {
    fn render(&self, markup: &Markup) -> String {
        match &self.label {
            Some(label) => format!("{} {}", markup.accent(label), self.value),
            None => self.value.clone(),
        }
    }
}

/// Drives the metric sources and the wire emitter.
///
/// A tick is all-or-nothing: if any source fails, the whole line for that
/// tick is empty. Failures never stop the loop.
pub struct StatusScheduler<W: Write> {
    sources: Vec<Box<dyn MetricSource>>,
    emitter: WireEmitter<W>,
    markup: Markup,
    delimiter: String,
    interval: Duration,
}

impl<W: Write> StatusScheduler<W> {
    pub fn new(
        sources: Vec<Box<dyn MetricSource>>,
        emitter: WireEmitter<W>,
        markup: Markup,
        delimiter: &str,
        interval: Duration,
    ) -> Self {
        Self {
            sources,
            emitter,
            markup,
            delimiter: delimiter.to_string(),
            interval,
        }
    }

    /// Query every source in order. `None` if any of them failed.
    pub fn collect(&self) -> Option<Vec<StatusField>> {
        let mut fields = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            match source.query() {
                Ok(value) => fields.push(StatusField {
                    label: source.label().map(str::to_string),
                    value,
                }),
                Err(e) => {
                    log::error!("Metric '{}' failed: {}", source.name(), e);
                    return None;
                }
            }
        }
        Some(fields)
    }

    /// Build this tick's line; empty on any failure.
    pub fn compose(&self) -> String {
        let composed = panic::catch_unwind(AssertUnwindSafe(|| {
            self.collect().map(|fields| {
                fields
                    .iter()
                    .map(|f| f.render(&self.markup))
                    .collect::<Vec<_>>()
                    .join(&self.delimiter)
            })
        }));

        match composed {
            Ok(Some(line)) => line,
            Ok(None) => String::new(),
            Err(_) => {
                log::error!("Status composition panicked; emitting empty line");
                String::new()
            }
        }
    }

    /// Compose one line and write it to the bar host.
    pub fn tick(&mut self) -> Result<()> {
        let line = self.compose();
        log::trace!("tick: {}", line);
        self.emitter.emit(&line)
    }

    /// Tick until `shutdown` fires. Only a failed write to the host ends the
    /// loop with an error.
    pub fn run(&mut self, shutdown: &ShutdownSignal) -> Result<()> {
        self.emitter.begin()?;
        log::info!(
            "Scheduler started: {} fields every {:.2}s",
            self.sources.len(),
            self.interval.as_secs_f64()
        );

        while !shutdown.is_triggered() {
            self.tick()?;
            if shutdown.sleep(self.interval) {
                break;
            }
        }

        log::info!("Scheduler stopped");
        Ok(())
    }

    pub fn into_emitter(self) -> WireEmitter<W> {
        self.emitter
    }
}
