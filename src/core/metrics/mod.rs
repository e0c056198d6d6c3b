//! Metric sources sampled by the scheduler on every tick.
//!
//! Each source is an independent query returning a display string or an
//! error. Parsing lives in pure functions next to each source so it can be
//! tested without the host's programs and files.

pub mod clock;
pub mod cpu;
pub mod disk;
pub mod memory;
pub mod network;
pub mod title;

pub use clock::ClockSource;
pub use cpu::{CpuFrequencySource, CpuTemperatureSource};
pub use disk::DiskSource;
pub use memory::MemorySource;
pub use network::NetworkSource;
pub use title::TitleSource;

use crate::core::config::{Field, StatusConfig};
use crate::core::context::StatusContext;
use crate::error::Result;

/// A single status-line component
pub trait MetricSource {
    /// Identifier used in logs
    fn name(&self) -> &str;

    /// Optional label shown before the value
    fn label(&self) -> Option<&str> {
        None
    }

    /// Produce the current display value.
    fn query(&self) -> Result<String>;
}

/// Build the sources for the configured field list, in order.
pub fn build_sources(config: &StatusConfig, ctx: &StatusContext) -> Vec<Box<dyn MetricSource>> {
    config
        .fields
        .iter()
        .map(|field| -> Box<dyn MetricSource> {
            match field {
                Field::Title => Box::new(TitleSource::new(ctx.title.clone(), ctx.markup)),
                Field::Cpu => Box::new(CpuFrequencySource::new(ctx.markup)),
                Field::Temp => Box::new(CpuTemperatureSource::new(ctx.markup)),
                Field::Mem => Box::new(MemorySource::new(ctx.markup)),
                Field::Disk => Box::new(DiskSource::new(&config.disk_mount, ctx.markup)),
                Field::Net => Box::new(NetworkSource::new(ctx.markup)),
                Field::Clock => Box::new(ClockSource::new(ctx.markup)),
            }
        })
        .collect()
}
