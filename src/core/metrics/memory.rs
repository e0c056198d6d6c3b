//! Memory usage from `/proc/meminfo`.

use std::fs;
use std::path::{Path, PathBuf};

use super::MetricSource;
use crate::error::{BarError, Result};
use crate::ui::markup::{Markup, Threshold};

/// Used-memory percentage breakpoints
pub const MEMORY_THRESHOLD: Threshold = Threshold::new(70.0, 90.0);

const MEMINFO: &str = "/proc/meminfo";

/// The `/proc/meminfo` fields needed for the used figure, in kB
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryUsage {
    pub total_kb: u64,
    pub free_kb: u64,
    pub buffers_kb: u64,
    pub cached_kb: u64,
}

impl MemoryUsage {
    /// total - (free + buffers + cached)
    pub fn used_kb(&self) -> u64 {
        self.total_kb
            .saturating_sub(self.free_kb + self.buffers_kb + self.cached_kb)
    }

    pub fn used_percent(&self) -> f64 {
        if self.total_kb == 0 {
            0.0
        } else {
            self.used_kb() as f64 / self.total_kb as f64 * 100.0
        }
    }

    /// `used/total GB`, one decimal, decimal gigabytes
    pub fn display(&self) -> String {
        format!(
            "{:.1}/{:.1} GB",
            self.used_kb() as f64 / 1e6,
            self.total_kb as f64 / 1e6
        )
    }
}

pub fn parse_meminfo(text: &str) -> Result<MemoryUsage> {
    let field = |name: &str| -> Result<u64> {
        let raw = text
            .lines()
            .find_map(|line| {
                let (k, v) = line.split_once(':')?;
                (k.trim() == name).then(|| v.trim())
            })
            .ok_or_else(|| BarError::parse(format!("meminfo has no {} field", name)))?;

        raw.trim_end_matches("kB")
            .trim()
            .parse::<u64>()
            .map_err(|_| BarError::parse(format!("invalid {} value '{}'", name, raw)))
    };

    Ok(MemoryUsage {
        total_kb: field("MemTotal")?,
        free_kb: field("MemFree")?,
        buffers_kb: field("Buffers")?,
        cached_kb: field("Cached")?,
    })
}

pub struct MemorySource {
    path: PathBuf,
    markup: Markup,
}

impl MemorySource {
    pub fn new(markup: Markup) -> Self {
        Self::with_path(MEMINFO, markup)
    }

    /// Read from an alternate meminfo file
    pub fn with_path<P: AsRef<Path>>(path: P, markup: Markup) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            markup,
        }
    }
}

impl MetricSource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    fn label(&self) -> Option<&str> {
        Some("MEM")
    }

    fn query(&self) -> Result<String> {
        let usage = parse_meminfo(&fs::read_to_string(&self.path)?)?;
        Ok(self
            .markup
            .severity(&usage.display(), usage.used_percent(), MEMORY_THRESHOLD))
    }
}
