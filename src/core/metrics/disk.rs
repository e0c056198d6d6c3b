//! Disk usage of one mount point via `df -h`.

use super::MetricSource;
use crate::error::{BarError, Result};
use crate::platform::command;
use crate::ui::markup::{Markup, Threshold};

/// Use% breakpoints
pub const DISK_THRESHOLD: Threshold = Threshold::new(80.0, 90.0);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskUsage {
    pub size: String,
    pub used: String,
    pub avail: String,
    pub percent: u8,
}

/// Parse the data row of `df -h -P <mount>` output.
pub fn parse_df(output: &str) -> Result<DiskUsage> {
    let row = output
        .lines()
        .skip(1)
        .find(|l| !l.trim().is_empty())
        .ok_or_else(|| BarError::parse("df output has no data row"))?;

    let cols: Vec<&str> = row.split_whitespace().collect();
    if cols.len() < 6 {
        return Err(BarError::parse(format!("unexpected df row '{}'", row)));
    }

    let percent = cols[4]
        .trim_end_matches('%')
        .parse::<u8>()
        .map_err(|_| BarError::parse(format!("invalid use% '{}'", cols[4])))?;

    Ok(DiskUsage {
        size: cols[1].to_string(),
        used: cols[2].to_string(),
        avail: cols[3].to_string(),
        percent,
    })
}

pub struct DiskSource {
    mount: String,
    markup: Markup,
}

impl DiskSource {
    pub fn new(mount: &str, markup: Markup) -> Self {
        Self {
            mount: mount.to_string(),
            markup,
        }
    }
}

impl MetricSource for DiskSource {
    fn name(&self) -> &str {
        "disk"
    }

    fn label(&self) -> Option<&str> {
        Some("DISK")
    }

    fn query(&self) -> Result<String> {
        let usage = parse_df(&command::run("df", &["-h", "-P", &self.mount])?)?;
        let text = format!("{}/{} ({}%)", usage.used, usage.size, usage.percent);
        Ok(self
            .markup
            .severity(&text, f64::from(usage.percent), DISK_THRESHOLD))
    }
}
