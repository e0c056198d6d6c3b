//! Startup configuration. Fixed for the lifetime of the process.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::core::emitter::OutputMode;
use crate::error::{BarError, Result};
use crate::ui::markup::{Markup, Palette};

pub const DEFAULT_INTERVAL_SECS: f64 = 5.0;
pub const DEFAULT_DELIMITER: &str = " | ";
pub const LOG_FILE_NAME: &str = ".barline.log";

/// One configurable status-line component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Cpu,
    Temp,
    Mem,
    Disk,
    Net,
    Clock,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Title,
        Field::Cpu,
        Field::Temp,
        Field::Mem,
        Field::Disk,
        Field::Net,
        Field::Clock,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Cpu => "cpu",
            Field::Temp => "temp",
            Field::Mem => "mem",
            Field::Disk => "disk",
            Field::Net => "net",
            Field::Clock => "clock",
        }
    }
}

impl FromStr for Field {
    type Err = BarError;

    fn from_str(s: &str) -> Result<Self> {
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| {
                let known: Vec<&str> = Field::ALL.iter().map(|f| f.as_str()).collect();
                BarError::config(format!(
                    "unknown field '{}' (expected one of: {})",
                    s,
                    known.join(", ")
                ))
            })
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a comma-separated field list, keeping its order.
pub fn parse_fields(list: &str) -> Result<Vec<Field>> {
    let fields = list
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.parse::<Field>())
        .collect::<Result<Vec<Field>>>()?;

    if fields.is_empty() {
        return Err(BarError::config("field list is empty"));
    }
    Ok(fields)
}

impl FromStr for OutputMode {
    type Err = BarError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "plain" => Ok(OutputMode::Plain),
            "i3bar" | "json" => Ok(OutputMode::I3bar),
            other => Err(BarError::config(format!(
                "unknown output mode '{}' (expected plain or i3bar)",
                other
            ))),
        }
    }
}

/// Tick interval from seconds; must be positive and finite.
pub fn parse_interval(secs: f64) -> Result<Duration> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(BarError::config(format!(
            "interval must be a positive number of seconds, got {}",
            secs
        )));
    }
    Duration::try_from_secs_f64(secs)
        .map_err(|e| BarError::config(format!("interval {} out of range: {}", secs, e)))
}

/// `$HOME/.barline.log`, or the working directory when there is no home.
pub fn default_log_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(LOG_FILE_NAME)
}

#[derive(Debug, Clone)]
pub struct StatusConfig {
    pub interval: Duration,
    pub log_path: PathBuf,
    pub verbose: bool,
    pub mode: OutputMode,
    pub palette: Palette,
    pub fields: Vec<Field>,
    pub delimiter: String,
    pub disk_mount: String,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs_f64(DEFAULT_INTERVAL_SECS),
            log_path: default_log_path(),
            verbose: false,
            mode: OutputMode::I3bar,
            palette: Palette::default(),
            fields: Field::ALL.to_vec(),
            delimiter: DEFAULT_DELIMITER.to_string(),
            disk_mount: "/".to_string(),
        }
    }
}

impl StatusConfig {
    /// Markup used by metric sources: colors only in the streaming mode.
    pub fn markup(&self) -> Markup {
        match self.mode {
            OutputMode::Plain => Markup::None,
            OutputMode::I3bar => Markup::Pango(self.palette),
        }
    }

    pub fn uses_title(&self) -> bool {
        self.fields.contains(&Field::Title)
    }
}
