//! CPU frequency (`lscpu`) and temperature (`sensors`).

use once_cell::sync::Lazy;
use regex::Regex;

use super::MetricSource;
use crate::error::{BarError, Result};
use crate::platform::command;
use crate::ui::markup::{Markup, Threshold};

/// Temperature breakpoints in °C
pub const TEMP_THRESHOLD: Threshold = Threshold::new(60.0, 80.0);

/// Sensor labels tried in order; the first present wins
const SENSOR_LABELS: &[&str] = &["Package id 0", "Tctl", "Tdie", "Core 0"];

static CELSIUS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([+-]?\d+(?:\.\d+)?)\s*°C").expect("valid temperature regex"));

/// Current CPU clock in MHz from `lscpu` output.
///
/// Prefers `CPU MHz`, falling back to `CPU max MHz` on kernels that no longer
/// report the live value.
pub fn parse_lscpu_mhz(output: &str) -> Result<f64> {
    let value_of = |key: &str| {
        output.lines().find_map(|line| {
            let (k, v) = line.split_once(':')?;
            if k.trim() == key {
                Some(v.trim().to_string())
            } else {
                None
            }
        })
    };

    let raw = value_of("CPU MHz")
        .or_else(|| value_of("CPU max MHz"))
        .ok_or_else(|| BarError::parse("lscpu output has no CPU MHz field"))?;

    raw.parse::<f64>()
        .map_err(|_| BarError::parse(format!("invalid CPU MHz value '{}'", raw)))
}

/// Package temperature in °C from `sensors` output.
pub fn parse_sensors_celsius(output: &str) -> Result<f64> {
    for label in SENSOR_LABELS {
        let reading = output.lines().find_map(|line| {
            let (k, v) = line.split_once(':')?;
            if k.trim() == *label {
                CELSIUS.captures(v).and_then(|c| c[1].parse::<f64>().ok())
            } else {
                None
            }
        });
        if let Some(celsius) = reading {
            return Ok(celsius);
        }
    }

    Err(BarError::parse("sensors output has no CPU temperature"))
}

pub fn format_frequency(mhz: f64) -> String {
    format!("{:.2} GHz", mhz / 1000.0)
}

pub struct CpuFrequencySource {
    markup: Markup,
}

impl CpuFrequencySource {
    pub fn new(markup: Markup) -> Self {
        Self { markup }
    }
}

impl MetricSource for CpuFrequencySource {
    fn name(&self) -> &str {
        "cpu"
    }

    fn label(&self) -> Option<&str> {
        Some("CPU")
    }

    fn query(&self) -> Result<String> {
        let mhz = parse_lscpu_mhz(&command::run("lscpu", &[])?)?;
        Ok(self.markup.text(&format_frequency(mhz)))
    }
}

pub struct CpuTemperatureSource {
    markup: Markup,
}

impl CpuTemperatureSource {
    pub fn new(markup: Markup) -> Self {
        Self { markup }
    }
}

impl MetricSource for CpuTemperatureSource {
    fn name(&self) -> &str {
        "temperature"
    }

    fn label(&self) -> Option<&str> {
        Some("TEMP")
    }

    fn query(&self) -> Result<String> {
        let celsius = parse_sensors_celsius(&command::run("sensors", &[])?)?;
        Ok(self
            .markup
            .severity(&format!("{:.0}°C", celsius), celsius, TEMP_THRESHOLD))
    }
}
