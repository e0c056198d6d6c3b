use chrono::Local;

use super::MetricSource;
use crate::error::Result;
use crate::ui::markup::Markup;

pub const CLOCK_FORMAT: &str = "%a %d %b %H:%M";

/// Local wall clock
pub struct ClockSource {
    format: String,
    markup: Markup,
}

impl ClockSource {
    pub fn new(markup: Markup) -> Self {
        Self::with_format(CLOCK_FORMAT, markup)
    }

    pub fn with_format(format: &str, markup: Markup) -> Self {
        Self {
            format: format.to_string(),
            markup,
        }
    }
}

impl MetricSource for ClockSource {
    fn name(&self) -> &str {
        "clock"
    }

    fn query(&self) -> Result<String> {
        Ok(self.markup.text(&Local::now().format(&self.format).to_string()))
    }
}
