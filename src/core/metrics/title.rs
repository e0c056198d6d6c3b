use super::MetricSource;
use crate::core::shared_title::SharedTitle;
use crate::error::Result;
use crate::ui::markup::Markup;

/// Focused window title as last published by the focus tracker
pub struct TitleSource {
    title: SharedTitle,
    markup: Markup,
}

impl TitleSource {
    pub fn new(title: SharedTitle, markup: Markup) -> Self {
        Self { title, markup }
    }
}

impl MetricSource for TitleSource {
    fn name(&self) -> &str {
        "title"
    }

    // Single read per tick; never fails.
    fn query(&self) -> Result<String> {
        Ok(self.markup.text(&self.title.get()))
    }
}
