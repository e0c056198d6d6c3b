//! Color thresholds and pango markup for bar output.
//!
//! Metric values are mapped to a [`Severity`] through fixed breakpoints and
//! wrapped in `<span>` tags when the bar host understands markup.

use std::fmt;
use std::str::FromStr;

use crate::error::{BarError, Result};

/// Markup dialect identifier sent with every i3bar block
pub const PANGO: &str = "pango";

/// A 24-bit color, rendered as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl FromStr for Rgb {
    type Err = BarError;

    /// Accepts `#RRGGBB` or `RRGGBB`, case-insensitive.
    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(BarError::config(format!(
                "invalid color '{}': expected hex RGB like #ff0000",
                s
            )));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| BarError::config(format!("invalid color '{}': {}", s, e)))
        };

        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Colors used for markup, overridable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub red: Rgb,
    pub green: Rgb,
    pub yellow: Rgb,
    pub blue: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            red: Rgb(0xfb, 0x49, 0x34),
            green: Rgb(0xb8, 0xbb, 0x26),
            yellow: Rgb(0xfa, 0xbd, 0x2f),
            blue: Rgb(0x83, 0xa5, 0x98),
        }
    }
}

impl Palette {
    pub fn severity_color(&self, severity: Severity) -> Rgb {
        match severity {
            Severity::Normal => self.green,
            Severity::Warning => self.yellow,
            Severity::Critical => self.red,
        }
    }
}

/// Ordered severity buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

/// Fixed breakpoints mapping a value to a [`Severity`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold {
    pub warning: f64,
    pub critical: f64,
}

impl Threshold {
    pub const fn new(warning: f64, critical: f64) -> Self {
        Self { warning, critical }
    }

    /// Breakpoints are inclusive: a value equal to `critical` is critical.
    pub fn classify(&self, value: f64) -> Severity {
        if value >= self.critical {
            Severity::Critical
        } else if value >= self.warning {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }
}

/// How field text is decorated before it reaches the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    /// Text passes through untouched
    None,
    /// Pango `<span>` tags with the given palette
    Pango(Palette),
}

impl Markup {
    /// Wrap `text` in a foreground span. Text is escaped first.
    pub fn colorize(&self, text: &str, color: Rgb) -> String {
        match self {
            Markup::None => text.to_string(),
            Markup::Pango(_) => {
                format!("<span foreground=\"{}\">{}</span>", color, escape(text))
            }
        }
    }

    /// Color `text` by classifying `value` against `threshold`.
    pub fn severity(&self, text: &str, value: f64, threshold: Threshold) -> String {
        match self {
            Markup::None => text.to_string(),
            Markup::Pango(palette) => {
                self.colorize(text, palette.severity_color(threshold.classify(value)))
            }
        }
    }

    /// Color used for labels and neutral accents, if any.
    pub fn accent(&self, text: &str) -> String {
        match self {
            Markup::None => text.to_string(),
            Markup::Pango(palette) => self.colorize(text, palette.blue),
        }
    }

    pub fn critical(&self, text: &str) -> String {
        match self {
            Markup::None => text.to_string(),
            Markup::Pango(palette) => self.colorize(text, palette.red),
        }
    }

    /// Escape untrusted text so it cannot break the markup.
    pub fn text(&self, text: &str) -> String {
        match self {
            Markup::None => text.to_string(),
            Markup::Pango(_) => escape(text),
        }
    }
}

/// Escape the characters pango treats as markup.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
