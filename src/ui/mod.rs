// Presentation module

pub mod markup;

pub use markup::{Markup, Palette, Rgb, Severity, Threshold};
