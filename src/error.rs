use std::io;
use thiserror::Error;

/// Custom error type for barline
#[derive(Error, Debug)]
pub enum BarError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Command `{program}` failed: {detail}")]
    Command { program: String, detail: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Metric collection failed: {0}")]
    Metric(String),

    #[error("Display error: {0}")]
    Display(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for barline
pub type Result<T> = std::result::Result<T, BarError>;

impl BarError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        BarError::Config(msg.into())
    }

    /// Create a command error for `program`
    pub fn command<P: Into<String>, D: Into<String>>(program: P, detail: D) -> Self {
        BarError::Command {
            program: program.into(),
            detail: detail.into(),
        }
    }

    pub fn parse<S: Into<String>>(msg: S) -> Self {
        BarError::Parse(msg.into())
    }

    pub fn metric<S: Into<String>>(msg: S) -> Self {
        BarError::Metric(msg.into())
    }

    /// Create a windowing-system error
    pub fn display<S: Into<String>>(msg: S) -> Self {
        BarError::Display(msg.into())
    }
}
