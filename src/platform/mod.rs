// Platform-specific code module

pub mod command;
#[cfg(unix)]
pub mod x11;

// Re-exports for cleaner imports
pub use command::{missing_programs, run, REQUIRED_PROGRAMS};
#[cfg(unix)]
pub use x11::X11WindowSource;
