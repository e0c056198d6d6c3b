// Core status engine module

pub mod config;
pub mod context;
pub mod emitter;
pub mod focus;
pub mod metrics;
pub mod scheduler;
pub mod shared_title;

// Re-export commonly used items
pub use config::{Field, StatusConfig};
pub use context::{ShutdownSignal, StatusContext};
pub use emitter::{OutputMode, ProtocolState, WireEmitter};
pub use focus::{strip_title_suffix, FocusTracker, WindowSource};
pub use metrics::MetricSource;
pub use scheduler::{StatusField, StatusScheduler};
pub use shared_title::{SharedTitle, NO_WINDOW_TITLE};
