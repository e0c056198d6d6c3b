//! Status engine entry point.
//!
//! Emits the protocol header, starts the focus tracker on its own thread and
//! runs the scheduler on the calling thread until SIGINT/SIGTERM.

use anyhow::{Context, Result};
use clap::ArgMatches;
use std::io;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};

use crate::core::config::{self, parse_fields, parse_interval, StatusConfig};
use crate::core::context::StatusContext;
use crate::core::emitter::{OutputMode, WireEmitter};
use crate::core::metrics::build_sources;
use crate::core::scheduler::StatusScheduler;
use crate::platform::{missing_programs, REQUIRED_PROGRAMS};
use crate::ui::markup::{Palette, Rgb};

/// Log file and verbosity, needed before the rest of the config is validated
pub fn logging_options(matches: &ArgMatches) -> (PathBuf, bool) {
    let path = matches
        .get_one::<PathBuf>("log-path")
        .cloned()
        .unwrap_or_else(config::default_log_path);
    (path, matches.get_flag("verbose"))
}

/// Build and validate the startup configuration from parsed arguments.
pub fn config_from_matches(matches: &ArgMatches) -> Result<StatusConfig> {
    let (log_path, verbose) = logging_options(matches);
    let defaults = StatusConfig::default();

    let interval = match matches.get_one::<f64>("interval") {
        Some(secs) => parse_interval(*secs)?,
        None => defaults.interval,
    };

    let mode = match matches.get_one::<String>("mode") {
        Some(mode) => mode.parse::<OutputMode>()?,
        None => defaults.mode,
    };

    let fields = match matches.get_one::<String>("fields") {
        Some(list) => parse_fields(list)?,
        None => defaults.fields,
    };

    let color = |name: &str, fallback: Rgb| -> Result<Rgb> {
        match matches.get_one::<String>(name) {
            Some(hex) => hex
                .parse::<Rgb>()
                .with_context(|| format!("Invalid --{} color", name)),
            None => Ok(fallback),
        }
    };
    let base = Palette::default();
    let palette = Palette {
        red: color("red", base.red)?,
        green: color("green", base.green)?,
        yellow: color("yellow", base.yellow)?,
        blue: color("blue", base.blue)?,
    };

    Ok(StatusConfig {
        interval,
        log_path,
        verbose,
        mode,
        palette,
        fields,
        delimiter: matches
            .get_one::<String>("delimiter")
            .cloned()
            .unwrap_or(defaults.delimiter),
        disk_mount: matches
            .get_one::<String>("disk-mount")
            .cloned()
            .unwrap_or(defaults.disk_mount),
    })
}

#[cfg(unix)]
fn spawn_tracker(ctx: &StatusContext) -> Result<JoinHandle<()>> {
    use crate::core::focus::FocusTracker;
    use crate::platform::X11WindowSource;

    let source = X11WindowSource::connect().context("Cannot open X display")?;
    let title = ctx.title.clone();
    let shutdown = ctx.shutdown.clone();

    thread::Builder::new()
        .name("focus-tracker".to_string())
        .spawn(move || FocusTracker::new(source, title).run(&shutdown))
        .context("Failed to spawn focus tracker thread")
}

#[cfg(not(unix))]
fn spawn_tracker(_ctx: &StatusContext) -> Result<JoinHandle<()>> {
    anyhow::bail!("Window title tracking requires an X11 display")
}

/// Run the status engine until shutdown is requested.
pub fn execute(config: StatusConfig) -> Result<()> {
    log::info!(
        "barline {} starting for user {} ({:?} mode)",
        env!("CARGO_PKG_VERSION"),
        std::env::var("USER").unwrap_or_else(|_| "unknown".to_string()),
        config.mode
    );

    let missing = missing_programs(REQUIRED_PROGRAMS);
    if !missing.is_empty() {
        log::warn!(
            "Programs not found on PATH, dependent fields will blank the line: {}",
            missing.join(", ")
        );
    }

    let ctx = StatusContext::new(config.markup());

    let mut emitter = WireEmitter::new(io::stdout().lock(), config.mode);
    emitter
        .begin()
        .context("Failed to write protocol header")?;

    let tracker = if config.uses_title() {
        Some(spawn_tracker(&ctx)?)
    } else {
        None
    };

    let shutdown = ctx.shutdown.clone();
    ctrlc::set_handler(move || shutdown.trigger()).context("Failed to install signal handler")?;

    let mut scheduler = StatusScheduler::new(
        build_sources(&config, &ctx),
        emitter,
        ctx.markup,
        &config.delimiter,
        config.interval,
    );
    let result = scheduler.run(&ctx.shutdown);

    // Stop the tracker even if the scheduler bailed out.
    ctx.shutdown.trigger();
    if let Some(handle) = tracker {
        if handle.join().is_err() {
            log::error!("Focus tracker thread panicked");
        }
    }

    result.context("Failed to write status to bar host")?;
    log::info!("barline stopped");
    Ok(())
}
