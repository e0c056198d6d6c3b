use anyhow::Result;
use clap::ArgMatches;
use clap_complete::Shell;
use std::process;

use barline::commands::{self, build_cli, run};

fn main() {
    let matches = build_cli().get_matches();

    if let Some(shell) = matches.get_one::<Shell>("completions") {
        if let Err(err) = commands::completions::execute(*shell, &mut build_cli()) {
            eprintln!("barline: {:#}", err);
            process::exit(1);
        }
        return;
    }

    let (log_path, verbose) = run::logging_options(&matches);
    if let Err(err) = barline::init_logging(&log_path, verbose) {
        eprintln!("barline: cannot open log file {:?}: {}", log_path, err);
        process::exit(1);
    }
    barline::install_panic_hook();

    if let Err(err) = start(&matches) {
        // {:?} carries the full cause chain and the backtrace when captured
        log::error!("Fatal error: {:?}", err);
        eprintln!("barline: {:#}", err);
        process::exit(1);
    }
}

fn start(matches: &ArgMatches) -> Result<()> {
    let config = run::config_from_matches(matches)?;
    run::execute(config)
}
