// Command handlers module
pub mod completions;
pub mod run;

use clap::{Arg, ArgAction, Command};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::core::config::DEFAULT_DELIMITER;

/// Command-line definition shared by `main` and completion generation
pub fn build_cli() -> Command {
    Command::new("barline")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Status line generator for i3bar/swaybar and plain-text bars")
        .arg(
            Arg::new("interval")
                .short('i')
                .long("interval")
                .value_name("SECONDS")
                .help("Seconds between status updates")
                .value_parser(clap::value_parser!(f64))
                .default_value("5"),
        )
        .arg(
            Arg::new("log-path")
                .short('l')
                .long("log-path")
                .value_name("FILE")
                .help("Log file (default: ~/.barline.log)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log debug output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("mode")
                .short('m')
                .long("mode")
                .value_name("MODE")
                .help("Output format: i3bar (JSON stream with colors) or plain")
                .default_value("i3bar"),
        )
        .arg(
            Arg::new("fields")
                .short('f')
                .long("fields")
                .value_name("LIST")
                .help("Comma-separated fields: title,cpu,temp,mem,disk,net,clock")
                .default_value("title,cpu,temp,mem,disk,net,clock"),
        )
        .arg(
            Arg::new("delimiter")
                .short('d')
                .long("delimiter")
                .value_name("TEXT")
                .help("Text placed between fields")
                .default_value(DEFAULT_DELIMITER),
        )
        .arg(
            Arg::new("disk-mount")
                .long("disk-mount")
                .value_name("PATH")
                .help("Mount point shown by the disk field")
                .default_value("/"),
        )
        .arg(color_arg("red", 'r'))
        .arg(color_arg("green", 'g'))
        .arg(color_arg("yellow", 'y'))
        .arg(color_arg("blue", 'b'))
        .arg(
            Arg::new("completions")
                .long("completions")
                .value_name("SHELL")
                .help("Print shell completions and exit")
                .value_parser(clap::value_parser!(Shell)),
        )
}

fn color_arg(name: &'static str, short: char) -> Arg {
    Arg::new(name)
        .short(short)
        .long(name)
        .value_name("RRGGBB")
        .help(format!("Override the {} markup color (hex RGB)", name))
}
