use anyhow::Result;
use clap::Command;
use clap_complete::{generate, Shell};
use std::io;

/// Generate shell completions for the specified shell
pub fn execute(shell: Shell, cli: &mut Command) -> Result<()> {
    generate(shell, cli, "barline", &mut io::stdout());
    Ok(())
}
