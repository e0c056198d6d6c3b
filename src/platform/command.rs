//! Running the external programs metric sources read from.

use std::process::Command;

use crate::error::{BarError, Result};

/// Run `program` with `args` and return its stdout.
///
/// A spawn failure, non-zero exit or non-UTF-8 output is an error.
pub fn run(program: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| BarError::command(program, format!("could not start: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(BarError::command(
            program,
            format!("{} ({})", output.status, stderr.trim()),
        ));
    }

    String::from_utf8(output.stdout)
        .map_err(|_| BarError::command(program, "output is not valid UTF-8"))
}

/// Programs the default field set shells out to
pub const REQUIRED_PROGRAMS: &[&str] = &["lscpu", "sensors", "ip", "df"];

/// Names from `programs` that cannot be found on `PATH`.
pub fn missing_programs<'a>(programs: &[&'a str]) -> Vec<&'a str> {
    programs
        .iter()
        .copied()
        .filter(|p| which::which(p).is_err())
        .collect()
}
