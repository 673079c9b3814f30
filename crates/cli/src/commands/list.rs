//! List known checks.

use std::io::Write;
use std::process::ExitCode;

use admin_conformance_harness::CheckKind;

use super::CommandError;

/// Print every check name with its description.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub fn list() -> Result<ExitCode, CommandError> {
    let mut out = std::io::stdout().lock();
    for check in CheckKind::ALL {
        writeln!(out, "{:<32}{}", check.name(), check.description())?;
    }
    Ok(ExitCode::SUCCESS)
}
