//! Credential check without running anything.

use std::io::Write;
use std::process::ExitCode;

use admin_conformance_harness::{ConfigOverrides, HarnessConfig};

use super::{CommandError, connect};

/// Log in and report the outcome.
///
/// # Errors
///
/// Returns an error if configuration is invalid or login fails.
pub async fn login(overrides: &ConfigOverrides) -> Result<ExitCode, CommandError> {
    let config = HarnessConfig::from_env(overrides)?;
    let session = connect(&config).await?;

    tracing::info!(base_url = %session.base_url(), "Login succeeded");
    writeln!(
        std::io::stdout().lock(),
        "Logged in as {} at {}",
        config.credentials.email,
        session.base_url()
    )?;
    Ok(ExitCode::SUCCESS)
}
