//! CLI command implementations.

pub mod list;
pub mod login;
pub mod run;

use admin_conformance_harness::{ApiClient, ClientError, ConfigError, HarnessConfig, Session};
use thiserror::Error;

/// Every selected check passed or was skipped.
pub const EXIT_SUCCESS: u8 = 0;
/// At least one check failed.
pub const EXIT_CHECK_FAILED: u8 = 1;
/// The run could not start.
pub const EXIT_FATAL: u8 = 2;

/// Errors that stop a command before it can produce a report.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("API error: {0}")]
    Client(#[from] ClientError),
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the HTTP client from config and log in once.
async fn connect(config: &HarnessConfig) -> Result<Session, CommandError> {
    let client = ApiClient::new(config.base_url.as_str(), config.timeout)?;
    let session = admin_conformance_harness::authenticate(client, &config.credentials).await?;
    Ok(session)
}
