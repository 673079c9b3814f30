//! Harness configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CONFORMANCE_ADMIN_PASSWORD` - Admin account password
//!
//! ## Optional
//! - `CONFORMANCE_BASE_URL` - API base URL (default: `http://localhost:8080/api`)
//! - `CONFORMANCE_ADMIN_EMAIL` - Admin account email (default: `admin@onashomes.com`)
//! - `CONFORMANCE_TIMEOUT_SECS` - Per-request timeout in seconds, 1-300 (default: 30)

use std::time::Duration;

use admin_conformance_core::Email;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::auth::Credentials;
use crate::client::DEFAULT_TIMEOUT;

/// Default API base URL for a locally running backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
/// Default seeded admin account.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@onashomes.com";

const MAX_TIMEOUT_SECS: u64 = 300;

const BASE_URL_VAR: &str = "CONFORMANCE_BASE_URL";
const EMAIL_VAR: &str = "CONFORMANCE_ADMIN_EMAIL";
const PASSWORD_VAR: &str = "CONFORMANCE_ADMIN_PASSWORD";
const TIMEOUT_VAR: &str = "CONFORMANCE_TIMEOUT_SECS";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Values given on the command line; they win over the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// API base URL.
    pub base_url: Option<String>,
    /// Admin email.
    pub email: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Harness configuration.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// API base URL (may include a path prefix).
    pub base_url: Url,
    /// Admin login credentials (password redacted in `Debug`).
    pub credentials: Credentials,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl HarnessConfig {
    /// Load configuration from environment variables, then apply overrides.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the password is missing or any value is invalid.
    pub fn from_env(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok(), overrides)
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the password is missing or any value is invalid.
    pub fn from_lookup<F>(lookup: F, overrides: &ConfigOverrides) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = overrides
            .base_url
            .clone()
            .or_else(|| lookup(BASE_URL_VAR))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        let base_url = parse_base_url(&base_url)?;

        let email = overrides
            .email
            .clone()
            .or_else(|| lookup(EMAIL_VAR))
            .unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_owned());
        let email = Email::parse(&email)
            .map_err(|e| ConfigError::InvalidValue(EMAIL_VAR.to_owned(), e.to_string()))?;

        let password = lookup(PASSWORD_VAR)
            .filter(|p| !p.is_empty())
            .map(SecretString::from)
            .ok_or_else(|| ConfigError::MissingEnvVar(PASSWORD_VAR.to_owned()))?;

        let timeout = match overrides.timeout_secs {
            Some(secs) => validate_timeout(secs)?,
            None => match lookup(TIMEOUT_VAR) {
                Some(raw) => parse_timeout(&raw)?,
                None => DEFAULT_TIMEOUT,
            },
        };

        Ok(Self {
            base_url,
            credentials: Credentials { email, password },
            timeout,
        })
    }
}

/// Parse and validate the API base URL.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue(BASE_URL_VAR.to_owned(), reason);

    let url = Url::parse(raw).map_err(|e| invalid(format!("{raw}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("{raw}: scheme must be http or https")));
    }
    if url.host_str().is_none() {
        return Err(invalid(format!("{raw}: missing host")));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid(format!("{raw}: must not carry a query or fragment")));
    }
    Ok(url)
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidValue(TIMEOUT_VAR.to_owned(), format!("{raw}: {e}")))?;
    validate_timeout(secs)
}

fn validate_timeout(secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 || secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::InvalidValue(
            TIMEOUT_VAR.to_owned(),
            format!("must be between 1 and {MAX_TIMEOUT_SECS} seconds (got {secs})"),
        ));
    }
    Ok(Duration::from_secs(secs))
}
