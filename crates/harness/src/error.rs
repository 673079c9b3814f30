//! Error types for talking to the admin API.

use reqwest::StatusCode;
use thiserror::Error;

use crate::fixtures::FixtureKind;

/// Longest response body excerpt carried in an error message.
const BODY_EXCERPT_LEN: usize = 300;

/// Errors that can occur when calling the admin API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (connect, timeout, TLS, ...).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A URL could not be built from the base URL and path.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The response body was not the structure the caller expected.
    #[error("Could not decode response (HTTP {status}): {source}; body: {body}")]
    Decode {
        /// HTTP status of the response.
        status: StatusCode,
        /// Parser error.
        #[source]
        source: serde_json::Error,
        /// Truncated response body.
        body: String,
    },

    /// Login returned a non-success status.
    #[error("Authentication failed: HTTP {status}: {body}")]
    Authentication {
        /// HTTP status of the login response.
        status: StatusCode,
        /// Truncated response body.
        body: String,
    },

    /// Login succeeded but the response lacked a usable access token.
    #[error("Malformed login response: {0}")]
    MalformedResponse(String),
}

/// Errors that can occur while creating a fixture.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The API refused to create the entity.
    #[error("{kind} creation rejected: HTTP {status}: {body}")]
    Rejected {
        /// Which fixture was being created.
        kind: FixtureKind,
        /// HTTP status of the create response.
        status: StatusCode,
        /// Truncated response body.
        body: String,
    },

    /// The create call failed at the transport or decode level.
    #[error("{kind} creation failed: {source}")]
    Client {
        /// Which fixture was being created.
        kind: FixtureKind,
        /// Underlying client error.
        #[source]
        source: ClientError,
    },
}

/// Error that aborts a single check. The runner records it as a failure.
#[derive(Debug, Error)]
pub enum CheckError {
    /// An API call failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A precondition fixture could not be created.
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    /// An endpoint under test returned a non-success status.
    #[error("{operation} returned HTTP {status}: {body}")]
    UnexpectedStatus {
        /// What the check was doing.
        operation: &'static str,
        /// HTTP status received.
        status: StatusCode,
        /// Truncated response body.
        body: String,
    },
}

/// Shorten a response body for inclusion in diagnostics.
pub(crate) fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= BODY_EXCERPT_LEN {
        return trimmed.to_owned();
    }
    let mut short: String = trimmed.chars().take(BODY_EXCERPT_LEN).collect();
    short.push('…');
    short
}
