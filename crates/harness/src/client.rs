//! HTTP client adapter for the admin API.
//!
//! Issues single-attempt JSON requests against paths relative to a base URL
//! and hands back the raw status and body. Interpreting the status code is
//! the caller's job.

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::error::{ClientError, excerpt};

/// Per-request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Query string pairs. Values are URL-encoded when the request is built.
pub type Query<'a> = [(&'a str, String)];

/// Admin API client bound to one base URL.
///
/// There is no retry policy: every request is attempted exactly once and
/// bounded by the configured timeout.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

/// The `{ "data": ... }` envelope every admin API response uses.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    /// Response payload.
    pub data: T,
}

/// Status and body of a completed request.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    body: String,
}

impl ApiClient {
    /// Create a client for the API rooted at `base_url`.
    ///
    /// The base URL may carry a path prefix (e.g. `http://host:8080/api`);
    /// request paths are appended to it.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidUrl` if the base URL does not parse, or
    /// `ClientError::Transport` if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("admin-conformance/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// The base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `path` (with optional query pairs) against the base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str, query: &Query<'_>) -> Url {
        let mut url = self.base_url.clone();
        let prefix = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{prefix}/{}", path.trim_start_matches('/')));
        url.set_query(None);

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url
    }

    /// Send a request and read the whole body.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Transport` if no response was received or the
    /// body could not be read. Non-success statuses are not errors.
    #[instrument(skip(self, query, body, headers))]
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &Query<'_>,
        body: Option<&serde_json::Value>,
        headers: Option<&HeaderMap>,
    ) -> Result<ApiResponse, ClientError> {
        let url = self.endpoint(path, query);
        let mut builder = self.http.request(method, url);

        if let Some(headers) = headers {
            builder = builder.headers(headers.clone());
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(%status, bytes = body.len(), "Response received");

        Ok(ApiResponse { status, body })
    }
}

impl ApiResponse {
    /// Build a response from parts.
    #[must_use]
    pub const fn new(status: StatusCode, body: String) -> Self {
        Self { status, body }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Whether the status is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Raw response body.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Body shortened for diagnostics.
    #[must_use]
    pub fn excerpt(&self) -> String {
        excerpt(&self.body)
    }

    /// Parse the whole body as `T`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Decode` if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        serde_json::from_str(&self.body).map_err(|source| ClientError::Decode {
            status: self.status,
            source,
            body: self.excerpt(),
        })
    }

    /// Parse the body as `{ "data": T }` and return the payload.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Decode` if the envelope or payload is malformed.
    pub fn data<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        self.json::<Envelope<T>>().map(|envelope| envelope.data)
    }
}
