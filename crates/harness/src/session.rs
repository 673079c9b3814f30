//! Authenticated session.

use reqwest::Method;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::client::{ApiClient, ApiResponse, Query};
use crate::error::ClientError;

/// An authenticated view of the admin API.
///
/// Created once by [`crate::auth::authenticate`] and never mutated. Every
/// check receives it by reference; there is no ambient header state.
#[derive(Clone)]
pub struct Session {
    client: ApiClient,
    access_token: SecretString,
    headers: HeaderMap,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.client.base_url().as_str())
            .field("access_token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Build a session around an access token.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::MalformedResponse` if the token cannot be sent
    /// as an HTTP header value.
    pub fn new(client: ApiClient, access_token: SecretString) -> Result<Self, ClientError> {
        let mut bearer =
            HeaderValue::from_str(&format!("Bearer {}", access_token.expose_secret())).map_err(
                |_| ClientError::MalformedResponse("access token is not a valid header value".into()),
            )?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Ok(Self {
            client,
            access_token,
            headers,
        })
    }

    /// Base URL of the API this session talks to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        self.client.base_url()
    }

    /// The bearer token obtained at login.
    #[must_use]
    pub const fn access_token(&self) -> &SecretString {
        &self.access_token
    }

    /// Headers attached to every authenticated request.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Authenticated GET.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Transport` if no response was received.
    pub async fn get(&self, path: &str, query: &Query<'_>) -> Result<ApiResponse, ClientError> {
        self.client
            .request(Method::GET, path, query, None, Some(&self.headers))
            .await
    }

    /// Authenticated POST with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Transport` if no response was received.
    pub async fn post(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<ApiResponse, ClientError> {
        self.client
            .request(Method::POST, path, &[], Some(body), Some(&self.headers))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::client::DEFAULT_TIMEOUT;

    fn session(token: &str) -> Result<Session, ClientError> {
        let client = ApiClient::new("http://localhost:8080/api", DEFAULT_TIMEOUT).unwrap();
        Session::new(client, SecretString::from(token))
    }

    #[test]
    fn test_headers_carry_bearer_token() {
        let session = session("tok_123").unwrap();
        let auth = session.headers().get(AUTHORIZATION).unwrap();
        assert_eq!(auth.to_str().unwrap(), "Bearer tok_123");
        assert!(auth.is_sensitive());
        assert_eq!(
            session.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_debug_redacts_token() {
        let debug = format!("{:?}", session("tok_secret").unwrap());
        assert!(!debug.contains("tok_secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_token_with_newline_is_rejected() {
        assert!(matches!(
            session("bad\ntoken"),
            Err(ClientError::MalformedResponse(_))
        ));
    }
}
