//! Admin login.
//!
//! Exchanges email/password credentials for a bearer token and wraps it in
//! a [`Session`].

use admin_conformance_core::Email;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use tracing::{info, instrument};

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::session::Session;

/// Login endpoint, relative to the API base URL.
pub const LOGIN_PATH: &str = "admin/login";

/// JSON pointer to the token inside the login response.
const TOKEN_POINTER: &str = "/data/access_token";

/// Admin login credentials.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct Credentials {
    /// Admin account email.
    pub email: Email,
    /// Admin account password.
    pub password: SecretString,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Log in and build a session.
///
/// Single attempt, no retry.
///
/// # Errors
///
/// Returns `ClientError::Authentication` on a non-2xx login response,
/// `ClientError::MalformedResponse` if the response has no usable
/// `data.access_token`, or `ClientError::Transport` on network failure.
#[instrument(skip(client, credentials), fields(email = %credentials.email))]
pub async fn authenticate(
    client: ApiClient,
    credentials: &Credentials,
) -> Result<Session, ClientError> {
    let body = json!({
        "email": credentials.email.as_str(),
        "password": credentials.password.expose_secret(),
    });

    let response = client
        .request(reqwest::Method::POST, LOGIN_PATH, &[], Some(&body), None)
        .await?;

    if !response.is_success() {
        return Err(ClientError::Authentication {
            status: response.status(),
            body: response.excerpt(),
        });
    }

    let payload: Value = response.json().map_err(|_| {
        ClientError::MalformedResponse(format!("login response is not JSON: {}", response.excerpt()))
    })?;
    let token = extract_token(&payload)?;

    info!("Login successful");
    Session::new(client, token)
}

/// Pull a non-empty access token out of a login response body.
fn extract_token(payload: &Value) -> Result<SecretString, ClientError> {
    payload
        .pointer(TOKEN_POINTER)
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
        .map(SecretString::from)
        .ok_or_else(|| {
            ClientError::MalformedResponse("missing data.access_token in login response".into())
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_token() {
        let token = extract_token(&json!({"data": {"access_token": "abc"}})).unwrap();
        assert_eq!(token.expose_secret(), "abc");
    }

    #[test]
    fn test_extract_token_missing_field() {
        for payload in [
            json!({}),
            json!({"data": {}}),
            json!({"data": {"access_token": null}}),
            json!({"data": {"access_token": 12}}),
            json!({"data": {"access_token": ""}}),
            json!({"access_token": "top-level"}),
        ] {
            assert!(matches!(
                extract_token(&payload),
                Err(ClientError::MalformedResponse(_))
            ));
        }
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials {
            email: Email::parse("admin@onashomes.com").unwrap(),
            password: SecretString::from("admin123"),
        };
        let debug = format!("{credentials:?}");
        assert!(!debug.contains("admin123"));
        assert!(debug.contains("[REDACTED]"));
    }
}
