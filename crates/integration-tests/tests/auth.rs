//! Login against the fake admin API.

use admin_conformance_harness::{ClientError, Session, authenticate};
use admin_conformance_integration_tests::FakeAdminApi;
use secrecy::{ExposeSecret, SecretString};

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_valid_credentials_yield_session() {
    let api = FakeAdminApi::spawn().await.expect("Failed to spawn fake API");

    let session = api.login().await.expect("Login should succeed");

    assert_eq!(session.access_token().expose_secret(), "fake-admin-token");
    assert_eq!(session.base_url().as_str(), api.base_url());
    assert_eq!(api.requests(), vec!["/api/admin/login".to_owned()]);
}

#[tokio::test]
async fn test_invalid_password_is_authentication_error() {
    let api = FakeAdminApi::spawn().await.expect("Failed to spawn fake API");
    let client = api.client().expect("Failed to build client");

    let err = authenticate(client, &FakeAdminApi::credentials_with("wrong"))
        .await
        .expect_err("Login should fail");

    match err {
        ClientError::Authentication { status, body } => {
            assert_eq!(status.as_u16(), 401);
            assert!(body.contains("invalid credentials"));
        }
        other => panic!("expected authentication error, got {other:?}"),
    }
}

// ============================================================================
// Session headers
// ============================================================================

#[tokio::test]
async fn test_session_token_is_sent_as_bearer() {
    let api = FakeAdminApi::spawn().await.expect("Failed to spawn fake API");
    let session = api.login().await.expect("Login should succeed");

    let response = session
        .get("admin/orders", &[])
        .await
        .expect("Request should complete");
    assert!(response.is_success(), "{}", response.text());
}

#[tokio::test]
async fn test_wrong_token_is_rejected_by_api() {
    let api = FakeAdminApi::spawn().await.expect("Failed to spawn fake API");
    let client = api.client().expect("Failed to build client");
    let session =
        Session::new(client, SecretString::from("stale-token")).expect("Failed to build session");

    let response = session
        .get("admin/orders", &[])
        .await
        .expect("Request should complete");
    assert_eq!(response.status().as_u16(), 401);
}
