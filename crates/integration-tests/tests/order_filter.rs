//! Order-filter-by-customer check against the fake admin API.

#![allow(clippy::indexing_slicing)]

use admin_conformance_core::{CheckResult, Outcome};
use admin_conformance_harness::{CheckKind, Runner, Session};
use admin_conformance_integration_tests::{Behavior, FakeAdminApi};
use secrecy::SecretString;
use serde_json::json;

async fn run_check(api: &FakeAdminApi) -> CheckResult {
    let session = api.login().await.expect("Login should succeed");
    let mut report = Runner::new(&session, [CheckKind::OrderFilterByCustomer])
        .run()
        .await;
    assert_eq!(report.results.len(), 1);
    report.results.remove(0)
}

// ============================================================================
// Missing prerequisite data
// ============================================================================

#[tokio::test]
async fn test_no_orders_is_skip() {
    let api = FakeAdminApi::spawn().await.expect("Failed to spawn fake API");

    let result = run_check(&api).await;

    assert_eq!(result.outcome, Outcome::Skip);
    assert_eq!(result.message, "no orders found");
    // No filtered listing is attempted.
    assert_eq!(
        api.requests(),
        vec![
            "/api/admin/login".to_owned(),
            "/api/admin/orders?limit=5".to_owned()
        ]
    );
}

#[tokio::test]
async fn test_guest_order_is_skip() {
    let api = FakeAdminApi::spawn().await.expect("Failed to spawn fake API");
    api.seed_order(Some(json!("C1")), None);
    api.seed_order(None, Some(json!({"city": "Cairo"})));

    let result = run_check(&api).await;

    assert_eq!(result.outcome, Outcome::Skip);
    assert!(result.message.contains("customer_id"), "{}", result.message);
}

#[tokio::test]
async fn test_empty_customer_id_is_skip() {
    let api = FakeAdminApi::spawn().await.expect("Failed to spawn fake API");
    api.seed_order(Some(json!("")), Some(json!({"city": "Cairo"})));

    let result = run_check(&api).await;

    assert_eq!(result.outcome, Outcome::Skip);
    assert!(!api.requests().iter().any(|r| r.contains("customer_id=")));
}

// ============================================================================
// Filtering
// ============================================================================

#[tokio::test]
async fn test_filtered_orders_pass_with_address_note() {
    let api = FakeAdminApi::spawn().await.expect("Failed to spawn fake API");
    api.seed_order(Some(json!("C2")), None);
    api.seed_order(Some(json!("C1")), Some(json!({"city": "Cairo", "street": "Tahrir"})));

    let result = run_check(&api).await;

    assert_eq!(result.outcome, Outcome::Pass, "{}", result.message);
    assert_eq!(result.notes, vec!["address data is present".to_owned()]);
    assert!(
        api.requests()
            .contains(&"/api/admin/orders?customer_id=C1&limit=1&sort=created_at&order=desc".to_owned())
    );
}

#[tokio::test]
async fn test_missing_address_is_only_a_note() {
    let api = FakeAdminApi::spawn().await.expect("Failed to spawn fake API");
    api.seed_order(Some(json!(42)), None);

    let result = run_check(&api).await;

    assert_eq!(result.outcome, Outcome::Pass, "{}", result.message);
    assert!(result.notes[0].contains("missing"));
}

#[tokio::test]
async fn test_numeric_customer_id_round_trips() {
    let api = FakeAdminApi::spawn_with(Behavior {
        string_ids: true,
        ..Behavior::default()
    })
    .await
    .expect("Failed to spawn fake API");
    api.seed_order(Some(json!(7)), Some(json!({"city": "Alexandria"})));

    let result = run_check(&api).await;

    assert_eq!(result.outcome, Outcome::Pass, "{}", result.message);
    assert!(result.message.contains("customer_id 7"), "{}", result.message);
}

#[tokio::test]
async fn test_ignored_customer_filter_is_fail() {
    let api = FakeAdminApi::spawn_with(Behavior {
        ignore_order_filters: true,
        ..Behavior::default()
    })
    .await
    .expect("Failed to spawn fake API");
    api.seed_order(Some(json!("C2")), None);
    api.seed_order(Some(json!("C1")), None);

    let result = run_check(&api).await;

    assert_eq!(result.outcome, Outcome::Fail);
    assert_eq!(
        result.message,
        r#"customer_id mismatch: expected "C1", got "C2""#
    );
}

#[tokio::test]
async fn test_rejected_token_is_fail_not_abort() {
    let api = FakeAdminApi::spawn().await.expect("Failed to spawn fake API");
    let client = api.client().expect("Failed to build client");
    let session = Session::new(client, SecretString::from("stale"))
        .expect("Failed to build session");

    let report = Runner::new(&session, CheckKind::ALL).run().await;

    assert_eq!(report.results.len(), 2);
    assert_eq!(report.results[0].outcome, Outcome::Fail);
    assert!(report.results[0].message.contains("401"), "{}", report.results[0].message);
}
