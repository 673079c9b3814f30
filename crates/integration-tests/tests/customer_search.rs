//! Tenant-scoped customer search check against the fake admin API.

#![allow(clippy::indexing_slicing)]

use admin_conformance_core::{CheckResult, CustomerId, Outcome, PhoneNumber};
use admin_conformance_harness::checks::customer_search::{
    SEARCH_PATH, SEARCH_TERM, evaluate_scoped_search,
};
use admin_conformance_harness::resources::Customer;
use admin_conformance_harness::{CheckKind, FixtureBuilder, FixtureKind, RunReport, Runner};
use admin_conformance_integration_tests::{Behavior, FakeAdminApi, SEARCH_LIMIT};

async fn run_search_check(api: &FakeAdminApi) -> RunReport {
    let session = api.login().await.expect("Login should succeed");
    Runner::new(&session, [CheckKind::TenantScopedCustomerSearch])
        .run()
        .await
}

fn only_result(report: &RunReport) -> &CheckResult {
    assert_eq!(report.results.len(), 1);
    &report.results[0]
}

// ============================================================================
// Passing backend
// ============================================================================

#[tokio::test]
async fn test_scoped_search_passes() {
    let api = FakeAdminApi::spawn().await.expect("Failed to spawn fake API");

    let report = run_search_check(&api).await;
    let result = only_result(&report);

    assert_eq!(result.outcome, Outcome::Pass, "{}", result.message);
    assert_eq!(api.store_front_count(), 2);
    assert_eq!(api.customer_count(), 2);
    assert!(
        result
            .notes
            .iter()
            .any(|n| n == "unfiltered search for 'Cust' found 2 customers"),
        "{:?}",
        result.notes
    );
}

#[tokio::test]
async fn test_fixtures_are_recorded_in_creation_order() {
    let api = FakeAdminApi::spawn().await.expect("Failed to spawn fake API");

    let report = run_search_check(&api).await;

    let kinds: Vec<_> = report.fixtures.iter().map(|f| f.kind).collect();
    assert_eq!(
        kinds,
        vec![
            FixtureKind::StoreFront,
            FixtureKind::StoreFront,
            FixtureKind::Customer,
            FixtureKind::Customer
        ]
    );
    assert!(report.fixtures[0].label.starts_with("Store A "));
    assert!(report.fixtures[1].label.starts_with("Store B "));
    assert!(report.fixtures[2].label.starts_with("CustA"));
    assert!(report.fixtures[3].label.starts_with("CustB"));
}

#[tokio::test]
async fn test_repeated_runs_do_not_collide() {
    let api = FakeAdminApi::spawn().await.expect("Failed to spawn fake API");

    let first = run_search_check(&api).await;
    let second = run_search_check(&api).await;

    assert_eq!(only_result(&first).outcome, Outcome::Pass);
    assert_eq!(
        only_result(&second).outcome,
        Outcome::Pass,
        "{}",
        only_result(&second).message
    );
    assert_eq!(api.store_front_count(), 4);
    assert_eq!(api.customer_count(), 4);
}

#[tokio::test]
async fn test_string_ids_pass() {
    let api = FakeAdminApi::spawn_with(Behavior {
        string_ids: true,
        ..Behavior::default()
    })
    .await
    .expect("Failed to spawn fake API");

    let report = run_search_check(&api).await;
    let result = only_result(&report);

    assert_eq!(result.outcome, Outcome::Pass, "{}", result.message);
    // String IDs are sent back unquoted.
    let home = &report.fixtures[0].id;
    assert!(
        api.requests()
            .iter()
            .any(|r| r.ends_with(&format!("store_front_id={home}")))
    );
}

// ============================================================================
// Failing backend
// ============================================================================

#[tokio::test]
async fn test_leaked_tenant_is_fail() {
    let api = FakeAdminApi::spawn_with(Behavior {
        ignore_tenant_filter: true,
        ..Behavior::default()
    })
    .await
    .expect("Failed to spawn fake API");

    let report = run_search_check(&api).await;
    let result = only_result(&report);

    assert_eq!(result.outcome, Outcome::Fail);
    assert!(result.message.contains("leaked"), "{}", result.message);
    assert!(!result.message.contains("missing"), "{}", result.message);
}

#[tokio::test]
async fn test_rejected_fixture_is_fail() {
    let api = FakeAdminApi::spawn_with(Behavior {
        reject_creates: true,
        ..Behavior::default()
    })
    .await
    .expect("Failed to spawn fake API");

    let report = run_search_check(&api).await;
    let result = only_result(&report);

    assert_eq!(result.outcome, Outcome::Fail);
    assert!(
        result.message.starts_with("store-front creation rejected: HTTP 422"),
        "{}",
        result.message
    );
    assert!(report.fixtures.is_empty());
    // No search happens after the first fixture fails.
    assert!(!api.requests().iter().any(|r| r.contains("search")));
}

#[tokio::test]
async fn test_fixtures_before_failure_are_kept_in_ledger() {
    let api = FakeAdminApi::spawn().await.expect("Failed to spawn fake API");
    let session = api.login().await.expect("Login should succeed");
    let mut fixtures = FixtureBuilder::new(&session);

    fixtures
        .create_store_front_unique("Store A", "USD")
        .await
        .expect("First store-front should be created");
    api.set_behavior(Behavior {
        reject_creates: true,
        ..Behavior::default()
    });
    let err = fixtures
        .create_store_front_unique("Store B", "EUR")
        .await
        .expect_err("Second store-front should be rejected");

    assert!(err.to_string().contains("422"), "{err}");
    assert_eq!(fixtures.created().len(), 1);
    assert_eq!(fixtures.created()[0].kind, FixtureKind::StoreFront);
}

#[tokio::test]
async fn test_empty_store_front_search_is_fail() {
    let api = FakeAdminApi::spawn().await.expect("Failed to spawn fake API");
    let session = api.login().await.expect("Login should succeed");
    let mut fixtures = FixtureBuilder::new(&session);

    let home = fixtures
        .create_store_front_unique("Store A", "USD")
        .await
        .expect("Store-front should be created");
    let other = fixtures
        .create_store_front_unique("Store B", "EUR")
        .await
        .expect("Store-front should be created");
    let excluded = fixtures
        .create_customer_unique("CustB", &other.id)
        .await
        .expect("Customer should be created");

    let response = session
        .get(
            SEARCH_PATH,
            &[
                ("q", SEARCH_TERM.to_owned()),
                ("store_front_id", home.id.to_string()),
            ],
        )
        .await
        .expect("Search should complete");
    let results: Vec<Customer> = response.data().expect("Search should decode");
    assert!(results.is_empty());

    let verdict = evaluate_scoped_search(&results, &CustomerId::from("never-created"), &excluded.id);
    assert_eq!(verdict.outcome, Outcome::Fail);
    assert!(verdict.message.contains("missing"), "{}", verdict.message);
}

// ============================================================================
// Search matching
// ============================================================================

#[tokio::test]
async fn test_search_matches_name_and_phone_ignoring_case() {
    let api = FakeAdminApi::spawn().await.expect("Failed to spawn fake API");
    let session = api.login().await.expect("Login should succeed");
    let mut fixtures = FixtureBuilder::new(&session);
    let store_front = fixtures
        .create_store_front_unique("Store A", "USD")
        .await
        .expect("Store-front should be created");
    let phone = PhoneNumber::parse("01055501234").expect("Phone should parse");
    fixtures
        .create_customer("Mona", &phone, &store_front.id)
        .await
        .expect("Customer should be created");

    for (term, expected) in [("mona", 1), ("MON", 1), ("test", 1), ("5550123", 1), ("nobody", 0)] {
        let response = session
            .get(SEARCH_PATH, &[("q", term.to_owned())])
            .await
            .expect("Search should complete");
        let results: Vec<Customer> = response.data().expect("Search should decode");
        assert_eq!(results.len(), expected, "search for {term}");
    }
}

#[tokio::test]
async fn test_search_is_capped_newest_first() {
    let api = FakeAdminApi::spawn().await.expect("Failed to spawn fake API");
    let session = api.login().await.expect("Login should succeed");
    let mut fixtures = FixtureBuilder::new(&session);
    let store_front = fixtures
        .create_store_front_unique("Store A", "USD")
        .await
        .expect("Store-front should be created");

    for i in 0..12 {
        let phone = PhoneNumber::parse(&format!("0105555{i:04}")).expect("Phone should parse");
        fixtures
            .create_customer(&format!("Cust{i:02}"), &phone, &store_front.id)
            .await
            .expect("Customer should be created");
    }

    let response = session
        .get(SEARCH_PATH, &[("q", SEARCH_TERM.to_owned())])
        .await
        .expect("Search should complete");
    let results: Vec<Customer> = response.data().expect("Search should decode");
    assert_eq!(results.len(), SEARCH_LIMIT);
    assert_eq!(results[0].first_name.as_deref(), Some("Cust11"));
}
