//! Customer search scoped to a store-front.
//!
//! Builds two fresh tenants with one customer each, then searches with the
//! first tenant as filter. Leftover customers from earlier runs may match
//! the search term; only the two fresh customers are asserted on.

use admin_conformance_core::CustomerId;
use tracing::{info, instrument};

use super::Verdict;
use crate::error::CheckError;
use crate::fixtures::FixtureBuilder;
use crate::resources::Customer;
use crate::session::Session;

/// Customer search endpoint.
pub const SEARCH_PATH: &str = "admin/customers/search";

/// Substring shared by both fixture customers' first names.
pub const SEARCH_TERM: &str = "Cust";

/// Run the check.
///
/// # Errors
///
/// Returns `CheckError` if a fixture cannot be created, the filtered search
/// returns a non-2xx status, or a call fails at the transport level.
#[instrument(skip_all)]
pub async fn run(
    session: &Session,
    fixtures: &mut FixtureBuilder<'_>,
) -> Result<Verdict, CheckError> {
    let home = fixtures.create_store_front_unique("Store A", "USD").await?;
    let other = fixtures.create_store_front_unique("Store B", "EUR").await?;

    let included = fixtures.create_customer_unique("CustA", &home.id).await?;
    let excluded = fixtures.create_customer_unique("CustB", &other.id).await?;
    info!(
        home = %home.id,
        other = %other.id,
        included = %included.id,
        excluded = %excluded.id,
        "Fixtures ready"
    );

    let mut notes = Vec::new();

    // The unfiltered count depends on leftovers; record it, never assert it.
    let unfiltered = session.get(SEARCH_PATH, &[("q", SEARCH_TERM.to_owned())]).await?;
    if unfiltered.is_success() {
        match unfiltered.data::<Vec<Customer>>() {
            Ok(all) => notes.push(format!(
                "unfiltered search for '{SEARCH_TERM}' found {} customers",
                all.len()
            )),
            Err(err) => notes.push(format!("unfiltered search response unreadable: {err}")),
        }
    } else {
        notes.push(format!(
            "unfiltered search returned HTTP {}",
            unfiltered.status()
        ));
    }

    let scoped = session
        .get(
            SEARCH_PATH,
            &[
                ("q", SEARCH_TERM.to_owned()),
                ("store_front_id", home.id.as_raw().to_query_value()),
            ],
        )
        .await?;
    if !scoped.is_success() {
        return Err(CheckError::UnexpectedStatus {
            operation: "search customers by store-front",
            status: scoped.status(),
            body: scoped.excerpt(),
        });
    }
    let results: Vec<Customer> = scoped.data()?;
    notes.push(format!(
        "search for '{SEARCH_TERM}' in store-front {} found {} customers",
        home.id,
        results.len()
    ));

    Ok(evaluate_scoped_search(&results, &included.id, &excluded.id).with_notes(notes))
}

/// Judge a store-front filtered search.
///
/// Passes only if `included` is present and `excluded` is absent.
#[must_use]
pub fn evaluate_scoped_search(
    results: &[Customer],
    included: &CustomerId,
    excluded: &CustomerId,
) -> Verdict {
    let found_included = results.iter().any(|c| &c.id == included);
    let found_excluded = results.iter().any(|c| &c.id == excluded);

    match (found_included, found_excluded) {
        (true, false) => Verdict::pass(format!(
            "filtered search found customer {included} and excluded customer {excluded}"
        )),
        (false, false) => Verdict::fail(format!(
            "customer {included} missing from its own store-front's results"
        )),
        (true, true) => Verdict::fail(format!(
            "customer {excluded} from another store-front leaked into the results"
        )),
        (false, true) => Verdict::fail(format!(
            "customer {included} missing from its own store-front's results and \
             customer {excluded} from another store-front leaked into them"
        )),
    }
}
