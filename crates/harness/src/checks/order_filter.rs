//! Order listing filtered by customer.
//!
//! Relies on orders already present in the service: the most recent order's
//! customer is used as the filter value.

use admin_conformance_core::CustomerId;
use tracing::{info, instrument};

use super::Verdict;
use crate::client::Query;
use crate::error::CheckError;
use crate::resources::Order;
use crate::session::Session;

/// Order listing endpoint.
pub const ORDERS_PATH: &str = "admin/orders";

/// How many recent orders to look at when picking a customer.
pub const RECENT_ORDER_LIMIT: u32 = 5;

/// Run the check.
///
/// # Errors
///
/// Returns `CheckError` if a listing call fails or returns a non-2xx status.
#[instrument(skip_all)]
pub async fn run(session: &Session) -> Result<Verdict, CheckError> {
    let recent = list_orders(
        session,
        &[("limit", RECENT_ORDER_LIMIT.to_string())],
        "list recent orders",
    )
    .await?;

    let Some(first) = recent.first() else {
        return Ok(Verdict::skip("no orders found"));
    };
    // A guest order is missing prerequisite data, not a failure.
    let Some(customer_id) = filter_customer(first).cloned() else {
        return Ok(Verdict::skip("most recent order has no customer_id"));
    };

    info!(%customer_id, "Filtering orders by customer");
    let filtered = list_orders(session, &filter_query(&customer_id), "filter orders by customer")
        .await?;

    Ok(evaluate_filtered_orders(&customer_id, &filtered))
}

/// Customer to filter by, if the order has a usable one.
///
/// A missing, null or empty-string `customer_id` all mean a guest order.
#[must_use]
pub fn filter_customer(order: &Order) -> Option<&CustomerId> {
    order
        .customer_id
        .as_ref()
        .filter(|id| !id.as_raw().is_empty())
}

/// Query for the newest order of one customer.
#[must_use]
pub fn filter_query(customer_id: &CustomerId) -> Vec<(&'static str, String)> {
    vec![
        ("customer_id", customer_id.as_raw().to_query_value()),
        ("limit", "1".to_owned()),
        ("sort", "created_at".to_owned()),
        ("order", "desc".to_owned()),
    ]
}

/// Judge the customer-filtered listing.
///
/// Fails when the list is empty or any order belongs to another customer.
/// Address presence on the first order is reported as a note only.
#[must_use]
pub fn evaluate_filtered_orders(requested: &CustomerId, orders: &[Order]) -> Verdict {
    let Some(first) = orders.first() else {
        return Verdict::fail(format!(
            "filtered order list is empty for customer_id {}",
            describe(Some(requested))
        ));
    };

    if let Some(stray) = orders
        .iter()
        .find(|order| order.customer_id.as_ref() != Some(requested))
    {
        return Verdict::fail(format!(
            "customer_id mismatch: expected {}, got {}",
            describe(Some(requested)),
            describe(stray.customer_id.as_ref())
        ));
    }

    let address_note = if first.has_address() {
        "address data is present"
    } else {
        "address data is missing (may be expected for older orders)"
    };

    Verdict::pass(format!(
        "orders filtered by customer_id {}",
        describe(Some(requested))
    ))
    .with_note(address_note)
}

/// Render an ID in its JSON form so `5` and `"5"` stay distinguishable.
fn describe(id: Option<&CustomerId>) -> String {
    id.map_or_else(
        || "none".to_owned(),
        |id| serde_json::to_string(id).unwrap_or_else(|_| id.to_string()),
    )
}

async fn list_orders(
    session: &Session,
    query: &Query<'_>,
    operation: &'static str,
) -> Result<Vec<Order>, CheckError> {
    let response = session.get(ORDERS_PATH, query).await?;
    if !response.is_success() {
        return Err(CheckError::UnexpectedStatus {
            operation,
            status: response.status(),
            body: response.excerpt(),
        });
    }
    Ok(response.data()?)
}
