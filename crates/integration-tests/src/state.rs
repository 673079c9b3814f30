//! In-memory data behind the fake API.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use serde_json::{Value, json};

/// Knobs that make the fake deviate from a correct backend.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Behavior {
    /// Render every ID as a JSON string instead of a number.
    pub string_ids: bool,
    /// List every order newest first, ignoring `customer_id` and `limit`.
    pub ignore_order_filters: bool,
    /// Return matches from every store-front regardless of `store_front_id`.
    pub ignore_tenant_filter: bool,
    /// Answer every create with 422.
    pub reject_creates: bool,
}

#[derive(Debug, Clone)]
pub struct OrderRow {
    pub id: i64,
    pub customer_id: Option<Value>,
    pub address: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct StoreFrontRow {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub currency: String,
}

#[derive(Debug, Clone)]
pub struct CustomerRow {
    pub id: i64,
    pub store_front_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl CustomerRow {
    /// Whether a lowercased search term occurs in the name or phone.
    pub fn matches(&self, term: &str) -> bool {
        [&self.first_name, &self.last_name, &self.phone]
            .iter()
            .any(|field| field.to_lowercase().contains(term))
    }
}

/// Everything the fake knows.
#[derive(Debug, Default)]
pub struct Store {
    pub behavior: Behavior,
    pub orders: Vec<OrderRow>,
    pub store_fronts: Vec<StoreFrontRow>,
    pub customers: Vec<CustomerRow>,
    /// Path and query of every request, in arrival order.
    pub requests: Vec<String>,
    next_id: i64,
}

impl Store {
    pub const fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    /// An ID as the API renders it.
    pub fn render_id(&self, id: i64) -> Value {
        if self.behavior.string_ids {
            json!(id.to_string())
        } else {
            json!(id)
        }
    }

    pub fn order_json(&self, order: &OrderRow) -> Value {
        json!({
            "id": self.render_id(order.id),
            "customer_id": order.customer_id,
            "address": order.address,
            "created_at": created_at(order.id).to_rfc3339(),
        })
    }

    pub fn store_front_json(&self, store_front: &StoreFrontRow) -> Value {
        json!({
            "id": self.render_id(store_front.id),
            "name": store_front.name,
            "slug": store_front.slug,
            "currency": store_front.currency,
        })
    }

    pub fn customer_json(&self, customer: &CustomerRow) -> Value {
        json!({
            "id": self.render_id(customer.id),
            "store_front_id": self.render_id(customer.store_front_id),
            "first_name": customer.first_name,
            "last_name": customer.last_name,
            "email": customer.email,
            "phone": customer.phone,
        })
    }
}

/// Creation time grows with the ID so newest-first equals highest ID first.
fn created_at(id: i64) -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + Duration::days(19_000) + Duration::minutes(id)
}

/// Shared handle used by the router and the test-facing API.
#[derive(Debug, Clone, Default)]
pub struct SharedStore(Arc<Mutex<Store>>);

impl SharedStore {
    pub fn lock(&self) -> MutexGuard<'_, Store> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Parse an ID sent as either a JSON number or a JSON string.
pub fn id_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// The raw text form used when matching query parameters.
pub fn value_as_query(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
