//! Admin API resource shapes.
//!
//! Only the fields the checks assert on are typed; everything else the API
//! returns is kept in `attributes` untouched.

use admin_conformance_core::{CustomerId, OrderId, StoreFrontId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An order as returned by `GET admin/orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order ID.
    #[serde(default)]
    pub id: Option<OrderId>,
    /// Owning customer, if any.
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
    /// Shipping/billing address payload, shape owned by the API.
    #[serde(default)]
    pub address: Option<Value>,
    /// Remaining fields.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Order {
    /// Whether the order carries non-empty address data.
    #[must_use]
    pub fn has_address(&self) -> bool {
        match &self.address {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(a)) => !a.is_empty(),
            Some(Value::Object(o)) => !o.is_empty(),
        }
    }
}

/// A store-front (tenant) fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreFront {
    /// Store-front ID.
    pub id: StoreFrontId,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Remaining fields.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// A customer, either a fixture or a search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Customer ID.
    pub id: CustomerId,
    /// Owning store-front.
    #[serde(default)]
    pub store_front_id: Option<StoreFrontId>,
    /// First name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Remaining fields.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn order(value: Value) -> Order {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_order_without_customer() {
        let o = order(json!({"id": 1, "total": "10.00"}));
        assert!(o.customer_id.is_none());
        assert_eq!(o.attributes.get("total"), Some(&json!("10.00")));
    }

    #[test]
    fn test_order_null_customer() {
        assert!(order(json!({"id": 1, "customer_id": null})).customer_id.is_none());
    }

    #[test]
    fn test_has_address() {
        assert!(!order(json!({"id": 1})).has_address());
        assert!(!order(json!({"id": 1, "address": null})).has_address());
        assert!(!order(json!({"id": 1, "address": {}})).has_address());
        assert!(!order(json!({"id": 1, "address": ""})).has_address());
        assert!(order(json!({"id": 1, "address": {"city": "Cairo"}})).has_address());
        assert!(order(json!({"id": 1, "address": "12 Nile St"})).has_address());
    }

    #[test]
    fn test_customer_keeps_unknown_fields() {
        let c: Customer = serde_json::from_value(json!({
            "id": "cus_1",
            "store_front_id": 9,
            "first_name": "CustA1",
            "phone": "01012345678"
        }))
        .unwrap();
        assert_eq!(c.id, CustomerId::from("cus_1"));
        assert_eq!(c.store_front_id, Some(StoreFrontId::from(9)));
        assert_eq!(c.attributes.get("phone"), Some(&json!("01012345678")));
    }
}
