//! Opaque identifiers for API resources.
//!
//! The admin API decides what an identifier looks like (numeric row IDs,
//! UUID strings, ...). The harness never interprets them: an ID is kept in
//! exactly the JSON form the API returned so it round-trips unchanged into
//! later filter queries.
//!
//! Use the `define_id!` macro to create type-safe wrappers that prevent
//! accidentally passing a customer ID where a store-front ID is expected.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A raw identifier as returned by the API.
///
/// Equality is exact: the number `5` and the string `"5"` are different IDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    /// A JSON number.
    Number(serde_json::Number),
    /// A JSON string.
    Text(String),
}

impl ResourceId {
    /// Render the ID the way it appears in a query string.
    #[must_use]
    pub fn to_query_value(&self) -> String {
        self.to_string()
    }

    /// Whether the ID is an empty string, which the API uses for "none".
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_owned())
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

impl From<i64> for ResourceId {
    fn from(id: i64) -> Self {
        Self::Number(id.into())
    }
}

/// Macro to define a type-safe resource ID wrapper.
///
/// Creates a newtype around [`ResourceId`] with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - `Display` matching the query-string form
/// - `From<ResourceId>`, `From<&str>`, and `From<i64>`
///
/// # Example
///
/// ```rust
/// # use admin_conformance_core::define_id;
/// define_id!(WidgetId);
///
/// let id = WidgetId::from("w_1");
/// assert_eq!(id.to_string(), "w_1");
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name($crate::ResourceId);

        impl $name {
            /// Wrap a raw resource ID.
            #[must_use]
            pub const fn new(id: $crate::ResourceId) -> Self {
                Self(id)
            }

            /// Get the underlying raw ID.
            #[must_use]
            pub const fn as_raw(&self) -> &$crate::ResourceId {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<$crate::ResourceId> for $name {
            fn from(id: $crate::ResourceId) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self($crate::ResourceId::from(id))
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self($crate::ResourceId::from(id))
            }
        }
    };
}

define_id!(StoreFrontId);
define_id!(CustomerId);
define_id!(OrderId);
