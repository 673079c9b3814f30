//! Conformance checks.
//!
//! Each check is a linear sequence of dependent API calls ending in a
//! [`Verdict`]. Checks never abort the run: errors are returned to the
//! runner, which records them as failures.
//!
//! # Registry
//!
//! | Name | Verifies |
//! |------|----------|
//! | `order-filter-by-customer` | `GET admin/orders?customer_id=` only returns that customer's orders |
//! | `tenant-scoped-customer-search` | customer search filtered by store-front excludes other tenants |

use core::fmt;
use std::str::FromStr;

use admin_conformance_core::{CheckResult, Outcome};

use crate::error::CheckError;
use crate::fixtures::FixtureBuilder;
use crate::session::Session;

pub mod customer_search;
pub mod order_filter;

/// A registered check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    /// Order listing filtered by customer ID.
    OrderFilterByCustomer,
    /// Customer search scoped to a store-front.
    TenantScopedCustomerSearch,
}

impl CheckKind {
    /// Every check, in run order.
    pub const ALL: [Self; 2] = [Self::OrderFilterByCustomer, Self::TenantScopedCustomerSearch];

    /// Stable name used on the command line and in reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::OrderFilterByCustomer => "order-filter-by-customer",
            Self::TenantScopedCustomerSearch => "tenant-scoped-customer-search",
        }
    }

    /// One-line description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::OrderFilterByCustomer => {
                "Orders filtered by customer_id only return that customer's orders"
            }
            Self::TenantScopedCustomerSearch => {
                "Customer search filtered by store_front_id excludes other store-fronts"
            }
        }
    }

    /// Run the check.
    ///
    /// # Errors
    ///
    /// Returns `CheckError` when an API call, decode, or fixture creation
    /// fails before a verdict could be reached.
    pub async fn run(
        self,
        session: &Session,
        fixtures: &mut FixtureBuilder<'_>,
    ) -> Result<Verdict, CheckError> {
        match self {
            Self::OrderFilterByCustomer => order_filter::run(session).await,
            Self::TenantScopedCustomerSearch => customer_search::run(session, fixtures).await,
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown check name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown check '{0}' (known: order-filter-by-customer, tenant-scoped-customer-search)")]
pub struct UnknownCheck(pub String);

impl FromStr for CheckKind {
    type Err = UnknownCheck;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|check| check.name() == s)
            .ok_or_else(|| UnknownCheck(s.to_owned()))
    }
}

/// Outcome of a check before it is attached to a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Pass, fail, or skip.
    pub outcome: Outcome,
    /// Diagnostic message.
    pub message: String,
    /// Informational observations.
    pub notes: Vec<String>,
}

impl Verdict {
    fn new(outcome: Outcome, message: impl Into<String>) -> Self {
        Self {
            outcome,
            message: message.into(),
            notes: Vec::new(),
        }
    }

    /// Every assertion held.
    pub fn pass(message: impl Into<String>) -> Self {
        Self::new(Outcome::Pass, message)
    }

    /// An assertion failed.
    pub fn fail(message: impl Into<String>) -> Self {
        Self::new(Outcome::Fail, message)
    }

    /// Prerequisite data was missing.
    pub fn skip(message: impl Into<String>) -> Self {
        Self::new(Outcome::Skip, message)
    }

    /// Append an informational note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Append informational notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl IntoIterator<Item = String>) -> Self {
        self.notes.extend(notes);
        self
    }

    /// Attach the check name.
    #[must_use]
    pub fn into_result(self, check: CheckKind) -> CheckResult {
        CheckResult::new(check.name(), self.outcome, self.message).with_notes(self.notes)
    }
}
