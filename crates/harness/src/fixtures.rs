//! Transient test entities.
//!
//! Checks that need data of their own create it through a
//! [`FixtureBuilder`]. Natural keys (names, emails, slugs, phones) carry a
//! [`UniqueTag`] or random digits so repeated runs against the same
//! service do not collide. Nothing is deleted here: every created entity
//! is recorded and handed to an optional [`CleanupHook`] after the run.

use core::fmt;

use admin_conformance_core::{Email, PhoneNumber, ResourceId, StoreFrontId, UniqueTag};
use futures::future::BoxFuture;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{info, instrument, warn};

use crate::client::ApiResponse;
use crate::error::{ClientError, FixtureError};
use crate::resources::{Customer, StoreFront};
use crate::session::Session;

/// Store-front creation endpoint.
pub const STORE_FRONTS_PATH: &str = "admin/storefronts";
/// Customer creation endpoint.
pub const CUSTOMERS_PATH: &str = "admin/customers";

/// Last name given to every customer fixture.
const FIXTURE_LAST_NAME: &str = "Test";
/// Language given to every store-front fixture.
const FIXTURE_LANGUAGE: &str = "en";
/// Domain suffix for store-front fixtures.
const FIXTURE_DOMAIN_SUFFIX: &str = ".localhost";

/// Kind of fixture entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FixtureKind {
    /// A store-front tenant.
    StoreFront,
    /// A customer.
    Customer,
}

impl fmt::Display for FixtureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StoreFront => write!(f, "store-front"),
            Self::Customer => write!(f, "customer"),
        }
    }
}

/// Ledger entry for an entity created during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixtureRecord {
    /// What was created.
    pub kind: FixtureKind,
    /// ID assigned by the API.
    pub id: ResourceId,
    /// Human-readable natural key (name or first name).
    pub label: String,
}

/// Collaborator that may remove fixtures after a run.
///
/// The harness never deletes anything itself; implementors decide what, if
/// anything, to do with the ledger.
pub trait CleanupHook: Send + Sync {
    /// Called once after all checks ran, with every fixture they created.
    fn cleanup<'a>(
        &'a self,
        session: &'a Session,
        fixtures: &'a [FixtureRecord],
    ) -> BoxFuture<'a, ()>;
}

/// Creates fixtures through an authenticated session and records them.
#[derive(Debug)]
pub struct FixtureBuilder<'a> {
    session: &'a Session,
    created: Vec<FixtureRecord>,
}

impl<'a> FixtureBuilder<'a> {
    /// Create a builder with an empty ledger.
    #[must_use]
    pub const fn new(session: &'a Session) -> Self {
        Self {
            session,
            created: Vec::new(),
        }
    }

    /// Fixtures created so far, in creation order.
    #[must_use]
    pub fn created(&self) -> &[FixtureRecord] {
        &self.created
    }

    /// Consume the builder and return its ledger.
    #[must_use]
    pub fn into_records(self) -> Vec<FixtureRecord> {
        self.created
    }

    /// Create a store-front with the given name and currency.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError::Rejected` on a non-2xx response and
    /// `FixtureError::Client` on transport or decode failure.
    #[instrument(skip(self))]
    pub async fn create_store_front(
        &mut self,
        name: &str,
        currency: &str,
    ) -> Result<StoreFront, FixtureError> {
        let kind = FixtureKind::StoreFront;
        let response = self
            .session
            .post(STORE_FRONTS_PATH, &store_front_payload(name, currency))
            .await
            .map_err(|source| FixtureError::Client { kind, source })?;

        let store_front: StoreFront = decode_created(kind, &response)?;
        info!(id = %store_front.id, name, "Store-front created");
        self.record(kind, store_front.id.as_raw().clone(), name);
        Ok(store_front)
    }

    /// Create a store-front named `"{name} {unique tag}"`.
    ///
    /// # Errors
    ///
    /// See [`Self::create_store_front`].
    pub async fn create_store_front_unique(
        &mut self,
        name: &str,
        currency: &str,
    ) -> Result<StoreFront, FixtureError> {
        let unique_name = format!("{name} {}", UniqueTag::now());
        self.create_store_front(&unique_name, currency).await
    }

    /// Create a customer under a store-front.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError::Rejected` on a non-2xx response and
    /// `FixtureError::Client` on transport or decode failure.
    #[instrument(skip(self))]
    pub async fn create_customer(
        &mut self,
        first_name: &str,
        phone: &PhoneNumber,
        store_front_id: &StoreFrontId,
    ) -> Result<Customer, FixtureError> {
        let kind = FixtureKind::Customer;
        let response = self
            .session
            .post(
                CUSTOMERS_PATH,
                &customer_payload(first_name, phone, store_front_id),
            )
            .await
            .map_err(|source| FixtureError::Client { kind, source })?;

        let customer: Customer = decode_created(kind, &response)?;
        info!(id = %customer.id, first_name, "Customer created");
        self.record(kind, customer.id.as_raw().clone(), first_name);
        Ok(customer)
    }

    /// Create a customer named `"{prefix}{unique tag}"` with a random
    /// `010` phone number.
    ///
    /// # Errors
    ///
    /// See [`Self::create_customer`].
    pub async fn create_customer_unique(
        &mut self,
        prefix: &str,
        store_front_id: &StoreFrontId,
    ) -> Result<Customer, FixtureError> {
        let first_name = format!("{prefix}{}", UniqueTag::now());
        let phone = PhoneNumber::generate(&mut rand::rng());
        self.create_customer(&first_name, &phone, store_front_id)
            .await
    }

    fn record(&mut self, kind: FixtureKind, id: ResourceId, label: &str) {
        self.created.push(FixtureRecord {
            kind,
            id,
            label: label.to_owned(),
        });
    }
}

/// Turn a create response into the created entity.
fn decode_created<T: serde::de::DeserializeOwned>(
    kind: FixtureKind,
    response: &ApiResponse,
) -> Result<T, FixtureError> {
    if !response.is_success() {
        warn!(%kind, status = %response.status(), "Fixture creation rejected");
        return Err(FixtureError::Rejected {
            kind,
            status: response.status(),
            body: response.excerpt(),
        });
    }
    response
        .data()
        .map_err(|source: ClientError| FixtureError::Client { kind, source })
}

/// URL-safe slug: lowercase with spaces turned into dashes.
#[must_use]
pub fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Request body for `POST admin/storefronts`.
#[must_use]
pub fn store_front_payload(name: &str, currency: &str) -> Value {
    let slug = slugify(name);
    json!({
        "name": name,
        "currency": currency,
        "domain": format!("{slug}{FIXTURE_DOMAIN_SUFFIX}"),
        "slug": slug,
        "default_language": FIXTURE_LANGUAGE,
    })
}

/// Request body for `POST admin/customers`.
#[must_use]
pub fn customer_payload(first_name: &str, phone: &PhoneNumber, store_front_id: &StoreFrontId) -> Value {
    json!({
        "first_name": first_name,
        "last_name": FIXTURE_LAST_NAME,
        "email": Email::fixture(first_name),
        "phone": phone,
        "store_front_id": store_front_id,
    })
}
