//! Spawning and driving the fake.

use std::net::SocketAddr;

use admin_conformance_core::Email;
use admin_conformance_harness::{
    ApiClient, ClientError, Credentials, Session, authenticate, client::DEFAULT_TIMEOUT,
};
use secrecy::SecretString;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::routes;
use crate::state::{Behavior, OrderRow, SharedStore};
use crate::{ADMIN_EMAIL, ADMIN_PASSWORD};

/// A running fake admin API bound to `127.0.0.1` on a free port.
///
/// The server task is aborted on drop.
#[derive(Debug)]
pub struct FakeAdminApi {
    addr: SocketAddr,
    store: SharedStore,
    task: JoinHandle<()>,
}

impl FakeAdminApi {
    /// Spawn a well-behaved fake with no data.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the listener cannot bind.
    pub async fn spawn() -> std::io::Result<Self> {
        Self::spawn_with(Behavior::default()).await
    }

    /// Spawn a fake with the given behavior.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the listener cannot bind.
    pub async fn spawn_with(behavior: Behavior) -> std::io::Result<Self> {
        let store = SharedStore::default();
        store.lock().behavior = behavior;

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = routes::router(store.clone());
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self { addr, store, task })
    }

    /// Base URL including the `/api` prefix.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Replace the behavior of the running server.
    pub fn set_behavior(&self, behavior: Behavior) {
        self.store.lock().behavior = behavior;
    }

    /// Add an order; later orders are more recent.
    pub fn seed_order(&self, customer_id: Option<Value>, address: Option<Value>) {
        let mut store = self.store.lock();
        let id = store.next_id();
        store.orders.push(OrderRow {
            id,
            customer_id,
            address,
        });
    }

    /// Number of store-fronts created so far.
    #[must_use]
    pub fn store_front_count(&self) -> usize {
        self.store.lock().store_fronts.len()
    }

    /// Number of customers created so far.
    #[must_use]
    pub fn customer_count(&self) -> usize {
        self.store.lock().customers.len()
    }

    /// Path and query of every request received, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.store.lock().requests.clone()
    }

    /// Credentials the fake accepts.
    #[must_use]
    pub fn credentials() -> Credentials {
        Self::credentials_with(ADMIN_PASSWORD)
    }

    /// The admin email with an arbitrary password.
    #[must_use]
    #[allow(clippy::missing_panics_doc, clippy::unwrap_used)]
    pub fn credentials_with(password: &str) -> Credentials {
        Credentials {
            email: Email::parse(ADMIN_EMAIL).unwrap(),
            password: SecretString::from(password.to_owned()),
        }
    }

    /// An unauthenticated client pointed at this server.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the client cannot be built.
    pub fn client(&self) -> Result<ApiClient, ClientError> {
        ApiClient::new(&self.base_url(), DEFAULT_TIMEOUT)
    }

    /// Log in with the accepted credentials.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if login fails.
    pub async fn login(&self) -> Result<Session, ClientError> {
        authenticate(self.client()?, &Self::credentials()).await
    }
}

impl Drop for FakeAdminApi {
    fn drop(&mut self) {
        self.task.abort();
    }
}
