//! In-process fake of the e-commerce admin API.
//!
//! Tests spawn a [`FakeAdminApi`] on an ephemeral port and point the harness
//! at it. The fake keeps orders, store-fronts and customers in memory and
//! can be told to misbehave through [`Behavior`], which is how the failing
//! paths of each check are exercised.
//!
//! # Example
//!
//! ```rust,ignore
//! let api = FakeAdminApi::spawn().await?;
//! api.seed_order(Some(json!("C1")), Some(json!({"city": "Cairo"})));
//! let session = api.login().await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod routes;
mod server;
mod state;

pub use server::FakeAdminApi;
pub use routes::SEARCH_LIMIT;
pub use state::Behavior;

/// Admin account the fake accepts.
pub const ADMIN_EMAIL: &str = "admin@onashomes.com";
/// Password for [`ADMIN_EMAIL`].
pub const ADMIN_PASSWORD: &str = "admin123";
