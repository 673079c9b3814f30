//! Admin Conformance Harness library.
//!
//! Runs named, ordered checks against a live e-commerce admin API and
//! reports pass/fail/skip per check.
//!
//! # Flow
//!
//! 1. [`config::HarnessConfig`] is loaded from the environment.
//! 2. [`auth::authenticate`] logs in once and yields an immutable [`Session`].
//! 3. [`runner::Runner`] executes each [`checks::CheckKind`] in order, giving
//!    each a fresh [`fixtures::FixtureBuilder`].
//! 4. [`report::write_report`] renders the [`runner::RunReport`].
//!
//! Every HTTP call is a single attempt with a fixed timeout; nothing is
//! retried and nothing runs concurrently.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod checks;
pub mod client;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod report;
pub mod resources;
pub mod runner;
pub mod session;

pub use auth::{Credentials, authenticate};
pub use checks::{CheckKind, Verdict};
pub use client::{ApiClient, ApiResponse};
pub use config::{ConfigError, ConfigOverrides, HarnessConfig};
pub use error::{CheckError, ClientError, FixtureError};
pub use fixtures::{CleanupHook, FixtureBuilder, FixtureKind, FixtureRecord};
pub use report::{ReportFormat, write_report};
pub use runner::{RunReport, Runner};
pub use session::Session;
