//! Admin Conformance Core - Shared types library.
//!
//! This crate provides the types shared by the conformance components:
//! - `harness` - HTTP client, session, fixtures, checks, and reporting
//! - `cli` - The `conformance` command-line runner
//! - `integration-tests` - Fake admin API and end-to-end tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O and no HTTP clients. This
//! keeps it lightweight and usable from both the harness and its tests.
//!
//! # Modules
//!
//! - [`types`] - Opaque resource IDs, emails, phone numbers, unique tags, and outcomes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
