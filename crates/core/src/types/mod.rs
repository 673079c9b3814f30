//! Core types for the conformance harness.
//!
//! This module provides type-safe wrappers for identifiers, fixture keys,
//! and check outcomes.

pub mod email;
pub mod id;
pub mod outcome;
pub mod phone;
pub mod unique;

pub use email::{Email, EmailError};
pub use id::*;
pub use outcome::{CheckResult, Outcome, Summary};
pub use phone::{PhoneError, PhoneNumber};
pub use unique::UniqueTag;
