//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! person registry test suite.
//!
//! # Modules
//!
//! - `fixtures`: Known-good CPFs, postal codes, addresses and dates
//! - `builders`: Builder patterns for records, inputs and lookup ports
//! - `assertions`: Custom assertion helpers for field errors
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
