//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! prenotification decision test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built dates, claim periods, and engines
//! - `assertions`: Custom assertion helpers for outcomes and flow steps
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use assertions::*;
pub use generators::*;
