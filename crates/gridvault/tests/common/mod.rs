//! Shared test utilities for gridvault integration tests.
//!
//! This module provides:
//! - `TestHarness` for isolated test execution with a temp storage root
//!   and an in-memory catalog
//! - Builder helpers for creating test configs and uploads

pub mod builders;
pub mod harness;

pub use builders::*;
pub use harness::TestHarness;
