//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Why manual mocks instead of mockall?
//! - mockall has lifetime issues with traits containing `&str` parameters
//! - Manual mocks are more explicit and easier to debug
//!
//! The in-memory adapter in `adapters::memory` covers the happy path; the mocks
//! here only simulate a broken store.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
