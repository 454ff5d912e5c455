//! In-memory adapters
//!
//! Process-local storage with the same semantics as the PostgreSQL adapter.
//! Used by the `memory` storage backend and throughout the test suite.

pub mod franquicia_repo;

pub use franquicia_repo::InMemoryFranquiciaRepository;
