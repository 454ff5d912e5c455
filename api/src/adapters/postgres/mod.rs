//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod franquicia_repo;

#[cfg(test)]
mod integration_tests;

pub use franquicia_repo::PostgresFranquiciaRepository;
