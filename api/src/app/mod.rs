//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities and ports.

pub mod franquicia_service;

pub use franquicia_service::FranquiciaService;
