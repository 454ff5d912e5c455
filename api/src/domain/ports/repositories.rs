//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (PostgreSQL, in-memory).

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::domain::entities::{Franquicia, FranquiciaId};
use crate::error::DomainError;

/// Repository for the Franquicia aggregate.
///
/// Every write stores the full aggregate; there are no partial-field updates
/// and no guarantee spanning a load and a later save.
#[async_trait]
pub trait FranquiciaRepository: Send + Sync {
    /// Insert (when the franchise has no id yet) or fully overwrite by id.
    ///
    /// Returns the stored franchise, carrying its id.
    async fn save(&self, franquicia: &Franquicia) -> Result<Franquicia, DomainError>;

    /// Find a franchise by ID
    async fn find_by_id(&self, id: &FranquiciaId) -> Result<Option<Franquicia>, DomainError>;

    /// Find a franchise by name, ignoring case
    async fn find_by_nombre(&self, nombre: &str) -> Result<Option<Franquicia>, DomainError>;

    /// Stream every franchise once, in insertion order
    fn find_all(&self) -> BoxStream<'_, Result<Franquicia, DomainError>>;
}
