//! Mock implementations of port traits

use async_trait::async_trait;
use futures::stream::{self, BoxStream};
use futures::StreamExt;

use crate::domain::entities::{Franquicia, FranquiciaId};
use crate::domain::ports::FranquiciaRepository;
use crate::error::DomainError;

// ============================================================================
// Failing Franquicia Repository
// ============================================================================

/// Repository whose every call fails as if the database were unreachable
pub struct FailingFranquiciaRepository;

fn caido() -> DomainError {
    DomainError::Database("connection refused".to_string())
}

#[async_trait]
impl FranquiciaRepository for FailingFranquiciaRepository {
    async fn save(&self, _franquicia: &Franquicia) -> Result<Franquicia, DomainError> {
        Err(caido())
    }

    async fn find_by_id(&self, _id: &FranquiciaId) -> Result<Option<Franquicia>, DomainError> {
        Err(caido())
    }

    async fn find_by_nombre(&self, _nombre: &str) -> Result<Option<Franquicia>, DomainError> {
        Err(caido())
    }

    fn find_all(&self) -> BoxStream<'_, Result<Franquicia, DomainError>> {
        stream::once(async { Err::<Franquicia, _>(caido()) }).boxed()
    }
}
