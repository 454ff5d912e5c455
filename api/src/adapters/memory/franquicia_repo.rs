//! In-memory adapter for FranquiciaRepository

use async_trait::async_trait;
use futures::stream::{self, BoxStream};
use futures::StreamExt;
use tokio::sync::RwLock;

use crate::domain::entities::{nombre_normalizado, Franquicia, FranquiciaId};
use crate::domain::ports::FranquiciaRepository;
use crate::error::DomainError;

/// In-memory implementation of FranquiciaRepository.
///
/// Keeps insertion order. The name check inside `save` runs under the write
/// lock, so it plays the role of the unique index in PostgreSQL.
#[derive(Default)]
pub struct InMemoryFranquiciaRepository {
    franquicias: RwLock<Vec<Franquicia>>,
}

impl InMemoryFranquiciaRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a franchise. Assigns an id if it has none.
    #[cfg(test)]
    pub fn with_franquicia(mut self, franquicia: Franquicia) -> Self {
        let franquicia = match franquicia.id() {
            Some(_) => franquicia,
            None => franquicia.with_id(FranquiciaId::generate()),
        };
        self.franquicias.get_mut().push(franquicia);
        self
    }

    /// Number of stored franchises
    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.franquicias.read().await.len()
    }
}

#[async_trait]
impl FranquiciaRepository for InMemoryFranquiciaRepository {
    async fn save(&self, franquicia: &Franquicia) -> Result<Franquicia, DomainError> {
        let mut franquicias = self.franquicias.write().await;

        let normalizado = nombre_normalizado(franquicia.nombre());
        let colision = franquicias.iter().any(|f| {
            f.id() != franquicia.id() && nombre_normalizado(f.nombre()) == normalizado
        });
        if colision {
            return Err(DomainError::AlreadyExists(format!(
                "Ya existe una franquicia con el nombre: {}",
                franquicia.nombre()
            )));
        }

        match franquicia.id() {
            Some(id) => {
                let slot = franquicias
                    .iter_mut()
                    .find(|f| f.id() == Some(id))
                    .ok_or_else(|| DomainError::not_found("Franquicia", id))?;
                *slot = franquicia.clone();
                Ok(franquicia.clone())
            }
            None => {
                let guardada = franquicia.clone().with_id(FranquiciaId::generate());
                franquicias.push(guardada.clone());
                Ok(guardada)
            }
        }
    }

    async fn find_by_id(&self, id: &FranquiciaId) -> Result<Option<Franquicia>, DomainError> {
        let franquicias = self.franquicias.read().await;
        Ok(franquicias.iter().find(|f| f.id() == Some(id)).cloned())
    }

    async fn find_by_nombre(&self, nombre: &str) -> Result<Option<Franquicia>, DomainError> {
        let normalizado = nombre_normalizado(nombre);
        let franquicias = self.franquicias.read().await;
        Ok(franquicias
            .iter()
            .find(|f| nombre_normalizado(f.nombre()) == normalizado)
            .cloned())
    }

    fn find_all(&self) -> BoxStream<'_, Result<Franquicia, DomainError>> {
        stream::once(async move { self.franquicias.read().await.clone() })
            .flat_map(stream::iter)
            .map(Ok)
            .boxed()
    }
}
