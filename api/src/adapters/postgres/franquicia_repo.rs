//! PostgreSQL adapter for FranquiciaRepository

use async_trait::async_trait;
use chrono::Utc;
use futures::stream::{self, BoxStream};
use futures::{StreamExt, TryStreamExt};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Schema, Set, SqlErr,
};

use crate::domain::entities::{nombre_normalizado, Franquicia, FranquiciaId, Sucursal};
use crate::domain::ports::FranquiciaRepository;
use crate::entity::franquicias;
use crate::error::DomainError;

/// PostgreSQL implementation of FranquiciaRepository
pub struct PostgresFranquiciaRepository {
    db: DatabaseConnection,
}

impl PostgresFranquiciaRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create the `franquicias` table if it does not exist yet
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        let backend = self.db.get_database_backend();
        let mut create = Schema::new(backend).create_table_from_entity(franquicias::Entity);
        create.if_not_exists();

        self.db
            .execute(backend.build(&create))
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        tracing::debug!("franquicias schema ready");
        Ok(())
    }

    async fn insert(&self, franquicia: &Franquicia) -> Result<franquicias::Model, DomainError> {
        let id = FranquiciaId::generate();
        let now = Utc::now().fixed_offset();

        let model = franquicias::ActiveModel {
            id: Set(id.0),
            nombre: Set(franquicia.nombre().to_string()),
            nombre_normalizado: Set(nombre_normalizado(franquicia.nombre())),
            sucursales: Set(sucursales_to_json(franquicia.sucursales())?),
            created_at: Set(now),
            updated_at: Set(now),
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| map_write_error(e, franquicia.nombre()))
    }

    async fn overwrite(
        &self,
        id: &FranquiciaId,
        franquicia: &Franquicia,
    ) -> Result<franquicias::Model, DomainError> {
        franquicias::ActiveModel {
            id: Set(id.0.clone()),
            nombre: Set(franquicia.nombre().to_string()),
            nombre_normalizado: Set(nombre_normalizado(franquicia.nombre())),
            sucursales: Set(sucursales_to_json(franquicia.sucursales())?),
            updated_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::not_found("Franquicia", id),
            e => map_write_error(e, franquicia.nombre()),
        })
    }
}

#[async_trait]
impl FranquiciaRepository for PostgresFranquiciaRepository {
    async fn save(&self, franquicia: &Franquicia) -> Result<Franquicia, DomainError> {
        let model = match franquicia.id() {
            Some(id) => self.overwrite(id, franquicia).await?,
            None => self.insert(franquicia).await?,
        };

        model.try_into()
    }

    async fn find_by_id(&self, id: &FranquiciaId) -> Result<Option<Franquicia>, DomainError> {
        let result = franquicias::Entity::find_by_id(id.0.clone())
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        result.map(Franquicia::try_from).transpose()
    }

    async fn find_by_nombre(&self, nombre: &str) -> Result<Option<Franquicia>, DomainError> {
        let result = franquicias::Entity::find()
            .filter(franquicias::Column::NombreNormalizado.eq(nombre_normalizado(nombre)))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        result.map(Franquicia::try_from).transpose()
    }

    fn find_all(&self) -> BoxStream<'_, Result<Franquicia, DomainError>> {
        stream::once(async move {
            franquicias::Entity::find()
                .order_by_asc(franquicias::Column::CreatedAt)
                .stream(&self.db)
                .await
        })
        .try_flatten()
        .map_err(|e| DomainError::Database(e.to_string()))
        .map(|row| row.and_then(Franquicia::try_from))
        .boxed()
    }
}

fn sucursales_to_json(sucursales: &[Sucursal]) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(sucursales).map_err(|e| DomainError::Internal(e.to_string()))
}

/// A unique-index hit on `nombre_normalizado` means another franchise owns the name
fn map_write_error(e: DbErr, nombre: &str) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::AlreadyExists(format!(
            "Ya existe una franquicia con el nombre: {}",
            nombre
        )),
        _ => DomainError::Database(e.to_string()),
    }
}

/// Convert SeaORM model to domain entity
impl TryFrom<franquicias::Model> for Franquicia {
    type Error = DomainError;

    fn try_from(model: franquicias::Model) -> Result<Self, Self::Error> {
        let sucursales: Vec<Sucursal> = serde_json::from_value(model.sucursales).map_err(|e| {
            DomainError::Internal(format!(
                "Documento de sucursales inválido para la franquicia {}: {}",
                model.id, e
            ))
        })?;

        Ok(Franquicia::rehidratar(
            FranquiciaId(model.id),
            model.nombre,
            sucursales,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn model(sucursales: serde_json::Value) -> franquicias::Model {
        let now = Utc::now().fixed_offset();
        franquicias::Model {
            id: "f-1".to_string(),
            nombre: "Tasty".to_string(),
            nombre_normalizado: "tasty".to_string(),
            sucursales,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn model_converts_nested_document() {
        let franquicia = Franquicia::try_from(model(json!([
            {"nombre": "Centro", "productos": [{"nombre": "Burger", "stock": 10}]},
            {"nombre": "Norte", "productos": []}
        ])))
        .unwrap();

        assert_eq!(franquicia.id(), Some(&FranquiciaId::from("f-1")));
        assert_eq!(franquicia.sucursales().len(), 2);
        let burger = franquicia
            .buscar_sucursal("Centro")
            .and_then(|s| s.buscar_producto("burger"))
            .unwrap();
        assert_eq!(burger.stock(), 10);
    }

    #[test]
    fn model_with_malformed_document_is_internal_error() {
        let result = Franquicia::try_from(model(json!({"nombre": "no es una lista"})));
        assert!(matches!(result, Err(DomainError::Internal(_))));
    }

    #[test]
    fn model_with_negative_stock_is_internal_error() {
        let result = Franquicia::try_from(model(json!([
            {"nombre": "Centro", "productos": [{"nombre": "Burger", "stock": -3}]}
        ])));
        assert!(matches!(result, Err(DomainError::Internal(_))));
    }

    #[test]
    fn sucursales_round_trip_through_json() {
        let mut franquicia = Franquicia::new("Tasty").unwrap();
        franquicia
            .agregar_sucursal(Sucursal::new("Centro").unwrap())
            .unwrap();

        let value = sucursales_to_json(franquicia.sucursales()).unwrap();
        assert_eq!(value, json!([{"nombre": "Centro", "productos": []}]));
    }

    #[test]
    fn other_write_errors_are_database_errors() {
        let err = map_write_error(DbErr::Custom("boom".into()), "Tasty");
        assert!(matches!(err, DomainError::Database(_)));
    }
}
