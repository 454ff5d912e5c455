//! `franquicias` table
//!
//! One row per aggregate. Branches and their products are stored as a JSONB
//! document in `sucursales`; `nombre_normalizado` carries the unique index that
//! guards franchise-name uniqueness.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "franquicias")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub nombre: String,
    #[sea_orm(unique)]
    pub nombre_normalizado: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub sucursales: Json,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
