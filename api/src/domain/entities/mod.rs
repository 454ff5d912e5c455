//! Domain entities
//!
//! The franchise aggregate and its owned branch/product values.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod franquicia;
pub mod producto;
pub mod sucursal;

pub use franquicia::{Franquicia, FranquiciaId, NuevaFranquicia, ProductoMaxStock};
pub use producto::{validar_stock, NuevoProducto, Producto};
pub use sucursal::{NuevaSucursal, Sucursal};

/// Names compare case-insensitively everywhere in the aggregate
pub(crate) fn mismo_nombre(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Normalized form of a name, as used by stores for uniqueness lookups
pub fn nombre_normalizado(nombre: &str) -> String {
    nombre.to_lowercase()
}

pub(crate) fn es_blanco(valor: &str) -> bool {
    valor.trim().is_empty()
}
