//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod franquicias;
pub mod health;

pub use franquicias::{
    actualizar_stock, agregar_producto, agregar_sucursal, crear_franquicia, eliminar_producto,
    eliminar_producto_en_todas, listar_franquicias, obtener_franquicia,
    obtener_franquicia_por_nombre, productos_max_stock, renombrar_franquicia, renombrar_producto,
    renombrar_sucursal,
};
pub use health::health;
