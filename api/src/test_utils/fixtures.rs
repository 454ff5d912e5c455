//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use crate::domain::entities::{
    Franquicia, FranquiciaId, NuevaFranquicia, NuevoProducto, Producto, Sucursal,
};

/// Create a test branch from `(name, stock)` pairs
pub fn test_sucursal(nombre: &str, productos: &[(&str, i32)]) -> Sucursal {
    Sucursal::with_productos(
        nombre,
        productos
            .iter()
            .map(|(n, stock)| Producto::new(*n, *stock).unwrap()),
    )
    .unwrap()
}

/// Create a stored franchise "Tasty" with three branches:
/// - Centro: A=5, B=9, C=9
/// - Norte: X=1, Y=2
/// - Sur: X=7
pub fn test_franquicia() -> Franquicia {
    test_franquicia_named("Tasty")
}

/// Same tree as `test_franquicia` under a different name and a fresh id
pub fn test_franquicia_named(nombre: &str) -> Franquicia {
    let mut franquicia = Franquicia::new(nombre).unwrap();
    franquicia
        .agregar_sucursal(test_sucursal("Centro", &[("A", 5), ("B", 9), ("C", 9)]))
        .unwrap();
    franquicia
        .agregar_sucursal(test_sucursal("Norte", &[("X", 1), ("Y", 2)]))
        .unwrap();
    franquicia
        .agregar_sucursal(test_sucursal("Sur", &[("X", 7)]))
        .unwrap();
    franquicia.with_id(FranquiciaId::generate())
}

/// Creation input with just a name
pub fn nueva_franquicia(nombre: &str) -> NuevaFranquicia {
    NuevaFranquicia {
        nombre: nombre.to_string(),
        ..Default::default()
    }
}

pub fn nuevo_producto(nombre: &str, stock: i32) -> NuevoProducto {
    NuevoProducto {
        nombre: nombre.to_string(),
        stock,
    }
}
