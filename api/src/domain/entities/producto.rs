//! Producto domain entity
//!
//! A product held in stock by a single branch.

use serde::{Deserialize, Serialize};

use super::es_blanco;
use crate::error::DomainError;

/// A product owned by a branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProductoDocumento")]
pub struct Producto {
    nombre: String,
    stock: i32,
}

/// Stored shape of a product, validated on the way in
#[derive(Deserialize)]
struct ProductoDocumento {
    nombre: String,
    stock: i32,
}

impl TryFrom<ProductoDocumento> for Producto {
    type Error = DomainError;

    fn try_from(doc: ProductoDocumento) -> Result<Self, Self::Error> {
        Producto::new(doc.nombre, doc.stock)
    }
}

impl Producto {
    /// Create a product, rejecting blank names and negative stock
    pub fn new(nombre: impl Into<String>, stock: i32) -> Result<Self, DomainError> {
        let nombre = nombre.into();
        if es_blanco(&nombre) {
            return Err(DomainError::Validation(
                "El nombre del producto es obligatorio.".to_string(),
            ));
        }
        validar_stock(stock)?;
        Ok(Self { nombre, stock })
    }

    pub fn nombre(&self) -> &str {
        &self.nombre
    }

    pub fn stock(&self) -> i32 {
        self.stock
    }

    pub(super) fn set_stock(&mut self, stock: i32) {
        debug_assert!(stock >= 0);
        self.stock = stock;
    }

    pub(super) fn set_nombre(&mut self, nombre: String) {
        self.nombre = nombre;
    }
}

/// Data needed to create a new product
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NuevoProducto {
    pub nombre: String,
    pub stock: i32,
}

impl NuevoProducto {
    pub fn construir(self) -> Result<Producto, DomainError> {
        Producto::new(self.nombre, self.stock)
    }
}

/// Reject negative stock values
pub fn validar_stock(stock: i32) -> Result<(), DomainError> {
    if stock < 0 {
        return Err(DomainError::Validation(
            "La cantidad no puede ser negativa.".to_string(),
        ));
    }
    Ok(())
}
