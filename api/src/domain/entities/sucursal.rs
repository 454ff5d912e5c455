//! Sucursal domain entity
//!
//! A branch of a franchise. Owns an ordered list of products whose names are
//! unique within the branch (case-insensitive).

use serde::{Deserialize, Serialize};

use super::producto::{NuevoProducto, Producto};
use super::{es_blanco, mismo_nombre};
use crate::error::DomainError;

/// A branch owned by a franchise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SucursalDocumento")]
pub struct Sucursal {
    nombre: String,
    productos: Vec<Producto>,
}

/// Stored shape of a branch; rebuilt through `with_productos` so names stay unique
#[derive(Deserialize)]
struct SucursalDocumento {
    nombre: String,
    #[serde(default)]
    productos: Vec<Producto>,
}

impl TryFrom<SucursalDocumento> for Sucursal {
    type Error = DomainError;

    fn try_from(doc: SucursalDocumento) -> Result<Self, Self::Error> {
        Sucursal::with_productos(doc.nombre, doc.productos)
    }
}

impl Sucursal {
    /// Create an empty branch
    pub fn new(nombre: impl Into<String>) -> Result<Self, DomainError> {
        let nombre = nombre.into();
        if es_blanco(&nombre) {
            return Err(DomainError::Validation(
                "El nombre de la sucursal es obligatorio.".to_string(),
            ));
        }
        Ok(Self {
            nombre,
            productos: Vec::new(),
        })
    }

    /// Create a branch with initial products, enforcing unique product names
    pub fn with_productos(
        nombre: impl Into<String>,
        productos: impl IntoIterator<Item = Producto>,
    ) -> Result<Self, DomainError> {
        let mut sucursal = Self::new(nombre)?;
        for producto in productos {
            sucursal.agregar_producto(producto)?;
        }
        Ok(sucursal)
    }

    pub fn nombre(&self) -> &str {
        &self.nombre
    }

    pub fn productos(&self) -> &[Producto] {
        &self.productos
    }

    /// Check whether a product with this name exists (case-insensitive)
    pub fn tiene_producto(&self, nombre: &str) -> bool {
        self.buscar_producto(nombre).is_some()
    }

    /// Append a product, failing if the name is already taken in this branch
    pub fn agregar_producto(&mut self, producto: Producto) -> Result<(), DomainError> {
        if self.tiene_producto(producto.nombre()) {
            return Err(DomainError::AlreadyExists(format!(
                "El producto '{}' ya existe en la sucursal '{}'.",
                producto.nombre(),
                self.nombre
            )));
        }
        self.productos.push(producto);
        Ok(())
    }

    /// First product whose name matches, ignoring case
    pub fn buscar_producto(&self, nombre: &str) -> Option<&Producto> {
        self.productos
            .iter()
            .find(|p| mismo_nombre(p.nombre(), nombre))
    }

    pub fn buscar_producto_mut(&mut self, nombre: &str) -> Option<&mut Producto> {
        self.productos
            .iter_mut()
            .find(|p| mismo_nombre(p.nombre(), nombre))
    }

    /// Remove the first product matching `nombre`. Returns whether one was removed.
    pub fn eliminar_producto(&mut self, nombre: &str) -> bool {
        match self
            .productos
            .iter()
            .position(|p| mismo_nombre(p.nombre(), nombre))
        {
            Some(idx) => {
                self.productos.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Product with the strictly greatest stock; the first one wins on ties
    pub fn producto_max_stock(&self) -> Option<&Producto> {
        let mut productos = self.productos.iter();
        let first = productos.next()?;
        Some(productos.fold(first, |max, p| if p.stock() > max.stock() { p } else { max }))
    }

    pub(super) fn set_nombre(&mut self, nombre: String) {
        self.nombre = nombre;
    }

    /// Rename a product. A missing product is reported before a name collision.
    pub(super) fn renombrar_producto(
        &mut self,
        actual: &str,
        nuevo: &str,
    ) -> Result<(), DomainError> {
        let idx = self
            .productos
            .iter()
            .position(|p| mismo_nombre(p.nombre(), actual))
            .ok_or_else(|| {
                DomainError::not_found(
                    "Producto",
                    format!("{} en la sucursal {}", actual, self.nombre),
                )
            })?;

        let colision = self
            .productos
            .iter()
            .enumerate()
            .any(|(i, p)| i != idx && mismo_nombre(p.nombre(), nuevo));
        if colision {
            return Err(DomainError::AlreadyExists(format!(
                "Ya existe un producto con el nombre '{}' en la sucursal '{}'.",
                nuevo, self.nombre
            )));
        }

        self.productos[idx].set_nombre(nuevo.to_string());
        Ok(())
    }
}

/// Data needed to create a new branch, optionally with products
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NuevaSucursal {
    pub nombre: String,
    pub productos: Vec<NuevoProducto>,
}

impl NuevaSucursal {
    /// Validate names and stock, then build the branch
    pub fn construir(self) -> Result<Sucursal, DomainError> {
        let productos = self
            .productos
            .into_iter()
            .map(NuevoProducto::construir)
            .collect::<Result<Vec<_>, _>>()?;
        Sucursal::with_productos(self.nombre, productos)
    }
}
