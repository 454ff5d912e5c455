//! Franquicia domain entity
//!
//! The aggregate root. A franchise owns its branches, which own their products;
//! the whole tree is loaded and saved as one unit. All mutations go through the
//! methods below so that branch names stay unique within the franchise and
//! product names stay unique within each branch (both case-insensitive).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::sucursal::{NuevaSucursal, Sucursal};
use super::{es_blanco, mismo_nombre};
use crate::error::DomainError;

/// Store-assigned identifier for a franchise
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FranquiciaId(pub String);

impl FranquiciaId {
    /// Fresh identifier, used by stores when inserting
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl From<String> for FranquiciaId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for FranquiciaId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for FranquiciaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Highest-stock product of one branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductoMaxStock {
    pub sucursal_nombre: String,
    pub producto_nombre: String,
    pub stock: i32,
}

/// Data needed to create a new franchise
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NuevaFranquicia {
    pub nombre: String,
    pub sucursales: Vec<NuevaSucursal>,
}

impl NuevaFranquicia {
    /// Validate the whole tree and build an unsaved aggregate
    pub fn construir(self) -> Result<Franquicia, DomainError> {
        let mut franquicia = Franquicia::new(self.nombre)?;
        for sucursal in self.sucursales {
            franquicia.agregar_sucursal(sucursal.construir()?)?;
        }
        Ok(franquicia)
    }
}

/// A franchise and its branches
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Franquicia {
    id: Option<FranquiciaId>,
    nombre: String,
    sucursales: Vec<Sucursal>,
}

impl Franquicia {
    /// Create an unsaved franchise with no branches
    pub fn new(nombre: impl Into<String>) -> Result<Self, DomainError> {
        let nombre = nombre.into();
        if es_blanco(&nombre) {
            return Err(DomainError::Validation(
                "El nombre de la franquicia es obligatorio.".to_string(),
            ));
        }
        Ok(Self {
            id: None,
            nombre,
            sucursales: Vec::new(),
        })
    }

    /// Rebuild a stored aggregate. The caller vouches for the invariants.
    pub fn rehidratar(id: FranquiciaId, nombre: String, sucursales: Vec<Sucursal>) -> Self {
        Self {
            id: Some(id),
            nombre,
            sucursales,
        }
    }

    pub fn id(&self) -> Option<&FranquiciaId> {
        self.id.as_ref()
    }

    pub fn nombre(&self) -> &str {
        &self.nombre
    }

    pub fn sucursales(&self) -> &[Sucursal] {
        &self.sucursales
    }

    /// Attach the store-assigned id
    pub fn with_id(mut self, id: FranquiciaId) -> Self {
        self.id = Some(id);
        self
    }

    /// Append a branch unless its name is already used in this franchise
    pub fn agregar_sucursal(&mut self, sucursal: Sucursal) -> Result<(), DomainError> {
        if self.buscar_sucursal(sucursal.nombre()).is_some() {
            return Err(DomainError::AlreadyExists(format!(
                "Ya existe una sucursal con el nombre '{}' en esta franquicia.",
                sucursal.nombre()
            )));
        }
        self.sucursales.push(sucursal);
        Ok(())
    }

    /// First branch whose name matches, ignoring case
    pub fn buscar_sucursal(&self, nombre: &str) -> Option<&Sucursal> {
        self.sucursales
            .iter()
            .find(|s| mismo_nombre(s.nombre(), nombre))
    }

    pub fn buscar_sucursal_mut(&mut self, nombre: &str) -> Option<&mut Sucursal> {
        self.sucursales
            .iter_mut()
            .find(|s| mismo_nombre(s.nombre(), nombre))
    }

    /// Remove a product from one branch
    pub fn eliminar_producto(
        &mut self,
        sucursal_nombre: &str,
        producto_nombre: &str,
    ) -> Result<(), DomainError> {
        let franquicia = self.nombre.clone();
        let sucursal = self.sucursal_existente(sucursal_nombre)?;

        if !sucursal.eliminar_producto(producto_nombre) {
            return Err(DomainError::not_found(
                "Producto",
                format!(
                    "{} en la sucursal {} de la franquicia {}",
                    producto_nombre, sucursal_nombre, franquicia
                ),
            ));
        }
        Ok(())
    }

    /// Remove a product from every branch that has it.
    ///
    /// Succeeds if at least one branch held the product; returns how many did.
    pub fn eliminar_producto_en_todas(
        &mut self,
        producto_nombre: &str,
    ) -> Result<usize, DomainError> {
        let eliminados = self
            .sucursales
            .iter_mut()
            .map(|s| s.eliminar_producto(producto_nombre))
            .filter(|eliminado| *eliminado)
            .count();

        if eliminados == 0 {
            return Err(DomainError::not_found(
                "Producto",
                format!(
                    "{} en ninguna sucursal de la franquicia {}",
                    producto_nombre, self.nombre
                ),
            ));
        }
        Ok(eliminados)
    }

    /// Overwrite the stock of a product. The caller has already checked `nuevo_stock >= 0`.
    pub fn modificar_stock(
        &mut self,
        sucursal_nombre: &str,
        producto_nombre: &str,
        nuevo_stock: i32,
    ) -> Result<(), DomainError> {
        let sucursal = self.sucursal_existente(sucursal_nombre)?;
        let producto = sucursal.buscar_producto_mut(producto_nombre).ok_or_else(|| {
            DomainError::not_found(
                "Producto",
                format!("{} en la sucursal {}", producto_nombre, sucursal_nombre),
            )
        })?;
        producto.set_stock(nuevo_stock);
        Ok(())
    }

    pub fn renombrar(&mut self, nuevo_nombre: &str) -> Result<(), DomainError> {
        if es_blanco(nuevo_nombre) {
            return Err(DomainError::Validation(
                "El nuevo nombre de la franquicia no puede ser vacío.".to_string(),
            ));
        }
        self.nombre = nuevo_nombre.to_string();
        Ok(())
    }

    /// Rename a branch. A name collision is reported before a missing branch.
    pub fn renombrar_sucursal(&mut self, actual: &str, nuevo: &str) -> Result<(), DomainError> {
        if es_blanco(nuevo) {
            return Err(DomainError::Validation(
                "El nuevo nombre de la sucursal es obligatorio.".to_string(),
            ));
        }

        let idx_actual = self
            .sucursales
            .iter()
            .position(|s| mismo_nombre(s.nombre(), actual));

        let colision = self
            .sucursales
            .iter()
            .enumerate()
            .any(|(i, s)| Some(i) != idx_actual && mismo_nombre(s.nombre(), nuevo));
        if colision {
            return Err(DomainError::AlreadyExists(format!(
                "Ya existe una sucursal con el nombre '{}' en esta franquicia.",
                nuevo
            )));
        }

        let idx = idx_actual.ok_or_else(|| DomainError::not_found("Sucursal", actual))?;
        self.sucursales[idx].set_nombre(nuevo.to_string());
        Ok(())
    }

    pub fn renombrar_producto(
        &mut self,
        sucursal_nombre: &str,
        actual: &str,
        nuevo: &str,
    ) -> Result<(), DomainError> {
        if es_blanco(nuevo) {
            return Err(DomainError::Validation(
                "El nuevo nombre del producto es obligatorio.".to_string(),
            ));
        }
        self.sucursal_existente(sucursal_nombre)?
            .renombrar_producto(actual, nuevo)
    }

    /// Lazily yield the max-stock product of each branch, in branch order.
    ///
    /// A branch without products yields a `NotFound` error and ends the sequence.
    pub fn into_productos_max_stock(
        self,
    ) -> impl Iterator<Item = Result<ProductoMaxStock, DomainError>> {
        let mut abortado = false;
        self.sucursales.into_iter().map_while(move |sucursal| {
            if abortado {
                return None;
            }
            let resultado = match sucursal.producto_max_stock() {
                Some(producto) => Ok(ProductoMaxStock {
                    sucursal_nombre: sucursal.nombre().to_string(),
                    producto_nombre: producto.nombre().to_string(),
                    stock: producto.stock(),
                }),
                None => {
                    abortado = true;
                    Err(DomainError::not_found(
                        "Producto",
                        format!("no hay productos en la sucursal {}", sucursal.nombre()),
                    ))
                }
            };
            Some(resultado)
        })
    }

    fn sucursal_existente(&mut self, nombre: &str) -> Result<&mut Sucursal, DomainError> {
        let franquicia = self.nombre.clone();
        self.buscar_sucursal_mut(nombre).ok_or_else(|| {
            DomainError::not_found(
                "Sucursal",
                format!("{} en la franquicia {}", nombre, franquicia),
            )
        })
    }
}
