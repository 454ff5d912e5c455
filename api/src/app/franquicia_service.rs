//! Franquicia service
//!
//! Use cases over the franchise aggregate. Every mutation follows the same
//! sequence: validate input, load the aggregate, apply one domain operation,
//! save the whole aggregate.
//!
//! Load and save are separate port calls, so two concurrent mutations on the
//! same franchise can interleave and the last save wins.

use std::sync::Arc;

use futures::stream::{self, BoxStream};
use futures::{StreamExt, TryStreamExt};

use crate::domain::entities::{
    validar_stock, Franquicia, FranquiciaId, NuevaFranquicia, NuevaSucursal, NuevoProducto,
    ProductoMaxStock,
};
use crate::domain::ports::FranquiciaRepository;
use crate::error::{AppError, DomainError};

/// Service for managing franchises, their branches and products
pub struct FranquiciaService<FR>
where
    FR: FranquiciaRepository + ?Sized,
{
    franquicias: Arc<FR>,
}

impl<FR> FranquiciaService<FR>
where
    FR: FranquiciaRepository + ?Sized,
{
    pub fn new(franquicias: Arc<FR>) -> Self {
        Self { franquicias }
    }

    /// Create a franchise, optionally with initial branches and products.
    ///
    /// The name lookup is a fast path; the store's own uniqueness guard is
    /// what settles two concurrent creations with the same name.
    pub async fn crear_franquicia(&self, nueva: NuevaFranquicia) -> Result<Franquicia, AppError> {
        requerido(&nueva.nombre, "El nombre de la franquicia es obligatorio.")?;
        let franquicia = nueva.construir()?;

        if let Some(existente) = self.franquicias.find_by_nombre(franquicia.nombre()).await? {
            tracing::debug!(nombre = %franquicia.nombre(), "Franchise name already taken");
            return Err(DomainError::AlreadyExists(format!(
                "La franquicia '{}' ya existe.",
                existente.nombre()
            ))
            .into());
        }

        let guardada = self.franquicias.save(&franquicia).await?;
        tracing::info!(
            franquicia_id = ?guardada.id(),
            nombre = %guardada.nombre(),
            "Franchise created"
        );
        Ok(guardada)
    }

    /// Stream every franchise once
    pub fn listar(&self) -> BoxStream<'_, Result<Franquicia, AppError>> {
        self.franquicias.find_all().map_err(AppError::from).boxed()
    }

    pub async fn obtener_por_id(&self, id: &str) -> Result<Franquicia, AppError> {
        self.cargar(id).await
    }

    pub async fn obtener_por_nombre(&self, nombre: &str) -> Result<Franquicia, AppError> {
        requerido(
            nombre,
            "El nombre de la franquicia es obligatorio para la búsqueda.",
        )?;

        self.franquicias
            .find_by_nombre(nombre)
            .await?
            .ok_or_else(|| DomainError::not_found("Franquicia", nombre).into())
    }

    pub async fn agregar_sucursal(
        &self,
        franquicia_id: &str,
        nueva: NuevaSucursal,
    ) -> Result<Franquicia, AppError> {
        requerido(&nueva.nombre, "El nombre de la sucursal es obligatorio.")?;
        let sucursal = nueva.construir()?;

        let mut franquicia = self.cargar(franquicia_id).await?;
        franquicia.agregar_sucursal(sucursal)?;

        tracing::info!(franquicia_id, "Branch added");
        self.guardar(&franquicia).await
    }

    /// Add a product to a branch. The duplicate check happens here, before
    /// the aggregate is touched.
    pub async fn agregar_producto(
        &self,
        franquicia_id: &str,
        sucursal_nombre: &str,
        nuevo: NuevoProducto,
    ) -> Result<Franquicia, AppError> {
        requerido(sucursal_nombre, "El nombre de la sucursal es obligatorio.")?;
        requerido(&nuevo.nombre, "El nombre del producto es obligatorio.")?;
        let producto = nuevo.construir()?;

        let mut franquicia = self.cargar(franquicia_id).await?;
        let sucursal = franquicia
            .buscar_sucursal_mut(sucursal_nombre)
            .ok_or_else(|| {
                DomainError::not_found(
                    "Sucursal",
                    format!("{} en la franquicia {}", sucursal_nombre, franquicia_id),
                )
            })?;

        if sucursal.tiene_producto(producto.nombre()) {
            return Err(DomainError::AlreadyExists(format!(
                "El producto '{}' ya existe en la sucursal '{}'.",
                producto.nombre(),
                sucursal_nombre
            ))
            .into());
        }
        sucursal.agregar_producto(producto)?;

        tracing::info!(franquicia_id, sucursal = sucursal_nombre, "Product added");
        self.guardar(&franquicia).await
    }

    pub async fn eliminar_producto(
        &self,
        franquicia_id: &str,
        sucursal_nombre: &str,
        producto_nombre: &str,
    ) -> Result<String, AppError> {
        requerido(sucursal_nombre, "El nombre de la sucursal es obligatorio.")?;
        requerido(producto_nombre, "El nombre del producto es obligatorio.")?;

        let mut franquicia = self.cargar(franquicia_id).await?;
        franquicia.eliminar_producto(sucursal_nombre, producto_nombre)?;
        self.guardar(&franquicia).await?;

        tracing::info!(
            franquicia_id,
            sucursal = sucursal_nombre,
            producto = producto_nombre,
            "Product removed from branch"
        );
        Ok(format!(
            "Producto '{}' eliminado exitosamente de la sucursal '{}'.",
            producto_nombre, sucursal_nombre
        ))
    }

    /// Remove a product from every branch. Succeeds when at least one branch had it.
    pub async fn eliminar_producto_en_todas(
        &self,
        franquicia_id: &str,
        producto_nombre: &str,
    ) -> Result<String, AppError> {
        requerido(producto_nombre, "El nombre del producto es obligatorio.")?;

        let mut franquicia = self.cargar(franquicia_id).await?;
        let total = franquicia.sucursales().len();
        let eliminados = franquicia.eliminar_producto_en_todas(producto_nombre)?;
        self.guardar(&franquicia).await?;

        tracing::info!(
            franquicia_id,
            producto = producto_nombre,
            eliminados,
            total,
            "Product removed from branches"
        );
        Ok(format!(
            "Producto '{}' eliminado exitosamente de {} de {} sucursales de la franquicia.",
            producto_nombre, eliminados, total
        ))
    }

    pub async fn actualizar_stock(
        &self,
        franquicia_id: &str,
        sucursal_nombre: &str,
        producto_nombre: &str,
        nuevo_stock: i32,
    ) -> Result<Franquicia, AppError> {
        requerido(sucursal_nombre, "El nombre de la sucursal es obligatorio.")?;
        requerido(producto_nombre, "El nombre del producto es obligatorio.")?;
        validar_stock(nuevo_stock)?;

        let mut franquicia = self.cargar(franquicia_id).await?;
        franquicia.modificar_stock(sucursal_nombre, producto_nombre, nuevo_stock)?;

        tracing::info!(
            franquicia_id,
            sucursal = sucursal_nombre,
            producto = producto_nombre,
            stock = nuevo_stock,
            "Stock updated"
        );
        self.guardar(&franquicia).await
    }

    /// Rename a franchise. Keeping the same name (any casing) is not a conflict.
    pub async fn renombrar_franquicia(
        &self,
        franquicia_id: &str,
        nuevo_nombre: &str,
    ) -> Result<Franquicia, AppError> {
        requerido(franquicia_id, "El ID de la franquicia es obligatorio.")?;
        requerido(nuevo_nombre, "El nuevo nombre de la franquicia es obligatorio.")?;

        let id = FranquiciaId::from(franquicia_id);
        if let Some(existente) = self.franquicias.find_by_nombre(nuevo_nombre).await? {
            if existente.id() != Some(&id) {
                return Err(DomainError::AlreadyExists(format!(
                    "Ya existe una franquicia con el nombre: {}",
                    nuevo_nombre
                ))
                .into());
            }
        }

        let mut franquicia = self.cargar(franquicia_id).await?;
        franquicia.renombrar(nuevo_nombre)?;

        tracing::info!(franquicia_id, nombre = nuevo_nombre, "Franchise renamed");
        self.guardar(&franquicia).await
    }

    pub async fn renombrar_sucursal(
        &self,
        franquicia_id: &str,
        actual: &str,
        nuevo: &str,
    ) -> Result<Franquicia, AppError> {
        requerido(actual, "El nombre actual de la sucursal es obligatorio.")?;
        requerido(nuevo, "El nuevo nombre de la sucursal es obligatorio.")?;

        let mut franquicia = self.cargar(franquicia_id).await?;
        franquicia.renombrar_sucursal(actual, nuevo)?;

        tracing::info!(franquicia_id, actual, nuevo, "Branch renamed");
        self.guardar(&franquicia).await
    }

    pub async fn renombrar_producto(
        &self,
        franquicia_id: &str,
        sucursal_nombre: &str,
        actual: &str,
        nuevo: &str,
    ) -> Result<Franquicia, AppError> {
        requerido(sucursal_nombre, "El nombre de la sucursal es obligatorio.")?;
        requerido(actual, "El nombre actual del producto es obligatorio.")?;
        requerido(nuevo, "El nuevo nombre del producto es obligatorio.")?;

        let mut franquicia = self.cargar(franquicia_id).await?;
        franquicia.renombrar_producto(sucursal_nombre, actual, nuevo)?;

        tracing::info!(
            franquicia_id,
            sucursal = sucursal_nombre,
            actual,
            nuevo,
            "Product renamed"
        );
        self.guardar(&franquicia).await
    }

    /// Highest-stock product of each branch, in branch order.
    ///
    /// A missing franchise fails before anything is yielded. A branch with no
    /// products yields a `NotFound` error and ends the stream there.
    pub async fn productos_max_stock(
        &self,
        franquicia_id: &str,
    ) -> Result<BoxStream<'static, Result<ProductoMaxStock, AppError>>, AppError> {
        let franquicia = self.cargar(franquicia_id).await?;

        Ok(stream::iter(franquicia.into_productos_max_stock())
            .map_err(AppError::from)
            .boxed())
    }

    async fn cargar(&self, franquicia_id: &str) -> Result<Franquicia, AppError> {
        requerido(franquicia_id, "El ID de la franquicia es obligatorio.")?;

        self.franquicias
            .find_by_id(&FranquiciaId::from(franquicia_id))
            .await?
            .ok_or_else(|| DomainError::not_found("Franquicia", franquicia_id).into())
    }

    async fn guardar(&self, franquicia: &Franquicia) -> Result<Franquicia, AppError> {
        Ok(self.franquicias.save(franquicia).await?)
    }
}

/// Reject blank required input with a validation error
fn requerido(valor: &str, mensaje: &str) -> Result<(), DomainError> {
    if valor.trim().is_empty() {
        return Err(DomainError::Validation(mensaje.to_string()));
    }
    Ok(())
}
