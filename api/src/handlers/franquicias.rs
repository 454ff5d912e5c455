//! Franquicia handlers
//!
//! Endpoints for franchises and their nested branches and products.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use futures::TryStreamExt;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    Franquicia, NuevaFranquicia, NuevaSucursal, NuevoProducto, Producto, ProductoMaxStock,
    Sucursal,
};
use crate::error::AppError;
use crate::AppState;

/// Request body for any rename endpoint
#[derive(Debug, Deserialize)]
pub struct RenombrarRequest {
    pub nombre: Option<String>,
}

impl RenombrarRequest {
    fn nombre(self) -> Result<String, AppError> {
        self.nombre
            .ok_or_else(|| AppError::BadRequest("El campo 'nombre' es obligatorio.".to_string()))
    }
}

/// Request body for stock updates
#[derive(Debug, Deserialize)]
pub struct StockRequest {
    pub stock: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct ProductoResponse {
    pub nombre: String,
    pub stock: i32,
}

impl From<&Producto> for ProductoResponse {
    fn from(producto: &Producto) -> Self {
        Self {
            nombre: producto.nombre().to_string(),
            stock: producto.stock(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SucursalResponse {
    pub nombre: String,
    pub productos: Vec<ProductoResponse>,
}

impl From<&Sucursal> for SucursalResponse {
    fn from(sucursal: &Sucursal) -> Self {
        Self {
            nombre: sucursal.nombre().to_string(),
            productos: sucursal.productos().iter().map(Into::into).collect(),
        }
    }
}

/// A franchise with its full branch tree
#[derive(Debug, Serialize)]
pub struct FranquiciaResponse {
    pub id: Option<String>,
    pub nombre: String,
    pub sucursales: Vec<SucursalResponse>,
}

impl From<Franquicia> for FranquiciaResponse {
    fn from(franquicia: Franquicia) -> Self {
        Self {
            id: franquicia.id().map(|id| id.to_string()),
            nombre: franquicia.nombre().to_string(),
            sucursales: franquicia.sucursales().iter().map(Into::into).collect(),
        }
    }
}

/// POST /franquicias
///
/// Create a franchise, optionally with initial branches and products.
pub async fn crear_franquicia(
    State(state): State<AppState>,
    payload: Result<Json<NuevaFranquicia>, JsonRejection>,
) -> Result<(StatusCode, Json<FranquiciaResponse>), AppError> {
    let Json(nueva) = payload?;
    let franquicia = state.franquicia_service.crear_franquicia(nueva).await?;
    Ok((StatusCode::CREATED, Json(franquicia.into())))
}

/// GET /franquicias
pub async fn listar_franquicias(
    State(state): State<AppState>,
) -> Result<Json<Vec<FranquiciaResponse>>, AppError> {
    let franquicias = state
        .franquicia_service
        .listar()
        .map_ok(FranquiciaResponse::from)
        .try_collect()
        .await?;
    Ok(Json(franquicias))
}

/// GET /franquicias/:id
pub async fn obtener_franquicia(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FranquiciaResponse>, AppError> {
    let franquicia = state.franquicia_service.obtener_por_id(&id).await?;
    Ok(Json(franquicia.into()))
}

/// GET /franquicias/nombre/:nombre
///
/// Case-insensitive lookup by name.
pub async fn obtener_franquicia_por_nombre(
    State(state): State<AppState>,
    Path(nombre): Path<String>,
) -> Result<Json<FranquiciaResponse>, AppError> {
    let franquicia = state.franquicia_service.obtener_por_nombre(&nombre).await?;
    Ok(Json(franquicia.into()))
}

/// PUT /franquicias/:id
///
/// Rename a franchise.
pub async fn renombrar_franquicia(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<RenombrarRequest>, JsonRejection>,
) -> Result<Json<FranquiciaResponse>, AppError> {
    let Json(request) = payload?;
    let franquicia = state
        .franquicia_service
        .renombrar_franquicia(&id, &request.nombre()?)
        .await?;
    Ok(Json(franquicia.into()))
}

/// POST /franquicias/:id/sucursales
pub async fn agregar_sucursal(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<NuevaSucursal>, JsonRejection>,
) -> Result<Json<FranquiciaResponse>, AppError> {
    let Json(nueva) = payload?;
    let franquicia = state.franquicia_service.agregar_sucursal(&id, nueva).await?;
    Ok(Json(franquicia.into()))
}

/// PUT /franquicias/:id/sucursales/:sucursal
pub async fn renombrar_sucursal(
    State(state): State<AppState>,
    Path((id, sucursal)): Path<(String, String)>,
    payload: Result<Json<RenombrarRequest>, JsonRejection>,
) -> Result<Json<FranquiciaResponse>, AppError> {
    let Json(request) = payload?;
    let franquicia = state
        .franquicia_service
        .renombrar_sucursal(&id, &sucursal, &request.nombre()?)
        .await?;
    Ok(Json(franquicia.into()))
}

/// POST /franquicias/:id/sucursales/:sucursal/productos
pub async fn agregar_producto(
    State(state): State<AppState>,
    Path((id, sucursal)): Path<(String, String)>,
    payload: Result<Json<NuevoProducto>, JsonRejection>,
) -> Result<Json<FranquiciaResponse>, AppError> {
    let Json(nuevo) = payload?;
    let franquicia = state
        .franquicia_service
        .agregar_producto(&id, &sucursal, nuevo)
        .await?;
    Ok(Json(franquicia.into()))
}

/// PUT /franquicias/:id/sucursales/:sucursal/productos/:producto
pub async fn renombrar_producto(
    State(state): State<AppState>,
    Path((id, sucursal, producto)): Path<(String, String, String)>,
    payload: Result<Json<RenombrarRequest>, JsonRejection>,
) -> Result<Json<FranquiciaResponse>, AppError> {
    let Json(request) = payload?;
    let franquicia = state
        .franquicia_service
        .renombrar_producto(&id, &sucursal, &producto, &request.nombre()?)
        .await?;
    Ok(Json(franquicia.into()))
}

/// DELETE /franquicias/:id/sucursales/:sucursal/productos/:producto
///
/// Returns a plain-text confirmation.
pub async fn eliminar_producto(
    State(state): State<AppState>,
    Path((id, sucursal, producto)): Path<(String, String, String)>,
) -> Result<String, AppError> {
    state
        .franquicia_service
        .eliminar_producto(&id, &sucursal, &producto)
        .await
}

/// PUT /franquicias/:id/sucursales/:sucursal/productos/:producto/stock
pub async fn actualizar_stock(
    State(state): State<AppState>,
    Path((id, sucursal, producto)): Path<(String, String, String)>,
    payload: Result<Json<StockRequest>, JsonRejection>,
) -> Result<Json<FranquiciaResponse>, AppError> {
    let Json(request) = payload?;
    let stock = request
        .stock
        .ok_or_else(|| AppError::BadRequest("El campo 'stock' es obligatorio.".to_string()))?;

    let franquicia = state
        .franquicia_service
        .actualizar_stock(&id, &sucursal, &producto, stock)
        .await?;
    Ok(Json(franquicia.into()))
}

/// DELETE /franquicias/:id/productos/:producto
///
/// Remove a product from every branch that carries it.
pub async fn eliminar_producto_en_todas(
    State(state): State<AppState>,
    Path((id, producto)): Path<(String, String)>,
) -> Result<String, AppError> {
    state
        .franquicia_service
        .eliminar_producto_en_todas(&id, &producto)
        .await
}

/// GET /franquicias/:id/productos-max-stock
///
/// The highest-stock product of each branch. An empty branch fails the whole request.
pub async fn productos_max_stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ProductoMaxStock>>, AppError> {
    let items = state
        .franquicia_service
        .productos_max_stock(&id)
        .await?
        .try_collect()
        .await?;
    Ok(Json(items))
}
