//! Franquicias API Server
//!
//! Manages franchises, their branches and the stock of each branch's products.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sea_orm::Database;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{InMemoryFranquiciaRepository, PostgresFranquiciaRepository};
use app::FranquiciaService;
use config::{Config, StorageBackend};
use domain::ports::FranquiciaRepository;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub franquicia_service: Arc<FranquiciaService<dyn FranquiciaRepository>>,
}

impl AppState {
    pub fn new(franquicias: Arc<dyn FranquiciaRepository>) -> Self {
        Self {
            franquicia_service: Arc::new(FranquiciaService::new(franquicias)),
        }
    }
}

/// Build the HTTP router
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Franchises
        .route(
            "/franquicias",
            post(handlers::crear_franquicia).get(handlers::listar_franquicias),
        )
        .route(
            "/franquicias/:id",
            get(handlers::obtener_franquicia).put(handlers::renombrar_franquicia),
        )
        .route(
            "/franquicias/nombre/:nombre",
            get(handlers::obtener_franquicia_por_nombre),
        )
        .route(
            "/franquicias/:id/productos-max-stock",
            get(handlers::productos_max_stock),
        )
        // Branches
        .route(
            "/franquicias/:id/sucursales",
            post(handlers::agregar_sucursal),
        )
        .route(
            "/franquicias/:id/sucursales/:sucursal",
            put(handlers::renombrar_sucursal),
        )
        // Products
        .route(
            "/franquicias/:id/sucursales/:sucursal/productos",
            post(handlers::agregar_producto),
        )
        .route(
            "/franquicias/:id/sucursales/:sucursal/productos/:producto",
            put(handlers::renombrar_producto).delete(handlers::eliminar_producto),
        )
        .route(
            "/franquicias/:id/sucursales/:sucursal/productos/:producto/stock",
            put(handlers::actualizar_stock),
        )
        .route(
            "/franquicias/:id/productos/:producto",
            delete(handlers::eliminar_producto_en_todas),
        )
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Connect the configured storage backend
async fn build_repository(config: &Config) -> anyhow::Result<Arc<dyn FranquiciaRepository>> {
    match config.storage_backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            Ok(Arc::new(InMemoryFranquiciaRepository::new()))
        }
        StorageBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set")?;

            tracing::info!("Connecting to database...");
            let db = Database::connect(url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Database connected");

            let repo = PostgresFranquiciaRepository::new(db);
            if config.auto_migrate {
                repo.ensure_schema()
                    .await
                    .context("Failed to create franquicias table")?;
                tracing::info!("Schema ready");
            }
            Ok(Arc::new(repo))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,franquicias_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Franquicias API...");

    let config = Config::from_env()?;
    let repo = build_repository(&config).await?;
    let app = router(AppState::new(repo));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
