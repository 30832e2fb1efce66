//! Product Service Library
//!
//! Cached catalog queries and product creation over HTTP.
//! It can be run as a standalone service or embedded in the combined binary.

pub mod config;
pub mod handlers;
pub mod infra;
pub mod middleware;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use common::{
    CacheConfig, CacheProbe, CacheStore, Database, HealthCheck, JwtKeys, LoggingEventPublisher,
    MemoryCache, MigrateAction, RedisCache,
};

use crate::config::ProductServiceConfig;
use crate::infra::Migrator;
use crate::repository::CatalogStore;
use crate::routes::create_router;
use crate::service::ProductCatalog;
use crate::state::AppState;

/// Run the product service as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = ProductServiceConfig::from_env()?;
    run_server_with_config(host, port, config).await
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = ProductServiceConfig::from_env()?;
    let db = Database::connect(&config.database).await?;
    db.migrate::<Migrator>(action).await?;
    Ok(())
}

/// Connect to Redis, falling back to a process-local cache when it is unreachable.
async fn connect_cache(config: &CacheConfig) -> Arc<dyn CacheStore> {
    match RedisCache::connect(config).await {
        Ok(cache) => {
            info!("Connected to Redis cache");
            Arc::new(cache)
        }
        Err(e) => {
            warn!(error = %e, "Redis unavailable, using in-memory cache");
            Arc::new(MemoryCache::new())
        }
    }
}

/// Run the HTTP server with the given configuration.
async fn run_server_with_config(
    host: &str,
    port: u16,
    config: ProductServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize database
    let db = Database::connect_and_migrate::<Migrator>(&config.database).await?;
    let cache = connect_cache(&config.cache).await;

    // Create repository and service
    let catalog = Arc::new(CatalogStore::new(db.get_connection()));
    let product_service = Arc::new(ProductCatalog::new(
        catalog,
        cache.clone(),
        Arc::new(LoggingEventPublisher),
        config.cache_ttl,
    ));

    let probes: Vec<Arc<dyn HealthCheck>> = vec![Arc::new(db), Arc::new(CacheProbe(cache))];
    let state = AppState::new(product_service, Arc::new(JwtKeys::new(&config.jwt)), probes);

    let app = create_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Product service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
