//! Auth Service Library
//!
//! Registration, login and token refresh over HTTP.
//! It can be run as a standalone service or embedded in the combined binary.

pub mod config;
pub mod handlers;
pub mod infra;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;

use common::{Database, HealthCheck, JwtKeys, MigrateAction};

use crate::config::AuthServiceConfig;
use crate::infra::Migrator;
use crate::repository::IdentityStore;
use crate::routes::create_router;
use crate::service::{Authenticator, TokenIssuer};
use crate::state::AppState;

/// Run the auth service as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = AuthServiceConfig::from_env()?;
    run_server_with_config(host, port, config).await
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = AuthServiceConfig::from_env()?;
    let db = Database::connect(&config.database).await?;
    db.migrate::<Migrator>(action).await?;
    Ok(())
}

/// Run the HTTP server with the given configuration.
async fn run_server_with_config(
    host: &str,
    port: u16,
    config: AuthServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize database
    let db = Database::connect_and_migrate::<Migrator>(&config.database).await?;

    // Create repository and service
    let identities = Arc::new(IdentityStore::new(db.get_connection()));
    let tokens = TokenIssuer::new(JwtKeys::new(&config.jwt));
    let auth_service = Arc::new(Authenticator::new(identities, tokens));

    let probes: Vec<Arc<dyn HealthCheck>> = vec![Arc::new(db)];
    let state = AppState::new(auth_service, probes);

    let app = create_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Auth service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
