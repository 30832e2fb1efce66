//! Application state for dependency injection.

use std::sync::Arc;

use common::{HealthCheck, JwtKeys};

use crate::service::ProductService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub product_service: Arc<dyn ProductService>,
    pub jwt_keys: Arc<JwtKeys>,
    pub health_probes: Vec<Arc<dyn HealthCheck>>,
}

impl AppState {
    /// Create new app state.
    pub fn new(
        product_service: Arc<dyn ProductService>,
        jwt_keys: Arc<JwtKeys>,
        health_probes: Vec<Arc<dyn HealthCheck>>,
    ) -> Self {
        Self {
            product_service,
            jwt_keys,
            health_probes,
        }
    }
}
