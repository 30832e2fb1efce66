//! Application state for dependency injection.

use std::sync::Arc;

use common::HealthCheck;

use crate::service::AuthService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub health_probes: Vec<Arc<dyn HealthCheck>>,
}

impl AppState {
    /// Create new app state.
    pub fn new(auth_service: Arc<dyn AuthService>, health_probes: Vec<Arc<dyn HealthCheck>>) -> Self {
        Self {
            auth_service,
            health_probes,
        }
    }
}
