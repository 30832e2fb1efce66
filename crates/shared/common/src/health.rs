//! Health reporting for backing services.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use crate::cache::CacheStore;
use crate::error::AppResult;

/// A dependency that can report whether it is reachable.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Name used as the key in the health report
    fn name(&self) -> &'static str;

    async fn ping(&self) -> AppResult<()>;
}

/// Probes a cache with a throwaway read.
pub struct CacheProbe(pub Arc<dyn CacheStore>);

#[async_trait]
impl HealthCheck for CacheProbe {
    fn name(&self) -> &'static str {
        "cache"
    }

    async fn ping(&self) -> AppResult<()> {
        self.0.get("health_check").await.map(|_| ())
    }
}

#[cfg(feature = "database")]
#[async_trait]
impl HealthCheck for crate::database::Database {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(crate::database::Database::ping(self).await?)
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub services: BTreeMap<&'static str, ServiceHealth>,
}

/// Service health with optional error message.
#[derive(Debug, Serialize)]
pub struct ServiceHealth {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Ping every probe. 200 when all are healthy, 503 otherwise.
pub async fn health_report(probes: &[Arc<dyn HealthCheck>]) -> Response {
    let mut services = BTreeMap::new();
    let mut all_healthy = true;

    for probe in probes {
        let health = match probe.ping().await {
            Ok(()) => ServiceHealth {
                status: "healthy".to_string(),
                error: None,
            },
            Err(e) => {
                all_healthy = false;
                ServiceHealth {
                    status: "unhealthy".to_string(),
                    error: Some(e.user_message()),
                }
            }
        };
        services.insert(probe.name(), health);
    }

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        services,
    };

    if all_healthy {
        (StatusCode::OK, Json(response)).into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response)).into_response()
    }
}
