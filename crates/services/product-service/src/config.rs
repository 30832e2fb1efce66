//! Product service configuration.

use std::time::Duration;

use common::{AppResult, CacheConfig, DatabaseConfig, JwtConfig, ServerConfig};
use domain::PRODUCTS_CACHE_TTL_SECONDS;

/// Environment variable prefix for this service
pub const ENV_PREFIX: &str = "PRODUCT_SERVICE";

/// Default Redis key prefix for this service
pub const DEFAULT_CACHE_INSTANCE_NAME: &str = "ProductService_";

/// Operational override for the catalog page TTL, in seconds
pub const CACHE_TTL_ENV: &str = "PRODUCT_SERVICE_CACHE_TTL_SECONDS";

/// Product service configuration.
#[derive(Debug, Clone)]
pub struct ProductServiceConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    /// Used only to verify tokens minted by the auth service
    pub jwt: JwtConfig,
    /// Lifetime of a cached catalog page
    pub cache_ttl: Duration,
}

impl ProductServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            server: ServerConfig::from_env(ENV_PREFIX, 8082),
            database: DatabaseConfig::from_env(ENV_PREFIX, "product_db"),
            cache: CacheConfig::from_env(ENV_PREFIX, DEFAULT_CACHE_INSTANCE_NAME),
            jwt: JwtConfig::from_env()?,
            cache_ttl: cache_ttl_from(std::env::var(CACHE_TTL_ENV).ok()),
        })
    }
}

/// Page TTL from the raw override. Unset, zero or unparsable values keep the
/// fixed 30-minute default.
pub fn cache_ttl_from(raw: Option<String>) -> Duration {
    let seconds = raw
        .and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|&secs| secs > 0)
        .unwrap_or(PRODUCTS_CACHE_TTL_SECONDS);
    Duration::from_secs(seconds)
}
