//! Auth service configuration.

use common::{AppResult, DatabaseConfig, JwtConfig, ServerConfig};

/// Environment variable prefix for this service
pub const ENV_PREFIX: &str = "AUTH_SERVICE";

/// Auth service configuration.
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    /// Token signing settings shared with the product service
    pub jwt: JwtConfig,
}

impl AuthServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Fails when `JWT_SECRET` is missing or shorter than 32 characters.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            server: ServerConfig::from_env(ENV_PREFIX, 8081),
            database: DatabaseConfig::from_env(ENV_PREFIX, "auth_db"),
            jwt: JwtConfig::from_env()?,
        })
    }
}
