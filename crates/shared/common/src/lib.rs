//! Common utilities shared across the services.
//!
//! This crate provides:
//! - Unified error handling and the result envelope
//! - Configuration structures
//! - Cache and event publishing abstractions
//! - Optional database, JWT and Redis plumbing behind features

pub mod cache;
pub mod config;
pub mod error;
pub mod events;
pub mod extractors;
pub mod health;
pub mod response;

#[cfg(feature = "database")]
pub mod database;
#[cfg(feature = "jwt")]
pub mod jwt;
#[cfg(feature = "cache")]
pub mod redis_cache;

pub use cache::{CacheStore, CacheStoreExt, MemoryCache};
pub use config::*;
pub use error::{AppError, AppResult};
pub use events::{EventPublisher, LoggingEventPublisher};
pub use extractors::ValidatedJson;
pub use health::{health_report, CacheProbe, HealthCheck};
pub use response::{Created, ServiceResult};

#[cfg(any(test, feature = "test-utils"))]
pub use cache::MockCacheStore;
#[cfg(any(test, feature = "test-utils"))]
pub use events::MockEventPublisher;

#[cfg(feature = "database")]
pub use database::{Database, MigrateAction};
#[cfg(feature = "jwt")]
pub use jwt::{Claims, JwtKeys};
#[cfg(feature = "cache")]
pub use redis_cache::RedisCache;
