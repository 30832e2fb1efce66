//! Key/value cache abstraction.
//!
//! Services depend on [`CacheStore`] so the backing store can be Redis in
//! production and [`MemoryCache`] in tests or when Redis is unreachable.

use std::sync::Arc;
use std::time::{Duration, Instant as StdInstant};

use async_trait::async_trait;
use moka::future::Cache;
use moka::Expiry;
use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::error::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Byte-oriented cache with TTL and prefix invalidation.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetch a live entry.
    async fn get(&self, key: &str) -> AppResult<Option<Vec<u8>>>;

    /// Store an entry that expires after `ttl`.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> AppResult<()>;

    async fn remove(&self, key: &str) -> AppResult<()>;

    /// Remove every entry whose key starts with `prefix`, returning how many went.
    async fn remove_by_prefix(&self, prefix: &str) -> AppResult<u64>;
}

/// JSON helpers layered over any [`CacheStore`].
#[async_trait]
pub trait CacheStoreExt: CacheStore {
    /// Fetch and decode a value. Undecodable entries count as a miss.
    async fn get_json<T>(&self, key: &str) -> AppResult<Option<T>>
    where
        T: DeserializeOwned + Send,
    {
        match self.get(key).await? {
            Some(bytes) => match serde_json::from_slice(&bytes) {
                Ok(value) => Ok(Some(value)),
                Err(e) => {
                    warn!("Failed to deserialize cached value for key {}: {}", key, e);
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    async fn set_json<T>(&self, key: &str, value: &T, ttl: Duration) -> AppResult<()>
    where
        T: Serialize + Sync,
    {
        let bytes = serde_json::to_vec(value)
            .map_err(|e| AppError::internal(format!("Cache serialization error: {}", e)))?;
        self.set(key, bytes, ttl).await
    }
}

impl<C: CacheStore + ?Sized> CacheStoreExt for C {}

/// Upper bound on entries held by a [`MemoryCache`].
pub const MEMORY_CACHE_MAX_ENTRIES: u64 = 10_000;

#[derive(Clone)]
struct CachedBytes {
    bytes: Vec<u8>,
    ttl: Duration,
}

/// Expires each entry after the TTL it was stored with.
struct PerEntryTtl;

impl Expiry<String, CachedBytes> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedBytes,
        _created_at: StdInstant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedBytes,
        _updated_at: StdInstant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Process-local cache backed by moka, bounded and evicting on expiry.
pub struct MemoryCache {
    entries: Cache<String, CachedBytes>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::with_capacity(MEMORY_CACHE_MAX_ENTRIES)
    }

    pub fn with_capacity(max_entries: u64) -> Self {
        let entries = Cache::builder()
            .max_capacity(max_entries)
            .expire_after(PerEntryTtl)
            .build();
        Self { entries }
    }

    /// Number of live entries.
    pub async fn len(&self) -> usize {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count() as usize
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> AppResult<Option<Vec<u8>>> {
        Ok(self.entries.get(key).await.map(|entry| entry.bytes))
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> AppResult<()> {
        self.entries
            .insert(key.to_string(), CachedBytes { bytes: value, ttl })
            .await;
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.entries.invalidate(key).await;
        Ok(())
    }

    async fn remove_by_prefix(&self, prefix: &str) -> AppResult<u64> {
        let keys: Vec<Arc<String>> = self
            .entries
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key)
            .collect();

        for key in &keys {
            self.entries.invalidate(key.as_str()).await;
        }
        Ok(keys.len() as u64)
    }
}
