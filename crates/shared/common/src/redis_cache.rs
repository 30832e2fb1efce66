//! Redis-backed [`CacheStore`].

use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, RedisError};
use tracing::{debug, info, warn};

use crate::cache::CacheStore;
use crate::config::CacheConfig;
use crate::error::AppResult;

/// Keys requested per SCAN round trip
const SCAN_BATCH: usize = 500;

/// Redis cache scoped by an instance-name key prefix.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
    instance_name: String,
}

impl RedisCache {
    /// Connect to Redis.
    pub async fn connect(config: &CacheConfig) -> Result<Self, RedisError> {
        debug!("Connecting to Redis at {}", config.url);
        let client = redis::Client::open(config.url.as_str())?;
        let conn = ConnectionManager::new(client).await?;
        info!(instance = %config.instance_name, "Redis cache connected");

        Ok(Self {
            conn,
            instance_name: config.instance_name.clone(),
        })
    }

    fn key(&self, key: &str) -> String {
        format!("{}{}", self.instance_name, key)
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> AppResult<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let value: Option<Vec<u8>> = conn.get(self.key(key)).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> AppResult<()> {
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(self.key(key), value, ttl.as_secs().max(1))
            .await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(self.key(key)).await?;
        Ok(())
    }

    /// Walks the keyspace with SCAN and removes matches with UNLINK, falling
    /// back to DEL on servers without it.
    async fn remove_by_prefix(&self, prefix: &str) -> AppResult<u64> {
        let mut conn = self.conn.clone();
        let pattern = prefix_pattern(&self.key(prefix));

        let mut keys: Vec<String> = Vec::new();
        let mut cursor: u64 = 0;
        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await?;
            keys.extend(batch);
            if next == 0 {
                break;
            }
            cursor = next;
        }

        // SCAN may return a key more than once
        keys.sort_unstable();
        keys.dedup();

        if keys.is_empty() {
            return Ok(0);
        }

        let count = keys.len() as u64;

        let unlinked: Result<i64, RedisError> =
            redis::cmd("UNLINK").arg(&keys).query_async(&mut conn).await;

        if let Err(e) = unlinked {
            warn!("UNLINK failed, falling back to DEL: {}", e);
            let _: i64 = conn.del(&keys).await?;
        }

        debug!(pattern = %pattern, count, "Cache entries removed");
        Ok(count)
    }
}

/// MATCH pattern for every key starting with `prefix`, glob characters escaped.
fn prefix_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('*');
    pattern
}
