use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, RedisError};
use std::time::Duration;
use tracing::{debug, info};

use super::CacheStore;
use crate::ReadModelError;

/// Redis-backed cache store
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl RedisCache {
    /// Create new Redis cache
    pub async fn new(redis_url: &str) -> Result<Self, ReadModelError> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| ReadModelError::CacheError(format!("Failed to create Redis client: {}", e)))?;

        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| ReadModelError::CacheError(format!("Failed to connect to Redis: {}", e)))?;

        info!("Redis cache initialized");
        Ok(Self { conn })
    }
}

fn cache_error(op: &str, key: &str, e: RedisError) -> ReadModelError {
    ReadModelError::CacheError(format!("Redis {} failed for key {}: {}", op, key, e))
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, ReadModelError> {
        let value: Option<String> = self
            .conn
            .clone()
            .get(key)
            .await
            .map_err(|e| cache_error("GET", key, e))?;

        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), ReadModelError> {
        let seconds = ttl.as_secs();

        // SETEX rejects a zero expiry; an entry that expires immediately is a delete.
        if seconds == 0 {
            return self.delete(key).await;
        }

        let result: Result<(), RedisError> = self.conn.clone().set_ex(key, value, seconds).await;
        result.map_err(|e| cache_error("SETEX", key, e))?;

        debug!("Cached value for key: {} with TTL: {}s", key, seconds);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), ReadModelError> {
        let result: Result<(), RedisError> = self.conn.clone().del(key).await;
        result.map_err(|e| cache_error("DEL", key, e))?;

        debug!("Deleted cache for key: {}", key);
        Ok(())
    }

    async fn ping(&self) -> Result<(), ReadModelError> {
        let result: Result<String, RedisError> = redis::cmd("PING")
            .query_async(&mut self.conn.clone())
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => Err(ReadModelError::CacheError(format!("Redis ping failed: {}", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires Redis to be running
    async fn test_cache_operations() {
        let cache = RedisCache::new("redis://localhost:6379")
            .await
            .expect("Failed to connect to Redis");

        let key = "product:test-cache-operations";

        cache.set(key, "{\"id\":1}", Duration::from_secs(60)).await.unwrap();
        assert_eq!(cache.get(key).await.unwrap().as_deref(), Some("{\"id\":1}"));

        cache.delete(key).await.unwrap();
        assert!(cache.get(key).await.unwrap().is_none());
    }

    #[tokio::test]
    #[ignore] // Requires Redis to be running
    async fn test_zero_ttl_removes_key() {
        let cache = RedisCache::new("redis://localhost:6379")
            .await
            .expect("Failed to connect to Redis");

        let key = "product:test-zero-ttl";
        cache.set(key, "value", Duration::from_secs(60)).await.unwrap();
        cache.set(key, "", Duration::ZERO).await.unwrap();

        assert!(cache.get(key).await.unwrap().is_none());
    }

    #[tokio::test]
    #[ignore] // Requires Redis to be running
    async fn test_ping() {
        let cache = RedisCache::new("redis://localhost:6379")
            .await
            .expect("Failed to connect to Redis");

        assert!(cache.ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_url_is_cache_error() {
        let result = RedisCache::new("not-a-redis-url").await;
        assert!(matches!(result, Err(ReadModelError::CacheError(_))));
    }
}
