use common::metrics::{record_cache_request, CacheOutcome};
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

use super::CacheStore;
use crate::ReadModelError;

/// Cache-aside coordination between a [`CacheStore`] and a backing store.
///
/// The cache is never a source of truth: every cache failure degrades to a
/// miss on read and is logged and dropped on write. Population only happens
/// after the backing store returned successfully.
#[derive(Clone)]
pub struct CacheAside {
    store: Arc<dyn CacheStore>,
    ttl: Duration,
}

impl CacheAside {
    pub fn new(store: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached value for `key`, or run `loader` and cache its result.
    ///
    /// A loader error is returned as-is and nothing is written to the cache.
    pub async fn read_through<T, E, F, Fut>(&self, key: &str, loader: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(cached) = self.lookup::<T>(key).await {
            return Ok(cached);
        }

        let value = loader().await?;
        self.populate(key, &value).await;

        Ok(value)
    }

    /// Write `value` under `key` with the configured TTL. Best effort.
    pub async fn populate<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize value for cache key {}: {}", key, e);
                return;
            }
        };

        match self.store.set(key, &json, self.ttl).await {
            Ok(()) => debug!("Cached value for key: {} with TTL: {}s", key, self.ttl.as_secs()),
            Err(e) => error!("Failed to set cache for key {}: {}", key, e),
        }
    }

    /// Drop `key` from the cache so the next read goes to the backing store.
    pub async fn invalidate(&self, key: &str) {
        match self.store.delete(key).await {
            Ok(()) => debug!("Invalidated cache for key: {}", key),
            Err(e) => error!("Failed to invalidate cache for key {}: {}", key, e),
        }
    }

    /// Check if the underlying store is reachable
    pub async fn ping(&self) -> Result<(), ReadModelError> {
        self.store.ping().await
    }

    async fn lookup<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let cache_type = cache_type(key);

        match self.store.get(key).await {
            // An empty value is a tombstone, not a hit.
            Ok(Some(raw)) if !raw.is_empty() => match serde_json::from_str::<T>(&raw) {
                Ok(value) => {
                    debug!("Cache hit for key: {}", key);
                    record_cache_request(cache_type, CacheOutcome::Hit);
                    Some(value)
                }
                Err(e) => {
                    warn!("Failed to deserialize cached value for {}: {}", key, e);
                    record_cache_request(cache_type, CacheOutcome::Miss);
                    None
                }
            },
            Ok(_) => {
                debug!("Cache miss for key: {}", key);
                record_cache_request(cache_type, CacheOutcome::Miss);
                None
            }
            Err(e) => {
                warn!("Cache unavailable for key {}, reading backing store: {}", key, e);
                record_cache_request(cache_type, CacheOutcome::Error);
                None
            }
        }
    }
}

/// Metric label for a key: the segment before the first `:`.
fn cache_type(key: &str) -> &str {
    key.split(':').next().unwrap_or(key)
}
