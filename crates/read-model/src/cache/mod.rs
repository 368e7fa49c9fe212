pub mod cache_aside;
pub mod memory_cache;
pub mod redis_cache;

pub use cache_aside::CacheAside;
pub use memory_cache::InMemoryCache;
pub use redis_cache::RedisCache;

use async_trait::async_trait;
use std::time::Duration;

use crate::ReadModelError;

/// Key/value store the read path caches serialized views in
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetch a value. `Ok(None)` is a miss.
    async fn get(&self, key: &str) -> Result<Option<String>, ReadModelError>;

    /// Store a value that expires after `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), ReadModelError>;

    /// Remove a key. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), ReadModelError>;

    /// Check if the store is reachable (health check)
    async fn ping(&self) -> Result<(), ReadModelError>;
}

/// Cache key for a single product
pub fn product_key(product_id: i64) -> String {
    format!("product:{}", product_id)
}

/// Cache key for a user's filtered product listing
pub fn user_products_key(user_id: i64) -> String {
    format!("products:user:{}", user_id)
}
