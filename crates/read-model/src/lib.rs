pub mod cache;
pub mod query;
pub mod repositories;

pub use cache::{CacheAside, CacheStore, InMemoryCache, RedisCache};
pub use query::{build_filter_query, FilterArg, FilterQuery, ProductFilter};
pub use repositories::{PostgresProductRepository, Product, ProductRepository};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadModelError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid range: min_price {min} is greater than max_price {max}")]
    InvalidRange { min: f64, max: f64 },
}
