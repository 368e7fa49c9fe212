use anyhow::Result;
use catalog::CatalogService;
use common::config::{CacheBackend, CatalogConfig};
use messaging::{ImageTaskPublisher, KafkaImagePublisher};
use read_model::{CacheAside, CacheStore, InMemoryCache, PostgresProductRepository, ProductRepository, RedisCache};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
}

impl AppState {
    /// Wire the catalog service to Postgres, the configured cache and Kafka
    pub async fn new(config: &CatalogConfig, pool: PgPool) -> Result<Self> {
        info!("Initializing application state...");

        let repository = Arc::new(PostgresProductRepository::new(pool)) as Arc<dyn ProductRepository>;

        let cache_store: Arc<dyn CacheStore> = match config.cache.backend {
            CacheBackend::Redis => {
                info!("Connecting to Redis...");
                let cache = RedisCache::new(&config.cache.redis_url).await?;
                info!("Redis connected");
                Arc::new(cache)
            }
            CacheBackend::Memory => {
                info!("Using in-process cache");
                Arc::new(InMemoryCache::new())
            }
        };
        let cache = CacheAside::new(cache_store, config.cache.ttl());

        info!("Creating Kafka image task publisher");
        let publisher = Arc::new(KafkaImagePublisher::new(
            &config.messaging.brokers,
            config.messaging.image_topic.clone(),
        )?) as Arc<dyn ImageTaskPublisher>;

        Ok(Self::from_service(CatalogService::new(repository, cache, publisher)))
    }

    pub fn from_service(catalog: CatalogService) -> Self {
        Self { catalog }
    }
}
