use common::metrics::{record_image_task, record_operation};
use domain::{CreateProductCommand, ImageProcessingRequested, UpdateProductCommand};
use messaging::ImageTaskPublisher;
use read_model::cache::{product_key, user_products_key};
use read_model::{build_filter_query, CacheAside, Product, ProductFilter, ProductRepository};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

use crate::errors::CatalogError;

/// Reachability of the service's dependencies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyStatus {
    pub database: bool,
    pub cache: bool,
}

impl DependencyStatus {
    /// The cache is best effort, so only the database decides readiness.
    pub fn is_ready(&self) -> bool {
        self.database
    }
}

/// Product catalog operations
///
/// All collaborators are injected; nothing here reaches for process-wide state.
#[derive(Clone)]
pub struct CatalogService {
    repository: Arc<dyn ProductRepository>,
    cache: CacheAside,
    publisher: Arc<dyn ImageTaskPublisher>,
}

impl CatalogService {
    pub fn new(
        repository: Arc<dyn ProductRepository>,
        cache: CacheAside,
        publisher: Arc<dyn ImageTaskPublisher>,
    ) -> Self {
        Self {
            repository,
            cache,
            publisher,
        }
    }

    /// Persist a new product and request processing of its images.
    ///
    /// A publish failure fails the call even though the product row has
    /// already been written.
    pub async fn create_product(&self, cmd: CreateProductCommand) -> Result<i64, CatalogError> {
        observe("create_product", async {
            if let Err(e) = cmd.check() {
                warn!(user_id = cmd.user_id, "Rejected product creation: {}", e);
                return Err(e.into());
            }

            let product_id = self.repository.create(&cmd).await.map_err(|e| {
                error!(user_id = cmd.user_id, "Failed to insert product into database: {}", e);
                CatalogError::from(e)
            })?;

            let task = ImageProcessingRequested::new(product_id, cmd.product_images);
            if let Err(e) = self.publisher.publish(&task).await {
                error!(
                    product_id,
                    image_urls = ?task.image_urls,
                    "Failed to enqueue image processing task: {}",
                    e
                );
                record_image_task(false);
                return Err(e.into());
            }
            record_image_task(true);

            info!(product_id, "Product created successfully");
            Ok(product_id)
        })
        .await
    }

    /// Fetch one product, preferring the cache.
    pub async fn get_product(&self, product_id: i64) -> Result<Product, CatalogError> {
        observe("get_product", async {
            let key = product_key(product_id);

            self.cache
                .read_through(&key, || async {
                    match self.repository.get_by_id(product_id).await? {
                        Some(product) => Ok(product),
                        None => {
                            warn!(product_id, "Product not found");
                            Err(CatalogError::NotFound(product_id))
                        }
                    }
                })
                .await
        })
        .await
    }

    /// List a user's products matching `filter`.
    ///
    /// Always queries the store, then overwrites the user's collection cache
    /// entry with whatever this query returned.
    pub async fn get_products(&self, user_id: i64, filter: &ProductFilter) -> Result<Vec<Product>, CatalogError> {
        observe("get_products", async {
            let query = build_filter_query(user_id, filter)?;

            info!(
                user_id,
                query = %query.sql,
                params = ?query.args,
                "Executing query to fetch products"
            );

            let products = self.repository.find_filtered(&query).await.map_err(|e| {
                error!(user_id, "Failed to retrieve products: {}", e);
                CatalogError::from(e)
            })?;

            self.cache.populate(&user_products_key(user_id), &products).await;

            Ok(products)
        })
        .await
    }

    /// Overwrite a product's mutable attributes and drop its cached copy.
    ///
    /// Updating an unknown ID is not an error. Collection cache entries that
    /// include the product are left to expire on their own.
    pub async fn update_product(&self, product_id: i64, cmd: UpdateProductCommand) -> Result<(), CatalogError> {
        observe("update_product", async {
            if let Err(e) = cmd.check() {
                warn!(product_id, "Rejected product update: {}", e);
                return Err(e.into());
            }

            let rows = self.repository.update(product_id, &cmd).await.map_err(|e| {
                error!(product_id, "Failed to update product: {}", e);
                CatalogError::from(e)
            })?;

            if rows == 0 {
                warn!(product_id, "Update matched no product");
            }

            self.cache.invalidate(&product_key(product_id)).await;

            info!(product_id, "Product updated successfully");
            Ok(())
        })
        .await
    }

    pub async fn check_dependencies(&self) -> DependencyStatus {
        let database = match self.repository.ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Database health check failed: {}", e);
                false
            }
        };

        let cache = match self.cache.ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Cache health check failed: {}", e);
                false
            }
        };

        DependencyStatus { database, cache }
    }
}

async fn observe<T, Fut>(operation: &str, fut: Fut) -> Result<T, CatalogError>
where
    Fut: Future<Output = Result<T, CatalogError>>,
{
    let start = Instant::now();
    let result = fut.await;
    record_operation(operation, result.is_ok(), start.elapsed().as_secs_f64());
    result
}
