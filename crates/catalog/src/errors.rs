use domain::DomainError;
use messaging::PublisherError;
use read_model::ReadModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("min_price should be less than or equal to max_price (got {min} > {max})")]
    InvalidRange { min: f64, max: f64 },

    #[error("Product not found: {0}")]
    NotFound(i64),

    #[error("{dependency} error: {message}")]
    Dependency {
        dependency: &'static str,
        message: String,
    },
}

impl CatalogError {
    /// Caller mistakes that must not be retried
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CatalogError::Validation(_)
                | CatalogError::InvalidArgument(_)
                | CatalogError::InvalidRange { .. }
        )
    }
}

impl From<DomainError> for CatalogError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::ValidationError(msg) => CatalogError::Validation(msg),
        }
    }
}

impl From<ReadModelError> for CatalogError {
    fn from(err: ReadModelError) -> Self {
        match err {
            ReadModelError::InvalidArgument(msg) => CatalogError::InvalidArgument(msg),
            ReadModelError::InvalidRange { min, max } => CatalogError::InvalidRange { min, max },
            ReadModelError::DatabaseError(e) => CatalogError::Dependency {
                dependency: "database",
                message: e.to_string(),
            },
            ReadModelError::SerializationError(e) => CatalogError::Dependency {
                dependency: "serialization",
                message: e.to_string(),
            },
            ReadModelError::CacheError(msg) => CatalogError::Dependency {
                dependency: "cache",
                message: msg,
            },
        }
    }
}

impl From<PublisherError> for CatalogError {
    fn from(err: PublisherError) -> Self {
        CatalogError::Dependency {
            dependency: "notification",
            message: err.to_string(),
        }
    }
}
