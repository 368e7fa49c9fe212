pub mod errors;
pub mod service;

pub use errors::CatalogError;
pub use service::CatalogService;
