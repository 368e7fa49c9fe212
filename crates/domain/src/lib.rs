pub mod commands;
pub mod errors;
pub mod events;

pub use commands::product_commands::{CreateProductCommand, UpdateProductCommand};
pub use errors::DomainError;
pub use events::product_events::ImageProcessingRequested;
