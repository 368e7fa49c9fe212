use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::DomainError;

/// Command to create a new product
///
/// Every field defaults when absent from the payload so that a missing
/// field surfaces as a validation error rather than a decoding error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateProductCommand {
    #[serde(default)]
    #[validate(range(min = 1, message = "user_id must be a positive integer"))]
    pub user_id: i64,

    #[serde(default)]
    #[validate(length(min = 1, message = "product_name cannot be empty"))]
    pub product_name: String,

    #[serde(default)]
    pub product_description: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, message = "Product must have at least one image"))]
    pub product_images: Vec<String>,

    #[serde(default)]
    #[validate(range(exclusive_min = 0.0, message = "product_price must be greater than 0"))]
    pub product_price: f64,
}

impl CreateProductCommand {
    pub fn check(&self) -> Result<(), DomainError> {
        self.validate().map_err(DomainError::from)
    }
}

/// Command to update the mutable attributes of an existing product.
///
/// Compressed images are deliberately absent: they are only ever written by
/// the image processing pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProductCommand {
    #[serde(default)]
    #[validate(length(min = 1, message = "product_name cannot be empty"))]
    pub product_name: String,

    #[serde(default)]
    pub product_description: Option<String>,

    #[serde(default)]
    pub product_images: Vec<String>,

    #[serde(default)]
    #[validate(range(exclusive_min = 0.0, message = "product_price must be greater than 0"))]
    pub product_price: f64,
}

impl UpdateProductCommand {
    pub fn check(&self) -> Result<(), DomainError> {
        self.validate().map_err(DomainError::from)
    }
}
