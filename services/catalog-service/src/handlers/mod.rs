pub mod create_product;
pub mod get_product;
pub mod health;
pub mod list_products;
pub mod update_product;

use axum::{http::StatusCode, Json};
use catalog::CatalogError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Map a catalog error onto an HTTP status and JSON body
pub fn error_response(err: CatalogError) -> ApiError {
    let status = match &err {
        CatalogError::Validation(_)
        | CatalogError::InvalidArgument(_)
        | CatalogError::InvalidRange { .. } => StatusCode::BAD_REQUEST,
        CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
        CatalogError::Dependency { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}
