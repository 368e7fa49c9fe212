use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use read_model::Product;
use tracing::{error, info};

use super::{bad_request, error_response, ApiError};
use crate::state::AppState;

/// Get a single product by ID
pub async fn handle(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Product>, ApiError> {
    let Path(product_id) = path.map_err(|e| {
        error!("Invalid product ID in path: {}", e);
        bad_request("Invalid product ID")
    })?;

    info!("Fetching product: {}", product_id);

    let product = state.catalog.get_product(product_id).await.map_err(error_response)?;
    Ok(Json(product))
}
