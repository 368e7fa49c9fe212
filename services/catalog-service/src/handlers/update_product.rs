use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use domain::UpdateProductCommand;
use tracing::{error, info};

use super::{bad_request, error_response, ApiError, MessageResponse};
use crate::state::AppState;

/// Handle update product request
pub async fn handle(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateProductCommand>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(product_id) = path.map_err(|e| {
        error!("Invalid product ID in path: {}", e);
        bad_request("Invalid product ID")
    })?;

    let Json(cmd) = payload.map_err(|e| {
        error!("Failed to decode request body: {}", e);
        bad_request("Invalid request payload")
    })?;

    info!("Received update for product: {}", product_id);

    state
        .catalog
        .update_product(product_id, cmd)
        .await
        .map_err(error_response)?;

    Ok(Json(MessageResponse {
        message: "Product updated successfully".to_string(),
    }))
}
