use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use domain::CreateProductCommand;
use serde::Serialize;
use tracing::{error, info};

use super::{bad_request, error_response, ApiError};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreateProductResponse {
    pub message: String,
    pub product_id: i64,
}

/// Handle create product request
pub async fn handle(
    State(state): State<AppState>,
    payload: Result<Json<CreateProductCommand>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateProductResponse>), ApiError> {
    let Json(cmd) = payload.map_err(|e| {
        error!("Failed to decode request body: {}", e);
        bad_request("Invalid request payload")
    })?;

    info!("Received create product request for user: {}", cmd.user_id);

    let product_id = state.catalog.create_product(cmd).await.map_err(error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(CreateProductResponse {
            message: "Product created successfully".to_string(),
            product_id,
        }),
    ))
}
