use axum::{
    extract::{Query, State},
    Json,
};
use read_model::{Product, ProductFilter};
use serde::Deserialize;
use tracing::info;

use super::{bad_request, error_response, ApiError};
use crate::state::AppState;

/// Raw listing query string; empty values count as absent
#[derive(Debug, Default, Deserialize)]
pub struct ListProductsParams {
    pub user_id: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub product_name: Option<String>,
}

impl ListProductsParams {
    /// Parse into the owning user and the optional filter predicates.
    ///
    /// Positivity of `user_id` and the price range are checked by the query
    /// builder, not here.
    pub fn parse(&self) -> Result<(i64, ProductFilter), String> {
        let user_id = present(&self.user_id)
            .and_then(|raw| raw.parse::<i64>().ok())
            .ok_or_else(|| "Invalid user_id".to_string())?;

        let filter = ProductFilter {
            min_price: parse_price(&self.min_price, "Invalid min_price")?,
            max_price: parse_price(&self.max_price, "Invalid max_price")?,
            name: present(&self.product_name).map(str::to_string),
        };

        Ok((user_id, filter))
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|raw| !raw.is_empty())
}

fn parse_price(value: &Option<String>, message: &str) -> Result<Option<f64>, String> {
    match present(value) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<f64>()
            .ok()
            .filter(|price| price.is_finite())
            .map(Some)
            .ok_or_else(|| message.to_string()),
    }
}

/// List a user's products with optional price and name filters
pub async fn handle(
    State(state): State<AppState>,
    Query(params): Query<ListProductsParams>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let (user_id, filter) = params.parse().map_err(bad_request)?;

    info!("Listing products for user: {}", user_id);

    let products = state
        .catalog
        .get_products(user_id, &filter)
        .await
        .map_err(error_response)?;

    info!("Retrieved {} products for user: {}", products.len(), user_id);
    Ok(Json(products))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> ListProductsParams {
        let get = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        };

        ListProductsParams {
            user_id: get("user_id"),
            min_price: get("min_price"),
            max_price: get("max_price"),
            product_name: get("product_name"),
        }
    }

    #[test]
    fn test_parse_all_fields() {
        let (user_id, filter) = params(&[
            ("user_id", "7"),
            ("min_price", "10"),
            ("max_price", "50.5"),
            ("product_name", "shirt"),
        ])
        .parse()
        .unwrap();

        assert_eq!(user_id, 7);
        assert_eq!(
            filter,
            ProductFilter {
                min_price: Some(10.0),
                max_price: Some(50.5),
                name: Some("shirt".to_string()),
            }
        );
    }

    #[test]
    fn test_empty_values_are_absent() {
        let (_, filter) = params(&[("user_id", "7"), ("min_price", ""), ("product_name", "")])
            .parse()
            .unwrap();

        assert_eq!(filter, ProductFilter::default());
    }

    #[test]
    fn test_missing_or_malformed_user_id() {
        assert_eq!(params(&[]).parse().unwrap_err(), "Invalid user_id");
        assert_eq!(
            params(&[("user_id", "seven")]).parse().unwrap_err(),
            "Invalid user_id"
        );
    }

    #[test]
    fn test_non_positive_user_id_is_left_to_the_builder() {
        let (user_id, _) = params(&[("user_id", "0")]).parse().unwrap();
        assert_eq!(user_id, 0);
    }

    #[test]
    fn test_malformed_prices() {
        assert_eq!(
            params(&[("user_id", "7"), ("min_price", "cheap")]).parse().unwrap_err(),
            "Invalid min_price"
        );
        assert_eq!(
            params(&[("user_id", "7"), ("max_price", "NaN")]).parse().unwrap_err(),
            "Invalid max_price"
        );
    }
}
