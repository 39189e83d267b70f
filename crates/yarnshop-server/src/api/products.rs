use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use yarnshop_core::Product;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct ProductsQuery {
    platform: Option<String>,
    category: Option<String>,
    search: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct ProductsResponse {
    pub products: Vec<Product>,
    pub total: usize,
}

/// `GET /api/products` — filtered catalog.
///
/// `platform` and `category` are exact matches; `"all"` (the UI's default
/// option) means no filter. `search` is a case-insensitive substring match
/// on title and description.
pub(super) async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Json<ProductsResponse> {
    let products = state
        .catalog
        .fetch_all_products(
            query.platform.as_deref(),
            query.category.as_deref(),
            query.search.as_deref(),
        )
        .await;
    Json(ProductsResponse {
        total: products.len(),
        products,
    })
}

/// `GET /api/product/{id}` — single product lookup.
pub(super) async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let outcome = state.catalog.fetch_listings_or_mock().await;
    outcome
        .products
        .into_iter()
        .find(|p| p.id == id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Product not found"))
}
