use axum::{extract::State, Json};
use serde::Serialize;
use yarnshop_core::Product;

use super::AppState;

/// Success envelope for the catalog listing endpoint:
/// `{status: "success", itemCount, items}`.
#[derive(Debug, Serialize)]
pub(super) struct ListingsResponse {
    pub status: &'static str,
    #[serde(rename = "itemCount")]
    pub item_count: usize,
    pub items: Vec<Product>,
}

/// `GET /catalog/listings` — the seller's full listing set.
///
/// Wrapped in the mock fallback: a broken marketplace integration degrades
/// to the built-in catalog rather than surfacing a hard error to shoppers.
/// The underlying failure is logged with its upstream status by the
/// catalog service.
pub(super) async fn catalog_listings(State(state): State<AppState>) -> Json<ListingsResponse> {
    let outcome = state.catalog.fetch_listings_or_mock().await;
    Json(ListingsResponse {
        status: "success",
        item_count: outcome.products.len(),
        items: outcome.products,
    })
}
