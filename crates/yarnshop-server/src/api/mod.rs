mod listings;
mod products;

use std::path::Path;
use std::sync::Arc;

use axum::{
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::middleware::request_id;
use yarnshop_ebay::CatalogService;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
}

/// The structured error object returned by the JSON API.
///
/// Shape is part of the storefront contract: `{status: "error", message,
/// details?, errorCode, timestamp}`.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(rename = "errorCode")]
    pub error_code: String,
    pub timestamp: DateTime<Utc>,
}

impl ApiError {
    pub fn new(
        error_code: impl Into<String>,
        message: impl Into<String>,
        details: Option<String>,
    ) -> Self {
        Self {
            status: "error",
            message: message.into(),
            details,
            error_code: error_code.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("not_found", message, None)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error_code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState, static_dir: &Path) -> Router {
    // Static assets are served with no-cache headers so the storefront
    // picks up catalog changes without a hard refresh.
    let static_service = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache, no-store, must-revalidate"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::PRAGMA,
            HeaderValue::from_static("no-cache"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::EXPIRES,
            HeaderValue::from_static("0"),
        ))
        .service(ServeDir::new(static_dir));

    Router::new()
        .route("/health", get(health))
        .route("/catalog/listings", get(listings::catalog_listings))
        .route("/api/products", get(products::list_products))
        .route("/api/product/{id}", get(products::get_product))
        .fallback_service(static_service)
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health() -> Json<HealthData> {
    Json(HealthData { status: "ok" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use std::path::PathBuf;
    use tower::ServiceExt;
    use yarnshop_core::{AppConfig, Environment};

    /// Config with no credentials: every catalog call degrades to the
    /// built-in mock catalog, so no network is touched.
    fn offline_config() -> AppConfig {
        AppConfig {
            env: Environment::Test,
            bind_addr: "127.0.0.1:0".parse().expect("valid socket addr"),
            log_level: "info".to_owned(),
            static_dir: PathBuf::from("./public"),
            ebay_app_id: None,
            ebay_cert_id: None,
            ebay_dev_id: None,
            ebay_auth_token: None,
            ebay_oauth_url: "http://127.0.0.1:1/token".to_owned(),
            ebay_trading_url: "http://127.0.0.1:1/api.dll".to_owned(),
            ebay_oauth_scope: "https://api.ebay.com/oauth/api_scope".to_owned(),
            ebay_site_id: "3".to_owned(),
            ebay_entries_per_page: 200,
            ebay_token_timeout_secs: 1,
            ebay_page_timeout_secs: 1,
        }
    }

    fn test_app() -> Router {
        let config = offline_config();
        let catalog =
            Arc::new(CatalogService::from_config(&config).expect("catalog service builds"));
        build_app(AppState { catalog }, &config.static_dir)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json = serde_json::from_slice(&body).expect("json parse");
        (status, json)
    }

    #[test]
    fn api_error_serializes_contract_fields() {
        let err = ApiError::new("auth_error", "token exchange failed", Some("401".to_owned()));
        let json = serde_json::to_value(&err).expect("serialize");
        assert_eq!(json["status"], "error");
        assert_eq!(json["errorCode"], "auth_error");
        assert_eq!(json["message"], "token exchange failed");
        assert_eq!(json["details"], "401");
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn api_error_omits_absent_details() {
        let err = ApiError::not_found("Product not found");
        let json = serde_json::to_value(&err).expect("serialize");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn api_error_not_found_maps_to_404() {
        let response = ApiError::not_found("Product not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let (status, json) = get_json(test_app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn catalog_listings_returns_success_envelope() {
        let (status, json) = get_json(test_app(), "/catalog/listings").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "success");
        assert_eq!(json["itemCount"], 4);
        let items = json["items"].as_array().expect("items array");
        assert_eq!(items.len(), 4);
        assert_eq!(items[0]["id"], "tik1");
        assert!(items[0]["priceValue"].is_number());
    }

    #[tokio::test]
    async fn list_products_returns_products_and_total() {
        let (status, json) = get_json(test_app(), "/api/products").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"], 4);
        assert_eq!(json["products"].as_array().map(Vec::len), Some(4));
    }

    #[tokio::test]
    async fn list_products_applies_platform_filter() {
        let (status, json) = get_json(test_app(), "/api/products?platform=eBay").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"], 2);
        let products = json["products"].as_array().expect("products");
        assert!(products.iter().all(|p| p["platform"] == "eBay"));
    }

    #[tokio::test]
    async fn list_products_all_sentinel_disables_filters() {
        let (status, json) =
            get_json(test_app(), "/api/products?platform=all&category=all").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"], 4);
    }

    #[tokio::test]
    async fn list_products_applies_search_filter() {
        let (status, json) = get_json(test_app(), "/api/products?search=alpaca").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"], 1);
        assert_eq!(json["products"][0]["id"], "eb1");
    }

    #[tokio::test]
    async fn get_product_returns_product_by_id() {
        let (status, json) = get_json(test_app(), "/api/product/eb1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["id"], "eb1");
        assert_eq!(json["title"], "Alpaca Blend Yarn");
    }

    #[tokio::test]
    async fn get_product_returns_structured_404_for_unknown_id() {
        let (status, json) = get_json(test_app(), "/api/product/does-not-exist").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["status"], "error");
        assert_eq!(json["errorCode"], "not_found");
        assert_eq!(json["message"], "Product not found");
    }

    #[tokio::test]
    async fn responses_carry_a_request_id() {
        let app = test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn incoming_request_id_is_echoed_back() {
        let app = test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("x-request-id", "req-abc-123")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(
            response.headers().get("x-request-id").map(|v| v.to_str().unwrap()),
            Some("req-abc-123")
        );
    }
}
