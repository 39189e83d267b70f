//! Catalog orchestration: token, page loop, normalization, mock fallback.

use yarnshop_core::{filter_products, mock_catalog, AppConfig, Product};

use crate::client::TradingClient;
use crate::error::EbayError;
use crate::normalize::normalize_listing;
use crate::parse::parse_page;
use crate::token::TokenProvider;

/// Hard ceiling on the pagination loop. A seller with more than
/// `MAX_PAGES × entries_per_page` listings gets a truncated catalog and a
/// warning instead of an unbounded request storm.
pub const MAX_PAGES: u32 = 20;

/// Result of a degraded-capable catalog fetch: the products to serve, plus
/// the failure that forced the mock fallback, when one occurred.
#[derive(Debug)]
pub struct CatalogOutcome {
    pub products: Vec<Product>,
    /// `Some` when `products` is the built-in mock catalog standing in for
    /// the live listings. Carries the typed failure for diagnostics.
    pub degraded: Option<EbayError>,
}

/// Orchestrates the ingestion pipeline across all pages of the seller's
/// listings.
///
/// Page retrieval is strictly sequential: whether a next page exists is
/// only known after parsing the previous one. Concurrent fetches share
/// nothing but the token cache inside [`TokenProvider`].
pub struct CatalogService {
    token_provider: TokenProvider,
    trading: Option<TradingClient>,
    entries_per_page: u32,
}

impl CatalogService {
    /// Builds the service from application configuration. The Trading
    /// client is only constructed when credentials are present; without
    /// them every fetch degrades to the mock catalog.
    ///
    /// # Errors
    ///
    /// Returns [`EbayError::Http`] if an underlying HTTP client cannot be
    /// constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, EbayError> {
        let token_provider = TokenProvider::from_config(config)?;

        let trading = match (&config.ebay_app_id, &config.ebay_cert_id) {
            (Some(app_id), Some(cert_id)) => Some(TradingClient::new(
                &config.ebay_trading_url,
                app_id,
                config.ebay_dev_id.as_deref().unwrap_or_default(),
                cert_id,
                &config.ebay_site_id,
                config.ebay_page_timeout_secs,
            )?),
            _ => None,
        };

        Ok(Self {
            token_provider,
            trading,
            entries_per_page: config.ebay_entries_per_page,
        })
    }

    /// Fetches and normalizes every listing the seller has, across all
    /// pages.
    ///
    /// Stops when the reported total page count is reached, or
    /// unconditionally at [`MAX_PAGES`] (with a warning, keeping what was
    /// collected — the ceiling is a deliberate cutoff, not a failure).
    ///
    /// All-or-nothing on parse failure: a malformed page aborts the whole
    /// fetch and discards earlier pages rather than returning a silently
    /// incomplete catalog.
    ///
    /// # Errors
    ///
    /// - [`EbayError::MissingCredentials`] — integration not configured.
    /// - Any token failure from [`TokenProvider::get_token`].
    /// - [`EbayError::Http`] — transport failure on any page.
    /// - [`EbayError::Xml`] — malformed page body.
    pub async fn fetch_all_listings(&self) -> Result<Vec<Product>, EbayError> {
        let trading = self.trading.as_ref().ok_or(EbayError::MissingCredentials)?;

        // One token per top-level fetch, not one per page.
        let token = self.token_provider.get_token().await?;

        let mut products = Vec::new();
        let mut page_number = 1u32;

        loop {
            let raw_page = trading
                .fetch_page(&token, page_number, self.entries_per_page)
                .await?;
            let parsed = parse_page(&raw_page.body)?;

            if let Some(ack) = parsed
                .ack
                .as_deref()
                .filter(|a| !a.eq_ignore_ascii_case("success"))
            {
                tracing::warn!(page_number, ack, status = raw_page.status, "listings page reported non-success ack");
            }

            let before = products.len();
            products.extend(parsed.listings.iter().filter_map(normalize_listing));
            let skipped = parsed.listings.len() - (products.len() - before);
            if skipped > 0 {
                tracing::debug!(page_number, skipped, "skipped records without an item id");
            }

            if !parsed.has_more(page_number) {
                break;
            }
            if page_number >= MAX_PAGES {
                tracing::warn!(
                    max_pages = MAX_PAGES,
                    collected = products.len(),
                    "page ceiling reached; returning partial catalog"
                );
                break;
            }
            page_number += 1;
        }

        tracing::info!(count = products.len(), pages = page_number, "fetched seller listings");
        Ok(products)
    }

    /// Degraded-capable fetch: live listings when the integration works,
    /// the built-in mock catalog otherwise.
    ///
    /// This is the only place a failure is converted into a successful
    /// (degraded) response; the typed failure is logged and returned
    /// alongside the products for diagnostics.
    pub async fn fetch_listings_or_mock(&self) -> CatalogOutcome {
        match self.fetch_all_listings().await {
            Ok(products) => CatalogOutcome {
                products,
                degraded: None,
            },
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    upstream_status = err.upstream_status(),
                    "eBay listing fetch failed; serving mock catalog"
                );
                CatalogOutcome {
                    products: mock_catalog(),
                    degraded: Some(err),
                }
            }
        }
    }

    /// Fetches the catalog (with mock fallback) and applies storefront
    /// filters: exact platform/category match with an `"all"` sentinel,
    /// case-insensitive substring search over title and description.
    pub async fn fetch_all_products(
        &self,
        platform: Option<&str>,
        category: Option<&str>,
        search: Option<&str>,
    ) -> Vec<Product> {
        let outcome = self.fetch_listings_or_mock().await;
        filter_products(outcome.products, platform, category, search)
    }
}
