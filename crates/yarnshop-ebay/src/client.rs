//! HTTP client for the eBay Trading API `GetSellerList` call.

use std::time::Duration;

use chrono::{Duration as ChronoDuration, SecondsFormat, Utc};
use reqwest::Client;

use crate::error::EbayError;
use crate::types::RawListingPage;

/// Trading API version sent as `X-EBAY-API-COMPATIBILITY-LEVEL`.
const COMPATIBILITY_LEVEL: &str = "967";

/// Width of the listing end-time window requested from `GetSellerList`.
/// Active fixed-price listings renew within 30 days; 120 days of headroom
/// covers long-duration auction formats as well.
const END_TIME_WINDOW_DAYS: i64 = 120;

/// Client for the legacy Trading endpoint.
///
/// Sends one fixed XML request template per page and returns the response
/// body verbatim. Any response the transport delivers — including
/// error-bearing 2xx bodies — is data for the parser; the Trading API
/// embeds its errors in the XML rather than the HTTP status.
pub struct TradingClient {
    client: Client,
    trading_url: String,
    app_id: String,
    dev_id: String,
    cert_id: String,
    site_id: String,
}

impl TradingClient {
    /// Creates a client for the given Trading endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`EbayError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        trading_url: &str,
        app_id: &str,
        dev_id: &str,
        cert_id: &str,
        site_id: &str,
        timeout_secs: u64,
    ) -> Result<Self, EbayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            trading_url: trading_url.to_owned(),
            app_id: app_id.to_owned(),
            dev_id: dev_id.to_owned(),
            cert_id: cert_id.to_owned(),
            site_id: site_id.to_owned(),
        })
    }

    /// Fetches one page of the seller's listings.
    ///
    /// # Errors
    ///
    /// Returns [`EbayError::Http`] on network failure or timeout. Non-2xx
    /// statuses are NOT errors here; the body still goes to the parser.
    pub async fn fetch_page(
        &self,
        token: &str,
        page_number: u32,
        entries_per_page: u32,
    ) -> Result<RawListingPage, EbayError> {
        let body = request_body(token, page_number, entries_per_page);

        let response = self
            .client
            .post(&self.trading_url)
            .header("X-EBAY-API-COMPATIBILITY-LEVEL", COMPATIBILITY_LEVEL)
            .header("X-EBAY-API-DEV-NAME", &self.dev_id)
            .header("X-EBAY-API-APP-NAME", &self.app_id)
            .header("X-EBAY-API-CERT-NAME", &self.cert_id)
            .header("X-EBAY-API-SITEID", &self.site_id)
            .header("X-EBAY-API-CALL-NAME", "GetSellerList")
            .header(reqwest::header::CONTENT_TYPE, "text/xml")
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(page_number, status, bytes = body.len(), "fetched listings page");

        Ok(RawListingPage { status, body })
    }
}

/// Builds the fixed `GetSellerListRequest` template for one page.
fn request_body(token: &str, page_number: u32, entries_per_page: u32) -> String {
    let now = Utc::now();
    let end_from = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    let end_to = (now + ChronoDuration::days(END_TIME_WINDOW_DAYS))
        .to_rfc3339_opts(SecondsFormat::Millis, true);
    let token = escape_xml(token);

    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<GetSellerListRequest xmlns="urn:ebay:apis:eBLBaseComponents">
  <RequesterCredentials>
    <eBayAuthToken>{token}</eBayAuthToken>
  </RequesterCredentials>
  <ErrorLanguage>en_GB</ErrorLanguage>
  <WarningLevel>High</WarningLevel>
  <DetailLevel>ReturnAll</DetailLevel>
  <EndTimeFrom>{end_from}</EndTimeFrom>
  <EndTimeTo>{end_to}</EndTimeTo>
  <Pagination>
    <EntriesPerPage>{entries_per_page}</EntriesPerPage>
    <PageNumber>{page_number}</PageNumber>
  </Pagination>
</GetSellerListRequest>"#
    )
}

/// Escapes the characters XML element content cannot contain literally.
fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
