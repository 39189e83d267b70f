//! OAuth client-credentials token provider for the eBay APIs.
//!
//! One token is acquired per catalog fetch at most; a guarded in-memory
//! cache short-circuits the exchange while the previous token is still
//! valid. A pre-issued `EBAY_AUTH_TOKEN` override skips the exchange
//! entirely.

use std::time::{Duration, Instant};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;
use yarnshop_core::AppConfig;

use crate::error::EbayError;

/// Seconds subtracted from the reported `expires_in` so a token is never
/// handed out moments before it lapses upstream.
const EXPIRY_MARGIN_SECS: u64 = 60;

/// Lifetime assumed when the exchange response omits `expires_in`.
const DEFAULT_EXPIRES_IN_SECS: u64 = 7200;

#[derive(Debug)]
struct CachedToken {
    token: String,
    expires_at: Instant,
}

/// Obtains and caches an OAuth bearer token via client-credentials exchange.
///
/// The cache lives behind a `tokio::sync::Mutex` held for the duration of
/// the exchange, so concurrent catalog fetches either reuse the cached
/// token or wait for the single in-flight exchange — never both racing.
pub struct TokenProvider {
    client: Client,
    oauth_url: String,
    scope: String,
    app_id: Option<String>,
    cert_id: Option<String>,
    token_override: Option<String>,
    cache: Mutex<Option<CachedToken>>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

impl TokenProvider {
    /// Creates a provider from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EbayError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, EbayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.ebay_token_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            oauth_url: config.ebay_oauth_url.clone(),
            scope: config.ebay_oauth_scope.clone(),
            app_id: config.ebay_app_id.clone(),
            cert_id: config.ebay_cert_id.clone(),
            token_override: config.ebay_auth_token.clone(),
            cache: Mutex::new(None),
        })
    }

    /// Returns a bearer token for the marketplace APIs.
    ///
    /// Resolution order: configured override, then the cached token while
    /// still valid, then a fresh client-credentials exchange.
    ///
    /// # Errors
    ///
    /// - [`EbayError::MissingCredentials`] — no override and no app/cert id
    ///   configured; returned before any network call.
    /// - [`EbayError::TokenExchange`] — non-2xx exchange response, carrying
    ///   the upstream status and a body snippet.
    /// - [`EbayError::TokenMissing`] — 2xx response without `access_token`.
    /// - [`EbayError::Http`] — network failure or timeout.
    pub async fn get_token(&self) -> Result<String, EbayError> {
        if let Some(token) = &self.token_override {
            return Ok(token.clone());
        }

        let (Some(app_id), Some(cert_id)) = (&self.app_id, &self.cert_id) else {
            return Err(EbayError::MissingCredentials);
        };

        let mut cache = self.cache.lock().await;
        if let Some(cached) = cache.as_ref() {
            if cached.expires_at > Instant::now() {
                return Ok(cached.token.clone());
            }
        }

        tracing::debug!(
            app_id_suffix = tail4(app_id),
            "requesting eBay OAuth token"
        );

        let basic = STANDARD.encode(format!("{app_id}:{cert_id}"));
        let response = self
            .client
            .post(&self.oauth_url)
            .header(reqwest::header::AUTHORIZATION, format!("Basic {basic}"))
            .form(&[
                ("grant_type", "client_credentials"),
                ("scope", self.scope.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EbayError::TokenExchange {
                status: status.as_u16(),
                body: snippet(&body),
            });
        }

        let parsed: TokenResponse = response.json().await?;
        let token = parsed.access_token.ok_or(EbayError::TokenMissing)?;

        let lifetime = parsed
            .expires_in
            .unwrap_or(DEFAULT_EXPIRES_IN_SECS)
            .saturating_sub(EXPIRY_MARGIN_SECS);
        *cache = Some(CachedToken {
            token: token.clone(),
            expires_at: Instant::now() + Duration::from_secs(lifetime),
        });

        Ok(token)
    }
}

/// Last four characters of a credential, for diagnostics. Never more.
fn tail4(s: &str) -> &str {
    let start = s.len().saturating_sub(4);
    s.get(start..).unwrap_or("")
}

/// Truncates an upstream body to a diagnostic-sized snippet.
fn snippet(body: &str) -> String {
    const MAX: usize = 300;
    if body.len() <= MAX {
        body.to_owned()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…", &body[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail4_returns_last_four_characters() {
        assert_eq!(tail4("app-id-1234"), "1234");
    }

    #[test]
    fn tail4_handles_short_input() {
        assert_eq!(tail4("ab"), "ab");
        assert_eq!(tail4(""), "");
    }

    #[test]
    fn snippet_passes_short_bodies_through() {
        assert_eq!(snippet("unauthorized"), "unauthorized");
    }

    #[test]
    fn snippet_truncates_long_bodies() {
        let body = "x".repeat(1000);
        let s = snippet(&body);
        assert!(s.len() < body.len());
        assert!(s.ends_with('…'));
    }
}
