use thiserror::Error;

/// Errors from the eBay integration.
///
/// Lower layers always return one of these rather than panicking or
/// swallowing failures; [`crate::catalog::CatalogService`] is the only place
/// allowed to convert a failure into the degraded mock-catalog response.
#[derive(Debug, Error)]
pub enum EbayError {
    /// EBAY_APP_ID / EBAY_CERT_ID are not configured. Surfaced before any
    /// network call is attempted.
    #[error("eBay credentials not configured (EBAY_APP_ID / EBAY_CERT_ID)")]
    MissingCredentials,

    /// The OAuth token exchange returned a non-2xx status.
    #[error("token exchange failed with status {status}: {body}")]
    TokenExchange { status: u16, body: String },

    /// The token exchange returned 2xx but the body had no `access_token`.
    #[error("token exchange response has no access_token field")]
    TokenMissing,

    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A listing page body was not well-formed XML. Aborts the whole
    /// multi-page fetch.
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),
}

impl EbayError {
    /// Upstream HTTP status carried by this failure, when one exists.
    /// Used for diagnostics on the degraded-mode path.
    #[must_use]
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            EbayError::TokenExchange { status, .. } => Some(*status),
            EbayError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
