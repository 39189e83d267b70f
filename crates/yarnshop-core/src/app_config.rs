use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Directory the server serves static storefront assets from.
    pub static_dir: PathBuf,

    /// eBay application (client) ID. Absent means the marketplace
    /// integration is unavailable and the catalog falls back to mock data.
    pub ebay_app_id: Option<String>,
    /// eBay certificate (client secret) ID.
    pub ebay_cert_id: Option<String>,
    /// eBay developer ID, sent on Trading API calls.
    pub ebay_dev_id: Option<String>,
    /// Pre-issued auth token override. When set, the OAuth exchange is
    /// skipped entirely.
    pub ebay_auth_token: Option<String>,
    pub ebay_oauth_url: String,
    pub ebay_trading_url: String,
    pub ebay_oauth_scope: String,
    /// eBay site ID header value; `3` is ebay.co.uk.
    pub ebay_site_id: String,
    pub ebay_entries_per_page: u32,
    pub ebay_token_timeout_secs: u64,
    pub ebay_page_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("static_dir", &self.static_dir)
            .field("ebay_app_id", &self.ebay_app_id.as_ref().map(|_| "[redacted]"))
            .field(
                "ebay_cert_id",
                &self.ebay_cert_id.as_ref().map(|_| "[redacted]"),
            )
            .field("ebay_dev_id", &self.ebay_dev_id.as_ref().map(|_| "[redacted]"))
            .field(
                "ebay_auth_token",
                &self.ebay_auth_token.as_ref().map(|_| "[redacted]"),
            )
            .field("ebay_oauth_url", &self.ebay_oauth_url)
            .field("ebay_trading_url", &self.ebay_trading_url)
            .field("ebay_oauth_scope", &self.ebay_oauth_scope)
            .field("ebay_site_id", &self.ebay_site_id)
            .field("ebay_entries_per_page", &self.ebay_entries_per_page)
            .field("ebay_token_timeout_secs", &self.ebay_token_timeout_secs)
            .field("ebay_page_timeout_secs", &self.ebay_page_timeout_secs)
            .finish()
    }
}
