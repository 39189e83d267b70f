use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
///
/// The eBay credentials are deliberately optional: a storefront with no
/// marketplace credentials still starts and serves the mock catalog. The
/// missing-credential failure surfaces at fetch time, not at startup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("YARNSHOP_ENV", "development"));
    let bind_addr = parse_addr("YARNSHOP_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("YARNSHOP_LOG_LEVEL", "info");
    let static_dir = PathBuf::from(or_default("YARNSHOP_STATIC_DIR", "./public"));

    let ebay_app_id = lookup("EBAY_APP_ID").ok();
    let ebay_cert_id = lookup("EBAY_CERT_ID").ok();
    let ebay_dev_id = lookup("EBAY_DEV_ID").ok();
    let ebay_auth_token = lookup("EBAY_AUTH_TOKEN").ok();
    let ebay_oauth_url = or_default(
        "EBAY_OAUTH_URL",
        "https://api.ebay.com/identity/v1/oauth2/token",
    );
    let ebay_trading_url = or_default("EBAY_TRADING_URL", "https://api.ebay.com/ws/api.dll");
    let ebay_oauth_scope = or_default("EBAY_OAUTH_SCOPE", "https://api.ebay.com/oauth/api_scope");
    let ebay_site_id = or_default("EBAY_SITE_ID", "3");
    let ebay_entries_per_page = parse_u32("YARNSHOP_ENTRIES_PER_PAGE", "200")?;
    let ebay_token_timeout_secs = parse_u64("YARNSHOP_TOKEN_TIMEOUT_SECS", "10")?;
    let ebay_page_timeout_secs = parse_u64("YARNSHOP_PAGE_TIMEOUT_SECS", "30")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        static_dir,
        ebay_app_id,
        ebay_cert_id,
        ebay_dev_id,
        ebay_auth_token,
        ebay_oauth_url,
        ebay_trading_url,
        ebay_oauth_scope,
        ebay_site_id,
        ebay_entries_per_page,
        ebay_token_timeout_secs,
        ebay_page_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
