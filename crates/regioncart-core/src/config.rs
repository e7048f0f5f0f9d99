use crate::app_config::AppConfig;
use crate::regions::RegionPair;
use crate::ConfigError;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/106.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields the
/// reference setup: Moscow vs Saint Petersburg, 40 products per page and a
/// 100-product floor per category.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let regions = or_default("REGIONCART_REGIONS", "1=msc,2=spb").parse::<RegionPair>()?;

    let api_base_url = or_default("REGIONCART_API_BASE_URL", "https://www.auchan.ru");
    let product_url_base = or_default(
        "REGIONCART_PRODUCT_URL_BASE",
        "https://www.auchan.ru/product",
    );

    let page_size = parse_u32("REGIONCART_PAGE_SIZE", "40")?;
    if page_size == 0 {
        return Err(invalid("REGIONCART_PAGE_SIZE", "must be at least 1".to_string()));
    }
    let min_shared_products = parse_usize("REGIONCART_MIN_SHARED_PRODUCTS", "100")?;

    let log_level = or_default("REGIONCART_LOG_LEVEL", "info");
    let output_path = PathBuf::from(or_default("REGIONCART_OUTPUT_PATH", "data.json"));

    let request_timeout_secs = parse_u64("REGIONCART_REQUEST_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("REGIONCART_USER_AGENT", DEFAULT_USER_AGENT);
    let max_concurrent_requests = parse_usize("REGIONCART_MAX_CONCURRENT_REQUESTS", "16")?;
    let max_retries = parse_u32("REGIONCART_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_u64("REGIONCART_RETRY_BACKOFF_BASE_MS", "500")?;

    Ok(AppConfig {
        regions,
        api_base_url,
        product_url_base,
        page_size,
        min_shared_products,
        log_level,
        output_path,
        request_timeout_secs,
        user_agent,
        max_concurrent_requests,
        max_retries,
        retry_backoff_base_ms,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
