use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_defaults_from_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.regions.primary.name, "msc");
    assert_eq!(cfg.regions.primary.id, 1);
    assert_eq!(cfg.regions.secondary.name, "spb");
    assert_eq!(cfg.regions.secondary.id, 2);
    assert_eq!(cfg.api_base_url, "https://www.auchan.ru");
    assert_eq!(cfg.product_url_base, "https://www.auchan.ru/product");
    assert_eq!(cfg.page_size, 40);
    assert_eq!(cfg.min_shared_products, 100);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.output_path.to_str(), Some("data.json"));
    assert_eq!(cfg.request_timeout_secs, 10);
    assert!(cfg.user_agent.starts_with("Mozilla/5.0"));
    assert_eq!(cfg.max_concurrent_requests, 16);
    assert_eq!(cfg.max_retries, 3);
    assert_eq!(cfg.retry_backoff_base_ms, 500);
}

#[test]
fn build_app_config_overrides_regions() {
    let mut map = HashMap::new();
    map.insert("REGIONCART_REGIONS", "5=ekb,6=kzn");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.regions.primary.name, "ekb");
    assert_eq!(cfg.regions.secondary.id, 6);
}

#[test]
fn build_app_config_rejects_bad_regions() {
    let mut map = HashMap::new();
    map.insert("REGIONCART_REGIONS", "1=msc");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidRegions(_))),
        "expected InvalidRegions, got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_page_size() {
    let mut map = HashMap::new();
    map.insert("REGIONCART_PAGE_SIZE", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "REGIONCART_PAGE_SIZE"),
        "expected InvalidEnvVar(REGIONCART_PAGE_SIZE), got: {result:?}"
    );
}

#[test]
fn build_app_config_min_shared_products_override() {
    let mut map = HashMap::new();
    map.insert("REGIONCART_MIN_SHARED_PRODUCTS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.min_shared_products, 5);
}

#[test]
fn build_app_config_min_shared_products_invalid() {
    let mut map = HashMap::new();
    map.insert("REGIONCART_MIN_SHARED_PRODUCTS", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "REGIONCART_MIN_SHARED_PRODUCTS"),
        "expected InvalidEnvVar(REGIONCART_MIN_SHARED_PRODUCTS), got: {result:?}"
    );
}

#[test]
fn build_app_config_max_concurrent_requests_override() {
    let mut map = HashMap::new();
    map.insert("REGIONCART_MAX_CONCURRENT_REQUESTS", "4");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.max_concurrent_requests, 4);
}

#[test]
fn build_app_config_max_retries_invalid() {
    let mut map = HashMap::new();
    map.insert("REGIONCART_MAX_RETRIES", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "REGIONCART_MAX_RETRIES"),
        "expected InvalidEnvVar(REGIONCART_MAX_RETRIES), got: {result:?}"
    );
}

#[test]
fn build_app_config_request_timeout_override() {
    let mut map = HashMap::new();
    map.insert("REGIONCART_REQUEST_TIMEOUT_SECS", "30");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 30);
}

#[test]
fn build_app_config_output_path_override() {
    let mut map = HashMap::new();
    map.insert("REGIONCART_OUTPUT_PATH", "/tmp/shared.json");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.output_path.to_str(), Some("/tmp/shared.json"));
}
