use std::path::PathBuf;

use crate::regions::RegionPair;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub regions: RegionPair,
    pub api_base_url: String,
    pub product_url_base: String,
    pub page_size: u32,
    pub min_shared_products: usize,
    pub log_level: String,
    pub output_path: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_concurrent_requests: usize,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
}
