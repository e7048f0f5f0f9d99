mod aggregate;
mod app_config;
mod catalog;
mod config;
mod products;
mod regions;
mod sink;

use thiserror::Error;

pub use aggregate::{aggregate, match_products, Aggregation, CategoryDecision, ResultSet};
pub use app_config::AppConfig;
pub use catalog::{shared_categories, CategoryCatalog, ProductStore};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{page_count, CategoryEntry, MerchantId, Price, Product, ProductId};
pub use regions::{PerRegion, Region, RegionPair, RegionRole, RegionSpec};
pub use sink::{ResultSink, SinkError};

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("invalid region list: {0}")]
    InvalidRegions(String),
}
