//! The phased crawl: bootstrap → discovery → product crawl → aggregation.
//!
//! Each phase fully completes before the next one reads its output. All
//! intermediate state lives in locals of [`CrawlPipeline::run`], so dropping
//! the run future (see [`CrawlPipeline::run_until`]) discards it whole.

use std::future::Future;

use regioncart_core::{
    aggregate, Aggregation, AppConfig, CategoryCatalog, PerRegion, ProductStore, Region,
    RegionPair,
};

use crate::bootstrap::bootstrap_region;
use crate::client::AuchanClient;
use crate::crawl::{crawl_products, CrawlSettings};
use crate::discover::discover_subcategories;
use crate::error::PipelineError;
use crate::outcome::PhaseStats;

/// Tunables of a crawl run.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub page_size: u32,
    pub min_shared_products: usize,
    pub max_concurrent_requests: usize,
    pub product_url_base: String,
}

impl PipelineSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            page_size: config.page_size,
            min_shared_products: config.min_shared_products,
            max_concurrent_requests: config.max_concurrent_requests,
            product_url_base: config.product_url_base.clone(),
        }
    }
}

/// Everything a run produced, for reporting and persistence.
#[derive(Debug, Clone)]
pub struct CrawlOutput {
    pub regions: PerRegion<Region>,
    pub catalogs: PerRegion<CategoryCatalog>,
    pub stores: PerRegion<ProductStore>,
    pub aggregation: Aggregation,
    pub discovery_stats: PhaseStats,
    pub crawl_stats: PhaseStats,
}

pub struct CrawlPipeline<'a> {
    client: &'a AuchanClient,
    regions: RegionPair,
    settings: PipelineSettings,
}

impl<'a> CrawlPipeline<'a> {
    #[must_use]
    pub fn new(client: &'a AuchanClient, regions: RegionPair, settings: PipelineSettings) -> Self {
        Self {
            client,
            regions,
            settings,
        }
    }

    /// Runs all phases to completion.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Bootstrap`] or [`PipelineError::NoShops`]
    /// when either region cannot be resolved; nothing is crawled in that
    /// case. Request failures after bootstrap are absorbed and counted.
    pub async fn run(&self) -> Result<CrawlOutput, PipelineError> {
        let (primary, secondary) = futures::future::try_join(
            bootstrap_region(self.client, &self.regions.primary),
            bootstrap_region(self.client, &self.regions.secondary),
        )
        .await
        .inspect_err(|e| tracing::error!(error = %e, "region bootstrap failed"))?;
        let seeds = PerRegion::new(primary, secondary);

        let (catalogs, discovery_stats) = discover_subcategories(
            self.client,
            &seeds,
            self.settings.page_size,
            self.settings.max_concurrent_requests,
        )
        .await;
        tracing::info!(
            fetched = discovery_stats.fetched,
            skipped = discovery_stats.skipped(),
            "discovery phase complete"
        );

        let regions = seeds.map(|seed| seed.region);
        let region_names = regions.clone().map(|region| region.name);

        let (stores, crawl_stats) = crawl_products(
            self.client,
            &catalogs,
            &region_names,
            &CrawlSettings {
                page_size: self.settings.page_size,
                product_url_base: &self.settings.product_url_base,
                max_concurrent: self.settings.max_concurrent_requests,
            },
        )
        .await;
        tracing::info!(
            fetched = crawl_stats.fetched,
            skipped = crawl_stats.skipped(),
            "crawl phase complete"
        );

        let aggregation = aggregate(&catalogs, &stores, self.settings.min_shared_products);

        Ok(CrawlOutput {
            regions,
            catalogs,
            stores,
            aggregation,
            discovery_stats,
            crawl_stats,
        })
    }

    /// Runs the pipeline unless `shutdown` resolves first. On shutdown every
    /// in-flight request is dropped and no partial output is returned.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Cancelled`] on shutdown, otherwise whatever
    /// [`CrawlPipeline::run`] returns.
    pub async fn run_until<S>(&self, shutdown: S) -> Result<CrawlOutput, PipelineError>
    where
        S: Future<Output = ()>,
    {
        tokio::select! {
            result = self.run() => result,
            () = shutdown => {
                tracing::warn!("shutdown requested, abandoning crawl");
                Err(PipelineError::Cancelled)
            }
        }
    }
}
