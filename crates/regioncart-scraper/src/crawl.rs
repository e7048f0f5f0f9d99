//! Product crawl: fetch every page of every shared category in both regions
//! and accumulate the products per region and category.

use std::pin::pin;

use futures::stream::{self, StreamExt};
use regioncart_core::{
    shared_categories, CategoryCatalog, MerchantId, PerRegion, ProductStore, RegionRole,
};

use crate::client::AuchanClient;
use crate::normalize::normalize_items;
use crate::outcome::{PhaseStats, RequestOutcome};

/// One product page to request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTask {
    pub role: RegionRole,
    pub category: String,
    pub merchant_id: MerchantId,
    pub page: u32,
}

/// Lists the page requests for all categories present in both catalogs.
///
/// Page count and merchant both come from the primary region's entry and are
/// reused verbatim for the secondary region. Listings are assumed to be close
/// enough in size across regions; a secondary category with more pages than
/// the primary one is crawled only partially.
#[must_use]
pub fn plan_pages(catalogs: &PerRegion<CategoryCatalog>) -> Vec<PageTask> {
    let shared = shared_categories(&catalogs.primary, &catalogs.secondary);
    let mut tasks = Vec::new();

    for role in RegionRole::ALL {
        for code in &shared {
            let Some(reference) = catalogs.primary.get(code) else {
                continue;
            };
            tasks.extend((1..=reference.page_count).map(|page| PageTask {
                role,
                category: code.clone(),
                merchant_id: reference.merchant_id,
                page,
            }));
        }
    }

    tasks
}

/// Crawl settings shared by every page request.
#[derive(Debug, Clone)]
pub struct CrawlSettings<'a> {
    pub page_size: u32,
    pub product_url_base: &'a str,
    pub max_concurrent: usize,
}

/// Fetches every planned page and returns one [`ProductStore`] per region.
///
/// Every shared category is registered in both stores up front, so a
/// category whose pages all fail still shows up with zero products. Pages
/// are appended in completion order. A failed page contributes nothing.
pub async fn crawl_products(
    client: &AuchanClient,
    catalogs: &PerRegion<CategoryCatalog>,
    region_names: &PerRegion<String>,
    settings: &CrawlSettings<'_>,
) -> (PerRegion<ProductStore>, PhaseStats) {
    let mut stores = PerRegion::<ProductStore>::default();
    for code in shared_categories(&catalogs.primary, &catalogs.secondary) {
        stores.primary.ensure(&code);
        stores.secondary.ensure(&code);
    }

    let tasks = plan_pages(catalogs);
    tracing::info!(requests = tasks.len(), "fetching product pages");

    let mut results = pin!(stream::iter(tasks)
        .map(|task| async move {
            let outcome: RequestOutcome<_> = client
                .fetch_products_page(&task.category, task.merchant_id, task.page, settings.page_size)
                .await
                .into();
            (task, outcome)
        })
        .buffer_unordered(settings.max_concurrent.max(1)));

    let mut stats = PhaseStats::default();

    while let Some((task, outcome)) = results.next().await {
        stats.record(&outcome);
        let region = region_names.get(task.role);
        match outcome {
            RequestOutcome::Fetched(page) => {
                let context = format!("{region}/{}/page {}", task.category, task.page);
                let products = normalize_items(page.items, settings.product_url_base, &context);
                tracing::debug!(
                    region = %region,
                    category = %task.category,
                    page = task.page,
                    products = products.len(),
                    "page fetched"
                );
                stores.get_mut(task.role).append(&task.category, products);
            }
            RequestOutcome::Skipped(reason) => {
                tracing::warn!(
                    region = %region,
                    category = %task.category,
                    page = task.page,
                    reason = %reason,
                    "skipping product page"
                );
            }
        }
    }

    (stores, stats)
}
