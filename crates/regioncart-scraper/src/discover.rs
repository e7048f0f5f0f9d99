//! Subcategory discovery: fan out one request per (region, top-level
//! category) and build each region's [`CategoryCatalog`].

use std::pin::pin;

use futures::stream::{self, StreamExt};
use regioncart_core::{CategoryCatalog, CategoryEntry, MerchantId, PerRegion, RegionRole};

use crate::bootstrap::RegionSeed;
use crate::client::AuchanClient;
use crate::outcome::{PhaseStats, RequestOutcome};

struct DiscoveryTask<'a> {
    role: RegionRole,
    region: &'a str,
    parent_code: &'a str,
    merchant_id: MerchantId,
}

/// Fetches the subcategories of every seed category in both regions.
///
/// At most `max_concurrent` requests are in flight. Results are folded into
/// the catalogs as they complete; a code seen twice keeps the last entry.
/// Failed requests contribute nothing and are counted in the returned
/// [`PhaseStats`].
pub async fn discover_subcategories(
    client: &AuchanClient,
    seeds: &PerRegion<RegionSeed>,
    page_size: u32,
    max_concurrent: usize,
) -> (PerRegion<CategoryCatalog>, PhaseStats) {
    let tasks: Vec<DiscoveryTask<'_>> = seeds
        .iter()
        .flat_map(|(role, seed)| {
            seed.top_level_codes.iter().map(move |code| DiscoveryTask {
                role,
                region: seed.region.name.as_str(),
                parent_code: code.as_str(),
                merchant_id: seed.region.merchant_id,
            })
        })
        .collect();

    tracing::info!(requests = tasks.len(), "discovering subcategories");

    let mut results = pin!(stream::iter(tasks)
        .map(|task| async move {
            let outcome: RequestOutcome<_> = client
                .fetch_subcategories(task.parent_code, task.merchant_id)
                .await
                .into();
            (task, outcome)
        })
        .buffer_unordered(max_concurrent.max(1)));

    let mut catalogs = PerRegion::<CategoryCatalog>::default();
    let mut stats = PhaseStats::default();

    while let Some((task, outcome)) = results.next().await {
        stats.record(&outcome);
        match outcome {
            RequestOutcome::Fetched(nodes) => {
                let catalog = catalogs.get_mut(task.role);
                for node in nodes {
                    catalog.insert(CategoryEntry::new(
                        node.code,
                        node.active_products_count,
                        page_size,
                        task.merchant_id,
                    ));
                }
            }
            RequestOutcome::Skipped(reason) => {
                tracing::warn!(
                    region = task.region,
                    category = task.parent_code,
                    reason = %reason,
                    "skipping subcategory listing"
                );
            }
        }
    }

    for (role, catalog) in catalogs.iter() {
        tracing::info!(
            region = %seeds.get(role).region.name,
            categories = catalog.len(),
            "category catalog built"
        );
    }

    (catalogs, stats)
}
