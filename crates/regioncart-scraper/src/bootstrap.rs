//! Region bootstrap: resolve a configured region to its merchant and
//! top-level category codes.

use regioncart_core::{Region, RegionSpec};

use crate::client::AuchanClient;
use crate::error::{FetchError, PipelineError};

/// A resolved region plus the top-level categories discovery starts from.
#[derive(Debug, Clone)]
pub struct RegionSeed {
    pub region: Region,
    pub top_level_codes: Vec<String>,
}

/// Resolves `spec` to the merchant of its first shop and lists that
/// merchant's top-level categories.
///
/// # Errors
///
/// Any failure here is fatal for the region:
/// - [`PipelineError::Bootstrap`] if either request fails.
/// - [`PipelineError::NoShops`] if the region lists no shops.
pub async fn bootstrap_region(
    client: &AuchanClient,
    spec: &RegionSpec,
) -> Result<RegionSeed, PipelineError> {
    let bootstrap_err = |source: FetchError| PipelineError::Bootstrap {
        region: spec.name.clone(),
        source,
    };

    let shops = client.fetch_shops(spec.id).await.map_err(bootstrap_err)?;
    let shop = shops
        .into_iter()
        .next()
        .ok_or_else(|| PipelineError::NoShops {
            region: spec.name.clone(),
        })?;

    tracing::info!(
        region = %spec.name,
        merchant_id = %shop.merchant_id,
        "resolved region merchant"
    );

    let categories = client
        .fetch_top_categories(shop.merchant_id)
        .await
        .map_err(bootstrap_err)?;

    Ok(RegionSeed {
        region: Region {
            id: spec.id,
            name: spec.name.clone(),
            merchant_id: shop.merchant_id,
        },
        top_level_codes: categories.into_iter().map(|c| c.code).collect(),
    })
}
