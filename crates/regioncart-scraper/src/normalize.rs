//! Conversion from raw API product items to [`regioncart_core::Product`].

use regioncart_core::{Price, Product};

use crate::error::FetchError;
use crate::types::ApiProduct;

/// Builds a [`Product`] from an API item. The canonical URL is
/// `{product_url_base}/{code}/`.
///
/// # Errors
///
/// Returns [`FetchError::Normalization`] if the item has no brand name or an
/// empty product code.
pub fn normalize_product(raw: ApiProduct, product_url_base: &str) -> Result<Product, FetchError> {
    let brand = raw
        .brand
        .and_then(|b| b.name)
        .ok_or_else(|| FetchError::Normalization {
            product_id: raw.product_id.to_string(),
            reason: "missing brand name".into(),
        })?;

    if raw.code.trim().is_empty() {
        return Err(FetchError::Normalization {
            product_id: raw.product_id.to_string(),
            reason: "empty product code".into(),
        });
    }

    let url = format!(
        "{}/{}/",
        product_url_base.trim_end_matches('/'),
        raw.code.trim_matches('/')
    );

    Ok(Product {
        product_id: raw.product_id,
        title: raw.title,
        url,
        brand,
        price: Price::from(raw.price.value),
        old_price: raw.old_price.map(|p| Price::from(p.value)),
    })
}

/// Decodes and normalizes every item of a product page, dropping (and
/// logging) items that do not fit. Item order is preserved.
#[must_use]
pub fn normalize_items(
    items: Vec<serde_json::Value>,
    product_url_base: &str,
    context: &str,
) -> Vec<Product> {
    items
        .into_iter()
        .filter_map(|item| {
            let decoded = serde_json::from_value::<ApiProduct>(item)
                .map_err(|e| FetchError::Malformed {
                    context: context.to_owned(),
                    source: e,
                })
                .and_then(|raw| normalize_product(raw, product_url_base));
            match decoded {
                Ok(product) => Some(product),
                Err(e) => {
                    tracing::warn!(context, error = %e, "skipping product item");
                    None
                }
            }
        })
        .collect()
}
