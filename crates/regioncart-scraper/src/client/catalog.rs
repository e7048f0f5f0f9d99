//! Typed catalog endpoints on top of [`AuchanClient::fetch_json`].

use regioncart_core::MerchantId;
use reqwest::Method;
use serde::de::DeserializeOwned;

use super::AuchanClient;
use crate::error::FetchError;
use crate::types::{CategoryNode, ProductsPage, Shop, ShopsResponse, SubcategoryListing};

fn decode<T: DeserializeOwned>(value: serde_json::Value, context: &str) -> Result<T, FetchError> {
    serde_json::from_value(value).map_err(|e| FetchError::Malformed {
        context: context.to_owned(),
        source: e,
    })
}

impl AuchanClient {
    /// Lists the shops serving a region (`GET /v1/shops?regionId=...`).
    ///
    /// # Errors
    ///
    /// Propagates any [`FetchError`] from the request or decoding.
    pub async fn fetch_shops(&self, region_id: u32) -> Result<Vec<Shop>, FetchError> {
        let region = region_id.to_string();
        let url = self.build_url("v1/shops", &[("regionId", &region)])?;
        let context = format!("shops(regionId={region_id})");
        let body = self.fetch_json(Method::GET, url, None, &context).await?;
        let response: ShopsResponse = decode(body, &context)?;
        Ok(response.shops)
    }

    /// Lists the active, visible top-level categories of a merchant, two
    /// levels deep.
    ///
    /// # Errors
    ///
    /// Propagates any [`FetchError`] from the request or decoding.
    pub async fn fetch_top_categories(
        &self,
        merchant_id: MerchantId,
    ) -> Result<Vec<CategoryNode>, FetchError> {
        let merchant = merchant_id.to_string();
        let url = self.build_url(
            "v1/categories",
            &[
                ("max_depth", "2"),
                ("merchant_id", &merchant),
                ("active_only", "1"),
                ("cashback_only", "0"),
                ("show_hidden", "0"),
            ],
        )?;
        let context = format!("categories(merchant_id={merchant_id})");
        let body = self.fetch_json(Method::GET, url, None, &context).await?;
        decode(body, &context)
    }

    /// Lists the active, visible subcategories under `node_code`.
    ///
    /// An empty listing, or a node without `items`, yields an empty list.
    ///
    /// # Errors
    ///
    /// Propagates any [`FetchError`] from the request or decoding.
    pub async fn fetch_subcategories(
        &self,
        node_code: &str,
        merchant_id: MerchantId,
    ) -> Result<Vec<CategoryNode>, FetchError> {
        let merchant = merchant_id.to_string();
        let url = self.build_url(
            "v1/categories",
            &[
                ("node_code", node_code),
                ("merchant_id", &merchant),
                ("active_only", "1"),
                ("show_hidden", "0"),
            ],
        )?;
        let context = format!("subcategories(node_code={node_code}, merchant_id={merchant_id})");
        let body = self.fetch_json(Method::GET, url, None, &context).await?;
        let listing: Vec<SubcategoryListing> = decode(body, &context)?;
        Ok(listing
            .into_iter()
            .next()
            .and_then(|node| node.items)
            .unwrap_or_default())
    }

    /// Fetches one page of active, non-promo products of a category.
    ///
    /// Items are returned undecoded; see [`crate::normalize::normalize_items`].
    ///
    /// # Errors
    ///
    /// Propagates any [`FetchError`] from the request or decoding of the
    /// page envelope.
    pub async fn fetch_products_page(
        &self,
        category_code: &str,
        merchant_id: MerchantId,
        page: u32,
        per_page: u32,
    ) -> Result<ProductsPage, FetchError> {
        let merchant = merchant_id.to_string();
        let page_str = page.to_string();
        let per_page_str = per_page.to_string();
        let url = self.build_url(
            "v1/catalog/products",
            &[
                ("merchantId", &merchant),
                ("page", &page_str),
                ("perPage", &per_page_str),
            ],
        )?;
        let payload = serde_json::json!({
            "filter": {
                "category": category_code,
                "promo_only": false,
                "active_only": true,
                "cashback_only": false
            }
        });
        let context = format!("products(category={category_code}, merchantId={merchant_id}, page={page})");
        let body = self
            .fetch_json(Method::POST, url, Some(&payload), &context)
            .await?;
        decode(body, &context)
    }
}
