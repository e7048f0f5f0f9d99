//! Response types for the catalog API consumed by the crawler.
//!
//! ### `activeProductsCount`
//! Usually a JSON number, but some category nodes carry it as a numeric
//! string. Both are accepted; absent means zero.
//!
//! ### Subcategory listing
//! `GET /v1/categories?node_code=...` returns an array whose first element is
//! the requested node with its children under `items`. An empty array or a
//! node without `items` means the parent has no subcategories.
//!
//! ### Product items
//! Items are kept as raw JSON in [`ProductsPage`] and decoded one by one, so
//! a single odd item does not discard the rest of the page.

use regioncart_core::{MerchantId, ProductId};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// Response from `GET /v1/shops?regionId=...`.
#[derive(Debug, Deserialize)]
pub struct ShopsResponse {
    #[serde(default)]
    pub shops: Vec<Shop>,
}

#[derive(Debug, Deserialize)]
pub struct Shop {
    pub merchant_id: MerchantId,
}

/// A node of the category tree.
#[derive(Debug, Deserialize)]
pub struct CategoryNode {
    pub code: String,

    #[serde(
        default,
        rename = "activeProductsCount",
        deserialize_with = "deserialize_count"
    )]
    pub active_products_count: u64,
}

/// One element of the subcategory listing array.
#[derive(Debug, Deserialize)]
pub struct SubcategoryListing {
    #[serde(default)]
    pub items: Option<Vec<CategoryNode>>,
}

/// Response from `POST /v1/catalog/products`.
#[derive(Debug, Deserialize)]
pub struct ProductsPage {
    pub items: Vec<serde_json::Value>,
}

/// A product item as the API returns it.
#[derive(Debug, Deserialize)]
pub struct ApiProduct {
    #[serde(rename = "productId")]
    pub product_id: ProductId,
    pub title: String,
    /// URL slug used to build the canonical product URL.
    pub code: String,
    #[serde(default)]
    pub brand: Option<ApiBrand>,
    pub price: ApiPrice,
    #[serde(default, rename = "oldPrice")]
    pub old_price: Option<ApiPrice>,
}

#[derive(Debug, Deserialize)]
pub struct ApiBrand {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiPrice {
    pub value: serde_json::Number,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCount {
    Number(u64),
    Text(String),
}

fn deserialize_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawCount>::deserialize(deserializer)? {
        None => Ok(0),
        Some(RawCount::Number(n)) => Ok(n),
        Some(RawCount::Text(s)) => s
            .trim()
            .parse::<u64>()
            .map_err(|e| D::Error::custom(format!("activeProductsCount \"{s}\": {e}"))),
    }
}
