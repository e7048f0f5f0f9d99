use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Store identifier the catalog API is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MerchantId(pub i64);

impl fmt::Display for MerchantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product identifier as the API returns it: usually numeric, occasionally
/// a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Numeric(id) => write!(f, "{id}"),
            ProductId::Text(id) => f.write_str(id),
        }
    }
}

/// A price exactly as the API sent it.
///
/// Serializes back to the upstream textual form, but compares and hashes by
/// numeric value, so `100` and `100.0` are the same price.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(serde_json::Number);

#[derive(PartialEq, Eq, Hash)]
enum PriceKey {
    Integral(i128),
    Fractional(u64),
}

impl Price {
    #[must_use]
    pub fn as_number(&self) -> &serde_json::Number {
        &self.0
    }

    // Integral floats fold onto the integer they equal. 2^53 bounds the
    // range where an f64 still holds every integer exactly.
    #[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
    fn key(&self) -> PriceKey {
        if let Some(n) = self.0.as_i64() {
            return PriceKey::Integral(n.into());
        }
        if let Some(n) = self.0.as_u64() {
            return PriceKey::Integral(n.into());
        }
        match self.0.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() <= 9_007_199_254_740_992.0 => {
                PriceKey::Integral(f as i128)
            }
            Some(f) => PriceKey::Fractional(f.to_bits()),
            None => PriceKey::Fractional(u64::MAX),
        }
    }
}

impl From<serde_json::Number> for Price {
    fn from(number: serde_json::Number) -> Self {
        Self(number)
    }
}

impl PartialEq for Price {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Price {}

impl Hash for Price {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A product as seen in one region's listing.
///
/// Equality covers every field, prices included: the same item listed at a
/// different price in two regions is two different records. Prices compare
/// by value (see [`Price`]). Field names on the wire match the persisted
/// output format (`productId`, `Url`, `oldPrice`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "productId")]
    pub product_id: ProductId,
    pub title: String,
    #[serde(rename = "Url")]
    pub url: String,
    pub brand: String,
    pub price: Price,
    #[serde(rename = "oldPrice", default, skip_serializing_if = "Option::is_none")]
    pub old_price: Option<Price>,
}

/// A subcategory discovered in one region's catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    pub code: String,
    /// Number of product pages to request; zero means nothing to fetch.
    pub page_count: u32,
    pub merchant_id: MerchantId,
}

impl CategoryEntry {
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        active_products: u64,
        page_size: u32,
        merchant_id: MerchantId,
    ) -> Self {
        Self {
            code: code.into(),
            page_count: page_count(active_products, page_size),
            merchant_id,
        }
    }
}

/// Returns `ceil(active_products / page_size)`.
///
/// A zero `page_size` is treated as 1. Counts beyond `u32::MAX` pages
/// saturate.
#[must_use]
pub fn page_count(active_products: u64, page_size: u32) -> u32 {
    let pages = active_products.div_ceil(u64::from(page_size.max(1)));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: &str, old_price: Option<&str>) -> Product {
        serde_json::from_value(serde_json::json!({
            "productId": 7,
            "title": "Milk 1L",
            "Url": "https://www.auchan.ru/product/milk-1l/",
            "brand": "Farm",
            "price": serde_json::from_str::<serde_json::Value>(price).unwrap(),
            "oldPrice": old_price.map(|p| serde_json::from_str::<serde_json::Value>(p).unwrap()),
        }))
        .unwrap()
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, 40), 0);
        assert_eq!(page_count(1, 40), 1);
        assert_eq!(page_count(40, 40), 1);
        assert_eq!(page_count(41, 40), 2);
        assert_eq!(page_count(400, 40), 10);
    }

    #[test]
    fn page_count_treats_zero_page_size_as_one() {
        assert_eq!(page_count(3, 0), 3);
    }

    #[test]
    fn category_entry_derives_page_count() {
        let entry = CategoryEntry::new("drinks", 81, 40, MerchantId(10));
        assert_eq!(entry.page_count, 3);
        assert_eq!(entry.merchant_id, MerchantId(10));
    }

    #[test]
    fn identical_records_match() {
        assert_eq!(product("89.9", Some("99.9")), product("89.9", Some("99.9")));
    }

    #[test]
    fn price_change_breaks_match() {
        assert_ne!(product("89.9", None), product("89.91", None));
    }

    #[test]
    fn old_price_presence_must_agree() {
        assert_ne!(product("89.9", None), product("89.9", Some("99.9")));
    }

    #[test]
    fn integral_float_price_matches_integer() {
        let whole = product("100", Some("120"));
        let float = product("100.0", Some("120.00"));
        assert_eq!(whole, float);

        let set: std::collections::HashSet<_> = std::iter::once(whole).collect();
        assert!(set.contains(&float), "equal prices must hash alike");
    }

    #[test]
    fn fractional_prices_compare_by_value() {
        assert_eq!(product("89.90", None), product("89.9", None));
        assert_ne!(product("100.5", None), product("100", None));
    }

    #[test]
    fn price_keeps_upstream_text_on_output() {
        let value = serde_json::to_value(product("100.0", None)).unwrap();
        assert_eq!(value["price"], 100.0);
        assert!(value["price"].is_f64());
    }

    #[test]
    fn serializes_with_output_field_names() {
        let value = serde_json::to_value(product("10", None)).unwrap();
        assert_eq!(value["productId"], 7);
        assert_eq!(value["Url"], "https://www.auchan.ru/product/milk-1l/");
        assert!(value.get("oldPrice").is_none(), "absent old price is omitted");
    }

    #[test]
    fn product_id_accepts_strings() {
        let id: ProductId = serde_json::from_str("\"A-12\"").unwrap();
        assert_eq!(id, ProductId::Text("A-12".to_owned()));
        assert_eq!(id.to_string(), "A-12");
    }
}
