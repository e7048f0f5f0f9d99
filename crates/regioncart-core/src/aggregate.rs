//! Cross-region aggregation: category intersection, product matching and the
//! minimum-shared-products filter.

use std::collections::{BTreeMap, HashSet};

use crate::catalog::{shared_categories, CategoryCatalog, ProductStore};
use crate::products::Product;
use crate::regions::PerRegion;

/// Category code → products sold identically in both regions.
pub type ResultSet = BTreeMap<String, Vec<Product>>;

/// Whether a shared category made it into the result, and with how many
/// matched products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDecision {
    pub code: String,
    pub matched: usize,
    pub kept: bool,
}

/// Output of [`aggregate`]: the result set plus one decision per shared
/// category, in category-code order.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub results: ResultSet,
    pub decisions: Vec<CategoryDecision>,
}

impl Aggregation {
    pub fn kept(&self) -> impl Iterator<Item = &CategoryDecision> {
        self.decisions.iter().filter(|d| d.kept)
    }

    pub fn dropped(&self) -> impl Iterator<Item = &CategoryDecision> {
        self.decisions.iter().filter(|d| !d.kept)
    }
}

/// Products from `primary` that also appear, field for field, in
/// `secondary`. Order and duplicates follow `primary`.
#[must_use]
pub fn match_products(primary: &[Product], secondary: &[Product]) -> Vec<Product> {
    let secondary: HashSet<&Product> = secondary.iter().collect();
    primary
        .iter()
        .filter(|product| secondary.contains(product))
        .cloned()
        .collect()
}

/// Intersects both regions' stores over the categories both catalogs share
/// and keeps the categories with more than `min_shared` matched products.
#[must_use]
pub fn aggregate(
    catalogs: &PerRegion<CategoryCatalog>,
    stores: &PerRegion<ProductStore>,
    min_shared: usize,
) -> Aggregation {
    let mut aggregation = Aggregation::default();

    for code in shared_categories(&catalogs.primary, &catalogs.secondary) {
        let matched = match_products(
            stores.primary.products(&code),
            stores.secondary.products(&code),
        );
        let count = matched.len();
        let kept = count > min_shared;
        if kept {
            aggregation.results.insert(code.clone(), matched);
        }
        aggregation.decisions.push(CategoryDecision {
            code,
            matched: count,
            kept,
        });
    }

    aggregation
}
