//! Per-region category catalog and product store.
//!
//! Both containers are owned by a single phase coordinator. Concurrent fetch
//! tasks hand their results back to it instead of writing here directly, so
//! each key is updated in one step.

use std::collections::{BTreeMap, BTreeSet};

use crate::products::{CategoryEntry, Product};

/// Category code → [`CategoryEntry`] for one region.
#[derive(Debug, Clone, Default)]
pub struct CategoryCatalog {
    entries: BTreeMap<String, CategoryEntry>,
}

impl CategoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `entry`, replacing any earlier entry with the same code.
    /// Returns the replaced entry.
    pub fn insert(&mut self, entry: CategoryEntry) -> Option<CategoryEntry> {
        self.entries.insert(entry.code.clone(), entry)
    }

    #[must_use]
    pub fn get(&self, code: &str) -> Option<&CategoryEntry> {
        self.entries.get(code)
    }

    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = &CategoryEntry> {
        self.entries.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<CategoryEntry> for CategoryCatalog {
    fn from_iter<I: IntoIterator<Item = CategoryEntry>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for entry in iter {
            catalog.insert(entry);
        }
        catalog
    }
}

/// Category codes present in both catalogs, in sorted order.
#[must_use]
pub fn shared_categories(a: &CategoryCatalog, b: &CategoryCatalog) -> BTreeSet<String> {
    a.codes()
        .filter(|code| b.contains(code))
        .map(str::to_owned)
        .collect()
}

/// Category code → products fetched for it in one region, in the order
/// pages arrived.
#[derive(Debug, Clone, Default)]
pub struct ProductStore {
    lists: BTreeMap<String, Vec<Product>>,
}

impl ProductStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `code` with an empty list if it is not present yet.
    pub fn ensure(&mut self, code: &str) {
        if !self.lists.contains_key(code) {
            self.lists.insert(code.to_owned(), Vec::new());
        }
    }

    /// Appends one page worth of products to `code`'s list.
    pub fn append(&mut self, code: &str, products: impl IntoIterator<Item = Product>) {
        self.lists
            .entry(code.to_owned())
            .or_default()
            .extend(products);
    }

    /// Products recorded for `code`; empty when the category was never
    /// crawled.
    #[must_use]
    pub fn products(&self, code: &str) -> &[Product] {
        self.lists.get(code).map_or(&[], Vec::as_slice)
    }

    /// `(code, product count)` for every registered category.
    pub fn counts(&self) -> impl Iterator<Item = (&str, usize)> {
        self.lists.iter().map(|(code, list)| (code.as_str(), list.len()))
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.lists.values().map(Vec::len).sum()
    }
}
