//! Catalog
//!
//! The fixed list of products on sale, in display order, with the category list
//! used by the category filter.

use std::fmt;

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use slotmap::SlotMap;
use smallvec::SmallVec;
use thiserror::Error;

use crate::products::{Product, ProductId, ProductKey};

/// Errors raised while assembling a catalog.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// Two products share an id.
    #[error("Duplicate product id {0}")]
    DuplicateProduct(ProductId),

    /// A product is listed under a category the catalog does not declare.
    #[error("Product {0} uses unknown category {1:?}")]
    UnknownCategory(ProductId, String),

    /// A product is priced in a different currency from the catalog (product, product currency, catalog currency).
    #[error("Product {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),
}

/// Which products the storefront lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every product, in catalog order.
    #[default]
    All,

    /// Products whose category equals the given name.
    Named(String),
}

impl CategoryFilter {
    /// Whether the product passes this filter.
    pub fn matches(&self, product: &Product<'_>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(category) => product.in_category(category),
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        let value = value.trim();

        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Named(value.to_string())
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("All"),
            CategoryFilter::Named(category) => f.write_str(category),
        }
    }
}

/// Catalog
#[derive(Debug, Clone)]
pub struct Catalog<'a> {
    products: SlotMap<ProductKey, Product<'a>>,
    order: Vec<ProductKey>,
    by_id: FxHashMap<ProductId, ProductKey>,
    categories: SmallVec<[String; 8]>,
    currency: &'a Currency,
}

impl<'a> Catalog<'a> {
    /// Create an empty catalog with the given categories.
    pub fn new<I, S>(currency: &'a Currency, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: SmallVec<[String; 8]> = SmallVec::new();

        for category in categories {
            let category = category.into();

            if !unique.contains(&category) {
                unique.push(category);
            }
        }

        Self {
            products: SlotMap::with_key(),
            order: Vec::new(),
            by_id: FxHashMap::default(),
            categories: unique,
            currency,
        }
    }

    /// Append a product to the end of the catalog.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::DuplicateProduct`]: the id is already taken.
    /// - [`CatalogError::UnknownCategory`]: the category is not declared.
    /// - [`CatalogError::CurrencyMismatch`]: the price is in another currency.
    pub fn insert(&mut self, product: Product<'a>) -> Result<ProductKey, CatalogError> {
        if self.by_id.contains_key(&product.id) {
            return Err(CatalogError::DuplicateProduct(product.id));
        }

        if !self.categories.contains(&product.category) {
            return Err(CatalogError::UnknownCategory(
                product.id,
                product.category.clone(),
            ));
        }

        let product_currency = product.price.currency();

        if product_currency != self.currency {
            return Err(CatalogError::CurrencyMismatch(
                product.id,
                product_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        let id = product.id;
        let key = self.products.insert(product);

        self.order.push(key);
        self.by_id.insert(id, key);

        Ok(key)
    }

    /// Products passing the filter, in catalog order. An unknown category yields nothing.
    pub fn filter<'s>(
        &'s self,
        filter: &'s CategoryFilter,
    ) -> impl Iterator<Item = (ProductKey, &'s Product<'a>)> + 's {
        self.iter()
            .filter(move |(_, product)| filter.matches(product))
    }

    /// The first `n` products in catalog order.
    pub fn featured(&self, n: usize) -> impl Iterator<Item = (ProductKey, &Product<'a>)> + '_ {
        self.iter().take(n)
    }

    /// Every product in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (ProductKey, &Product<'a>)> + '_ {
        self.order
            .iter()
            .filter_map(|key| self.products.get(*key).map(|product| (*key, product)))
    }

    /// Look up a product by its catalog id.
    pub fn get(&self, id: ProductId) -> Option<(ProductKey, &Product<'a>)> {
        let key = *self.by_id.get(&id)?;

        self.products.get(key).map(|product| (key, product))
    }

    /// Look up a product by its storage key.
    pub fn product(&self, key: ProductKey) -> Option<&Product<'a>> {
        self.products.get(key)
    }

    /// Declared categories, in display order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Whether the category is declared.
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|known| known == category)
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Currency every product is priced in.
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }
}
