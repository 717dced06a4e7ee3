//! Fixtures
//!
//! Catalog documents in YAML. The storefront's own catalog is compiled in; other
//! catalogs can be loaded from disk with the same schema.

use std::{fs, path::Path};

use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError},
    fixtures::products::{CatalogFixture, parse_currency},
    products::Product,
};

pub mod products;

const BUILTIN_CATALOG: &str = include_str!("../../fixtures/catalog/default.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// The document declares no products
    #[error("Catalog has no products")]
    NoProducts,

    /// The products do not form a valid catalog
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Parse a catalog from a YAML document.
///
/// # Errors
///
/// Returns an error if the YAML is malformed, a price or currency is invalid, or the
/// products break a catalog invariant (duplicate ids, undeclared categories, mixed currencies).
pub fn parse_catalog(yaml: &str) -> Result<Catalog<'static>, FixtureError> {
    let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

    if fixture.products.is_empty() {
        return Err(FixtureError::NoProducts);
    }

    let currency = parse_currency(&fixture.currency)?;
    let mut catalog = Catalog::new(currency, fixture.categories);

    for product_fixture in fixture.products {
        let product: Product<'static> = product_fixture.try_into()?;

        catalog.insert(product)?;
    }

    Ok(catalog)
}

/// Load a catalog from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or [`parse_catalog`] fails.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog<'static>, FixtureError> {
    let contents = fs::read_to_string(path)?;

    parse_catalog(&contents)
}

/// The storefront's built-in catalog: eight products across six categories, priced in roubles.
///
/// # Errors
///
/// Only fails if the embedded document is invalid.
pub fn builtin_catalog() -> Result<Catalog<'static>, FixtureError> {
    parse_catalog(BUILTIN_CATALOG)
}
