//! Product Fixtures

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, RUB, USD},
};
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    pricing::major_to_minor,
    products::{Badge, Product, ProductId},
};

/// Catalog document in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Currency code every price must use (e.g., "RUB")
    pub currency: String,

    /// Category names in display order
    pub categories: Vec<String>,

    /// Products in display order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Catalog id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Product price (e.g., "45990 RUB")
    pub price: String,

    /// Category name
    pub category: String,

    /// Display glyph
    #[serde(default)]
    pub image: String,

    /// Optional badge
    #[serde(default)]
    pub badge: Option<Badge>,
}

impl TryFrom<ProductFixture> for Product<'_> {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;

        Ok(Product {
            id: fixture.id,
            name: fixture.name,
            price: Money::from_minor(minor_units, currency),
            category: fixture.category,
            image: fixture.image,
            badge: fixture.badge,
        })
    }
}

/// Resolve an ISO currency code supported by the fixtures.
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] for any other code.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code.trim() {
        "RUB" => Ok(RUB),
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}

/// Parse price string (e.g., "45990 RUB" or "2.99 GBP") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    if amount.is_sign_negative() {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    }

    let minor_units =
        major_to_minor(amount).ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, parse_currency(currency_code)?))
}
