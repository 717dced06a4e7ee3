//! Products

use std::fmt;

use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use slotmap::new_key_type;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Catalog-facing product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for ProductId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Promotional badge shown on a product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    /// Best seller
    Hit,

    /// Recently added
    New,

    /// Reduced price
    Sale,
}

impl Badge {
    /// Display label for the badge.
    pub fn label(self) -> &'static str {
        match self {
            Badge::Hit => "Hit",
            Badge::New => "New",
            Badge::Sale => "Sale",
        }
    }
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Product id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Product price
    pub price: Money<'a, Currency>,

    /// Category the product is listed under
    pub category: String,

    /// Display glyph
    pub image: String,

    /// Optional badge
    pub badge: Option<Badge>,
}

impl Product<'_> {
    /// Whether the product is listed under the given category.
    pub fn in_category(&self, category: &str) -> bool {
        self.category == category
    }
}
