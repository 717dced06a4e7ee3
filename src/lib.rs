//! Storefront
//!
//! Catalog, cart and checkout pricing for a small online shop: category filtering,
//! cart quantities, flat-fee delivery with a free-delivery threshold, and order
//! placement with required-field checks.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod delivery;
pub mod fixtures;
pub mod notices;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod storefront;
