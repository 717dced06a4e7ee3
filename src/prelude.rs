//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLine, QuantityUpdate},
    catalog::{Catalog, CatalogError, CategoryFilter},
    checkout::{
        CheckoutError, CheckoutForm, OrderConfirmation, OrderSummary, PaymentMethod,
        RequiredField,
    },
    delivery::{DeliveryMethod, DeliveryPolicy},
    fixtures::{FixtureError, builtin_catalog, load_catalog, parse_catalog},
    notices::{Notice, NoticeVariant},
    pricing::{TotalPriceError, format_money, format_price},
    products::{Badge, Product, ProductId, ProductKey},
    receipt::{Receipt, ReceiptError, write_catalog, write_delivery_options},
    storefront::{Storefront, StorefrontError},
};
