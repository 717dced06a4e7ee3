//! Receipt
//!
//! Plain-text tables for the catalog listing and for a priced cart.

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, MoneyError, iso::Currency};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::Cart,
    catalog::Catalog,
    checkout::{self, CheckoutError, OrderSummary},
    delivery::{DeliveryMethod, DeliveryPolicy},
    pricing::{TotalPriceError, format_money},
    products::{Product, ProductKey},
};

/// Errors that can occur when building or writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Error calculating totals.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Error pricing the order.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// A cart line refers to a product missing from the catalog.
    #[error("Missing product")]
    MissingProduct(ProductKey),

    /// IO error
    #[error("IO error")]
    IO,
}

/// A priced cart, ready to print.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Receipt<'a> {
    summary: OrderSummary<'a>,
    free_delivery_remaining: Option<Money<'a, Currency>>,
    free_delivery_progress: Option<Percentage>,
}

impl<'a> Receipt<'a> {
    /// Price a cart for a delivery method.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if the cart cannot be priced.
    pub fn from_cart(
        cart: &Cart<'a>,
        delivery: DeliveryMethod,
        policy: &DeliveryPolicy<'a>,
    ) -> Result<Self, ReceiptError> {
        let summary = checkout::quote(cart, delivery, policy)?;

        let hinted = policy.shows_free_delivery_hint(delivery, &summary.subtotal)?;

        let (free_delivery_remaining, free_delivery_progress) = if hinted {
            (
                Some(policy.remaining_for_free_delivery(&summary.subtotal)?),
                Some(policy.free_delivery_progress(&summary.subtotal)?),
            )
        } else {
            (None, None)
        };

        Ok(Self {
            summary,
            free_delivery_remaining,
            free_delivery_progress,
        })
    }

    /// Prices behind this receipt.
    pub fn summary(&self) -> &OrderSummary<'a> {
        &self.summary
    }

    /// Amount still needed for free delivery, when worth pointing out.
    pub fn free_delivery_remaining(&self) -> Option<Money<'a, Currency>> {
        self.free_delivery_remaining
    }

    /// Share of the free-delivery threshold already reached, when worth pointing out.
    pub fn free_delivery_progress(&self) -> Option<Percentage> {
        self.free_delivery_progress
    }

    /// Writes the cart lines and the totals.
    ///
    /// # Errors
    ///
    /// Returns an error if a product is missing from the catalog or the output fails.
    pub fn write_to(
        &self,
        mut out: impl io::Write,
        cart: &Cart<'_>,
        catalog: &Catalog<'_>,
    ) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Price", "Qty", "Total"]);

        for (idx, line) in cart.iter().enumerate() {
            let product = catalog
                .product(line.product())
                .ok_or(ReceiptError::MissingProduct(line.product()))?;

            builder.push_record([
                format!("#{:<3}", idx + 1),
                product.name.clone(),
                format_money(line.unit_price()),
                line.quantity().to_string(),
                format_money(&line.total()?),
            ]);
        }

        write_table(&mut out, builder, 2..5)?;
        self.write_summary(&mut out)
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        let delivery = self.summary.delivery;
        let delivery_label = format!(" Delivery ({delivery}, {}):", delivery.transit_time());

        let delivery_val = if self.summary.is_delivery_free() {
            "Free".to_string()
        } else {
            format_money(&self.summary.delivery_fee)
        };

        let lines = [
            (" Items:".to_string(), format_money(&self.summary.subtotal)),
            (delivery_label, delivery_val),
            (" Total:".to_string(), format_money(&self.summary.total)),
        ];

        let label_width = lines
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or_default();

        let value_width = lines
            .iter()
            .map(|(_, value)| value.chars().count())
            .max()
            .unwrap_or_default();

        for (label, value) in &lines {
            writeln!(out, "{label:<label_width$}  {value:>value_width$}")
                .map_err(|_err| ReceiptError::IO)?;
        }

        if let Some(remaining) = self.free_delivery_remaining {
            let progress = self
                .free_delivery_progress
                .map(|progress| format!(" ({}% there)", percent_points(progress)))
                .unwrap_or_default();

            writeln!(
                out,
                " Add {} more for free delivery{progress}",
                format_money(&remaining)
            )
            .map_err(|_err| ReceiptError::IO)?;
        }

        writeln!(out).map_err(|_err| ReceiptError::IO)
    }
}

/// Writes a product listing.
///
/// # Errors
///
/// Returns an error if the output fails.
pub fn write_catalog<'p, 'a: 'p>(
    mut out: impl io::Write,
    products: impl IntoIterator<Item = &'p Product<'a>>,
) -> Result<(), ReceiptError> {
    let mut builder = Builder::default();

    builder.push_record(["Id", "", "Product", "Category", "Badge", "Price"]);

    for product in products {
        builder.push_record([
            product.id.0.to_string(),
            product.image.clone(),
            product.name.clone(),
            product.category.clone(),
            product
                .badge
                .map(|badge| badge.label())
                .unwrap_or_default()
                .to_string(),
            format_money(&product.price),
        ]);
    }

    write_table(&mut out, builder, 5..6)
}

/// Writes the fee and transit time of every delivery method at this subtotal.
///
/// # Errors
///
/// Returns an error if the subtotal uses another currency or the output fails.
pub fn write_delivery_options(
    mut out: impl io::Write,
    policy: &DeliveryPolicy<'_>,
    subtotal: &Money<'_, Currency>,
) -> Result<(), ReceiptError> {
    let mut builder = Builder::default();

    builder.push_record(["Delivery", "Time", "Fee"]);

    for method in DeliveryMethod::ALL {
        let fee = policy.fee(method, subtotal)?;

        let fee_val = if fee.to_minor_units() == 0 {
            "Free".to_string()
        } else {
            format_money(&fee)
        };

        builder.push_record([
            method.label().to_string(),
            method.transit_time().to_string(),
            fee_val,
        ]);
    }

    write_table(&mut out, builder, 2..3)
}

fn percent_points(percentage: Percentage) -> Decimal {
    // `Percentage` is a fraction, e.g. 0.25
    ((percentage * Decimal::ONE) * Decimal::ONE_HUNDRED).round_dp(0)
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    right_aligned: std::ops::Range<usize>,
) -> Result<(), ReceiptError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Columns::new(right_aligned), Alignment::right());
    table.modify(Rows::first(), Alignment::left());

    writeln!(out, "\n{table}").map_err(|_err| ReceiptError::IO)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::RUB;
    use testresult::TestResult;

    use crate::{fixtures::builtin_catalog, products::ProductId};

    use super::*;

    fn cart_with<'a>(catalog: &Catalog<'a>, ids: &[u32]) -> TestResult<Cart<'a>> {
        let mut cart = Cart::new(catalog.currency());

        for id in ids {
            let (key, product) = catalog.get(ProductId(*id)).ok_or("missing product")?;

            cart.add(key, product)?;
        }

        Ok(cart)
    }

    #[test]
    fn receipt_hints_free_delivery_below_threshold() -> TestResult {
        let catalog = builtin_catalog()?;
        let cart = cart_with(&catalog, &[7])?;

        let policy = DeliveryPolicy::default();
        let receipt = Receipt::from_cart(&cart, DeliveryMethod::Courier, &policy)?;

        assert_eq!(
            receipt.free_delivery_remaining(),
            Some(Money::from_minor(411_000, RUB))
        );
        assert_eq!(receipt.summary().total, Money::from_minor(119_000, RUB));
        assert_eq!(
            receipt.free_delivery_progress().map(percent_points),
            Some(Decimal::from(18))
        );

        Ok(())
    }

    #[test]
    fn receipt_has_no_hint_for_pickup() -> TestResult {
        let catalog = builtin_catalog()?;
        let cart = cart_with(&catalog, &[7])?;

        let policy = DeliveryPolicy::default();
        let receipt = Receipt::from_cart(&cart, DeliveryMethod::Pickup, &policy)?;

        assert_eq!(receipt.free_delivery_remaining(), None);
        assert_eq!(receipt.free_delivery_progress(), None);

        Ok(())
    }

    #[test]
    fn write_to_lists_lines_and_totals() -> TestResult {
        let catalog = builtin_catalog()?;
        let cart = cart_with(&catalog, &[8, 8, 7])?;
        let policy = DeliveryPolicy::default();
        let receipt = Receipt::from_cart(&cart, DeliveryMethod::Post, &policy)?;

        let mut out = Vec::new();
        receipt.write_to(&mut out, &cart, &catalog)?;
        let text = String::from_utf8(out)?;

        assert!(text.contains("Wireless Headphones"));
        assert!(text.contains("15 980 ₽"));
        assert!(text.contains("Delivery (Post, 3-7 days):"));
        assert!(text.contains("Free"));
        assert!(text.contains("16 870 ₽"));
        assert!(!text.contains("more for free delivery"));

        Ok(())
    }

    #[test]
    fn write_to_shows_transit_time_and_progress() -> TestResult {
        let catalog = builtin_catalog()?;
        let cart = cart_with(&catalog, &[7])?;
        let policy = DeliveryPolicy::default();
        let receipt = Receipt::from_cart(&cart, DeliveryMethod::Courier, &policy)?;

        let mut out = Vec::new();
        receipt.write_to(&mut out, &cart, &catalog)?;
        let text = String::from_utf8(out)?;

        assert!(text.contains("Delivery (Courier, next day):"));
        assert!(text.contains("Add 4 110 ₽ more for free delivery (18% there)"));

        Ok(())
    }

    #[test]
    fn write_delivery_options_lists_every_method() -> TestResult {
        let policy = DeliveryPolicy::default();

        let mut out = Vec::new();
        write_delivery_options(&mut out, &policy, &Money::from_minor(89_000, RUB))?;
        let text = String::from_utf8(out)?;

        assert!(text.contains("Courier"));
        assert!(text.contains("300 ₽"));
        assert!(text.contains("Pickup"));
        assert!(text.contains("Post"));
        assert!(text.contains("350 ₽"));
        assert!(text.contains("3-7 days"));

        let mut out = Vec::new();
        write_delivery_options(&mut out, &policy, &Money::from_minor(500_000, RUB))?;
        let text = String::from_utf8(out)?;

        assert!(!text.contains("300 ₽"));
        assert_eq!(text.matches("Free").count(), 3);

        Ok(())
    }

    #[test]
    fn write_catalog_lists_products() -> TestResult {
        let catalog = builtin_catalog()?;

        let mut out = Vec::new();
        write_catalog(&mut out, catalog.iter().map(|(_, product)| product))?;
        let text = String::from_utf8(out)?;

        assert!(text.contains("Smartphone Galaxy Pro"));
        assert!(text.contains("45 990 ₽"));
        assert!(text.contains("Hit"));

        Ok(())
    }
}
