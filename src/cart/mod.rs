//! Cart

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    pricing::{TotalPriceError, line_total_minor, total_price},
    products::{Product, ProductId, ProductKey},
};

/// Errors related to cart mutations or totals.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// The product's currency differs from the cart currency (product, product currency, cart currency).
    #[error("Product {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),

    /// The product has no line in the cart.
    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),

    /// Quantity arithmetic overflowed.
    #[error("Quantity overflow for product {0}")]
    QuantityOverflow(ProductId),

    /// Error calculating cart totals.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),
}

/// A product in the cart together with its quantity. Quantity is never zero.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine<'a> {
    product: ProductKey,
    product_id: ProductId,
    unit_price: Money<'a, Currency>,
    quantity: u32,
}

impl<'a> CartLine<'a> {
    /// Creates a new cart line.
    pub fn new(
        product: ProductKey,
        product_id: ProductId,
        unit_price: Money<'a, Currency>,
        quantity: u32,
    ) -> Self {
        Self {
            product,
            product_id,
            unit_price,
            quantity,
        }
    }

    /// Storage key of the product.
    pub fn product(&self) -> ProductKey {
        self.product
    }

    /// Catalog id of the product.
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Unit price captured when the product was added.
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// Number of units of the product.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Line total (unit price x quantity).
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError::Overflow`] if the total does not fit in minor units.
    pub fn total(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        Ok(Money::from_minor(
            line_total_minor(self)?,
            self.unit_price.currency(),
        ))
    }
}

/// Outcome of [`Cart::update_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityUpdate {
    /// The line now holds the given quantity.
    Updated(u32),

    /// The quantity reached zero and the line was dropped.
    Removed,
}

/// Cart
#[derive(Debug, Clone)]
pub struct Cart<'a> {
    lines: Vec<CartLine<'a>>,
    currency: &'a Currency,
}

impl<'a> Cart<'a> {
    /// Create a new, empty cart.
    #[must_use]
    pub fn new(currency: &'a Currency) -> Self {
        Cart {
            lines: Vec::new(),
            currency,
        }
    }

    /// Add one unit of a product, appending a new line if it isn't in the cart yet.
    ///
    /// Returns the quantity of the product after the addition.
    ///
    /// # Errors
    ///
    /// - [`CartError::CurrencyMismatch`]: the product is priced in another currency.
    /// - [`CartError::QuantityOverflow`]: the line quantity cannot grow any further.
    pub fn add(&mut self, key: ProductKey, product: &Product<'a>) -> Result<u32, CartError> {
        let product_currency = product.price.currency();

        if product_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                product.id,
                product_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if let Some(line) = self.line_mut(product.id) {
            line.quantity = line
                .quantity
                .checked_add(1)
                .ok_or(CartError::QuantityOverflow(product.id))?;

            return Ok(line.quantity);
        }

        self.lines
            .push(CartLine::new(key, product.id, product.price, 1));

        Ok(1)
    }

    /// Remove a product's line, whatever its quantity.
    pub fn remove(&mut self, product: ProductId) -> Option<CartLine<'a>> {
        let position = self
            .lines
            .iter()
            .position(|line| line.product_id == product)?;

        Some(self.lines.remove(position))
    }

    /// Change a product's quantity by `delta`. The result is floored at zero and a
    /// line that reaches zero is removed.
    ///
    /// # Errors
    ///
    /// - [`CartError::NotInCart`]: the product has no line in the cart.
    /// - [`CartError::QuantityOverflow`]: the new quantity does not fit in a `u32`.
    pub fn update_quantity(
        &mut self,
        product: ProductId,
        delta: i64,
    ) -> Result<QuantityUpdate, CartError> {
        let line = self
            .line_mut(product)
            .ok_or(CartError::NotInCart(product))?;

        let new_quantity = i64::from(line.quantity)
            .checked_add(delta)
            .ok_or(CartError::QuantityOverflow(product))?
            .max(0);

        if new_quantity == 0 {
            self.lines.retain(|line| line.product_id != product);

            return Ok(QuantityUpdate::Removed);
        }

        line.quantity =
            u32::try_from(new_quantity).map_err(|_err| CartError::QuantityOverflow(product))?;

        Ok(QuantityUpdate::Updated(line.quantity))
    }

    /// Calculate the subtotal of the cart.
    ///
    /// # Errors
    ///
    /// Returns a `TotalPriceError` if there was a money arithmetic or currency mismatch error.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        total_price(&self.lines, self.currency)
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity))
            .sum()
    }

    /// Quantity of the given product, zero if absent.
    #[must_use]
    pub fn quantity_of(&self, product: ProductId) -> u32 {
        self.line(product).map_or(0, CartLine::quantity)
    }

    /// Get a product's line.
    #[must_use]
    pub fn line(&self, product: ProductId) -> Option<&CartLine<'a>> {
        self.lines.iter().find(|line| line.product_id == product)
    }

    fn line_mut(&mut self, product: ProductId) -> Option<&mut CartLine<'a>> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id == product)
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine<'a>> {
        self.lines.iter()
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }
}
