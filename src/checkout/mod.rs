//! Checkout
//!
//! Quoting, validating and placing an order for the current cart.

use std::fmt;

use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    cart::Cart,
    delivery::{DeliveryMethod, DeliveryPolicy},
    pricing::{TotalPriceError, format_money},
};

/// How the customer pays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum PaymentMethod {
    /// Card, paid online
    #[default]
    Card,

    /// Cash on delivery
    Cash,

    /// Card, paid on delivery
    CardOnDelivery,
}

impl PaymentMethod {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Card => "Card online",
            PaymentMethod::Cash => "Cash",
            PaymentMethod::CardOnDelivery => "Card on delivery",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Checkout form fields that must be filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    /// Customer name
    Name,

    /// Contact phone
    Phone,

    /// Delivery address
    Address,
}

impl RequiredField {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            RequiredField::Name => "name",
            RequiredField::Phone => "phone",
            RequiredField::Address => "address",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fields that failed validation, in form order.
pub type MissingFields = SmallVec<[RequiredField; 3]>;

/// Errors that stop an order from being placed.
#[derive(Debug, Error, PartialEq)]
pub enum CheckoutError {
    /// There is nothing to order.
    #[error("Cart is empty")]
    EmptyCart,

    /// Required form fields are empty.
    #[error("Missing required fields: {}", join_fields(.0))]
    MissingFields(MissingFields),

    /// Error calculating the cart subtotal.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// Money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

fn join_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Customer details and choices collected at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    /// Customer name (required)
    pub name: String,

    /// Contact phone (required)
    pub phone: String,

    /// Contact email
    pub email: String,

    /// Delivery address (required)
    pub address: String,

    /// Free-text comment for the order
    pub comment: String,

    /// Chosen delivery method
    pub delivery: DeliveryMethod,

    /// Chosen payment method
    pub payment: PaymentMethod,
}

impl CheckoutForm {
    /// Required fields left empty.
    pub fn missing_fields(&self) -> MissingFields {
        [
            (RequiredField::Name, &self.name),
            (RequiredField::Phone, &self.phone),
            (RequiredField::Address, &self.address),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    /// Clear every field and restore the default delivery and payment methods.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Price breakdown for the cart with a given delivery method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderSummary<'a> {
    /// Sum of the cart lines
    pub subtotal: Money<'a, Currency>,

    /// Delivery fee at this subtotal
    pub delivery_fee: Money<'a, Currency>,

    /// Subtotal plus delivery fee
    pub total: Money<'a, Currency>,

    /// Units in the cart
    pub item_count: u64,

    /// Delivery method the fee was calculated for
    pub delivery: DeliveryMethod,
}

impl OrderSummary<'_> {
    /// Whether delivery costs nothing.
    pub fn is_delivery_free(&self) -> bool {
        self.delivery_fee.to_minor_units() == 0
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderConfirmation<'a> {
    /// Prices at the moment the order was placed
    pub summary: OrderSummary<'a>,

    /// Chosen payment method
    pub payment: PaymentMethod,

    /// Customer name
    pub customer: String,
}

impl OrderConfirmation<'_> {
    /// One-line description shown to the customer.
    pub fn description(&self) -> String {
        format!(
            "Order for {} accepted. Delivery: {}. Payment: {}.",
            format_money(&self.summary.total),
            self.summary.delivery,
            self.payment
        )
    }
}

/// Price the cart for a delivery method.
///
/// # Errors
///
/// Returns an error if the subtotal cannot be calculated or the policy uses another currency.
pub fn quote<'a>(
    cart: &Cart<'a>,
    delivery: DeliveryMethod,
    policy: &DeliveryPolicy<'a>,
) -> Result<OrderSummary<'a>, CheckoutError> {
    let subtotal = cart.subtotal()?;
    let delivery_fee = policy.fee(delivery, &subtotal)?;

    let total = subtotal
        .to_minor_units()
        .checked_add(delivery_fee.to_minor_units())
        .ok_or(TotalPriceError::Overflow)?;

    Ok(OrderSummary {
        subtotal,
        delivery_fee,
        total: Money::from_minor(total, cart.currency()),
        item_count: cart.item_count(),
        delivery,
    })
}

/// Check that checkout can start.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] if the cart has no lines.
pub fn begin(cart: &Cart<'_>) -> Result<(), CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    Ok(())
}

/// Check that every required field is filled in.
///
/// # Errors
///
/// Returns [`CheckoutError::MissingFields`] listing every empty required field.
pub fn validate(form: &CheckoutForm) -> Result<(), CheckoutError> {
    let missing = form.missing_fields();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CheckoutError::MissingFields(missing))
    }
}

/// Place the order: quote it, validate the form, then empty the cart and reset the form.
///
/// Nothing is modified when an error is returned.
///
/// # Errors
///
/// Returns an error if the cart is empty, a required field is missing, or the order
/// cannot be priced.
pub fn submit<'a>(
    cart: &mut Cart<'a>,
    form: &mut CheckoutForm,
    policy: &DeliveryPolicy<'a>,
) -> Result<OrderConfirmation<'a>, CheckoutError> {
    begin(cart)?;
    validate(form)?;

    let summary = quote(cart, form.delivery, policy)?;

    let confirmation = OrderConfirmation {
        summary,
        payment: form.payment,
        customer: form.name.clone(),
    };

    cart.clear();
    form.reset();

    Ok(confirmation)
}
