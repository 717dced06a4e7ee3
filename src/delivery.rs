//! Delivery
//!
//! Flat-fee delivery methods with a shared free-delivery threshold. Pickup is always
//! free; courier and post are waived once the cart subtotal reaches the threshold.

use std::fmt;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{
    Money, MoneyError,
    iso::{Currency, RUB},
};

/// How an order reaches the customer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum DeliveryMethod {
    /// City courier
    #[default]
    Courier,

    /// Collect from the store
    Pickup,

    /// National post
    Post,
}

impl DeliveryMethod {
    /// All methods in the order the checkout form offers them.
    pub const ALL: [DeliveryMethod; 3] = [
        DeliveryMethod::Courier,
        DeliveryMethod::Pickup,
        DeliveryMethod::Post,
    ];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            DeliveryMethod::Courier => "Courier",
            DeliveryMethod::Pickup => "Pickup",
            DeliveryMethod::Post => "Post",
        }
    }

    /// Advertised transit time.
    pub fn transit_time(self) -> &'static str {
        match self {
            DeliveryMethod::Courier => "next day",
            DeliveryMethod::Pickup => "ready the same day",
            DeliveryMethod::Post => "3-7 days",
        }
    }
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Delivery fees and the free-delivery threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeliveryPolicy<'a> {
    free_threshold: Money<'a, Currency>,
    courier_fee: Money<'a, Currency>,
    post_fee: Money<'a, Currency>,
}

impl<'a> DeliveryPolicy<'a> {
    /// Create a policy from minor-unit amounts in one currency.
    pub fn new(
        currency: &'a Currency,
        free_threshold_minor: i64,
        courier_fee_minor: i64,
        post_fee_minor: i64,
    ) -> Self {
        Self {
            free_threshold: Money::from_minor(free_threshold_minor, currency),
            courier_fee: Money::from_minor(courier_fee_minor, currency),
            post_fee: Money::from_minor(post_fee_minor, currency),
        }
    }

    /// Subtotal at which courier and post delivery become free.
    pub fn free_threshold(&self) -> Money<'a, Currency> {
        self.free_threshold
    }

    /// Currency all amounts are expressed in.
    pub fn currency(&self) -> &'a Currency {
        self.free_threshold.currency()
    }

    /// Flat fee for a method before the threshold is applied.
    pub fn base_fee(&self, method: DeliveryMethod) -> Money<'a, Currency> {
        match method {
            DeliveryMethod::Courier => self.courier_fee,
            DeliveryMethod::Post => self.post_fee,
            DeliveryMethod::Pickup => Money::from_minor(0, self.currency()),
        }
    }

    /// Whether the subtotal has reached the free-delivery threshold.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::CurrencyMismatch`] if the subtotal uses another currency.
    pub fn qualifies_for_free_delivery(
        &self,
        subtotal: &Money<'_, Currency>,
    ) -> Result<bool, MoneyError> {
        self.check_currency(subtotal)?;

        Ok(subtotal.to_minor_units() >= self.free_threshold.to_minor_units())
    }

    /// Delivery fee for a method at the given subtotal.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::CurrencyMismatch`] if the subtotal uses another currency.
    pub fn fee(
        &self,
        method: DeliveryMethod,
        subtotal: &Money<'_, Currency>,
    ) -> Result<Money<'a, Currency>, MoneyError> {
        if self.qualifies_for_free_delivery(subtotal)? {
            return Ok(Money::from_minor(0, self.currency()));
        }

        Ok(self.base_fee(method))
    }

    /// Amount still needed to reach free delivery, zero once reached.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::CurrencyMismatch`] if the subtotal uses another currency.
    pub fn remaining_for_free_delivery(
        &self,
        subtotal: &Money<'_, Currency>,
    ) -> Result<Money<'a, Currency>, MoneyError> {
        self.check_currency(subtotal)?;

        let remaining = self
            .free_threshold
            .to_minor_units()
            .saturating_sub(subtotal.to_minor_units())
            .max(0);

        Ok(Money::from_minor(remaining, self.currency()))
    }

    /// Whether checkout should point out the free-delivery threshold: the subtotal is
    /// below it and the chosen method would otherwise be charged.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::CurrencyMismatch`] if the subtotal uses another currency.
    pub fn shows_free_delivery_hint(
        &self,
        method: DeliveryMethod,
        subtotal: &Money<'_, Currency>,
    ) -> Result<bool, MoneyError> {
        Ok(method != DeliveryMethod::Pickup && !self.qualifies_for_free_delivery(subtotal)?)
    }

    /// Progress towards free delivery, capped at 100%.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::CurrencyMismatch`] if the subtotal uses another currency.
    pub fn free_delivery_progress(
        &self,
        subtotal: &Money<'_, Currency>,
    ) -> Result<Percentage, MoneyError> {
        self.check_currency(subtotal)?;

        let threshold = self.free_threshold.to_minor_units();

        if threshold <= 0 || subtotal.to_minor_units() >= threshold {
            return Ok(Percentage::from(1.0));
        }

        let ratio = Decimal::from(subtotal.to_minor_units().max(0)) / Decimal::from(threshold);

        Ok(Percentage::from(ratio))
    }

    fn check_currency(&self, subtotal: &Money<'_, Currency>) -> Result<(), MoneyError> {
        let currency = self.currency();

        if subtotal.currency() == currency {
            Ok(())
        } else {
            Err(MoneyError::CurrencyMismatch {
                expected: currency.iso_alpha_code,
                actual: subtotal.currency().iso_alpha_code,
            })
        }
    }
}

impl Default for DeliveryPolicy<'static> {
    /// Free delivery from 5 000 ₽; courier 300 ₽, post 350 ₽.
    fn default() -> Self {
        DeliveryPolicy::new(RUB, 500_000, 30_000, 35_000)
    }
}
