//! Prices

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::cart::CartLine;

/// Errors that can occur while calculating total price.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// A line total or running sum does not fit in minor units.
    #[error("price overflow while totalling cart lines")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Calculates the total of a single cart line (unit price x quantity) in minor units.
///
/// # Errors
///
/// - [`TotalPriceError::Overflow`]: the product does not fit in an `i64`.
pub fn line_total_minor(line: &CartLine<'_>) -> Result<i64, TotalPriceError> {
    line.unit_price()
        .to_minor_units()
        .checked_mul(i64::from(line.quantity()))
        .ok_or(TotalPriceError::Overflow)
}

/// Calculates the total price of a list of cart lines.
///
/// An empty list totals to zero in the given currency.
///
/// # Errors
///
/// - [`TotalPriceError::Money`]: a line is priced in a different currency.
/// - [`TotalPriceError::Overflow`]: the total does not fit in minor units.
pub fn total_price<'a>(
    lines: &[CartLine<'a>],
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, TotalPriceError> {
    let total = lines.iter().try_fold(0_i64, |acc, line| {
        let line_currency = line.unit_price().currency();

        if line_currency != currency {
            return Err(TotalPriceError::Money(MoneyError::CurrencyMismatch {
                expected: currency.iso_alpha_code,
                actual: line_currency.iso_alpha_code,
            }));
        }

        acc.checked_add(line_total_minor(line)?)
            .ok_or(TotalPriceError::Overflow)
    })?;

    Ok(Money::from_minor(total, currency))
}

/// Convert a major-unit amount (e.g. `49.99`) into minor units, rounding to the nearest unit.
///
/// Returns `None` on overflow.
pub fn major_to_minor(amount: Decimal) -> Option<i64> {
    amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
}

/// Format a minor-unit amount into a currency string.
///
/// Roubles render the way the storefront shows them, grouped by thousands with
/// a trailing sign (`45 990 ₽`); other currencies use a leading symbol.
pub fn format_price(minor_units: i64, currency_code: &str) -> String {
    let abs_minor = minor_units.unsigned_abs();
    let major_units = abs_minor / 100;
    let fractional = abs_minor % 100;
    let sign = if minor_units < 0 { "-" } else { "" };

    if currency_code == "RUB" {
        let grouped = group_thousands(major_units);

        return if fractional == 0 {
            format!("{sign}{grouped} ₽")
        } else {
            format!("{sign}{grouped},{fractional:02} ₽")
        };
    }

    let symbol = match currency_code {
        "GBP" => "£",
        "USD" => "$",
        "EUR" => "€",
        _ => "",
    };

    if symbol.is_empty() {
        format!("{sign}{major_units}.{fractional:02} {currency_code}")
    } else {
        format!("{sign}{symbol}{major_units}.{fractional:02}")
    }
}

/// Format a money value with [`format_price`].
pub fn format_money(money: &Money<'_, Currency>) -> String {
    format_price(money.to_minor_units(), money.currency().iso_alpha_code)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(' ');
        }

        grouped.push(ch);
    }

    grouped
}
