//! Storefront & Logging Config

use std::path::PathBuf;

use clap::Args;
use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use storefront::{
    catalog::Catalog,
    delivery::DeliveryPolicy,
    fixtures::{FixtureError, builtin_catalog, load_catalog},
    pricing::major_to_minor,
};

use crate::cli::CliError;

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub(crate) log_level: String,

    /// Log format (compact, json)
    #[arg(
        long,
        env = "LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Compact,
        global = true
    )]
    pub(crate) log_format: LogFormat,
}

/// Catalog and delivery settings.
#[derive(Debug, Args)]
pub(crate) struct StoreConfig {
    /// Catalog YAML file; the built-in catalog is used when omitted
    #[arg(long, env = "STOREFRONT_CATALOG", global = true)]
    pub(crate) catalog: Option<PathBuf>,

    /// Subtotal from which courier and post delivery are free, in major units
    #[arg(
        long,
        env = "STOREFRONT_FREE_DELIVERY_THRESHOLD",
        default_value = "5000",
        global = true
    )]
    pub(crate) free_delivery_threshold: Decimal,

    /// Courier delivery fee, in major units
    #[arg(
        long,
        env = "STOREFRONT_COURIER_FEE",
        default_value = "300",
        global = true
    )]
    pub(crate) courier_fee: Decimal,

    /// Post delivery fee, in major units
    #[arg(long, env = "STOREFRONT_POST_FEE", default_value = "350", global = true)]
    pub(crate) post_fee: Decimal,
}

impl StoreConfig {
    /// Load the configured catalog.
    pub(crate) fn load_catalog(&self) -> Result<Catalog<'static>, FixtureError> {
        match &self.catalog {
            Some(path) => load_catalog(path),
            None => builtin_catalog(),
        }
    }

    /// Delivery policy in the catalog's currency.
    pub(crate) fn policy<'a>(
        &self,
        currency: &'a Currency,
    ) -> Result<DeliveryPolicy<'a>, CliError> {
        Ok(DeliveryPolicy::new(
            currency,
            minor_units("free-delivery-threshold", self.free_delivery_threshold)?,
            minor_units("courier-fee", self.courier_fee)?,
            minor_units("post-fee", self.post_fee)?,
        ))
    }
}

fn minor_units(name: &'static str, amount: Decimal) -> Result<i64, CliError> {
    if amount.is_sign_negative() {
        return Err(CliError::InvalidAmount(name));
    }

    major_to_minor(amount).ok_or(CliError::InvalidAmount(name))
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use rusty_money::{Money, iso::RUB};
    use testresult::TestResult;

    use crate::cli::Cli;

    use super::*;

    #[test]
    fn defaults_match_storefront_policy() -> TestResult {
        let cli = Cli::try_parse_from(["storefront", "catalog"])?;

        assert_eq!(cli.store.policy(RUB)?, DeliveryPolicy::default());
        assert!(cli.store.catalog.is_none());

        Ok(())
    }

    #[test]
    fn overrides_are_parsed_in_major_units() -> TestResult {
        let cli = Cli::try_parse_from([
            "storefront",
            "catalog",
            "--free-delivery-threshold",
            "7500.50",
            "--courier-fee",
            "0",
        ])?;

        let policy = cli.store.policy(RUB)?;

        assert_eq!(policy.free_threshold(), Money::from_minor(750_050, RUB));
        assert_eq!(
            policy.base_fee(storefront::delivery::DeliveryMethod::Courier),
            Money::from_minor(0, RUB)
        );

        Ok(())
    }

    #[test]
    fn negative_fee_is_rejected() -> TestResult {
        let cli = Cli::try_parse_from(["storefront", "catalog", "--post-fee=-1"])?;

        assert!(matches!(
            cli.store.policy(RUB),
            Err(CliError::InvalidAmount("post-fee"))
        ));

        Ok(())
    }

    #[test]
    fn builtin_catalog_by_default() -> TestResult {
        let cli = Cli::try_parse_from(["storefront", "catalog"])?;

        assert_eq!(cli.store.load_catalog()?.len(), 8);

        Ok(())
    }
}
