use std::io;

use clap::{Args, Parser, Subcommand};
use storefront::{
    delivery::DeliveryMethod,
    fixtures::FixtureError,
    products::ProductId,
    receipt::ReceiptError,
    storefront::{Storefront, StorefrontError},
};
use thiserror::Error;

use crate::cli::config::{LoggingConfig, StoreConfig};

mod catalog;
pub(crate) mod config;
pub(crate) mod observability;
mod order;
mod quote;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// The catalog could not be loaded.
    #[error("Failed to load catalog: {0}")]
    Fixture(#[from] FixtureError),

    /// A storefront action failed.
    #[error(transparent)]
    Storefront(#[from] StorefrontError),

    /// Output could not be rendered.
    #[error(transparent)]
    Receipt(#[from] ReceiptError),

    /// A configured amount is negative or too large.
    #[error("Invalid amount for --{0}")]
    InvalidAmount(&'static str),

    /// The order was not placed.
    #[error("Order rejected")]
    OrderRejected,

    /// Writing to stdout failed.
    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront catalog, cart and checkout", long_about = None)]
pub(crate) struct Cli {
    /// Logging output settings.
    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    /// Catalog and delivery settings.
    #[command(flatten)]
    pub(crate) store: StoreConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List products, optionally filtered by category
    Catalog(catalog::CatalogArgs),

    /// Price a cart for a delivery method
    Quote(quote::QuoteArgs),

    /// Place an order
    Order(order::OrderArgs),
}

/// Cart contents given on the command line.
#[derive(Debug, Args)]
pub(crate) struct CartArgs {
    /// Product id to add; repeat to add more units
    #[arg(short, long = "item", required = true)]
    items: Vec<u32>,

    /// Delivery method
    #[arg(short, long, value_enum, default_value_t = DeliveryMethod::Courier)]
    delivery: DeliveryMethod,
}

impl CartArgs {
    /// Open a storefront and fill its cart.
    fn fill(&self, store: &StoreConfig) -> Result<Storefront<'static>, CliError> {
        let catalog = store.load_catalog()?;
        let policy = store.policy(catalog.currency())?;
        let mut shop = Storefront::new(catalog, policy);

        for id in &self.items {
            shop.add_to_cart(ProductId(*id))?;
        }

        shop.form_mut().delivery = self.delivery;

        Ok(shop)
    }
}

impl Cli {
    pub(crate) fn run(self) -> Result<(), CliError> {
        let stdout = io::stdout();

        self.run_to(&mut stdout.lock())
    }

    /// Run the command, writing its output to `out`.
    pub(crate) fn run_to(self, out: &mut impl io::Write) -> Result<(), CliError> {
        match self.command {
            Commands::Catalog(args) => catalog::run(&args, &self.store, out),
            Commands::Quote(args) => quote::run(&args, &self.store, out),
            Commands::Order(args) => order::run(args, &self.store, out),
        }
    }
}
