use std::io;

use clap::Args;
use storefront::receipt::{Receipt, write_delivery_options};

use crate::cli::{CartArgs, CliError, config::StoreConfig};

#[derive(Debug, Args)]
pub(crate) struct QuoteArgs {
    #[command(flatten)]
    cart: CartArgs,
}

pub(crate) fn run(
    args: &QuoteArgs,
    store: &StoreConfig,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    let shop = args.cart.fill(store)?;

    let receipt = Receipt::from_cart(shop.cart(), shop.form().delivery, shop.policy())?;

    receipt.write_to(&mut *out, shop.cart(), shop.catalog())?;
    write_delivery_options(&mut *out, shop.policy(), &receipt.summary().subtotal)?;

    Ok(())
}
