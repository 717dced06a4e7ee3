use std::io;

use clap::Args;
use storefront::{checkout::PaymentMethod, notices::Notice, receipt::Receipt};

use crate::cli::{CartArgs, CliError, config::StoreConfig};

#[derive(Debug, Args)]
pub(crate) struct OrderArgs {
    #[command(flatten)]
    cart: CartArgs,

    /// Customer name (required)
    #[arg(short, long, default_value = "")]
    name: String,

    /// Contact phone (required)
    #[arg(short, long, default_value = "")]
    phone: String,

    /// Delivery address (required)
    #[arg(short, long, default_value = "")]
    address: String,

    /// Contact email
    #[arg(short, long, default_value = "")]
    email: String,

    /// Comment for the order
    #[arg(long, default_value = "")]
    comment: String,

    /// Payment method
    #[arg(long, value_enum, default_value_t = PaymentMethod::Card)]
    payment: PaymentMethod,
}

pub(crate) fn run(
    args: OrderArgs,
    store: &StoreConfig,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    let mut shop = args.cart.fill(store)?;

    let receipt = Receipt::from_cart(shop.cart(), shop.form().delivery, shop.policy())?;
    receipt.write_to(&mut *out, shop.cart(), shop.catalog())?;

    if let Err(error) = shop.open_checkout() {
        writeln!(out, "{}", Notice::from(&error))?;

        return Err(CliError::OrderRejected);
    }

    let form = shop.form_mut();
    form.name = args.name;
    form.phone = args.phone;
    form.address = args.address;
    form.email = args.email;
    form.comment = args.comment;
    form.payment = args.payment;

    match shop.submit_order() {
        Ok(confirmation) => {
            writeln!(out, "{}", Notice::order_placed(&confirmation))?;

            Ok(())
        }
        Err(error) => {
            writeln!(out, "{}", Notice::from(&error))?;

            Err(CliError::OrderRejected)
        }
    }
}
