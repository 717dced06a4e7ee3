use std::io;

use clap::Args;
use storefront::{
    catalog::CategoryFilter,
    receipt::write_catalog,
    storefront::Storefront,
};

use crate::cli::{CliError, config::StoreConfig};

#[derive(Debug, Args)]
pub(crate) struct CatalogArgs {
    /// Category to list ("All" for every product)
    #[arg(short, long, default_value = "All")]
    category: String,

    /// Only show the products featured on the home page
    #[arg(long)]
    featured: bool,
}

pub(crate) fn run(
    args: &CatalogArgs,
    store: &StoreConfig,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    let catalog = store.load_catalog()?;
    let policy = store.policy(catalog.currency())?;
    let mut shop = Storefront::new(catalog, policy);

    if args.featured {
        writeln!(out, "Featured")?;
        write_catalog(&mut *out, shop.featured_products().map(|(_, product)| product))?;

        return Ok(());
    }

    shop.select_category(CategoryFilter::from(args.category.as_str()))?;

    writeln!(out, "Categories: All, {}", shop.catalog().categories().join(", "))?;

    write_catalog(&mut *out, shop.visible_products().map(|(_, product)| product))?;

    Ok(())
}
