//! Storefront
//!
//! Session state behind the shop page: the catalog, the selected category, the cart
//! and the checkout form, with one method per customer action.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    cart::{Cart, CartError, CartLine, QuantityUpdate},
    catalog::{Catalog, CategoryFilter},
    checkout::{self, CheckoutError, CheckoutForm, OrderConfirmation, OrderSummary},
    delivery::DeliveryPolicy,
    products::{Product, ProductId, ProductKey},
};

/// Number of products shown on the home page.
pub const FEATURED_PRODUCTS: usize = 4;

/// Errors raised by storefront actions.
#[derive(Debug, Error, PartialEq)]
pub enum StorefrontError {
    /// The catalog has no product with this id.
    #[error("Unknown product {0}")]
    UnknownProduct(ProductId),

    /// The catalog does not declare this category.
    #[error("Unknown category {0:?}")]
    UnknownCategory(String),

    /// Cart mutation failed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Checkout failed.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
}

/// Storefront
#[derive(Debug, Clone)]
pub struct Storefront<'a> {
    catalog: Catalog<'a>,
    policy: DeliveryPolicy<'a>,
    cart: Cart<'a>,
    selected_category: CategoryFilter,
    form: CheckoutForm,
    checkout_open: bool,
}

impl<'a> Storefront<'a> {
    /// Open a storefront over a catalog with an empty cart.
    pub fn new(catalog: Catalog<'a>, policy: DeliveryPolicy<'a>) -> Self {
        let cart = Cart::new(catalog.currency());

        Self {
            catalog,
            policy,
            cart,
            selected_category: CategoryFilter::All,
            form: CheckoutForm::default(),
            checkout_open: false,
        }
    }

    /// The catalog on sale.
    pub fn catalog(&self) -> &Catalog<'a> {
        &self.catalog
    }

    /// The delivery fees in force.
    pub fn policy(&self) -> &DeliveryPolicy<'a> {
        &self.policy
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart<'a> {
        &self.cart
    }

    /// The checkout form.
    pub fn form(&self) -> &CheckoutForm {
        &self.form
    }

    /// The checkout form, for editing.
    pub fn form_mut(&mut self) -> &mut CheckoutForm {
        &mut self.form
    }

    /// The category the listing is filtered by.
    pub fn selected_category(&self) -> &CategoryFilter {
        &self.selected_category
    }

    /// Whether the checkout panel is open.
    pub fn is_checkout_open(&self) -> bool {
        self.checkout_open
    }

    /// Filter the listing by category.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::UnknownCategory`] if the catalog does not declare it.
    pub fn select_category(&mut self, filter: CategoryFilter) -> Result<(), StorefrontError> {
        if let CategoryFilter::Named(category) = &filter
            && !self.catalog.has_category(category)
        {
            return Err(StorefrontError::UnknownCategory(category.clone()));
        }

        debug!(category = %filter, "category selected");

        self.selected_category = filter;

        Ok(())
    }

    /// Products in the selected category.
    pub fn visible_products(&self) -> impl Iterator<Item = (ProductKey, &Product<'a>)> + '_ {
        self.catalog.filter(&self.selected_category)
    }

    /// Products shown on the home page.
    pub fn featured_products(&self) -> impl Iterator<Item = (ProductKey, &Product<'a>)> + '_ {
        self.catalog.featured(FEATURED_PRODUCTS)
    }

    /// Add one unit of a product to the cart. Returns the new quantity.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is unknown or the cart rejects it.
    pub fn add_to_cart(&mut self, id: ProductId) -> Result<u32, StorefrontError> {
        let (key, product) = self
            .catalog
            .get(id)
            .ok_or(StorefrontError::UnknownProduct(id))?;

        let quantity = self.cart.add(key, product)?;

        debug!(product = %id, quantity, "added to cart");

        Ok(quantity)
    }

    /// Remove a product from the cart.
    pub fn remove_from_cart(&mut self, id: ProductId) -> Option<CartLine<'a>> {
        let removed = self.cart.remove(id);

        if removed.is_some() {
            debug!(product = %id, "removed from cart");
        }

        removed
    }

    /// Change a product's quantity by `delta`; the line is dropped when it reaches zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not in the cart or the quantity overflows.
    pub fn update_quantity(
        &mut self,
        id: ProductId,
        delta: i64,
    ) -> Result<QuantityUpdate, StorefrontError> {
        let update = self.cart.update_quantity(id, delta)?;

        debug!(product = %id, delta, ?update, "quantity updated");

        Ok(update)
    }

    /// Price the cart with the delivery method chosen on the form.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be priced.
    pub fn quote(&self) -> Result<OrderSummary<'a>, CheckoutError> {
        checkout::quote(&self.cart, self.form.delivery, &self.policy)
    }

    /// Open the checkout panel.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if there is nothing to order.
    pub fn open_checkout(&mut self) -> Result<(), CheckoutError> {
        if let Err(error) = checkout::begin(&self.cart) {
            warn!(%error, "checkout refused");

            return Err(error);
        }

        self.checkout_open = true;

        Ok(())
    }

    /// Close the checkout panel, keeping the cart and the form as they are.
    pub fn close_checkout(&mut self) {
        self.checkout_open = false;
    }

    /// Place the order. On success the cart is emptied, the form reset and the checkout
    /// panel closed; on failure nothing changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart is empty, required fields are missing, or the
    /// order cannot be priced.
    pub fn submit_order(&mut self) -> Result<OrderConfirmation<'a>, CheckoutError> {
        match checkout::submit(&mut self.cart, &mut self.form, &self.policy) {
            Ok(confirmation) => {
                self.checkout_open = false;

                info!(
                    total = confirmation.summary.total.to_minor_units(),
                    items = confirmation.summary.item_count,
                    delivery = %confirmation.summary.delivery,
                    payment = %confirmation.payment,
                    "order placed"
                );

                Ok(confirmation)
            }
            Err(error) => {
                warn!(%error, "order rejected");

                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::RUB};
    use testresult::TestResult;

    use crate::{delivery::DeliveryMethod, fixtures::builtin_catalog, notices::Notice};

    use super::*;

    fn storefront() -> TestResult<Storefront<'static>> {
        Ok(Storefront::new(builtin_catalog()?, DeliveryPolicy::default()))
    }

    #[test]
    fn starts_with_all_categories_and_empty_cart() -> TestResult {
        let shop = storefront()?;

        assert_eq!(shop.selected_category(), &CategoryFilter::All);
        assert_eq!(shop.visible_products().count(), 8);
        assert!(shop.cart().is_empty());
        assert!(!shop.is_checkout_open());

        Ok(())
    }

    #[test]
    fn featured_products_are_first_four() -> TestResult {
        let shop = storefront()?;

        let ids: Vec<u32> = shop.featured_products().map(|(_, p)| p.id.0).collect();

        assert_eq!(ids, vec![1, 2, 3, 4]);

        Ok(())
    }

    #[test]
    fn select_category_filters_listing() -> TestResult {
        let mut shop = storefront()?;

        shop.select_category(CategoryFilter::from("Books"))?;

        let names: Vec<&str> = shop
            .visible_products()
            .map(|(_, p)| p.name.as_str())
            .collect();

        assert_eq!(names, vec!["Novel \"Space Within\""]);

        shop.select_category(CategoryFilter::All)?;

        assert_eq!(shop.visible_products().count(), 8);

        Ok(())
    }

    #[test]
    fn select_unknown_category_errors() -> TestResult {
        let mut shop = storefront()?;

        assert_eq!(
            shop.select_category(CategoryFilter::from("Garden")),
            Err(StorefrontError::UnknownCategory("Garden".to_string()))
        );
        assert_eq!(shop.selected_category(), &CategoryFilter::All);

        Ok(())
    }

    #[test]
    fn add_unknown_product_errors() -> TestResult {
        let mut shop = storefront()?;

        assert_eq!(
            shop.add_to_cart(ProductId(42)),
            Err(StorefrontError::UnknownProduct(ProductId(42)))
        );

        Ok(())
    }

    #[test]
    fn cart_actions_update_quote() -> TestResult {
        let mut shop = storefront()?;

        shop.add_to_cart(ProductId(7))?;
        shop.add_to_cart(ProductId(7))?;
        shop.add_to_cart(ProductId(6))?;

        let summary = shop.quote()?;

        assert_eq!(summary.subtotal, Money::from_minor(477_000, RUB));
        assert_eq!(summary.delivery_fee, Money::from_minor(30_000, RUB));
        assert_eq!(shop.cart().item_count(), 3);

        shop.update_quantity(ProductId(7), -1)?;
        shop.form_mut().delivery = DeliveryMethod::Pickup;

        let summary = shop.quote()?;

        assert_eq!(summary.total, Money::from_minor(388_000, RUB));

        assert!(shop.remove_from_cart(ProductId(6)).is_some());
        assert!(shop.remove_from_cart(ProductId(6)).is_none());

        Ok(())
    }

    #[test]
    fn open_checkout_refuses_empty_cart() -> TestResult {
        let mut shop = storefront()?;

        let error = shop.open_checkout().err().ok_or("expected empty cart error")?;
        let notice = Notice::from(&error);

        assert_eq!(error, CheckoutError::EmptyCart);
        assert!(notice.is_destructive());
        assert!(!shop.is_checkout_open());

        Ok(())
    }

    #[test]
    fn submit_order_places_and_resets() -> TestResult {
        let mut shop = storefront()?;

        shop.add_to_cart(ProductId(1))?;
        shop.open_checkout()?;

        let form = shop.form_mut();
        form.name = "Ivan".to_string();
        form.phone = "+7 495 123-45-67".to_string();
        form.address = "Moscow".to_string();

        let confirmation = shop.submit_order()?;

        assert_eq!(confirmation.summary.total, Money::from_minor(4_599_000, RUB));
        assert!(shop.cart().is_empty());
        assert!(!shop.is_checkout_open());
        assert_eq!(shop.form(), &CheckoutForm::default());

        Ok(())
    }

    #[test]
    fn submit_accepts_whitespace_name() -> TestResult {
        let mut shop = storefront()?;

        shop.add_to_cart(ProductId(7))?;
        shop.open_checkout()?;

        let form = shop.form_mut();
        form.name = " ".to_string();
        form.phone = "1".to_string();
        form.address = "x".to_string();

        let confirmation = shop.submit_order()?;

        assert_eq!(confirmation.customer, " ");
        assert!(shop.cart().is_empty());

        Ok(())
    }

    #[test]
    fn failed_submit_keeps_panel_open() -> TestResult {
        let mut shop = storefront()?;

        shop.add_to_cart(ProductId(3))?;
        shop.open_checkout()?;

        assert!(shop.submit_order().is_err());
        assert!(shop.is_checkout_open());
        assert_eq!(shop.cart().len(), 1);

        shop.close_checkout();

        assert!(!shop.is_checkout_open());
        assert_eq!(shop.cart().len(), 1);

        Ok(())
    }
}
