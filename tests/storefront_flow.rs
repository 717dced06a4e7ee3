//! End-to-end checkout flows against the built-in catalog.
//!
//! Prices (roubles): smartphone 45 990, sneakers 8 990, watch 12 990, jacket 6 990,
//! coffee machine 24 990, palette 2 990, novel 890, headphones 7 990.
//! Delivery: courier 300, post 350, pickup free; courier and post are free from 5 000.

use rusty_money::{Money, iso::RUB};
use testresult::TestResult;

use storefront::prelude::*;

fn rub(rubles: i64) -> Money<'static, rusty_money::iso::Currency> {
    Money::from_minor(rubles * 100, RUB)
}

fn shop() -> TestResult<Storefront<'static>> {
    Ok(Storefront::new(builtin_catalog()?, DeliveryPolicy::default()))
}

fn fill_required(shop: &mut Storefront<'_>) {
    let form = shop.form_mut();

    form.name = "Maria".to_string();
    form.phone = "+7 (495) 123-45-67".to_string();
    form.address = "Moscow, Primernaya st. 1".to_string();
}

#[test]
fn small_order_pays_courier_fee() -> TestResult {
    let mut shop = shop()?;

    shop.add_to_cart(ProductId(7))?;
    shop.add_to_cart(ProductId(6))?;
    shop.open_checkout()?;
    fill_required(&mut shop);

    let quote = shop.quote()?;

    assert_eq!(quote.subtotal, rub(3_880));
    assert_eq!(quote.delivery_fee, rub(300));
    assert_eq!(quote.total, rub(4_180));

    let confirmation = shop.submit_order()?;
    let notice = Notice::order_placed(&confirmation);

    assert_eq!(notice.variant, NoticeVariant::Default);
    assert_eq!(notice.title, "Order placed!");
    assert_eq!(
        notice.description,
        "Order for 4 180 ₽ accepted. Delivery: Courier. Payment: Card online."
    );
    assert!(shop.cart().is_empty());

    Ok(())
}

#[test]
fn crossing_threshold_waives_post_fee() -> TestResult {
    let mut shop = shop()?;

    shop.form_mut().delivery = DeliveryMethod::Post;
    shop.add_to_cart(ProductId(6))?;

    assert_eq!(shop.quote()?.delivery_fee, rub(350));

    // 2 990 + 2 990 = 5 980
    shop.update_quantity(ProductId(6), 1)?;

    let quote = shop.quote()?;

    assert_eq!(quote.subtotal, rub(5_980));
    assert!(quote.is_delivery_free());
    assert_eq!(quote.total, rub(5_980));

    // back under the threshold
    shop.update_quantity(ProductId(6), -1)?;

    assert_eq!(shop.quote()?.delivery_fee, rub(350));

    Ok(())
}

#[test]
fn pickup_never_charges() -> TestResult {
    let mut shop = shop()?;

    shop.form_mut().delivery = DeliveryMethod::Pickup;
    shop.add_to_cart(ProductId(7))?;

    let quote = shop.quote()?;

    assert_eq!(quote.total, rub(890));
    assert!(
        !shop
            .policy()
            .shows_free_delivery_hint(DeliveryMethod::Pickup, &quote.subtotal)?
    );

    Ok(())
}

#[test]
fn decrementing_last_unit_removes_line() -> TestResult {
    let mut shop = shop()?;

    shop.add_to_cart(ProductId(2))?;

    assert_eq!(
        shop.update_quantity(ProductId(2), -1)?,
        QuantityUpdate::Removed
    );
    assert!(shop.cart().is_empty());
    assert_eq!(
        shop.update_quantity(ProductId(2), -1),
        Err(StorefrontError::Cart(CartError::NotInCart(ProductId(2))))
    );

    Ok(())
}

#[test]
fn empty_cart_cannot_check_out() -> TestResult {
    let mut shop = shop()?;

    let error = shop.open_checkout().err().ok_or("expected checkout to be refused")?;
    let notice = Notice::from(&error);

    assert_eq!(notice.variant, NoticeVariant::Destructive);
    assert_eq!(notice.title, "Your cart is empty");

    Ok(())
}

#[test]
fn missing_fields_keep_everything() -> TestResult {
    let mut shop = shop()?;

    shop.add_to_cart(ProductId(1))?;
    shop.open_checkout()?;
    shop.form_mut().name = "Maria".to_string();
    shop.form_mut().payment = PaymentMethod::CardOnDelivery;

    let error = shop.submit_order().err().ok_or("expected missing fields")?;

    assert!(matches!(
        &error,
        CheckoutError::MissingFields(fields)
            if fields.as_slice() == [RequiredField::Phone, RequiredField::Address]
    ));
    assert!(Notice::from(&error).is_destructive());
    assert_eq!(shop.cart().item_count(), 1);
    assert_eq!(shop.form().payment, PaymentMethod::CardOnDelivery);
    assert!(shop.is_checkout_open());

    fill_required(&mut shop);

    let confirmation = shop.submit_order()?;

    assert_eq!(confirmation.summary.total, rub(45_990));
    assert_eq!(
        confirmation.description(),
        "Order for 45 990 ₽ accepted. Delivery: Courier. Payment: Card on delivery."
    );
    assert_eq!(shop.form(), &CheckoutForm::default());

    Ok(())
}

#[test]
fn category_filter_then_add() -> TestResult {
    let mut shop = shop()?;

    shop.select_category(CategoryFilter::from("Electronics"))?;

    let visible: Vec<ProductId> = shop.visible_products().map(|(_, p)| p.id).collect();

    assert_eq!(visible, vec![ProductId(1), ProductId(3), ProductId(8)]);

    for id in visible {
        shop.add_to_cart(id)?;
    }

    assert_eq!(shop.cart().item_count(), 3);
    assert_eq!(shop.quote()?.subtotal, rub(66_970));

    Ok(())
}
