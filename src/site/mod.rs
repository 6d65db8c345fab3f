//! The call-site catalog: descriptor configurations for the booking,
//! purchase, shopping-cart, and studio-admin pages.
//!
//! Endpoints, payload keys, region names, prompt wording, and debounce
//! windows match the markup these pages render; the trigger class constants
//! are the CSS classes the buttons carry.

pub mod booking;
pub mod cart;
pub mod purchase;
pub mod studioadmin;

use crate::dispatch::Dispatcher;
use crate::error::PagewireError;

/// Trigger classes, as rendered on the page elements.
pub mod class {
    pub const TOGGLE_BOOKING: &str = "ajax_events_btn";
    pub const COURSE_BOOKING: &str = "ajax_course_events_btn";
    pub const WAITING_LIST: &str = "ajax_events_waiting_list_btn";
    pub const ADD_TO_BASKET: &str = "ajax_add_to_basket_btn";
    pub const COURSE_ADD_TO_BASKET: &str = "ajax_add_course_to_basket_btn";
    pub const BLOCK_PURCHASE: &str = "ajax_blocks_btn";
    pub const SUBSCRIPTION_PURCHASE: &str = "ajax_subscriptions_btn";
    pub const CHECKOUT: &str = "ajax-checkout-btn";
    pub const REMOVE_BLOCK: &str = "remove-block";
    pub const REMOVE_SUBSCRIPTION: &str = "remove-subscription";
    pub const REMOVE_GIFT_VOUCHER: &str = "remove-gift-voucher";
    pub const REMOVE_PRODUCT_PURCHASE: &str = "remove-product_purchase";
    pub const COURSE_VISIBLE: &str = "visible-btn";
    pub const ALLOW_PARTIAL_BOOKING: &str = "allow-partial-booking-btn";
    pub const ALLOW_DROPIN_BOOKING: &str = "allow-dropin-booking-btn";
    pub const REMOVE_WAITING_LIST_USER: &str = "wl-remove-btn";
}

/// Register the whole catalog on a dispatcher, one descriptor per trigger
/// class, exactly as the pages bind their listeners at load.
pub fn register_page_actions(dispatcher: &mut Dispatcher) -> Result<(), PagewireError> {
    dispatcher.register(class::TOGGLE_BOOKING, booking::toggle_booking()?)?;
    dispatcher.register(class::COURSE_BOOKING, booking::course_booking()?)?;
    dispatcher.register(class::WAITING_LIST, booking::waiting_list_toggle()?)?;
    dispatcher.register(class::ADD_TO_BASKET, booking::add_to_basket()?)?;
    dispatcher.register(class::COURSE_ADD_TO_BASKET, booking::course_add_to_basket()?)?;
    dispatcher.register(class::BLOCK_PURCHASE, purchase::block_purchase()?)?;
    dispatcher.register(
        class::SUBSCRIPTION_PURCHASE,
        purchase::subscription_purchase()?,
    )?;
    dispatcher.register(class::CHECKOUT, cart::checkout()?)?;
    dispatcher.register(class::REMOVE_BLOCK, cart::remove_block()?)?;
    dispatcher.register(class::REMOVE_SUBSCRIPTION, cart::remove_subscription()?)?;
    dispatcher.register(class::REMOVE_GIFT_VOUCHER, cart::remove_gift_voucher()?)?;
    dispatcher.register(
        class::REMOVE_PRODUCT_PURCHASE,
        cart::remove_product_purchase()?,
    )?;
    dispatcher.register(class::COURSE_VISIBLE, studioadmin::toggle_course_visible()?)?;
    dispatcher.register(
        class::ALLOW_PARTIAL_BOOKING,
        studioadmin::toggle_allow_partial_booking()?,
    )?;
    dispatcher.register(
        class::ALLOW_DROPIN_BOOKING,
        studioadmin::toggle_allow_dropin_booking()?,
    )?;
    dispatcher.register(
        class::REMOVE_WAITING_LIST_USER,
        studioadmin::remove_waiting_list_user()?,
    )?;
    Ok(())
}
