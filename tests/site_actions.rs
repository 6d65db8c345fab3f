//! Full flows for the page catalog: booking lists, shopping cart, and the
//! studio-admin panels, driven through a dispatcher with scripted responses.

mod common;

use std::sync::Arc;

use common::ScriptedTransport;
use pagewire::site::{self, class};
use pagewire::surface::NotifyKind;
use pagewire::{Dispatcher, Handled, MemoryPage, PageState, Surface, Trigger};

fn dispatcher_with(transport: Arc<ScriptedTransport>) -> Dispatcher {
    common::init_tracing();
    let page = PageState::new("https://booking.example.com", "csrf-tok").unwrap();
    let mut dispatcher = Dispatcher::new(page, Box::new(transport));
    site::register_page_actions(&mut dispatcher).unwrap();
    dispatcher
}

#[test]
fn waiting_list_toggle_swaps_the_button() {
    let transport = ScriptedTransport::ok("<span>Leave waiting list</span>");
    let mut dispatcher = dispatcher_with(transport.clone());
    let mut page = MemoryPage::new();

    let handled = dispatcher
        .handle(
            class::WAITING_LIST,
            Trigger::new("wl_btn").with("event_id", 9).with("user_id", 3),
            &mut page,
        )
        .unwrap();

    assert_eq!(handled, Handled::Completed);
    assert_eq!(page.html("waiting_list_button_9"), "<span>Leave waiting list</span>");

    let sent = transport.sent.lock().unwrap();
    assert_eq!(
        sent[0].url,
        "https://booking.example.com/ajax-toggle-waiting-list/9/"
    );
}

#[test]
fn course_booking_gates_a_started_course() {
    let transport = ScriptedTransport::ok(r#"{"html": "<span>Booked</span>"}"#);
    let mut dispatcher = dispatcher_with(transport.clone());
    let mut page = MemoryPage::new();

    let trigger = Trigger::new("course_btn")
        .with("course_id", 7)
        .with("user_id", 3)
        .with("has_started", true)
        .with("already_booked", false)
        .with("allow_partial_booking", false)
        .with("has_available_block", true);

    let handled = dispatcher
        .handle(class::COURSE_BOOKING, trigger, &mut page)
        .unwrap();
    let Handled::AwaitingConfirmation(prompt) = handled else {
        panic!("expected a confirmation gate, got {handled:?}");
    };
    assert!(prompt.contains("This course has already started."));
    assert!(prompt.contains("Please confirm you want to continue."));

    let handled = dispatcher.accept(&mut page).unwrap();
    assert_eq!(handled, Handled::Completed);
    assert_eq!(page.html("book_course_7"), "<span>Booked</span>");
    assert_eq!(transport.sent_count(), 1);
    assert!(!page.is_busy("loader_7"));
}

#[test]
fn course_booking_with_partial_allowed_skips_the_gate() {
    let transport = ScriptedTransport::ok(r#"{"html": "<span>Booked</span>"}"#);
    let mut dispatcher = dispatcher_with(transport.clone());
    let mut page = MemoryPage::new();

    let trigger = Trigger::new("course_btn")
        .with("course_id", 7)
        .with("has_started", true)
        .with("allow_partial_booking", true);

    let handled = dispatcher
        .handle(class::COURSE_BOOKING, trigger, &mut page)
        .unwrap();
    assert_eq!(handled, Handled::Completed);
    assert_eq!(transport.sent_count(), 1);
}

#[test]
fn course_add_to_basket_follows_the_redirect() {
    let transport = ScriptedTransport::ok(r#"{"redirect": true, "url": "/basket/"}"#);
    let mut dispatcher = dispatcher_with(transport.clone());
    let mut page = MemoryPage::new();

    let handled = dispatcher
        .handle(
            class::COURSE_ADD_TO_BASKET,
            Trigger::new("course_basket_btn")
                .with("course_id", 7)
                .with("event_id", 21)
                .with("user_id", 3),
            &mut page,
        )
        .unwrap();

    assert_eq!(handled, Handled::Redirected("/basket/".to_string()));
    assert_eq!(page.location.as_deref(), Some("/basket/"));
    assert!(!page.is_busy("loader_course_21"));

    let sent = transport.sent.lock().unwrap();
    assert_eq!(
        sent[0].url,
        "https://booking.example.com/ajax-add-course-booking-to-basket/"
    );
    assert!(sent[0].form.contains(&("course_id".to_string(), "7".to_string())));
}

#[test]
fn block_purchase_swaps_the_pricing_fragment() {
    let transport = ScriptedTransport::ok("<span>In cart</span>");
    let mut dispatcher = dispatcher_with(transport.clone());
    let mut page = MemoryPage::new();

    let handled = dispatcher
        .handle(
            class::BLOCK_PURCHASE,
            Trigger::new("block_btn")
                .with("block_config_id", 3)
                .with("block_config_type", "dropin"),
            &mut page,
        )
        .unwrap();

    assert_eq!(handled, Handled::Completed);
    assert_eq!(page.html("block_config_3"), "<span>In cart</span>");
    assert!(!page.is_busy("loader_3"));

    let sent = transport.sent.lock().unwrap();
    assert_eq!(
        sent[0].url,
        "https://booking.example.com/ajax-block-purchase/dropin/3/"
    );
}

#[test]
fn subscription_purchase_updates_its_cell_and_the_cart_count() {
    let transport = ScriptedTransport::ok(
        r#"{"html": "<span>In cart</span>", "cart_item_menu_count": 1}"#,
    );
    let mut dispatcher = dispatcher_with(transport.clone());
    let mut page = MemoryPage::new();

    let handled = dispatcher
        .handle(
            class::SUBSCRIPTION_PURCHASE,
            Trigger::new("sub_btn")
                .with("subscription_config_id", 2)
                .with("user_id", 9)
                .with("subscription_start_date", "2024-06-01")
                .with("subscription_start_day", "saturday"),
            &mut page,
        )
        .unwrap();

    assert_eq!(handled, Handled::Completed);
    assert_eq!(page.html("subscription_config_2_9_saturday"), "<span>In cart</span>");
    assert_eq!(page.badge("cart_item_menu_count"), Some(1));

    let sent = transport.sent.lock().unwrap();
    assert_eq!(
        sent[0].url,
        "https://booking.example.com/ajax-subscription-purchase/2/"
    );
}

#[test]
fn checkout_without_redirect_swaps_in_the_payment_form() {
    let transport = ScriptedTransport::ok(
        r#"{"redirect": false, "paypal_form_html": "<form id=\"pp\"></form>"}"#,
    );
    let mut dispatcher = dispatcher_with(transport.clone());
    let mut page = MemoryPage::new();

    let handled = dispatcher
        .handle(
            class::CHECKOUT,
            Trigger::new("checkout-btn").with("total", "45.00"),
            &mut page,
        )
        .unwrap();

    assert_eq!(handled, Handled::Completed);
    assert!(!page.is_visible("checkout-btn"));
    assert_eq!(page.html("paypal-checkout-btn"), "<form id=\"pp\"></form>");
    assert!(!page.is_busy("loader"));

    let sent = transport.sent.lock().unwrap();
    assert!(sent[0]
        .form
        .contains(&("cart_total".to_string(), "45.00".to_string())));
}

#[test]
fn removing_a_block_empties_its_rows_and_updates_the_summary() {
    let transport = ScriptedTransport::ok(
        r#"{"cart_item_menu_count": 1, "cart_total": "20.00",
            "payment_button_html": "<button>Pay</button>"}"#,
    );
    let mut dispatcher = dispatcher_with(transport.clone());
    let mut page = MemoryPage::new();

    // Rows have content before removal.
    page.apply(&pagewire::Patch::replace("cart-row-block-8", "<td>Block</td>"));

    let handled = dispatcher
        .handle(
            class::REMOVE_BLOCK,
            Trigger::new("rm_block").with("block_id", 8),
            &mut page,
        )
        .unwrap();

    assert_eq!(handled, Handled::Completed);
    assert_eq!(page.html("cart-row-block-8"), "");
    assert_eq!(page.html("cart-row-block-warning-8"), "");
    assert_eq!(page.badge("cart_item_menu_count"), Some(1));
    assert_eq!(page.text("total"), "20.00");
    assert_eq!(page.html("payment-btn"), "<button>Pay</button>");

    let sent = transport.sent.lock().unwrap();
    assert!(sent[0].form.contains(&("item_type".to_string(), "block".to_string())));
    assert!(sent[0].form.contains(&("item_id".to_string(), "8".to_string())));
}

#[test]
fn removing_a_subscription_posts_its_item_type() {
    let transport = ScriptedTransport::ok(r#"{"cart_item_menu_count": 0}"#);
    let mut dispatcher = dispatcher_with(transport.clone());
    let mut page = MemoryPage::new();

    dispatcher
        .handle(
            class::REMOVE_SUBSCRIPTION,
            Trigger::new("rm_sub").with("subscription_id", 3),
            &mut page,
        )
        .unwrap();

    assert_eq!(page.html("cart-row-subscription-3"), "");
    assert_eq!(page.badge("cart_item_menu_count"), Some(0));

    let sent = transport.sent.lock().unwrap();
    assert!(sent[0]
        .form
        .contains(&("item_type".to_string(), "subscription".to_string())));
}

#[test]
fn removing_a_gift_voucher_clears_its_row() {
    let transport = ScriptedTransport::ok(r#"{"cart_item_menu_count": 2, "cart_total": "35.00"}"#);
    let mut dispatcher = dispatcher_with(transport.clone());
    let mut page = MemoryPage::new();

    dispatcher
        .handle(
            class::REMOVE_GIFT_VOUCHER,
            Trigger::new("rm_voucher").with("gift_voucher_id", 5),
            &mut page,
        )
        .unwrap();

    assert_eq!(page.html("cart-row-gift-voucher-5"), "");
    assert_eq!(page.text("total"), "35.00");

    let sent = transport.sent.lock().unwrap();
    assert!(sent[0]
        .form
        .contains(&("item_type".to_string(), "gift_voucher".to_string())));
}

#[test]
fn removing_a_product_purchase_clears_its_row() {
    let transport = ScriptedTransport::ok(r#"{"cart_item_menu_count": 0}"#);
    let mut dispatcher = dispatcher_with(transport.clone());
    let mut page = MemoryPage::new();

    dispatcher
        .handle(
            class::REMOVE_PRODUCT_PURCHASE,
            Trigger::new("rm_product").with("product_purchase_id", 11),
            &mut page,
        )
        .unwrap();

    assert_eq!(page.html("cart-row-product_purchase-11"), "");
    assert_eq!(page.badge("cart_item_menu_count"), Some(0));

    let sent = transport.sent.lock().unwrap();
    assert!(sent[0]
        .form
        .contains(&("item_type".to_string(), "product_purchase".to_string())));
}

#[test]
fn admin_toggles_patch_their_per_course_cells() {
    let transport = ScriptedTransport::ok("<span class=\"fa fa-check\"></span>");
    let mut dispatcher = dispatcher_with(transport.clone());
    let mut page = MemoryPage::new();
    let trigger = |source: &str| Trigger::new(source).with("course_id", 15);

    dispatcher
        .handle(class::COURSE_VISIBLE, trigger("vis"), &mut page)
        .unwrap();
    dispatcher
        .handle(class::ALLOW_PARTIAL_BOOKING, trigger("partial"), &mut page)
        .unwrap();
    dispatcher
        .handle(class::ALLOW_DROPIN_BOOKING, trigger("dropin"), &mut page)
        .unwrap();

    assert_eq!(page.html("visible-15"), "<span class=\"fa fa-check\"></span>");
    assert_eq!(
        page.html("allow-partial-booking-15"),
        "<span class=\"fa fa-check\"></span>"
    );
    assert_eq!(
        page.html("allow-dropin-booking-15"),
        "<span class=\"fa fa-check\"></span>"
    );

    let sent = transport.sent.lock().unwrap();
    assert_eq!(sent.len(), 3);
    assert_eq!(
        sent[0].url,
        "https://booking.example.com/studioadmin/ajax-toggle-course-visible/15/"
    );
}

#[test]
fn admin_waiting_list_removal_hides_the_row_and_toasts() {
    let transport =
        ScriptedTransport::ok(r#"{"removed": true, "alert_msg": "User removed from waiting list"}"#);
    let mut dispatcher = dispatcher_with(transport);
    let mut page = MemoryPage::new();

    let handled = dispatcher
        .handle(
            class::REMOVE_WAITING_LIST_USER,
            Trigger::new("wl_rm").with("wluser_id", 6).with("event_id", 2),
            &mut page,
        )
        .unwrap();

    assert_eq!(handled, Handled::Completed);
    assert!(!page.is_visible("row-wluser-6"));
    let note = page.last_notification().unwrap();
    assert_eq!(note.kind, NotifyKind::Success);
    assert_eq!(note.text, "User removed from waiting list");
}
