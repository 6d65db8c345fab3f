//! Shopping-cart actions: checkout and cart-item removal.
//!
//! The cart page uses a longer 1000 ms debounce window than the booking
//! lists; checkout in particular must not fire twice.

use crate::action::{ActionDescriptor, Outcome};
use crate::error::PagewireError;
use crate::patch::Patch;
use crate::response::ResponseBody;
use crate::transport::RequestSpec;

/// Patches shared by both removal actions: menu badge, total, and the
/// payment button markup.
fn cart_summary_patches(body: &ResponseBody) -> Vec<Patch> {
    let mut patches = Vec::new();
    if let Some(count) = body.i64_field("cart_item_menu_count") {
        patches.push(Patch::set_badge("cart_item_menu_count", count));
    }
    if let Some(total) = body.str_field("cart_total") {
        patches.push(Patch::set_text("total", total));
    }
    if let Some(html) = body.str_field("payment_button_html") {
        patches.push(Patch::replace("payment-btn", html));
    }
    patches
}

/// Start checkout for the whole cart. The server usually answers with a
/// redirect to the payment flow; a non-redirect response swaps in the
/// provider's payment form.
pub fn checkout() -> Result<ActionDescriptor, PagewireError> {
    ActionDescriptor::builder("checkout")
        .window_ms(1000)
        .request(|t| {
            Ok(RequestSpec::post("/ajax-checkout/")
                .field_opt("cart_total", t.value_string("total")))
        })
        .busy(|_| Some("loader".to_string()))
        .pending_key(|_| Some("checkout".to_string()))
        .respond(|_, body| {
            let mut patches = vec![Patch::hide("checkout-btn")];
            if let Some(html) = body.str_field("paypal_form_html") {
                patches.push(Patch::replace("paypal-checkout-btn", html));
            }
            Outcome::patches(patches)
        })
        .build()
}

/// Remove a block from the cart.
pub fn remove_block() -> Result<ActionDescriptor, PagewireError> {
    ActionDescriptor::builder("remove-cart-block")
        .window_ms(1000)
        .request(|t| {
            let block_id = t.require_id("block_id")?;
            Ok(RequestSpec::post("/ajax-cart-item-delete/")
                .field("item_type", "block")
                .field("item_id", block_id.to_string()))
        })
        .pending_key(|t| t.id("block_id").map(|id| format!("cart_block_{id}")))
        .respond(|t, body| {
            let block_id = t.id("block_id").unwrap_or_default();
            let mut patches = vec![
                Patch::replace(format!("cart-row-block-{block_id}"), ""),
                Patch::replace(format!("cart-row-block-warning-{block_id}"), ""),
            ];
            patches.extend(cart_summary_patches(body));
            Outcome::patches(patches)
        })
        .build()
}

/// Remove a subscription from the cart.
pub fn remove_subscription() -> Result<ActionDescriptor, PagewireError> {
    ActionDescriptor::builder("remove-cart-subscription")
        .window_ms(1000)
        .request(|t| {
            let subscription_id = t.require_id("subscription_id")?;
            Ok(RequestSpec::post("/ajax-cart-item-delete/")
                .field("item_type", "subscription")
                .field("item_id", subscription_id.to_string()))
        })
        .pending_key(|t| {
            t.id("subscription_id")
                .map(|id| format!("cart_subscription_{id}"))
        })
        .respond(|t, body| {
            let subscription_id = t.id("subscription_id").unwrap_or_default();
            let mut patches = vec![Patch::replace(
                format!("cart-row-subscription-{subscription_id}"),
                "",
            )];
            patches.extend(cart_summary_patches(body));
            Outcome::patches(patches)
        })
        .build()
}

/// Remove a gift voucher from the cart.
pub fn remove_gift_voucher() -> Result<ActionDescriptor, PagewireError> {
    ActionDescriptor::builder("remove-cart-gift-voucher")
        .window_ms(1000)
        .request(|t| {
            let gift_voucher_id = t.require_id("gift_voucher_id")?;
            Ok(RequestSpec::post("/ajax-cart-item-delete/")
                .field("item_type", "gift_voucher")
                .field("item_id", gift_voucher_id.to_string()))
        })
        .pending_key(|t| {
            t.id("gift_voucher_id")
                .map(|id| format!("cart_gift_voucher_{id}"))
        })
        .respond(|t, body| {
            let gift_voucher_id = t.id("gift_voucher_id").unwrap_or_default();
            let mut patches = vec![Patch::replace(
                format!("cart-row-gift-voucher-{gift_voucher_id}"),
                "",
            )];
            patches.extend(cart_summary_patches(body));
            Outcome::patches(patches)
        })
        .build()
}

/// Remove a product purchase from the cart. The row id keeps the underscore
/// spelling the markup uses.
pub fn remove_product_purchase() -> Result<ActionDescriptor, PagewireError> {
    ActionDescriptor::builder("remove-cart-product-purchase")
        .window_ms(1000)
        .request(|t| {
            let product_purchase_id = t.require_id("product_purchase_id")?;
            Ok(RequestSpec::post("/ajax-cart-item-delete/")
                .field("item_type", "product_purchase")
                .field("item_id", product_purchase_id.to_string()))
        })
        .pending_key(|t| {
            t.id("product_purchase_id")
                .map(|id| format!("cart_product_purchase_{id}"))
        })
        .respond(|t, body| {
            let product_purchase_id = t.id("product_purchase_id").unwrap_or_default();
            let mut patches = vec![Patch::replace(
                format!("cart-row-product_purchase-{product_purchase_id}"),
                "",
            )];
            patches.extend(cart_summary_patches(body));
            Outcome::patches(patches)
        })
        .build()
}
