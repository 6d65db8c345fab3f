//! Purchase actions on the events pages: credit blocks and subscriptions.
//!
//! Both swap their own pricing fragment after the purchase lands in the
//! cart; the subscription response also carries the new cart count.

use crate::action::{ActionDescriptor, Outcome};
use crate::error::PagewireError;
use crate::patch::Patch;
use crate::transport::RequestSpec;

/// Buy a credit block. The block config type is a path segment, so the
/// request cannot be built without it.
pub fn block_purchase() -> Result<ActionDescriptor, PagewireError> {
    ActionDescriptor::builder("block-purchase")
        .window_ms(1000)
        .request(|t| {
            let config_id = t.require_id("block_config_id")?;
            let config_type = t.require_text("block_config_type")?;
            Ok(
                RequestSpec::post(format!("/ajax-block-purchase/{config_type}/{config_id}/"))
                    .html_response(),
            )
        })
        .busy(|t| t.id("block_config_id").map(|id| format!("loader_{id}")))
        .pending_key(|t| t.id("block_config_id").map(|id| format!("block_config_{id}")))
        .respond(|t, body| {
            let config_id = t.id("block_config_id").unwrap_or_default();
            let mut patches = Vec::new();
            if let Some(html) = body.html() {
                patches.push(Patch::replace(format!("block_config_{config_id}"), html));
            }
            Outcome::patches(patches)
        })
        .build()
}

/// Buy a subscription. The fragment region is keyed by config, user, and
/// start day, matching how the page renders one cell per combination.
pub fn subscription_purchase() -> Result<ActionDescriptor, PagewireError> {
    ActionDescriptor::builder("subscription-purchase")
        .window_ms(1000)
        .request(|t| {
            let config_id = t.require_id("subscription_config_id")?;
            Ok(
                RequestSpec::post(format!("/ajax-subscription-purchase/{config_id}/"))
                    .field_opt("user_id", t.value_string("user_id"))
                    .field_opt(
                        "subscription_start_date",
                        t.value_string("subscription_start_date"),
                    ),
            )
        })
        .busy(|t| {
            t.id("subscription_config_id")
                .map(|id| format!("loader_{id}"))
        })
        .pending_key(|t| {
            t.id("subscription_config_id")
                .map(|id| format!("subscription_config_{id}"))
        })
        .respond(|t, body| {
            let config_id = t.id("subscription_config_id").unwrap_or_default();
            let mut patches = Vec::new();
            if let Some(html) = body.str_field("html") {
                let user_id = t.id("user_id").unwrap_or_default();
                let start_day = t.value_string("subscription_start_day").unwrap_or_default();
                patches.push(Patch::replace(
                    format!("subscription_config_{config_id}_{user_id}_{start_day}"),
                    html,
                ));
            }
            if let Some(count) = body.i64_field("cart_item_menu_count") {
                patches.push(Patch::set_badge("cart_item_menu_count", count));
            }
            Outcome::patches(patches)
        })
        .build()
}
