//! Booking page actions: event toggles, course bookings, waiting-list
//! toggles, and add-to-basket.

use crate::action::{ActionDescriptor, Outcome};
use crate::error::PagewireError;
use crate::gate::ConfirmRule;
use crate::patch::Patch;
use crate::response::ResponseBody;
use crate::transport::RequestSpec;
use crate::trigger::Trigger;

const CONFIRM_SUFFIX: &str = "Please confirm you want to continue.";

/// Shared list-row styling patched when a booking flips between booked and
/// cancelled.
fn cancelled_row_patches(event_id: i64, just_cancelled: bool) -> Vec<Patch> {
    let tick = format!("booked_tick_{event_id}");
    let text = format!("cancelled-text-{event_id}");
    let row = format!("list-item-{event_id}");
    if just_cancelled {
        vec![
            Patch::hide(tick),
            Patch::set_text(text, "You have cancelled this booking"),
            Patch::add_class(row.clone(), "list-group-item-secondary"),
            Patch::add_class(row, "text-secondary"),
        ]
    } else {
        vec![
            Patch::show(tick),
            Patch::set_text(text, ""),
            Patch::remove_class(row.clone(), "list-group-item-secondary"),
            Patch::remove_class(row, "text-secondary"),
        ]
    }
}

/// Availability fragments shared by the toggle and add-to-basket responses.
fn availability_patches(event_id: i64, body: &ResponseBody) -> Vec<Patch> {
    let mut patches = Vec::new();
    if let Some(html) = body.str_field("event_availability_html") {
        patches.push(Patch::replace(format!("availability_{event_id}"), html));
        patches.push(Patch::replace(format!("availability_xs_{event_id}"), html));
    }
    if let Some(html) = body.str_field("event_info_xs_html") {
        patches.push(Patch::replace(format!("event_info_xs_{event_id}"), html));
    }
    patches
}

/// Book or cancel a single event. Warns before cancelling outside the
/// allowed window, or when cancellation brings no credit at all.
pub fn toggle_booking() -> Result<ActionDescriptor, PagewireError> {
    ActionDescriptor::builder("toggle-booking")
        .window_ms(500)
        .confirm(ConfirmRule::new(
            |t| t.flag("show_warning"),
            |t| {
                let warning = if !t.flag("cancellation_allowed") {
                    "Cancellation is not allowed; if you choose to cancel you will not \
                     receive any credit back to your block/subscription or any refund."
                } else {
                    "The allowed cancellation period has passed; if you choose to cancel \
                     you will not receive any credit back to your block/subscription or \
                     any refund."
                };
                format!("{warning}\n{CONFIRM_SUFFIX}")
            },
        ))
        .request(|t| {
            let event_id = t.require_id("event_id")?;
            Ok(RequestSpec::post(format!("/ajax-toggle-booking/{event_id}/"))
                .field_opt("user_id", t.value_string("user_id"))
                .field_opt("ref", t.value_string("ref"))
                .field_opt("page", t.value_string("page")))
        })
        .busy(|t| t.id("event_id").map(|id| format!("loader_{id}")))
        .pending_key(|t| t.id("event_id").map(|id| format!("event_{id}")))
        .respond(|t, body| {
            let event_id = t.id("event_id").unwrap_or_default();
            let mut patches = Vec::new();
            if let Some(html) = body.str_field("html") {
                patches.push(Patch::replace(format!("book_{event_id}"), html));
            }
            if let Some(html) = body.str_field("block_info_html") {
                patches.push(Patch::replace(format!("block_info_{event_id}"), html));
            }
            patches.extend(availability_patches(event_id, body));
            if let Some(just_cancelled) = body.bool_field("just_cancelled") {
                patches.extend(cancelled_row_patches(event_id, just_cancelled));
            }
            Outcome::patches(patches)
        })
        .build()
}

fn course_needs_confirmation(t: &Trigger) -> bool {
    if !t.flag("has_started") || t.flag("already_booked") {
        return false;
    }
    !t.flag("allow_partial_booking") || t.flag("part_booking_with_full_block")
}

fn course_prompt(t: &Trigger) -> String {
    let warning = if t.flag("part_booking_with_full_block") {
        "This course has already started. Your only available block is valid for a full \
         course. Alternative blocks may be purchasable for booking only the remaining \
         classes.  If you choose to book with this block, you will not receive any refund \
         for past classes."
    } else if t.flag("has_available_block") {
        "This course has already started. If you choose to book, you will not receive any \
         refund for past classes."
    } else {
        "This course has already started. If you choose to purchase a block and book this \
         course, you will not receive any refund for past classes."
    };
    format!("{warning}\n{CONFIRM_SUFFIX}")
}

/// Book a whole course. Confirmation applies once the course has started
/// and the booking would forfeit past classes.
pub fn course_booking() -> Result<ActionDescriptor, PagewireError> {
    ActionDescriptor::builder("course-booking")
        .window_ms(500)
        .confirm(ConfirmRule::new(course_needs_confirmation, course_prompt))
        .request(|t| {
            let course_id = t.require_id("course_id")?;
            Ok(RequestSpec::post(format!("/ajax-course-booking/{course_id}/"))
                .field_opt("user_id", t.value_string("user_id"))
                .field_opt("ref", t.value_string("ref"))
                .field_opt("page", t.value_string("page")))
        })
        .busy(|t| t.id("course_id").map(|id| format!("loader_{id}")))
        .pending_key(|t| t.id("course_id").map(|id| format!("course_{id}")))
        .respond(|t, body| {
            let course_id = t.id("course_id").unwrap_or_default();
            let mut patches = Vec::new();
            if let Some(html) = body.str_field("html") {
                patches.push(Patch::replace(format!("book_course_{course_id}"), html));
            }
            Outcome::patches(patches)
        })
        .build()
}

/// Join or leave an event's waiting list. The server answers with the new
/// button markup as a raw HTML fragment.
pub fn waiting_list_toggle() -> Result<ActionDescriptor, PagewireError> {
    ActionDescriptor::builder("waiting-list-toggle")
        .window_ms(500)
        .request(|t| {
            let event_id = t.require_id("event_id")?;
            Ok(
                RequestSpec::post(format!("/ajax-toggle-waiting-list/{event_id}/"))
                    .field_opt("user_id", t.value_string("user_id"))
                    .html_response(),
            )
        })
        .respond(|t, body| {
            let event_id = t.id("event_id").unwrap_or_default();
            let mut patches = Vec::new();
            if let Some(html) = body.html() {
                patches.push(Patch::replace(format!("waiting_list_button_{event_id}"), html));
            }
            Outcome::patches(patches)
        })
        .build()
}

/// Put an event booking in the shopping basket. The confirmation leads with
/// the event name; a successful response updates availability, the basket
/// badge, and raises the server's alert.
pub fn add_to_basket() -> Result<ActionDescriptor, PagewireError> {
    ActionDescriptor::builder("add-to-basket")
        .window_ms(500)
        .confirm(ConfirmRule::new(
            |t| t.flag("show_warning"),
            |t| {
                let warning = if !t.flag("cancellation_allowed") {
                    "Cancellation is not allowed; if you purchase this booking and cancel \
                     you will not be eligible for any credit or refund."
                } else {
                    "The allowed cancellation period has passed; if you purchase this \
                     booking and cancel you will not be eligible for any credit or refund."
                };
                match t.text("event_str") {
                    Some(event) => format!("{event}\n{warning}\n{CONFIRM_SUFFIX}"),
                    None => format!("{warning}\n{CONFIRM_SUFFIX}"),
                }
            },
        ))
        .request(|t| {
            let event_id = t.require_id("event_id")?;
            Ok(RequestSpec::post("/ajax-add-booking-to-basket/")
                .field("event_id", event_id.to_string())
                .field_opt("user_id", t.value_string("user_id"))
                .field_opt("ref", t.value_string("ref")))
        })
        .busy(|t| t.id("event_id").map(|id| format!("loader_{id}")))
        .pending_key(|t| t.id("event_id").map(|id| format!("event_{id}")))
        .respond(|t, body| {
            let event_id = t.id("event_id").unwrap_or_default();
            let mut patches = Vec::new();
            if let Some(html) = body.str_field("buttons_html") {
                patches.push(Patch::replace(format!("buttons_{event_id}"), html));
            }
            patches.extend(availability_patches(event_id, body));
            patches.push(Patch::show(format!("booked_tick_{event_id}")));
            patches.push(Patch::replace(
                format!("booked_tick_{event_id}"),
                r#"<i class="text-secondary fas fa-shopping-basket"></i>"#,
            ));
            if let Some(count) = body.i64_field("cart_item_menu_count") {
                patches.push(Patch::set_badge("cart_item_menu_count", count));
            }
            patches.push(Patch::set_text(format!("cancelled-text-{event_id}"), ""));
            patches.push(Patch::remove_class(
                format!("list-item-{event_id}"),
                "list-group-item-secondary",
            ));
            patches.push(Patch::remove_class(
                format!("list-item-{event_id}"),
                "text-secondary",
            ));
            Outcome::patches(patches)
        })
        .build()
}

/// Put a whole course booking in the basket. The server answers with a
/// redirect into the basket flow; there is nothing to patch on this page.
pub fn course_add_to_basket() -> Result<ActionDescriptor, PagewireError> {
    ActionDescriptor::builder("course-add-to-basket")
        .window_ms(500)
        .request(|t| {
            let course_id = t.require_id("course_id")?;
            Ok(RequestSpec::post("/ajax-add-course-booking-to-basket/")
                .field("course_id", course_id.to_string())
                .field_opt("user_id", t.value_string("user_id"))
                .field_opt("ref", t.value_string("ref")))
        })
        // The markup keys the course spinner by the event that rendered it.
        .busy(|t| t.id("event_id").map(|id| format!("loader_course_{id}")))
        .pending_key(|t| t.id("course_id").map(|id| format!("course_{id}")))
        .build()
}
