//! Studio-admin panel actions: per-course setting toggles and waiting-list
//! management.
//!
//! The course toggles answer with a raw HTML fragment, the replacement
//! markup for the toggle cell itself.

use crate::action::{ActionDescriptor, Outcome};
use crate::error::PagewireError;
use crate::patch::Patch;
use crate::transport::RequestSpec;

/// One course-setting toggle: POST to the endpoint, swap the returned
/// fragment into the per-course region.
fn course_toggle(
    name: &'static str,
    endpoint: &'static str,
    region_prefix: &'static str,
) -> Result<ActionDescriptor, PagewireError> {
    ActionDescriptor::builder(name)
        .window_ms(500)
        .request(move |t| {
            let course_id = t.require_id("course_id")?;
            Ok(RequestSpec::post(format!("/studioadmin/{endpoint}/{course_id}/")).html_response())
        })
        .pending_key(move |t| t.id("course_id").map(|id| format!("{name}_{id}")))
        .respond(move |t, body| {
            let course_id = t.id("course_id").unwrap_or_default();
            let mut patches = Vec::new();
            if let Some(html) = body.html() {
                patches.push(Patch::replace(format!("{region_prefix}-{course_id}"), html));
            }
            Outcome::patches(patches)
        })
        .build()
}

/// Toggle whether a course is visible to students.
pub fn toggle_course_visible() -> Result<ActionDescriptor, PagewireError> {
    course_toggle(
        "toggle-course-visible",
        "ajax-toggle-course-visible",
        "visible",
    )
}

/// Toggle whether a course accepts bookings for only the remaining classes.
pub fn toggle_allow_partial_booking() -> Result<ActionDescriptor, PagewireError> {
    course_toggle(
        "toggle-allow-partial-booking",
        "ajax-toggle-course-allow-partial-booking",
        "allow-partial-booking",
    )
}

/// Toggle whether a course accepts drop-in bookings.
pub fn toggle_allow_dropin_booking() -> Result<ActionDescriptor, PagewireError> {
    course_toggle(
        "toggle-allow-dropin-booking",
        "ajax-toggle-course-allow-dropin-booking",
        "allow-dropin-booking",
    )
}

/// Take a user off an event's waiting list. The row disappears when the
/// server confirms the removal; the alert_msg toast rides along.
pub fn remove_waiting_list_user() -> Result<ActionDescriptor, PagewireError> {
    ActionDescriptor::builder("remove-waiting-list-user")
        .window_ms(500)
        .request(|t| {
            let wluser_id = t.require_id("wluser_id")?;
            Ok(RequestSpec::post("/studioadmin/waiting-list/remove/")
                .field("wluser_id", wluser_id.to_string())
                .field_opt("event_id", t.value_string("event_id")))
        })
        .pending_key(|t| t.id("wluser_id").map(|id| format!("wluser_{id}")))
        .respond(|t, body| {
            let wluser_id = t.id("wluser_id").unwrap_or_default();
            let mut patches = Vec::new();
            if body.bool_field("removed") == Some(true) {
                patches.push(Patch::hide(format!("row-wluser-{wluser_id}")));
            }
            Outcome::patches(patches)
        })
        .build()
}
