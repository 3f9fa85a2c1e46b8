//! `/api/modal/close` — closing the content modal.

use crate::calendar::modal::{CloseTrigger, with_modal_mut};
use crate::routes::util::{error_html, get_param, parse_form_body};

/// Handle POST /api/modal/close
/// Body: target={button|backdrop|content}
/// Returns the overlay: the empty closed shell, or the unchanged open modal
/// when the click came from inside the content.
pub fn handle_close_post(body: &str) -> String {
    let params = parse_form_body(body);
    let trigger = match get_param(&params, "target") {
        None | Some("") => CloseTrigger::Button,
        Some(t) => match CloseTrigger::parse(t) {
            Some(trigger) => trigger,
            None => return error_html("Unknown close target"),
        },
    };
    with_modal_mut(|modal| {
        modal.request_close(trigger);
        modal.render()
    })
}
