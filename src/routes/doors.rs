//! `/api/doors*` routes — the door grid and opening doors.
//!
//! Every request may carry `debug_date` to simulate another day. The page
//! forwards it from its own `?debug_date=` query parameter.

use crate::calendar::clock::Clock;
use crate::calendar::grid::{self, build_grid, render_door_oob, render_grid};
use crate::calendar::modal::with_modal_mut;
use crate::calendar::store::{get_opened, with_store_mut};
use crate::catalog::with_catalog;
use crate::routes::util::{error_html, get_number, get_param, parse_form_body, parse_query};

fn debug_date(params: &[(String, String)]) -> Option<&str> {
    get_param(params, "debug_date").filter(|s| !s.trim().is_empty())
}

// ── GET /api/doors ─────────────────────────────────────────────────

/// Handle GET /api/doors?debug_date={date}
/// Returns the door grid, or the "coming soon" banner when nothing is visible.
pub fn handle_grid_get(query: &str) -> String {
    let params = parse_query(query);
    let debug = debug_date(&params);
    let clock = Clock::from_debug_param(debug);
    let opened = get_opened();
    let grid = with_catalog(|catalog| build_grid(catalog, &clock, &opened));
    render_grid(&grid, debug)
}

// ── POST /api/doors/open ───────────────────────────────────────────

/// Handle POST /api/doors/open
/// Body: day={n}&debug_date={date}
/// Returns the open modal plus an out-of-band swap marking the door opened.
pub fn handle_open_post(body: &str) -> String {
    let params = parse_form_body(body);
    let Some(day) = get_number::<u8>(&params, "day") else {
        return error_html("Missing or invalid day parameter");
    };
    let debug = debug_date(&params);
    let clock = Clock::from_debug_param(debug);

    let result = with_catalog(|catalog| {
        with_modal_mut(|modal| {
            with_store_mut(|store| {
                grid::open_door(catalog, &clock, day, modal, store, &mut rand::thread_rng())
                    .map(|door| (modal.render(), door))
            })
        })
    });

    match result {
        Ok((modal_html, door)) => {
            let mut html = modal_html;
            html.push_str(&render_door_oob(&door, debug));
            html
        }
        Err(e) => {
            tracing::warn!(day, error = %e, "refused to open door");
            error_html(&e.to_string())
        }
    }
}

// ── GET /api/doors/opened ──────────────────────────────────────────

/// Handle GET /api/doors/opened
/// Returns the opened days as a JSON array.
pub fn handle_opened_get(_query: &str) -> String {
    let days: Vec<u8> = get_opened().into_iter().collect();
    serde_json::to_string(&days).unwrap_or_else(|_| "[]".to_string())
}
