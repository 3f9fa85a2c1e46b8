//! Door grid — which doors render, and what opening one does.
//!
//! Doors render in catalog order, filtered by the visibility policy. When no
//! door is visible the whole grid is replaced by a "coming soon" banner;
//! the banner and door elements never appear together.

use rand::Rng;
use std::collections::BTreeSet;

use crate::calendar::clock::Clock;
use crate::calendar::modal::ModalController;
use crate::calendar::store::{OpenedDoorStore, Storage};
use crate::calendar::visibility::is_visible_on;
use crate::catalog::{Catalog, DoorRecord};
use crate::error::{AdventError, Result};
use crate::routes::util::escape_html;

/// A door as drawn in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorView {
    pub day: u8,
    pub opened: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grid {
    Doors(Vec<DoorView>),
    ComingSoon,
}

/// Records visible on `clock`, in catalog order.
pub fn visible_doors<'a>(catalog: &'a Catalog, clock: &Clock) -> Vec<&'a DoorRecord> {
    catalog
        .records()
        .iter()
        .filter(|r| is_visible_on(r.day, clock))
        .collect()
}

/// Build the grid model. `opened` is read once by the caller per render.
pub fn build_grid(catalog: &Catalog, clock: &Clock, opened: &BTreeSet<u8>) -> Grid {
    let doors: Vec<DoorView> = visible_doors(catalog, clock)
        .into_iter()
        .map(|r| DoorView {
            day: r.day,
            opened: opened.contains(&r.day),
        })
        .collect();
    if doors.is_empty() {
        Grid::ComingSoon
    } else {
        Grid::Doors(doors)
    }
}

/// Open a door: show it in the modal and remember it as opened. Hidden or
/// unknown doors are refused and leave all state untouched.
pub fn open_door<S, R>(
    catalog: &Catalog,
    clock: &Clock,
    day: u8,
    modal: &mut ModalController,
    store: &mut OpenedDoorStore<S>,
    rng: &mut R,
) -> Result<DoorView>
where
    S: Storage,
    R: Rng + ?Sized,
{
    let record = catalog.get(day).ok_or(AdventError::UnknownDoor(day))?;
    if !is_visible_on(day, clock) {
        return Err(AdventError::DoorLocked(day));
    }
    modal.open(record, rng);
    store.mark_opened(day);
    tracing::info!(day, "door opened");
    Ok(DoorView { day, opened: true })
}

/// Render the grid, or the "coming soon" banner.
pub fn render_grid(grid: &Grid, debug_date: Option<&str>) -> String {
    let doors = match grid {
        Grid::ComingSoon => return render_coming_soon(),
        Grid::Doors(doors) => doors,
    };
    let mut html = String::with_capacity(doors.len() * 256);
    html.push_str(r#"<div class="advent-grid">"#);
    for door in doors {
        html.push_str(&render_door(door, debug_date));
    }
    html.push_str("</div>");
    html
}

/// One door element. Clicking it posts to `/api/doors/open`; the response
/// replaces the modal and swaps this door out-of-band.
pub fn render_door(door: &DoorView, debug_date: Option<&str>) -> String {
    let opened = if door.opened { " opened" } else { "" };
    let debug = debug_date
        .filter(|d| Clock::parse_debug(d).is_ok())
        .map(|d| format!(r#", "debug_date": "{}""#, escape_html(d)))
        .unwrap_or_default();
    format!(
        r##"<div id="door-{day}" class="door-container" hx-post="/api/doors/open" hx-vals='{{"day": "{day}"{debug}}}' hx-target="#modal-overlay" hx-swap="outerHTML"><div class="door{opened}"><span>{day}</span></div></div>"##,
        day = door.day,
        debug = debug,
        opened = opened,
    )
}

/// A door element marked for an out-of-band swap.
pub fn render_door_oob(door: &DoorView, debug_date: Option<&str>) -> String {
    render_door(door, debug_date).replacen(
        r#"class="door-container""#,
        r#"class="door-container" hx-swap-oob="true""#,
        1,
    )
}

fn render_coming_soon() -> String {
    let mut html = String::with_capacity(512);
    html.push_str(r#"<div class="coming-soon">"#);
    html.push_str(r#"<h2>Coming Soon! 🎄</h2>"#);
    html.push_str(r#"<p class="mt-4 text-lg">The Advent Calendar begins on December 1st.</p>"#);
    html.push_str(r#"<p class="mt-2 text-slate-400">Come back tomorrow to open the first door!</p>"#);
    html.push_str("</div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::store::MemoryStorage;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn catalog() -> Catalog {
        Catalog::from_json(
            r#"[
            {"day": 1, "type": "Quote", "text": "one"},
            {"day": 2, "type": "Mini Game", "text": "two", "gameType": "memory"},
            {"day": 3, "type": "Joke", "text": "three"}
        ]"#,
        )
        .unwrap()
    }

    fn clock(s: &str) -> Clock {
        Clock::parse_debug(s).unwrap()
    }

    #[test]
    fn november_is_coming_soon() {
        let grid = build_grid(&catalog(), &clock("2025-11-30"), &BTreeSet::new());
        assert_eq!(grid, Grid::ComingSoon);
        let html = render_grid(&grid, None);
        assert!(html.contains("Coming Soon!"));
        assert_eq!(html.matches("door-container").count(), 0);
    }

    #[test]
    fn december_shows_doors_up_to_today() {
        let opened = BTreeSet::from([1]);
        let grid = build_grid(&catalog(), &clock("2025-12-02"), &opened);
        assert_eq!(
            grid,
            Grid::Doors(vec![
                DoorView { day: 1, opened: true },
                DoorView { day: 2, opened: false },
            ])
        );
        let html = render_grid(&grid, None);
        assert_eq!(html.matches("door-container").count(), 2);
        assert!(html.contains(r#"class="door opened""#));
        assert!(!html.contains("Coming Soon"));
    }

    #[test]
    fn days_beyond_catalog_never_render() {
        let grid = build_grid(&catalog(), &clock("2025-12-31"), &BTreeSet::new());
        let Grid::Doors(doors) = grid else {
            panic!("expected doors");
        };
        assert_eq!(doors.len(), 3);
    }

    #[test]
    fn door_carries_debug_date() {
        let html = render_door(&DoorView { day: 4, opened: false }, Some("2025-12-04"));
        assert!(html.contains(r#""day": "4", "debug_date": "2025-12-04""#));
        assert!(html.contains(r#"id="door-4""#));
    }

    #[test]
    fn door_drops_unparseable_debug_date() {
        let html = render_door(
            &DoorView { day: 6, opened: false },
            Some(r#"x\"}, "day": "1"#),
        );
        assert!(html.contains(r#"hx-vals='{"day": "6"}'"#));
        assert!(!html.contains("debug_date"));
    }

    #[test]
    fn oob_door_is_marked_for_swap() {
        let html = render_door_oob(&DoorView { day: 2, opened: true }, None);
        assert!(html.contains(r#"hx-swap-oob="true""#));
        assert!(html.contains("door opened"));
    }

    #[test]
    fn open_door_opens_modal_and_marks() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut modal = ModalController::new();
        let mut store = OpenedDoorStore::new(MemoryStorage::new());
        let view = open_door(
            &catalog(),
            &clock("2025-12-02"),
            2,
            &mut modal,
            &mut store,
            &mut rng,
        )
        .unwrap();
        assert_eq!(view, DoorView { day: 2, opened: true });
        assert_eq!(modal.current_day(), Some(2));
        assert!(modal.active_game().is_some());
        assert!(store.is_opened(2));
    }

    #[test]
    fn open_door_refuses_locked_and_unknown() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut modal = ModalController::new();
        let mut store = OpenedDoorStore::new(MemoryStorage::new());
        let cat = catalog();
        let today = clock("2025-12-01");

        let err = open_door(&cat, &today, 3, &mut modal, &mut store, &mut rng).unwrap_err();
        assert!(matches!(err, AdventError::DoorLocked(3)));
        let err = open_door(&cat, &today, 20, &mut modal, &mut store, &mut rng).unwrap_err();
        assert!(matches!(err, AdventError::UnknownDoor(20)));

        assert!(!modal.is_open());
        assert!(store.opened().is_empty());
    }
}
