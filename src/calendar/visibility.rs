//! Date gating for doors.
//!
//! Before the reveal month every door is hidden; during it, door `n` opens on
//! day `n`; after it everything is visible.

use crate::calendar::clock::Clock;

/// The month doors start revealing, 1-based.
pub const REVEAL_MONTH: u32 = 12;

/// Whether the door for `day` may render given the clock's month and day.
pub fn is_visible(day: u8, clock_month: u32, clock_day: u32) -> bool {
    if clock_month < REVEAL_MONTH {
        return false;
    }
    if clock_month > REVEAL_MONTH {
        return true;
    }
    u32::from(day) <= clock_day
}

/// [`is_visible`] against a [`Clock`].
pub fn is_visible_on(day: u8, clock: &Clock) -> bool {
    is_visible(day, clock.month(), clock.day())
}
