//! Route handlers. Each takes the raw query or form body and returns an HTML
//! fragment for HTMX to swap.

pub mod doors;
pub mod game;
pub mod modal;
pub mod util;
