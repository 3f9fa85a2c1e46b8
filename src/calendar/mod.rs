//! Calendar core — the clock, date gating, opened-door persistence, the door
//! grid and the content modal.
//!
//! Mutable state (opened-door store, modal) lives in `thread_local!` cells:
//! WASM in the browser runs on a single thread, and the module stays loaded
//! for the life of the page.

pub mod clock;
pub mod grid;
pub mod modal;
pub mod store;
pub mod visibility;
