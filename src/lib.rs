//! Advent calendar in-browser WASM server.
//!
//! Exports `handle_request(method, path, query, body)` for the page's HTMX
//! bridge to call. Uses `matchit` for URL routing — the same router
//! engine that powers Axum.
//!
//! Doors unlock by date, opened doors are remembered in localStorage, and
//! some doors host a small mini-game inside the modal.

use wasm_bindgen::prelude::*;

pub mod calendar;
pub mod catalog;
pub mod error;
pub mod games;
pub mod routes;

/// Process an HTTP-like request and return an HTML fragment.
///
/// Called from JavaScript via wasm-bindgen.
///
/// # Arguments
/// * `method` — HTTP method (e.g., "GET", "POST")
/// * `path`   — URL path (e.g., "/api/doors")
/// * `query`  — Query string (e.g., "?debug_date=2025-12-05")
/// * `body`   — Request body (e.g., POST form data). Empty string for GET requests.
///
/// # Returns
/// An HTML string fragment suitable for HTMX to swap into the DOM.
#[wasm_bindgen]
pub fn handle_request(method: &str, path: &str, query: &str, body: &str) -> String {
    // Build the router. matchit compiles route patterns into a radix tree.
    let mut router = matchit::Router::new();

    router.insert("/api/doors", "doors").ok();
    router.insert("/api/doors/open", "doors_open").ok();
    router.insert("/api/doors/opened", "doors_opened").ok();
    router.insert("/api/modal/close", "modal_close").ok();
    router.insert("/api/game/elf", "game_elf").ok();
    router.insert("/api/game/trivia", "game_trivia").ok();
    router.insert("/api/game/tree", "game_tree").ok();
    router.insert("/api/game/memory/flip", "memory_flip").ok();
    router.insert("/api/game/memory/resolve", "memory_resolve").ok();

    match router.at(path) {
        Ok(matched) => match (*matched.value, method) {
            ("doors", "GET") => routes::doors::handle_grid_get(query),
            ("doors_opened", "GET") => routes::doors::handle_opened_get(query),
            ("doors_open", "POST") => routes::doors::handle_open_post(body),
            ("modal_close", "POST") => routes::modal::handle_close_post(body),
            ("game_elf", "POST") => routes::game::handle_elf_post(body),
            ("game_trivia", "POST") => routes::game::handle_trivia_post(body),
            ("game_tree", "POST") => routes::game::handle_tree_post(body),
            ("memory_flip", "POST") => routes::game::handle_memory_flip_post(body),
            ("memory_resolve", "POST") => routes::game::handle_memory_resolve_post(body),
            _ => method_not_allowed(),
        },
        Err(_) => not_found(),
    }
}

/// Replace the door catalog with one supplied by the page.
///
/// Returns "ok", or "error: …" when the JSON fails validation (the current
/// catalog is kept in that case).
#[wasm_bindgen]
pub fn load_catalog(json: &str) -> String {
    match catalog::Catalog::from_json(json) {
        Ok(c) => {
            catalog::install_catalog(c);
            "ok".to_string()
        }
        Err(e) => {
            tracing::warn!(error = %e, "rejected catalog");
            format!("error: {}", e)
        }
    }
}

fn not_found() -> String {
    r#"<span class="text-red-600">404 — route not found</span>"#.to_string()
}

fn method_not_allowed() -> String {
    r#"<span class="text-red-600">405 — method not allowed</span>"#.to_string()
}
