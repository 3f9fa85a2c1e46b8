//! `/api/game/*` routes — interactions with the mounted mini-game.
//!
//! Every request carries the `session` token it was rendered with. A token
//! that no longer matches the mounted game (modal closed, another door
//! opened) is answered with the current slot contents and mutates nothing.
//! That includes the delayed memory resolve requests.

use crate::calendar::modal::with_modal_mut;
use crate::error::AdventError;
use crate::games::{GameSession, SessionToken};
use crate::routes::util::{error_html, get_number, parse_form_body};

/// Apply `action` to the mounted session addressed by the body's token and
/// return the re-rendered game slot.
fn play<F>(body: &str, action: F) -> String
where
    F: FnOnce(&mut GameSession, &[(String, String)]),
{
    let params = parse_form_body(body);
    let Some(token) = get_number::<u64>(&params, "session").map(SessionToken) else {
        return error_html("Missing session parameter");
    };

    with_modal_mut(|modal| {
        match modal.with_session(token, |session| {
            action(session, &params);
            session.render(token)
        }) {
            Ok(html) => html,
            Err(AdventError::StaleSession | AdventError::NoActiveGame) => {
                modal.render_game_slot()
            }
            Err(e) => error_html(&e.to_string()),
        }
    })
}

// ── POST /api/game/elf ─────────────────────────────────────────────

/// Handle POST /api/game/elf
/// Body: session={token}
pub fn handle_elf_post(body: &str) -> String {
    play(body, |session, _| {
        if let GameSession::CatchElf(elf) = session {
            elf.hit(&mut rand::thread_rng());
        }
    })
}

// ── POST /api/game/trivia ──────────────────────────────────────────

/// Handle POST /api/game/trivia
/// Body: session={token}&option={index}
pub fn handle_trivia_post(body: &str) -> String {
    play(body, |session, params| {
        if let (GameSession::Trivia(trivia), Some(index)) =
            (session, get_number::<usize>(params, "option"))
        {
            trivia.choose(index);
        }
    })
}

// ── POST /api/game/tree ────────────────────────────────────────────

/// Handle POST /api/game/tree
/// Body: session={token}&client_x=&client_y=&rect_left=&rect_top=
pub fn handle_tree_post(body: &str) -> String {
    play(body, |session, params| {
        let GameSession::DecorateTree(tree) = session else {
            return;
        };
        let coords = (
            get_number::<f64>(params, "client_x"),
            get_number::<f64>(params, "client_y"),
            get_number::<f64>(params, "rect_left"),
            get_number::<f64>(params, "rect_top"),
        );
        if let (Some(cx), Some(cy), Some(left), Some(top)) = coords {
            tree.place(cx, cy, left, top, &mut rand::thread_rng());
        }
    })
}

// ── POST /api/game/memory/flip ─────────────────────────────────────

/// Handle POST /api/game/memory/flip
/// Body: session={token}&card={index}
pub fn handle_memory_flip_post(body: &str) -> String {
    play(body, |session, params| {
        if let (GameSession::Memory(memory), Some(card)) =
            (session, get_number::<usize>(params, "card"))
        {
            memory.flip(card);
        }
    })
}

// ── POST /api/game/memory/resolve ──────────────────────────────────

/// Handle POST /api/game/memory/resolve
/// Body: session={token}
/// Fired by the delayed trigger embedded in the memory grid.
pub fn handle_memory_resolve_post(body: &str) -> String {
    play(body, |session, _| {
        if let GameSession::Memory(memory) = session {
            memory.resolve();
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::modal::{reset_modal, with_modal, with_modal_mut};
    use crate::calendar::store::reset_store;
    use crate::catalog::{Catalog, install_catalog, reset_catalog};
    use crate::games::catch_elf::CATCH_THRESHOLD;
    use crate::routes::doors::handle_open_post;

    fn reset_state() {
        reset_catalog();
        reset_modal();
        reset_store();
    }

    /// Open the door for `day` on Christmas Eve and return the game token.
    fn open(day: u8) -> SessionToken {
        handle_open_post(&format!("day={day}&debug_date=2025-12-24"));
        with_modal(|m| m.active_token()).unwrap()
    }

    fn memory_layout() -> Vec<&'static str> {
        with_modal(|m| match &m.active_game().unwrap().session {
            GameSession::Memory(g) => g.cards().iter().map(|c| c.symbol).collect(),
            other => panic!("expected memory, got {}", other.type_name()),
        })
    }

    /// Indices of one matching pair and one mismatching pair.
    fn pairs(layout: &[&str]) -> ((usize, usize), (usize, usize)) {
        let partner = (1..layout.len()).find(|&i| layout[i] == layout[0]).unwrap();
        let other = (1..layout.len()).find(|&i| layout[i] != layout[0]).unwrap();
        ((0, partner), (0, other))
    }

    #[test]
    fn missing_session_is_an_error() {
        reset_state();
        assert!(handle_elf_post("").contains("Missing session"));
        reset_state();
    }

    #[test]
    fn elf_caught_after_five_hits() {
        reset_state();
        let token = open(3);
        let body = format!("session={token}");
        for _ in 1..CATCH_THRESHOLD {
            let html = handle_elf_post(&body);
            assert!(html.contains("elf-target"));
        }
        let html = handle_elf_post(&body);
        assert!(html.contains("You caught the elf!"));
        let html = handle_elf_post(&body);
        assert!(html.contains("You caught the elf!"));
        reset_state();
    }

    #[test]
    fn trivia_answers_once() {
        reset_state();
        let json = r#"[{"day": 1, "type": "Mini Game", "text": "quiz", "gameType": "trivia",
            "question": "Pick B", "options": ["A", "B", "C"], "answer": "B"}]"#;
        install_catalog(Catalog::from_json(json).unwrap());
        let token = open(1);

        let html = handle_trivia_post(&format!("session={token}&option=0"));
        assert!(html.contains("trivia-btn wrong"));
        assert!(html.contains("trivia-btn correct"));
        assert!(html.contains("Oops! The answer was B"));

        let again = handle_trivia_post(&format!("session={token}&option=2"));
        assert_eq!(again, html);
        reset_state();
    }

    #[test]
    fn tree_places_relative_ornament() {
        reset_state();
        let token = open(7);
        let html = handle_tree_post(&format!(
            "session={token}&client_x=130&client_y=245.5&rect_left=100&rect_top=200"
        ));
        assert!(html.contains("left: 30.0px; top: 45.5px"));

        let html = handle_tree_post(&format!("session={token}&client_x=1"));
        assert_eq!(html.matches(r#"class="ornament""#).count(), 1);
        reset_state();
    }

    #[test]
    fn memory_match_flow() {
        reset_state();
        let token = open(9);
        let ((a, b), _) = pairs(&memory_layout());

        handle_memory_flip_post(&format!("session={token}&card={a}"));
        handle_memory_flip_post(&format!("session={token}&card={b}"));
        with_modal(|m| match &m.active_game().unwrap().session {
            GameSession::Memory(g) => {
                assert_eq!(g.matched_pairs(), 1);
                assert!(g.flipped().is_empty());
            }
            _ => unreachable!(),
        });
        reset_state();
    }

    #[test]
    fn memory_mismatch_flow() {
        reset_state();
        let token = open(9);
        let (_, (c, d)) = pairs(&memory_layout());

        handle_memory_flip_post(&format!("session={token}&card={c}"));
        let html = handle_memory_flip_post(&format!("session={token}&card={d}"));
        assert!(html.contains("load delay:1000ms"));

        let third = (0..12).find(|&i| i != c && i != d).unwrap();
        handle_memory_flip_post(&format!("session={token}&card={third}"));
        with_modal(|m| match &m.active_game().unwrap().session {
            GameSession::Memory(g) => assert_eq!(g.flipped(), &[c, d]),
            _ => unreachable!(),
        });

        handle_memory_resolve_post(&format!("session={token}"));
        with_modal(|m| match &m.active_game().unwrap().session {
            GameSession::Memory(g) => {
                assert!(g.flipped().is_empty());
                assert!(g.cards().iter().all(|c| !c.face_up));
            }
            _ => unreachable!(),
        });
        reset_state();
    }

    #[test]
    fn stale_resolve_does_not_touch_new_session() {
        reset_state();
        let old = open(9);
        let layout = memory_layout();
        let (_, (c, d)) = pairs(&layout);
        handle_memory_flip_post(&format!("session={old}&card={c}"));
        handle_memory_flip_post(&format!("session={old}&card={d}"));

        // Close mid-delay, then open a fresh game with its own pending pair.
        with_modal_mut(|m| m.close());
        assert_eq!(handle_memory_resolve_post(&format!("session={old}")), "");

        let new = open(9);
        assert_ne!(old, new);
        let layout = memory_layout();
        let (_, (c, d)) = pairs(&layout);
        handle_memory_flip_post(&format!("session={new}&card={c}"));
        handle_memory_flip_post(&format!("session={new}&card={d}"));

        handle_memory_resolve_post(&format!("session={old}"));
        with_modal(|m| match &m.active_game().unwrap().session {
            GameSession::Memory(g) => assert_eq!(g.flipped(), &[c, d]),
            _ => unreachable!(),
        });
        reset_state();
    }

    #[test]
    fn interaction_for_other_game_type_is_ignored() {
        reset_state();
        let token = open(3);
        let before = with_modal(|m| m.active_game().cloned());
        handle_memory_flip_post(&format!("session={token}&card=0"));
        assert_eq!(with_modal(|m| m.active_game().cloned()), before);
        reset_state();
    }
}
