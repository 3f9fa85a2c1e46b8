//! The single content modal.
//!
//! One controller owns the overlay state and the mounted game. Opening while
//! already open replaces the content in place; there is never more than one
//! modal. Every mount gets a new [`SessionToken`], and game interactions must
//! present the current one to reach the session.

use rand::Rng;
use std::cell::RefCell;

use crate::catalog::DoorRecord;
use crate::error::{AdventError, Result};
use crate::games::{GameSession, SessionToken};
use crate::routes::util::escape_html;

/// Where a close request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseTrigger {
    /// The explicit Close button.
    Button,
    /// A click that landed on the overlay backdrop itself.
    Backdrop,
    /// A click inside the content area that bubbled up to the overlay.
    Content,
}

impl CloseTrigger {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "button" => Some(CloseTrigger::Button),
            "backdrop" => Some(CloseTrigger::Backdrop),
            "content" => Some(CloseTrigger::Content),
            _ => None,
        }
    }

    fn closes(self) -> bool {
        !matches!(self, CloseTrigger::Content)
    }
}

/// A mounted game and the token that addresses it.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveGame {
    pub token: SessionToken,
    pub session: GameSession,
}

/// What the open modal is showing.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenModal {
    pub record: DoorRecord,
    pub game: Option<ActiveGame>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ModalState {
    #[default]
    Closed,
    Open(OpenModal),
}

#[derive(Debug, Default)]
pub struct ModalController {
    state: ModalState,
    last_token: u64,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a door's content, mounting its game if it has one. Any game
    /// already mounted is dropped first.
    pub fn open<R: Rng + ?Sized>(&mut self, record: &DoorRecord, rng: &mut R) {
        self.state = ModalState::Closed;
        let game = record.game.as_ref().map(|spec| {
            self.last_token += 1;
            ActiveGame {
                token: SessionToken(self.last_token),
                session: GameSession::mount(spec, rng),
            }
        });
        tracing::debug!(
            day = record.day,
            game = game.as_ref().map(|g| g.session.type_name()),
            "modal opened"
        );
        self.state = ModalState::Open(OpenModal {
            record: record.clone(),
            game,
        });
    }

    /// Close and drop any mounted game.
    pub fn close(&mut self) {
        if self.is_open() {
            tracing::debug!("modal closed");
        }
        self.state = ModalState::Closed;
    }

    /// Close in response to a click. Clicks bubbling from the content area
    /// are ignored. Returns whether the modal closed.
    pub fn request_close(&mut self, trigger: CloseTrigger) -> bool {
        if !trigger.closes() || !self.is_open() {
            return false;
        }
        self.close();
        true
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open(_))
    }

    pub fn current_day(&self) -> Option<u8> {
        match &self.state {
            ModalState::Open(open) => Some(open.record.day),
            ModalState::Closed => None,
        }
    }

    pub fn active_game(&self) -> Option<&ActiveGame> {
        match &self.state {
            ModalState::Open(open) => open.game.as_ref(),
            ModalState::Closed => None,
        }
    }

    pub fn active_token(&self) -> Option<SessionToken> {
        self.active_game().map(|g| g.token)
    }

    /// Run `f` against the mounted session if `token` still addresses it.
    pub fn with_session<F, T>(&mut self, token: SessionToken, f: F) -> Result<T>
    where
        F: FnOnce(&mut GameSession) -> T,
    {
        let ModalState::Open(OpenModal {
            game: Some(active), ..
        }) = &mut self.state
        else {
            return Err(AdventError::NoActiveGame);
        };
        if active.token != token {
            tracing::debug!(%token, current = %active.token, "stale game session");
            return Err(AdventError::StaleSession);
        }
        Ok(f(&mut active.session))
    }

    /// Render the game slot contents, empty when no game is mounted.
    pub fn render_game_slot(&self) -> String {
        self.active_game()
            .map(|g| g.session.render(g.token))
            .unwrap_or_default()
    }

    /// Render the whole overlay. Closed renders an inactive, empty shell so
    /// the element keeps its id for later swaps.
    pub fn render(&self) -> String {
        let ModalState::Open(open) = &self.state else {
            return r#"<div id="modal-overlay" class="modal-overlay"></div>"#.to_string();
        };
        let record = &open.record;

        let mut html = String::with_capacity(2048);
        html.push_str(
            r##"<div id="modal-overlay" class="modal-overlay active" hx-post="/api/modal/close" hx-trigger="click[target===this]" hx-vals='{"target": "backdrop"}' hx-target="#modal-overlay" hx-swap="outerHTML">"##,
        );
        html.push_str(r#"<div class="modal-content">"#);
        html.push_str(&format!(
            r#"<div class="modal-type">{}</div>"#,
            escape_html(&record.kind)
        ));
        html.push_str(&format!(
            r#"<div class="modal-text">{}</div>"#,
            escape_html(&record.text)
        ));
        html.push_str(&format!(
            r#"<div id="game-slot" class="game-container">{}</div>"#,
            self.render_game_slot()
        ));
        html.push_str(&format!(
            r#"<div class="modal-source">{}</div>"#,
            escape_html(record.source.as_deref().unwrap_or(""))
        ));
        html.push_str(
            r##"<button class="modal-close" hx-post="/api/modal/close" hx-vals='{"target": "button"}' hx-target="#modal-overlay" hx-swap="outerHTML">Close</button>"##,
        );
        html.push_str("</div></div>");
        html
    }
}

thread_local! {
    static MODAL: RefCell<ModalController> = RefCell::new(ModalController::new());
}

/// Execute a closure with read access to the modal.
pub fn with_modal<F, R>(f: F) -> R
where
    F: FnOnce(&ModalController) -> R,
{
    MODAL.with(|m| f(&m.borrow()))
}

/// Execute a closure with mutable access to the modal.
pub fn with_modal_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut ModalController) -> R,
{
    MODAL.with(|m| f(&mut m.borrow_mut()))
}

/// Close the modal and forget token history (tests).
pub fn reset_modal() {
    with_modal_mut(|m| *m = ModalController::new());
}
