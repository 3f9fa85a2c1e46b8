//! Memory-Match — find the six pairs.
//!
//! Twelve cards (two of each symbol) are shuffled once per mount. At most two
//! unmatched cards are face up at a time. A matching pair locks immediately;
//! a mismatch stays visible until the browser's delayed resolve request
//! arrives, and the win message likewise waits a moment so the last pair can
//! be seen.
//!
//! The delays are driven from the page: the rendered grid embeds a
//! `load delay:…` trigger that posts back to `/api/game/memory/resolve` with
//! the session token. A resolve for a session that is no longer mounted is
//! rejected by the modal controller before it reaches this type.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::games::SessionToken;

/// Card faces. Each appears exactly twice in the deck.
pub const SYMBOLS: [&str; 6] = ["🎅", "🎄", "🎁", "⛄", "🦌", "🔔"];

/// Pairs needed to win.
pub const PAIR_COUNT: u32 = SYMBOLS.len() as u32;

/// Pause between the final match and the win message.
pub const WIN_DELAY_MS: u32 = 500;

/// How long a mismatched pair stays face up.
pub const MISMATCH_DELAY_MS: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub symbol: &'static str,
    pub face_up: bool,
    pub matched: bool,
}

/// A resolution waiting on the browser timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    /// Turn these two cards back over.
    HideMismatch(usize, usize),
    /// Replace the grid with the win message.
    Victory,
}

impl Pending {
    pub fn delay_ms(&self) -> u32 {
        match self {
            Pending::HideMismatch(..) => MISMATCH_DELAY_MS,
            Pending::Victory => WIN_DELAY_MS,
        }
    }
}

/// Result of clicking a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Click rejected: out of range, already up, matched, or a pair is pending.
    Ignored,
    /// First card of a pair turned over.
    Flipped,
    /// Second card matched the first.
    Matched { pairs: u32 },
    /// Second card differs; both hide after [`MISMATCH_DELAY_MS`].
    Mismatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryMatch {
    cards: Vec<Card>,
    flipped: Vec<usize>,
    matched_pairs: u32,
    pending: Option<Pending>,
    won: bool,
}

impl MemoryMatch {
    /// Deal a freshly shuffled deck.
    pub fn mount<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut symbols: Vec<&'static str> =
            SYMBOLS.iter().chain(SYMBOLS.iter()).copied().collect();
        symbols.shuffle(rng);
        Self::with_layout(&symbols)
    }

    /// Deal the given faces in order.
    pub fn with_layout(symbols: &[&'static str]) -> Self {
        Self {
            cards: symbols
                .iter()
                .map(|&symbol| Card {
                    symbol,
                    face_up: false,
                    matched: false,
                })
                .collect(),
            flipped: Vec::with_capacity(2),
            matched_pairs: 0,
            pending: None,
            won: false,
        }
    }

    pub fn flip(&mut self, index: usize) -> FlipOutcome {
        if self.won || self.pending.is_some() || self.flipped.len() >= 2 {
            return FlipOutcome::Ignored;
        }
        match self.cards.get(index) {
            Some(card) if !card.face_up && !card.matched => {}
            _ => return FlipOutcome::Ignored,
        }

        self.cards[index].face_up = true;
        self.flipped.push(index);
        if self.flipped.len() < 2 {
            return FlipOutcome::Flipped;
        }

        let (a, b) = (self.flipped[0], self.flipped[1]);
        if self.cards[a].symbol == self.cards[b].symbol {
            self.cards[a].matched = true;
            self.cards[b].matched = true;
            self.flipped.clear();
            self.matched_pairs += 1;
            if self.matched_pairs == PAIR_COUNT {
                self.pending = Some(Pending::Victory);
            }
            FlipOutcome::Matched {
                pairs: self.matched_pairs,
            }
        } else {
            self.pending = Some(Pending::HideMismatch(a, b));
            FlipOutcome::Mismatch
        }
    }

    /// Apply the pending timer resolution, if any.
    pub fn resolve(&mut self) -> Option<Pending> {
        let pending = self.pending.take()?;
        match pending {
            Pending::HideMismatch(a, b) => {
                self.cards[a].face_up = false;
                self.cards[b].face_up = false;
                self.flipped.clear();
            }
            Pending::Victory => {
                tracing::debug!("memory game won");
                self.won = true;
            }
        }
        Some(pending)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn flipped(&self) -> &[usize] {
        &self.flipped
    }

    pub fn matched_pairs(&self) -> u32 {
        self.matched_pairs
    }

    pub fn pending(&self) -> Option<Pending> {
        self.pending
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn render(&self, token: SessionToken) -> String {
        if self.won {
            return r#"<div class="modal-text text-green-600">You matched them all! Merry Christmas! 🎄</div>"#
                .to_string();
        }

        let mut html = String::with_capacity(2048);
        html.push_str(r#"<div class="memory-grid">"#);
        for (i, card) in self.cards.iter().enumerate() {
            let mut class = String::from("memory-card");
            if card.face_up {
                class.push_str(" flipped");
            }
            if card.matched {
                class.push_str(" matched");
            }
            let face = if card.face_up || card.matched { card.symbol } else { "" };
            if card.face_up || card.matched || self.pending.is_some() {
                html.push_str(&format!(
                    r#"<div class="{}" data-index="{}">{}</div>"#,
                    class, i, face
                ));
            } else {
                html.push_str(&format!(
                    r##"<div class="{}" data-index="{}" hx-post="/api/game/memory/flip" hx-vals='{{"session": "{}", "card": "{}"}}' hx-target="#game-slot" hx-swap="innerHTML"></div>"##,
                    class, i, token, i
                ));
            }
        }
        html.push_str("</div>");

        if let Some(pending) = self.pending {
            html.push_str(&format!(
                r##"<div class="hidden" hx-post="/api/game/memory/resolve" hx-trigger="load delay:{}ms" hx-vals='{{"session": "{}"}}' hx-target="#game-slot" hx-swap="innerHTML"></div>"##,
                pending.delay_ms(),
                token
            ));
        }
        html
    }
}
