//! Catch-the-Elf — click the elf five times before he gets away.
//!
//! Every hit below the threshold moves the elf to a fresh random offset from
//! the centre of the slot. The offsets are bounded so the elf always stays on
//! screen; overlap with other content is not checked.

use rand::Rng;

use crate::games::SessionToken;

/// Hits needed to catch the elf.
pub const CATCH_THRESHOLD: u32 = 5;

/// Width of the horizontal offset range, centred on zero.
const OFFSET_RANGE_X: f64 = 250.0;
/// Height of the vertical offset range, centred on zero.
const OFFSET_RANGE_Y: f64 = 100.0;

/// Elf position relative to the centre of the game slot, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            x: rng.gen_range(0.0..OFFSET_RANGE_X) - OFFSET_RANGE_X / 2.0,
            y: rng.gen_range(0.0..OFFSET_RANGE_Y) - OFFSET_RANGE_Y / 2.0,
        }
    }
}

/// Result of clicking the elf.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElfHit {
    /// Counted, and the elf jumped somewhere else.
    Moved(Offset),
    /// The final hit. The game is over.
    Caught,
    /// The elf was already caught.
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchElf {
    score: u32,
    position: Offset,
}

impl CatchElf {
    /// Start a round with the elf at a random spot.
    pub fn mount<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            score: 0,
            position: Offset::random(rng),
        }
    }

    pub fn hit<R: Rng + ?Sized>(&mut self, rng: &mut R) -> ElfHit {
        if self.is_caught() {
            return ElfHit::Ignored;
        }
        self.score += 1;
        if self.is_caught() {
            tracing::debug!(score = self.score, "elf caught");
            return ElfHit::Caught;
        }
        self.position = Offset::random(rng);
        ElfHit::Moved(self.position)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn position(&self) -> Offset {
        self.position
    }

    pub fn is_caught(&self) -> bool {
        self.score >= CATCH_THRESHOLD
    }

    pub fn render(&self, token: SessionToken) -> String {
        if self.is_caught() {
            return r#"<div class="modal-text text-green-600">You caught the elf! Christmas is saved! 🎁</div>"#
                .to_string();
        }
        format!(
            r##"<div class="elf-target" style="transform: translate({x:.1}px, {y:.1}px)" hx-post="/api/game/elf" hx-vals='{{"session": "{token}"}}' hx-target="#game-slot" hx-swap="innerHTML">🧝</div>"##,
            x = self.position.x,
            y = self.position.y,
            token = token,
        )
    }
}
