//! Decorate-the-tree. No goal, no end: every click hangs another ornament.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::games::SessionToken;

/// Ornament colours, picked uniformly.
pub const PALETTE: [&str; 5] = ["#ef4444", "#fbbf24", "#3b82f6", "#a855f7", "#fff"];

/// An ornament, positioned relative to the tree surface's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ornament {
    pub x: f64,
    pub y: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecorateTree {
    ornaments: Vec<Ornament>,
}

impl DecorateTree {
    pub fn mount() -> Self {
        Self::default()
    }

    /// Hang an ornament where the pointer landed. `client_*` are page
    /// coordinates of the click and `rect_*` the tree's bounding-box origin
    /// in the same space.
    pub fn place<R: Rng + ?Sized>(
        &mut self,
        client_x: f64,
        client_y: f64,
        rect_left: f64,
        rect_top: f64,
        rng: &mut R,
    ) -> Ornament {
        let color = PALETTE.choose(rng).copied().unwrap_or(PALETTE[0]);
        let ornament = Ornament {
            x: client_x - rect_left,
            y: client_y - rect_top,
            color,
        };
        self.ornaments.push(ornament);
        ornament
    }

    pub fn ornaments(&self) -> &[Ornament] {
        &self.ornaments
    }

    pub fn render(&self, token: SessionToken) -> String {
        let mut html = String::with_capacity(256 + self.ornaments.len() * 96);
        html.push_str(&format!(
            r##"<div class="tree-container" hx-post="/api/game/tree" hx-trigger="click" hx-vals='js:{{session: "{}", client_x: event.clientX, client_y: event.clientY, rect_left: event.currentTarget.getBoundingClientRect().left, rect_top: event.currentTarget.getBoundingClientRect().top}}' hx-target="#game-slot" hx-swap="innerHTML">"##,
            token
        ));
        for o in &self.ornaments {
            html.push_str(&format!(
                r#"<div class="ornament" style="left: {:.1}px; top: {:.1}px; background-color: {}"></div>"#,
                o.x, o.y, o.color
            ));
        }
        html.push_str("</div>");
        html
    }
}
