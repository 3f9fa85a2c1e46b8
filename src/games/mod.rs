//! Mini-game engines.
//!
//! Each engine is a plain value holding its own progress. The modal
//! controller owns at most one [`GameSession`] at a time, builds it fresh on
//! every mount and drops it on close, so nothing carries over between plays.

pub mod catch_elf;
pub mod decorate;
pub mod memory;
pub mod trivia;

use rand::Rng;
use std::fmt;

use crate::catalog::GameSpec;

use catch_elf::CatchElf;
use decorate::DecorateTree;
use memory::MemoryMatch;
use trivia::Trivia;

/// Identifies one mounted game. Interactions and timer callbacks carry it
/// back so a closed or replaced session is never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionToken(pub u64);

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Live state of whichever game is mounted.
#[derive(Debug, Clone, PartialEq)]
pub enum GameSession {
    CatchElf(CatchElf),
    Trivia(Trivia),
    DecorateTree(DecorateTree),
    Memory(MemoryMatch),
}

impl GameSession {
    /// Build a fresh session for the given game.
    pub fn mount<R: Rng + ?Sized>(spec: &GameSpec, rng: &mut R) -> Self {
        match spec {
            GameSpec::CatchElf => GameSession::CatchElf(CatchElf::mount(rng)),
            GameSpec::Trivia {
                question,
                options,
                answer,
            } => GameSession::Trivia(Trivia::mount(question, options, answer)),
            GameSpec::DecorateTree => GameSession::DecorateTree(DecorateTree::mount()),
            GameSpec::Memory => GameSession::Memory(MemoryMatch::mount(rng)),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            GameSession::CatchElf(_) => "catch-elf",
            GameSession::Trivia(_) => "trivia",
            GameSession::DecorateTree(_) => "decorate-tree",
            GameSession::Memory(_) => "memory",
        }
    }

    /// Contents of the modal's game slot.
    pub fn render(&self, token: SessionToken) -> String {
        match self {
            GameSession::CatchElf(g) => g.render(token),
            GameSession::Trivia(g) => g.render(token),
            GameSession::DecorateTree(g) => g.render(token),
            GameSession::Memory(g) => g.render(token),
        }
    }
}
