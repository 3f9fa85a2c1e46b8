//! Error types for the advent calendar.
//!
//! Nothing here is ever shown to the visitor verbatim. Route handlers turn
//! errors into small HTML fragments, and the store swallows persistence
//! failures after logging them.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, AdventError>;

/// Top-level error for calendar operations.
#[derive(Error, Debug)]
pub enum AdventError {
    /// Local storage is unavailable, full, or refused the operation.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The `debug_date` override could not be parsed.
    #[error("Invalid debug date '{input}'")]
    InvalidDebugDate { input: String },

    /// The content catalog failed validation.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// No catalog record exists for this day.
    #[error("No door for day {0}")]
    UnknownDoor(u8),

    /// The door exists but is not visible on the current clock.
    #[error("Door {0} is still locked")]
    DoorLocked(u8),

    /// A game interaction carried a token from a session that is no longer mounted.
    #[error("Game session is no longer active")]
    StaleSession,

    /// A game interaction arrived while no game is mounted.
    #[error("No game is running")]
    NoActiveGame,

    /// Serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation failures when loading the door catalog.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Day {0} is outside 1..=31")]
    DayOutOfRange(u32),

    #[error("Day {0} appears more than once")]
    DuplicateDay(u8),

    #[error("Unknown game type '{0}'")]
    UnknownGameType(String),

    #[error("Trivia on day {day} is missing '{field}'")]
    TriviaMissingField { day: u8, field: &'static str },

    #[error("Trivia on day {0} has no options")]
    TriviaNoOptions(u8),

    #[error("Trivia answer '{answer}' on day {day} is not one of the options")]
    TriviaAnswerNotAnOption { day: u8, answer: String },

    #[error("Invalid catalog JSON: {0}")]
    Parse(String),
}
