//! Door catalog — the static list of calendar entries.
//!
//! The catalog is configuration: a JSON array in the original `messages`
//! shape (`day`, `type`, `text`, optional `source`, optional `gameType` and
//! trivia fields). The built-in catalog is embedded from
//! `data/messages.json`; a host page may install its own with
//! [`install_catalog`].
//!
//! Records are validated on load and the loose `gameType` string is turned
//! into the [`GameSpec`] enum, so nothing downstream handles "trivia without
//! options".

use serde::Deserialize;
use std::cell::RefCell;
use std::collections::BTreeSet;

use crate::error::CatalogError;

/// The catalog shipped with the crate.
const EMBEDDED_CATALOG: &str = include_str!("../data/messages.json");

/// Which mini-game a door hosts, with any data that game needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameSpec {
    CatchElf,
    Trivia {
        question: String,
        options: Vec<String>,
        answer: String,
    },
    DecorateTree,
    Memory,
}

impl GameSpec {
    /// The `gameType` string this variant is written as in catalog JSON.
    pub fn type_name(&self) -> &'static str {
        match self {
            GameSpec::CatchElf => "catch-elf",
            GameSpec::Trivia { .. } => "trivia",
            GameSpec::DecorateTree => "decorate-tree",
            GameSpec::Memory => "memory",
        }
    }
}

/// One calendar door. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoorRecord {
    pub day: u8,
    /// Display label such as "Quote" or "Mini Game".
    pub kind: String,
    pub text: String,
    pub source: Option<String>,
    pub game: Option<GameSpec>,
}

/// Wire shape of a record, before validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    day: u32,
    #[serde(rename = "type")]
    kind: String,
    text: String,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    game_type: Option<String>,
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    options: Option<Vec<String>>,
    #[serde(default)]
    answer: Option<String>,
}

impl TryFrom<RawRecord> for DoorRecord {
    type Error = CatalogError;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        if !(1..=31).contains(&raw.day) {
            return Err(CatalogError::DayOutOfRange(raw.day));
        }
        let day = raw.day as u8;

        let game = match raw.game_type.as_deref() {
            None => None,
            Some("catch-elf") => Some(GameSpec::CatchElf),
            Some("decorate-tree") => Some(GameSpec::DecorateTree),
            Some("memory") => Some(GameSpec::Memory),
            Some("trivia") => {
                let question = raw
                    .question
                    .ok_or(CatalogError::TriviaMissingField { day, field: "question" })?;
                let options = raw
                    .options
                    .ok_or(CatalogError::TriviaMissingField { day, field: "options" })?;
                let answer = raw
                    .answer
                    .ok_or(CatalogError::TriviaMissingField { day, field: "answer" })?;
                if options.is_empty() {
                    return Err(CatalogError::TriviaNoOptions(day));
                }
                if !options.contains(&answer) {
                    return Err(CatalogError::TriviaAnswerNotAnOption { day, answer });
                }
                Some(GameSpec::Trivia {
                    question,
                    options,
                    answer,
                })
            }
            Some(other) => return Err(CatalogError::UnknownGameType(other.to_string())),
        };

        Ok(DoorRecord {
            day,
            kind: raw.kind,
            text: raw.text,
            source: raw.source.filter(|s| !s.is_empty()),
            game,
        })
    }
}

/// Ordered, validated list of door records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    records: Vec<DoorRecord>,
}

impl Catalog {
    /// Parse and validate a catalog from JSON. Record order is preserved.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawRecord> =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;

        let mut seen = BTreeSet::new();
        let mut records = Vec::with_capacity(raw.len());
        for r in raw {
            let record = DoorRecord::try_from(r)?;
            if !seen.insert(record.day) {
                return Err(CatalogError::DuplicateDay(record.day));
            }
            records.push(record);
        }
        Ok(Self { records })
    }

    /// The catalog embedded at build time. An invalid embedded file yields an
    /// empty catalog, which renders as "coming soon".
    pub fn embedded() -> Self {
        Self::from_json(EMBEDDED_CATALOG).unwrap_or_else(|e| {
            tracing::error!(error = %e, "embedded catalog is invalid");
            Self::default()
        })
    }

    pub fn records(&self) -> &[DoorRecord] {
        &self.records
    }

    /// Look up the record for a day.
    pub fn get(&self, day: u8) -> Option<&DoorRecord> {
        self.records.iter().find(|r| r.day == day)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

thread_local! {
    static CATALOG: RefCell<Catalog> = RefCell::new(Catalog::embedded());
}

/// Execute a closure with read access to the active catalog.
pub fn with_catalog<F, R>(f: F) -> R
where
    F: FnOnce(&Catalog) -> R,
{
    CATALOG.with(|c| f(&c.borrow()))
}

/// Replace the active catalog.
pub fn install_catalog(catalog: Catalog) {
    tracing::info!(doors = catalog.len(), "installing catalog");
    CATALOG.with(|c| {
        *c.borrow_mut() = catalog;
    });
}

/// Restore the built-in catalog.
pub fn reset_catalog() {
    install_catalog(Catalog::embedded());
}
