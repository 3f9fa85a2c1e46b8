//! Opened-door persistence.
//!
//! The set of opened days is stored as a JSON array of integers under
//! [`STORAGE_KEY`]. The persisted value is authoritative: every query reads it
//! again rather than trusting an in-memory copy.
//!
//! Reads fail soft (missing or malformed → empty set). Writes are best-effort:
//! a full or disabled localStorage costs the visitor their "opened" marks,
//! nothing more.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};

use crate::error::Result;

/// localStorage key for the opened-door set.
pub const STORAGE_KEY: &str = "advent_opened_doors";

/// Minimal string key-value storage, shaped like the Web Storage API.
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}

impl Storage for Box<dyn Storage> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }
}

/// In-memory storage for native builds and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with one raw entry.
    pub fn with_item(key: &str, value: &str) -> Self {
        let mut items = HashMap::new();
        items.insert(key.to_string(), value.to_string());
        Self { items }
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// `window.localStorage`.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

#[cfg(target_arch = "wasm32")]
impl BrowserStorage {
    fn local_storage() -> Result<web_sys::Storage> {
        let window = web_sys::window().ok_or_else(|| Self::error("no window"))?;
        window
            .local_storage()
            .map_err(|e| Self::error(format!("{:?}", e)))?
            .ok_or_else(|| Self::error("localStorage unavailable"))
    }

    fn error(msg: impl Into<String>) -> crate::error::AdventError {
        crate::error::AdventError::Storage(msg.into())
    }
}

#[cfg(target_arch = "wasm32")]
impl Storage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Self::local_storage()?
            .get_item(key)
            .map_err(|e| Self::error(format!("{:?}", e)))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        Self::local_storage()?
            .set_item(key, value)
            .map_err(|e| Self::error(format!("{:?}", e)))
    }
}

/// The opened-door set over some [`Storage`].
#[derive(Debug, Clone, Default)]
pub struct OpenedDoorStore<S> {
    storage: S,
}

impl<S: Storage> OpenedDoorStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Days opened so far. Never fails: absent, unreadable or malformed
    /// values read as the empty set.
    pub fn opened(&self) -> BTreeSet<u8> {
        let raw = match self.storage.get_item(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return BTreeSet::new(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read opened doors");
                return BTreeSet::new();
            }
        };
        match serde_json::from_str::<Vec<u8>>(&raw) {
            Ok(days) => days.into_iter().collect(),
            Err(e) => {
                tracing::warn!(error = %e, "stored opened doors are malformed, treating as empty");
                BTreeSet::new()
            }
        }
    }

    pub fn is_opened(&self, day: u8) -> bool {
        self.opened().contains(&day)
    }

    /// Record `day` as opened. Idempotent: an already-opened day causes no
    /// write at all. Write failures are logged and dropped.
    pub fn mark_opened(&mut self, day: u8) {
        let mut opened = self.opened();
        if !opened.insert(day) {
            return;
        }
        if let Err(e) = self.write(&opened) {
            tracing::warn!(day, error = %e, "could not persist opened door");
        } else {
            tracing::debug!(day, total = opened.len(), "door marked opened");
        }
    }

    fn write(&mut self, opened: &BTreeSet<u8>) -> Result<()> {
        let days: Vec<u8> = opened.iter().copied().collect();
        let json = serde_json::to_string(&days)?;
        self.storage.set_item(STORAGE_KEY, &json)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(target_arch = "wasm32")]
fn default_storage() -> Box<dyn Storage> {
    Box::new(BrowserStorage)
}

#[cfg(not(target_arch = "wasm32"))]
fn default_storage() -> Box<dyn Storage> {
    Box::new(MemoryStorage::new())
}

thread_local! {
    static STORE: RefCell<OpenedDoorStore<Box<dyn Storage>>> =
        RefCell::new(OpenedDoorStore::new(default_storage()));
}

/// Execute a closure with mutable access to the active store.
pub fn with_store_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut OpenedDoorStore<Box<dyn Storage>>) -> R,
{
    STORE.with(|s| f(&mut s.borrow_mut()))
}

/// Opened days from the active store.
pub fn get_opened() -> BTreeSet<u8> {
    STORE.with(|s| s.borrow().opened())
}

/// Swap the backing storage of the active store.
pub fn install_storage(storage: Box<dyn Storage>) {
    STORE.with(|s| {
        *s.borrow_mut() = OpenedDoorStore::new(storage);
    });
}

/// Reset the active store to a fresh default backend.
pub fn reset_store() {
    install_storage(default_storage());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdventError;

    /// Storage that refuses every operation.
    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>> {
            Err(AdventError::Storage("disabled".to_string()))
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(AdventError::Storage("quota exceeded".to_string()))
        }
    }

    #[test]
    fn fresh_store_is_empty() {
        let store = OpenedDoorStore::new(MemoryStorage::new());
        assert!(store.opened().is_empty());
    }

    #[test]
    fn malformed_value_reads_as_empty() {
        for raw in ["not json", "{\"a\":1}", "[1, \"two\"]", "[-4]", "[300]", ""] {
            let store = OpenedDoorStore::new(MemoryStorage::with_item(STORAGE_KEY, raw));
            assert!(store.opened().is_empty(), "raw value {raw:?}");
        }
    }

    #[test]
    fn reads_existing_array() {
        let store = OpenedDoorStore::new(MemoryStorage::with_item(STORAGE_KEY, "[3,1,2]"));
        assert_eq!(store.opened(), BTreeSet::from([1, 2, 3]));
        assert!(store.is_opened(2));
        assert!(!store.is_opened(4));
    }

    #[test]
    fn mark_opened_persists_json_array() {
        let mut store = OpenedDoorStore::new(MemoryStorage::new());
        store.mark_opened(5);
        store.mark_opened(2);
        let raw = store.storage().get_item(STORAGE_KEY).unwrap().unwrap();
        assert_eq!(raw, "[2,5]");
    }

    #[test]
    fn mark_opened_is_idempotent() {
        let mut once = OpenedDoorStore::new(MemoryStorage::new());
        once.mark_opened(5);

        let mut twice = OpenedDoorStore::new(MemoryStorage::new());
        twice.mark_opened(5);
        twice.mark_opened(5);

        assert_eq!(once.opened(), twice.opened());
        assert_eq!(
            once.storage().get_item(STORAGE_KEY).unwrap(),
            twice.storage().get_item(STORAGE_KEY).unwrap()
        );
    }

    #[test]
    fn mark_opened_recovers_from_malformed_value() {
        let mut store = OpenedDoorStore::new(MemoryStorage::with_item(STORAGE_KEY, "garbage"));
        store.mark_opened(7);
        assert_eq!(store.opened(), BTreeSet::from([7]));
    }

    #[test]
    fn broken_storage_fails_soft() {
        let mut store = OpenedDoorStore::new(BrokenStorage);
        store.mark_opened(1);
        assert!(store.opened().is_empty());
    }

    #[test]
    fn active_store_roundtrip() {
        install_storage(Box::new(MemoryStorage::new()));
        assert!(get_opened().is_empty());
        with_store_mut(|s| s.mark_opened(3));
        with_store_mut(|s| s.mark_opened(3));
        assert_eq!(get_opened(), BTreeSet::from([3]));
        reset_store();
        assert!(get_opened().is_empty());
    }
}
