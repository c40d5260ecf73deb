//! High score storage backends
//!
//! A store holds exactly one value: the best score ever reached. Every
//! backend is best-effort; callers log failures and carry on.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Why a storage call failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// No storage on this platform/session (private mode, no window)
    Unavailable,
    /// Stored value could not be parsed
    Corrupt(String),
    /// Backend rejected the write (quota, security)
    WriteFailed(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "storage unavailable"),
            StorageError::Corrupt(raw) => write!(f, "corrupt stored value: {:?}", raw),
            StorageError::WriteFailed(why) => write!(f, "write failed: {}", why),
        }
    }
}

impl std::error::Error for StorageError {}

/// Persistent single-value store for the high score
pub trait ScoreStore {
    /// `Ok(None)` means no high score has been stored yet
    fn load(&self) -> Result<Option<u64>, StorageError>;
    fn store(&mut self, best: u64) -> Result<(), StorageError>;
}

/// Stored payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub best: u64,
}

impl HighScoreRecord {
    pub fn encode(&self) -> String {
        // Serializing a struct of one integer cannot fail
        serde_json::to_string(self).unwrap_or_else(|_| format!("{{\"best\":{}}}", self.best))
    }

    /// Accepts the JSON record or a bare integer
    pub fn decode(raw: &str) -> Result<Self, StorageError> {
        let raw = raw.trim();
        if let Ok(record) = serde_json::from_str::<HighScoreRecord>(raw) {
            return Ok(record);
        }
        raw.parse::<u64>()
            .map(|best| HighScoreRecord { best })
            .map_err(|_| StorageError::Corrupt(raw.to_string()))
    }
}

#[derive(Debug)]
struct MemoryInner {
    value: Option<String>,
    available: bool,
}

/// In-memory store. Clones share the same slot, so a store can outlive the
/// game that used it (the native stand-in for "survives across sessions").
#[derive(Debug, Clone)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryInner>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(MemoryInner {
                value: None,
                available: true,
            })),
        }
    }

    /// A store that fails every call
    pub fn unavailable() -> Self {
        let store = Self::new();
        store.inner.borrow_mut().available = false;
        store
    }

    /// Raw stored text (for inspection)
    pub fn raw(&self) -> Option<String> {
        self.inner.borrow().value.clone()
    }

    /// Overwrite the raw stored text
    pub fn set_raw(&self, raw: &str) {
        self.inner.borrow_mut().value = Some(raw.to_string());
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<u64>, StorageError> {
        let inner = self.inner.borrow();
        if !inner.available {
            return Err(StorageError::Unavailable);
        }
        inner
            .value
            .as_deref()
            .map(|raw| HighScoreRecord::decode(raw).map(|r| r.best))
            .transpose()
    }

    fn store(&mut self, best: u64) -> Result<(), StorageError> {
        let mut inner = self.inner.borrow_mut();
        if !inner.available {
            return Err(StorageError::Unavailable);
        }
        inner.value = Some(HighScoreRecord { best }.encode());
        Ok(())
    }
}

/// Browser LocalStorage under a single key
#[cfg(target_arch = "wasm32")]
pub struct LocalStorageStore {
    key: &'static str,
}

#[cfg(target_arch = "wasm32")]
impl Default for LocalStorageStore {
    fn default() -> Self {
        Self {
            key: Self::STORAGE_KEY,
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "breakout_high_score";

    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StorageError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    fn load(&self) -> Result<Option<u64>, StorageError> {
        let storage = Self::storage()?;
        match storage.get_item(self.key) {
            Ok(Some(raw)) => HighScoreRecord::decode(&raw).map(|r| Some(r.best)),
            Ok(None) => Ok(None),
            Err(_) => Err(StorageError::Unavailable),
        }
    }

    fn store(&mut self, best: u64) -> Result<(), StorageError> {
        let storage = Self::storage()?;
        storage
            .set_item(self.key, &HighScoreRecord { best }.encode())
            .map_err(|e| StorageError::WriteFailed(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_roundtrip_and_legacy() {
        let raw = HighScoreRecord { best: 560 }.encode();
        assert_eq!(raw, r#"{"best":560}"#);
        assert_eq!(HighScoreRecord::decode(&raw), Ok(HighScoreRecord { best: 560 }));
        // Bare number written by older builds
        assert_eq!(HighScoreRecord::decode(" 120 "), Ok(HighScoreRecord { best: 120 }));
        assert!(matches!(
            HighScoreRecord::decode("??"),
            Err(StorageError::Corrupt(_))
        ));
    }

    #[test]
    fn test_memory_store_shared_between_clones() {
        let mut a = MemoryStore::new();
        let b = a.clone();
        assert_eq!(b.load(), Ok(None));

        a.store(90).unwrap();
        assert_eq!(b.load(), Ok(Some(90)));
    }

    #[test]
    fn test_unavailable_store_errors() {
        let mut store = MemoryStore::unavailable();
        assert_eq!(store.load(), Err(StorageError::Unavailable));
        assert_eq!(store.store(10), Err(StorageError::Unavailable));
    }
}
