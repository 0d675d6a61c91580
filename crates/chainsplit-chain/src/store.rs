//! [`ChainStore`] implementations.
//!
//! Both stores hold the chain as a JSON array of participant records under a
//! single key, overwritten in full on every save:
//!
//! ```text
//! [{"id":1,"name":"John (Founder)","level":1,"percentage":50,"amount":500.0,"joinedDate":"2024-01-01"}, ...]
//! ```
//!
//! - [`FileStore`] writes `<dir>/<key>.json`, replacing it atomically.
//! - [`MemoryStore`] keeps entries in process memory; nothing survives exit.

use std::collections::HashMap;
use std::path::PathBuf;

use chainsplit_core::constants::DEFAULT_STORE_KEY;
use chainsplit_core::error::StoreError;
use chainsplit_core::traits::ChainStore;
use chainsplit_core::types::Participant;
use parking_lot::Mutex;

/// Serialize a chain to its stored JSON form.
pub fn encode_chain(chain: &[Participant]) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec_pretty(chain).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Parse a stored entry. Any decode failure is [`StoreError::CorruptedEntry`].
pub fn decode_chain(bytes: &[u8]) -> Result<Vec<Participant>, StoreError> {
    serde_json::from_slice(bytes).map_err(|e| StoreError::CorruptedEntry(e.to_string()))
}

/// JSON file store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    key: String,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            key: key.into(),
        }
    }

    /// Store under [`DEFAULT_STORE_KEY`].
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(dir, DEFAULT_STORE_KEY)
    }

    /// Path of the entry file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.key))
    }

    fn tmp_path(&self) -> PathBuf {
        self.dir.join(format!("{}.json.tmp", self.key))
    }
}

impl ChainStore for FileStore {
    fn load(&self) -> Result<Option<Vec<Participant>>, StoreError> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        let bytes = std::fs::read(&path).map_err(|e| StoreError::Io(e.to_string()))?;
        decode_chain(&bytes).map(Some)
    }

    fn save(&self, chain: &[Participant]) -> Result<(), StoreError> {
        let bytes = encode_chain(chain)?;
        std::fs::create_dir_all(&self.dir).map_err(|e| StoreError::Io(e.to_string()))?;

        // Write-then-rename so a reader never sees a half-written entry.
        let tmp = self.tmp_path();
        std::fs::write(&tmp, &bytes).map_err(|e| StoreError::Io(e.to_string()))?;
        std::fs::rename(&tmp, self.path()).map_err(|e| StoreError::Io(e.to_string()))?;

        tracing::debug!(path = %self.path().display(), participants = chain.len(), "chain saved");
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    entries: HashMap<String, String>,
    writes: usize,
}

/// In-process key-value store.
#[derive(Debug)]
pub struct MemoryStore {
    key: String,
    inner: Mutex<MemoryInner>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_KEY)
    }
}

impl MemoryStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            inner: Mutex::new(MemoryInner::default()),
        }
    }

    /// Put a raw string under the store's key, bypassing encoding.
    pub fn insert_raw(&self, value: impl Into<String>) {
        self.inner.lock().entries.insert(self.key.clone(), value.into());
    }

    /// Raw string currently held under the store's key.
    pub fn raw(&self) -> Option<String> {
        self.inner.lock().entries.get(&self.key).cloned()
    }

    /// Number of successful saves.
    pub fn write_count(&self) -> usize {
        self.inner.lock().writes
    }
}

impl ChainStore for MemoryStore {
    fn load(&self) -> Result<Option<Vec<Participant>>, StoreError> {
        match self.raw() {
            Some(raw) => decode_chain(raw.as_bytes()).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, chain: &[Participant]) -> Result<(), StoreError> {
        let bytes = encode_chain(chain)?;
        let value =
            String::from_utf8(bytes).map_err(|e| StoreError::Serialization(e.to_string()))?;
        let mut inner = self.inner.lock();
        inner.entries.insert(self.key.clone(), value);
        inner.writes += 1;
        Ok(())
    }
}
