//! JSON-file key/value store.
//!
//! Backs both the cookie jar and the identity cache. Every write rewrites the
//! whole file through a temporary file and a rename, so a crash never leaves
//! a half-written store behind.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::bootstrap::{CookieJar, KeyValueCache};
use crate::error::PlatformError;

const COOKIE_PREFIX: &str = "cookie.";

#[derive(Debug)]
struct StoreState {
    path: PathBuf,
    data: BTreeMap<String, String>,
}

/// File-backed string map. Clones share the same state.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    state: Arc<Mutex<StoreState>>,
}

impl JsonFileStore {
    /// Open the store at `path`; a missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PlatformError> {
        let path = path.into();
        let data = load(&path)?;
        tracing::debug!(path = ?path, entries = data.len(), "opened store");

        Ok(Self {
            state: Arc::new(Mutex::new(StoreState { path, data })),
        })
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.state.lock().data.get(key).cloned()
    }

    /// Insert and persist.
    pub fn insert(&self, key: &str, value: &str) -> Result<(), PlatformError> {
        let mut state = self.state.lock();
        state.data.insert(key.to_string(), value.to_string());
        save(&state.path, &state.data)
    }

    fn insert_logged(&self, key: &str, value: &str) {
        if let Err(e) = self.insert(key, value) {
            tracing::warn!("Failed to persist '{}': {}", key, e);
        }
    }
}

fn load(path: &Path) -> Result<BTreeMap<String, String>, PlatformError> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }

    let contents = std::fs::read_to_string(path)?;
    if contents.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    serde_json::from_str(&contents).map_err(|e| PlatformError::CorruptStore {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

fn save(path: &Path, data: &BTreeMap<String, String>) -> Result<(), PlatformError> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| PlatformError::Serialize(e.to_string()))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension("tmp");
    tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
    std::fs::write(&tmp_path, json)?;
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

impl CookieJar for JsonFileStore {
    fn get(&self, name: &str) -> Option<String> {
        self.value(&format!("{COOKIE_PREFIX}{name}"))
    }

    fn set(&self, name: &str, value: &str) {
        self.insert_logged(&format!("{COOKIE_PREFIX}{name}"), value);
    }
}

impl KeyValueCache for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.value(key)
    }

    fn set(&self, key: &str, value: &str) {
        self.insert_logged(key, value);
    }
}
