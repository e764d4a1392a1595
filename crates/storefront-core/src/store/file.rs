//! File-backed key-value store
//!
//! All keys live in one JSON object file. The file is read once when the
//! store opens and rewritten in full after every mutation, so a crash
//! leaves either the previous or the new contents on disk.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::KeyValueStore;
use crate::error::StoreError;

/// Name of the backing file inside the data directory
pub const STORE_FILE_NAME: &str = "local-storage.json";

/// Persistent implementation of [`KeyValueStore`]
#[derive(Debug)]
pub struct FileStore {
    /// Path to the JSON file
    path: PathBuf,
    /// In-memory copy of the file contents
    values: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open (or create) the store inside `data_dir`
    ///
    /// A missing file starts empty. A file that cannot be parsed is logged
    /// and also treated as empty; it is overwritten on the next write.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir)?;

        let path = data_dir.join(STORE_FILE_NAME);
        let values = Self::load(&path)?;

        info!(path = ?path, keys = values.len(), "Opened file store");

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> Result<BTreeMap<String, String>, StoreError> {
        if !path.exists() {
            debug!(path = ?path, "No existing store file, starting fresh");
            return Ok(BTreeMap::new());
        }

        let raw = fs::read_to_string(path)?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
            Ok(values) => Ok(values),
            Err(e) => {
                warn!(path = ?path, error = %e, "Store file is malformed, ignoring its contents");
                Ok(BTreeMap::new())
            }
        }
    }

    fn flush(&self, values: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(values)
            .map_err(|e| StoreError::serialization(e.to_string()))?;

        let tmp_path = self.path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock();
        values.insert(key.to_string(), value.to_string());
        debug!(key, bytes = value.len(), "Writing store file");
        self.flush(&values)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock();
        if values.remove(key).is_none() {
            return Ok(());
        }
        self.flush(&values)
    }
}
