//! # File Store
//!
//! [`KeyValueStore`] backed by one JSON object on disk.
//!
//! ```text
//! <data dir>/session.json
//! {
//!   "ecofinds-user": "{\"id\":\"user1\",\"username\":\"demo\",...}"
//! }
//! ```
//!
//! The whole map is kept in memory and rewritten on every change. Writes go
//! to a temporary file first and are renamed into place.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use ecofinds_core::{KeyValueStore, StoreError};

pub const STORE_FILE_NAME: &str = "session.json";

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

fn io_error(err: std::io::Error) -> StoreError {
    StoreError::Io(err.to_string())
}

impl FileStore {
    /// Opens (or starts) the store inside `dir`.
    ///
    /// An unreadable file is logged and treated as empty; it is replaced on
    /// the next write.
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(dir).map_err(io_error)?;
        let path = dir.join(STORE_FILE_NAME);

        let entries = if path.exists() {
            let contents = std::fs::read_to_string(&path).map_err(io_error)?;
            match serde_json::from_str(&contents) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(?path, error = %e, "Session file unreadable, starting empty");
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        debug!(?path, keys = entries.len(), "Session store opened");
        Ok(FileStore { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, contents).map_err(io_error)?;
        std::fs::rename(&tmp, &self.path).map_err(io_error)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let previous = self.entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.persist() {
            // Keep memory and disk in step
            match previous {
                Some(old) => self.entries.insert(key.to_string(), old),
                None => self.entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let Some(previous) = self.entries.remove(key) else {
            return Ok(());
        };
        if let Err(e) = self.persist() {
            self.entries.insert(key.to_string(), previous);
            return Err(e);
        }
        Ok(())
    }
}
