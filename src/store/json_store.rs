//! JSON-backed record store
//!
//! Loads and saves a mapping from string key to record, stored as one
//! pretty-printed JSON document. Every mutation elsewhere rewrites the
//! whole document; there is no partial update, locking, or atomic rename.

use log::warn;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// A record store backed by a single JSON document.
pub struct JsonStore<R> {
    path: PathBuf,
    _record: PhantomData<R>,
}

impl<R: Serialize + DeserializeOwned> JsonStore<R> {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            _record: PhantomData,
        }
    }

    /// Path of the backing document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full record map from disk.
    ///
    /// An absent, unreadable, or malformed document is treated as
    /// "no data yet" and loads as an empty map.
    pub fn load(&self) -> BTreeMap<String, R> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                warn!("Failed to read record store {}: {}", self.path.display(), e);
                return BTreeMap::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    "Malformed record store {} - starting empty: {}",
                    self.path.display(),
                    e
                );
                BTreeMap::new()
            }
        }
    }

    /// Serialize the full record map back to disk, overwriting the document.
    pub fn save(&self, records: &BTreeMap<String, R>) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(records)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&self.path, body)?;
        Ok(())
    }
}
