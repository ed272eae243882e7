//! JSON-file backed key-value store
//!
//! Every write rewrites data/preferences.json in full. The file is small
//! (a few flags and a list of category names).

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde_json::Value;

use crate::error::PocketError;

use super::file_io::{read_json, write_json_atomic};
use super::kv::KeyValueStore;

/// Preferences persisted as one JSON object
pub struct JsonFileStore {
    path: PathBuf,
    data: RwLock<BTreeMap<String, Value>>,
}

impl JsonFileStore {
    /// Open the store, loading any existing file
    pub fn open(path: PathBuf) -> Result<Self, PocketError> {
        let data: BTreeMap<String, Value> = read_json(&path)?;
        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    fn persist(&self, data: &BTreeMap<String, Value>) -> Result<(), PocketError> {
        write_json_atomic(&self.path, data)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, PocketError> {
        let data = self.data.read().map_err(|e| {
            PocketError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), PocketError> {
        let mut data = self.data.write().map_err(|e| {
            PocketError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        data.insert(key.to_string(), value);
        self.persist(&data)
    }

    fn remove(&self, key: &str) -> Result<(), PocketError> {
        let mut data = self.data.write().map_err(|e| {
            PocketError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        if data.remove(key).is_some() {
            self.persist(&data)?;
        }
        Ok(())
    }
}
