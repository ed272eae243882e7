//! Key-value port for small persisted settings
//!
//! Alert flags and the triggered-alert ledger are stored as JSON values under
//! string keys. The gate only sees this trait, so tests run against
//! [`MemoryStore`] and the CLI runs against a JSON file.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

use crate::error::PocketError;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>, PocketError>;
    fn set(&self, key: &str, value: Value) -> Result<(), PocketError>;
    fn remove(&self, key: &str) -> Result<(), PocketError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<Value>, PocketError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: Value) -> Result<(), PocketError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), PocketError> {
        (**self).remove(key)
    }
}

/// In-memory store, used by tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
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
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PocketError> {
        let mut data = self.data.write().map_err(|e| {
            PocketError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        data.remove(key);
        Ok(())
    }
}
