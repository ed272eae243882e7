//! Storage layer for Pocket Budget
//!
//! JSON files with atomic writes: the budget state in one document and the
//! alert preferences in another.

pub mod file_io;
pub mod kv;
pub mod preferences;
pub mod state;

pub use file_io::{read_json, write_json_atomic};
pub use kv::{KeyValueStore, MemoryStore};
pub use preferences::JsonFileStore;
pub use state::StateRepository;

use crate::config::paths::PocketPaths;
use crate::error::PocketError;

/// Main storage coordinator
pub struct Storage {
    paths: PocketPaths,
    pub state: StateRepository,
    pub preferences: JsonFileStore,
}

impl Storage {
    /// Open storage under `paths`, creating directories as needed
    pub fn new(paths: PocketPaths) -> Result<Self, PocketError> {
        paths.ensure_directories()?;

        Ok(Self {
            state: StateRepository::new(paths.state_file()),
            preferences: JsonFileStore::open(paths.preferences_file())?,
            paths,
        })
    }

    pub fn paths(&self) -> &PocketPaths {
        &self.paths
    }

    /// Check if storage has been initialized (settings written)
    pub fn is_initialized(&self) -> bool {
        self.paths.settings_file().exists()
    }
}
