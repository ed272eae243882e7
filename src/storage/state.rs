//! Budget state repository
//!
//! The whole state tree is one document in data/state.json.

use std::path::PathBuf;

use tracing::debug;

use crate::budget::BudgetState;
use crate::error::PocketError;

use super::file_io::{read_json, write_json_atomic};

/// Repository for the persisted budget state
pub struct StateRepository {
    path: PathBuf,
}

impl StateRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the state, or an empty one on first run
    pub fn load(&self) -> Result<BudgetState, PocketError> {
        let state: BudgetState = read_json(&self.path)?;
        debug!(
            path = %self.path.display(),
            accounts = state.accounts.len(),
            transactions = state.transactions.len(),
            "loaded budget state"
        );
        Ok(state)
    }

    pub fn save(&self, state: &BudgetState) -> Result<(), PocketError> {
        write_json_atomic(&self.path, state)?;
        debug!(path = %self.path.display(), "saved budget state");
        Ok(())
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, AccountType, Money};
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_is_empty_state() {
        let temp_dir = TempDir::new().unwrap();
        let repo = StateRepository::new(temp_dir.path().join("state.json"));

        assert!(!repo.exists());
        assert_eq!(repo.load().unwrap(), BudgetState::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let repo = StateRepository::new(temp_dir.path().join("data").join("state.json"));

        let mut state = BudgetState::new();
        state.accounts.push(Account::with_balance(
            "Checking",
            AccountType::Checking,
            Money::from_dollars(250),
        ));
        repo.save(&state).unwrap();

        assert!(repo.exists());
        assert_eq!(repo.load().unwrap(), state);
    }
}
