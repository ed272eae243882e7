//! CLI command handlers
//!
//! Each handler loads the budget through a [`Session`], dispatches actions
//! through the store, and saves the result.

pub mod account;
pub mod alerts;
pub mod category;
pub mod goal;
pub mod schedule;
pub mod transaction;

pub use account::{handle_account_command, AccountCommands};
pub use alerts::{handle_alerts_command, AlertsCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use goal::{handle_goal_command, GoalCommands};
pub use schedule::{handle_schedule_command, ScheduleArgs};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::{Local, NaiveDate};

use crate::alerts::{AlertGate, ConsoleNotifier};
use crate::budget::{parse_schedule_date, BudgetState, BudgetStore};
use crate::config::settings::Settings;
use crate::error::{PocketError, PocketResult};
use crate::models::{Money, SavingsCategory, TransactionId};
use crate::storage::{JsonFileStore, Storage};

/// A loaded budget, ready for dispatch
pub struct Session<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
    store: BudgetStore<&'a JsonFileStore, ConsoleNotifier>,
}

impl<'a> Session<'a> {
    /// Load the saved state and run the monthly alert reset
    pub fn open(storage: &'a Storage, settings: &'a Settings) -> PocketResult<Self> {
        let state = storage.state.load()?;
        let gate = AlertGate::new(&storage.preferences, ConsoleNotifier);
        let store = BudgetStore::open(state, gate, today());
        Ok(Self {
            storage,
            settings,
            store,
        })
    }

    pub fn state(&self) -> &BudgetState {
        self.store.state()
    }

    pub fn store(&self) -> &BudgetStore<&'a JsonFileStore, ConsoleNotifier> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut BudgetStore<&'a JsonFileStore, ConsoleNotifier> {
        &mut self.store
    }

    pub fn settings(&self) -> &Settings {
        self.settings
    }

    pub fn symbol(&self) -> &str {
        &self.settings.currency_symbol
    }

    pub fn save(&self) -> PocketResult<()> {
        self.storage.state.save(self.store.state())
    }
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub(crate) fn parse_money(input: &str) -> PocketResult<Money> {
    Money::parse(input).map_err(|e| {
        PocketError::Validation(format!(
            "Invalid amount: '{}'. Use a format like '25.00' or '25'. Error: {}",
            input, e
        ))
    })
}

/// Parse an optional date argument, defaulting to today
pub(crate) fn parse_date_or_today(input: Option<&str>) -> PocketResult<NaiveDate> {
    match input {
        Some(raw) => parse_schedule_date(raw),
        None => Ok(today()),
    }
}

pub(crate) fn find_goal<'s>(state: &'s BudgetState, name: &str) -> PocketResult<&'s SavingsCategory> {
    state
        .goal_by_name(name)
        .ok_or_else(|| PocketError::goal_not_found(name))
}

/// Resolve a transaction from its short display id ("txn-1a2b3c4d"),
/// a full UUID, or any unambiguous prefix of one
pub(crate) fn find_transaction_id(state: &BudgetState, query: &str) -> PocketResult<TransactionId> {
    let needle = query.trim().trim_start_matches("txn-").to_lowercase();
    if needle.is_empty() {
        return Err(PocketError::transaction_not_found(query));
    }

    let matches: Vec<TransactionId> = state
        .transactions
        .iter()
        .map(|t| t.id)
        .filter(|id| id.as_uuid().to_string().starts_with(&needle))
        .collect();

    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(PocketError::transaction_not_found(query)),
        _ => Err(PocketError::Validation(format!(
            "Transaction id '{}' is ambiguous ({} matches)",
            query,
            matches.len()
        ))),
    }
}
