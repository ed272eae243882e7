//! Pocket Budget - personal budgeting engine
//!
//! Tracks accounts, spending categories grouped as Bills, Needs, Wants and
//! Non-Monthly, savings goals with month-by-month payment plans, and the
//! transactions between them. Budget alerts fire once per category per
//! month when spending reaches 90% of target.
//!
//! # Architecture
//!
//! - `models`: accounts, transactions, categories, goals, money and ids
//! - `budget`: the state tree, actions, the pure reducer, the savings
//!   schedule calculator and the [`budget::BudgetStore`]
//! - `alerts`: the alert gate, its persisted ledger and notifiers
//! - `storage`: JSON files with atomic writes and the key-value port
//! - `config`: paths and user settings
//! - `cli` / `display`: the command-line front end
//!
//! # Example
//!
//! ```rust,ignore
//! use pocket_budget::alerts::{AlertGate, LogNotifier};
//! use pocket_budget::budget::{Action, BudgetState, BudgetStore};
//! use pocket_budget::storage::MemoryStore;
//!
//! let gate = AlertGate::new(MemoryStore::new(), LogNotifier);
//! let mut store = BudgetStore::open(BudgetState::new(), gate, today);
//! store.dispatch(Action::AddAccount { account });
//! ```

pub mod alerts;
pub mod budget;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod storage;

pub use error::{PocketError, PocketResult};
