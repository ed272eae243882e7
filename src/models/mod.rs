//! Core data models for Pocket Budget
//!
//! Accounts, transactions, spending categories and savings goals. Cross-entity
//! references (transaction → account, transaction → category) are by name.

pub mod account;
pub mod category;
mod date_serde;
pub mod ids;
pub mod money;
pub mod recurrence;
pub mod savings;
pub mod transaction;

pub use account::{Account, AccountType, AccountUpdate};
pub use category::{CategoryGroup, CategoryStatus, SpendingCategory, SpendingCategoryUpdate};
pub use ids::{AccountId, CategoryId, GoalId, TransactionId};
pub use money::Money;
pub use recurrence::Recurrence;
pub use savings::{SavingsCategory, SavingsCategoryUpdate};
pub use transaction::{
    Transaction, TransactionType, TransactionUpdate, TransferDirection, REFUND_CATEGORY,
    TRANSFER_CATEGORY,
};
