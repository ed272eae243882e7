//! Actions accepted by the reducer and the effects it asks callers to run
//!
//! Actions serialize as `{"type": "ADD_TRANSACTION", "payload": {...}}` with
//! camelCase payload fields.

use serde::{Deserialize, Serialize};

use crate::models::{
    Account, AccountId, AccountUpdate, CategoryGroup, CategoryId, GoalId, Money, SavingsCategory,
    SavingsCategoryUpdate, SpendingCategory, SpendingCategoryUpdate, Transaction, TransactionId,
    TransactionUpdate,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Action {
    AddSpendingCategory {
        group: CategoryGroup,
        category: SpendingCategory,
    },
    UpdateSpendingCategory {
        group: CategoryGroup,
        id: CategoryId,
        updates: SpendingCategoryUpdate,
    },
    MoveSpendingCategory {
        category_name: String,
        from_group: CategoryGroup,
        to_group: CategoryGroup,
        #[serde(default)]
        updates: SpendingCategoryUpdate,
    },
    DeleteSpendingCategory {
        category_name: String,
    },
    AddSavingsCategory {
        category: SavingsCategory,
    },
    UpdateSavingsCategory {
        id: GoalId,
        updates: SavingsCategoryUpdate,
    },
    DeleteSavingsCategory {
        id: GoalId,
    },
    SpendSavingsCategory {
        id: GoalId,
    },
    AddTransaction {
        transaction: Transaction,
    },
    UpdateTransaction {
        transaction_id: TransactionId,
        updates: TransactionUpdate,
    },
    DeleteTransaction {
        transaction_id: TransactionId,
    },
    AddAccount {
        account: Account,
    },
    UpdateAccount {
        account_id: AccountId,
        updates: AccountUpdate,
    },
    DeleteAccount {
        account_id: AccountId,
    },
    MarkCategoryTransactionsCleared {
        category_name: String,
    },
}

impl Action {
    /// Wire name of the action, e.g. "ADD_TRANSACTION"
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AddSpendingCategory { .. } => "ADD_SPENDING_CATEGORY",
            Self::UpdateSpendingCategory { .. } => "UPDATE_SPENDING_CATEGORY",
            Self::MoveSpendingCategory { .. } => "MOVE_SPENDING_CATEGORY",
            Self::DeleteSpendingCategory { .. } => "DELETE_SPENDING_CATEGORY",
            Self::AddSavingsCategory { .. } => "ADD_SAVINGS_CATEGORY",
            Self::UpdateSavingsCategory { .. } => "UPDATE_SAVINGS_CATEGORY",
            Self::DeleteSavingsCategory { .. } => "DELETE_SAVINGS_CATEGORY",
            Self::SpendSavingsCategory { .. } => "SPEND_SAVINGS_CATEGORY",
            Self::AddTransaction { .. } => "ADD_TRANSACTION",
            Self::UpdateTransaction { .. } => "UPDATE_TRANSACTION",
            Self::DeleteTransaction { .. } => "DELETE_TRANSACTION",
            Self::AddAccount { .. } => "ADD_ACCOUNT",
            Self::UpdateAccount { .. } => "UPDATE_ACCOUNT",
            Self::DeleteAccount { .. } => "DELETE_ACCOUNT",
            Self::MarkCategoryTransactionsCleared { .. } => "MARK_CATEGORY_TRANSACTIONS_CLEARED",
        }
    }
}

/// Side effects requested by a state transition
///
/// The reducer never performs I/O; it returns these for the alert gate.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// A transaction was recorded
    TransactionAdded { name: String, amount: Money },
    /// A transaction's name or amount changed
    TransactionUpdated { name: String, amount: Money },
    /// A category's spending reached the alert threshold
    BudgetThreshold { category: String, progress: f64 },
    /// A category's target changed, so its threshold alert may fire again
    ResetBudgetAlert { category: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_wire_format() {
        let action = Action::DeleteSpendingCategory {
            category_name: "Dining".into(),
        };
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value["type"], "DELETE_SPENDING_CATEGORY");
        assert_eq!(value["payload"]["categoryName"], "Dining");
        assert_eq!(action.kind(), "DELETE_SPENDING_CATEGORY");
    }

    #[test]
    fn test_deserialize_move_without_updates() {
        let json = r#"{
            "type": "MOVE_SPENDING_CATEGORY",
            "payload": {"categoryName": "Gym", "fromGroup": "Wants", "toGroup": "Non-Monthly"}
        }"#;
        let action: Action = serde_json::from_str(json).unwrap();
        assert_eq!(
            action,
            Action::MoveSpendingCategory {
                category_name: "Gym".into(),
                from_group: CategoryGroup::Wants,
                to_group: CategoryGroup::NonMonthly,
                updates: SpendingCategoryUpdate::default(),
            }
        );
    }

    #[test]
    fn test_add_transaction_with_decimal_amount_and_timestamp() {
        let json = r#"{
            "type": "ADD_TRANSACTION",
            "payload": {
                "transaction": {
                    "id": "7d1f9a52-4c3e-4b8a-9f11-2a6c0b5e8d40",
                    "name": "Farmers market",
                    "amount": -40.5,
                    "category": "Groceries",
                    "type": "Expense",
                    "date": "2026-10-18T12:00:00.000Z",
                    "account": "Checking"
                }
            }
        }"#;
        let action: Action = serde_json::from_str(json).unwrap();
        let Action::AddTransaction { transaction } = &action else {
            panic!("expected ADD_TRANSACTION, got {}", action.kind());
        };
        assert_eq!(transaction.amount, Money::from_cents(-4050));
        assert_eq!(transaction.date, NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
        assert!(transaction.cleared_for_category.is_none());

        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value["payload"]["transaction"]["amount"], -40.5);
        assert_eq!(value["payload"]["transaction"]["date"], "2026-10-18");
        let back: Action = serde_json::from_value(value).unwrap();
        assert_eq!(back, action);
    }

    #[test]
    fn test_update_transaction_accepts_timestamp_date() {
        let json = r#"{
            "type": "UPDATE_TRANSACTION",
            "payload": {
                "transactionId": "7d1f9a52-4c3e-4b8a-9f11-2a6c0b5e8d40",
                "updates": {"amount": -12.25, "date": "2026-09-01T08:30:00Z"}
            }
        }"#;
        let action: Action = serde_json::from_str(json).unwrap();
        let Action::UpdateTransaction { updates, .. } = action else {
            panic!("expected UPDATE_TRANSACTION");
        };
        assert_eq!(updates.amount, Some(Money::from_cents(-1225)));
        assert_eq!(updates.date, NaiveDate::from_ymd_opt(2026, 9, 1));
        assert!(updates.name.is_none());
    }

    #[test]
    fn test_transaction_payload_round_trip() {
        let txn = Transaction::expense(
            "Groceries run",
            Money::from_cents(8_250),
            "Groceries",
            "Checking",
            NaiveDate::from_ymd_opt(2026, 10, 3).unwrap(),
        );
        let action = Action::AddTransaction { transaction: txn };
        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains("\"ADD_TRANSACTION\""));
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(back, action);
    }
}
