//! Transaction model
//!
//! Transactions point at categories and accounts by *name*. Amounts are
//! signed: negative for expenses, positive for income. Use the
//! [`Transaction::expense`], [`Transaction::income`] and
//! [`Transaction::transfer`] constructors so the sign always matches the type.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::money::Money;

/// Category name carried by transfer transactions
pub const TRANSFER_CATEGORY: &str = "Transfer";

/// Category name carried by synthesized savings-goal refunds
pub const REFUND_CATEGORY: &str = "Refund";

const TRANSFER_TO_PREFIX: &str = "Transfer to ";
const TRANSFER_FROM_PREFIX: &str = "Transfer from ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// Direction of a transfer relative to the account the record is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferDirection {
    /// "Transfer to X": money left the recorded account for X
    To,
    /// "Transfer from X": money arrived in the recorded account from X
    From,
}

/// The counterpart account encoded in a transfer's name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferLeg<'a> {
    pub direction: TransferDirection,
    pub counterpart: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub name: String,

    /// Signed amount (negative for expenses)
    pub amount: Money,

    /// Spending category, savings goal, "Transfer" or "Refund"
    pub category: String,

    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    #[serde(deserialize_with = "super::date_serde::deserialize")]
    pub date: NaiveDate,

    /// Account name
    pub account: String,

    /// Set once the transaction has been accounted for in a category view
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleared_for_category: Option<String>,
}

impl Transaction {
    /// Build a transaction from an unsigned magnitude; the sign follows `transaction_type`
    pub fn new(
        name: impl Into<String>,
        magnitude: Money,
        transaction_type: TransactionType,
        category: impl Into<String>,
        account: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        let amount = match transaction_type {
            TransactionType::Expense => -magnitude.abs(),
            TransactionType::Income => magnitude.abs(),
        };

        Self {
            id: TransactionId::new(),
            name: name.into(),
            amount,
            category: category.into(),
            transaction_type,
            date,
            account: account.into(),
            cleared_for_category: None,
        }
    }

    pub fn expense(
        name: impl Into<String>,
        magnitude: Money,
        category: impl Into<String>,
        account: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self::new(name, magnitude, TransactionType::Expense, category, account, date)
    }

    pub fn income(
        name: impl Into<String>,
        magnitude: Money,
        category: impl Into<String>,
        account: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self::new(name, magnitude, TransactionType::Income, category, account, date)
    }

    /// A single transfer record filed under `from`, named "Transfer to <to>"
    pub fn transfer(from: &str, to: &str, magnitude: Money, date: NaiveDate) -> Self {
        Self::expense(
            format!("{}{}", TRANSFER_TO_PREFIX, to),
            magnitude,
            TRANSFER_CATEGORY,
            from,
            date,
        )
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    pub fn is_transfer(&self) -> bool {
        self.category == TRANSFER_CATEGORY
    }

    /// True when the transaction's date falls in the same calendar month as `today`
    pub fn is_in_month_of(&self, today: NaiveDate) -> bool {
        self.date.year() == today.year() && self.date.month() == today.month()
    }

    /// Counterpart account parsed from a transfer's name
    pub fn transfer_leg(&self) -> Option<TransferLeg<'_>> {
        if !self.is_transfer() {
            return None;
        }
        if let Some(counterpart) = self.name.strip_prefix(TRANSFER_TO_PREFIX) {
            return Some(TransferLeg {
                direction: TransferDirection::To,
                counterpart,
            });
        }
        self.name
            .strip_prefix(TRANSFER_FROM_PREFIX)
            .map(|counterpart| TransferLeg {
                direction: TransferDirection::From,
                counterpart,
            })
    }

    /// Rewrite the counterpart account in a "Transfer to/from <name>" title
    ///
    /// Any occurrence of `old` after the prefix is replaced, so titles that
    /// embed the account name inside a longer string are rewritten too.
    /// Returns true if the name changed.
    pub fn rename_transfer_counterpart(&mut self, old: &str, new: &str) -> bool {
        let prefix = [TRANSFER_TO_PREFIX, TRANSFER_FROM_PREFIX]
            .into_iter()
            .find(|p| self.name.starts_with(p));
        let Some(prefix) = prefix else {
            return false;
        };

        let rest = &self.name[prefix.len()..];
        if old.is_empty() || !rest.contains(old) {
            return false;
        }
        self.name = format!("{}{}", prefix, rest.replace(old, new));
        true
    }

    /// Signed effect on the recorded account's balance
    ///
    /// Expenses pull the balance down by the magnitude, income pushes it up.
    /// Transfers follow the direction encoded in their name instead.
    pub fn balance_delta(&self) -> Money {
        if let Some(leg) = self.transfer_leg() {
            return match leg.direction {
                TransferDirection::To => -self.amount.abs(),
                TransferDirection::From => self.amount.abs(),
            };
        }
        match self.transaction_type {
            TransactionType::Expense => -self.amount.abs(),
            TransactionType::Income => self.amount.abs(),
        }
    }

    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.name.trim().is_empty() {
            return Err(TransactionValidationError::EmptyName);
        }
        if self.account.trim().is_empty() {
            return Err(TransactionValidationError::MissingAccount);
        }
        let sign_ok = match self.transaction_type {
            TransactionType::Expense => !self.amount.is_positive(),
            TransactionType::Income => !self.amount.is_negative(),
        };
        if !sign_ok {
            return Err(TransactionValidationError::SignMismatch);
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.name, self.amount)
    }
}

/// Partial update for a transaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    #[serde(
        default,
        deserialize_with = "super::date_serde::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
}

impl TransactionUpdate {
    pub fn apply_to(&self, transaction: &mut Transaction) {
        if let Some(name) = &self.name {
            transaction.name = name.clone();
        }
        if let Some(amount) = self.amount {
            transaction.amount = amount;
        }
        if let Some(category) = &self.category {
            transaction.category = category.clone();
        }
        if let Some(transaction_type) = self.transaction_type {
            transaction.transaction_type = transaction_type;
        }
        if let Some(date) = self.date {
            transaction.date = date;
        }
        if let Some(account) = &self.account {
            transaction.account = account.clone();
        }
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    EmptyName,
    MissingAccount,
    SignMismatch,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Transaction name cannot be empty"),
            Self::MissingAccount => write!(f, "Transaction must reference an account"),
            Self::SignMismatch => {
                write!(f, "Expenses must be negative and income must be positive")
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_factories_apply_sign() {
        let coffee = Transaction::expense("Coffee", Money::from_cents(450), "Eating Out", "Checking", date(2026, 10, 1));
        assert_eq!(coffee.amount.cents(), -450);
        assert!(coffee.is_expense());

        // A pre-negated magnitude still ends up with the right sign
        let pay = Transaction::income("Paycheck", Money::from_cents(-200000), "Salary", "Checking", date(2026, 10, 1));
        assert_eq!(pay.amount.cents(), 200000);
        assert!(pay.validate().is_ok());
    }

    #[test]
    fn test_transfer_leg() {
        let transfer = Transaction::transfer("Checking", "Savings", Money::from_dollars(100), date(2026, 10, 2));
        assert_eq!(transfer.name, "Transfer to Savings");
        assert_eq!(transfer.account, "Checking");

        let leg = transfer.transfer_leg().unwrap();
        assert_eq!(leg.direction, TransferDirection::To);
        assert_eq!(leg.counterpart, "Savings");
        assert_eq!(transfer.balance_delta(), Money::from_dollars(-100));

        let mut incoming = transfer.clone();
        incoming.name = "Transfer from Savings".into();
        assert_eq!(incoming.transfer_leg().unwrap().direction, TransferDirection::From);
        assert_eq!(incoming.balance_delta(), Money::from_dollars(100));
    }

    #[test]
    fn test_rename_transfer_counterpart() {
        let mut transfer = Transaction::transfer("Savings", "Checking", Money::from_dollars(40), date(2026, 10, 2));
        assert!(transfer.rename_transfer_counterpart("Checking", "Checking 2"));
        assert_eq!(transfer.name, "Transfer to Checking 2");

        let mut incoming = Transaction::income("Transfer from Old Checking (joint)", Money::from_dollars(40), TRANSFER_CATEGORY, "Savings", date(2026, 10, 2));
        assert!(incoming.rename_transfer_counterpart("Old Checking", "Checking"));
        assert_eq!(incoming.name, "Transfer from Checking (joint)");

        let mut unrelated = Transaction::expense("Checking fee", Money::from_dollars(5), "Fees", "Checking", date(2026, 10, 2));
        assert!(!unrelated.rename_transfer_counterpart("Checking", "Checking 2"));
        assert_eq!(unrelated.name, "Checking fee");
    }

    #[test]
    fn test_non_transfer_has_no_leg() {
        let mut txn = Transaction::expense("Transfer to nowhere", Money::from_dollars(5), "Fun", "Cash", date(2026, 1, 1));
        assert!(txn.transfer_leg().is_none());
        txn.category = TRANSFER_CATEGORY.into();
        txn.name = "Moved money".into();
        assert!(txn.transfer_leg().is_none());
    }

    #[test]
    fn test_balance_delta_ignores_stored_sign() {
        let mut txn = Transaction::expense("Rent", Money::from_dollars(1200), "Rent", "Checking", date(2026, 10, 1));
        txn.amount = Money::from_dollars(1200);
        assert_eq!(txn.balance_delta(), Money::from_dollars(-1200));
        assert_eq!(txn.validate(), Err(TransactionValidationError::SignMismatch));
    }

    #[test]
    fn test_is_in_month_of() {
        let txn = Transaction::expense("Bus", Money::from_dollars(3), "Transit", "Cash", date(2026, 9, 30));
        assert!(txn.is_in_month_of(date(2026, 9, 1)));
        assert!(!txn.is_in_month_of(date(2026, 10, 1)));
        assert!(!txn.is_in_month_of(date(2025, 9, 30)));
    }

    #[test]
    fn test_serialization_shape() {
        let mut txn = Transaction::expense("Bus", Money::from_dollars(3), "Transit", "Cash", date(2026, 9, 30));
        let value = serde_json::to_value(&txn).unwrap();
        assert_eq!(value["type"], "Expense");
        assert_eq!(value["date"], "2026-09-30");
        assert!(value.get("clearedForCategory").is_none());

        txn.cleared_for_category = Some("Transit".into());
        let value = serde_json::to_value(&txn).unwrap();
        assert_eq!(value["clearedForCategory"], "Transit");
    }
}
