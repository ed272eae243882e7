//! Account model
//!
//! Accounts are referenced by *name* from transactions, so a rename has to be
//! cascaded by the reducer (see `budget::reducer`).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountId;
use super::money::Money;

/// Type of financial account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AccountType {
    #[default]
    Checking,
    Savings,
    /// Balance is zero or negative; expenses push it further below zero
    #[serde(rename = "Credit Card")]
    CreditCard,
    Cash,
    Investment,
    Other,
}

impl AccountType {
    /// Returns true if a negative balance is the normal state for this type
    pub fn is_liability(&self) -> bool {
        matches!(self, Self::CreditCard)
    }

    /// Parse account type from user input
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['_', '-'], " ").as_str() {
            "checking" => Some(Self::Checking),
            "savings" => Some(Self::Savings),
            "credit" | "credit card" | "creditcard" => Some(Self::CreditCard),
            "cash" => Some(Self::Cash),
            "investment" => Some(Self::Investment),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checking => write!(f, "Checking"),
            Self::Savings => write!(f, "Savings"),
            Self::CreditCard => write!(f, "Credit Card"),
            Self::Cash => write!(f, "Cash"),
            Self::Investment => write!(f, "Investment"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// A financial account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,

    /// Display name, also the join key used by transactions
    pub name: String,

    #[serde(rename = "type")]
    pub account_type: AccountType,

    /// Current signed balance
    pub balance: Money,
}

impl Account {
    /// Create a new account with a zero balance
    pub fn new(name: impl Into<String>, account_type: AccountType) -> Self {
        Self::with_balance(name, account_type, Money::zero())
    }

    pub fn with_balance(
        name: impl Into<String>,
        account_type: AccountType,
        balance: Money,
    ) -> Self {
        Self {
            id: AccountId::new(),
            name: name.into(),
            account_type,
            balance,
        }
    }

    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.name.trim().is_empty() {
            return Err(AccountValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(AccountValidationError::NameTooLong(self.name.len()));
        }

        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.account_type)
    }
}

/// Partial update for an account; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub account_type: Option<AccountType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<Money>,
}

impl AccountUpdate {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn apply_to(&self, account: &mut Account) {
        if let Some(name) = &self.name {
            account.name = name.clone();
        }
        if let Some(account_type) = self.account_type {
            account.account_type = account_type;
        }
        if let Some(balance) = self.balance {
            account.balance = balance;
        }
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Account name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Account name too long ({} chars, max 100)", len)
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_type_parsing() {
        assert_eq!(AccountType::parse("checking"), Some(AccountType::Checking));
        assert_eq!(AccountType::parse("Credit Card"), Some(AccountType::CreditCard));
        assert_eq!(AccountType::parse("credit_card"), Some(AccountType::CreditCard));
        assert_eq!(AccountType::parse("brokerage"), None);
    }

    #[test]
    fn test_account_type_serializes_display_name() {
        let json = serde_json::to_string(&AccountType::CreditCard).unwrap();
        assert_eq!(json, "\"Credit Card\"");
        assert!(AccountType::CreditCard.is_liability());
        assert!(!AccountType::Savings.is_liability());
    }

    #[test]
    fn test_serialization_uses_type_key() {
        let account = Account::with_balance("Visa", AccountType::CreditCard, Money::from_cents(-2500));
        let value = serde_json::to_value(&account).unwrap();
        assert_eq!(value["type"], "Credit Card");
        assert_eq!(value["balance"], -25.0);
    }

    #[test]
    fn test_update_merges_present_fields() {
        let mut account = Account::with_balance("Checking", AccountType::Checking, Money::from_dollars(10));
        AccountUpdate::rename("Joint Checking").apply_to(&mut account);

        assert_eq!(account.name, "Joint Checking");
        assert_eq!(account.balance, Money::from_dollars(10));
        assert_eq!(account.account_type, AccountType::Checking);
    }

    #[test]
    fn test_validation() {
        let mut account = Account::new("Valid", AccountType::Cash);
        assert!(account.validate().is_ok());

        account.name = "  ".into();
        assert_eq!(account.validate(), Err(AccountValidationError::EmptyName));
    }
}
