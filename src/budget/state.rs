//! The budget state tree
//!
//! One value holds every collection the reducer maintains, so each action
//! produces a complete, self-consistent replacement state.

use serde::{Deserialize, Serialize};

use crate::models::{
    Account, AccountId, CategoryGroup, GoalId, SavingsCategory, SpendingCategory,
    Transaction, TransactionId,
};

/// Spending categories keyed by group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpendingCategories {
    #[serde(rename = "Bills", default)]
    pub bills: Vec<SpendingCategory>,
    #[serde(rename = "Needs", default)]
    pub needs: Vec<SpendingCategory>,
    #[serde(rename = "Wants", default)]
    pub wants: Vec<SpendingCategory>,
    #[serde(rename = "Non-Monthly", default)]
    pub non_monthly: Vec<SpendingCategory>,
}

impl SpendingCategories {
    pub fn group(&self, group: CategoryGroup) -> &Vec<SpendingCategory> {
        match group {
            CategoryGroup::Bills => &self.bills,
            CategoryGroup::Needs => &self.needs,
            CategoryGroup::Wants => &self.wants,
            CategoryGroup::NonMonthly => &self.non_monthly,
        }
    }

    pub fn group_mut(&mut self, group: CategoryGroup) -> &mut Vec<SpendingCategory> {
        match group {
            CategoryGroup::Bills => &mut self.bills,
            CategoryGroup::Needs => &mut self.needs,
            CategoryGroup::Wants => &mut self.wants,
            CategoryGroup::NonMonthly => &mut self.non_monthly,
        }
    }

    /// Every category, in group display order
    pub fn iter(&self) -> impl Iterator<Item = &SpendingCategory> {
        CategoryGroup::all()
            .iter()
            .flat_map(move |group| self.group(*group).iter())
    }

    /// First category with this exact name, searching groups in display order
    pub fn find_by_name(&self, name: &str) -> Option<&SpendingCategory> {
        self.iter().find(|c| c.name == name)
    }

    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut SpendingCategory> {
        let group = CategoryGroup::all()
            .iter()
            .copied()
            .find(|group| self.group(*group).iter().any(|c| c.name == name))?;
        self.group_mut(group).iter_mut().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.bills.len() + self.needs.len() + self.wants.len() + self.non_monthly.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Savings goals live under a single "Savings Goals" key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavingsCategories {
    #[serde(rename = "Savings Goals", default)]
    pub goals: Vec<SavingsCategory>,
}

/// Complete client-side budget state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetState {
    #[serde(default)]
    pub spending_categories: SpendingCategories,
    #[serde(default)]
    pub savings_categories: SavingsCategories,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub accounts: Vec<Account>,
}

impl BudgetState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn account_by_name(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.name == name)
    }

    pub fn account_by_name_mut(&mut self, name: &str) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.name == name)
    }

    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn goal(&self, id: GoalId) -> Option<&SavingsCategory> {
        self.savings_categories.goals.iter().find(|g| g.id == id)
    }

    pub fn goal_by_name(&self, name: &str) -> Option<&SavingsCategory> {
        self.savings_categories.goals.iter().find(|g| g.name == name)
    }

    pub fn spending_category(&self, name: &str) -> Option<&SpendingCategory> {
        self.spending_categories.find_by_name(name)
    }

    /// Transactions filed against a category that haven't been cleared for it
    pub fn live_transactions_for(&self, category: &str) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.category == category)
            .filter(|t| t.cleared_for_category.as_deref() != Some(category))
            .collect()
    }

    /// True if any category or goal already uses this name
    pub fn is_category_name_taken(&self, name: &str) -> bool {
        self.spending_category(name).is_some() || self.goal_by_name(name).is_some()
    }
}
