//! Spending category model
//!
//! Spending categories live in one of four fixed groups. `spent` only ever
//! reflects expenses dated in the current calendar month; `status` and
//! `status_amount` are derived from `spent` and `target`.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::money::Money;
use super::recurrence::Recurrence;

/// The group a spending category belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CategoryGroup {
    Bills,
    Needs,
    Wants,
    #[serde(rename = "Non-Monthly")]
    NonMonthly,
}

impl CategoryGroup {
    /// All groups in display order
    pub fn all() -> &'static [Self] {
        &[Self::Bills, Self::Needs, Self::Wants, Self::NonMonthly]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Bills => "Bills",
            Self::Needs => "Needs",
            Self::Wants => "Wants",
            Self::NonMonthly => "Non-Monthly",
        }
    }

    /// Parse a group from user input (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "bills" => Some(Self::Bills),
            "needs" => Some(Self::Needs),
            "wants" => Some(Self::Wants),
            "non-monthly" | "nonmonthly" => Some(Self::NonMonthly),
            _ => None,
        }
    }
}

impl fmt::Display for CategoryGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a category is still under its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryStatus {
    #[default]
    Remaining,
    Over,
}

impl fmt::Display for CategoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remaining => write!(f, "remaining"),
            Self::Over => write!(f, "over"),
        }
    }
}

/// A budget line with a monthly target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingCategory {
    pub id: CategoryId,
    pub name: String,
    pub group: CategoryGroup,

    /// Recurrence descriptor, e.g. "Monthly on 1" or "Weekly on Friday"
    pub date: String,

    pub spent: Money,
    pub target: Money,
    pub status: CategoryStatus,
    pub status_amount: Money,
    pub is_repeating: bool,
}

impl SpendingCategory {
    /// Create a category with nothing spent yet
    ///
    /// `is_repeating` is inferred from the descriptor: weekly and monthly
    /// descriptors repeat, one-off dates don't.
    pub fn new(
        name: impl Into<String>,
        group: CategoryGroup,
        target: Money,
        date: impl Into<String>,
    ) -> Self {
        let date = date.into();
        let is_repeating = Recurrence::parse(&date)
            .map(|r| r.is_repeating())
            .unwrap_or(false);

        Self {
            id: CategoryId::new(),
            name: name.into(),
            group,
            date,
            spent: Money::zero(),
            target,
            status: CategoryStatus::Remaining,
            status_amount: target,
            is_repeating,
        }
    }

    /// Re-derive `status` and `status_amount` from `spent` and `target`
    pub fn refresh_status(&mut self) {
        if self.spent > self.target {
            self.status = CategoryStatus::Over;
            self.status_amount = self.spent - self.target;
        } else {
            self.status = CategoryStatus::Remaining;
            self.status_amount = self.target - self.spent;
        }
    }

    /// Record spending (magnitude, sign ignored)
    pub fn record_spending(&mut self, amount: Money) {
        self.spent += amount.abs();
        self.refresh_status();
    }

    /// Undo previously recorded spending, never going below zero
    pub fn reverse_spending(&mut self, amount: Money) {
        self.spent = self.spent.saturating_sub_to_zero(amount.abs());
        self.refresh_status();
    }

    /// Percent of target spent, `None` without a positive target
    pub fn progress(&self) -> Option<f64> {
        self.spent.percent_of(self.target)
    }

    /// Parsed recurrence, if the descriptor is understood
    pub fn recurrence(&self) -> Option<Recurrence> {
        Recurrence::parse(&self.date).ok()
    }
}

impl fmt::Display for SpendingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Partial update for a spending category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingCategoryUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spent: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_repeating: Option<bool>,
}

impl SpendingCategoryUpdate {
    pub fn target(target: Money) -> Self {
        Self {
            target: Some(target),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge into `category` and re-derive its status
    pub fn apply_to(&self, category: &mut SpendingCategory) {
        if let Some(name) = &self.name {
            category.name = name.clone();
        }
        if let Some(date) = &self.date {
            category.date = date.clone();
        }
        if let Some(spent) = self.spent {
            category.spent = spent;
        }
        if let Some(target) = self.target {
            category.target = target;
        }
        if let Some(is_repeating) = self.is_repeating {
            category.is_repeating = is_repeating;
        }
        category.refresh_status();
    }
}
