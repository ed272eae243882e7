//! Savings goal model
//!
//! A savings goal carries lifetime progress (`general_*`), progress toward
//! the current month's installment (`monthly_*`), and the payment plan that
//! was computed once when the goal was created.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::GoalId;
use super::money::Money;
use crate::budget::schedule::{calculate_savings_schedule, PaymentInstallment};
use crate::error::PocketResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsCategory {
    pub id: GoalId,
    pub name: String,
    pub general_saved: Money,
    pub general_target: Money,
    pub monthly_saved: Money,
    pub monthly_target: Money,
    pub payment_schedule: Vec<PaymentInstallment>,
    #[serde(deserialize_with = "super::date_serde::deserialize")]
    pub target_date: NaiveDate,
    pub number_of_months: u32,
}

impl SavingsCategory {
    /// Create a goal and compute its payment plan
    ///
    /// The monthly target starts at the installment for `created_on`'s month.
    ///
    /// # Errors
    ///
    /// Propagates the schedule calculator's `InvalidArgument` errors.
    pub fn new(
        name: impl Into<String>,
        general_target: Money,
        general_saved: Money,
        created_on: NaiveDate,
        target_date: NaiveDate,
    ) -> PocketResult<Self> {
        let schedule =
            calculate_savings_schedule(created_on, target_date, general_target, general_saved)?;
        let payment_schedule = schedule.payment_schedule();

        let monthly_target = payment_schedule
            .iter()
            .find(|i| i.covers(created_on))
            .or_else(|| payment_schedule.first())
            .map(|i| i.payment)
            .unwrap_or_default();

        Ok(Self {
            id: GoalId::new(),
            name: name.into(),
            general_saved,
            general_target,
            monthly_saved: Money::zero(),
            monthly_target,
            number_of_months: payment_schedule.len() as u32,
            payment_schedule,
            target_date,
        })
    }

    /// Installment whose month contains `date`
    pub fn installment_for(&self, date: NaiveDate) -> Option<&PaymentInstallment> {
        self.payment_schedule.iter().find(|i| i.covers(date))
    }

    pub fn general_progress(&self) -> Option<f64> {
        self.general_saved.percent_of(self.general_target)
    }

    pub fn monthly_progress(&self) -> Option<f64> {
        self.monthly_saved.percent_of(self.monthly_target)
    }

    pub fn is_complete(&self) -> bool {
        self.general_saved >= self.general_target
    }

    /// Name of the account a cashed-out goal becomes
    pub fn fund_account_name(&self) -> String {
        if self.name.contains("Fund") {
            self.name.clone()
        } else {
            format!("{} Fund", self.name)
        }
    }
}

impl fmt::Display for SavingsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} of {})",
            self.name, self.general_saved, self.general_target
        )
    }
}

/// Partial update for a savings goal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsCategoryUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general_saved: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general_target: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_saved: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_target: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_schedule: Option<Vec<PaymentInstallment>>,
    #[serde(
        default,
        deserialize_with = "super::date_serde::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub target_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_months: Option<u32>,
}

impl SavingsCategoryUpdate {
    /// Progress update after a contribution of `amount`
    pub fn contribution(goal: &SavingsCategory, amount: Money) -> Self {
        Self {
            general_saved: Some(goal.general_saved + amount),
            monthly_saved: Some(goal.monthly_saved + amount),
            ..Self::default()
        }
    }

    pub fn apply_to(&self, goal: &mut SavingsCategory) {
        if let Some(name) = &self.name {
            goal.name = name.clone();
        }
        if let Some(saved) = self.general_saved {
            goal.general_saved = saved;
        }
        if let Some(target) = self.general_target {
            goal.general_target = target;
        }
        if let Some(saved) = self.monthly_saved {
            goal.monthly_saved = saved;
        }
        if let Some(target) = self.monthly_target {
            goal.monthly_target = target;
        }
        if let Some(schedule) = &self.payment_schedule {
            goal.payment_schedule = schedule.clone();
        }
        if let Some(date) = self.target_date {
            goal.target_date = date;
        }
        if let Some(months) = self.number_of_months {
            goal.number_of_months = months;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_goal_builds_schedule() {
        let goal = SavingsCategory::new(
            "Vacation",
            Money::from_dollars(1000),
            Money::zero(),
            date(2025, 11, 20),
            date(2026, 3, 19),
        )
        .unwrap();

        assert_eq!(goal.number_of_months, 5);
        let total: Money = goal.payment_schedule.iter().map(|i| i.payment).sum();
        assert_eq!(total, Money::from_dollars(1000));
        assert_eq!(goal.monthly_target, goal.payment_schedule[0].payment);
        assert_eq!(goal.monthly_saved, Money::zero());
    }

    #[test]
    fn test_schedule_covers_only_unsaved_amount() {
        let goal = SavingsCategory::new(
            "Laptop",
            Money::from_dollars(1500),
            Money::from_dollars(500),
            date(2026, 1, 1),
            date(2026, 6, 1),
        )
        .unwrap();

        let total: Money = goal.payment_schedule.iter().map(|i| i.payment).sum();
        assert_eq!(total, Money::from_dollars(1000));
        assert_eq!(goal.general_progress().map(|p| p.round()), Some(33.0));
        assert!(goal.installment_for(date(2026, 3, 15)).is_some());
        assert!(goal.installment_for(date(2026, 7, 1)).is_none());
    }

    #[test]
    fn test_new_goal_rejects_bad_input() {
        let result = SavingsCategory::new(
            "Car",
            Money::from_dollars(100),
            Money::from_dollars(100),
            date(2026, 1, 1),
            date(2026, 6, 1),
        );
        assert!(result.unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_fund_account_name() {
        let mut goal = SavingsCategory::new(
            "Emergency",
            Money::from_dollars(100),
            Money::zero(),
            date(2026, 1, 1),
            date(2026, 2, 1),
        )
        .unwrap();
        assert_eq!(goal.fund_account_name(), "Emergency Fund");

        goal.name = "Rainy Day Fund".into();
        assert_eq!(goal.fund_account_name(), "Rainy Day Fund");
    }

    #[test]
    fn test_contribution_update() {
        let mut goal = SavingsCategory::new(
            "Bike",
            Money::from_dollars(600),
            Money::zero(),
            date(2026, 1, 1),
            date(2026, 7, 1),
        )
        .unwrap();

        SavingsCategoryUpdate::contribution(&goal, Money::from_dollars(600)).apply_to(&mut goal);
        assert_eq!(goal.general_saved, Money::from_dollars(600));
        assert_eq!(goal.monthly_saved, Money::from_dollars(600));
        assert!(goal.is_complete());
    }

    #[test]
    fn test_serializes_camel_case() {
        let goal = SavingsCategory::new(
            "Bike",
            Money::from_dollars(600),
            Money::zero(),
            date(2026, 1, 1),
            date(2026, 7, 1),
        )
        .unwrap();
        let value = serde_json::to_value(&goal).unwrap();
        assert_eq!(value["generalTarget"], 600.0);
        assert_eq!(value["numberOfMonths"], 6);
        assert_eq!(value["paymentSchedule"][0]["month"], "January");
        assert_eq!(value["paymentSchedule"][5]["endDate"], "2026-06-30");
    }
}
