//! Savings schedule calculation
//!
//! Spreads the amount still to save evenly over every day between the
//! creation date and the target date, then buckets those days by calendar
//! month. The first month starts on the creation day and the last month ends
//! on the target day. Any drift between the bucketed total and the amount to
//! save is absorbed by the final month.

use chrono::{DateTime, Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{PocketError, PocketResult};
use crate::models::recurrence::days_in_month;
use crate::models::Money;

/// Drift tolerated before the last month is corrected
const ROUNDING_TOLERANCE: f64 = 0.01;

/// Savings owed for one calendar month of the schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyGoal {
    pub year: i32,
    /// Zero-based month (January = 0)
    pub month: u32,
    /// Days of this month covered by the schedule
    pub days_in_month: u32,
    pub savings_goal: f64,
}

impl MonthlyGoal {
    /// Full English month name, e.g. "November"
    pub fn month_name(&self) -> &'static str {
        Month::try_from((self.month + 1) as u8)
            .map(|m| m.name())
            .unwrap_or("Unknown")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsSchedule {
    pub creation_date: NaiveDate,
    pub target_date: NaiveDate,
    pub total_days: i64,
    pub daily_savings: f64,
    pub monthly_goals: Vec<MonthlyGoal>,
    pub total_calculated_savings: f64,
    /// Target minus what was already saved
    pub remaining_amount: Money,
}

/// One installment of a goal's payment plan, rounded to cents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInstallment {
    /// Month name, e.g. "January"
    pub month: String,
    pub year: i32,
    pub days: u32,
    pub payment: Money,
    pub end_date: NaiveDate,
}

impl PaymentInstallment {
    /// Whether `date` falls in this installment's calendar month
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.end_date.year() == date.year() && self.end_date.month() == date.month()
    }
}

impl SavingsSchedule {
    /// Convert the monthly goals into cent-rounded installments
    ///
    /// Each goal is rounded to the nearest cent and the leftover cents are
    /// added to the final installment, so the payments sum to exactly
    /// `remaining_amount`.
    pub fn payment_schedule(&self) -> Vec<PaymentInstallment> {
        let mut installments: Vec<PaymentInstallment> = self
            .monthly_goals
            .iter()
            .map(|goal| {
                let month = goal.month + 1;
                let end_day = if goal.year == self.target_date.year()
                    && month == self.target_date.month()
                {
                    self.target_date.day()
                } else {
                    days_in_month(goal.year, month)
                };

                PaymentInstallment {
                    month: goal.month_name().to_string(),
                    year: goal.year,
                    days: goal.days_in_month,
                    payment: Money::from_f64(goal.savings_goal),
                    end_date: NaiveDate::from_ymd_opt(goal.year, month, end_day)
                        .unwrap_or(self.target_date),
                }
            })
            .collect();

        let scheduled: Money = installments.iter().map(|i| i.payment).sum();
        if let Some(last) = installments.last_mut() {
            last.payment += self.remaining_amount - scheduled;
        }

        installments
    }
}

/// Parse a schedule date given as `YYYY-MM-DD` or an RFC 3339 timestamp
pub fn parse_schedule_date(input: &str) -> PocketResult<NaiveDate> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.date_naive())
        .map_err(|_| PocketError::InvalidArgument(format!("Invalid date: '{}'", input)))
}

/// Compute the month-by-month savings plan for a goal
///
/// # Errors
///
/// Returns [`PocketError::InvalidArgument`] when `creation_date` is not
/// before `target_date`, `total_target` is not positive, or `current_saved`
/// is negative or already meets the target.
pub fn calculate_savings_schedule(
    creation_date: NaiveDate,
    target_date: NaiveDate,
    total_target: Money,
    current_saved: Money,
) -> PocketResult<SavingsSchedule> {
    if creation_date >= target_date {
        return Err(PocketError::InvalidArgument(format!(
            "Creation date {} must be before target date {}",
            creation_date, target_date
        )));
    }
    if !total_target.is_positive() {
        return Err(PocketError::InvalidArgument(format!(
            "Target amount must be positive, got {}",
            total_target
        )));
    }
    if current_saved.is_negative() || current_saved >= total_target {
        return Err(PocketError::InvalidArgument(format!(
            "Saved amount {} must be at least zero and below the target {}",
            current_saved, total_target
        )));
    }

    let total_days = (target_date - creation_date).num_days().max(1);
    let remaining_amount = total_target - current_saved;
    let remaining = remaining_amount.to_f64();
    let daily_savings = remaining / total_days as f64;

    let mut monthly_goals = Vec::new();
    let mut total_calculated_savings = 0.0;
    let mut cursor = creation_date;

    while cursor < target_date {
        let (year, month) = (cursor.year(), cursor.month());

        let start_day = if year == creation_date.year() && month == creation_date.month() {
            creation_date.day()
        } else {
            1
        };
        let end_day = if year == target_date.year() && month == target_date.month() {
            target_date.day()
        } else {
            days_in_month(year, month)
        };

        let days = (end_day as i64 - start_day as i64 + 1).max(0) as u32;
        if days > 0 {
            let savings_goal = days as f64 * daily_savings;
            monthly_goals.push(MonthlyGoal {
                year,
                month: month - 1,
                days_in_month: days,
                savings_goal,
            });
            total_calculated_savings += savings_goal;
        }

        cursor = match first_of_next_month(cursor) {
            Some(next) => next,
            None => break,
        };
    }

    let drift = remaining - total_calculated_savings;
    if drift.abs() > ROUNDING_TOLERANCE {
        if let Some(last) = monthly_goals.last_mut() {
            last.savings_goal += drift;
        }
        total_calculated_savings = remaining;
    }

    Ok(SavingsSchedule {
        creation_date,
        target_date,
        total_days,
        daily_savings,
        monthly_goals,
        total_calculated_savings,
        remaining_amount,
    })
}

fn first_of_next_month(date: NaiveDate) -> Option<NaiveDate> {
    if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn goal_sum(schedule: &SavingsSchedule) -> f64 {
        schedule.monthly_goals.iter().map(|g| g.savings_goal).sum()
    }

    #[test]
    fn test_november_to_march_example() {
        let schedule = calculate_savings_schedule(
            date(2025, 11, 20),
            date(2026, 3, 19),
            Money::from_dollars(1000),
            Money::zero(),
        )
        .unwrap();

        assert_eq!(schedule.total_days, 119);
        assert!((schedule.daily_savings - 8.403).abs() < 0.001);

        let months: Vec<(i32, u32, u32)> = schedule
            .monthly_goals
            .iter()
            .map(|g| (g.year, g.month, g.days_in_month))
            .collect();
        assert_eq!(
            months,
            vec![
                (2025, 10, 11),
                (2025, 11, 31),
                (2026, 0, 31),
                (2026, 1, 28),
                (2026, 2, 19),
            ]
        );

        assert!((goal_sum(&schedule) - 1000.0).abs() < 0.01);
        assert_eq!(schedule.total_calculated_savings, 1000.0);

        // The extra counted day is taken back from March only
        let march = &schedule.monthly_goals[4];
        assert!((march.savings_goal - 18.0 * schedule.daily_savings).abs() < 1e-9);
        let december = &schedule.monthly_goals[1];
        assert!((december.savings_goal - 31.0 * schedule.daily_savings).abs() < 1e-9);
    }

    #[test]
    fn test_sum_matches_remaining_across_ranges() {
        let cases = [
            (date(2026, 1, 15), date(2026, 3, 1), 500_00, 0),
            (date(2026, 1, 31), date(2026, 2, 1), 10_00, 0),
            (date(2026, 10, 5), date(2026, 10, 20), 300_00, 120_00),
            (date(2025, 12, 25), date(2027, 1, 3), 12_345_67, 1_00),
            (date(2024, 2, 28), date(2024, 3, 2), 99, 0),
        ];

        for (start, end, target, saved) in cases {
            let schedule = calculate_savings_schedule(
                start,
                end,
                Money::from_cents(target),
                Money::from_cents(saved),
            )
            .unwrap();
            let remaining = Money::from_cents(target - saved).to_f64();

            assert!(
                (goal_sum(&schedule) - remaining).abs() <= 0.01,
                "{} -> {}",
                start,
                end
            );

            let mut keys: Vec<(i32, u32)> = schedule
                .monthly_goals
                .iter()
                .map(|g| (g.year, g.month))
                .collect();
            assert!(schedule.monthly_goals.iter().all(|g| g.days_in_month > 0));
            let ordered = keys.clone();
            keys.sort();
            keys.dedup();
            assert_eq!(keys, ordered, "{} -> {}", start, end);
        }
    }

    #[test]
    fn test_target_on_first_of_month_excludes_that_month() {
        let schedule = calculate_savings_schedule(
            date(2026, 1, 15),
            date(2026, 3, 1),
            Money::from_dollars(450),
            Money::zero(),
        )
        .unwrap();

        assert_eq!(schedule.total_days, 45);
        assert_eq!(schedule.monthly_goals.len(), 2);
        assert_eq!(schedule.monthly_goals[0].days_in_month, 17);
        assert_eq!(schedule.monthly_goals[1].days_in_month, 28);
    }

    #[test]
    fn test_late_creation_day_does_not_skip_months() {
        // Creation day >= 20 with an early target day still covers every month
        let schedule = calculate_savings_schedule(
            date(2026, 1, 25),
            date(2026, 4, 5),
            Money::from_dollars(700),
            Money::zero(),
        )
        .unwrap();

        let months: Vec<u32> = schedule.monthly_goals.iter().map(|g| g.month).collect();
        assert_eq!(months, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_current_saved_reduces_remaining() {
        let schedule = calculate_savings_schedule(
            date(2026, 1, 1),
            date(2026, 1, 11),
            Money::from_dollars(100),
            Money::from_dollars(40),
        )
        .unwrap();

        assert_eq!(schedule.total_days, 10);
        assert!((schedule.daily_savings - 6.0).abs() < 1e-9);
        assert_eq!(schedule.remaining_amount, Money::from_dollars(60));
        assert!((goal_sum(&schedule) - 60.0).abs() < 0.01);
    }

    #[test]
    fn test_rejects_invalid_arguments() {
        let start = date(2026, 5, 1);
        let end = date(2026, 8, 1);
        let hundred = Money::from_dollars(100);

        let err = calculate_savings_schedule(end, start, hundred, Money::zero()).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(calculate_savings_schedule(start, start, hundred, Money::zero()).is_err());
        assert!(calculate_savings_schedule(start, end, Money::zero(), Money::zero()).is_err());
        assert!(
            calculate_savings_schedule(start, end, hundred, Money::from_cents(-1)).is_err()
        );
        assert!(calculate_savings_schedule(start, end, hundred, hundred).is_err());
    }

    #[test]
    fn test_parse_schedule_date() {
        assert_eq!(parse_schedule_date("2026-03-19").unwrap(), date(2026, 3, 19));
        assert_eq!(
            parse_schedule_date("2026-03-19T08:30:00Z").unwrap(),
            date(2026, 3, 19)
        );
        assert!(parse_schedule_date("19/03/2026").unwrap_err().is_invalid_argument());
        assert!(parse_schedule_date("2026-02-30").is_err());
    }

    #[test]
    fn test_payment_schedule_sums_exactly() {
        let schedule = calculate_savings_schedule(
            date(2025, 11, 20),
            date(2026, 3, 19),
            Money::from_dollars(1000),
            Money::zero(),
        )
        .unwrap();

        let installments = schedule.payment_schedule();
        assert_eq!(installments.len(), 5);

        let total: Money = installments.iter().map(|i| i.payment).sum();
        assert_eq!(total, Money::from_dollars(1000));

        assert_eq!(installments[0].month, "November");
        assert_eq!(installments[0].end_date, date(2025, 11, 30));
        assert_eq!(installments[1].payment, Money::from_cents(260_50));
        assert_eq!(installments[4].month, "March");
        assert_eq!(installments[4].end_date, date(2026, 3, 19));
        assert!(installments[4].covers(date(2026, 3, 1)));
        assert!(!installments[4].covers(date(2026, 4, 1)));
    }
}
