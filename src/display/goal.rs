//! Savings goal and schedule display formatting

use chrono::NaiveDate;

use crate::budget::SavingsSchedule;
use crate::models::{Money, SavingsCategory};

use super::truncate;

fn percent(value: Option<f64>) -> String {
    value
        .map(|p| format!("{:.0}%", p.floor()))
        .unwrap_or_else(|| "-".to_string())
}

/// Format savings goals as a table
pub fn format_goal_list(goals: &[SavingsCategory], symbol: &str) -> String {
    if goals.is_empty() {
        return "No savings goals found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<20} {:>12} {:>12} {:>6} {:>12} {:>12}  {}\n",
        "Goal", "Saved", "Target", "Done", "This Month", "Monthly", "By"
    ));
    output.push_str(&"-".repeat(92));
    output.push('\n');

    for goal in goals {
        output.push_str(&format!(
            "{:<20} {:>12} {:>12} {:>6} {:>12} {:>12}  {}\n",
            truncate(&goal.name, 20),
            goal.general_saved.format_with_symbol(symbol),
            goal.general_target.format_with_symbol(symbol),
            percent(goal.general_progress()),
            goal.monthly_saved.format_with_symbol(symbol),
            goal.monthly_target.format_with_symbol(symbol),
            goal.target_date
        ));
    }

    output
}

/// Details for one goal with its payment plan
///
/// The installment covering `today` is marked with `>`.
pub fn format_goal_details(goal: &SavingsCategory, today: NaiveDate, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Goal: {}\n", goal.name));
    output.push_str(&format!(
        "  Saved:       {} of {} ({})\n",
        goal.general_saved.format_with_symbol(symbol),
        goal.general_target.format_with_symbol(symbol),
        percent(goal.general_progress())
    ));
    output.push_str(&format!(
        "  This month:  {} of {} ({})\n",
        goal.monthly_saved.format_with_symbol(symbol),
        goal.monthly_target.format_with_symbol(symbol),
        percent(goal.monthly_progress())
    ));
    output.push_str(&format!("  Target date: {}\n", goal.target_date));
    output.push_str(&format!("  Months:      {}\n", goal.number_of_months));
    if goal.is_complete() {
        output.push_str("  Goal reached\n");
    }

    if !goal.payment_schedule.is_empty() {
        let current = goal.installment_for(today);
        output.push('\n');
        output.push_str("  Payment plan:\n");
        for installment in &goal.payment_schedule {
            let marker = if current == Some(installment) { ">" } else { " " };
            output.push_str(&format!(
                "  {} {:<10} {:>4} {:>3} days {:>12}  (by {})\n",
                marker,
                installment.month,
                installment.year,
                installment.days,
                installment.payment.format_with_symbol(symbol),
                installment.end_date
            ));
        }
    }

    output
}

/// Format a calculated schedule month by month
pub fn format_schedule(schedule: &SavingsSchedule, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Saving {} from {} to {}\n",
        schedule.remaining_amount.format_with_symbol(symbol),
        schedule.creation_date,
        schedule.target_date
    ));
    output.push_str(&format!(
        "  {} days at {}{:.3} per day\n\n",
        schedule.total_days, symbol, schedule.daily_savings
    ));

    output.push_str(&format!(
        "  {:<10} {:>4} {:>5} {:>12}\n",
        "Month", "Year", "Days", "Goal"
    ));
    for goal in &schedule.monthly_goals {
        output.push_str(&format!(
            "  {:<10} {:>4} {:>5} {:>12}\n",
            goal.month_name(),
            goal.year,
            goal.days_in_month,
            Money::from_f64(goal.savings_goal).format_with_symbol(symbol)
        ));
    }
    output.push_str(&format!(
        "  {:<10} {:>4} {:>5} {:>12}\n",
        "Total",
        "",
        "",
        Money::from_f64(schedule.total_calculated_savings).format_with_symbol(symbol)
    ));

    output
}
