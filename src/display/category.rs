//! Spending category display formatting

use chrono::NaiveDate;

use crate::budget::BudgetState;
use crate::models::{CategoryGroup, CategoryStatus, SpendingCategory, Transaction};

use super::truncate;

/// Next due date from the category's recurrence, or "-" when unknown or past
fn next_due(category: &SpendingCategory, today: NaiveDate) -> String {
    category
        .recurrence()
        .and_then(|r| r.next_due(today))
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn format_category_row(category: &SpendingCategory, today: NaiveDate, symbol: &str) -> String {
    let status = match category.status {
        CategoryStatus::Remaining => {
            format!("{} left", category.status_amount.format_with_symbol(symbol))
        }
        CategoryStatus::Over => {
            format!("{} over", category.status_amount.format_with_symbol(symbol))
        }
    };
    let progress = category
        .progress()
        .map(|p| format!("{:.0}%", p.floor()))
        .unwrap_or_else(|| "-".to_string());

    format!(
        "  {:<20} {:>12} {:>12} {:>6}  {:<16} {:<18} {}\n",
        truncate(&category.name, 20),
        category.spent.format_with_symbol(symbol),
        category.target.format_with_symbol(symbol),
        progress,
        status,
        truncate(&category.date, 18),
        next_due(category, today)
    )
}

/// Format every spending category under its group heading
pub fn format_category_tree(state: &BudgetState, today: NaiveDate, symbol: &str) -> String {
    if state.spending_categories.is_empty() {
        return "No spending categories found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "  {:<20} {:>12} {:>12} {:>6}  {:<16} {:<18} {}\n",
        "Category", "Spent", "Target", "Used", "Status", "Due", "Next Due"
    ));

    for group in CategoryGroup::all() {
        let categories = state.spending_categories.group(*group);
        if categories.is_empty() {
            continue;
        }
        output.push_str(&format!("{}\n", group));
        for category in categories {
            output.push_str(&format_category_row(category, today, symbol));
        }
    }

    output
}

/// Details for one category plus its live (uncleared) transactions
pub fn format_category_details(
    category: &SpendingCategory,
    transactions: &[&Transaction],
    today: NaiveDate,
    symbol: &str,
) -> String {
    let mut output = String::new();
    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("  Group:     {}\n", category.group));
    output.push_str(&format!("  Due:       {}\n", category.date));
    output.push_str(&format!("  Next due:  {}\n", next_due(category, today)));
    output.push_str(&format!(
        "  Repeating: {}\n",
        if category.is_repeating { "Yes" } else { "No" }
    ));
    output.push_str(&format!(
        "  Target:    {}\n",
        category.target.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Spent:     {}\n",
        category.spent.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Status:    {} {}\n",
        category.status_amount.format_with_symbol(symbol),
        category.status
    ));

    if !transactions.is_empty() {
        output.push('\n');
        output.push_str("  Transactions:\n");
        for txn in transactions {
            output.push_str(&format!(
                "    {} {:<24} {:>12}\n",
                txn.date,
                truncate(&txn.name, 24),
                txn.amount.format_with_symbol(symbol)
            ));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_tree_groups_and_status() {
        let mut state = BudgetState::new();
        let mut dining = SpendingCategory::new(
            "Dining",
            CategoryGroup::Wants,
            Money::from_dollars(100),
            "Monthly on 1",
        );
        dining.record_spending(Money::from_dollars(120));
        state.spending_categories.wants.push(dining);
        state.spending_categories.bills.push(SpendingCategory::new(
            "Rent",
            CategoryGroup::Bills,
            Money::from_dollars(900),
            "Monthly on 1",
        ));
        state.spending_categories.non_monthly.push(SpendingCategory::new(
            "Passport",
            CategoryGroup::NonMonthly,
            Money::from_dollars(150),
            "01/02/2026",
        ));

        let output = format_category_tree(&state, date(2026, 10, 18), "$");
        let bills = output.find("Bills").unwrap();
        let wants = output.find("Wants").unwrap();
        assert!(bills < wants);
        assert!(!output.contains("Needs"));
        assert!(output.contains("$20.00 over"));
        assert!(output.contains("$900.00 left"));
        assert!(output.contains("120%"));
        assert!(output.contains("Next Due"));
        assert!(output.contains("2026-11-01"));
        let passport = output.lines().find(|l| l.contains("Passport")).unwrap();
        assert!(passport.trim_end().ends_with('-'));
    }

    #[test]
    fn test_details_lists_transactions() {
        let category = SpendingCategory::new(
            "Groceries",
            CategoryGroup::Needs,
            Money::from_dollars(300),
            "Weekly on Friday",
        );
        let txn = Transaction::expense(
            "Market",
            Money::from_dollars(45),
            "Groceries",
            "Checking",
            date(2026, 10, 9),
        );
        let output = format_category_details(&category, &[&txn], date(2026, 10, 18), "€");

        assert!(output.contains("Repeating: Yes"));
        assert!(output.contains("€300.00"));
        assert!(output.contains("2026-10-09 Market"));
        assert!(output.contains("-€45.00"));
        assert!(output.contains("Next due:  2026-10-23"));
    }
}
