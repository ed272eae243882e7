//! Transaction display formatting

use crate::models::Transaction;

use super::truncate;

/// Format a single transaction as a register row
pub fn format_transaction_row(txn: &Transaction, date_format: &str, symbol: &str) -> String {
    let cleared = if txn.cleared_for_category.is_some() {
        "✓"
    } else {
        " "
    };

    format!(
        "{} {:<12} {:<12} {:<24} {:<16} {:<12} {:>12}",
        cleared,
        txn.id,
        txn.date.format(date_format),
        truncate(&txn.name, 24),
        truncate(&txn.category, 16),
        truncate(&txn.account, 12),
        txn.amount.format_with_symbol(symbol)
    )
}

/// Format transactions as a register, newest first as given
pub fn format_transaction_register(
    transactions: &[&Transaction],
    date_format: &str,
    symbol: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{} {:<12} {:<12} {:<24} {:<16} {:<12} {:>12}\n",
        " ", "ID", "Date", "Name", "Category", "Account", "Amount"
    ));
    output.push_str(&"-".repeat(96));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, date_format, symbol));
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    #[test]
    fn test_register() {
        let txn = Transaction::expense(
            "Weekly groceries at the market",
            Money::from_cents(8_250),
            "Groceries",
            "Checking",
            NaiveDate::from_ymd_opt(2026, 10, 3).unwrap(),
        );
        let output = format_transaction_register(&[&txn], "%d/%m/%Y", "$");

        assert!(output.contains("03/10/2026"));
        assert!(output.contains("Weekly groceries at t..."));
        assert!(output.contains("-$82.50"));
        assert!(output.contains(&txn.id.to_string()));
    }

    #[test]
    fn test_empty_register() {
        assert_eq!(
            format_transaction_register(&[], "%Y-%m-%d", "$"),
            "No transactions found.\n"
        );
    }
}
