//! Account display formatting

use crate::models::{Account, Money};

/// Format accounts as a table with a total row
pub fn format_account_list(accounts: &[Account], symbol: &str) -> String {
    if accounts.is_empty() {
        return "No accounts found.\n".to_string();
    }

    let name_width = accounts
        .iter()
        .map(|a| a.name.len())
        .max()
        .unwrap_or(4)
        .max(5);

    let type_width = accounts
        .iter()
        .map(|a| a.account_type.to_string().len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<type_width$}  {:>12}\n",
        "Name",
        "Type",
        "Balance",
        name_width = name_width,
        type_width = type_width,
    ));

    let separator = format!(
        "{:-<name_width$}  {:-<type_width$}  {:->12}\n",
        "",
        "",
        "",
        name_width = name_width,
        type_width = type_width,
    );
    output.push_str(&separator);

    for account in accounts {
        output.push_str(&format!(
            "{:<name_width$}  {:<type_width$}  {:>12}\n",
            account.name,
            account.account_type,
            account.balance.format_with_symbol(symbol),
            name_width = name_width,
            type_width = type_width,
        ));
    }

    let total: Money = accounts.iter().map(|a| a.balance).sum();
    output.push_str(&separator);
    output.push_str(&format!(
        "{:<name_width$}  {:<type_width$}  {:>12}\n",
        "TOTAL",
        "",
        total.format_with_symbol(symbol),
        name_width = name_width,
        type_width = type_width,
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountType;

    #[test]
    fn test_empty_list() {
        assert_eq!(format_account_list(&[], "$"), "No accounts found.\n");
    }

    #[test]
    fn test_list_with_total() {
        let accounts = vec![
            Account::with_balance("Checking", AccountType::Checking, Money::from_cents(125_050)),
            Account::with_balance("Visa", AccountType::CreditCard, Money::from_dollars(-300)),
        ];
        let output = format_account_list(&accounts, "$");

        assert!(output.contains("Checking"));
        assert!(output.contains("Credit Card"));
        assert!(output.contains("$1250.50"));
        assert!(output.contains("-$300.00"));
        assert!(output.lines().last().unwrap().contains("$950.50"));
    }
}
