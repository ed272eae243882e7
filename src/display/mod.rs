//! Display formatting for terminal output
//!
//! Plain-text tables and detail views. Every formatter takes the currency
//! symbol from the user's settings.

pub mod account;
pub mod category;
pub mod goal;
pub mod transaction;

pub use account::format_account_list;
pub use category::{format_category_details, format_category_tree};
pub use goal::{format_goal_details, format_goal_list, format_schedule};
pub use transaction::format_transaction_register;

/// Shorten `s` to `max` characters, ending with "..." when cut
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max <= 3 {
        s.chars().take(max).collect()
    } else {
        let kept: String = s.chars().take(max - 3).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Groceries", 20), "Groceries");
        assert_eq!(truncate("Transfer to Checking Account", 12), "Transfer ...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }
}
