//! The budget reducer
//!
//! `reduce` maps a state and an action to a replacement state plus the side
//! effects the caller should run. It never touches storage or notifications,
//! and an action that references a missing entity leaves the state unchanged.
//!
//! Balances are kept in step with the ledger: adding, editing or deleting a
//! transaction applies or reverses its effect on the named account (both
//! accounts for transfers). Spending totals only track expenses dated in the
//! month of `today`.

use chrono::NaiveDate;
use tracing::debug;

use super::action::{Action, Effect};
use super::state::BudgetState;
use crate::models::{
    Account, AccountType, CategoryGroup, Money, Recurrence, SpendingCategory,
    SpendingCategoryUpdate, Transaction, TransactionId, TransactionType, REFUND_CATEGORY,
};

/// Percent of target at which a category raises a budget alert
pub const ALERT_THRESHOLD_PERCENT: f64 = 90.0;

/// Result of reducing one action
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: BudgetState,
    pub effects: Vec<Effect>,
}

/// Compute the state that follows `action`
///
/// `today` decides which expenses count toward the current month and dates
/// any synthesized refunds.
pub fn reduce(state: &BudgetState, action: Action, today: NaiveDate) -> Transition {
    let kind = action.kind();
    let mut next = state.clone();
    let mut effects = Vec::new();

    let applied = match action {
        Action::AddSpendingCategory {
            group,
            mut category,
        } => {
            category.group = group;
            next.spending_categories.group_mut(group).push(category);
            true
        }

        Action::UpdateSpendingCategory { group, id, updates } => {
            match next
                .spending_categories
                .group_mut(group)
                .iter_mut()
                .find(|c| c.id == id)
            {
                Some(category) => {
                    updates.apply_to(category);
                    if updates.target.is_some() {
                        effects.push(Effect::ResetBudgetAlert {
                            category: category.name.clone(),
                        });
                    }
                    true
                }
                None => false,
            }
        }

        Action::MoveSpendingCategory {
            category_name,
            from_group,
            to_group,
            updates,
        } => move_spending_category(&mut next, &category_name, from_group, to_group, &updates),

        Action::DeleteSpendingCategory { category_name } => {
            let mut removed = false;
            for group in CategoryGroup::all() {
                let categories = next.spending_categories.group_mut(*group);
                if let Some(index) = categories.iter().position(|c| c.name == category_name) {
                    categories.remove(index);
                    removed = true;
                    break;
                }
            }
            removed
        }

        Action::AddSavingsCategory { category } => {
            next.savings_categories.goals.push(category);
            true
        }

        Action::UpdateSavingsCategory { id, updates } => {
            match next.savings_categories.goals.iter_mut().find(|g| g.id == id) {
                Some(goal) => {
                    updates.apply_to(goal);
                    true
                }
                None => false,
            }
        }

        Action::DeleteSavingsCategory { id } => match next.goal(id).cloned() {
            Some(goal) => {
                refund_goal_contributions(&mut next, &goal.name, today);
                next.savings_categories.goals.retain(|g| g.id != id);
                true
            }
            None => false,
        },

        Action::SpendSavingsCategory { id } => match next.goal(id).cloned() {
            Some(goal) => {
                let mut category = SpendingCategory::new(
                    goal.name.clone(),
                    CategoryGroup::NonMonthly,
                    goal.general_target,
                    Recurrence::day_of_year_descriptor(goal.target_date),
                );
                category.is_repeating = false;
                next.spending_categories.non_monthly.push(category);

                next.accounts.push(Account::with_balance(
                    goal.fund_account_name(),
                    AccountType::Savings,
                    goal.general_saved,
                ));
                next.savings_categories.goals.retain(|g| g.id != id);
                true
            }
            None => false,
        },

        Action::AddTransaction { transaction } => {
            apply_balance(&mut next, &transaction, Direction::Apply);
            effects.push(Effect::TransactionAdded {
                name: transaction.name.clone(),
                amount: transaction.amount,
            });
            if let Some(effect) = apply_category_spending(&mut next, &transaction, today) {
                effects.push(effect);
            }
            next.transactions.push(transaction);
            true
        }

        Action::UpdateTransaction {
            transaction_id,
            updates,
        } => update_transaction(
            &mut next,
            transaction_id,
            |t| updates.apply_to(t),
            today,
            &mut effects,
        ),

        Action::DeleteTransaction { transaction_id } => {
            match next.transactions.iter().position(|t| t.id == transaction_id) {
                Some(index) => {
                    let removed = next.transactions.remove(index);
                    apply_balance(&mut next, &removed, Direction::Reverse);
                    reverse_category_spending(&mut next, &removed, today);
                    true
                }
                None => false,
            }
        }

        Action::AddAccount { account } => {
            next.accounts.push(account);
            true
        }

        Action::UpdateAccount {
            account_id,
            updates,
        } => {
            let renamed = next
                .accounts
                .iter_mut()
                .find(|a| a.id == account_id)
                .map(|account| {
                    let old_name = account.name.clone();
                    updates.apply_to(account);
                    (old_name, account.name.clone())
                });
            if let Some((old_name, new_name)) = &renamed {
                if old_name != new_name {
                    rename_account_references(&mut next, old_name, new_name);
                }
            }
            renamed.is_some()
        }

        Action::DeleteAccount { account_id } => match next.account(account_id).cloned() {
            Some(account) => {
                next.accounts.retain(|a| a.id != account_id);
                next.transactions.retain(|t| t.account != account.name);
                true
            }
            None => false,
        },

        Action::MarkCategoryTransactionsCleared { category_name } => {
            for transaction in next
                .transactions
                .iter_mut()
                .filter(|t| t.category == category_name)
            {
                transaction.cleared_for_category = Some(category_name.clone());
            }
            true
        }
    };

    if !applied {
        debug!(action = kind, "no matching entity, state unchanged");
    }

    Transition {
        state: next,
        effects,
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Apply,
    Reverse,
}

/// Add (or take back) a transaction's effect on account balances
fn apply_balance(state: &mut BudgetState, transaction: &Transaction, direction: Direction) {
    let delta = match direction {
        Direction::Apply => transaction.balance_delta(),
        Direction::Reverse => -transaction.balance_delta(),
    };

    if let Some(account) = state.account_by_name_mut(&transaction.account) {
        account.balance += delta;
    }
    if let Some(leg) = transaction.transfer_leg() {
        if let Some(counterpart) = state.account_by_name_mut(leg.counterpart) {
            counterpart.balance -= delta;
        }
    }
}

fn counts_toward_month(transaction: &Transaction, today: NaiveDate) -> bool {
    transaction.is_expense() && transaction.is_in_month_of(today)
}

/// Record a current-month expense against its category
///
/// Returns a threshold effect when the category ends up at or past the
/// alert threshold.
fn apply_category_spending(
    state: &mut BudgetState,
    transaction: &Transaction,
    today: NaiveDate,
) -> Option<Effect> {
    if !counts_toward_month(transaction, today) {
        return None;
    }
    let category = state
        .spending_categories
        .find_by_name_mut(&transaction.category)?;
    category.record_spending(transaction.amount);

    let progress = category.progress()?;
    (progress >= ALERT_THRESHOLD_PERCENT).then(|| Effect::BudgetThreshold {
        category: category.name.clone(),
        progress,
    })
}

fn reverse_category_spending(state: &mut BudgetState, transaction: &Transaction, today: NaiveDate) {
    if !counts_toward_month(transaction, today) {
        return;
    }
    if let Some(category) = state
        .spending_categories
        .find_by_name_mut(&transaction.category)
    {
        category.reverse_spending(transaction.amount);
    }
}

fn update_transaction(
    state: &mut BudgetState,
    id: TransactionId,
    apply: impl FnOnce(&mut Transaction),
    today: NaiveDate,
    effects: &mut Vec<Effect>,
) -> bool {
    let Some(index) = state.transactions.iter().position(|t| t.id == id) else {
        return false;
    };

    let original = state.transactions[index].clone();
    let mut updated = original.clone();
    apply(&mut updated);

    let spending_changed = original.amount != updated.amount
        || original.category != updated.category
        || original.transaction_type != updated.transaction_type;
    if spending_changed {
        reverse_category_spending(state, &original, today);
        if let Some(effect) = apply_category_spending(state, &updated, today) {
            effects.push(effect);
        }
    }

    let balance_changed =
        spending_changed || original.account != updated.account || original.name != updated.name;
    if balance_changed {
        apply_balance(state, &original, Direction::Reverse);
        apply_balance(state, &updated, Direction::Apply);
    }

    if original.name != updated.name || original.amount != updated.amount {
        effects.push(Effect::TransactionUpdated {
            name: updated.name.clone(),
            amount: updated.amount,
        });
    }

    state.transactions[index] = updated;
    true
}

fn move_spending_category(
    state: &mut BudgetState,
    name: &str,
    from: CategoryGroup,
    to: CategoryGroup,
    updates: &SpendingCategoryUpdate,
) -> bool {
    let source = state.spending_categories.group_mut(from);
    let Some(index) = source.iter().position(|c| c.name == name) else {
        return false;
    };

    let mut category = source.remove(index);
    updates.apply_to(&mut category);
    category.group = to;
    state.spending_categories.group_mut(to).push(category);
    true
}

/// Give back everything contributed to a goal, one refund per account
///
/// Accounts are refunded in the order their first contribution appears.
fn refund_goal_contributions(state: &mut BudgetState, goal_name: &str, today: NaiveDate) {
    let mut totals: Vec<(String, Money)> = Vec::new();
    for transaction in state.transactions.iter().filter(|t| t.category == goal_name) {
        match totals.iter_mut().find(|(account, _)| *account == transaction.account) {
            Some((_, total)) => *total += transaction.amount,
            None => totals.push((transaction.account.clone(), transaction.amount)),
        }
    }

    for (account, total) in totals {
        let transaction_type = if total.is_positive() {
            TransactionType::Expense
        } else {
            TransactionType::Income
        };
        state.transactions.push(Transaction {
            id: TransactionId::new(),
            name: format!("Refund: {}", goal_name),
            amount: -total,
            category: REFUND_CATEGORY.to_string(),
            transaction_type,
            date: today,
            account: account.clone(),
            cleared_for_category: None,
        });

        if let Some(refunded) = state.account_by_name_mut(&account) {
            refunded.balance -= total;
        }
    }
}

fn rename_account_references(state: &mut BudgetState, old: &str, new: &str) {
    for transaction in state.transactions.iter_mut() {
        if transaction.account == old {
            transaction.account = new.to_string();
        }
        transaction.rename_transfer_counterpart(old, new);
    }
}
