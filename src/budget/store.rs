//! The budget store
//!
//! Owns the current [`BudgetState`] and routes every change through the
//! reducer, then through the alert gate.

use chrono::{Local, NaiveDate};
use tracing::debug;

use super::action::Action;
use super::reducer::{reduce, Transition};
use super::state::BudgetState;
use crate::alerts::{AlertGate, Notifier};
use crate::error::{PocketError, PocketResult};
use crate::models::{
    GoalId, Money, SavingsCategory, SavingsCategoryUpdate, Transaction, TransactionId,
};
use crate::storage::KeyValueStore;

pub struct BudgetStore<S, N> {
    state: BudgetState,
    gate: AlertGate<S, N>,
}

impl<S: KeyValueStore, N: Notifier> BudgetStore<S, N> {
    /// Wrap `state`, clearing last month's alert bookkeeping if needed
    pub fn open(state: BudgetState, gate: AlertGate<S, N>, today: NaiveDate) -> Self {
        gate.reset_if_new_month(today);
        Self { state, gate }
    }

    pub fn state(&self) -> &BudgetState {
        &self.state
    }

    pub fn gate(&self) -> &AlertGate<S, N> {
        &self.gate
    }

    pub fn into_state(self) -> BudgetState {
        self.state
    }

    /// Dispatch with the local calendar date as "today"
    pub fn dispatch(&mut self, action: Action) -> &BudgetState {
        self.dispatch_on(action, Local::now().date_naive())
    }

    pub fn dispatch_on(&mut self, action: Action, today: NaiveDate) -> &BudgetState {
        debug!(action = action.kind(), %today, "dispatch");

        let Transition { state, effects } = reduce(&self.state, action, today);
        self.state = state;

        for effect in &effects {
            self.gate.apply(effect);
        }
        self.gate.check_budget_alerts(&self.state);

        &self.state
    }

    /// Create a savings goal whose payment plan starts on `today`
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the name is already used by a category or
    /// goal, and the calculator's `InvalidArgument` errors for bad amounts
    /// or dates.
    pub fn add_savings_goal(
        &mut self,
        name: &str,
        target: Money,
        saved: Money,
        target_date: NaiveDate,
        today: NaiveDate,
    ) -> PocketResult<GoalId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PocketError::Validation(
                "Savings goal name cannot be empty".into(),
            ));
        }
        if self.state.is_category_name_taken(name) {
            return Err(PocketError::Validation(format!(
                "A category or goal named '{}' already exists",
                name
            )));
        }

        let goal = SavingsCategory::new(name, target, saved, today, target_date)?;
        let id = goal.id;
        self.dispatch_on(Action::AddSavingsCategory { category: goal }, today);
        Ok(id)
    }

    /// Move `amount` into a goal, held in `account`
    ///
    /// Records the contribution as income dated `date` and filed under the
    /// goal's name, then bumps the goal's lifetime and monthly progress.
    pub fn contribute_to_goal(
        &mut self,
        goal_id: GoalId,
        account: &str,
        amount: Money,
        date: NaiveDate,
        today: NaiveDate,
    ) -> PocketResult<TransactionId> {
        if !amount.is_positive() {
            return Err(PocketError::InvalidArgument(format!(
                "Contribution must be positive, got {}",
                amount
            )));
        }
        let goal = self
            .state
            .goal(goal_id)
            .cloned()
            .ok_or_else(|| PocketError::goal_not_found(goal_id.to_string()))?;
        if self.state.account_by_name(account).is_none() {
            return Err(PocketError::account_not_found(account));
        }

        let transaction = Transaction::income(
            format!("{} contribution", goal.name),
            amount,
            goal.name.clone(),
            account,
            date,
        );
        let id = transaction.id;

        self.dispatch_on(Action::AddTransaction { transaction }, today);
        self.dispatch_on(
            Action::UpdateSavingsCategory {
                id: goal_id,
                updates: SavingsCategoryUpdate::contribution(&goal, amount),
            },
            today,
        );
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::gate::BUDGET_ALERT_TITLE;
    use crate::alerts::MemoryNotifier;
    use crate::models::{Account, AccountType, CategoryGroup, SpendingCategory, TransactionUpdate};
    use crate::storage::MemoryStore;
    use chrono::Duration;

    type TestStore = BudgetStore<MemoryStore, MemoryNotifier>;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn open(state: BudgetState, today: NaiveDate) -> TestStore {
        let gate = AlertGate::new(MemoryStore::new(), MemoryNotifier::new());
        BudgetStore::open(state, gate, today)
    }

    fn starter_state() -> BudgetState {
        let mut state = BudgetState::new();
        state.accounts.push(Account::with_balance(
            "Checking",
            AccountType::Checking,
            Money::from_dollars(1000),
        ));
        state.accounts.push(Account::with_balance(
            "Savings",
            AccountType::Savings,
            Money::from_dollars(2000),
        ));
        let mut groceries = SpendingCategory::new(
            "Groceries",
            CategoryGroup::Needs,
            Money::from_dollars(100),
            "Monthly on 1",
        );
        groceries.record_spending(Money::from_cents(8_990));
        state.spending_categories.needs.push(groceries);
        state
    }

    fn budget_alerts(store: &TestStore) -> usize {
        store
            .gate()
            .notifier()
            .sent()
            .iter()
            .filter(|n| n.title == BUDGET_ALERT_TITLE)
            .count()
    }

    #[test]
    fn test_open_stamps_monthly_reset() {
        let today = date(2026, 10, 18);
        let store = open(BudgetState::new(), today);
        assert_eq!(store.gate().ledger().last_reset().unwrap(), Some(today));
    }

    #[test]
    fn test_crossing_threshold_alerts_once_per_month() {
        let today = date(2026, 10, 18);
        let mut store = open(starter_state(), today);

        store.dispatch_on(
            Action::AddTransaction {
                transaction: Transaction::expense("Snacks", Money::from_cents(110), "Groceries", "Checking", today),
            },
            today,
        );
        assert_eq!(budget_alerts(&store), 1);

        store.dispatch_on(
            Action::AddTransaction {
                transaction: Transaction::expense("Milk", Money::from_cents(300), "Groceries", "Checking", today),
            },
            today,
        );
        assert_eq!(budget_alerts(&store), 1);
        assert_eq!(
            store.state().spending_category("Groceries").unwrap().spent,
            Money::from_cents(9_400)
        );
    }

    #[test]
    fn test_new_month_rearms_alerts() {
        let october = date(2026, 10, 18);
        let mut store = open(starter_state(), october);
        store.dispatch_on(
            Action::AddTransaction {
                transaction: Transaction::expense("Snacks", Money::from_cents(110), "Groceries", "Checking", october),
            },
            october,
        );
        assert!(store.gate().ledger().is_triggered("Groceries").unwrap());

        let state = store.into_state();
        let gate = AlertGate::new(MemoryStore::new(), MemoryNotifier::new());
        gate.ledger().mark_triggered(["Groceries"]).unwrap();
        gate.ledger().set_last_reset(october).unwrap();

        let reopened = BudgetStore::open(state, gate, date(2026, 11, 2));
        assert!(!reopened.gate().ledger().is_triggered("Groceries").unwrap());
    }

    #[test]
    fn test_sweep_catches_category_already_near_limit() {
        let today = date(2026, 10, 18);
        let mut state = starter_state();
        let mut dining = SpendingCategory::new(
            "Dining",
            CategoryGroup::Wants,
            Money::from_dollars(50),
            "Monthly on 1",
        );
        dining.record_spending(Money::from_dollars(46));
        state.spending_categories.wants.push(dining);

        let mut store = open(state, today);
        store.dispatch_on(
            Action::DeleteSpendingCategory {
                category_name: "Nothing".into(),
            },
            today,
        );

        let sent = store.gate().notifier().sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].body, "Dining is at 92% of its budget");
    }

    #[test]
    fn test_update_crossing_threshold_alerts_once() {
        let today = date(2026, 10, 18);
        let mut state = starter_state();
        state
            .spending_categories
            .find_by_name_mut("Groceries")
            .unwrap()
            .reverse_spending(Money::from_cents(8_990));
        let mut store = open(state, today);

        let txn = Transaction::expense("Market", Money::from_dollars(50), "Groceries", "Checking", today);
        let id = txn.id;
        store.dispatch_on(Action::AddTransaction { transaction: txn }, today);
        assert_eq!(budget_alerts(&store), 0);

        for dollars in [95, 96] {
            store.dispatch_on(
                Action::UpdateTransaction {
                    transaction_id: id,
                    updates: TransactionUpdate {
                        amount: Some(Money::from_dollars(-dollars)),
                        ..TransactionUpdate::default()
                    },
                },
                today,
            );
        }

        assert_eq!(budget_alerts(&store), 1);
        let sent = store.gate().notifier().sent();
        let alert = sent.iter().find(|n| n.title == BUDGET_ALERT_TITLE).unwrap();
        assert_eq!(alert.body, "You've used 95% of your Groceries budget");
    }

    #[test]
    fn test_goal_contributions_and_refund_restore_balances() {
        let today = date(2026, 10, 18);
        let mut store = open(starter_state(), today);

        let goal = store
            .add_savings_goal(
                "Vacation",
                Money::from_dollars(1000),
                Money::zero(),
                today + Duration::days(200),
                today,
            )
            .unwrap();

        store.contribute_to_goal(goal, "Checking", Money::from_dollars(100), today, today).unwrap();
        store.contribute_to_goal(goal, "Checking", Money::from_dollars(50), today, today).unwrap();
        store.contribute_to_goal(goal, "Savings", Money::from_dollars(50), today, today).unwrap();
        let created = store.state().goal(goal).unwrap();
        assert_eq!(created.payment_schedule[0].month, "October");

        let saved = store.state().goal(goal).unwrap();
        assert_eq!(saved.general_saved, Money::from_dollars(200));
        assert_eq!(saved.monthly_saved, Money::from_dollars(200));
        assert_eq!(
            store.state().account_by_name("Checking").unwrap().balance,
            Money::from_dollars(1150)
        );

        store.dispatch_on(Action::DeleteSavingsCategory { id: goal }, today);

        assert!(store.state().goal(goal).is_none());
        assert_eq!(
            store.state().account_by_name("Checking").unwrap().balance,
            Money::from_dollars(1000)
        );
        assert_eq!(
            store.state().account_by_name("Savings").unwrap().balance,
            Money::from_dollars(2000)
        );
    }

    #[test]
    fn test_add_savings_goal_rejects_taken_name() {
        let today = date(2026, 10, 18);
        let mut store = open(starter_state(), today);

        let err = store
            .add_savings_goal(
                "Groceries",
                Money::from_dollars(500),
                Money::zero(),
                today + Duration::days(90),
                today,
            )
            .unwrap_err();
        assert!(matches!(err, PocketError::Validation(_)));

        let err = store
            .add_savings_goal("Trip", Money::from_dollars(500), Money::zero(), today, today)
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_contribute_validates_inputs() {
        let today = date(2026, 10, 18);
        let mut store = open(starter_state(), today);
        let goal = store
            .add_savings_goal(
                "Laptop",
                Money::from_dollars(1500),
                Money::zero(),
                today + Duration::days(120),
                today,
            )
            .unwrap();

        assert!(store
            .contribute_to_goal(goal, "Brokerage", Money::from_dollars(10), today, today)
            .unwrap_err()
            .is_not_found());
        assert!(store
            .contribute_to_goal(goal, "Checking", Money::zero(), today, today)
            .unwrap_err()
            .is_invalid_argument());
        assert!(store
            .contribute_to_goal(GoalId::new(), "Checking", Money::from_dollars(10), today, today)
            .unwrap_err()
            .is_not_found());
    }
}
