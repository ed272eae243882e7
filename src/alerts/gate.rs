//! The alert gate
//!
//! Turns reducer effects and post-dispatch state into user notifications,
//! consulting the ledger so each category alerts at most once per month.
//! Ledger and notifier failures are logged and never reach the caller.

use chrono::NaiveDate;
use tracing::{debug, warn};

use super::ledger::AlertLedger;
use super::notifier::Notifier;
use crate::budget::reducer::ALERT_THRESHOLD_PERCENT;
use crate::budget::{BudgetState, Effect};
use crate::error::PocketResult;
use crate::storage::KeyValueStore;

pub const BUDGET_ALERT_TITLE: &str = "Budget Alert";
pub const NEW_TRANSACTION_TITLE: &str = "New Transaction";
pub const TRANSACTION_UPDATED_TITLE: &str = "Transaction Updated";

pub struct AlertGate<S, N> {
    ledger: AlertLedger<S>,
    notifier: N,
}

impl<S: KeyValueStore, N: Notifier> AlertGate<S, N> {
    pub fn new(store: S, notifier: N) -> Self {
        Self {
            ledger: AlertLedger::new(store),
            notifier,
        }
    }

    pub fn ledger(&self) -> &AlertLedger<S> {
        &self.ledger
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Run one side effect requested by the reducer
    pub fn apply(&self, effect: &Effect) {
        if let Err(e) = self.try_apply(effect) {
            warn!(error = %e, ?effect, "alert side effect failed");
        }
    }

    fn try_apply(&self, effect: &Effect) -> PocketResult<()> {
        match effect {
            Effect::TransactionAdded { name, amount } => {
                if self.ledger.transaction_alerts_enabled()? {
                    self.notifier.show_immediate_notification(
                        NEW_TRANSACTION_TITLE,
                        &format!("{}: {}", name, amount),
                    )?;
                }
            }
            Effect::TransactionUpdated { name, amount } => {
                if self.ledger.transaction_alerts_enabled()? {
                    self.notifier.show_immediate_notification(
                        TRANSACTION_UPDATED_TITLE,
                        &format!("{}: {}", name, amount),
                    )?;
                }
            }
            Effect::BudgetThreshold { category, progress } => {
                if !self.ledger.budget_alerts_enabled()? {
                    return Ok(());
                }
                if self.ledger.is_triggered(category)? {
                    debug!(category = %category, "budget alert already sent this month");
                    return Ok(());
                }
                self.notifier.show_immediate_notification(
                    BUDGET_ALERT_TITLE,
                    &format!(
                        "You've used {:.0}% of your {} budget",
                        progress.floor(),
                        category
                    ),
                )?;
                self.ledger.mark_triggered([category.as_str()])?;
            }
            Effect::ResetBudgetAlert { category } => {
                self.ledger.clear_triggered(category)?;
            }
        }
        Ok(())
    }

    /// Sweep every category for untriggered alerts
    ///
    /// Categories with a positive target whose progress is at least the
    /// threshold but still under 100% each contribute one message. All of
    /// them go out in a single notification. Returns the messages found,
    /// whether or not budget alerts are enabled.
    pub fn check_budget_alerts(&self, state: &BudgetState) -> Vec<String> {
        match self.try_check_budget_alerts(state) {
            Ok(messages) => messages,
            Err(e) => {
                warn!(error = %e, "budget alert sweep failed");
                Vec::new()
            }
        }
    }

    fn try_check_budget_alerts(&self, state: &BudgetState) -> PocketResult<Vec<String>> {
        let triggered = self.ledger.triggered()?;

        let mut names = Vec::new();
        let mut messages = Vec::new();
        for category in state.spending_categories.iter() {
            let Some(progress) = category.progress() else {
                continue;
            };
            if !(ALERT_THRESHOLD_PERCENT..100.0).contains(&progress) {
                continue;
            }
            if triggered.contains(&category.name) {
                continue;
            }
            messages.push(format!(
                "{} is at {:.0}% of its budget",
                category.name,
                progress.floor()
            ));
            names.push(category.name.clone());
        }

        if !messages.is_empty() && self.ledger.budget_alerts_enabled()? {
            self.notifier
                .show_immediate_notification(BUDGET_ALERT_TITLE, &messages.join("\n"))?;
            self.ledger.mark_triggered(names)?;
        }
        Ok(messages)
    }

    /// Clear the triggered set when `today` is in a new month
    ///
    /// Returns true if a reset happened.
    pub fn reset_if_new_month(&self, today: NaiveDate) -> bool {
        let result = self.ledger.needs_reset(today).and_then(|needed| {
            if needed {
                self.ledger.clear_all()?;
                self.ledger.set_last_reset(today)?;
            }
            Ok(needed)
        });

        match result {
            Ok(true) => {
                debug!(%today, "cleared budget alerts for new month");
                true
            }
            Ok(false) => false,
            Err(e) => {
                warn!(error = %e, "monthly budget alert reset failed");
                false
            }
        }
    }
}
