//! Persisted alert bookkeeping
//!
//! Wraps a [`KeyValueStore`] with typed access to the four alert keys.

use chrono::{Datelike, NaiveDate, NaiveTime, TimeZone, Utc};
use serde_json::Value;

use crate::budget::schedule::parse_schedule_date;
use crate::error::PocketResult;
use crate::storage::KeyValueStore;

/// Category names that already raised a threshold alert this month
pub const TRIGGERED_BUDGET_ALERTS_KEY: &str = "triggeredBudgetAlerts";
/// When the triggered set was last cleared (RFC 3339)
pub const LAST_BUDGET_ALERT_RESET_KEY: &str = "lastBudgetAlertReset";
pub const BUDGET_ALERTS_KEY: &str = "budgetAlerts";
pub const TRANSACTION_ALERTS_KEY: &str = "transactionAlerts";

pub struct AlertLedger<S> {
    store: S,
}

impl<S: KeyValueStore> AlertLedger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Names in the triggered set; a missing or malformed entry reads as empty
    pub fn triggered(&self) -> PocketResult<Vec<String>> {
        Ok(match self.store.get(TRIGGERED_BUDGET_ALERTS_KEY)? {
            Some(value) => serde_json::from_value(value).unwrap_or_default(),
            None => Vec::new(),
        })
    }

    pub fn is_triggered(&self, category: &str) -> PocketResult<bool> {
        Ok(self.triggered()?.iter().any(|name| name == category))
    }

    /// Add names to the triggered set, skipping ones already present
    pub fn mark_triggered<I, T>(&self, categories: I) -> PocketResult<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut triggered = self.triggered()?;
        for category in categories {
            let category = category.into();
            if !triggered.contains(&category) {
                triggered.push(category);
            }
        }
        self.store
            .set(TRIGGERED_BUDGET_ALERTS_KEY, Value::from(triggered))
    }

    pub fn clear_triggered(&self, category: &str) -> PocketResult<()> {
        let mut triggered = self.triggered()?;
        let before = triggered.len();
        triggered.retain(|name| name != category);
        if triggered.len() == before {
            return Ok(());
        }
        self.store
            .set(TRIGGERED_BUDGET_ALERTS_KEY, Value::from(triggered))
    }

    pub fn clear_all(&self) -> PocketResult<()> {
        self.store
            .set(TRIGGERED_BUDGET_ALERTS_KEY, Value::Array(Vec::new()))
    }

    /// Date of the last monthly reset, `None` if never reset or unreadable
    pub fn last_reset(&self) -> PocketResult<Option<NaiveDate>> {
        Ok(self
            .store
            .get(LAST_BUDGET_ALERT_RESET_KEY)?
            .and_then(|value| value.as_str().map(str::to_owned))
            .and_then(|raw| parse_schedule_date(&raw).ok()))
    }

    pub fn set_last_reset(&self, date: NaiveDate) -> PocketResult<()> {
        let stamp = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)).to_rfc3339();
        self.store
            .set(LAST_BUDGET_ALERT_RESET_KEY, Value::String(stamp))
    }

    /// True when the last reset happened in a different month than `today`
    pub fn needs_reset(&self, today: NaiveDate) -> PocketResult<bool> {
        Ok(match self.last_reset()? {
            Some(last) => last.year() != today.year() || last.month() != today.month(),
            None => true,
        })
    }

    pub fn budget_alerts_enabled(&self) -> PocketResult<bool> {
        self.flag(BUDGET_ALERTS_KEY)
    }

    pub fn set_budget_alerts_enabled(&self, enabled: bool) -> PocketResult<()> {
        self.store.set(BUDGET_ALERTS_KEY, Value::Bool(enabled))
    }

    pub fn transaction_alerts_enabled(&self) -> PocketResult<bool> {
        self.flag(TRANSACTION_ALERTS_KEY)
    }

    pub fn set_transaction_alerts_enabled(&self, enabled: bool) -> PocketResult<()> {
        self.store.set(TRANSACTION_ALERTS_KEY, Value::Bool(enabled))
    }

    // Flags default to on when absent or not a boolean
    fn flag(&self, key: &str) -> PocketResult<bool> {
        Ok(self
            .store
            .get(key)?
            .and_then(|value| value.as_bool())
            .unwrap_or(true))
    }
}
