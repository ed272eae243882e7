//! Budget and transaction alerts
//!
//! [`AlertGate`] runs reducer effects and the post-dispatch sweep,
//! [`AlertLedger`] keeps the per-month bookkeeping, and a [`Notifier`]
//! delivers the result.

pub mod gate;
pub mod ledger;
pub mod notifier;

pub use gate::AlertGate;
pub use ledger::AlertLedger;
pub use notifier::{ConsoleNotifier, LogNotifier, MemoryNotifier, Notification, Notifier};
