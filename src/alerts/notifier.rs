//! Notification delivery
//!
//! The gate decides *whether* to notify; a [`Notifier`] decides *how*.

use std::sync::Mutex;

use tracing::info;

use crate::error::{PocketError, PocketResult};

pub trait Notifier {
    fn show_immediate_notification(&self, title: &str, body: &str) -> PocketResult<()>;
}

/// Emits notifications as log events
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn show_immediate_notification(&self, title: &str, body: &str) -> PocketResult<()> {
        info!(title, body, "notification");
        Ok(())
    }
}

/// Prints notifications to stdout, used by the CLI
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn show_immediate_notification(&self, title: &str, body: &str) -> PocketResult<()> {
        println!("[{}] {}", title, body);
        Ok(())
    }
}

/// A delivered notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

/// Records notifications instead of showing them
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything delivered so far, oldest first
    pub fn sent(&self) -> Vec<Notification> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

impl Notifier for MemoryNotifier {
    fn show_immediate_notification(&self, title: &str, body: &str) -> PocketResult<()> {
        let mut sent = self
            .sent
            .lock()
            .map_err(|e| PocketError::Notification(format!("Failed to acquire lock: {}", e)))?;
        sent.push(Notification {
            title: title.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn show_immediate_notification(&self, title: &str, body: &str) -> PocketResult<()> {
        (**self).show_immediate_notification(title, body)
    }
}
