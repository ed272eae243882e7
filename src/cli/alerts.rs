//! Alert preference and status commands

use clap::{Subcommand, ValueEnum};

use super::{today, Session};
use crate::error::PocketResult;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum AlertKind {
    /// 90% budget threshold alerts
    Budget,
    /// New and edited transaction alerts
    Transaction,
}

/// Alert subcommands
#[derive(Subcommand)]
pub enum AlertsCommands {
    /// Show alert settings and this month's triggered categories
    Status,
    /// Turn an alert kind on
    Enable { kind: AlertKind },
    /// Turn an alert kind off
    Disable { kind: AlertKind },
    /// Check every category against the alert threshold now
    Check,
    /// Forget which categories already alerted this month
    Reset,
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

fn set_enabled(session: &Session, kind: AlertKind, enabled: bool) -> PocketResult<()> {
    let ledger = session.store().gate().ledger();
    match kind {
        AlertKind::Budget => ledger.set_budget_alerts_enabled(enabled)?,
        AlertKind::Transaction => ledger.set_transaction_alerts_enabled(enabled)?,
    }
    println!("{:?} alerts {}", kind, on_off(enabled));
    Ok(())
}

/// Handle an alerts command
pub fn handle_alerts_command(session: &Session, cmd: AlertsCommands) -> PocketResult<()> {
    let ledger = session.store().gate().ledger();

    match cmd {
        AlertsCommands::Status => {
            println!("Budget alerts:      {}", on_off(ledger.budget_alerts_enabled()?));
            println!(
                "Transaction alerts: {}",
                on_off(ledger.transaction_alerts_enabled()?)
            );
            match ledger.last_reset()? {
                Some(date) => println!("Last reset:         {}", date),
                None => println!("Last reset:         never"),
            }

            let triggered = ledger.triggered()?;
            if triggered.is_empty() {
                println!("No categories have alerted this month.");
            } else {
                println!("Alerted this month: {}", triggered.join(", "));
            }
        }

        AlertsCommands::Enable { kind } => {
            set_enabled(session, kind, true)?;
        }

        AlertsCommands::Disable { kind } => {
            set_enabled(session, kind, false)?;
        }

        AlertsCommands::Check => {
            let messages = session.store().gate().check_budget_alerts(session.state());
            if messages.is_empty() {
                println!("No categories are close to their target.");
            } else if !ledger.budget_alerts_enabled()? {
                for message in &messages {
                    println!("{}", message);
                }
                println!("(budget alerts are off)");
            }
        }

        AlertsCommands::Reset => {
            ledger.clear_all()?;
            ledger.set_last_reset(today())?;
            println!("Budget alerts re-armed for every category.");
        }
    }

    Ok(())
}
