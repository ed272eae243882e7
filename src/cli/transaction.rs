//! Transaction CLI commands

use clap::Subcommand;

use super::{find_transaction_id, parse_date_or_today, parse_money, Session};
use crate::budget::{parse_schedule_date, Action};
use crate::display::transaction::format_transaction_register;
use crate::error::{PocketError, PocketResult};
use crate::models::{Money, Transaction, TransactionType, TransactionUpdate};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a transaction
    Add {
        /// Account name
        account: String,
        /// Amount (sign is taken from --kind)
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Description
        #[arg(short, long)]
        name: String,
        /// Category or savings goal name
        #[arg(short, long)]
        category: String,
        /// expense or income
        #[arg(short, long, default_value = "expense")]
        kind: String,
        /// Date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Move money between two accounts
    Transfer {
        /// Source account
        from: String,
        /// Destination account
        to: String,
        /// Amount
        amount: String,
        /// Date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List transactions, newest first
    List {
        /// Filter by account
        #[arg(short, long)]
        account: Option<String>,
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID (e.g. txn-1a2b3c4d)
        id: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        /// expense or income
        #[arg(short, long)]
        kind: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(long)]
        account: Option<String>,
    },
    /// Delete a transaction, reversing its effect on balances
    Delete {
        /// Transaction ID
        id: String,
    },
}

fn parse_kind(input: &str) -> PocketResult<TransactionType> {
    TransactionType::parse(input).ok_or_else(|| {
        PocketError::Validation(format!(
            "Invalid transaction kind: '{}'. Use expense or income",
            input
        ))
    })
}

fn require_account(session: &Session, name: &str) -> PocketResult<()> {
    session
        .state()
        .account_by_name(name)
        .map(|_| ())
        .ok_or_else(|| PocketError::account_not_found(name))
}

fn signed(kind: TransactionType, magnitude: Money) -> Money {
    match kind {
        TransactionType::Expense => -magnitude.abs(),
        TransactionType::Income => magnitude.abs(),
    }
}

/// Handle a transaction command
pub fn handle_transaction_command(
    session: &mut Session,
    cmd: TransactionCommands,
) -> PocketResult<()> {
    match cmd {
        TransactionCommands::Add {
            account,
            amount,
            name,
            category,
            kind,
            date,
        } => {
            require_account(session, &account)?;
            let kind = parse_kind(&kind)?;
            let amount = parse_money(&amount)?;
            let date = parse_date_or_today(date.as_deref())?;

            let transaction =
                Transaction::new(name.trim(), amount, kind, category.trim(), account, date);
            transaction
                .validate()
                .map_err(|e| PocketError::Validation(e.to_string()))?;

            println!(
                "Recorded {} {} ({})",
                transaction.name,
                transaction.amount.format_with_symbol(session.symbol()),
                transaction.id
            );
            session
                .store_mut()
                .dispatch(Action::AddTransaction { transaction });
            session.save()?;
        }

        TransactionCommands::Transfer {
            from,
            to,
            amount,
            date,
        } => {
            require_account(session, &from)?;
            require_account(session, &to)?;
            if from == to {
                return Err(PocketError::Validation(
                    "Cannot transfer an account to itself".into(),
                ));
            }
            let amount = parse_money(&amount)?;
            if !amount.is_positive() {
                return Err(PocketError::Validation(
                    "Transfer amount must be positive".into(),
                ));
            }
            let date = parse_date_or_today(date.as_deref())?;

            let transaction = Transaction::transfer(&from, &to, amount, date);
            println!(
                "Transferred {} from {} to {} ({})",
                amount.format_with_symbol(session.symbol()),
                from,
                to,
                transaction.id
            );
            session
                .store_mut()
                .dispatch(Action::AddTransaction { transaction });
            session.save()?;
        }

        TransactionCommands::List {
            account,
            category,
            limit,
        } => {
            let mut transactions: Vec<&Transaction> = session
                .state()
                .transactions
                .iter()
                .filter(|t| account.as_deref().map_or(true, |a| t.account == a))
                .filter(|t| category.as_deref().map_or(true, |c| t.category == c))
                .collect();
            transactions.sort_by(|a, b| b.date.cmp(&a.date));
            transactions.truncate(limit);

            print!(
                "{}",
                format_transaction_register(
                    &transactions,
                    &session.settings().date_format,
                    session.symbol()
                )
            );
        }

        TransactionCommands::Edit {
            id,
            name,
            amount,
            category,
            kind,
            date,
            account,
        } => {
            let transaction_id = find_transaction_id(session.state(), &id)?;
            let current = session
                .state()
                .transaction(transaction_id)
                .cloned()
                .ok_or_else(|| PocketError::transaction_not_found(&id))?;

            if let Some(account) = &account {
                require_account(session, account)?;
            }
            let kind = kind.as_deref().map(parse_kind).transpose()?;
            let amount = amount.as_deref().map(parse_money).transpose()?;
            let effective_kind = kind.unwrap_or(current.transaction_type);
            let amount = match (amount, kind) {
                (Some(magnitude), _) => Some(signed(effective_kind, magnitude)),
                (None, Some(_)) => Some(signed(effective_kind, current.amount)),
                (None, None) => None,
            };

            let updates = TransactionUpdate {
                name,
                amount,
                category,
                transaction_type: kind,
                date: date.as_deref().map(parse_schedule_date).transpose()?,
                account,
            };
            if updates == TransactionUpdate::default() {
                println!("No changes specified.");
                return Ok(());
            }

            session.store_mut().dispatch(Action::UpdateTransaction {
                transaction_id,
                updates,
            });
            session.save()?;
            println!("Updated transaction {}", transaction_id);
        }

        TransactionCommands::Delete { id } => {
            let transaction_id = find_transaction_id(session.state(), &id)?;
            session
                .store_mut()
                .dispatch(Action::DeleteTransaction { transaction_id });
            session.save()?;
            println!("Deleted transaction {}", transaction_id);
        }
    }

    Ok(())
}
