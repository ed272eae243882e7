//! Account CLI commands

use clap::Subcommand;

use super::{parse_money, Session};
use crate::budget::Action;
use crate::display::account::format_account_list;
use crate::error::{PocketError, PocketResult};
use crate::models::{Account, AccountType, AccountUpdate, Money};

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account
    Create {
        /// Account name
        name: String,
        /// Account type (checking, savings, credit, cash, investment, other)
        #[arg(short = 't', long, default_value = "checking")]
        account_type: String,
        /// Starting balance (e.g., "1000.00" or "1000")
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        balance: String,
    },
    /// List all accounts
    List,
    /// Edit an account
    Edit {
        /// Account name
        account: String,
        /// New name (transactions and transfers follow the rename)
        #[arg(short, long)]
        name: Option<String>,
        /// New account type
        #[arg(short = 't', long)]
        account_type: Option<String>,
        /// Overwrite the balance
        #[arg(short, long, allow_hyphen_values = true)]
        balance: Option<String>,
    },
    /// Delete an account and every transaction filed under it
    Delete {
        /// Account name
        account: String,
    },
}

fn parse_account_type(input: &str) -> PocketResult<AccountType> {
    AccountType::parse(input).ok_or_else(|| {
        PocketError::Validation(format!(
            "Invalid account type: '{}'. Valid types: checking, savings, credit, cash, investment, other",
            input
        ))
    })
}

/// Credit card balances are debt, so positive input is stored as negative
fn signed_balance(account_type: AccountType, balance: Money) -> Money {
    if account_type.is_liability() && balance.is_positive() {
        -balance
    } else {
        balance
    }
}

/// Handle an account command
pub fn handle_account_command(session: &mut Session, cmd: AccountCommands) -> PocketResult<()> {
    match cmd {
        AccountCommands::Create {
            name,
            account_type,
            balance,
        } => {
            let account_type = parse_account_type(&account_type)?;
            let balance = signed_balance(account_type, parse_money(&balance)?);

            let account = Account::with_balance(name.trim(), account_type, balance);
            account
                .validate()
                .map_err(|e| PocketError::Validation(e.to_string()))?;
            if session.state().account_by_name(&account.name).is_some() {
                return Err(PocketError::Validation(format!(
                    "An account named '{}' already exists",
                    account.name
                )));
            }

            let symbol = session.symbol().to_string();
            println!("Created account: {}", account.name);
            println!("  Type:    {}", account.account_type);
            println!("  Balance: {}", account.balance.format_with_symbol(&symbol));
            println!("  ID:      {}", account.id);

            session.store_mut().dispatch(Action::AddAccount { account });
            session.save()?;
        }

        AccountCommands::List => {
            print!(
                "{}",
                format_account_list(&session.state().accounts, session.symbol())
            );
        }

        AccountCommands::Edit {
            account,
            name,
            account_type,
            balance,
        } => {
            let found = session
                .state()
                .account_by_name(&account)
                .cloned()
                .ok_or_else(|| PocketError::account_not_found(&account))?;

            let account_type = account_type.as_deref().map(parse_account_type).transpose()?;
            let balance = balance
                .as_deref()
                .map(parse_money)
                .transpose()?
                .map(|b| signed_balance(account_type.unwrap_or(found.account_type), b));

            let updates = AccountUpdate {
                name: name.map(|n| n.trim().to_string()),
                account_type,
                balance,
            };
            if updates == AccountUpdate::default() {
                println!("No changes specified. Use --name, --account-type or --balance.");
                return Ok(());
            }
            if let Some(new_name) = &updates.name {
                if new_name != &found.name && session.state().account_by_name(new_name).is_some() {
                    return Err(PocketError::Validation(format!(
                        "An account named '{}' already exists",
                        new_name
                    )));
                }
            }

            session.store_mut().dispatch(Action::UpdateAccount {
                account_id: found.id,
                updates,
            });
            session.save()?;

            if let Some(updated) = session.state().account(found.id) {
                println!("Updated account: {}", updated);
            }
        }

        AccountCommands::Delete { account } => {
            let found = session
                .state()
                .account_by_name(&account)
                .cloned()
                .ok_or_else(|| PocketError::account_not_found(&account))?;
            let removed = session
                .state()
                .transactions
                .iter()
                .filter(|t| t.account == found.name)
                .count();

            session
                .store_mut()
                .dispatch(Action::DeleteAccount { account_id: found.id });
            session.save()?;

            println!(
                "Deleted account: {} ({} transactions removed)",
                found.name, removed
            );
        }
    }

    Ok(())
}
