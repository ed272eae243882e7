//! Savings goal CLI commands

use clap::Subcommand;

use super::{find_goal, parse_date_or_today, parse_money, today, Session};
use crate::budget::{parse_schedule_date, Action};
use crate::display::goal::{format_goal_details, format_goal_list};
use crate::error::PocketResult;
use crate::models::REFUND_CATEGORY;

/// Savings goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// Create a savings goal with a monthly payment plan
    Create {
        /// Goal name
        name: String,
        /// Total amount to save
        #[arg(short, long)]
        target: String,
        /// Target date (YYYY-MM-DD)
        #[arg(short, long)]
        by: String,
        /// Amount already saved
        #[arg(short, long, default_value = "0")]
        saved: String,
    },
    /// List savings goals
    List,
    /// Show a goal and its payment plan
    Show {
        /// Goal name
        name: String,
    },
    /// Put money toward a goal
    Contribute {
        /// Goal name
        name: String,
        /// Amount to contribute
        amount: String,
        /// Account holding the money
        #[arg(short, long)]
        account: String,
        /// Contribution date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Delete a goal, refunding its contributions to their accounts
    Delete {
        /// Goal name
        name: String,
    },
    /// Cash out a goal into a non-monthly category and a fund account
    Spend {
        /// Goal name
        name: String,
    },
}

/// Handle a goal command
pub fn handle_goal_command(session: &mut Session, cmd: GoalCommands) -> PocketResult<()> {
    match cmd {
        GoalCommands::Create {
            name,
            target,
            by,
            saved,
        } => {
            let target = parse_money(&target)?;
            let saved = parse_money(&saved)?;
            let by = parse_schedule_date(&by)?;

            let id = session
                .store_mut()
                .add_savings_goal(&name, target, saved, by, today())?;
            session.save()?;

            if let Some(goal) = session.state().goal(id) {
                println!(
                    "Created goal: {} ({} installments, {} this month)",
                    goal.name,
                    goal.number_of_months,
                    goal.monthly_target.format_with_symbol(session.symbol())
                );
            }
        }

        GoalCommands::List => {
            print!(
                "{}",
                format_goal_list(&session.state().savings_categories.goals, session.symbol())
            );
        }

        GoalCommands::Show { name } => {
            let goal = find_goal(session.state(), &name)?;
            print!("{}", format_goal_details(goal, today(), session.symbol()));
        }

        GoalCommands::Contribute {
            name,
            amount,
            account,
            date,
        } => {
            let goal_id = find_goal(session.state(), &name)?.id;
            let amount = parse_money(&amount)?;
            let date = parse_date_or_today(date.as_deref())?;

            session
                .store_mut()
                .contribute_to_goal(goal_id, &account, amount, date, today())?;
            session.save()?;

            if let Some(goal) = session.state().goal(goal_id) {
                let symbol = session.symbol();
                println!(
                    "Contributed {} to {} ({} of {})",
                    amount.format_with_symbol(symbol),
                    goal.name,
                    goal.general_saved.format_with_symbol(symbol),
                    goal.general_target.format_with_symbol(symbol)
                );
            }
        }

        GoalCommands::Delete { name } => {
            let goal_id = find_goal(session.state(), &name)?.id;
            let before = session.state().transactions.len();

            session
                .store_mut()
                .dispatch(Action::DeleteSavingsCategory { id: goal_id });
            session.save()?;

            let symbol = session.symbol();
            println!("Deleted goal: {}", name);
            for refund in session.state().transactions[before..]
                .iter()
                .filter(|t| t.category == REFUND_CATEGORY)
            {
                println!(
                    "  Refund {} to {}",
                    refund.amount.format_with_symbol(symbol),
                    refund.account
                );
            }
        }

        GoalCommands::Spend { name } => {
            let goal = find_goal(session.state(), &name)?.clone();

            session
                .store_mut()
                .dispatch(Action::SpendSavingsCategory { id: goal.id });
            session.save()?;

            println!(
                "Moved {} into Non-Monthly and opened account '{}' with {}",
                goal.name,
                goal.fund_account_name(),
                goal.general_saved.format_with_symbol(session.symbol())
            );
        }
    }

    Ok(())
}
