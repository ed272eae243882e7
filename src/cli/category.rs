//! Spending category CLI commands

use clap::Subcommand;

use super::{parse_money, today, Session};
use crate::budget::Action;
use crate::display::category::{format_category_details, format_category_tree};
use crate::error::{PocketError, PocketResult};
use crate::models::{CategoryGroup, Recurrence, SpendingCategory, SpendingCategoryUpdate};

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Create a spending category
    Create {
        /// Category name
        name: String,
        /// Group (bills, needs, wants, non-monthly)
        #[arg(short, long)]
        group: String,
        /// Monthly target
        #[arg(short, long)]
        target: String,
        /// When it's due: "Monthly on 1", "Weekly on Friday", "Mar 5" or "05/03/2027"
        #[arg(short, long, default_value = "Monthly on 1")]
        due: String,
    },
    /// List categories by group
    List,
    /// Show a category and its uncleared transactions
    Show {
        /// Category name
        name: String,
    },
    /// Edit a category
    Edit {
        /// Category name
        name: String,
        /// New name
        #[arg(short, long)]
        rename: Option<String>,
        /// New target (re-arms the budget alert)
        #[arg(short, long)]
        target: Option<String>,
        /// New due descriptor
        #[arg(short, long)]
        due: Option<String>,
    },
    /// Move a category to another group
    Move {
        /// Category name
        name: String,
        /// Destination group
        #[arg(long)]
        to: String,
        /// New target to apply while moving
        #[arg(short, long)]
        target: Option<String>,
    },
    /// Delete a category
    Delete {
        /// Category name
        name: String,
    },
    /// Mark a category's transactions as cleared
    Clear {
        /// Category name
        name: String,
    },
}

fn parse_group(input: &str) -> PocketResult<CategoryGroup> {
    CategoryGroup::parse(input).ok_or_else(|| {
        PocketError::Validation(format!(
            "Invalid group: '{}'. Valid groups: bills, needs, wants, non-monthly",
            input
        ))
    })
}

fn find_category(session: &Session, name: &str) -> PocketResult<SpendingCategory> {
    session
        .state()
        .spending_category(name)
        .cloned()
        .ok_or_else(|| PocketError::category_not_found(name))
}

/// Handle a category command
pub fn handle_category_command(session: &mut Session, cmd: CategoryCommands) -> PocketResult<()> {
    match cmd {
        CategoryCommands::Create {
            name,
            group,
            target,
            due,
        } => {
            let group = parse_group(&group)?;
            let target = parse_money(&target)?;
            Recurrence::parse(&due)?;

            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(PocketError::Validation(
                    "Category name cannot be empty".into(),
                ));
            }
            if session.state().is_category_name_taken(&name) {
                return Err(PocketError::Validation(format!(
                    "A category or goal named '{}' already exists",
                    name
                )));
            }

            let category = SpendingCategory::new(name, group, target, due);
            println!(
                "Created category: {} in {} (target {})",
                category.name,
                group,
                category.target.format_with_symbol(session.symbol())
            );
            session
                .store_mut()
                .dispatch(Action::AddSpendingCategory { group, category });
            session.save()?;
        }

        CategoryCommands::List => {
            print!(
                "{}",
                format_category_tree(session.state(), today(), session.symbol())
            );
        }

        CategoryCommands::Show { name } => {
            let category = find_category(session, &name)?;
            let transactions = session.state().live_transactions_for(&category.name);
            print!(
                "{}",
                format_category_details(&category, &transactions, today(), session.symbol())
            );
        }

        CategoryCommands::Edit {
            name,
            rename,
            target,
            due,
        } => {
            let category = find_category(session, &name)?;
            let is_repeating = match &due {
                Some(descriptor) => Some(Recurrence::parse(descriptor)?.is_repeating()),
                None => None,
            };
            let updates = SpendingCategoryUpdate {
                name: rename.map(|n| n.trim().to_string()),
                date: due,
                spent: None,
                target: target.as_deref().map(parse_money).transpose()?,
                is_repeating,
            };
            if updates.is_empty() {
                println!("No changes specified. Use --rename, --target or --due.");
                return Ok(());
            }
            if let Some(new_name) = &updates.name {
                if new_name != &category.name && session.state().is_category_name_taken(new_name) {
                    return Err(PocketError::Validation(format!(
                        "A category or goal named '{}' already exists",
                        new_name
                    )));
                }
            }

            session.store_mut().dispatch(Action::UpdateSpendingCategory {
                group: category.group,
                id: category.id,
                updates,
            });
            session.save()?;
            println!("Updated category: {}", name);
        }

        CategoryCommands::Move { name, to, target } => {
            let category = find_category(session, &name)?;
            let to_group = parse_group(&to)?;
            let updates = match target {
                Some(raw) => SpendingCategoryUpdate::target(parse_money(&raw)?),
                None => SpendingCategoryUpdate::default(),
            };

            session.store_mut().dispatch(Action::MoveSpendingCategory {
                category_name: category.name.clone(),
                from_group: category.group,
                to_group,
                updates,
            });
            session.save()?;
            println!("Moved {} from {} to {}", category.name, category.group, to_group);
        }

        CategoryCommands::Delete { name } => {
            let category = find_category(session, &name)?;
            session.store_mut().dispatch(Action::DeleteSpendingCategory {
                category_name: category.name.clone(),
            });
            session.save()?;
            println!("Deleted category: {}", category.name);
        }

        CategoryCommands::Clear { name } => {
            let category = find_category(session, &name)?;
            let count = session.state().live_transactions_for(&category.name).len();
            session
                .store_mut()
                .dispatch(Action::MarkCategoryTransactionsCleared {
                    category_name: category.name.clone(),
                });
            session.save()?;
            println!("Cleared {} transactions for {}", count, category.name);
        }
    }

    Ok(())
}
