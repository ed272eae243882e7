use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pocket_budget::cli::{
    handle_account_command, handle_alerts_command, handle_category_command, handle_goal_command,
    handle_schedule_command, handle_transaction_command, AccountCommands, AlertsCommands,
    CategoryCommands, GoalCommands, ScheduleArgs, Session, TransactionCommands,
};
use pocket_budget::config::{paths::PocketPaths, settings::Settings};
use pocket_budget::storage::Storage;

/// Environment variable holding the log filter, e.g. `POCKET_LOG=debug`
const LOG_ENV: &str = "POCKET_LOG";

#[derive(Parser)]
#[command(
    name = "pocket",
    author = "Kaylee Beyene",
    version,
    about = "Personal budgeting with savings goals and budget alerts",
    long_about = "Pocket tracks accounts, spending categories and savings goals. \
                  Goals get a month-by-month payment plan, and categories alert \
                  once a month when spending reaches 90% of target."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Account management commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Spending category commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Savings goal commands
    #[command(subcommand)]
    Goal(GoalCommands),

    /// Transaction commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Preview a savings schedule
    Schedule(ScheduleArgs),

    /// Alert settings and status
    #[command(subcommand)]
    Alerts(AlertsCommands),

    /// Initialize a new budget
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = PocketPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let storage = Storage::new(paths.clone())?;

    match cli.command {
        Some(Commands::Account(cmd)) => {
            let mut session = Session::open(&storage, &settings)?;
            handle_account_command(&mut session, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            let mut session = Session::open(&storage, &settings)?;
            handle_category_command(&mut session, cmd)?;
        }
        Some(Commands::Goal(cmd)) => {
            let mut session = Session::open(&storage, &settings)?;
            handle_goal_command(&mut session, cmd)?;
        }
        Some(Commands::Transaction(cmd)) => {
            let mut session = Session::open(&storage, &settings)?;
            handle_transaction_command(&mut session, cmd)?;
        }
        Some(Commands::Schedule(args)) => {
            handle_schedule_command(&settings, args)?;
        }
        Some(Commands::Alerts(cmd)) => {
            let session = Session::open(&storage, &settings)?;
            handle_alerts_command(&session, cmd)?;
        }
        Some(Commands::Init) => {
            println!("Initializing Pocket Budget at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            if !storage.state.exists() {
                storage.state.save(&Default::default())?;
            }
            println!("Initialization complete!");
            println!();
            println!("Next steps:");
            println!("  pocket account create Checking --balance 1000");
            println!("  pocket category create Groceries --group needs --target 400");
            println!("  pocket goal create Vacation --target 1500 --by 2027-06-01");
        }
        Some(Commands::Config) => {
            println!("Pocket Budget Configuration");
            println!("===========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("State file:       {}", paths.state_file().display());
            println!("Preferences file: {}", paths.preferences_file().display());
            println!("Initialized:      {}", if storage.is_initialized() { "yes" } else { "no" });
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
        }
        None => {
            println!("Pocket Budget - budgeting with savings goals and alerts");
            println!();
            println!("Run 'pocket --help' for usage information.");
        }
    }

    Ok(())
}
