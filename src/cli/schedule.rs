//! Savings schedule calculator command

use clap::Args;

use super::{parse_date_or_today, parse_money};
use crate::budget::{calculate_savings_schedule, parse_schedule_date};
use crate::config::settings::Settings;
use crate::display::goal::format_schedule;
use crate::error::PocketResult;

/// Preview a savings plan without creating a goal
#[derive(Args)]
pub struct ScheduleArgs {
    /// Total amount to save
    pub target: String,
    /// Target date (YYYY-MM-DD)
    pub by: String,
    /// Amount already saved
    #[arg(short, long, default_value = "0")]
    pub saved: String,
    /// Start date (YYYY-MM-DD, default today)
    #[arg(short, long)]
    pub from: Option<String>,
    /// Print the schedule as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn handle_schedule_command(settings: &Settings, args: ScheduleArgs) -> PocketResult<()> {
    let schedule = calculate_savings_schedule(
        parse_date_or_today(args.from.as_deref())?,
        parse_schedule_date(&args.by)?,
        parse_money(&args.target)?,
        parse_money(&args.saved)?,
    )?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&schedule)?);
    } else {
        print!("{}", format_schedule(&schedule, &settings.currency_symbol));
    }
    Ok(())
}
