//! Budget engine: state tree, actions, reducer, savings schedules and the store

pub mod action;
pub mod reducer;
pub mod schedule;
pub mod state;
pub mod store;

pub use action::{Action, Effect};
pub use reducer::{reduce, Transition, ALERT_THRESHOLD_PERCENT};
pub use schedule::{
    calculate_savings_schedule, parse_schedule_date, MonthlyGoal, PaymentInstallment,
    SavingsSchedule,
};
pub use state::{BudgetState, SavingsCategories, SpendingCategories};
pub use store::BudgetStore;
