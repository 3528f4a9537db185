//! Loan amortization: level payment, balance projection, payoff simulation
//! and baseline/accelerated comparison

mod payment;
mod balance;
mod state;
mod engine;
mod schedule;
mod comparison;
mod solver;

pub use payment::{compute_payment, monthly_rate};
pub use balance::project_balance;
pub use state::PayoffState;
pub use engine::{simulate_payoff, PayoffSimulator, SimulationConfig, DEFAULT_MAX_MONTHS, PAYOFF_TOLERANCE};
pub use schedule::{
    write_schedule_csv, write_schedule_csv_to_path, PayoffOutcome, PayoffStatus, ScheduleRow, YearSummary,
};
pub use comparison::{compare_payoffs, total_extra_contributed, ComparisonResult, ComparisonVerdict};
pub use solver::solve_extra_payment;
