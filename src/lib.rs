//! Payoff Core - loan amortization and hourly compensation engine
//!
//! This library provides:
//! - Level-payment computation and closed-form balance projection
//! - Month-by-month payoff simulation with extra and lump-sum payments
//! - Baseline vs. accelerated comparison (time and interest saved)
//! - Progressive bracket tax, payroll tax and hourly wage conversion
//! - Batch scenario runs and an in-memory saved-plan list

pub mod error;
pub mod loan;
pub mod amortization;
pub mod compensation;
pub mod plans;
pub mod scenario;

// Re-export commonly used types
pub use error::{CalcError, Result};
pub use loan::{AccelerationMode, AccelerationStrategy, ElapsedState, LoanScenario, LoanTerms};
pub use amortization::{
    compare_payoffs, compute_payment, project_balance, simulate_payoff, ComparisonResult, PayoffOutcome,
    PayoffSimulator, PayoffStatus, SimulationConfig,
};
pub use compensation::{
    compute_net_pay, compute_progressive_tax, convert_wage_to_periods, TaxAssumptions, TaxBracketTable, WageInputs,
};
pub use plans::{PlanBook, PlanId, SavedPlan};
pub use scenario::{LoanAnalysis, PayoffRunner};
