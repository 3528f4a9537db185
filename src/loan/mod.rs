//! Loan input data and scenario loading

mod data;
pub mod loader;

pub use data::{AccelerationMode, AccelerationStrategy, ElapsedState, LoanScenario, LoanTerms};
pub use loader::{load_scenarios, load_scenarios_from_reader};
