//! Hourly compensation: progressive tax ladders, payroll taxes and
//! wage-to-period conversion

mod brackets;
mod assumptions;
mod wage;
pub mod loader;

pub use brackets::{compute_progressive_tax, PayrollTax, TaxBracket, TaxBracketTable};
pub use assumptions::{TaxAssumptions, TaxResult, DEFAULT_STATE_RATE, STANDARD_DEDUCTION_SINGLE_2024};
pub use wage::{
    compute_net_pay, convert_wage_to_periods, NetPay, PeriodAmounts, WageBreakdown, WageInputs, OVERTIME_MULTIPLIER,
};
pub use loader::{load_bracket_table, load_bracket_table_from_reader};
