//! Error taxonomy for the payoff and compensation engines
//!
//! Validation failures are rejected before any computation starts. Outcome
//! states such as a payoff that never converges are *not* errors; they live on
//! the result types (see [`crate::amortization::PayoffStatus`]).

use thiserror::Error;

/// Errors raised by the computation core
#[derive(Error, Debug)]
pub enum CalcError {
    /// Non-positive principal or term, negative rate, elapsed time past the term,
    /// or non-finite simulator inputs
    #[error("invalid loan terms: {0}")]
    InvalidLoanTerms(String),

    /// Negative or non-finite acceleration amounts
    #[error("invalid acceleration strategy: {0}")]
    InvalidStrategy(String),

    #[error("invalid wage inputs: {0}")]
    InvalidWageInputs(String),

    /// Bracket ladder is empty, not strictly increasing, or not open-ended
    #[error("invalid tax bracket table: {0}")]
    InvalidBracketTable(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CalcError>;

/// Reject NaN and infinities with a loan-terms error naming the field
pub(crate) fn ensure_finite(value: f64, field: &str) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CalcError::InvalidLoanTerms(format!("{} must be finite, got {}", field, value)))
    }
}
