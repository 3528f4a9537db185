//! Loan data structures: contractual terms, elapsed state and payoff strategy

use serde::{Deserialize, Serialize};

use crate::amortization::{compute_payment, monthly_rate};
use crate::error::{CalcError, Result};

/// Contractual loan at origination
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Original amount borrowed
    pub principal: f64,

    /// Nominal annual rate in percent (6.5 = 6.5%)
    pub annual_rate_percent: f64,

    /// Contractual term in months
    pub term_months: u32,
}

impl LoanTerms {
    /// Create validated loan terms
    pub fn new(principal: f64, annual_rate_percent: f64, term_months: u32) -> Result<Self> {
        let terms = Self {
            principal,
            annual_rate_percent,
            term_months,
        };
        terms.validate()?;
        Ok(terms)
    }

    /// Check principal > 0, rate >= 0, term > 0
    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_finite() || self.principal <= 0.0 {
            return Err(CalcError::InvalidLoanTerms(format!(
                "principal must be positive, got {}",
                self.principal
            )));
        }
        if !self.annual_rate_percent.is_finite() || self.annual_rate_percent < 0.0 {
            return Err(CalcError::InvalidLoanTerms(format!(
                "annual rate must be non-negative, got {}",
                self.annual_rate_percent
            )));
        }
        if self.term_months == 0 {
            return Err(CalcError::InvalidLoanTerms("term must be at least one month".to_string()));
        }
        Ok(())
    }

    /// Monthly periodic rate as a decimal
    pub fn monthly_rate(&self) -> f64 {
        monthly_rate(self.annual_rate_percent)
    }

    /// Fixed contractual monthly payment
    pub fn monthly_payment(&self) -> Result<f64> {
        compute_payment(self.principal, self.annual_rate_percent, self.term_months)
    }
}

/// Loan state at the valuation date ("today")
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElapsedState {
    /// Payments already made (always less than the term)
    pub months_elapsed: u32,

    /// Balance still owed after `months_elapsed` contractual payments
    pub current_balance: f64,
}

/// Which acceleration components are active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccelerationMode {
    None,
    ExtraMonthly,
    LumpSum,
    Both,
}

/// Extra-payment policy applied on top of the contractual payment
///
/// Amounts only exist on the variants where they are active, so an inactive
/// amount is always zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AccelerationStrategy {
    /// Pay the contractual amount only
    #[default]
    None,
    /// Recurring top-up added to every monthly payment
    ExtraMonthly { extra_monthly: f64 },
    /// One-time payment applied before the first simulated month
    LumpSum { lump_sum: f64 },
    Both { extra_monthly: f64, lump_sum: f64 },
}

impl AccelerationStrategy {
    /// Build a strategy from raw form amounts; zero amounts switch their mode off
    ///
    /// Negative amounts are kept so that `validate` reports them.
    pub fn from_amounts(extra_monthly: f64, lump_sum: f64) -> Self {
        match (extra_monthly != 0.0, lump_sum != 0.0) {
            (false, false) => AccelerationStrategy::None,
            (true, false) => AccelerationStrategy::ExtraMonthly { extra_monthly },
            (false, true) => AccelerationStrategy::LumpSum { lump_sum },
            (true, true) => AccelerationStrategy::Both { extra_monthly, lump_sum },
        }
    }

    pub fn mode(&self) -> AccelerationMode {
        match self {
            AccelerationStrategy::None => AccelerationMode::None,
            AccelerationStrategy::ExtraMonthly { .. } => AccelerationMode::ExtraMonthly,
            AccelerationStrategy::LumpSum { .. } => AccelerationMode::LumpSum,
            AccelerationStrategy::Both { .. } => AccelerationMode::Both,
        }
    }

    /// Recurring extra amount (0 unless the mode includes it)
    pub fn extra_monthly(&self) -> f64 {
        match self {
            AccelerationStrategy::ExtraMonthly { extra_monthly }
            | AccelerationStrategy::Both { extra_monthly, .. } => *extra_monthly,
            _ => 0.0,
        }
    }

    /// One-time amount (0 unless the mode includes it)
    pub fn lump_sum(&self) -> f64 {
        match self {
            AccelerationStrategy::LumpSum { lump_sum }
            | AccelerationStrategy::Both { lump_sum, .. } => *lump_sum,
            _ => 0.0,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, AccelerationStrategy::None)
    }

    /// Amounts must be finite and non-negative
    pub fn validate(&self) -> Result<()> {
        for (label, amount) in [("extra monthly", self.extra_monthly()), ("lump sum", self.lump_sum())] {
            if !amount.is_finite() || amount < 0.0 {
                return Err(CalcError::InvalidStrategy(format!(
                    "{} amount must be non-negative, got {}",
                    label, amount
                )));
            }
        }
        Ok(())
    }
}

/// One loan question: terms, how far into the loan we are, and the plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanScenario {
    /// Caller-assigned identifier (row id in batch files)
    #[serde(default)]
    pub scenario_id: u32,

    pub terms: LoanTerms,

    /// Contractual payments already made
    #[serde(default)]
    pub months_elapsed: u32,

    #[serde(default)]
    pub strategy: AccelerationStrategy,
}

impl LoanScenario {
    pub fn new(terms: LoanTerms, months_elapsed: u32, strategy: AccelerationStrategy) -> Self {
        Self {
            scenario_id: 0,
            terms,
            months_elapsed,
            strategy,
        }
    }

    pub fn with_id(mut self, scenario_id: u32) -> Self {
        self.scenario_id = scenario_id;
        self
    }
}
