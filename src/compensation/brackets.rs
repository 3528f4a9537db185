//! Progressive (marginal) bracket ladder and capped flat payroll taxes

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, Result};

/// One band of a marginal-rate ladder
///
/// The band covers income from the previous bracket's `upper_bound` up to
/// and including its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxBracket {
    pub upper_bound: f64,
    /// Rate as a decimal (0.22 = 22%)
    pub marginal_rate: f64,
}

/// Ordered marginal-rate ladder covering 0..infinity
#[derive(Debug, Clone, PartialEq)]
pub struct TaxBracketTable {
    brackets: Vec<TaxBracket>,
}

impl TaxBracketTable {
    /// Create a validated ladder
    ///
    /// # Errors
    /// `InvalidBracketTable` when the ladder is empty, bounds are not strictly
    /// increasing from above zero, the last bound is not infinite, or a rate
    /// is outside [0, 1].
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self> {
        if brackets.is_empty() {
            return Err(CalcError::InvalidBracketTable("ladder has no brackets".to_string()));
        }

        let mut previous_bound = 0.0;
        for (idx, bracket) in brackets.iter().enumerate() {
            if !(0.0..=1.0).contains(&bracket.marginal_rate) {
                return Err(CalcError::InvalidBracketTable(format!(
                    "bracket {} rate {} is outside [0, 1]",
                    idx + 1,
                    bracket.marginal_rate
                )));
            }
            if bracket.upper_bound.is_nan() || bracket.upper_bound <= previous_bound {
                return Err(CalcError::InvalidBracketTable(format!(
                    "bracket {} bound {} does not exceed {}",
                    idx + 1,
                    bracket.upper_bound,
                    previous_bound
                )));
            }
            if bracket.upper_bound.is_infinite() && idx + 1 != brackets.len() {
                return Err(CalcError::InvalidBracketTable(format!(
                    "bracket {} is open-ended but is not the last bracket",
                    idx + 1
                )));
            }
            previous_bound = bracket.upper_bound;
        }

        if previous_bound != f64::INFINITY {
            return Err(CalcError::InvalidBracketTable(
                "last bracket must be open-ended (upper bound = infinity)".to_string(),
            ));
        }

        Ok(Self { brackets })
    }

    /// Build from `(upper_bound, marginal_rate)` pairs
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self> {
        Self::new(
            pairs
                .iter()
                .map(|&(upper_bound, marginal_rate)| TaxBracket {
                    upper_bound,
                    marginal_rate,
                })
                .collect(),
        )
    }

    /// Single open-ended band; the rate is clamped to [0, 1]
    pub fn flat(rate: f64) -> Self {
        let marginal_rate = if rate.is_finite() { rate.clamp(0.0, 1.0) } else { 0.0 };
        Self {
            brackets: vec![TaxBracket {
                upper_bound: f64::INFINITY,
                marginal_rate,
            }],
        }
    }

    /// 2024 US federal ladder for single filers
    pub fn us_federal_single_2024() -> Self {
        Self {
            brackets: vec![
                TaxBracket { upper_bound: 11_600.0, marginal_rate: 0.10 },
                TaxBracket { upper_bound: 47_150.0, marginal_rate: 0.12 },
                TaxBracket { upper_bound: 100_525.0, marginal_rate: 0.22 },
                TaxBracket { upper_bound: 191_950.0, marginal_rate: 0.24 },
                TaxBracket { upper_bound: 243_725.0, marginal_rate: 0.32 },
                TaxBracket { upper_bound: 609_350.0, marginal_rate: 0.35 },
                TaxBracket { upper_bound: f64::INFINITY, marginal_rate: 0.37 },
            ],
        }
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Rate applied to the next unit of income above `income`
    pub fn marginal_rate(&self, income: f64) -> f64 {
        let income = income.max(0.0);
        self.brackets
            .iter()
            .find(|b| income < b.upper_bound)
            .or_else(|| self.brackets.last())
            .map(|b| b.marginal_rate)
            .unwrap_or(0.0)
    }

    pub fn tax(&self, income: f64) -> f64 {
        compute_progressive_tax(income, self)
    }
}

/// Total tax on `income` under marginal-rate semantics
///
/// Each band's rate applies only to the slice of income inside that band.
/// Negative income owes nothing.
pub fn compute_progressive_tax(income: f64, table: &TaxBracketTable) -> f64 {
    if !(income > 0.0) {
        return 0.0;
    }

    let mut previous_bound = 0.0;
    let mut accumulated_tax = 0.0;

    for bracket in table.brackets() {
        let taxable_in_bracket = (income.min(bracket.upper_bound) - previous_bound).max(0.0);
        accumulated_tax += taxable_in_bracket * bracket.marginal_rate;
        previous_bound = bracket.upper_bound;

        if income <= bracket.upper_bound {
            break;
        }
    }

    accumulated_tax
}

/// Flat rate up to an optional wage base (Social Security style)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayrollTax {
    pub rate: f64,
    /// Income above this ceiling is not taxed; `None` means uncapped
    pub wage_base: Option<f64>,
}

impl PayrollTax {
    pub fn new(rate: f64, wage_base: Option<f64>) -> Result<Self> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(CalcError::InvalidBracketTable(format!("payroll rate {} is outside [0, 1]", rate)));
        }
        if let Some(base) = wage_base {
            if !(base >= 0.0) {
                return Err(CalcError::InvalidBracketTable(format!("wage base {} is negative", base)));
            }
        }
        Ok(Self { rate, wage_base })
    }

    /// 6.2% up to the 2024 wage base of 168,600
    pub fn social_security_2024() -> Self {
        Self {
            rate: 0.062,
            wage_base: Some(168_600.0),
        }
    }

    /// 1.45% with no wage base
    pub fn medicare() -> Self {
        Self {
            rate: 0.0145,
            wage_base: None,
        }
    }

    /// Contribution on `income`, never more than `rate * wage_base`
    pub fn compute(&self, income: f64) -> f64 {
        let income = income.max(0.0);
        let taxable = match self.wage_base {
            Some(base) => income.min(base),
            None => income,
        };
        taxable * self.rate
    }
}
