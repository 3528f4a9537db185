//! Tax assumptions: federal and state ladders plus payroll taxes

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::brackets::{compute_progressive_tax, PayrollTax, TaxBracketTable};
use super::loader;
use crate::error::Result;

/// 2024 standard deduction for a single filer
pub const STANDARD_DEDUCTION_SINGLE_2024: f64 = 14_600.0;

/// Flat state rate used when none is configured
pub const DEFAULT_STATE_RATE: f64 = 0.05;

/// Container for all tax assumptions
#[derive(Debug, Clone)]
pub struct TaxAssumptions {
    pub federal: TaxBracketTable,
    /// Subtracted from gross before the federal ladder is applied
    pub standard_deduction: f64,
    pub state: TaxBracketTable,
    pub social_security: PayrollTax,
    pub medicare: PayrollTax,
}

/// Annual tax liability on a gross income
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxResult {
    pub gross_income: f64,
    pub federal_tax: f64,
    pub state_tax: f64,
    /// Social Security plus Medicare
    pub payroll_tax: f64,
    pub net_income: f64,
}

impl TaxResult {
    pub fn total_tax(&self) -> f64 {
        self.federal_tax + self.state_tax + self.payroll_tax
    }

    /// Total tax as a share of gross; 0 for zero income
    pub fn effective_rate(&self) -> f64 {
        if self.gross_income > 0.0 {
            self.total_tax() / self.gross_income
        } else {
            0.0
        }
    }
}

impl TaxAssumptions {
    /// 2024 single filer: federal ladder, standard deduction, 5% flat state,
    /// Social Security and Medicare
    pub fn default_single_filer() -> Self {
        Self {
            federal: TaxBracketTable::us_federal_single_2024(),
            standard_deduction: STANDARD_DEDUCTION_SINGLE_2024,
            state: TaxBracketTable::flat(DEFAULT_STATE_RATE),
            social_security: PayrollTax::social_security_2024(),
            medicare: PayrollTax::medicare(),
        }
    }

    /// Load the federal ladder from the default location (data/tax/)
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(loader::DEFAULT_TAX_TABLES_PATH))
    }

    /// Load the federal ladder from a specific directory, keeping other defaults
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        Ok(Self {
            federal: loader::load_bracket_table(path.join(loader::FEDERAL_SINGLE_FILE))?,
            ..Self::default_single_filer()
        })
    }

    /// Replace the state ladder with a flat rate
    pub fn with_state_rate(mut self, rate: f64) -> Self {
        self.state = TaxBracketTable::flat(rate);
        self
    }

    /// Federal tax on income after the standard deduction, state tax and
    /// payroll taxes on gross
    pub fn compute(&self, gross_income: f64) -> TaxResult {
        let gross = gross_income.max(0.0);
        let federal_taxable = (gross - self.standard_deduction).max(0.0);

        let federal_tax = compute_progressive_tax(federal_taxable, &self.federal);
        let state_tax = compute_progressive_tax(gross, &self.state);
        let payroll_tax = self.social_security.compute(gross) + self.medicare.compute(gross);

        TaxResult {
            gross_income: gross,
            federal_tax,
            state_tax,
            payroll_tax,
            net_income: gross - federal_tax - state_tax - payroll_tax,
        }
    }
}

impl Default for TaxAssumptions {
    fn default() -> Self {
        Self::default_single_filer()
    }
}
