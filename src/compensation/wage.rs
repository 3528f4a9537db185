//! Hourly wage to pay-period conversion and net pay

use serde::{Deserialize, Serialize};

use super::assumptions::{TaxAssumptions, TaxResult};
use crate::error::{CalcError, Result};

/// Overtime premium multiplier
pub const OVERTIME_MULTIPLIER: f64 = 1.5;

pub const MONTHS_PER_YEAR: f64 = 12.0;
pub const BIWEEKLY_PERIODS_PER_YEAR: f64 = 26.0;
pub const WORK_DAYS_PER_WEEK: f64 = 5.0;

/// Hourly compensation description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WageInputs {
    pub hourly_rate: f64,
    pub hours_per_week: f64,
    pub weeks_per_year: f64,
    /// Unpaid weeks off
    pub vacation_weeks: f64,
    pub overtime_hours_per_week: f64,
    /// Annual holiday pay and bonuses
    pub holiday_pay: f64,
    /// Annual value of non-cash benefits (insurance, retirement match, ...)
    pub benefits_value: f64,
}

impl Default for WageInputs {
    fn default() -> Self {
        Self {
            hourly_rate: 0.0,
            hours_per_week: 40.0,
            weeks_per_year: 52.0,
            vacation_weeks: 0.0,
            overtime_hours_per_week: 0.0,
            holiday_pay: 0.0,
            benefits_value: 0.0,
        }
    }
}

impl WageInputs {
    /// Full-year schedule with no overtime, vacation or extras
    pub fn new(hourly_rate: f64, hours_per_week: f64) -> Self {
        Self {
            hourly_rate,
            hours_per_week,
            ..Default::default()
        }
    }

    pub fn work_weeks(&self) -> f64 {
        self.weeks_per_year - self.vacation_weeks
    }

    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("hourly rate", self.hourly_rate),
            ("hours per week", self.hours_per_week),
            ("vacation weeks", self.vacation_weeks),
            ("overtime hours", self.overtime_hours_per_week),
            ("holiday pay", self.holiday_pay),
            ("benefits value", self.benefits_value),
        ];
        for (label, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(CalcError::InvalidWageInputs(format!(
                    "{} must be non-negative, got {}",
                    label, value
                )));
            }
        }

        if !self.weeks_per_year.is_finite() || self.weeks_per_year <= 0.0 {
            return Err(CalcError::InvalidWageInputs(format!(
                "weeks per year must be positive, got {}",
                self.weeks_per_year
            )));
        }
        if self.work_weeks() < 0.0 {
            return Err(CalcError::InvalidWageInputs(format!(
                "{} vacation weeks exceed {} weeks per year",
                self.vacation_weeks, self.weeks_per_year
            )));
        }
        Ok(())
    }
}

/// One annual amount expressed per pay period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodAmounts {
    pub annual: f64,
    pub monthly: f64,
    pub biweekly: f64,
    pub weekly: f64,
    pub daily: f64,
}

impl PeriodAmounts {
    /// Split `annual` across periods; weekly uses the caller's weeks per year
    pub fn from_annual(annual: f64, weeks_per_year: f64) -> Self {
        let weekly = annual / weeks_per_year;
        Self {
            annual,
            monthly: annual / MONTHS_PER_YEAR,
            biweekly: annual / BIWEEKLY_PERIODS_PER_YEAR,
            weekly,
            daily: weekly / WORK_DAYS_PER_WEEK,
        }
    }
}

/// Gross compensation derived from an hourly rate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WageBreakdown {
    pub work_weeks: f64,
    pub regular_annual: f64,
    pub overtime_annual: f64,
    pub holiday_pay: f64,

    /// Gross pay per period
    pub gross: PeriodAmounts,

    /// `(annual + benefits) / hours worked`; `None` when no hours are worked
    pub effective_hourly_rate: Option<f64>,
}

/// Convert one hourly rate into annual, monthly, biweekly, weekly and daily pay
///
/// # Errors
/// `InvalidWageInputs` for negative amounts, non-positive weeks per year or
/// more vacation than weeks.
pub fn convert_wage_to_periods(inputs: &WageInputs) -> Result<WageBreakdown> {
    inputs.validate()?;

    let work_weeks = inputs.work_weeks();
    let regular_annual = inputs.hourly_rate * inputs.hours_per_week * work_weeks;
    let overtime_annual = inputs.hourly_rate * OVERTIME_MULTIPLIER * inputs.overtime_hours_per_week * work_weeks;
    let annual = regular_annual + overtime_annual + inputs.holiday_pay;

    let hours_worked = inputs.hours_per_week * work_weeks;
    let effective_hourly_rate = if hours_worked > 0.0 {
        Some((annual + inputs.benefits_value) / hours_worked)
    } else {
        None
    };

    Ok(WageBreakdown {
        work_weeks,
        regular_annual,
        overtime_annual,
        holiday_pay: inputs.holiday_pay,
        gross: PeriodAmounts::from_annual(annual, inputs.weeks_per_year),
        effective_hourly_rate,
    })
}

/// Gross pay, taxes and take-home pay per period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetPay {
    pub breakdown: WageBreakdown,
    pub taxes: TaxResult,
    pub net: PeriodAmounts,
    /// Total tax as a share of gross (0 when gross is 0)
    pub effective_tax_rate: f64,
}

/// Gross figures, annual tax liability and net figures for one wage
pub fn compute_net_pay(inputs: &WageInputs, assumptions: &TaxAssumptions) -> Result<NetPay> {
    let breakdown = convert_wage_to_periods(inputs)?;
    let taxes = assumptions.compute(breakdown.gross.annual);
    let net = PeriodAmounts::from_annual(taxes.net_income, inputs.weeks_per_year);
    let effective_tax_rate = taxes.effective_rate();

    Ok(NetPay {
        breakdown,
        taxes,
        net,
        effective_tax_rate,
    })
}
