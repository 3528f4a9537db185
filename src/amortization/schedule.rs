//! Payoff outcome and per-month schedule structures

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

use crate::error::Result;

/// How a payoff simulation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayoffStatus {
    /// Balance reached zero
    PaidOff,
    /// Payment never exceeded the accruing interest; the loan will never be repaid
    NonConvergent,
    /// Iteration ceiling reached first; `months_to_payoff` is a lower bound
    Capped,
}

/// A single month of the payoff schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub month: u32,
    pub opening_balance: f64,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    pub closing_balance: f64,
    pub cumulative_interest: f64,
}

/// Schedule rows rolled up by loan year (months 1-12 are year 1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSummary {
    pub year: u32,
    pub payments: f64,
    pub interest: f64,
    pub principal: f64,
    pub closing_balance: f64,
}

/// Result of one payoff simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoffOutcome {
    pub status: PayoffStatus,

    /// Months simulated until the loop stopped
    pub months_to_payoff: u32,

    /// Balance entering the loop, after any lump sum
    pub starting_balance: f64,

    /// Lump sum actually applied before month 1
    pub lump_sum_applied: f64,

    /// Contractual payment plus any recurring extra
    pub monthly_payment: f64,

    /// Everything paid, lump sum included
    pub total_paid: f64,

    /// `total_paid - principal_retired`
    pub total_interest: f64,

    pub principal_retired: f64,

    /// Balance left when the loop stopped (0 when paid off)
    pub final_balance: f64,

    /// Per-month rows, only when the simulator was asked to record them
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schedule: Vec<ScheduleRow>,
}

impl PayoffOutcome {
    pub fn is_paid_off(&self) -> bool {
        self.status == PayoffStatus::PaidOff
    }

    pub fn is_non_convergent(&self) -> bool {
        self.status == PayoffStatus::NonConvergent
    }

    pub fn is_capped(&self) -> bool {
        self.status == PayoffStatus::Capped
    }

    /// Calendar date of the final payment, offset from `as_of`
    ///
    /// `None` when the loan never pays off. For a capped outcome the date is
    /// the earliest possible payoff.
    pub fn payoff_date(&self, as_of: NaiveDate) -> Option<NaiveDate> {
        if self.is_non_convergent() {
            return None;
        }
        as_of.checked_add_months(Months::new(self.months_to_payoff))
    }

    /// Roll the recorded schedule up into loan years
    pub fn yearly_summary(&self) -> Vec<YearSummary> {
        let mut years: Vec<YearSummary> = Vec::new();

        for row in &self.schedule {
            let year = row.month.saturating_sub(1) / 12 + 1;
            match years.last_mut() {
                Some(summary) if summary.year == year => {
                    summary.payments += row.payment;
                    summary.interest += row.interest;
                    summary.principal += row.principal;
                    summary.closing_balance = row.closing_balance;
                }
                _ => years.push(YearSummary {
                    year,
                    payments: row.payment,
                    interest: row.interest,
                    principal: row.principal,
                    closing_balance: row.closing_balance,
                }),
            }
        }

        years
    }
}

/// Write schedule rows as CSV with a header line
pub fn write_schedule_csv<W: Write>(writer: W, rows: &[ScheduleRow]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write schedule rows to a CSV file
pub fn write_schedule_csv_to_path<P: AsRef<Path>>(path: P, rows: &[ScheduleRow]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_schedule_csv(file, rows)
}
