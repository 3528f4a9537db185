//! Baseline vs accelerated payoff comparison

use log::warn;
use serde::{Deserialize, Serialize};

use super::schedule::PayoffOutcome;
use crate::loan::AccelerationStrategy;

/// How the two outcomes relate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonVerdict {
    /// Extra money went in and the loan is retired sooner
    Accelerated,
    /// Nothing extra was contributed, or no months were saved
    NoAccelerationApplied,
    /// One of the outcomes never pays off, so the diff is meaningless
    Incomparable,
    /// One of the outcomes hit the iteration cap; savings are bounds, not totals
    CapReached,
}

/// Savings from an acceleration strategy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// `baseline.months_to_payoff - accelerated.months_to_payoff`; may be <= 0
    pub time_saved_months: i64,

    pub interest_saved: f64,

    /// Lump sum plus recurring extras actually scheduled
    pub total_extra_contributed: f64,

    /// Interest saved per unit of extra money, in percent.
    /// `None` when nothing extra was contributed or either outcome did not
    /// pay off (capped or non-convergent).
    pub return_on_extra_pct: Option<f64>,

    pub verdict: ComparisonVerdict,
}

impl ComparisonResult {
    /// Whole years and leftover months of `time_saved_months`
    pub fn time_saved_years_months(&self) -> (i64, i64) {
        (self.time_saved_months / 12, self.time_saved_months % 12)
    }
}

/// Extra principal the accelerated plan puts in over its lifetime
///
/// Counts the lump sum actually applied plus the recurring extra for every
/// month until the accelerated payoff.
pub fn total_extra_contributed(strategy: &AccelerationStrategy, accelerated: &PayoffOutcome) -> f64 {
    accelerated.lump_sum_applied + strategy.extra_monthly() * accelerated.months_to_payoff as f64
}

/// Diff two payoff outcomes computed from the same starting balance
pub fn compare_payoffs(
    baseline: &PayoffOutcome,
    accelerated: &PayoffOutcome,
    total_extra_contributed: f64,
) -> ComparisonResult {
    let time_saved_months = baseline.months_to_payoff as i64 - accelerated.months_to_payoff as i64;
    let interest_saved = baseline.total_interest - accelerated.total_interest;

    let verdict = if baseline.is_non_convergent() || accelerated.is_non_convergent() {
        ComparisonVerdict::Incomparable
    } else if baseline.is_capped() || accelerated.is_capped() {
        ComparisonVerdict::CapReached
    } else if total_extra_contributed <= 0.0 || time_saved_months <= 0 {
        ComparisonVerdict::NoAccelerationApplied
    } else {
        ComparisonVerdict::Accelerated
    };

    // Truncated totals would give a misleading ratio
    let both_paid_off = baseline.is_paid_off() && accelerated.is_paid_off();
    let return_on_extra_pct = if total_extra_contributed > 0.0 && both_paid_off {
        Some(interest_saved / total_extra_contributed * 100.0)
    } else {
        None
    };

    if verdict != ComparisonVerdict::Accelerated {
        warn!(
            "Comparison verdict {:?}: {} months saved with {:.2} extra contributed",
            verdict, time_saved_months, total_extra_contributed
        );
    }

    ComparisonResult {
        time_saved_months,
        interest_saved,
        total_extra_contributed,
        return_on_extra_pct,
        verdict,
    }
}
