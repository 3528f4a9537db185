//! Solve for the recurring extra payment that meets a payoff target
//!
//! Months-to-payoff is non-increasing in the extra amount, so a bisection on
//! the extra payment converges to the smallest amount that hits the target.

use log::debug;

use super::engine::{PayoffSimulator, SimulationConfig};
use crate::error::{CalcError, Result};
use crate::loan::AccelerationStrategy;

/// Stop once the bracket is narrower than a cent
const SOLVER_TOLERANCE: f64 = 0.01;
const MAX_ITERATIONS: u32 = 200;

/// Smallest recurring extra that retires the balance within `target_months`
///
/// Returns 0 when the base payment already meets the target. Targets beyond
/// the simulator's `max_months` are clamped to it.
///
/// # Errors
/// `InvalidLoanTerms` for a zero target (after clamping to `max_months`) or
/// invalid simulator inputs.
pub fn solve_extra_payment(
    starting_balance: f64,
    monthly_rate: f64,
    base_payment: f64,
    target_months: u32,
    config: &SimulationConfig,
) -> Result<f64> {
    if target_months == 0 {
        return Err(CalcError::InvalidLoanTerms("target must be at least one month".to_string()));
    }

    let simulator = PayoffSimulator::new(SimulationConfig {
        record_schedule: false,
        ..config.clone()
    });
    let target = target_months.min(config.max_months);
    if target == 0 {
        return Err(CalcError::InvalidLoanTerms(
            "simulation cap of zero months leaves no payoff target".to_string(),
        ));
    }

    let meets_target = |extra: f64| -> Result<bool> {
        let outcome = simulator.simulate(
            starting_balance,
            monthly_rate,
            base_payment,
            &AccelerationStrategy::from_amounts(extra, 0.0),
        )?;
        Ok(outcome.is_paid_off() && outcome.months_to_payoff <= target)
    };

    if meets_target(0.0)? {
        return Ok(0.0);
    }

    // Paying the whole balance plus a month of interest clears it in month 1
    let mut low = 0.0_f64;
    let mut high = starting_balance * (1.0 + monthly_rate) + SOLVER_TOLERANCE;

    for iteration in 0..MAX_ITERATIONS {
        if high - low < SOLVER_TOLERANCE {
            debug!("Extra payment solved after {} iterations: {:.2}", iteration, high);
            break;
        }

        let mid = (low + high) / 2.0;
        if meets_target(mid)? {
            high = mid;
        } else {
            low = mid;
        }
    }

    Ok(high)
}
