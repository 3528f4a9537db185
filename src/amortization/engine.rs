//! Month-by-month payoff simulation under an acceleration strategy

use log::{debug, warn};

use super::schedule::{PayoffOutcome, PayoffStatus, ScheduleRow};
use super::state::PayoffState;
use crate::error::{ensure_finite, CalcError, Result};
use crate::loan::AccelerationStrategy;

/// Default iteration ceiling (50 years of monthly payments)
pub const DEFAULT_MAX_MONTHS: u32 = 600;

/// A final payment within half a cent of the balance retires it outright
pub const PAYOFF_TOLERANCE: f64 = 0.005;

/// Configuration for a simulation run
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Hard stop on simulated months
    pub max_months: u32,

    /// Whether to keep one `ScheduleRow` per month
    pub record_schedule: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_months: DEFAULT_MAX_MONTHS,
            record_schedule: false,
        }
    }
}

impl SimulationConfig {
    /// Default ceiling with schedule recording on
    pub fn detailed() -> Self {
        Self {
            record_schedule: true,
            ..Default::default()
        }
    }
}

/// Iterative amortization engine
#[derive(Debug, Clone, Default)]
pub struct PayoffSimulator {
    config: SimulationConfig,
}

impl PayoffSimulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Simulate payoff from `starting_balance` at `monthly_rate`
    ///
    /// The strategy's lump sum is applied once before month 1 and its
    /// recurring extra is added to `base_payment` every month. The loop ends
    /// when the balance reaches zero, when a payment fails to cover the
    /// month's interest, or at `max_months`.
    ///
    /// # Errors
    /// `InvalidLoanTerms` for negative or non-finite balance, rate or payment;
    /// `InvalidStrategy` for negative strategy amounts.
    pub fn simulate(
        &self,
        starting_balance: f64,
        monthly_rate: f64,
        base_payment: f64,
        strategy: &AccelerationStrategy,
    ) -> Result<PayoffOutcome> {
        validate_inputs(starting_balance, monthly_rate, base_payment)?;
        strategy.validate()?;

        let mut state = PayoffState::from_balance(starting_balance, strategy.lump_sum());
        let effective_payment = base_payment + strategy.extra_monthly();
        let mut schedule = Vec::new();

        debug!(
            "Simulating payoff: balance={:.2} rate={:.6} payment={:.2} mode={:?}",
            state.balance,
            monthly_rate,
            effective_payment,
            strategy.mode()
        );

        let status = loop {
            if state.is_paid_off() {
                break PayoffStatus::PaidOff;
            }
            if state.month >= self.config.max_months {
                break PayoffStatus::Capped;
            }

            match self.calculate_month(&mut state, monthly_rate, effective_payment) {
                Some(row) => {
                    if self.config.record_schedule {
                        schedule.push(row);
                    }
                }
                None => break PayoffStatus::NonConvergent,
            }
        };

        match status {
            PayoffStatus::NonConvergent => warn!(
                "Payment {:.2} does not cover interest on balance {:.2}; loan never pays off",
                effective_payment, state.balance
            ),
            PayoffStatus::Capped => warn!(
                "Payoff not reached within {} months; balance {:.2} remains",
                self.config.max_months, state.balance
            ),
            PayoffStatus::PaidOff => debug!("Paid off in {} months", state.month),
        }

        Ok(PayoffOutcome {
            status,
            months_to_payoff: state.month,
            starting_balance: state.starting_balance,
            lump_sum_applied: state.lump_sum_applied,
            monthly_payment: effective_payment,
            total_paid: state.total_paid,
            total_interest: state.total_paid - state.principal_retired,
            principal_retired: state.principal_retired,
            final_balance: state.balance,
            schedule,
        })
    }

    /// Split one payment between interest and principal
    ///
    /// Returns `None` without touching the state when the payment does not
    /// retire any principal. A final payment within `PAYOFF_TOLERANCE` of the
    /// balance clears it, so the last row's `payment` may exceed `payment` by
    /// up to half a cent.
    fn calculate_month(&self, state: &mut PayoffState, monthly_rate: f64, payment: f64) -> Option<ScheduleRow> {
        let opening_balance = state.balance;
        let interest = opening_balance * monthly_rate;
        let available = payment - interest;

        let principal = if available > 0.0 && available >= opening_balance - PAYOFF_TOLERANCE {
            opening_balance
        } else {
            available.min(opening_balance)
        };

        if principal <= 0.0 {
            return None;
        }

        state.apply_payment(interest, principal);

        Some(ScheduleRow {
            month: state.month,
            opening_balance,
            payment: interest + principal,
            interest,
            principal,
            closing_balance: state.balance,
            cumulative_interest: state.cumulative_interest,
        })
    }
}

/// Simulate with the default configuration
pub fn simulate_payoff(
    starting_balance: f64,
    monthly_rate: f64,
    base_payment: f64,
    strategy: &AccelerationStrategy,
) -> Result<PayoffOutcome> {
    PayoffSimulator::default().simulate(starting_balance, monthly_rate, base_payment, strategy)
}

fn validate_inputs(starting_balance: f64, monthly_rate: f64, base_payment: f64) -> Result<()> {
    ensure_finite(starting_balance, "starting balance")?;
    ensure_finite(monthly_rate, "monthly rate")?;
    ensure_finite(base_payment, "base payment")?;

    if starting_balance < 0.0 {
        return Err(CalcError::InvalidLoanTerms(format!(
            "starting balance must be non-negative, got {}",
            starting_balance
        )));
    }
    if monthly_rate < 0.0 {
        return Err(CalcError::InvalidLoanTerms(format!(
            "monthly rate must be non-negative, got {}",
            monthly_rate
        )));
    }
    if base_payment < 0.0 {
        return Err(CalcError::InvalidLoanTerms(format!(
            "base payment must be non-negative, got {}",
            base_payment
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::{compute_payment, monthly_rate, project_balance};
    use crate::loan::{ElapsedState, LoanTerms};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    fn detailed() -> PayoffSimulator {
        PayoffSimulator::new(SimulationConfig::detailed())
    }

    #[test]
    fn test_baseline_pays_off_in_exactly_the_term() {
        let terms = LoanTerms::new(300_000.0, 6.5, 360).unwrap();
        let payment = terms.monthly_payment().unwrap();

        let outcome = detailed()
            .simulate(terms.principal, terms.monthly_rate(), payment, &AccelerationStrategy::None)
            .unwrap();

        assert_eq!(outcome.status, PayoffStatus::PaidOff);
        assert_eq!(outcome.months_to_payoff, 360);
        assert_eq!(outcome.final_balance, 0.0);
        assert_relative_eq!(outcome.total_paid, payment * 360.0, max_relative = 1e-9);
        assert_abs_diff_eq!(outcome.principal_retired, 300_000.0, epsilon = 1e-6);
        assert_eq!(outcome.schedule.len(), 360);
    }

    #[test]
    fn test_total_interest_identity() {
        let outcome = detailed()
            .simulate(50_000.0, monthly_rate(4.0), 700.0, &AccelerationStrategy::from_amounts(50.0, 2_000.0))
            .unwrap();

        assert_relative_eq!(
            outcome.total_interest,
            outcome.total_paid - outcome.principal_retired,
            max_relative = 1e-12
        );
        let summed: f64 = outcome.schedule.iter().map(|r| r.interest).sum();
        assert_relative_eq!(outcome.total_interest, summed, max_relative = 1e-9);
    }

    #[test]
    fn test_standard_mortgage_acceleration() {
        let terms = LoanTerms::new(300_000.0, 6.5, 360).unwrap();
        let payment = terms.monthly_payment().unwrap();
        let elapsed = ElapsedState::project(&terms, 60).unwrap();
        let rate = terms.monthly_rate();

        let baseline = simulate_payoff(elapsed.current_balance, rate, payment, &AccelerationStrategy::None).unwrap();
        let accelerated = simulate_payoff(
            elapsed.current_balance,
            rate,
            payment,
            &AccelerationStrategy::ExtraMonthly { extra_monthly: 200.0 },
        )
        .unwrap();

        assert_eq!(baseline.months_to_payoff, 300);
        assert!(accelerated.is_paid_off());
        assert!(accelerated.months_to_payoff < baseline.months_to_payoff);
        assert!(accelerated.total_interest < baseline.total_interest);
        assert_eq!(baseline.starting_balance, accelerated.starting_balance);
    }

    #[test]
    fn test_non_convergent_payment_is_flagged() {
        // First month's interest on 100k at 20% is ~1666.67
        let outcome = simulate_payoff(100_000.0, monthly_rate(20.0), 1_500.0, &AccelerationStrategy::None).unwrap();

        assert_eq!(outcome.status, PayoffStatus::NonConvergent);
        assert!(outcome.is_non_convergent());
        assert_eq!(outcome.months_to_payoff, 0);
        assert_eq!(outcome.final_balance, 100_000.0);
    }

    #[test]
    fn test_interest_only_payment_is_non_convergent() {
        let rate = monthly_rate(12.0);
        let outcome = simulate_payoff(10_000.0, rate, 10_000.0 * rate, &AccelerationStrategy::None).unwrap();
        assert!(outcome.is_non_convergent());
    }

    #[test]
    fn test_iteration_cap_is_flagged() {
        let simulator = PayoffSimulator::new(SimulationConfig {
            max_months: 120,
            record_schedule: false,
        });
        let terms = LoanTerms::new(300_000.0, 6.5, 360).unwrap();
        let payment = terms.monthly_payment().unwrap();

        let outcome = simulator
            .simulate(terms.principal, terms.monthly_rate(), payment, &AccelerationStrategy::None)
            .unwrap();

        assert_eq!(outcome.status, PayoffStatus::Capped);
        assert_eq!(outcome.months_to_payoff, 120);
        assert!(outcome.final_balance > 0.0);
    }

    #[test]
    fn test_lump_sum_only_enters_loop_reduced() {
        let terms = LoanTerms::new(300_000.0, 6.5, 360).unwrap();
        let payment = terms.monthly_payment().unwrap();
        let projected = project_balance(terms.principal, payment, terms.monthly_rate(), 60);

        let outcome = simulate_payoff(
            projected,
            terms.monthly_rate(),
            payment,
            &AccelerationStrategy::LumpSum { lump_sum: 10_000.0 },
        )
        .unwrap();

        assert_eq!(outcome.starting_balance, projected - 10_000.0);
        assert_eq!(outcome.lump_sum_applied, 10_000.0);
        assert_eq!(outcome.monthly_payment, payment);
    }

    #[test]
    fn test_lump_sum_exceeding_balance_pays_off_immediately() {
        let outcome = simulate_payoff(
            8_000.0,
            monthly_rate(5.0),
            200.0,
            &AccelerationStrategy::LumpSum { lump_sum: 10_000.0 },
        )
        .unwrap();

        assert_eq!(outcome.starting_balance, 0.0);
        assert_eq!(outcome.status, PayoffStatus::PaidOff);
        assert_eq!(outcome.months_to_payoff, 0);
        assert_eq!(outcome.lump_sum_applied, 8_000.0);
        assert_eq!(outcome.total_paid, 8_000.0);
        assert_eq!(outcome.total_interest, 0.0);
    }

    #[test]
    fn test_zero_balance_with_zero_payment_is_paid_off() {
        let outcome = simulate_payoff(0.0, monthly_rate(5.0), 0.0, &AccelerationStrategy::None).unwrap();
        assert!(outcome.is_paid_off());
        assert_eq!(outcome.months_to_payoff, 0);
    }

    #[test]
    fn test_zero_rate_simulation() {
        let payment = compute_payment(12_000.0, 0.0, 12).unwrap();
        let outcome = simulate_payoff(12_000.0, 0.0, payment, &AccelerationStrategy::None).unwrap();

        assert_eq!(outcome.months_to_payoff, 12);
        assert_eq!(outcome.total_interest, 0.0);
        assert_eq!(outcome.total_paid, 12_000.0);
    }

    #[test]
    fn test_final_month_pays_only_what_is_owed() {
        let outcome = detailed()
            .simulate(1_000.0, 0.0, 300.0, &AccelerationStrategy::None)
            .unwrap();

        assert_eq!(outcome.months_to_payoff, 4);
        let last = outcome.schedule.last().unwrap();
        assert_eq!(last.principal, 100.0);
        assert_eq!(last.closing_balance, 0.0);
        assert_eq!(outcome.total_paid, 1_000.0);
    }

    #[test]
    fn test_residue_within_tolerance_is_cleared_by_final_payment() {
        let outcome = detailed()
            .simulate(100.004, 0.0, 50.0, &AccelerationStrategy::None)
            .unwrap();

        assert_eq!(outcome.months_to_payoff, 2);
        let last = outcome.schedule.last().unwrap();
        assert_eq!(last.closing_balance, 0.0);
        assert!(last.payment > 50.0);
        assert!(last.payment - 50.0 <= PAYOFF_TOLERANCE);
    }

    #[test]
    fn test_invalid_inputs_rejected_before_loop() {
        let none = AccelerationStrategy::None;
        assert!(matches!(simulate_payoff(-1.0, 0.01, 100.0, &none), Err(CalcError::InvalidLoanTerms(_))));
        assert!(matches!(simulate_payoff(1_000.0, -0.01, 100.0, &none), Err(CalcError::InvalidLoanTerms(_))));
        assert!(matches!(simulate_payoff(1_000.0, 0.01, -100.0, &none), Err(CalcError::InvalidLoanTerms(_))));
        assert!(simulate_payoff(f64::NAN, 0.01, 100.0, &none).is_err());

        let bad = AccelerationStrategy::ExtraMonthly { extra_monthly: -50.0 };
        assert!(matches!(simulate_payoff(1_000.0, 0.01, 100.0, &bad), Err(CalcError::InvalidStrategy(_))));
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_balance_never_increases(
            principal in 1_000u32..1_000_000,
            rate_bp in 0u32..2_000,
            term in 12u32..481,
            extra in 0u32..2_000,
            lump in 0u32..50_000
        ) {
            let terms = LoanTerms::new(principal as f64, rate_bp as f64 / 100.0, term).unwrap();
            let payment = terms.monthly_payment().unwrap();
            let strategy = AccelerationStrategy::from_amounts(extra as f64, lump as f64);

            let outcome = detailed()
                .simulate(terms.principal, terms.monthly_rate(), payment, &strategy)
                .unwrap();

            let mut previous = outcome.starting_balance;
            for row in &outcome.schedule {
                prop_assert!(row.closing_balance <= previous);
                if row.principal > 0.0 {
                    prop_assert!(row.closing_balance < row.opening_balance);
                }
                previous = row.closing_balance;
            }
        }

        #[test]
        fn prop_contractual_payment_retires_loan_within_term(
            principal in 1_000u32..2_000_000,
            rate_bp in 1u32..1_500,
            term in 1u32..481
        ) {
            let terms = LoanTerms::new(principal as f64, rate_bp as f64 / 100.0, term).unwrap();
            let payment = terms.monthly_payment().unwrap();

            let outcome = simulate_payoff(terms.principal, terms.monthly_rate(), payment, &AccelerationStrategy::None)
                .unwrap();

            prop_assert!(outcome.is_paid_off());
            prop_assert_eq!(outcome.months_to_payoff, term);
            let expected = payment * term as f64;
            prop_assert!((outcome.total_paid - expected).abs() <= expected * 1e-6);
        }

        #[test]
        fn prop_more_extra_never_slows_payoff(
            principal in 10_000u32..800_000,
            rate_bp in 0u32..1_500,
            term in 60u32..361,
            extra_low in 0u32..1_000,
            extra_delta in 1u32..1_000
        ) {
            let terms = LoanTerms::new(principal as f64, rate_bp as f64 / 100.0, term).unwrap();
            let payment = terms.monthly_payment().unwrap();
            let rate = terms.monthly_rate();

            let low = simulate_payoff(
                terms.principal,
                rate,
                payment,
                &AccelerationStrategy::from_amounts(extra_low as f64, 0.0),
            )
            .unwrap();
            let high = simulate_payoff(
                terms.principal,
                rate,
                payment,
                &AccelerationStrategy::from_amounts((extra_low + extra_delta) as f64, 0.0),
            )
            .unwrap();

            prop_assert!(high.months_to_payoff <= low.months_to_payoff);
            prop_assert!(high.total_interest <= low.total_interest + 1e-4);
        }
    }
}
