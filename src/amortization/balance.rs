//! Closed-form remaining balance at an arbitrary elapsed period
//!
//! Lets a simulation start part way through a loan (e.g. 5 years into a
//! 30-year mortgage) without replaying every earlier month.

use crate::error::{CalcError, Result};
use crate::loan::{ElapsedState, LoanTerms};

/// Remaining balance after `months_paid` level payments
///
/// `P(1+i)^k - pmt * ((1+i)^k - 1) / i`, or `P - pmt * k` when `i == 0`.
/// Floored at zero so floating-point overshoot past payoff never yields a
/// negative balance.
pub fn project_balance(principal: f64, payment: f64, monthly_rate: f64, months_paid: u32) -> f64 {
    let k = months_paid as f64;

    let balance = if monthly_rate == 0.0 {
        principal - payment * k
    } else {
        let growth = (1.0 + monthly_rate).powf(k);
        if growth.is_infinite() {
            // Sign of the balance is decided by payment vs. interest-only
            let interest_only = principal * monthly_rate;
            return if payment > interest_only {
                0.0
            } else if payment == interest_only {
                principal
            } else {
                f64::INFINITY
            };
        }
        principal * growth - payment * (growth - 1.0) / monthly_rate
    };

    balance.max(0.0)
}

impl ElapsedState {
    /// Loan state after `months_elapsed` contractual payments
    ///
    /// # Errors
    /// `InvalidLoanTerms` for invalid terms or `months_elapsed >= term_months`.
    pub fn project(terms: &LoanTerms, months_elapsed: u32) -> Result<Self> {
        terms.validate()?;
        if months_elapsed >= terms.term_months {
            return Err(CalcError::InvalidLoanTerms(format!(
                "{} months elapsed is not within the {}-month term",
                months_elapsed, terms.term_months
            )));
        }

        let payment = terms.monthly_payment()?;
        Ok(Self {
            months_elapsed,
            current_balance: project_balance(terms.principal, payment, terms.monthly_rate(), months_elapsed),
        })
    }
}
