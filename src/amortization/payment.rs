//! Closed-form level payment for a fully amortizing loan

use crate::error::Result;
use crate::loan::LoanTerms;

/// Convert a nominal annual rate in percent to a monthly decimal rate
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / 12.0
}

/// Fixed monthly payment that retires `principal` over `term_months`
///
/// Uses the annuity formula in its discounted form `P * i / (1 - (1+i)^-n)`
/// with `i = rate / 100 / 12`, which tends to the interest-only payment
/// `P * i` for very long or high-rate terms instead of overflowing. An
/// interest-free loan takes the linear branch `P / n` so the formula's 0/0
/// singularity is never evaluated.
///
/// # Errors
/// `CalcError::InvalidLoanTerms` when principal <= 0, term == 0 or rate < 0.
pub fn compute_payment(principal: f64, annual_rate_percent: f64, term_months: u32) -> Result<f64> {
    LoanTerms {
        principal,
        annual_rate_percent,
        term_months,
    }
    .validate()?;

    let rate = monthly_rate(annual_rate_percent);
    if rate == 0.0 {
        return Ok(principal / term_months as f64);
    }

    let discount = (1.0 + rate).powf(-(term_months as f64));
    Ok(principal * rate / (1.0 - discount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_zero_rate_is_linear() {
        let payment = compute_payment(12_000.0, 0.0, 12).unwrap();
        assert_eq!(payment, 1000.0);
    }

    #[test]
    fn test_standard_mortgage_payment() {
        // 300k at 6.5% over 30 years
        let payment = compute_payment(300_000.0, 6.5, 360).unwrap();
        assert_abs_diff_eq!(payment, 1896.20, epsilon = 0.01);
    }

    #[test]
    fn test_short_loan_payment() {
        // 10k at 12% over 12 months: textbook value 888.49
        let payment = compute_payment(10_000.0, 12.0, 12).unwrap();
        assert_abs_diff_eq!(payment, 888.49, epsilon = 0.01);
    }

    #[test]
    fn test_single_period_pays_principal_plus_interest() {
        let payment = compute_payment(1_000.0, 12.0, 1).unwrap();
        assert_abs_diff_eq!(payment, 1_010.0, epsilon = 1e-9);
    }

    #[test]
    fn test_payment_exceeds_interest_only() {
        let principal = 250_000.0;
        let payment = compute_payment(principal, 7.0, 360).unwrap();
        assert!(payment > principal * monthly_rate(7.0));
    }

    #[test]
    fn test_long_high_rate_term_stays_finite() {
        // (1.0833)^10000 overflows; the payment tends to interest-only
        let payment = compute_payment(1_000.0, 100.0, 10_000).unwrap();
        assert!(payment.is_finite());
        assert_abs_diff_eq!(payment, 1_000.0 * monthly_rate(100.0), epsilon = 1e-9);

        let payment = compute_payment(250_000.0, 5.0, u32::MAX).unwrap();
        assert!(payment.is_finite());
        assert!(payment >= 250_000.0 * monthly_rate(5.0));
    }

    #[test]
    fn test_invalid_terms_rejected() {
        assert!(matches!(compute_payment(0.0, 5.0, 12), Err(CalcError::InvalidLoanTerms(_))));
        assert!(matches!(compute_payment(-1.0, 5.0, 12), Err(CalcError::InvalidLoanTerms(_))));
        assert!(matches!(compute_payment(1000.0, 5.0, 0), Err(CalcError::InvalidLoanTerms(_))));
        assert!(matches!(compute_payment(1000.0, -5.0, 12), Err(CalcError::InvalidLoanTerms(_))));
    }
}
