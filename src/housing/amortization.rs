//! Mortgage payment calculation
//!
//! Produces the single monthly figure stored on a housing record. The
//! projection reuses it unchanged for every active year; no declining
//! balance is tracked.

use serde::{Deserialize, Serialize};

/// Loan repayment convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepaymentMethod {
    /// Constant total payment (annuity)
    #[default]
    EqualPayment,
    /// Constant principal portion with declining interest
    EqualPrincipal,
}

/// Terms of a housing loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Principal borrowed
    pub loan_amount: f64,
    /// Annual interest rate in percent
    pub interest_rate: f64,
    pub term_years: u32,
    pub repayment_method: RepaymentMethod,
}

impl LoanTerms {
    /// Loan for a purchase: principal is price minus down payment, never negative
    pub fn from_purchase(
        purchase_price: f64,
        down_payment: f64,
        interest_rate: f64,
        term_years: u32,
        repayment_method: RepaymentMethod,
    ) -> Self {
        Self {
            loan_amount: (purchase_price - down_payment).max(0.0),
            interest_rate,
            term_years,
            repayment_method,
        }
    }

    pub fn monthly_payment(&self) -> f64 {
        compute_monthly_payment(
            self.loan_amount,
            self.interest_rate,
            self.term_years,
            self.repayment_method,
        )
    }
}

/// Monthly payment for a loan.
///
/// Returns 0 for a non-positive principal or term and for a negative rate
/// (cash purchase and similar degenerate cases). A zero rate spreads the
/// principal evenly over the term.
///
/// For [`RepaymentMethod::EqualPrincipal`] only the first period's payment is
/// returned.
pub fn compute_monthly_payment(
    loan_amount: f64,
    annual_rate_pct: f64,
    term_years: u32,
    method: RepaymentMethod,
) -> f64 {
    if loan_amount <= 0.0 || annual_rate_pct < 0.0 || term_years == 0 {
        return 0.0;
    }

    let monthly_rate = annual_rate_pct / 100.0 / 12.0;
    let num_payments = f64::from(term_years) * 12.0;

    match method {
        RepaymentMethod::EqualPayment => {
            if monthly_rate == 0.0 {
                loan_amount / num_payments
            } else {
                // r / (1 - (1+r)^-n), equal to r(1+r)^n / ((1+r)^n - 1) and
                // tending to r for very long terms
                let discount = (1.0 + monthly_rate).powf(-num_payments);
                loan_amount * monthly_rate / (1.0 - discount)
            }
        }
        RepaymentMethod::EqualPrincipal => {
            let principal_payment = loan_amount / num_payments;
            let interest_payment = loan_amount * monthly_rate;
            principal_payment + interest_payment
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_principal_is_free() {
        assert_eq!(compute_monthly_payment(0.0, 1.5, 35, RepaymentMethod::EqualPayment), 0.0);
        assert_eq!(compute_monthly_payment(-10.0, 1.5, 35, RepaymentMethod::EqualPrincipal), 0.0);
    }

    #[test]
    fn test_zero_term_is_free() {
        assert_eq!(compute_monthly_payment(30_000_000.0, 1.5, 0, RepaymentMethod::EqualPayment), 0.0);
    }

    #[test]
    fn test_zero_rate_spreads_principal() {
        let payment = compute_monthly_payment(30_000_000.0, 0.0, 35, RepaymentMethod::EqualPayment);
        assert_eq!(payment, 30_000_000.0 / 420.0);
    }

    #[test]
    fn test_equal_payment_annuity() {
        // 30M yen over 35 years at 1.5%: roughly 91,855 yen/month
        let payment = compute_monthly_payment(30_000_000.0, 1.5, 35, RepaymentMethod::EqualPayment);
        assert_relative_eq!(payment, 91_855.0, max_relative = 1e-3);

        // Total repaid exceeds principal
        assert!(payment * 420.0 > 30_000_000.0);
    }

    #[test]
    fn test_equal_principal_first_period_only() {
        let payment = compute_monthly_payment(30_000_000.0, 1.2, 35, RepaymentMethod::EqualPrincipal);
        let expected = 30_000_000.0 / 420.0 + 30_000_000.0 * 0.001;
        assert_relative_eq!(payment, expected, epsilon = 1e-9);

        // First equal-principal payment is above the level annuity payment
        let level = compute_monthly_payment(30_000_000.0, 1.2, 35, RepaymentMethod::EqualPayment);
        assert!(payment > level);
    }

    #[test]
    fn test_very_long_term_stays_finite() {
        let payment = compute_monthly_payment(1_000.0, 1.0, 400_000_000, RepaymentMethod::EqualPayment);
        // Interest-only in the limit
        assert_relative_eq!(payment, 1_000.0 * 0.01 / 12.0, max_relative = 1e-9);

        let payment = compute_monthly_payment(1_000.0, 0.0, u32::MAX, RepaymentMethod::EqualPayment);
        assert_relative_eq!(payment, 1_000.0 / (f64::from(u32::MAX) * 12.0), max_relative = 1e-12);

        let payment = compute_monthly_payment(1_000.0, 1.0, u32::MAX, RepaymentMethod::EqualPrincipal);
        assert!(payment.is_finite());
        assert!(payment > 1_000.0 * 0.01 / 12.0);
    }

    #[test]
    fn test_purchase_principal_floored_at_zero() {
        let terms = LoanTerms::from_purchase(20_000_000.0, 25_000_000.0, 1.0, 30, RepaymentMethod::EqualPayment);
        assert_eq!(terms.loan_amount, 0.0);
        assert_eq!(terms.monthly_payment(), 0.0);
    }
}
