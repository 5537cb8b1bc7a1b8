//! Fixed-rate loan amortization

/// Level monthly payment for a fully amortizing fixed-rate loan.
///
/// Returns 0 when there is nothing to finance or no term, and a straight-line
/// `principal / months` when the rate is zero or negative.
pub fn monthly_payment(principal: f64, annual_rate: f64, years: f64) -> f64 {
    if principal <= 0.0 || years <= 0.0 {
        return 0.0;
    }
    let months = years * 12.0;
    if annual_rate <= 0.0 {
        return principal / months;
    }
    let r = annual_rate / 12.0;
    let growth = (1.0 + r).powf(months);
    principal * (r * growth) / (growth - 1.0)
}

/// Principal and interest paid over one year of monthly payments
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct YearAmortization {
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub ending_balance: f64,
}

/// Run twelve monthly payments against `balance`.
///
/// Stops early once the balance is gone; the final principal portion is
/// capped so the balance lands exactly on zero.
pub fn amortize_year(balance: f64, payment: f64, monthly_rate: f64) -> YearAmortization {
    let mut year = YearAmortization {
        ending_balance: balance,
        ..Default::default()
    };

    for _month in 0..12 {
        if year.ending_balance <= 0.0 {
            break;
        }
        let interest = year.ending_balance * monthly_rate;
        let mut principal = payment - interest;
        if principal > year.ending_balance {
            principal = year.ending_balance;
        }
        year.ending_balance -= principal;
        year.principal_paid += principal;
        year.interest_paid += interest;
    }

    year
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_standard_mortgage_payment() {
        // $375k at 7% over 30 years
        let payment = monthly_payment(375_000.0, 0.07, 30.0);
        assert_relative_eq!(payment, 2494.884, epsilon = 0.001);
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        assert_eq!(monthly_payment(120_000.0, 0.0, 10.0), 1_000.0);
        assert_eq!(monthly_payment(120_000.0, -0.01, 10.0), 1_000.0);
    }

    #[test]
    fn test_nothing_to_finance() {
        assert_eq!(monthly_payment(0.0, 0.07, 30.0), 0.0);
        assert_eq!(monthly_payment(-5.0, 0.07, 30.0), 0.0);
        assert_eq!(monthly_payment(100_000.0, 0.07, 0.0), 0.0);
    }

    #[test]
    fn test_first_year_split() {
        let payment = monthly_payment(375_000.0, 0.07, 30.0);
        let year = amortize_year(375_000.0, payment, 0.07 / 12.0);

        assert_relative_eq!(year.principal_paid + year.interest_paid, payment * 12.0, epsilon = 1e-6);
        assert_relative_eq!(year.ending_balance, 375_000.0 - year.principal_paid, epsilon = 1e-6);
        // Early payments are mostly interest
        assert!(year.interest_paid > year.principal_paid * 5.0);
    }

    #[test]
    fn test_final_payment_capped_at_balance() {
        let year = amortize_year(1_500.0, 1_000.0, 0.0);
        assert_eq!(year.principal_paid, 1_500.0);
        assert_eq!(year.ending_balance, 0.0);
    }

    #[test]
    fn test_paid_off_balance_untouched() {
        let year = amortize_year(0.0, 1_000.0, 0.005);
        assert_eq!(year, YearAmortization::default());
    }
}
