//! Property, loan and market assumptions for an investment projection

mod input;
pub mod loader;

pub use input::{parse_number, RawInputs};
pub use loader::{load_scenarios, load_scenarios_from_reader, NamedScenario};

use serde::{Deserialize, Serialize};

/// Caller-supplied assumptions, with rates in percent as a user types them
/// (7.0 means 7 %).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assumptions {
    /// Acquisition price
    pub purchase_price: f64,

    /// Gross monthly rent at year 0
    pub monthly_rent: f64,

    /// Share of the price paid in cash (0-100)
    pub down_payment_pct: f64,

    /// Nominal annual loan rate
    pub interest_rate: f64,

    /// Operating expenses as a share of effective gross income
    pub opex_pct: f64,

    /// Annual property value growth
    pub appreciation_rate: f64,

    /// Annual rent growth
    pub rent_growth: f64,

    /// Amortization term in years
    #[serde(alias = "loanTerm")]
    pub loan_term_years: f64,

    /// Transaction costs on disposal
    #[serde(alias = "sellingCost")]
    pub selling_cost_pct: f64,
}

impl Assumptions {
    /// A leveraged single-family rental used as the default scenario
    pub fn example_rental() -> Self {
        Self {
            purchase_price: 500_000.0,
            monthly_rent: 3_000.0,
            down_payment_pct: 25.0,
            interest_rate: 7.0,
            opex_pct: 30.0,
            appreciation_rate: 3.0,
            rent_growth: 3.0,
            loan_term_years: 30.0,
            selling_cost_pct: 6.0,
        }
    }

    /// Convert percent inputs to fractions
    pub fn normalized(&self) -> NormalizedAssumptions {
        NormalizedAssumptions {
            purchase_price: self.purchase_price,
            monthly_rent: self.monthly_rent,
            down_payment: self.down_payment_pct / 100.0,
            interest_rate: self.interest_rate / 100.0,
            opex: self.opex_pct / 100.0,
            appreciation: self.appreciation_rate / 100.0,
            rent_growth: self.rent_growth / 100.0,
            loan_term_years: self.loan_term_years,
            selling_cost: self.selling_cost_pct / 100.0,
        }
    }

    /// Non-fatal concerns about the inputs. The engine runs regardless and
    /// substitutes 0 or infinity wherever a ratio would divide by zero.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        let fields = [
            ("purchasePrice", self.purchase_price),
            ("monthlyRent", self.monthly_rent),
            ("downPaymentPct", self.down_payment_pct),
            ("interestRate", self.interest_rate),
            ("opexPct", self.opex_pct),
            ("appreciationRate", self.appreciation_rate),
            ("rentGrowth", self.rent_growth),
            ("loanTermYears", self.loan_term_years),
            ("sellingCostPct", self.selling_cost_pct),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                warnings.push(format!("{} is not a finite number", name));
            }
        }

        if self.purchase_price <= 0.0 {
            warnings.push("purchase price is not positive; cap rate reported as 0".to_string());
        }
        if self.monthly_rent <= 0.0 {
            warnings.push("monthly rent is not positive; gross rent multiplier reported as 0".to_string());
        }
        if !(0.0..=100.0).contains(&self.down_payment_pct) {
            warnings.push(format!(
                "down payment of {}% is outside 0-100%",
                self.down_payment_pct
            ));
        }
        if self.loan_term_years < 0.0 {
            warnings.push("loan term is negative; loan treated as already repaid".to_string());
        } else if self.loan_term_years.fract() != 0.0 {
            warnings.push(format!(
                "loan term of {} years is not a whole number of years",
                self.loan_term_years
            ));
        }

        warnings
    }
}

/// Assumptions with every rate expressed as a fraction (0.07 = 7 %)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedAssumptions {
    pub purchase_price: f64,
    pub monthly_rent: f64,
    pub down_payment: f64,
    pub interest_rate: f64,
    pub opex: f64,
    pub appreciation: f64,
    pub rent_growth: f64,
    pub loan_term_years: f64,
    pub selling_cost: f64,
}

impl NormalizedAssumptions {
    pub fn down_payment_amount(&self) -> f64 {
        self.purchase_price * self.down_payment
    }

    pub fn amount_financed(&self) -> f64 {
        self.purchase_price - self.down_payment_amount()
    }

    /// Whether `year` (1-indexed) still falls within the loan term
    pub fn within_term(&self, year: u32) -> bool {
        year as f64 <= self.loan_term_years
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalized_divides_percentages() {
        let rates = Assumptions::example_rental().normalized();
        assert_relative_eq!(rates.down_payment, 0.25);
        assert_relative_eq!(rates.interest_rate, 0.07);
        assert_relative_eq!(rates.opex, 0.30);
        assert_relative_eq!(rates.selling_cost, 0.06);
        assert_eq!(rates.loan_term_years, 30.0);
        assert_relative_eq!(rates.down_payment_amount(), 125_000.0);
        assert_relative_eq!(rates.amount_financed(), 375_000.0);
    }

    #[test]
    fn test_within_term() {
        let mut a = Assumptions::example_rental();
        a.loan_term_years = 15.0;
        let rates = a.normalized();
        assert!(rates.within_term(15));
        assert!(!rates.within_term(16));

        a.loan_term_years = 0.0;
        assert!(!a.normalized().within_term(1));
    }

    #[test]
    fn test_warnings_clean_for_example() {
        assert!(Assumptions::example_rental().warnings().is_empty());
    }

    #[test]
    fn test_warnings_for_degenerate_inputs() {
        let a = Assumptions {
            purchase_price: 0.0,
            monthly_rent: 0.0,
            down_payment_pct: 120.0,
            loan_term_years: 12.5,
            ..Assumptions::example_rental()
        };
        let warnings = a.warnings();
        assert_eq!(warnings.len(), 4);
        assert!(warnings[0].contains("purchase price"));
        assert!(warnings[3].contains("12.5"));
    }

    #[test]
    fn test_deserialize_accepts_short_aliases() {
        let json = r#"{
            "purchasePrice": 400000, "monthlyRent": 2500, "downPaymentPct": 20,
            "interestRate": 6.5, "opexPct": 35, "appreciationRate": 3,
            "rentGrowth": 2, "loanTerm": 30, "sellingCost": 6
        }"#;
        let a: Assumptions = serde_json::from_str(json).unwrap();
        assert_eq!(a.loan_term_years, 30.0);
        assert_eq!(a.selling_cost_pct, 6.0);
    }
}
