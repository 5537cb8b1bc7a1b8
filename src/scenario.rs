//! Scenario runner for batch projections and one-variable sweeps
//!
//! Each projection is independent, so batches and sweeps fan out across
//! threads with rayon; results come back in input order.

use crate::assumptions::{Assumptions, NamedScenario};
use crate::error::ProjectorError;
use crate::projection::{Highlights, InvestmentProjector, InvestmentResult, ProjectionConfig};
use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest number of points a sweep range may expand to
pub const MAX_SWEEP_POINTS: usize = 1_000;

/// Runner holding one projection configuration for many runs
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(ProjectionConfig::default());
/// let points = runner.sweep(&base, SweepVariable::InterestRate, &[5.0, 6.0, 7.0]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    projector: InvestmentProjector,
}

/// One named scenario with its projection
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub assumptions: Assumptions,
    pub highlights: Highlights,
    pub result: InvestmentResult,
}

/// One point of a sweep
#[derive(Debug, Clone, Serialize)]
pub struct SweepPoint {
    pub variable: SweepVariable,
    pub value: f64,
    pub highlights: Highlights,
    /// Total profit if sold at the end of the horizon
    pub final_total_profit: f64,
}

impl ScenarioRunner {
    pub fn new(config: ProjectionConfig) -> Self {
        Self {
            projector: InvestmentProjector::new(config),
        }
    }

    pub fn config(&self) -> &ProjectionConfig {
        self.projector.config()
    }

    /// Run a single projection
    pub fn run(&self, assumptions: &Assumptions) -> InvestmentResult {
        self.projector.project(assumptions)
    }

    /// Run every named scenario
    pub fn run_batch(&self, scenarios: &[NamedScenario]) -> Vec<ScenarioOutcome> {
        info!("Running {} scenarios", scenarios.len());
        scenarios
            .par_iter()
            .map(|scenario| {
                let result = self.projector.project(&scenario.assumptions);
                ScenarioOutcome {
                    name: scenario.name.clone(),
                    assumptions: scenario.assumptions.clone(),
                    highlights: result.highlights(),
                    result,
                }
            })
            .collect()
    }

    /// Project `base` once per value, overriding one assumption each time
    pub fn sweep(&self, base: &Assumptions, variable: SweepVariable, values: &[f64]) -> Vec<SweepPoint> {
        info!("Sweeping {} over {} values", variable, values.len());
        values
            .par_iter()
            .map(|&value| {
                let assumptions = variable.apply(base, value);
                let result = self.projector.project(&assumptions);
                SweepPoint {
                    variable,
                    value,
                    highlights: result.highlights(),
                    final_total_profit: result.final_year().map_or(0.0, |y| y.total_profit),
                }
            })
            .collect()
    }
}

/// The assumption varied by a sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SweepVariable {
    PurchasePrice,
    MonthlyRent,
    DownPaymentPct,
    InterestRate,
    OpexPct,
    AppreciationRate,
    RentGrowth,
    LoanTermYears,
    SellingCostPct,
}

impl SweepVariable {
    pub const ALL: [SweepVariable; 9] = [
        SweepVariable::PurchasePrice,
        SweepVariable::MonthlyRent,
        SweepVariable::DownPaymentPct,
        SweepVariable::InterestRate,
        SweepVariable::OpexPct,
        SweepVariable::AppreciationRate,
        SweepVariable::RentGrowth,
        SweepVariable::LoanTermYears,
        SweepVariable::SellingCostPct,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SweepVariable::PurchasePrice => "purchase-price",
            SweepVariable::MonthlyRent => "monthly-rent",
            SweepVariable::DownPaymentPct => "down-payment-pct",
            SweepVariable::InterestRate => "interest-rate",
            SweepVariable::OpexPct => "opex-pct",
            SweepVariable::AppreciationRate => "appreciation-rate",
            SweepVariable::RentGrowth => "rent-growth",
            SweepVariable::LoanTermYears => "loan-term-years",
            SweepVariable::SellingCostPct => "selling-cost-pct",
        }
    }

    /// Copy of `base` with this variable set to `value`
    pub fn apply(&self, base: &Assumptions, value: f64) -> Assumptions {
        let mut a = base.clone();
        match self {
            SweepVariable::PurchasePrice => a.purchase_price = value,
            SweepVariable::MonthlyRent => a.monthly_rent = value,
            SweepVariable::DownPaymentPct => a.down_payment_pct = value,
            SweepVariable::InterestRate => a.interest_rate = value,
            SweepVariable::OpexPct => a.opex_pct = value,
            SweepVariable::AppreciationRate => a.appreciation_rate = value,
            SweepVariable::RentGrowth => a.rent_growth = value,
            SweepVariable::LoanTermYears => a.loan_term_years = value,
            SweepVariable::SellingCostPct => a.selling_cost_pct = value,
        }
        a
    }
}

impl fmt::Display for SweepVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SweepVariable {
    type Err = ProjectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('_', "-").to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == wanted)
            .ok_or_else(|| ProjectorError::UnknownVariable(s.to_string()))
    }
}

/// Inclusive range `from, from + step, ..., to`
pub fn sweep_values(from: f64, to: f64, step: f64) -> Result<Vec<f64>, ProjectorError> {
    if !(from.is_finite() && to.is_finite() && step.is_finite()) {
        return Err(ProjectorError::InvalidRange("bounds and step must be finite".into()));
    }
    if step <= 0.0 {
        return Err(ProjectorError::InvalidRange(format!("step {} must be positive", step)));
    }
    if to < from {
        return Err(ProjectorError::InvalidRange(format!("end {} is below start {}", to, from)));
    }

    let span = (to - from) / step;
    if !span.is_finite() || span >= MAX_SWEEP_POINTS as f64 {
        return Err(ProjectorError::InvalidRange(format!(
            "from {} to {} by {} exceeds the limit of {} points",
            from, to, step, MAX_SWEEP_POINTS
        )));
    }

    // Half-step slack so float drift does not drop the end point
    let count = ((span + 0.5).floor() as usize + 1).min(MAX_SWEEP_POINTS);

    Ok((0..count)
        .map(|i| from + step * i as f64)
        .filter(|v| *v <= to + step * 1e-9)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(name: &str, down_payment_pct: f64) -> NamedScenario {
        NamedScenario {
            name: name.to_string(),
            assumptions: Assumptions {
                down_payment_pct,
                ..Assumptions::example_rental()
            },
        }
    }

    #[test]
    fn test_run_batch_preserves_order() {
        let runner = ScenarioRunner::default();
        let scenarios: Vec<_> = [20.0, 25.0, 50.0, 100.0]
            .iter()
            .map(|&dp| scenario(&format!("{}% down", dp), dp))
            .collect();

        let outcomes = runner.run_batch(&scenarios);
        assert_eq!(outcomes.len(), 4);
        for (outcome, scenario) in outcomes.iter().zip(&scenarios) {
            assert_eq!(outcome.name, scenario.name);
            assert_eq!(outcome.result, runner.run(&scenario.assumptions));
        }

        // All cash has no debt service
        assert!(outcomes[3].highlights.dscr.is_infinite());
    }

    #[test]
    fn test_sweep_interest_rate() {
        let runner = ScenarioRunner::default();
        let base = Assumptions::example_rental();
        let points = runner.sweep(&base, SweepVariable::InterestRate, &[4.0, 6.0, 8.0]);

        assert_eq!(points.len(), 3);
        assert_eq!(points[0].value, 4.0);
        // Higher rates mean more debt service and lower coverage
        assert!(points[0].highlights.dscr > points[1].highlights.dscr);
        assert!(points[1].highlights.dscr > points[2].highlights.dscr);
        assert!(points[0].highlights.cash_on_cash > points[2].highlights.cash_on_cash);
    }

    #[test]
    fn test_variable_parsing() {
        assert_eq!("interest-rate".parse::<SweepVariable>().unwrap(), SweepVariable::InterestRate);
        assert_eq!("loan_term_years".parse::<SweepVariable>().unwrap(), SweepVariable::LoanTermYears);
        assert_eq!("Rent-Growth".parse::<SweepVariable>().unwrap(), SweepVariable::RentGrowth);
        assert!("vacancy".parse::<SweepVariable>().is_err());

        for v in SweepVariable::ALL {
            assert_eq!(v.to_string().parse::<SweepVariable>().unwrap(), v);
        }
    }

    #[test]
    fn test_apply_overrides_one_field() {
        let base = Assumptions::example_rental();
        let swept = SweepVariable::OpexPct.apply(&base, 45.0);
        assert_eq!(swept.opex_pct, 45.0);
        assert_eq!(Assumptions { opex_pct: 30.0, ..swept }, base);
    }

    #[test]
    fn test_sweep_values_inclusive() {
        assert_eq!(sweep_values(5.0, 7.0, 0.5).unwrap(), vec![5.0, 5.5, 6.0, 6.5, 7.0]);
        assert_eq!(sweep_values(3.0, 3.0, 1.0).unwrap(), vec![3.0]);

        let tenths = sweep_values(0.0, 1.0, 0.1).unwrap();
        assert_eq!(tenths.len(), 11);
    }

    #[test]
    fn test_sweep_values_rejects_bad_ranges() {
        assert!(sweep_values(0.0, 1.0, 0.0).is_err());
        assert!(sweep_values(0.0, 1.0, -0.5).is_err());
        assert!(sweep_values(2.0, 1.0, 0.5).is_err());
        assert!(sweep_values(0.0, f64::INFINITY, 1.0).is_err());
        assert!(sweep_values(0.0, 1_000_000.0, 1.0).is_err());
    }

    #[test]
    fn test_sweep_values_rejects_unbounded_spans() {
        // Finite bounds whose point count is not representable
        assert!(matches!(
            sweep_values(0.0, 1e300, 1e-300),
            Err(ProjectorError::InvalidRange(_))
        ));
        assert!(matches!(
            sweep_values(-1e308, 1e308, 1.0),
            Err(ProjectorError::InvalidRange(_))
        ));
        assert!(sweep_values(0.0, 999.0, 1.0).is_ok());
        assert!(sweep_values(0.0, 1_000.0, 1.0).is_err());
    }
}
