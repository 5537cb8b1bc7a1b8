//! Core projection engine for leveraged rental property returns

use super::amortization::{amortize_year, monthly_payment, YearAmortization};
use super::cashflows::{InvestmentResult, InvestmentSummary, YearProjection};
use super::irr::{npv, solve_irr, IrrConfig, IrrPolicy};
use super::state::ProjectionState;
use crate::assumptions::{Assumptions, NormalizedAssumptions};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::env;

/// Default holding horizon in years
pub const DEFAULT_HORIZON_YEARS: u32 = 30;

/// Default vacancy allowance applied to gross rent every year
pub const DEFAULT_VACANCY_RATE: f64 = 0.05;

/// Default discount rate for per-horizon NPV
pub const DEFAULT_DISCOUNT_RATE: f64 = 0.08;

/// Longest horizon accepted from configuration or callers
pub const MAX_HORIZON_YEARS: u32 = 100;

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Number of years to project
    pub horizon_years: u32,

    /// Vacancy allowance as a fraction of gross rent
    pub vacancy_rate: f64,

    /// Discount rate for per-horizon NPV
    pub discount_rate: f64,

    /// IRR solver settings
    pub irr: IrrConfig,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            horizon_years: DEFAULT_HORIZON_YEARS,
            vacancy_rate: DEFAULT_VACANCY_RATE,
            discount_rate: DEFAULT_DISCOUNT_RATE,
            irr: IrrConfig::default(),
        }
    }
}

impl ProjectionConfig {
    /// Build config from environment variables, falling back to defaults:
    ///   PROJECTOR_HORIZON_YEARS, PROJECTOR_VACANCY_RATE,
    ///   PROJECTOR_DISCOUNT_RATE (fractions), PROJECTOR_IRR_POLICY
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with values read through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let horizon_years = match lookup("PROJECTOR_HORIZON_YEARS").map(|s| s.trim().parse::<u32>()) {
            Some(Ok(years)) if years <= MAX_HORIZON_YEARS => years,
            Some(Ok(years)) => {
                warn!(
                    "PROJECTOR_HORIZON_YEARS={} exceeds {}; using {}",
                    years, MAX_HORIZON_YEARS, defaults.horizon_years
                );
                defaults.horizon_years
            }
            _ => defaults.horizon_years,
        };

        let vacancy_rate = lookup("PROJECTOR_VACANCY_RATE")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.vacancy_rate);

        let discount_rate = lookup("PROJECTOR_DISCOUNT_RATE")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.discount_rate);

        let policy = match lookup("PROJECTOR_IRR_POLICY") {
            Some(s) => s.parse::<IrrPolicy>().unwrap_or_else(|e| {
                warn!("{}; using {}", e, defaults.irr.policy);
                defaults.irr.policy
            }),
            None => defaults.irr.policy,
        };

        Self {
            horizon_years,
            vacancy_rate,
            discount_rate,
            irr: IrrConfig {
                policy,
                ..defaults.irr
            },
        }
    }
}

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct InvestmentProjector {
    config: ProjectionConfig,
}

impl InvestmentProjector {
    /// Create a new projector with the given config
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Run the full projection. Never fails: degenerate inputs produce 0,
    /// infinity or NaN in the affected ratios instead.
    pub fn project(&self, assumptions: &Assumptions) -> InvestmentResult {
        let inputs = assumptions.normalized();
        let summary = self.summarize(&inputs);

        debug!(
            "Projecting {} years: price={} financed={} payment={:.2}",
            self.config.horizon_years,
            inputs.purchase_price,
            summary.amount_financed,
            summary.monthly_payment
        );

        let mut state = ProjectionState::at_purchase(&inputs);
        let years = (1..=self.config.horizon_years)
            .map(|_| self.project_year(&inputs, &summary, &mut state).0)
            .collect();

        InvestmentResult { summary, years }
    }

    /// Cash-flow vector behind `year`'s IRR and NPV: the down payment as an
    /// outflow, each year's operating cash flow, and the sale proceeds added
    /// to the final year. Empty for year 0.
    pub fn horizon_cash_flows(&self, assumptions: &Assumptions, year: u32) -> Vec<f64> {
        if year == 0 {
            return Vec::new();
        }
        let inputs = assumptions.normalized();
        let summary = self.summarize(&inputs);
        let mut state = ProjectionState::at_purchase(&inputs);

        let mut flows = Vec::new();
        for _ in 1..=year {
            flows = self.project_year(&inputs, &summary, &mut state).1;
        }
        flows
    }

    /// Year-one operating metrics and loan terms
    fn summarize(&self, inputs: &NormalizedAssumptions) -> InvestmentSummary {
        let gross_annual_rent = inputs.monthly_rent * 12.0;
        let egi = gross_annual_rent * (1.0 - self.config.vacancy_rate);
        let opex = egi * inputs.opex;
        let noi_annual = egi - opex;

        let down_payment = inputs.down_payment_amount();
        let amount_financed = inputs.amount_financed();
        let monthly_payment = monthly_payment(
            amount_financed,
            inputs.interest_rate,
            inputs.loan_term_years,
        );
        let annual_debt_service = monthly_payment * 12.0;
        let annual_cash_flow = noi_annual - annual_debt_service;

        InvestmentSummary {
            noi_annual,
            cap_rate: if inputs.purchase_price > 0.0 {
                noi_annual / inputs.purchase_price
            } else {
                0.0
            },
            cash_on_cash: if down_payment > 0.0 {
                annual_cash_flow / down_payment
            } else {
                0.0
            },
            dscr: if annual_debt_service > 0.0 {
                noi_annual / annual_debt_service
            } else {
                f64::INFINITY
            },
            gross_rent_multiplier: if inputs.monthly_rent > 0.0 {
                inputs.purchase_price / gross_annual_rent
            } else {
                0.0
            },
            annual_debt_service,
            annual_cash_flow,
            down_payment,
            amount_financed,
            monthly_payment,
        }
    }

    /// Project the next year and return it with its horizon cash flows
    fn project_year(
        &self,
        inputs: &NormalizedAssumptions,
        summary: &InvestmentSummary,
        state: &mut ProjectionState,
    ) -> (YearProjection, Vec<f64>) {
        state.advance_year(inputs.rent_growth);
        let year = state.year;

        // Property value
        let appreciated_value = inputs.purchase_price * (1.0 + inputs.appreciation).powf(year as f64);
        let annual_appreciation = appreciated_value
            - inputs.purchase_price * (1.0 + inputs.appreciation).powf(year as f64 - 1.0);

        // Operations
        let gross_rent = state.monthly_rent * 12.0;
        let egi = gross_rent * (1.0 - self.config.vacancy_rate);
        let annual_noi = egi - egi * inputs.opex;

        // Debt: amortize within the term, retire any balance after it
        let within_term = inputs.within_term(year);
        let amortization = if state.remaining_debt > 0.0 && within_term {
            amortize_year(
                state.remaining_debt,
                summary.monthly_payment,
                inputs.interest_rate / 12.0,
            )
        } else {
            YearAmortization {
                ending_balance: if within_term { state.remaining_debt } else { 0.0 },
                ..Default::default()
            }
        };
        state.remaining_debt = amortization.ending_balance;

        let debt_service = if within_term {
            summary.annual_debt_service
        } else {
            0.0
        };
        let annual_cash_flow = annual_noi - debt_service;

        // The horizon vector takes NOI in product form, gross x (1 - vacancy) x (1 - opex)
        let operating_flow =
            gross_rent * (1.0 - self.config.vacancy_rate) * (1.0 - inputs.opex) - debt_service;
        state.record_cash_flow(annual_cash_flow, operating_flow);

        // Position if sold at year end
        let remaining_debt = state.remaining_debt;
        let cumulative_cash_flow = state.cumulative_cash_flow;
        let down_payment = summary.down_payment;

        let equity = appreciated_value - remaining_debt;
        let net_sale_proceeds = appreciated_value * (1.0 - inputs.selling_cost) - remaining_debt;
        let total_profit = net_sale_proceeds + cumulative_cash_flow - down_payment;

        let per_dollar_invested = |amount: f64| {
            if down_payment > 0.0 {
                amount / down_payment
            } else {
                0.0
            }
        };

        // Returns over a hold ending this year
        let horizon = state.horizon_cash_flows(net_sale_proceeds);
        let solution = solve_irr(&horizon, &self.config.irr);
        let irr = self.config.irr.policy.apply(&solution);
        let horizon_npv = npv(self.config.discount_rate, &horizon);

        let projection = YearProjection {
            year,
            appreciated_value,
            annual_appreciation,
            annual_noi,
            annual_cash_flow,
            cumulative_cash_flow,
            debt_paydown: amortization.principal_paid,
            interest_paid: amortization.interest_paid,
            remaining_debt,
            equity,
            net_sale_proceeds,
            total_profit,
            cash_yield: per_dollar_invested(cumulative_cash_flow),
            leveraged_roi: per_dollar_invested(equity + cumulative_cash_flow),
            irr,
            equity_multiple: per_dollar_invested(cumulative_cash_flow + net_sale_proceeds),
            npv: horizon_npv,
        };

        (projection, horizon)
    }
}

/// Project `assumptions` with the default configuration
pub fn calculate_investment(assumptions: &Assumptions) -> InvestmentResult {
    InvestmentProjector::default().project(assumptions)
}
