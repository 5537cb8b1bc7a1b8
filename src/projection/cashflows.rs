//! Output structures for investment projections

use serde::{Deserialize, Serialize};

/// One projected holding year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearProjection {
    pub year: u32,

    // Property value
    pub appreciated_value: f64,
    pub annual_appreciation: f64,

    // Operations
    pub annual_noi: f64,
    pub annual_cash_flow: f64,
    pub cumulative_cash_flow: f64,

    // Debt
    pub debt_paydown: f64,
    pub interest_paid: f64,
    pub remaining_debt: f64,

    // Position if sold at year end
    pub equity: f64,
    pub net_sale_proceeds: f64,
    pub total_profit: f64,

    // Returns (fractions)
    pub cash_yield: f64,
    pub leveraged_roi: f64,
    /// IRR over a hold ending this year; NaN when it cannot be estimated
    pub irr: f64,
    pub equity_multiple: f64,
    /// NPV of the same hold at the projection discount rate
    pub npv: f64,
}

/// Year-one operating metrics and loan terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentSummary {
    pub noi_annual: f64,
    pub cap_rate: f64,
    pub cash_on_cash: f64,
    /// Infinite when there is no debt service
    pub dscr: f64,
    pub gross_rent_multiplier: f64,
    pub annual_debt_service: f64,
    pub annual_cash_flow: f64,
    pub down_payment: f64,
    pub amount_financed: f64,
    pub monthly_payment: f64,
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentResult {
    pub summary: InvestmentSummary,

    /// Years 1..=horizon in order
    pub years: Vec<YearProjection>,
}

/// Holding period used for the headline IRR and equity multiple
pub const HIGHLIGHT_YEAR: u32 = 10;

impl InvestmentResult {
    /// Projection for a given 1-indexed year
    pub fn year(&self, year: u32) -> Option<&YearProjection> {
        if year == 0 {
            return None;
        }
        self.years.get(year as usize - 1)
    }

    pub fn final_year(&self) -> Option<&YearProjection> {
        self.years.last()
    }

    /// Headline metrics: year-one ratios plus the 10-year hold
    pub fn highlights(&self) -> Highlights {
        let hold = self.year(HIGHLIGHT_YEAR);
        Highlights {
            cap_rate: self.summary.cap_rate,
            cash_on_cash: self.summary.cash_on_cash,
            noi_annual: self.summary.noi_annual,
            dscr: self.summary.dscr,
            ten_year_irr: hold.map(|y| y.irr),
            ten_year_equity_multiple: hold.map(|y| y.equity_multiple),
        }
    }

    /// Total interest paid across the projection
    pub fn total_interest(&self) -> f64 {
        self.years.iter().map(|y| y.interest_paid).sum()
    }
}

/// Headline metrics shown alongside a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlights {
    pub cap_rate: f64,
    pub cash_on_cash: f64,
    pub noi_annual: f64,
    pub dscr: f64,
    /// `None` when fewer than ten years were projected
    pub ten_year_irr: Option<f64>,
    pub ten_year_equity_multiple: Option<f64>,
}
