//! Chart-ready series over the projection horizon

use super::format::round_half_up;
use crate::projection::InvestmentResult;
use serde::{Deserialize, Serialize};

/// Whole-dollar series keyed by `Year N` labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub property_value: Vec<f64>,
    pub equity: Vec<f64>,
    pub cumulative_cash_flow: Vec<f64>,
}

impl ChartSeries {
    pub fn from_result(result: &InvestmentResult) -> Self {
        let n = result.years.len();
        let mut series = ChartSeries {
            labels: Vec::with_capacity(n),
            property_value: Vec::with_capacity(n),
            equity: Vec::with_capacity(n),
            cumulative_cash_flow: Vec::with_capacity(n),
        };
        for y in &result.years {
            series.labels.push(format!("Year {}", y.year));
            series.property_value.push(round_half_up(y.appreciated_value));
            series.equity.push(round_half_up(y.equity));
            series.cumulative_cash_flow.push(round_half_up(y.cumulative_cash_flow));
        }
        series
    }
}
