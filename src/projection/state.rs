//! Running state carried from one projected year to the next

use crate::assumptions::NormalizedAssumptions;

/// State of the investment at the end of the most recent projected year
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Last projected year (0 before the first)
    pub year: u32,

    /// Monthly rent in effect for the current year
    pub monthly_rent: f64,

    /// Loan balance at the end of the current year
    pub remaining_debt: f64,

    /// Sum of annual cash flows to date
    pub cumulative_cash_flow: f64,

    /// Operating cash flows per year; index 0 holds the equity outlay
    operating_flows: Vec<f64>,
}

impl ProjectionState {
    /// Initialize state at acquisition
    pub fn at_purchase(inputs: &NormalizedAssumptions) -> Self {
        Self {
            year: 0,
            monthly_rent: inputs.monthly_rent,
            remaining_debt: inputs.amount_financed(),
            cumulative_cash_flow: 0.0,
            operating_flows: vec![-inputs.down_payment_amount()],
        }
    }

    /// Advance to the next year, growing rent from year 2 on
    pub fn advance_year(&mut self, rent_growth: f64) {
        self.year += 1;
        if self.year > 1 {
            self.monthly_rent *= 1.0 + rent_growth;
        }
    }

    /// Record this year's cash flow
    pub fn record_cash_flow(&mut self, annual_cash_flow: f64, operating_flow: f64) {
        self.cumulative_cash_flow += annual_cash_flow;
        self.operating_flows.push(operating_flow);
    }

    /// Cash flows for a hold ending at the current year: the equity outlay,
    /// each year's operating flow, and the sale proceeds on top of the last.
    pub fn horizon_cash_flows(&self, net_sale_proceeds: f64) -> Vec<f64> {
        let mut flows = self.operating_flows.clone();
        if let Some(last) = flows.last_mut().filter(|_| self.year > 0) {
            *last += net_sale_proceeds;
        }
        flows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::Assumptions;

    #[test]
    fn test_rent_grows_from_year_two() {
        let mut a = Assumptions::example_rental();
        a.rent_growth = 10.0;
        let inputs = a.normalized();
        let mut state = ProjectionState::at_purchase(&inputs);

        state.advance_year(inputs.rent_growth);
        assert_eq!(state.monthly_rent, 3_000.0);

        state.advance_year(inputs.rent_growth);
        assert_eq!(state.monthly_rent, 3_000.0 * 1.1);
    }

    #[test]
    fn test_horizon_adds_sale_to_last_year() {
        let inputs = Assumptions::example_rental().normalized();
        let mut state = ProjectionState::at_purchase(&inputs);

        state.advance_year(inputs.rent_growth);
        state.record_cash_flow(1_000.0, 1_000.0);
        state.advance_year(inputs.rent_growth);
        state.record_cash_flow(1_200.0, 1_200.0);

        assert_eq!(state.cumulative_cash_flow, 2_200.0);
        assert_eq!(
            state.horizon_cash_flows(50_000.0),
            vec![-125_000.0, 1_000.0, 51_200.0]
        );
    }

    #[test]
    fn test_horizon_before_first_year_is_outlay_only() {
        let inputs = Assumptions::example_rental().normalized();
        let state = ProjectionState::at_purchase(&inputs);
        assert_eq!(state.horizon_cash_flows(99.0), vec![-125_000.0]);
    }
}
