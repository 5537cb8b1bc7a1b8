//! Fixed-width text tables for terminal output

use super::format::{
    format_currency, format_dscr, format_multiple, format_percent, PLACEHOLDER,
};
use crate::projection::{InvestmentResult, HIGHLIGHT_YEAR};
use crate::scenario::{ScenarioOutcome, SweepPoint};
use std::fmt;

fn optional_percent(value: Option<f64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| format_percent(v, 2))
}

fn optional_multiple(value: Option<f64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), format_multiple)
}

/// Purchase terms and headline metrics
pub struct SummaryTable<'a>(pub &'a InvestmentResult);

impl fmt::Display for SummaryTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        let s = &result.summary;
        let h = result.highlights();

        writeln!(f, "Purchase")?;
        writeln!(f, "  {:<24}{:>14}", "Down payment", format_currency(s.down_payment))?;
        writeln!(f, "  {:<24}{:>14}", "Amount financed", format_currency(s.amount_financed))?;
        writeln!(f, "  {:<24}{:>14}", "Monthly payment", format_currency(s.monthly_payment))?;
        writeln!(f, "  {:<24}{:>14}", "Annual debt service", format_currency(s.annual_debt_service))?;
        writeln!(f)?;
        writeln!(f, "Year one")?;
        writeln!(f, "  {:<24}{:>14}", "NOI", format_currency(s.noi_annual))?;
        writeln!(f, "  {:<24}{:>14}", "Cash flow", format_currency(s.annual_cash_flow))?;
        writeln!(f, "  {:<24}{:>14}", "Cap rate", format_percent(s.cap_rate, 2))?;
        writeln!(f, "  {:<24}{:>14}", "Cash-on-cash", format_percent(s.cash_on_cash, 2))?;
        writeln!(f, "  {:<24}{:>14}", "DSCR", format_dscr(s.dscr))?;
        writeln!(f, "  {:<24}{:>14}", "Gross rent multiplier", format!("{:.2}", s.gross_rent_multiplier))?;
        writeln!(f)?;
        writeln!(f, "{}-year hold", HIGHLIGHT_YEAR)?;
        writeln!(f, "  {:<24}{:>14}", "IRR", optional_percent(h.ten_year_irr))?;
        writeln!(f, "  {:<24}{:>14}", "Equity multiple", optional_multiple(h.ten_year_equity_multiple))?;
        writeln!(f)?;
        writeln!(f, "  {:<24}{:>14}", "Total interest", format_currency(result.total_interest()))
    }
}

/// Year-by-year projection
pub struct ProjectionTable<'a>(pub &'a InvestmentResult);

impl fmt::Display for ProjectionTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>4} {:>12} {:>11} {:>12} {:>12} {:>12} {:>13} {:>10} {:>10} {:>8}",
            "Year", "Value", "Cash Flow", "Cum. CF", "Equity", "Net Sale", "Total Profit",
            "Cash Yld", "Lev. ROI", "IRR"
        )?;
        writeln!(f, "{}", "-".repeat(112))?;
        for y in &self.0.years {
            writeln!(
                f,
                "{:>4} {:>12} {:>11} {:>12} {:>12} {:>12} {:>13} {:>10} {:>10} {:>8}",
                y.year,
                format_currency(y.appreciated_value),
                format_currency(y.annual_cash_flow),
                format_currency(y.cumulative_cash_flow),
                format_currency(y.equity),
                format_currency(y.net_sale_proceeds),
                format_currency(y.total_profit),
                format_percent(y.cash_yield, 2),
                format_percent(y.leveraged_roi, 2),
                format_percent(y.irr, 2),
            )?;
        }
        Ok(())
    }
}

/// Side-by-side comparison of named scenarios
pub struct ScenarioTable<'a>(pub &'a [ScenarioOutcome]);

impl fmt::Display for ScenarioTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<20} {:>9} {:>9} {:>7} {:>10} {:>9} {:>8} {:>14}",
            "Scenario", "Cap Rate", "CoC", "DSCR", "NOI", "10y IRR", "10y EM", "Final Profit"
        )?;
        writeln!(f, "{}", "-".repeat(93))?;
        for outcome in self.0 {
            let h = &outcome.highlights;
            let final_profit = outcome.result.final_year().map_or(0.0, |y| y.total_profit);
            writeln!(
                f,
                "{:<20.20} {:>9} {:>9} {:>7} {:>10} {:>9} {:>8} {:>14}",
                outcome.name,
                format_percent(h.cap_rate, 2),
                format_percent(h.cash_on_cash, 2),
                format_dscr(h.dscr),
                format_currency(h.noi_annual),
                optional_percent(h.ten_year_irr),
                optional_multiple(h.ten_year_equity_multiple),
                format_currency(final_profit),
            )?;
        }
        Ok(())
    }
}

/// One row per swept value
pub struct SweepTable<'a>(pub &'a [SweepPoint]);

impl fmt::Display for SweepTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variable = self.0.first().map_or("value", |p| p.variable.as_str());
        writeln!(
            f,
            "{:>18} {:>9} {:>9} {:>7} {:>9} {:>8} {:>14}",
            variable, "Cap Rate", "CoC", "DSCR", "10y IRR", "10y EM", "Final Profit"
        )?;
        writeln!(f, "{}", "-".repeat(80))?;
        for p in self.0 {
            let h = &p.highlights;
            writeln!(
                f,
                "{:>18.2} {:>9} {:>9} {:>7} {:>9} {:>8} {:>14}",
                p.value,
                format_percent(h.cap_rate, 2),
                format_percent(h.cash_on_cash, 2),
                format_dscr(h.dscr),
                optional_percent(h.ten_year_irr),
                optional_multiple(h.ten_year_equity_multiple),
                format_currency(p.final_total_profit),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::{Assumptions, NamedScenario};
    use crate::projection::calculate_investment;
    use crate::scenario::{ScenarioRunner, SweepVariable};

    #[test]
    fn test_summary_table() {
        let result = calculate_investment(&Assumptions::example_rental());
        let text = SummaryTable(&result).to_string();

        assert!(text.contains("$125,000"));
        assert!(text.contains("$375,000"));
        assert!(text.contains("$23,940"));
        assert!(text.contains("4.79%"));
        assert!(text.contains("10-year hold"));
    }

    #[test]
    fn test_summary_all_cash_dscr() {
        let result = calculate_investment(&Assumptions {
            down_payment_pct: 100.0,
            ..Assumptions::example_rental()
        });
        assert!(SummaryTable(&result).to_string().contains("∞"));
    }

    #[test]
    fn test_projection_table_has_row_per_year() {
        let result = calculate_investment(&Assumptions::example_rental());
        let text = ProjectionTable(&result).to_string();
        let lines: Vec<&str> = text.lines().collect();

        // Header and rule, then one row per year
        assert_eq!(lines.len(), 2 + 30);
        assert!(lines[0].contains("Total Profit"));
        assert!(lines[2].trim_start().starts_with('1'));
        assert!(lines[31].trim_start().starts_with("30"));
    }

    #[test]
    fn test_scenario_table_truncates_names() {
        let runner = ScenarioRunner::default();
        let outcomes = runner.run_batch(&[NamedScenario {
            name: "A very long scenario name indeed".to_string(),
            assumptions: Assumptions::example_rental(),
        }]);
        let text = ScenarioTable(&outcomes).to_string();

        assert!(text.contains("A very long scenario"));
        assert!(!text.contains("name indeed"));
    }

    #[test]
    fn test_sweep_table_names_variable() {
        let runner = ScenarioRunner::default();
        let points = runner.sweep(
            &Assumptions::example_rental(),
            SweepVariable::InterestRate,
            &[5.0, 6.0],
        );
        let text = SweepTable(&points).to_string();

        assert!(text.contains("interest-rate"));
        assert!(text.contains("5.00"));
        assert_eq!(text.lines().count(), 4);
    }
}
