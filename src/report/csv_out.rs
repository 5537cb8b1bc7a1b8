//! CSV output for projections, scenario batches and sweeps

use crate::error::Result;
use crate::projection::InvestmentResult;
use crate::scenario::{ScenarioOutcome, SweepPoint};
use serde::Serialize;
use std::io::Write;

/// Flattened scenario outcome for CSV
#[derive(Debug, Serialize)]
struct OutcomeRow<'a> {
    name: &'a str,
    cap_rate: f64,
    cash_on_cash: f64,
    dscr: f64,
    noi_annual: f64,
    monthly_payment: f64,
    ten_year_irr: Option<f64>,
    ten_year_equity_multiple: Option<f64>,
    final_total_profit: f64,
}

#[derive(Debug, Serialize)]
struct SweepRow<'a> {
    variable: &'a str,
    value: f64,
    cap_rate: f64,
    cash_on_cash: f64,
    dscr: f64,
    ten_year_irr: Option<f64>,
    ten_year_equity_multiple: Option<f64>,
    final_total_profit: f64,
}

/// One row per projected year, every field of the year
pub fn write_projection_csv<W: Write>(writer: W, result: &InvestmentResult) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for year in &result.years {
        wtr.serialize(year)?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn write_outcomes_csv<W: Write>(writer: W, outcomes: &[ScenarioOutcome]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for outcome in outcomes {
        let h = &outcome.highlights;
        wtr.serialize(OutcomeRow {
            name: &outcome.name,
            cap_rate: h.cap_rate,
            cash_on_cash: h.cash_on_cash,
            dscr: h.dscr,
            noi_annual: h.noi_annual,
            monthly_payment: outcome.result.summary.monthly_payment,
            ten_year_irr: h.ten_year_irr,
            ten_year_equity_multiple: h.ten_year_equity_multiple,
            final_total_profit: outcome.result.final_year().map_or(0.0, |y| y.total_profit),
        })?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn write_sweep_csv<W: Write>(writer: W, points: &[SweepPoint]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for p in points {
        wtr.serialize(SweepRow {
            variable: p.variable.as_str(),
            value: p.value,
            cap_rate: p.highlights.cap_rate,
            cash_on_cash: p.highlights.cash_on_cash,
            dscr: p.highlights.dscr,
            ten_year_irr: p.highlights.ten_year_irr,
            ten_year_equity_multiple: p.highlights.ten_year_equity_multiple,
            final_total_profit: p.final_total_profit,
        })?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::{Assumptions, NamedScenario};
    use crate::projection::{calculate_investment, ProjectionConfig};
    use crate::scenario::{ScenarioRunner, SweepVariable};
    use approx::assert_relative_eq;

    #[test]
    fn test_projection_csv() {
        let result = calculate_investment(&Assumptions::example_rental());
        let mut buf = Vec::new();
        write_projection_csv(&mut buf, &result).unwrap();

        let mut rdr = csv::Reader::from_reader(buf.as_slice());
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(&headers[0], "year");
        assert!(headers.iter().any(|h| h == "net_sale_proceeds"));

        let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 30);
        assert_eq!(&records[0][0], "1");

        let value_col = headers.iter().position(|h| h == "appreciated_value").unwrap();
        let value: f64 = records[0][value_col].parse().unwrap();
        assert_relative_eq!(value, result.years[0].appreciated_value);
    }

    #[test]
    fn test_outcomes_csv_blank_when_no_ten_year_hold() {
        let runner = ScenarioRunner::new(ProjectionConfig {
            horizon_years: 5,
            ..Default::default()
        });
        let outcomes = runner.run_batch(&[NamedScenario {
            name: "short".to_string(),
            assumptions: Assumptions::example_rental(),
        }]);
        let mut buf = Vec::new();
        write_outcomes_csv(&mut buf, &outcomes).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("name,cap_rate,cash_on_cash,dscr,noi_annual,monthly_payment,ten_year_irr,ten_year_equity_multiple,final_total_profit")
        );
        let fields: Vec<&str> = lines.next().unwrap().split(',').collect();
        assert_eq!(fields[0], "short");
        assert_eq!(fields[6], "");
        assert_eq!(fields[7], "");
    }

    #[test]
    fn test_sweep_csv() {
        let runner = ScenarioRunner::new(ProjectionConfig::default());
        let points = runner.sweep(&Assumptions::example_rental(), SweepVariable::RentGrowth, &[2.0, 3.0, 4.0]);
        let mut buf = Vec::new();
        write_sweep_csv(&mut buf, &points).unwrap();

        let mut rdr = csv::Reader::from_reader(buf.as_slice());
        let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 3);
        assert_eq!(&records[1][0], "rent-growth");
        assert_eq!(&records[1][1], "3.0");
    }
}
