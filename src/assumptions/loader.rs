//! Load named assumption scenarios from CSV
//!
//! Expected header:
//! `name,purchase_price,monthly_rent,down_payment_pct,interest_rate,opex_pct,appreciation_rate,rent_growth,loan_term_years,selling_cost_pct`
//!
//! Cells go through the same text coercion as form input, so `$500,000`
//! and `7 %` are accepted and blank cells read as 0.

use super::{parse_number, Assumptions};
use crate::error::{ProjectorError, Result};
use csv::Reader;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Raw CSV row; numeric columns are kept as text until coerced
#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    purchase_price: String,
    monthly_rent: String,
    down_payment_pct: String,
    interest_rate: String,
    opex_pct: String,
    appreciation_rate: String,
    rent_growth: String,
    loan_term_years: String,
    selling_cost_pct: String,
}

impl CsvRow {
    fn into_scenario(self) -> NamedScenario {
        NamedScenario {
            name: self.name.trim().to_string(),
            assumptions: Assumptions {
                purchase_price: parse_number(&self.purchase_price),
                monthly_rent: parse_number(&self.monthly_rent),
                down_payment_pct: parse_number(&self.down_payment_pct),
                interest_rate: parse_number(&self.interest_rate),
                opex_pct: parse_number(&self.opex_pct),
                appreciation_rate: parse_number(&self.appreciation_rate),
                rent_growth: parse_number(&self.rent_growth),
                loan_term_years: parse_number(&self.loan_term_years),
                selling_cost_pct: parse_number(&self.selling_cost_pct),
            },
        }
    }
}

/// A labelled set of assumptions, one per CSV row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedScenario {
    pub name: String,
    pub assumptions: Assumptions,
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<NamedScenario>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ProjectorError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let scenarios = read_rows(file)?;
    if scenarios.is_empty() {
        return Err(ProjectorError::EmptyScenarioFile(path.display().to_string()));
    }

    info!("Loaded {} scenarios from {}", scenarios.len(), path.display());
    Ok(scenarios)
}

/// Load scenarios from any reader (e.g., string buffer, request body)
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<NamedScenario>> {
    let scenarios = read_rows(reader)?;
    if scenarios.is_empty() {
        return Err(ProjectorError::EmptyScenarioFile("<reader>".to_string()));
    }
    Ok(scenarios)
}

fn read_rows<R: std::io::Read>(reader: R) -> Result<Vec<NamedScenario>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut scenarios = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        scenarios.push(row.into_scenario());
    }

    Ok(scenarios)
}
