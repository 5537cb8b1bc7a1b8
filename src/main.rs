//! Investment Projector CLI
//!
//! Command-line interface for rental property projections, scenario batches and sweeps

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use investment_projector::assumptions::{load_scenarios, parse_number, Assumptions};
use investment_projector::projection::{IrrPolicy, ProjectionConfig, MAX_HORIZON_YEARS};
use investment_projector::report::{
    write_outcomes_csv, write_projection_csv, write_sweep_csv, ChartSeries, ProjectionTable,
    ScenarioTable, SummaryTable, SweepTable,
};
use investment_projector::scenario::{sweep_values, ScenarioRunner, SweepVariable};
use log::{info, warn};
use serde_json::json;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "investment_projector",
    version,
    about = "Rental property investment projections",
    long_about = "Projects a leveraged rental purchase year by year: amortization, \
                  operating cash flow, equity, and the IRR and NPV of selling at the \
                  end of each year."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, value_enum, default_value = "table", global = true)]
    format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Years to project
    #[arg(
        long,
        global = true,
        value_parser = clap::value_parser!(u32).range(0..=MAX_HORIZON_YEARS as i64)
    )]
    horizon_years: Option<u32>,

    /// Vacancy allowance, percent of gross rent
    #[arg(long, global = true)]
    vacancy_rate: Option<f64>,

    /// Discount rate for NPV, percent
    #[arg(long, global = true)]
    discount_rate: Option<f64>,

    /// as-computed, converged-only, clamped or clamped:MIN:MAX
    #[arg(long, global = true)]
    irr_policy: Option<IrrPolicy>,
}

#[derive(Subcommand)]
enum Commands {
    /// Project a single property
    Project(AssumptionArgs),
    /// Project every scenario in a CSV file
    Batch {
        /// Scenario CSV with a name column and one column per assumption
        #[arg(long)]
        input: PathBuf,
    },
    /// Vary one assumption over an inclusive range
    Sweep {
        #[arg(long)]
        variable: SweepVariable,
        #[arg(long, allow_negative_numbers = true)]
        from: f64,
        #[arg(long, allow_negative_numbers = true)]
        to: f64,
        #[arg(long)]
        step: f64,
        #[command(flatten)]
        base: AssumptionArgs,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

/// Assumptions as typed; anything omitted takes the example rental's value
#[derive(Args, Debug)]
struct AssumptionArgs {
    #[arg(long)]
    purchase_price: Option<String>,
    #[arg(long)]
    monthly_rent: Option<String>,
    /// Percent of purchase price
    #[arg(long)]
    down_payment_pct: Option<String>,
    /// Annual percent
    #[arg(long)]
    interest_rate: Option<String>,
    /// Percent of effective gross income
    #[arg(long)]
    opex_pct: Option<String>,
    #[arg(long)]
    appreciation_rate: Option<String>,
    #[arg(long)]
    rent_growth: Option<String>,
    #[arg(long)]
    loan_term_years: Option<String>,
    #[arg(long)]
    selling_cost_pct: Option<String>,
}

impl AssumptionArgs {
    fn to_assumptions(&self) -> Assumptions {
        let base = Assumptions::example_rental();
        let pick = |text: &Option<String>, default: f64| text.as_deref().map_or(default, parse_number);
        Assumptions {
            purchase_price: pick(&self.purchase_price, base.purchase_price),
            monthly_rent: pick(&self.monthly_rent, base.monthly_rent),
            down_payment_pct: pick(&self.down_payment_pct, base.down_payment_pct),
            interest_rate: pick(&self.interest_rate, base.interest_rate),
            opex_pct: pick(&self.opex_pct, base.opex_pct),
            appreciation_rate: pick(&self.appreciation_rate, base.appreciation_rate),
            rent_growth: pick(&self.rent_growth, base.rent_growth),
            loan_term_years: pick(&self.loan_term_years, base.loan_term_years),
            selling_cost_pct: pick(&self.selling_cost_pct, base.selling_cost_pct),
        }
    }
}

/// Environment settings first, then any command-line overrides
fn build_config(cli: &Cli) -> ProjectionConfig {
    let mut config = ProjectionConfig::from_env();
    if let Some(years) = cli.horizon_years {
        config.horizon_years = years;
    }
    if let Some(pct) = cli.vacancy_rate {
        config.vacancy_rate = pct / 100.0;
    }
    if let Some(pct) = cli.discount_rate {
        config.discount_rate = pct / 100.0;
    }
    if let Some(policy) = cli.irr_policy {
        config.irr.policy = policy;
    }
    config
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(p) => {
            let file = File::create(p).with_context(|| format!("Unable to create {}", p.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn log_warnings(label: &str, assumptions: &Assumptions) {
    for w in assumptions.warnings() {
        warn!("{}: {}", label, w);
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = build_config(&cli);
    info!(
        "Horizon {} years, vacancy {:.2}%, discount {:.2}%, IRR policy {}",
        config.horizon_years,
        config.vacancy_rate * 100.0,
        config.discount_rate * 100.0,
        config.irr.policy
    );

    let runner = ScenarioRunner::new(config.clone());
    let mut out = open_output(cli.output.as_deref())?;

    match &cli.command {
        Commands::Project(args) => {
            let assumptions = args.to_assumptions();
            log_warnings("input", &assumptions);
            let result = runner.run(&assumptions);

            match cli.format {
                OutputFormat::Table => {
                    writeln!(out, "{}", SummaryTable(&result))?;
                    write!(out, "{}", ProjectionTable(&result))?;
                }
                OutputFormat::Csv => write_projection_csv(&mut out, &result)?,
                OutputFormat::Json => {
                    let highlights = result.highlights();
                    let series = ChartSeries::from_result(&result);
                    let body = json!({
                        "generated_at": Utc::now().to_rfc3339(),
                        "config": config,
                        "warnings": assumptions.warnings(),
                        "assumptions": assumptions,
                        "highlights": highlights,
                        "summary": result.summary,
                        "years": result.years,
                        "series": series,
                    });
                    serde_json::to_writer_pretty(&mut out, &body)?;
                    writeln!(out)?;
                }
            }
        }
        Commands::Batch { input } => {
            let scenarios = load_scenarios(input)
                .with_context(|| format!("Failed to load scenarios from {}", input.display()))?;
            for s in &scenarios {
                log_warnings(&s.name, &s.assumptions);
            }
            let outcomes = runner.run_batch(&scenarios);

            match cli.format {
                OutputFormat::Table => write!(out, "{}", ScenarioTable(&outcomes))?,
                OutputFormat::Csv => write_outcomes_csv(&mut out, &outcomes)?,
                OutputFormat::Json => {
                    let body = json!({
                        "generated_at": Utc::now().to_rfc3339(),
                        "config": config,
                        "outcomes": outcomes,
                    });
                    serde_json::to_writer_pretty(&mut out, &body)?;
                    writeln!(out)?;
                }
            }
        }
        Commands::Sweep { variable, from, to, step, base } => {
            let values = sweep_values(*from, *to, *step).context("Invalid sweep range")?;
            let base = base.to_assumptions();
            log_warnings("base", &base);
            let points = runner.sweep(&base, *variable, &values);

            match cli.format {
                OutputFormat::Table => write!(out, "{}", SweepTable(&points))?,
                OutputFormat::Csv => write_sweep_csv(&mut out, &points)?,
                OutputFormat::Json => {
                    let body = json!({
                        "generated_at": Utc::now().to_rfc3339(),
                        "config": config,
                        "base": base,
                        "variable": variable,
                        "points": points,
                    });
                    serde_json::to_writer_pretty(&mut out, &body)?;
                    writeln!(out)?;
                }
            }
        }
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizon_years_bounded() {
        let cli = Cli::try_parse_from(["investment_projector", "--horizon-years", "100", "project"]).unwrap();
        assert_eq!(cli.horizon_years, Some(MAX_HORIZON_YEARS));

        assert!(Cli::try_parse_from(["investment_projector", "--horizon-years", "101", "project"]).is_err());
        assert!(Cli::try_parse_from(["investment_projector", "project", "--horizon-years", "4000000000"]).is_err());
    }

    #[test]
    fn test_assumption_flags_coerce_text() {
        let cli = Cli::try_parse_from([
            "investment_projector",
            "project",
            "--purchase-price",
            "$650,000",
            "--interest-rate",
            "6.5 %",
        ])
        .unwrap();
        let Commands::Project(args) = &cli.command else {
            panic!("expected project subcommand");
        };
        let assumptions = args.to_assumptions();

        assert_eq!(assumptions.purchase_price, 650_000.0);
        assert_eq!(assumptions.interest_rate, 6.5);
        assert_eq!(assumptions.monthly_rent, Assumptions::example_rental().monthly_rent);
    }

    #[test]
    fn test_sweep_accepts_negative_bounds() {
        let cli = Cli::try_parse_from([
            "investment_projector",
            "sweep",
            "--variable",
            "appreciation-rate",
            "--from",
            "-2",
            "--to",
            "4",
            "--step",
            "1",
        ])
        .unwrap();
        match cli.command {
            Commands::Sweep { variable, from, .. } => {
                assert_eq!(variable, SweepVariable::AppreciationRate);
                assert_eq!(from, -2.0);
            }
            _ => panic!("expected sweep subcommand"),
        }
    }
}
