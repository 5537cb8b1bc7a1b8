//! Investment Projector - rental property investment analysis
//!
//! This library provides:
//! - Mortgage amortization and year-one operating metrics (cap rate, cash-on-cash, DSCR)
//! - Year-by-year projections of value, cash flow, debt and equity over a hold period
//! - IRR and NPV for a sale at the end of every year
//! - Batch and sweep scenario runs
//! - Text, CSV and chart-series reporting

pub mod error;
pub mod assumptions;
pub mod projection;
pub mod scenario;
pub mod report;

// Re-export commonly used types
pub use error::ProjectorError;
pub use assumptions::{Assumptions, NormalizedAssumptions, RawInputs, parse_number};
pub use projection::{
    InvestmentProjector, InvestmentResult, InvestmentSummary, ProjectionConfig, YearProjection,
    calculate_investment,
};
pub use scenario::{ScenarioRunner, SweepVariable};
