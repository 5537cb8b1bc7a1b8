//! Projection engine: amortization, yearly cash flows, per-horizon IRR and NPV

pub mod amortization;
mod cashflows;
mod engine;
pub mod irr;
mod state;

pub use amortization::{amortize_year, monthly_payment, YearAmortization};
pub use cashflows::{Highlights, InvestmentResult, InvestmentSummary, YearProjection, HIGHLIGHT_YEAR};
pub use engine::{
    calculate_investment, InvestmentProjector, ProjectionConfig, DEFAULT_DISCOUNT_RATE,
    DEFAULT_HORIZON_YEARS, DEFAULT_VACANCY_RATE, MAX_HORIZON_YEARS,
};
pub use irr::{calculate_irr, npv, solve_irr, IrrConfig, IrrPolicy, IrrSolution, IrrStatus};
pub use state::ProjectionState;
