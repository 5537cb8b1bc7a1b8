//! Net Present Value and Internal Rate of Return
//!
//! IRR is solved with plain Newton-Raphson from a single guess. There is no
//! bracketing fallback: when the iteration stalls or runs out of steps the
//! last estimate is returned together with a status, and the configured
//! [`IrrPolicy`] decides what gets reported.

use crate::error::ProjectorError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Net present value of annual cash flows, the first undiscounted
pub fn npv(rate: f64, cashflows: &[f64]) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powf(t as f64))
        .sum()
}

/// Calculate NPV and its derivative with respect to rate
fn npv_and_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (t, &cf) in cashflows.iter().enumerate() {
        npv += cf / (1.0 + rate).powf(t as f64);
        if t > 0 {
            dnpv -= (t as f64) * cf / (1.0 + rate).powf(t as f64 + 1.0);
        }
    }

    (npv, dnpv)
}

/// What to report when the solver does not cleanly converge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum IrrPolicy {
    /// Report the solver's last estimate, converged or not
    #[default]
    AsComputed,
    /// Report NaN unless the iteration converged
    ConvergedOnly,
    /// Clamp finite estimates into `[min, max]`
    Clamped { min: f64, max: f64 },
}

impl IrrPolicy {
    pub const DEFAULT_CLAMP_MIN: f64 = -0.99;
    pub const DEFAULT_CLAMP_MAX: f64 = 10.0;

    /// Apply the policy to a solver outcome
    pub fn apply(&self, solution: &IrrSolution) -> f64 {
        match *self {
            IrrPolicy::AsComputed => solution.rate,
            IrrPolicy::ConvergedOnly => {
                if solution.status == IrrStatus::Converged {
                    solution.rate
                } else {
                    f64::NAN
                }
            }
            IrrPolicy::Clamped { min, max } => {
                if solution.rate.is_nan() {
                    solution.rate
                } else {
                    solution.rate.max(min).min(max)
                }
            }
        }
    }
}

impl FromStr for IrrPolicy {
    type Err = ProjectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || ProjectorError::UnknownIrrPolicy(s.to_string());
        match s.trim() {
            "as-computed" => Ok(IrrPolicy::AsComputed),
            "converged-only" => Ok(IrrPolicy::ConvergedOnly),
            "clamped" => Ok(IrrPolicy::Clamped {
                min: Self::DEFAULT_CLAMP_MIN,
                max: Self::DEFAULT_CLAMP_MAX,
            }),
            other => {
                let bounds = other.strip_prefix("clamped:").ok_or_else(unknown)?;
                let (min, max) = bounds.split_once(':').ok_or_else(unknown)?;
                let min: f64 = min.parse().map_err(|_| unknown())?;
                let max: f64 = max.parse().map_err(|_| unknown())?;
                if min > max {
                    return Err(unknown());
                }
                Ok(IrrPolicy::Clamped { min, max })
            }
        }
    }
}

impl fmt::Display for IrrPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrrPolicy::AsComputed => write!(f, "as-computed"),
            IrrPolicy::ConvergedOnly => write!(f, "converged-only"),
            IrrPolicy::Clamped { min, max } => write!(f, "clamped:{}:{}", min, max),
        }
    }
}

/// Newton-Raphson settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrrConfig {
    /// Starting rate; 0 falls back to 10 %
    pub guess: f64,
    pub max_iterations: u32,
    /// Stop when successive estimates differ by less than this
    pub tolerance: f64,
    /// Stop refining when |dNPV/dr| drops below this
    pub derivative_floor: f64,
    pub policy: IrrPolicy,
}

impl Default for IrrConfig {
    fn default() -> Self {
        Self {
            guess: 0.08,
            max_iterations: 100,
            tolerance: 1e-7,
            derivative_floor: 1e-14,
            policy: IrrPolicy::AsComputed,
        }
    }
}

/// How a solve ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IrrStatus {
    Converged,
    /// Derivative fell below the floor; rate is the last estimate
    DerivativeVanished,
    /// Ran out of iterations; rate is the last estimate
    IterationLimit,
    /// Fewer than two cash flows; rate is NaN
    InsufficientData,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrrSolution {
    pub rate: f64,
    pub iterations: u32,
    pub status: IrrStatus,
}

/// Solve for the annual IRR of `cashflows` (index 0 = today).
pub fn solve_irr(cashflows: &[f64], config: &IrrConfig) -> IrrSolution {
    if cashflows.len() < 2 {
        return IrrSolution {
            rate: f64::NAN,
            iterations: 0,
            status: IrrStatus::InsufficientData,
        };
    }

    let mut rate = if config.guess == 0.0 || config.guess.is_nan() {
        0.1
    } else {
        config.guess
    };

    for i in 0..config.max_iterations {
        let (npv, dnpv) = npv_and_derivative(cashflows, rate);

        if dnpv.abs() < config.derivative_floor {
            debug!("IRR derivative vanished after {} iterations at rate {}", i, rate);
            return IrrSolution {
                rate,
                iterations: i,
                status: IrrStatus::DerivativeVanished,
            };
        }

        let new_rate = rate - npv / dnpv;

        if (new_rate - rate).abs() < config.tolerance {
            return IrrSolution {
                rate: new_rate,
                iterations: i + 1,
                status: IrrStatus::Converged,
            };
        }

        rate = new_rate;
    }

    debug!(
        "IRR did not converge in {} iterations; last estimate {}",
        config.max_iterations, rate
    );
    IrrSolution {
        rate,
        iterations: config.max_iterations,
        status: IrrStatus::IterationLimit,
    }
}

/// Solve and apply the configured policy in one step
pub fn calculate_irr(cashflows: &[f64], config: &IrrConfig) -> f64 {
    config.policy.apply(&solve_irr(cashflows, config))
}
