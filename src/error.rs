//! Error type for everything around the projection engine
//!
//! The engine itself is total over its numeric inputs and never fails;
//! these errors come from loading scenarios, parsing options and writing output.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectorError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("scenario file {0} contains no rows")]
    EmptyScenarioFile(String),

    #[error("unknown sweep variable `{0}`")]
    UnknownVariable(String),

    #[error("unknown IRR policy `{0}` (expected as-computed, converged-only, clamped or clamped:MIN:MAX)")]
    UnknownIrrPolicy(String),

    #[error("invalid sweep range: {0}")]
    InvalidRange(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProjectorError>;
