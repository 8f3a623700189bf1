//! Error types for solver operations.

use sf_components::ComponentError;
use sf_core::error::SfError;
use thiserror::Error;

/// Errors that can occur while solving a chain.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Problem setup error: {what}")]
    ProblemSetup { what: String },

    #[error("Convergence failed after {iterations} iterations: {what}")]
    ConvergenceFailed { what: String, iterations: usize },

    #[error("Component error: {0}")]
    Component(#[from] ComponentError),

    #[error("Numeric error: {what}")]
    Numeric { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<SfError> for SolverError {
    fn from(e: SfError) -> Self {
        SolverError::Numeric {
            what: e.to_string(),
        }
    }
}
