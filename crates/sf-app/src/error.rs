//! Error types for the sf-app service layer.

use sf_components::ComponentError;
use sf_results::ErrorKind;
use sf_solver::SolverError;
use std::path::PathBuf;

/// Application error wrapping the backend crates' errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read request file: {path}")]
    RequestFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Request error: {0}")]
    Request(String),

    #[error("Request validation failed: {0}")]
    Validation(String),

    #[error("{0}")]
    Component(#[from] ComponentError),

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),

    #[error("Results error: {0}")]
    Results(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for sf-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Class reported as the response's `error_type`.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) => ErrorKind::ValidationError,
            AppError::Component(e) | AppError::Solver(SolverError::Component(e)) => {
                component_kind(e)
            }
            AppError::Solver(SolverError::ConvergenceFailed { .. }) => ErrorKind::ConvergenceError,
            AppError::Solver(SolverError::ProblemSetup { .. } | SolverError::Numeric { .. }) => {
                ErrorKind::ValidationError
            }
            AppError::RequestFileRead { .. }
            | AppError::Request(_)
            | AppError::Results(_)
            | AppError::Io(_) => ErrorKind::RequestError,
        }
    }
}

fn component_kind(e: &ComponentError) -> ErrorKind {
    if e.is_lookup() {
        ErrorKind::LookupError
    } else {
        ErrorKind::ValidationError
    }
}

impl From<sf_project::ProjectError> for AppError {
    fn from(err: sf_project::ProjectError) -> Self {
        match err {
            sf_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            sf_project::ProjectError::FileRead { path, source } => {
                AppError::RequestFileRead { path, source }
            }
            other => AppError::Request(other.to_string()),
        }
    }
}

impl From<sf_project::ValidationError> for AppError {
    fn from(err: sf_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<sf_results::ResultsError> for AppError {
    fn from(err: sf_results::ResultsError) -> Self {
        AppError::Results(err.to_string())
    }
}
