//! sf-results: calculation response contract.

pub mod types;

pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encode a response document.
pub fn to_json(response: &CalculationResponse, pretty: bool) -> ResultsResult<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(response)?
    } else {
        serde_json::to_string(response)?
    })
}
