//! Calculation service.

use rayon::prelude::*;
use std::path::{Path, PathBuf};

use sf_project::CalculationRequest;
use sf_results::{CalculationResponse, ErrorKind};
use sf_solver::BalanceConfig;

use crate::aggregate::build_response;
use crate::compile::compile_request;
use crate::error::{AppError, AppResult};

/// Options for running calculations.
#[derive(Debug, Clone)]
pub struct CalculateOptions {
    pub balance: BalanceConfig,
    /// Round reported values to their display precision.
    pub rounded: bool,
}

impl Default for CalculateOptions {
    fn default() -> Self {
        Self {
            balance: BalanceConfig::default(),
            rounded: true,
        }
    }
}

/// Validate, compile, solve and aggregate one request.
pub fn try_calculate(
    request: &CalculationRequest,
    options: &CalculateOptions,
) -> AppResult<CalculationResponse> {
    sf_project::validate_request(request)?;
    let problem = compile_request(request)?;
    let solution = sf_solver::solve_with_config(&problem, &options.balance)?;

    tracing::info!(
        nodes = problem.node_count(),
        valves = problem.valves().len(),
        total_flow_lpm = sf_core::units::in_lpm(solution.total_flow),
        total_pressure_bar = sf_core::units::in_bar(solution.total_pressure),
        "calculation complete"
    );

    Ok(build_response(&problem, &solution, options.rounded))
}

/// Calculate a request, reporting any failure in the response itself.
pub fn calculate(request: &CalculationRequest, options: &CalculateOptions) -> CalculationResponse {
    try_calculate(request, options).unwrap_or_else(|e| failure(&e))
}

/// Calculate a JSON request document and return the JSON response document.
pub fn calculate_json(input: &str, options: &CalculateOptions) -> String {
    let response = match sf_project::parse_json(input) {
        Ok(request) => calculate(&request, options),
        Err(e) => failure(&AppError::from(e)),
    };
    encode(&response)
}

/// Calculate a request file.
pub fn calculate_file(path: &Path, options: &CalculateOptions) -> CalculationResponse {
    match sf_project::read_request(path) {
        Ok(request) => calculate(&request, options),
        Err(e) => failure(&AppError::from(e)),
    }
}

/// Calculate independent requests in parallel. Responses are returned in
/// input order.
pub fn calculate_batch(
    requests: &[CalculationRequest],
    options: &CalculateOptions,
) -> Vec<CalculationResponse> {
    requests
        .par_iter()
        .map(|request| calculate(request, options))
        .collect()
}

/// Calculate request files in parallel, paired with their paths.
pub fn calculate_files(
    paths: &[PathBuf],
    options: &CalculateOptions,
) -> Vec<(PathBuf, CalculationResponse)> {
    paths
        .par_iter()
        .map(|path| (path.clone(), calculate_file(path, options)))
        .collect()
}

fn failure(err: &AppError) -> CalculationResponse {
    let kind = err.kind();
    tracing::warn!(error_type = %kind, error = %err, "calculation failed");
    CalculationResponse::failure(kind, err.to_string())
}

fn encode(response: &CalculationResponse) -> String {
    sf_results::to_json(response, false).unwrap_or_else(|e| {
        serde_json::json!({
            "success": false,
            "error": e.to_string(),
            "error_type": ErrorKind::RequestError.as_str(),
        })
        .to_string()
    })
}
