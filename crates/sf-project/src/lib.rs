//! sf-project: calculation request format and validation.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{ValidationError, validate_request};

use std::path::{Path, PathBuf};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unsupported request file format: {path}")]
    UnsupportedFormat { path: String },

    #[error("Failed to read request file: {path}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse a request document without validating it.
pub fn parse_json(content: &str) -> ProjectResult<CalculationRequest> {
    Ok(serde_json::from_str(content)?)
}

pub fn parse_yaml(content: &str) -> ProjectResult<CalculationRequest> {
    Ok(serde_yaml::from_str(content)?)
}

/// Read a request file without validating it, picking the format from its
/// extension.
pub fn read_request(path: &Path) -> ProjectResult<CalculationRequest> {
    let parse = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => parse_json,
        Some("yaml" | "yml") => parse_yaml,
        _ => {
            return Err(ProjectError::UnsupportedFormat {
                path: path.display().to_string(),
            });
        }
    };
    let content = std::fs::read_to_string(path).map_err(|source| ProjectError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content)
}

/// Read and validate a request file.
pub fn load_request(path: &Path) -> ProjectResult<CalculationRequest> {
    let request = read_request(path)?;
    validate_request(&request)?;
    Ok(request)
}
