//! Service layer for sprinkler calculations.
//!
//! Turns a validated request into a chain problem, solves it and packages the
//! solution as a response document. Shared by the CLI and by anything that
//! hosts the calculation endpoint.

pub mod aggregate;
pub mod calculate;
pub mod compile;
pub mod error;

pub use aggregate::build_response;
pub use calculate::{
    CalculateOptions, calculate, calculate_batch, calculate_file, calculate_files,
    calculate_json, try_calculate,
};
pub use compile::compile_request;
pub use error::{AppError, AppResult};
