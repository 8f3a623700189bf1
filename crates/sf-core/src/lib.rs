//! sf-core: stable foundation for sprinklerflow.
//!
//! Contains:
//! - units (uom SI types + bar / L/min / mm constructors)
//! - numeric (Real + tolerances + float helpers)
//! - ids (1-based node and pipe section numbers)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{SfError, SfResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
