//! Common utilities for component calculations.

use crate::error::{ComponentError, ComponentResult};
use sf_core::numeric::ensure_finite;

/// Flows below this (L/min) are treated as no flow.
pub const EPSILON_FLOW_LPM: f64 = 1e-12;

/// Ensure a value is finite, returning ComponentError if not.
pub fn check_finite(value: f64, what: &'static str) -> ComponentResult<()> {
    ensure_finite(value, what).map_err(|_| ComponentError::NonPhysical { what })?;
    Ok(())
}
