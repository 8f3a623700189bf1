//! Core traits for hydraulic elements.

use crate::error::ComponentResult;
use crate::tables::CFactor;
use sf_core::units::Length;

/// Anything on a pipe section that resists flow like a length of straight pipe.
///
/// Implementors are plain data and deterministic, so they can be shared freely
/// across concurrent calculations.
pub trait HydraulicElement: Send + Sync {
    /// Element name for logging and error messages.
    fn name(&self) -> &str;

    /// Straight-pipe length producing the same friction loss, adjusted to the
    /// installation's C-factor.
    fn equivalent_length(&self, c_factor: CFactor) -> ComponentResult<Length>;
}
