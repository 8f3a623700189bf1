//! sf-components: hydraulic elements of a sprinkler pipe chain.
//!
//! Provides:
//! - Static NS 12845 tables (fittings, valves, C-factor adjustment)
//! - Hazen-Williams friction loss
//! - Static head (elevation) offset
//! - Pipe sections and valves with equivalent lengths
//!
//! Everything here is a pure function of its inputs; the tables are `static`
//! data shared by every concurrent calculation.
//!
//! # Example
//!
//! ```
//! use sf_components::{CFactor, Fittings, HydraulicElement, PipeSection};
//! use sf_core::units::{lpm, m, mm, in_bar};
//!
//! let section = PipeSection::new("RS2", mm(27.3), m(4.0))
//!     .with_fittings(Fittings { tees: 1, ..Fittings::default() });
//!
//! let length = section.equivalent_length(CFactor::C120).unwrap();
//! let drop = section.pressure_drop(lpm(113.0), CFactor::C120, length).unwrap();
//! assert!(in_bar(drop) > 0.0);
//! ```

pub mod common;
pub mod elevation;
pub mod error;
pub mod friction;
pub mod pipe;
pub mod tables;
pub mod traits;
pub mod valve;

// Re-exports
pub use error::{ComponentError, ComponentResult};
pub use pipe::{EquivalentLength, Fittings, PipeSection};
pub use tables::{CFactor, FittingKind, ValveKind, ValveSize};
pub use traits::HydraulicElement;
pub use valve::Valve;
