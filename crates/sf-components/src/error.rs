//! Error types for component operations.

use sf_core::error::SfError;
use thiserror::Error;

/// Errors that can occur during component calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    /// A key has no entry in one of the static tables.
    #[error("No entry in {table} table for {key}")]
    Lookup { table: &'static str, key: String },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl ComponentError {
    pub fn lookup(table: &'static str, key: impl Into<String>) -> Self {
        ComponentError::Lookup {
            table,
            key: key.into(),
        }
    }

    pub fn is_lookup(&self) -> bool {
        matches!(self, ComponentError::Lookup { .. })
    }
}

impl From<SfError> for ComponentError {
    fn from(e: SfError) -> Self {
        match e {
            SfError::NonFinite { what, .. } | SfError::Negative { what, .. } => {
                ComponentError::NonPhysical { what }
            }
            SfError::InvalidArg { what } | SfError::NumberOutOfRange { what, .. } => {
                ComponentError::InvalidArg { what }
            }
        }
    }
}
