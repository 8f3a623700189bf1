//! Response data types.
//!
//! Every optional field is left out of the document on failure, so a failed
//! calculation carries only `success`, `error` and `error_type`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Failure class reported in `error_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Malformed or out-of-range request, rejected before solving
    ValidationError,
    /// Fitting or valve table miss
    LookupError,
    /// Branch balance did not settle within the iteration cap
    ConvergenceError,
    /// Request could not be read or decoded
    RequestError,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::ValidationError => "ValidationError",
            ErrorKind::LookupError => "LookupError",
            ErrorKind::ConvergenceError => "ConvergenceError",
            ErrorKind::RequestError => "RequestError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CalculationResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<ErrorKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c_faktor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hoyde_anlegg_m: Option<f64>,
    /// Design flow at the supply, L/min
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_vannmengde_lpm: Option<f64>,
    /// Design pressure at the supply, bar
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_trykk_bar: Option<f64>,
    /// Static head added for the installation height, bar
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hoyde_tillegg_bar: Option<f64>,
    /// Sum of valve equivalent lengths, m
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ventil_ekvivalent_lengde: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dekningskrav: Option<CoverageResult>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub noder: Vec<NodeResult>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rettstrekk: Vec<SectionResult>,
    /// Advisory notes that leave the result unchanged
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub advarsler: Vec<String>,
}

impl CalculationResponse {
    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            error_type: Some(kind),
            ..Self::default()
        }
    }

    pub fn node(&self, node_nr: u32) -> Option<&NodeResult> {
        self.noder.iter().find(|n| n.node_nr == node_nr)
    }

    pub fn section(&self, rs_nr: u32) -> Option<&SectionResult> {
        self.rettstrekk.iter().find(|s| s.rs_nr == rs_nr)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeResult {
    pub node_nr: u32,
    /// Flow emitted by the head
    pub flow_lpm: f64,
    /// Main-line pressure at the node
    pub pressure_at_node_bar: f64,
    pub cumulative_flow_lpm: f64,
    #[serde(default)]
    pub is_branch: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_pressure_bar: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k_equivalent: Option<f64>,
    /// Branch pipe equivalent length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_length_m: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionResult {
    pub rs_nr: u32,
    pub diameter_mm: f64,
    pub physical_length_m: f64,
    /// Fittings and valves
    pub equivalent_length_m: f64,
    pub total_length_m: f64,
    pub flow_lpm: f64,
    pub pressure_drop_per_m_bar: f64,
    pub pressure_drop_total_bar: f64,
    pub inlet_pressure_bar: f64,
    pub outlet_pressure_bar: f64,
}

/// Node 1 coverage cross-check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageResult {
    /// Coverage area × design density
    pub required_flow_lpm: f64,
    /// K₁·√P₁
    pub k_flow_lpm: f64,
    pub satisfied: bool,
}

/// Round to a fixed number of decimals for reporting.
pub fn round_dp(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
