//! Calculation request schema, as posted by the input form.
//!
//! Field names follow the form (Norwegian). Pipe section 1 is embedded in
//! node 1; sections 2..N come from `rettstrekk`, or from the nodes themselves
//! when `rettstrekk` is left out.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CalculationRequest {
    #[serde(default)]
    pub generelle_parametre: GeneralParams,
    #[serde(default)]
    pub noder: Vec<NodeDef>,
    #[serde(default)]
    pub rettstrekk: Vec<SectionDef>,
    /// Valve type name -> placement
    #[serde(default)]
    pub ventiler: BTreeMap<String, ValveDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralParams {
    #[serde(default = "default_c_faktor")]
    pub c_faktor: f64,
    #[serde(default)]
    pub hoyde_anlegg_m: f64,
    /// Declared node count; checked against `noder` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub antall_noder: Option<u32>,
}

fn default_c_faktor() -> f64 {
    120.0
}

impl Default for GeneralParams {
    fn default() -> Self {
        Self {
            c_faktor: default_c_faktor(),
            hoyde_anlegg_m: 0.0,
            antall_noder: None,
        }
    }
}

/// Pipe geometry shared by nodes and straight sections.
///
/// Fitting counts are signed so that a negative count reaches validation
/// instead of failing to parse.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PipeDef {
    /// Internal diameter
    pub diameter_mm: f64,
    #[serde(default)]
    pub lengde_m: f64,
    #[serde(default)]
    pub antall_90_bend: i64,
    #[serde(default)]
    pub antall_tstykker: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub antall_45_bend: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub antall_90_bend_sveiset: i64,
}

impl PipeDef {
    /// Fitting counts by field name.
    pub fn fitting_counts(&self) -> [(&'static str, i64); 4] {
        [
            ("antall_90_bend", self.antall_90_bend),
            ("antall_tstykker", self.antall_tstykker),
            ("antall_45_bend", self.antall_45_bend),
            ("antall_90_bend_sveiset", self.antall_90_bend_sveiset),
        ]
    }

    pub fn has_fittings(&self) -> bool {
        self.fitting_counts().iter().any(|&(_, n)| n != 0)
    }
}

fn is_zero(v: &i64) -> bool {
    *v == 0
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NodeDef {
    pub node_nr: u32,
    pub k_faktor: f64,
    // Node 1 only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_trykk_bar: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dekningsareal_m2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub krav_mm_m2: Option<f64>,
    #[serde(flatten)]
    pub pipe: PipeDef,
    // Nodes 2..N
    /// Branch with no side given; treated as horizontal.
    #[serde(default, alias = "er_tstykke")]
    pub er_grenror: bool,
    #[serde(default)]
    pub er_grenror_h: bool,
    #[serde(default)]
    pub er_grenror_v: bool,
    #[serde(default)]
    pub er_ekv_kfaktor: bool,
}

/// Side a branch node is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchFlag {
    Horizontal,
    Vertical,
    /// Both explicit flags set
    Conflict,
}

impl NodeDef {
    /// `None` for inline nodes.
    pub fn branch_flag(&self) -> Option<BranchFlag> {
        match (self.er_grenror_h, self.er_grenror_v) {
            (true, true) => Some(BranchFlag::Conflict),
            (false, true) => Some(BranchFlag::Vertical),
            (true, false) => Some(BranchFlag::Horizontal),
            (false, false) if self.er_grenror => Some(BranchFlag::Horizontal),
            (false, false) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SectionDef {
    pub rs_nr: u32,
    #[serde(flatten)]
    pub pipe: PipeDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValveDef {
    /// Nominal dimension, or "NA" when the valve is not installed
    #[serde(default = "not_present", deserialize_with = "dimension_text")]
    pub dimensjon: String,
    /// Pipe section the valve sits on
    #[serde(default)]
    pub tilkoblet_rs: u32,
}

impl ValveDef {
    pub fn is_present(&self) -> bool {
        !sf_components::ValveSize::is_not_present(&self.dimensjon)
    }
}

fn not_present() -> String {
    sf_components::ValveSize::NOT_PRESENT.to_string()
}

/// The form sends dimensions as text, hand-written requests often as numbers.
fn dimension_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Dimension {
        Text(String),
        Whole(u64),
        Real(f64),
    }

    Ok(match Dimension::deserialize(deserializer)? {
        Dimension::Text(s) => s,
        Dimension::Whole(n) => n.to_string(),
        Dimension::Real(x) if x.fract() == 0.0 => format!("{x:.0}"),
        Dimension::Real(x) => x.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_one_fields_parse() {
        let json = r#"{
            "node_nr": 1, "k_faktor": 80, "min_trykk_bar": 0.5,
            "dekningsareal_m2": 10, "krav_mm_m2": 5,
            "diameter_mm": 27.3, "lengde_m": 3, "antall_90_bend": 0, "antall_tstykker": 0
        }"#;
        let node: NodeDef = serde_json::from_str(json).unwrap();
        assert_eq!(node.node_nr, 1);
        assert_eq!(node.min_trykk_bar, Some(0.5));
        assert_eq!(node.pipe.diameter_mm, 27.3);
        assert_eq!(node.branch_flag(), None);
    }

    #[test]
    fn branch_flags() {
        let mut node = NodeDef {
            er_grenror: true,
            ..NodeDef::default()
        };
        assert_eq!(node.branch_flag(), Some(BranchFlag::Horizontal));
        node.er_grenror_v = true;
        assert_eq!(node.branch_flag(), Some(BranchFlag::Vertical));
        node.er_grenror_h = true;
        assert_eq!(node.branch_flag(), Some(BranchFlag::Conflict));
    }

    #[test]
    fn t_piece_alias_marks_branch() {
        let node: NodeDef =
            serde_json::from_str(r#"{"node_nr": 2, "k_faktor": 80, "diameter_mm": 36, "er_tstykke": true}"#)
                .unwrap();
        assert!(node.er_grenror);
    }

    #[test]
    fn diameter_is_required() {
        let err = serde_json::from_str::<NodeDef>(r#"{"node_nr": 2, "k_faktor": 80, "lengde_m": 50}"#)
            .unwrap_err();
        assert!(err.to_string().contains("diameter_mm"));
    }

    #[test]
    fn negative_fitting_count_parses() {
        let pipe: PipeDef =
            serde_json::from_str(r#"{"diameter_mm": 36, "antall_90_bend": -1}"#).unwrap();
        assert_eq!(pipe.antall_90_bend, -1);
        assert!(pipe.has_fittings());
    }

    #[test]
    fn valve_dimension_accepts_numbers() {
        let v: ValveDef = serde_json::from_str(r#"{"dimensjon": 100, "tilkoblet_rs": 2}"#).unwrap();
        assert_eq!(v.dimensjon, "100");
        let v: ValveDef = serde_json::from_str(r#"{"dimensjon": 65.0, "tilkoblet_rs": 2}"#).unwrap();
        assert_eq!(v.dimensjon, "65");
        let v: ValveDef = serde_json::from_str(r#"{"dimensjon": "NA"}"#).unwrap();
        assert!(!v.is_present());
    }

    #[test]
    fn defaults_for_general_params() {
        let req: CalculationRequest = serde_json::from_str(r#"{"noder": []}"#).unwrap();
        assert_eq!(req.generelle_parametre.c_faktor, 120.0);
        assert_eq!(req.generelle_parametre.hoyde_anlegg_m, 0.0);
        assert!(req.ventiler.is_empty());
    }
}
