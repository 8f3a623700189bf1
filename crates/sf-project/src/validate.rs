//! Request validation.
//!
//! Runs before anything is solved. Every failure here rejects the whole
//! request; nothing is computed from a request that fails validation.

use crate::schema::{BranchFlag, CalculationRequest, NodeDef, PipeDef};
use sf_components::{CFactor, Valve};
use sf_core::{MAX_NODES, SectionNr};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid node count: {count} ({reason})")]
    NodeCount { count: usize, reason: String },

    #[error("Numbering gap in {context}: expected {expected}, found {found}")]
    NumberingGap {
        context: String,
        expected: u32,
        found: u32,
    },

    #[error("Missing field: {field}")]
    MissingField { field: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Node {node} is flagged both as horizontal and as vertical branch")]
    ConflictingBranchFlags { node: u32 },

    #[error("Unrecognized valve configuration: '{name}' with dimension '{dimension}' ({reason})")]
    UnrecognizedValve {
        name: String,
        dimension: String,
        reason: String,
    },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },
}

pub fn validate_request(request: &CalculationRequest) -> Result<(), ValidationError> {
    let params = &request.generelle_parametre;

    if CFactor::from_value(params.c_faktor).is_none() {
        return Err(ValidationError::InvalidValue {
            field: "generelle_parametre.c_faktor".to_string(),
            value: params.c_faktor.to_string(),
            reason: "must be one of 100, 110, 120, 130, 140".to_string(),
        });
    }
    if !params.hoyde_anlegg_m.is_finite() {
        return Err(ValidationError::InvalidValue {
            field: "generelle_parametre.hoyde_anlegg_m".to_string(),
            value: params.hoyde_anlegg_m.to_string(),
            reason: "must be finite".to_string(),
        });
    }

    let count = request.noder.len();
    if count == 0 || count > MAX_NODES {
        return Err(ValidationError::NodeCount {
            count,
            reason: format!("must be between 1 and {MAX_NODES}"),
        });
    }
    if let Some(declared) = params.antall_noder
        && declared as usize != count
    {
        return Err(ValidationError::NodeCount {
            count,
            reason: format!("declared antall_noder is {declared}"),
        });
    }

    check_contiguous(request.noder.iter().map(|n| n.node_nr), 1, "noder")?;
    if !request.rettstrekk.is_empty() {
        if request.rettstrekk.len() != count - 1 {
            return Err(ValidationError::NodeCount {
                count,
                reason: format!(
                    "rettstrekk must hold sections 2..{count} ({} entries), found {}",
                    count - 1,
                    request.rettstrekk.len()
                ),
            });
        }
        check_contiguous(request.rettstrekk.iter().map(|s| s.rs_nr), 2, "rettstrekk")?;
    }

    for node in &request.noder {
        validate_node(node)?;
    }
    for section in &request.rettstrekk {
        validate_pipe(&section.pipe, &format!("rettstrekk {}", section.rs_nr))?;
    }

    for (name, valve) in &request.ventiler {
        if !valve.is_present() {
            continue;
        }
        let section = SectionNr::checked(valve.tilkoblet_rs, count, "tilkoblet_rs").map_err(|_| {
            ValidationError::MissingReference {
                id: format!("section {}", valve.tilkoblet_rs),
                context: format!("valve '{name}' tilkoblet_rs (sections 1..{count})"),
            }
        })?;
        Valve::from_wire(name, &valve.dimensjon, section).map_err(|e| {
            ValidationError::UnrecognizedValve {
                name: name.clone(),
                dimension: valve.dimensjon.clone(),
                reason: e.to_string(),
            }
        })?;
    }

    Ok(())
}

/// Numbers, in any order, must be exactly `first, first+1, ...` with no
/// gaps or repeats.
fn check_contiguous(
    numbers: impl Iterator<Item = u32>,
    first: u32,
    context: &str,
) -> Result<(), ValidationError> {
    let mut sorted: Vec<u32> = numbers.collect();
    sorted.sort_unstable();
    for (expected, found) in (first..).zip(sorted) {
        if found != expected {
            return Err(ValidationError::NumberingGap {
                context: context.to_string(),
                expected,
                found,
            });
        }
    }
    Ok(())
}

fn validate_node(node: &NodeDef) -> Result<(), ValidationError> {
    let context = format!("node {}", node.node_nr);
    non_negative(&context, "k_faktor", node.k_faktor)?;
    validate_pipe(&node.pipe, &context)?;

    if node.node_nr == 1 {
        for (field, value) in [
            ("min_trykk_bar", node.min_trykk_bar),
            ("dekningsareal_m2", node.dekningsareal_m2),
            ("krav_mm_m2", node.krav_mm_m2),
        ] {
            let value = value.ok_or_else(|| ValidationError::MissingField {
                field: format!("{context} {field}"),
            })?;
            non_negative(&context, field, value)?;
        }
        if node.branch_flag().is_some() {
            return Err(ValidationError::InvalidValue {
                field: format!("{context} er_grenror"),
                value: "true".to_string(),
                reason: "node 1 starts the main line and cannot be a branch".to_string(),
            });
        }
        return Ok(());
    }

    if node.branch_flag() == Some(BranchFlag::Conflict) {
        return Err(ValidationError::ConflictingBranchFlags {
            node: node.node_nr,
        });
    }
    Ok(())
}

/// A pipe carrying length or fittings needs a bore; an empty pipe may
/// leave it at zero.
fn validate_pipe(pipe: &PipeDef, context: &str) -> Result<(), ValidationError> {
    non_negative(context, "diameter_mm", pipe.diameter_mm)?;
    non_negative(context, "lengde_m", pipe.lengde_m)?;
    for (field, count) in pipe.fitting_counts() {
        if u32::try_from(count).is_err() {
            return Err(ValidationError::InvalidValue {
                field: format!("{context} {field}"),
                value: count.to_string(),
                reason: format!("must be a whole number between 0 and {}", u32::MAX),
            });
        }
    }
    if pipe.diameter_mm <= 0.0 && (pipe.lengde_m > 0.0 || pipe.has_fittings()) {
        return Err(ValidationError::InvalidValue {
            field: format!("{context} diameter_mm"),
            value: pipe.diameter_mm.to_string(),
            reason: "must be positive on a pipe with length or fittings".to_string(),
        });
    }
    Ok(())
}

fn non_negative(context: &str, field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::InvalidValue {
            field: format!("{context} {field}"),
            value: value.to_string(),
            reason: "must be finite and non-negative".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{GeneralParams, PipeDef, SectionDef, ValveDef};

    fn node(nr: u32) -> NodeDef {
        let mut n = NodeDef {
            node_nr: nr,
            k_faktor: 80.0,
            pipe: PipeDef {
                diameter_mm: 27.3,
                lengde_m: 3.0,
                ..PipeDef::default()
            },
            ..NodeDef::default()
        };
        if nr == 1 {
            n.min_trykk_bar = Some(0.5);
            n.dekningsareal_m2 = Some(10.0);
            n.krav_mm_m2 = Some(5.0);
        }
        n
    }

    fn request(n: u32) -> CalculationRequest {
        CalculationRequest {
            generelle_parametre: GeneralParams::default(),
            noder: (1..=n).map(node).collect(),
            ..CalculationRequest::default()
        }
    }

    #[test]
    fn minimal_request_is_valid() {
        validate_request(&request(1)).unwrap();
        validate_request(&request(20)).unwrap();
    }

    #[test]
    fn empty_and_oversized_chains() {
        assert!(matches!(
            validate_request(&request(0)),
            Err(ValidationError::NodeCount { count: 0, .. })
        ));
        assert!(matches!(
            validate_request(&request(21)),
            Err(ValidationError::NodeCount { count: 21, .. })
        ));
    }

    #[test]
    fn gap_in_node_numbers() {
        let mut req = request(2);
        req.noder[1].node_nr = 3;
        let err = validate_request(&req).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NumberingGap {
                context: "noder".to_string(),
                expected: 2,
                found: 3,
            }
        );
    }

    #[test]
    fn nodes_may_arrive_out_of_order() {
        let mut req = request(3);
        req.noder.reverse();
        validate_request(&req).unwrap();
    }

    #[test]
    fn duplicate_node_number() {
        let mut req = request(3);
        req.noder[2].node_nr = 2;
        assert!(matches!(
            validate_request(&req),
            Err(ValidationError::NumberingGap { .. })
        ));
    }

    #[test]
    fn declared_count_must_match() {
        let mut req = request(3);
        req.generelle_parametre.antall_noder = Some(4);
        assert!(matches!(
            validate_request(&req),
            Err(ValidationError::NodeCount { .. })
        ));
    }

    #[test]
    fn c_factor_must_be_standard() {
        let mut req = request(1);
        req.generelle_parametre.c_faktor = 125.0;
        let err = validate_request(&req).unwrap_err();
        assert!(err.to_string().contains("c_faktor"));
    }

    #[test]
    fn rettstrekk_must_cover_two_to_n() {
        let mut req = request(3);
        let pipe = PipeDef {
            diameter_mm: 36.0,
            lengde_m: 3.0,
            ..PipeDef::default()
        };
        req.rettstrekk = vec![SectionDef {
            rs_nr: 2,
            pipe: pipe.clone(),
        }];
        assert!(validate_request(&req).is_err());

        req.rettstrekk.push(SectionDef { rs_nr: 4, pipe });
        assert!(matches!(
            validate_request(&req),
            Err(ValidationError::NumberingGap { .. })
        ));

        req.rettstrekk[1].rs_nr = 3;
        validate_request(&req).unwrap();
    }

    #[test]
    fn negative_length_rejected() {
        let mut req = request(2);
        req.noder[1].pipe.lengde_m = -1.0;
        let err = validate_request(&req).unwrap_err();
        assert!(err.to_string().contains("lengde_m"));
    }

    #[test]
    fn zero_bore_with_length_rejected() {
        let mut req = request(2);
        req.noder[1].pipe.diameter_mm = 0.0;
        req.noder[1].pipe.lengde_m = 50.0;
        let err = validate_request(&req).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { .. }));
        assert!(err.to_string().contains("node 2 diameter_mm"));
    }

    #[test]
    fn zero_bore_with_fittings_rejected() {
        let mut req = request(3);
        req.rettstrekk = (2..=3)
            .map(|rs_nr| SectionDef {
                rs_nr,
                pipe: PipeDef {
                    diameter_mm: 36.0,
                    lengde_m: 3.0,
                    ..PipeDef::default()
                },
            })
            .collect();
        req.rettstrekk[1].pipe = PipeDef {
            antall_tstykker: 1,
            ..PipeDef::default()
        };
        let err = validate_request(&req).unwrap_err();
        assert!(err.to_string().contains("rettstrekk 3 diameter_mm"));
    }

    #[test]
    fn empty_pipe_may_have_zero_bore() {
        let mut req = request(2);
        req.noder[1].pipe = PipeDef::default();
        validate_request(&req).unwrap();
    }

    #[test]
    fn fitting_counts_must_be_non_negative() {
        let mut req = request(2);
        req.noder[1].pipe.antall_90_bend = -1;
        let err = validate_request(&req).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidValue {
                field: "node 2 antall_90_bend".to_string(),
                value: "-1".to_string(),
                reason: format!("must be a whole number between 0 and {}", u32::MAX),
            }
        );

        req.noder[1].pipe.antall_90_bend = i64::from(u32::MAX) + 1;
        assert!(validate_request(&req).is_err());
    }

    #[test]
    fn node_one_needs_design_fields() {
        let mut req = request(1);
        req.noder[0].min_trykk_bar = None;
        assert!(matches!(
            validate_request(&req),
            Err(ValidationError::MissingField { .. })
        ));
    }

    #[test]
    fn node_one_cannot_branch() {
        let mut req = request(1);
        req.noder[0].er_grenror = true;
        assert!(validate_request(&req).is_err());
    }

    #[test]
    fn both_branch_flags_rejected() {
        let mut req = request(2);
        req.noder[1].er_grenror_h = true;
        req.noder[1].er_grenror_v = true;
        assert_eq!(
            validate_request(&req),
            Err(ValidationError::ConflictingBranchFlags { node: 2 })
        );
    }

    #[test]
    fn valve_checks() {
        let mut req = request(2);
        req.ventiler.insert(
            "Sluseventil".to_string(),
            ValveDef {
                dimensjon: "100".to_string(),
                tilkoblet_rs: 2,
            },
        );
        validate_request(&req).unwrap();

        // Unknown dimension for the type
        req.ventiler.get_mut("Sluseventil").unwrap().dimensjon = "40".to_string();
        let err = validate_request(&req).unwrap_err();
        assert!(err.to_string().contains("Unrecognized valve configuration"));

        // Section past the end
        let v = req.ventiler.get_mut("Sluseventil").unwrap();
        v.dimensjon = "100".to_string();
        v.tilkoblet_rs = 3;
        assert!(matches!(
            validate_request(&req),
            Err(ValidationError::MissingReference { .. })
        ));

        // Not present: ignored whatever else is wrong
        let v = req.ventiler.get_mut("Sluseventil").unwrap();
        v.dimensjon = "NA".to_string();
        validate_request(&req).unwrap();
    }

    #[test]
    fn unknown_valve_type_rejected() {
        let mut req = request(1);
        req.ventiler.insert(
            "Trykkreduksjonsventil".to_string(),
            ValveDef {
                dimensjon: "50".to_string(),
                tilkoblet_rs: 1,
            },
        );
        assert!(matches!(
            validate_request(&req),
            Err(ValidationError::UnrecognizedValve { .. })
        ));
    }
}
