//! Compilation of a calculation request into a chain problem.

use sf_components::{CFactor, Fittings, PipeSection, Valve};
use sf_core::SectionNr;
use sf_core::units::{bar, m, m2, mm};
use sf_project::schema::{BranchFlag, CalculationRequest, NodeDef, PipeDef};
use sf_solver::{BranchSide, ChainNode, ChainProblem, DesignRequirement};

use crate::error::{AppError, AppResult};

/// Build the solver problem for a request.
///
/// Nodes and sections are taken in number order, whatever order they were
/// posted in. Section 1 is node 1's own pipe. Sections 2..N come from
/// `rettstrekk` when it is given, in which case a branch node's own pipe is
/// its side pipe; otherwise node i's pipe is section i and branch nodes sit
/// directly on the main line.
pub fn compile_request(request: &CalculationRequest) -> AppResult<ChainProblem> {
    let params = &request.generelle_parametre;
    let c_factor = CFactor::try_from(params.c_faktor)?;

    let mut nodes: Vec<&NodeDef> = request.noder.iter().collect();
    nodes.sort_by_key(|n| n.node_nr);
    let mut sections: Vec<_> = request.rettstrekk.iter().collect();
    sections.sort_by_key(|s| s.rs_nr);

    let (first, rest) = nodes
        .split_first()
        .ok_or_else(|| AppError::Validation("request has no nodes".to_string()))?;
    if !sections.is_empty() && sections.len() != rest.len() {
        return Err(AppError::Validation(format!(
            "rettstrekk holds {} sections, expected {}",
            sections.len(),
            rest.len()
        )));
    }

    let requirement = DesignRequirement {
        min_pressure: bar(node_one_field(first.min_trykk_bar, "min_trykk_bar")?),
        coverage_area: m2(node_one_field(first.dekningsareal_m2, "dekningsareal_m2")?),
        density_lpm_per_m2: node_one_field(first.krav_mm_m2, "krav_mm_m2")?,
    };

    let mut problem = ChainProblem::new(
        c_factor,
        m(params.hoyde_anlegg_m),
        requirement,
        first.k_faktor,
        pipe_section("rs 1", &first.pipe)?,
    );

    for (i, node) in rest.iter().enumerate() {
        let nr = node.node_nr;
        let side = match node.branch_flag() {
            None => None,
            Some(BranchFlag::Horizontal) => Some(BranchSide::Horizontal),
            Some(BranchFlag::Vertical) => Some(BranchSide::Vertical),
            Some(BranchFlag::Conflict) => {
                return Err(AppError::Validation(format!(
                    "node {nr} is flagged both as horizontal and as vertical branch"
                )));
            }
        };

        let (main, own) = match sections.get(i) {
            Some(section) => (
                pipe_section(format!("rs {}", section.rs_nr), &section.pipe)?,
                pipe_section(format!("node {nr} branch"), &node.pipe)?,
            ),
            None => (
                pipe_section(format!("rs {nr}"), &node.pipe)?,
                PipeSection::empty(format!("node {nr} branch"), mm(node.pipe.diameter_mm)),
            ),
        };

        let chain_node = match side {
            Some(side) => ChainNode::branch(node.k_faktor, side, own),
            None => ChainNode::inline(node.k_faktor),
        }
        .with_equivalent_k(node.er_ekv_kfaktor);
        problem.push_node(chain_node, main)?;
    }

    let count = problem.node_count();
    for (name, def) in &request.ventiler {
        if !def.is_present() {
            continue;
        }
        let section = SectionNr::checked(def.tilkoblet_rs, count, "tilkoblet_rs")
            .map_err(|e| AppError::Validation(format!("valve '{name}': {e}")))?;
        if let Some(valve) = Valve::from_wire(name, &def.dimensjon, section)? {
            problem.add_valve(valve)?;
        }
    }

    Ok(problem)
}

fn node_one_field(value: Option<f64>, field: &str) -> AppResult<f64> {
    value.ok_or_else(|| AppError::Validation(format!("Missing field: node 1 {field}")))
}

fn pipe_section(name: impl Into<String>, pipe: &PipeDef) -> AppResult<PipeSection> {
    let name = name.into();
    let count = |field: &str, n: i64| {
        u32::try_from(n)
            .map_err(|_| AppError::Validation(format!("{name}: {field} = {n} is not a fitting count")))
    };
    let fittings = Fittings {
        bends_90: count("antall_90_bend", pipe.antall_90_bend)?,
        tees: count("antall_tstykker", pipe.antall_tstykker)?,
        bends_45: count("antall_45_bend", pipe.antall_45_bend)?,
        bends_90_welded: count("antall_90_bend_sveiset", pipe.antall_90_bend_sveiset)?,
    };
    Ok(PipeSection::new(name, mm(pipe.diameter_mm), m(pipe.lengde_m)).with_fittings(fittings))
}
