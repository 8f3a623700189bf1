//! Packaging of a chain solution into the response document.

use sf_core::units::{in_bar, in_lpm, in_m, in_mm};
use sf_results::{CalculationResponse, CoverageResult, NodeResult, SectionResult, round_dp};
use sf_solver::{ChainProblem, ChainSolution, NodeState, SectionState};

/// Decimals reported per quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Precision {
    flow: i32,
    pressure: i32,
    total_pressure: i32,
    gradient: i32,
    length: i32,
    k_factor: i32,
}

const REPORTED: Precision = Precision {
    flow: 1,
    pressure: 4,
    total_pressure: 3,
    gradient: 6,
    length: 2,
    k_factor: 2,
};

/// Build a successful response. With `rounded` unset every value is reported
/// at full precision.
pub fn build_response(
    problem: &ChainProblem,
    solution: &ChainSolution,
    rounded: bool,
) -> CalculationResponse {
    let r = |value: f64, decimals: i32| {
        if rounded {
            round_dp(value, decimals)
        } else {
            value
        }
    };
    let p = REPORTED;

    CalculationResponse {
        success: true,
        error: None,
        error_type: None,
        c_faktor: Some(problem.c_factor.value()),
        hoyde_anlegg_m: Some(in_m(problem.height)),
        total_vannmengde_lpm: Some(r(in_lpm(solution.total_flow), p.flow)),
        total_trykk_bar: Some(r(in_bar(solution.total_pressure), p.total_pressure)),
        hoyde_tillegg_bar: Some(r(in_bar(solution.elevation_offset), p.total_pressure)),
        ventil_ekvivalent_lengde: Some(r(in_m(solution.valve_equivalent_length), p.length)),
        dekningskrav: Some(CoverageResult {
            required_flow_lpm: r(in_lpm(solution.coverage.required_flow), p.flow),
            k_flow_lpm: r(in_lpm(solution.coverage.k_flow), p.flow),
            satisfied: solution.coverage.satisfied,
        }),
        noder: solution.nodes.iter().map(|n| node_result(n, &r)).collect(),
        rettstrekk: solution
            .sections
            .iter()
            .map(|s| section_result(s, &r))
            .collect(),
        advarsler: solution.warnings.clone(),
    }
}

fn node_result(node: &NodeState, r: &impl Fn(f64, i32) -> f64) -> NodeResult {
    let p = REPORTED;
    let balanced = node.branch.filter(|b| b.balanced);
    NodeResult {
        node_nr: node.nr.get(),
        flow_lpm: r(in_lpm(node.flow), p.flow),
        pressure_at_node_bar: r(in_bar(node.pressure), p.pressure),
        cumulative_flow_lpm: r(in_lpm(node.cumulative_flow), p.flow),
        is_branch: node.branch.is_some(),
        head_pressure_bar: balanced.map(|b| r(in_bar(b.head_pressure), p.pressure)),
        k_equivalent: balanced.map(|b| r(b.k_equivalent, p.k_factor)),
        branch_length_m: node
            .branch
            .and_then(|b| b.pipe_length)
            .map(|l| r(in_m(l), p.length)),
    }
}

fn section_result(section: &SectionState, r: &impl Fn(f64, i32) -> f64) -> SectionResult {
    let p = REPORTED;
    SectionResult {
        rs_nr: section.nr.get(),
        diameter_mm: r(in_mm(section.diameter), p.length),
        physical_length_m: r(in_m(section.length.physical), p.length),
        equivalent_length_m: r(in_m(section.length.added()), p.length),
        total_length_m: r(in_m(section.length.total()), p.length),
        flow_lpm: r(in_lpm(section.flow), p.flow),
        pressure_drop_per_m_bar: r(section.gradient_bar_per_m, p.gradient),
        pressure_drop_total_bar: r(in_bar(section.pressure_drop), p.pressure),
        inlet_pressure_bar: r(in_bar(section.inlet_pressure), p.pressure),
        outlet_pressure_bar: r(in_bar(section.outlet_pressure), p.pressure),
    }
}
