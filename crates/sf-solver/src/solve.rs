//! Chain walk from node 1 toward the supply.

use crate::branch::{BalanceConfig, balance_branch};
use crate::error::{SolverError, SolverResult};
use crate::problem::{ChainNode, ChainProblem};
use crate::steady::{BranchState, ChainSolution, CoverageCheck, NodeState, SectionState};
use sf_components::elevation::static_offset;
use sf_components::valve::total_equivalent_length;
use sf_components::{CFactor, EquivalentLength, HydraulicElement};
use sf_core::numeric::ensure_non_negative;
use sf_core::units::{Length, Pressure, VolumeRate, bar, in_bar, in_lpm, lpm};
use sf_core::{NodeNr, SectionNr};

/// Solve with default balance settings.
pub fn solve(problem: &ChainProblem) -> SolverResult<ChainSolution> {
    solve_with_config(problem, &BalanceConfig::default())
}

/// Solve the chain.
///
/// Equivalent lengths are resolved for every section and for every branch
/// pipe that will be balanced first, so a table miss fails the solve before
/// any node is visited.
pub fn solve_with_config(
    problem: &ChainProblem,
    config: &BalanceConfig,
) -> SolverResult<ChainSolution> {
    let node_count = problem.node_count();
    if node_count == 0 || problem.sections().len() != node_count {
        return Err(SolverError::ProblemSetup {
            what: format!(
                "{} nodes and {} sections; expected one section per node",
                node_count,
                problem.sections().len()
            ),
        });
    }

    let c = problem.c_factor;
    let lengths = problem
        .sections()
        .iter()
        .enumerate()
        .map(|(i, s)| s.equivalent_length_with(c, problem.valves_on(SectionNr::from_index(i))))
        .collect::<Result<Vec<EquivalentLength>, _>>()?;
    let branch_lengths = problem
        .nodes()
        .iter()
        .map(|n| branch_length(n, c))
        .collect::<SolverResult<Vec<Option<Length>>>>()?;

    let mut warnings = Vec::new();

    let mut nodes = Vec::with_capacity(node_count);
    let mut sections = Vec::with_capacity(node_count);

    // Node 1
    let first = &problem.nodes()[0];
    let k1 = ensure_non_negative(first.k_factor, "node 1 K-factor")?;
    let p1 = ensure_non_negative(in_bar(problem.requirement.min_pressure), "minimum pressure")?;
    let flow1 = lpm(k1 * p1.sqrt());
    let coverage = coverage_check(problem, flow1);
    if !coverage.satisfied {
        tracing::warn!(
            k_flow_lpm = in_lpm(flow1),
            required_lpm = in_lpm(coverage.required_flow),
            "node 1 K-factor flow is below the coverage requirement"
        );
        warnings.push(format!(
            "node 1 K-factor flow {:.1} L/min is below the coverage requirement {:.1} L/min",
            in_lpm(flow1),
            in_lpm(coverage.required_flow)
        ));
    }
    for valve in problem.valves_on(SectionNr::FIRST) {
        // Node 1's pressure is fixed, so riser losses never reach the supply.
        tracing::warn!(
            valve = valve.name(),
            "valve on section 1 is counted in the valve total but adds no pressure loss"
        );
        warnings.push(format!(
            "valve '{}' on section 1 is counted in the valve total but adds no pressure loss",
            valve.name()
        ));
    }

    let riser = &problem.sections()[0];
    let riser_gradient = riser.gradient_bar_per_m(flow1, c)?;
    let riser_drop = riser.pressure_drop(flow1, c, lengths[0].total())?;
    sections.push(SectionState {
        nr: SectionNr::FIRST,
        diameter: riser.diameter,
        length: lengths[0],
        flow: flow1,
        gradient_bar_per_m: riser_gradient,
        pressure_drop: riser_drop,
        // Node 1's pressure is specified at the node itself.
        inlet_pressure: bar(p1),
        outlet_pressure: bar(p1),
    });
    nodes.push(NodeState {
        nr: NodeNr::FIRST,
        flow: flow1,
        pressure: bar(p1),
        cumulative_flow: flow1,
        branch: None,
    });
    tracing::debug!(node = 1, flow_lpm = in_lpm(flow1), pressure_bar = p1, "node solved");

    // Nodes 2..N
    for i in 1..node_count {
        let nr = NodeNr::from_index(i);
        let section = &problem.sections()[i];
        let upstream = &nodes[i - 1];
        let carried = upstream.cumulative_flow;
        let inlet_pressure = upstream.pressure;

        let gradient = section.gradient_bar_per_m(carried, c)?;
        let drop = section.pressure_drop(carried, c, lengths[i].total())?;
        let junction = inlet_pressure + drop;

        sections.push(SectionState {
            nr,
            diameter: section.diameter,
            length: lengths[i],
            flow: carried,
            gradient_bar_per_m: gradient,
            pressure_drop: drop,
            inlet_pressure,
            outlet_pressure: junction,
        });

        tracing::trace!(
            section = section.name(),
            flow_lpm = in_lpm(carried),
            drop_bar = in_bar(drop),
            "section solved"
        );

        let (flow, branch) = emit(
            problem,
            &problem.nodes()[i],
            nr,
            junction,
            branch_lengths[i],
            config,
        )?;
        let cumulative_flow = carried + flow;

        tracing::debug!(
            node = nr.get(),
            flow_lpm = in_lpm(flow),
            pressure_bar = in_bar(junction),
            cumulative_lpm = in_lpm(cumulative_flow),
            branch = branch.is_some(),
            "node solved"
        );

        nodes.push(NodeState {
            nr,
            flow,
            pressure: junction,
            cumulative_flow,
            branch,
        });
    }

    let elevation_offset = static_offset(problem.height)?;
    let last = &nodes[node_count - 1];
    let total_flow = last.cumulative_flow;
    let total_pressure = last.pressure + elevation_offset;
    let valve_equivalent_length = total_equivalent_length(problem.valves(), c)?;

    tracing::debug!(
        total_flow_lpm = in_lpm(total_flow),
        total_pressure_bar = in_bar(total_pressure),
        "chain solved"
    );

    Ok(ChainSolution {
        nodes,
        sections,
        coverage,
        elevation_offset,
        total_flow,
        total_pressure,
        valve_equivalent_length,
        warnings,
    })
}

/// Equivalent length of a node's branch pipe.
///
/// Required for branches that will be balanced. An equivalent K-factor branch
/// never uses its pipe, so its length is only reported when it resolves.
fn branch_length(node: &ChainNode, c: CFactor) -> SolverResult<Option<Length>> {
    match &node.branch {
        None => Ok(None),
        Some(branch) if node.equivalent_k => Ok(branch.pipe.equivalent_length(c).ok()),
        Some(branch) => Ok(Some(branch.pipe.equivalent_length(c)?)),
    }
}

/// Flow emitted at a node given the main-line pressure at its junction.
fn emit(
    problem: &ChainProblem,
    node: &ChainNode,
    nr: NodeNr,
    junction: Pressure,
    pipe_length: Option<Length>,
    config: &BalanceConfig,
) -> SolverResult<(VolumeRate, Option<BranchState>)> {
    let k = ensure_non_negative(node.k_factor, "K-factor")?;
    let p = in_bar(junction).max(0.0);

    let Some(branch) = &node.branch else {
        return Ok((lpm(k * p.sqrt()), None));
    };

    if node.equivalent_k {
        // Heads behind this connection are already folded into K.
        let state = BranchState {
            side: branch.side,
            balanced: false,
            head_pressure: junction,
            k_equivalent: k,
            pipe_length,
            iterations: 0,
        };
        return Ok((lpm(k * p.sqrt()), Some(state)));
    }

    let Some(side_length) = pipe_length else {
        return Err(SolverError::ProblemSetup {
            what: format!("node {nr}: branch pipe length was not resolved"),
        });
    };
    let balance = balance_branch(
        junction,
        k,
        &branch.pipe,
        side_length,
        problem.c_factor,
        config,
    )
    .map_err(|e| match e {
        SolverError::ConvergenceFailed { what, iterations } => SolverError::ConvergenceFailed {
            what: format!("node {nr}: {what}"),
            iterations,
        },
        other => other,
    })?;

    let state = BranchState {
        side: branch.side,
        balanced: true,
        head_pressure: balance.head_pressure,
        k_equivalent: balance.k_equivalent,
        pipe_length: Some(side_length),
        iterations: balance.iterations,
    };
    Ok((balance.flow, Some(state)))
}

fn coverage_check(problem: &ChainProblem, k_flow: VolumeRate) -> CoverageCheck {
    let required_flow = problem.requirement.required_flow();
    CoverageCheck {
        required_flow,
        k_flow,
        satisfied: in_lpm(k_flow) + 1e-9 >= in_lpm(required_flow),
    }
}
