//! Problem definition for a sprinkler chain.

use crate::error::{SolverError, SolverResult};
use sf_components::{CFactor, HydraulicElement, PipeSection, Valve};
use sf_core::units::{Area, Length, Pressure, VolumeRate, in_m2, lpm};
use sf_core::{MAX_NODES, NodeNr, SectionNr};

/// Design requirement at node 1, the hydraulically most remote sprinkler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesignRequirement {
    /// Minimum pressure at the sprinkler
    pub min_pressure: Pressure,
    /// Area covered by the sprinkler
    pub coverage_area: Area,
    /// Design density, L/min per m² (mm/min)
    pub density_lpm_per_m2: f64,
}

impl DesignRequirement {
    /// Flow the coverage area needs at the design density.
    pub fn required_flow(&self) -> VolumeRate {
        lpm(in_m2(self.coverage_area) * self.density_lpm_per_m2)
    }
}

/// Which side of the main line a branch is drawn on.
///
/// Both sides are hydraulically identical; the distinction is kept for
/// reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchSide {
    Horizontal,
    Vertical,
}

/// Side-branch feeding a node off the main line.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub side: BranchSide,
    /// Pipe from the main-line junction to the sprinkler
    pub pipe: PipeSection,
}

/// One sprinkler node (nodes 2..N; node 1 is described by the requirement).
#[derive(Debug, Clone, PartialEq)]
pub struct ChainNode {
    /// Discharge coefficient, L/min per √bar
    pub k_factor: f64,
    /// K-factor already folds several heads behind one connection
    pub equivalent_k: bool,
    pub branch: Option<Branch>,
}

impl ChainNode {
    pub fn inline(k_factor: f64) -> Self {
        Self {
            k_factor,
            equivalent_k: false,
            branch: None,
        }
    }

    pub fn branch(k_factor: f64, side: BranchSide, pipe: PipeSection) -> Self {
        Self {
            k_factor,
            equivalent_k: false,
            branch: Some(Branch { side, pipe }),
        }
    }

    pub fn with_equivalent_k(mut self, equivalent_k: bool) -> Self {
        self.equivalent_k = equivalent_k;
        self
    }

    pub fn is_branch(&self) -> bool {
        self.branch.is_some()
    }
}

/// Chain of N nodes with N pipe sections as parallel arrays.
///
/// Section `i` ends at node `i`; section 1 is the riser feeding node 1.
/// Valves reference sections by number.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainProblem {
    pub c_factor: CFactor,
    /// Height of the array above the supply connection (signed)
    pub height: Length,
    pub requirement: DesignRequirement,
    nodes: Vec<ChainNode>,
    sections: Vec<PipeSection>,
    valves: Vec<Valve>,
}

impl ChainProblem {
    /// Create a problem holding node 1 and its riser.
    pub fn new(
        c_factor: CFactor,
        height: Length,
        requirement: DesignRequirement,
        first_k_factor: f64,
        riser: PipeSection,
    ) -> Self {
        Self {
            c_factor,
            height,
            requirement,
            nodes: vec![ChainNode::inline(first_k_factor)],
            sections: vec![riser],
            valves: Vec::new(),
        }
    }

    /// Append the next node and the section connecting it to the previous one.
    pub fn push_node(&mut self, node: ChainNode, section: PipeSection) -> SolverResult<NodeNr> {
        if self.nodes.len() >= MAX_NODES {
            return Err(SolverError::ProblemSetup {
                what: format!("chain already holds the maximum of {MAX_NODES} nodes"),
            });
        }
        self.nodes.push(node);
        self.sections.push(section);
        Ok(NodeNr::from_index(self.nodes.len() - 1))
    }

    /// Route a valve onto an existing section.
    pub fn add_valve(&mut self, valve: Valve) -> SolverResult<()> {
        if valve.section.index() >= self.sections.len() {
            return Err(SolverError::ProblemSetup {
                what: format!(
                    "valve '{}' references section {} but the chain has {}",
                    valve.name(),
                    valve.section,
                    self.sections.len()
                ),
            });
        }
        self.valves.push(valve);
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[ChainNode] {
        &self.nodes
    }

    pub fn node(&self, nr: NodeNr) -> Option<&ChainNode> {
        self.nodes.get(nr.index())
    }

    pub fn sections(&self) -> &[PipeSection] {
        &self.sections
    }

    pub fn section(&self, nr: SectionNr) -> Option<&PipeSection> {
        self.sections.get(nr.index())
    }

    pub fn valves(&self) -> &[Valve] {
        &self.valves
    }

    pub fn valves_on(&self, nr: SectionNr) -> impl Iterator<Item = &Valve> {
        self.valves.iter().filter(move |v| v.section == nr)
    }
}

impl Default for DesignRequirement {
    fn default() -> Self {
        use sf_core::units::{bar, m2};
        Self {
            min_pressure: bar(0.5),
            coverage_area: m2(12.0),
            density_lpm_per_m2: 5.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_components::{ValveKind, ValveSize};
    use sf_core::units::{m, mm};

    fn riser() -> PipeSection {
        PipeSection::new("RS1", mm(27.3), m(3.0))
    }

    #[test]
    fn push_numbers_nodes_from_two() {
        let mut p = ChainProblem::new(CFactor::C120, m(0.0), DesignRequirement::default(), 80.0, riser());
        let nr = p
            .push_node(ChainNode::inline(80.0), PipeSection::new("RS2", mm(27.3), m(2.0)))
            .unwrap();
        assert_eq!(nr.get(), 2);
        assert_eq!(p.node_count(), 2);
        assert_eq!(p.sections().len(), 2);
    }

    #[test]
    fn chain_is_capped() {
        let mut p = ChainProblem::new(CFactor::C120, m(0.0), DesignRequirement::default(), 80.0, riser());
        for _ in 1..MAX_NODES {
            p.push_node(ChainNode::inline(80.0), riser()).unwrap();
        }
        let err = p.push_node(ChainNode::inline(80.0), riser()).unwrap_err();
        assert!(matches!(err, SolverError::ProblemSetup { .. }));
    }

    #[test]
    fn valve_must_reference_existing_section() {
        let mut p = ChainProblem::new(CFactor::C120, m(0.0), DesignRequirement::default(), 80.0, riser());
        let ok = Valve::new(ValveKind::Gate, ValveSize::Dn50, SectionNr::FIRST);
        p.add_valve(ok).unwrap();
        let bad = Valve::new(ValveKind::Gate, ValveSize::Dn50, SectionNr::from_index(1));
        assert!(p.add_valve(bad).is_err());
        assert_eq!(p.valves_on(SectionNr::FIRST).count(), 1);
    }

    #[test]
    fn required_flow_is_area_times_density() {
        let req = DesignRequirement::default();
        assert!((sf_core::units::in_lpm(req.required_flow()) - 60.0).abs() < 1e-9);
    }
}
