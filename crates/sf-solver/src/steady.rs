//! Solved design point of a sprinkler chain.

use crate::problem::BranchSide;
use sf_components::EquivalentLength;
use sf_core::units::{Length, Pressure, VolumeRate};
use sf_core::{NodeNr, SectionNr};

/// How a branch node was resolved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BranchState {
    pub side: BranchSide,
    /// Balanced against its branch pipe; `false` when the equivalent K-factor
    /// was used as-is.
    pub balanced: bool,
    /// Pressure at the sprinkler head
    pub head_pressure: Pressure,
    /// K-factor seen from the junction
    pub k_equivalent: f64,
    /// Branch pipe equivalent length; `None` when an equivalent K-factor
    /// branch has a pipe the tables cannot resolve
    pub pipe_length: Option<Length>,
    pub iterations: usize,
}

/// Per-node result.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeState {
    pub nr: NodeNr,
    /// Flow emitted at this node
    pub flow: VolumeRate,
    /// Main-line pressure at this node
    pub pressure: Pressure,
    /// Flow leaving this node toward the supply
    pub cumulative_flow: VolumeRate,
    pub branch: Option<BranchState>,
}

/// Per-section result.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionState {
    pub nr: SectionNr,
    pub diameter: Length,
    pub length: EquivalentLength,
    /// Flow carried by the section
    pub flow: VolumeRate,
    /// Friction gradient, bar per metre
    pub gradient_bar_per_m: f64,
    /// Friction loss over the total equivalent length
    pub pressure_drop: Pressure,
    /// Pressure at the node farther from the supply
    pub inlet_pressure: Pressure,
    /// Pressure at the section's downstream node (toward the supply)
    pub outlet_pressure: Pressure,
}

/// Node 1 coverage cross-check. Advisory: it never changes the solve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverageCheck {
    /// Coverage area × design density
    pub required_flow: VolumeRate,
    /// K₁·√P₁
    pub k_flow: VolumeRate,
    pub satisfied: bool,
}

/// Solution of a chain.
#[derive(Clone, Debug, PartialEq)]
pub struct ChainSolution {
    pub nodes: Vec<NodeState>,
    pub sections: Vec<SectionState>,
    pub coverage: CoverageCheck,
    /// Static head added at the supply
    pub elevation_offset: Pressure,
    /// Design flow at the supply
    pub total_flow: VolumeRate,
    /// Design pressure at the supply
    pub total_pressure: Pressure,
    /// Sum of valve equivalent lengths, all sections
    pub valve_equivalent_length: Length,
    /// Advisory notes; none of them change the result
    pub warnings: Vec<String>,
}

impl ChainSolution {
    pub fn node(&self, nr: NodeNr) -> Option<&NodeState> {
        self.nodes.get(nr.index())
    }

    pub fn section(&self, nr: SectionNr) -> Option<&SectionState> {
        self.sections.get(nr.index())
    }
}
