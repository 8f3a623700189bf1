//! Sprinkler chain solver (NS 12845 tree method).
//!
//! Walks the node chain from the hydraulically most remote sprinkler (node 1)
//! toward the water supply, accumulating friction loss per pipe section and
//! emitted flow per node. Side-branch nodes are balanced against the main-line
//! junction pressure. The result is the design point: total flow and the
//! pressure required at the supply connection.

pub mod branch;
pub mod error;
pub mod problem;
pub mod solve;
pub mod steady;

pub use branch::{BalanceConfig, BranchBalance, balance_branch};
pub use error::{SolverError, SolverResult};
pub use problem::{Branch, BranchSide, ChainNode, ChainProblem, DesignRequirement};
pub use solve::{solve, solve_with_config};
pub use steady::{BranchState, ChainSolution, CoverageCheck, NodeState, SectionState};
