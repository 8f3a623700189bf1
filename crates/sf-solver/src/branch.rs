//! Side-branch balancing.
//!
//! A branch sprinkler hangs off a main-line junction through its own pipe. The
//! head pressure `p` at the sprinkler must satisfy
//!
//! `p + loss(K·√p) = p_junction`
//!
//! The left side is strictly increasing in `p`, so the root is bracketed by
//! `[0, p_junction]` and found by bisection.

use crate::error::{SolverError, SolverResult};
use sf_components::{CFactor, PipeSection};
use sf_core::units::{Length, Pressure, VolumeRate, bar, in_bar, in_m, lpm};

/// Branch balance iteration settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceConfig {
    /// Maximum bisection steps
    pub max_iterations: usize,
    /// Converged when successive head pressure estimates differ by less (bar)
    pub pressure_tol_bar: f64,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            pressure_tol_bar: 1e-6,
        }
    }
}

/// Balanced operating point of one branch sprinkler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchBalance {
    /// Pressure at the sprinkler head
    pub head_pressure: Pressure,
    /// Flow emitted by the sprinkler
    pub flow: VolumeRate,
    /// K-factor seen from the junction: flow / √p_junction
    pub k_equivalent: f64,
    /// Friction gradient in the branch pipe at `flow` (bar/m)
    pub gradient_bar_per_m: f64,
    pub iterations: usize,
}

/// Balance a branch sprinkler against its junction pressure.
///
/// `side_length` is the branch pipe's equivalent length. Fails with
/// [`SolverError::ConvergenceFailed`] when the iteration cap is hit.
pub fn balance_branch(
    junction: Pressure,
    k_factor: f64,
    pipe: &PipeSection,
    side_length: Length,
    c_factor: CFactor,
    config: &BalanceConfig,
) -> SolverResult<BranchBalance> {
    let p_junction = in_bar(junction);
    let length_m = in_m(side_length);

    let residual = |p: f64| -> SolverResult<f64> {
        let flow = lpm(k_factor * p.max(0.0).sqrt());
        let loss = pipe.pressure_drop(flow, c_factor, side_length)?;
        Ok(p + in_bar(loss) - p_junction)
    };

    let (head, iterations) = if p_junction <= 0.0 || k_factor <= 0.0 || length_m <= 0.0 {
        // Nothing flows or nothing resists: the head sees the junction.
        (p_junction.max(0.0), 0)
    } else {
        let mut lo = 0.0_f64;
        let mut hi = p_junction;
        let mut previous = hi;
        let mut converged = None;

        for iter in 1..=config.max_iterations {
            let mid = 0.5 * (lo + hi);
            let r = residual(mid)?;
            if !r.is_finite() {
                return Err(SolverError::Numeric {
                    what: format!("branch residual is {r} at {mid} bar"),
                });
            }
            if r > 0.0 {
                hi = mid;
            } else {
                lo = mid;
            }
            tracing::trace!(iter, head_bar = mid, residual_bar = r, "branch balance step");

            if (mid - previous).abs() < config.pressure_tol_bar {
                converged = Some((0.5 * (lo + hi), iter));
                break;
            }
            previous = mid;
        }

        converged.ok_or_else(|| SolverError::ConvergenceFailed {
            what: format!(
                "branch balance at junction pressure {p_junction:.4} bar did not settle within {} bar",
                config.pressure_tol_bar
            ),
            iterations: config.max_iterations,
        })?
    };

    let flow = lpm(k_factor * head.sqrt());
    let k_equivalent = if p_junction > 0.0 {
        k_factor * (head / p_junction).sqrt()
    } else {
        k_factor
    };
    let gradient_bar_per_m = pipe.gradient_bar_per_m(flow, c_factor)?;

    Ok(BranchBalance {
        head_pressure: bar(head),
        flow,
        k_equivalent,
        gradient_bar_per_m,
        iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sf_components::HydraulicElement;
    use sf_core::units::{in_lpm, m, mm};

    fn side_pipe(length: f64) -> PipeSection {
        PipeSection::new("branch", mm(27.3), m(length))
    }

    #[test]
    fn no_side_length_means_head_at_junction() {
        let pipe = side_pipe(0.0);
        let b = balance_branch(
            bar(1.0),
            80.0,
            &pipe,
            m(0.0),
            CFactor::C120,
            &BalanceConfig::default(),
        )
        .unwrap();
        assert_eq!(b.iterations, 0);
        assert_relative_eq!(in_bar(b.head_pressure), 1.0);
        assert_relative_eq!(in_lpm(b.flow), 80.0, epsilon = 1e-9);
        assert_relative_eq!(b.k_equivalent, 80.0);
    }

    #[test]
    fn balanced_head_satisfies_loss_equation() {
        let pipe = side_pipe(6.0);
        let length = pipe.equivalent_length(CFactor::C120).unwrap();
        let b = balance_branch(
            bar(1.2),
            80.0,
            &pipe,
            length,
            CFactor::C120,
            &BalanceConfig::default(),
        )
        .unwrap();

        let head = in_bar(b.head_pressure);
        assert!(head < 1.2 && head > 0.0);
        let loss = in_bar(pipe.pressure_drop(b.flow, CFactor::C120, length).unwrap());
        assert_relative_eq!(head + loss, 1.2, epsilon = 1e-5);
        assert!(b.k_equivalent < 80.0);
        assert!(b.iterations > 0);
    }

    #[test]
    fn iteration_cap_is_convergence_error() {
        let pipe = side_pipe(6.0);
        let config = BalanceConfig {
            max_iterations: 3,
            pressure_tol_bar: 1e-12,
        };
        let err = balance_branch(bar(1.2), 80.0, &pipe, m(6.0), CFactor::C120, &config)
            .unwrap_err();
        assert!(matches!(
            err,
            SolverError::ConvergenceFailed { iterations: 3, .. }
        ));
    }

    #[test]
    fn zero_junction_pressure_emits_nothing() {
        let pipe = side_pipe(2.0);
        let b = balance_branch(
            bar(0.0),
            80.0,
            &pipe,
            m(2.0),
            CFactor::C120,
            &BalanceConfig::default(),
        )
        .unwrap();
        assert_eq!(in_lpm(b.flow), 0.0);
    }
}
