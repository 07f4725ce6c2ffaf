//! # Crossing Solver
//!
//! Locates the kink potential: the potential (V vs RHE) at which the OH* and
//! O* free-energy curves intersect for a given pH.
//!
//! ## Root selection
//!
//! Both curves are quadratic in the potential, so their difference is a
//! quadratic with up to two real roots. The solver runs Newton's method from
//! a fixed initial guess ([`DEFAULT_INITIAL_GUESS_V`], the 1.23 V equilibrium
//! potential of water oxidation). For a quadratic, Newton iterates started on
//! one side of the vertex stay on that side and converge to the root there,
//! which is always the root nearest the initial guess. That root is the one
//! reported; the far root is never considered.
//!
//! When no real root exists the residual stays bounded away from zero and the
//! solve fails with [`ConvergenceError::IterationLimit`] instead of returning a
//! spurious potential.

mod error;


pub use error::ConvergenceError;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::model::{self, ModelParameters};

/// Equilibrium potential of the oxygen evolution reaction (V vs RHE)
pub const DEFAULT_INITIAL_GUESS_V: f64 = 1.23;

/// Residual magnitude (eV) accepted as converged
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Newton step budget per solve
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Newton iteration settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Starting potential (V vs RHE)
    pub initial_guess_v: f64,
    /// Convergence threshold on `|residual|`
    pub tolerance: f64,
    /// Maximum number of Newton steps
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            initial_guess_v: DEFAULT_INITIAL_GUESS_V,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// A converged Newton solve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonRoot {
    /// Root estimate
    pub root: f64,
    /// Function value at the root estimate
    pub residual: f64,
    /// Newton steps taken
    pub iterations: usize,
}

/// Newton's method on a scalar function with a known derivative.
///
/// Stops as soon as `|f(x)| < config.tolerance`. The starting point is taken
/// from `x0`, not from `config.initial_guess_v`.
pub fn newton<F, D>(f: F, df: D, x0: f64, config: &SolverConfig) -> Result<NewtonRoot, ConvergenceError>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    let mut x = x0;
    let mut fx = f(x);

    for iteration in 0..=config.max_iterations {
        if !x.is_finite() || !fx.is_finite() {
            return Err(ConvergenceError::Diverged {
                iterations: iteration,
                last_potential: x,
                residual: fx,
            });
        }
        if fx.abs() < config.tolerance {
            return Ok(NewtonRoot {
                root: x,
                residual: fx,
                iterations: iteration,
            });
        }
        if iteration == config.max_iterations {
            break;
        }

        let slope = df(x);
        if slope.abs() <= f64::EPSILON {
            return Err(ConvergenceError::FlatResidual {
                iterations: iteration,
                last_potential: x,
                residual: fx,
            });
        }

        x -= fx / slope;
        fx = f(x);
        trace!("newton step {}: x = {:.12}, f(x) = {:e}", iteration + 1, x, fx);
    }

    Err(ConvergenceError::IterationLimit {
        iterations: config.max_iterations,
        last_potential: x,
        residual: fx,
    })
}

/// Kink potential at one pH
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossingResult {
    /// pH of the solve
    pub ph: f64,
    /// Crossing potential (V vs RHE)
    pub potential_rhe: f64,
}

/// Finds where the two free-energy curves of a model intersect
///
/// Holds no mutable state; every [`find_crossing`](Self::find_crossing) call
/// is independent, so one solver can be shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct CrossingSolver<'a> {
    params: &'a ModelParameters,
    config: SolverConfig,
}

impl<'a> CrossingSolver<'a> {
    /// Create a solver for the given model
    pub fn new(params: &'a ModelParameters, config: SolverConfig) -> Self {
        Self { params, config }
    }

    /// Solver settings
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Potential (V vs RHE) at which `curve_a == curve_b` for this pH.
    pub fn find_crossing(&self, ph: f64) -> Result<CrossingResult, ConvergenceError> {
        let params = self.params;
        let root = newton(
            |u| model::residual(params, u, ph),
            |u| model::residual_slope(params, u, ph),
            self.config.initial_guess_v,
            &self.config,
        )?;

        trace!(
            "pH {}: crossing at {:.6} V vs RHE after {} iterations (residual {:e})",
            ph,
            root.root,
            root.iterations,
            root.residual
        );

        Ok(CrossingResult {
            ph,
            potential_rhe: root.root,
        })
    }
}
