/// Failure to locate a curve crossing
///
/// Every variant carries the last iterate and its residual so the caller can
/// see how far the solve got.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvergenceError {
    /// Step budget exhausted without reaching the tolerance
    #[error(
        "no crossing after {iterations} iterations (last potential {last_potential:.6} V, residual {residual:e} eV)"
    )]
    IterationLimit {
        /// Steps taken
        iterations: usize,
        /// Last potential iterate (V vs RHE)
        last_potential: f64,
        /// Residual at the last iterate (eV)
        residual: f64,
    },

    /// Residual derivative vanished, no Newton step is defined
    #[error(
        "residual is flat at {last_potential:.6} V after {iterations} iterations (residual {residual:e} eV)"
    )]
    FlatResidual {
        /// Steps taken
        iterations: usize,
        /// Last potential iterate (V vs RHE)
        last_potential: f64,
        /// Residual at the last iterate (eV)
        residual: f64,
    },

    /// Iterate or residual became NaN or infinite
    #[error("iteration diverged after {iterations} iterations (potential {last_potential}, residual {residual})")]
    Diverged {
        /// Steps taken
        iterations: usize,
        /// Last potential iterate (V vs RHE)
        last_potential: f64,
        /// Residual at the last iterate (eV)
        residual: f64,
    },
}

impl ConvergenceError {
    /// Last potential iterate (V vs RHE)
    pub fn last_potential(&self) -> f64 {
        match self {
            Self::IterationLimit { last_potential, .. }
            | Self::FlatResidual { last_potential, .. }
            | Self::Diverged { last_potential, .. } => *last_potential,
        }
    }

    /// Residual at the last iterate (eV)
    pub fn residual(&self) -> f64 {
        match self {
            Self::IterationLimit { residual, .. }
            | Self::FlatResidual { residual, .. }
            | Self::Diverged { residual, .. } => *residual,
        }
    }
}
