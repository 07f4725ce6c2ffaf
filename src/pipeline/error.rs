use crate::fit::DegenerateInputError;
use crate::model::ModelError;
use crate::scale::PotentialScale;
use crate::solver::ConvergenceError;

/// Errors that abort a pH sweep
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Model parameters cannot be evaluated
    #[error("Invalid model parameters: {0}")]
    InvalidModel(#[from] ModelError),

    /// pH grid is malformed
    #[error("Invalid pH range: {0}")]
    InvalidRange(String),

    /// No crossing found at one pH
    #[error("Crossing solve failed at pH {ph}: {source}")]
    Crossing {
        /// pH of the failed solve
        ph: f64,
        /// Solver failure
        #[source]
        source: ConvergenceError,
    },

    /// Trend fit impossible for one series
    #[error("Linear fit of the {scale} series failed: {source}")]
    Fit {
        /// Scale of the series
        scale: PotentialScale,
        /// Fit failure
        #[source]
        source: DegenerateInputError,
    },
}

impl PipelineError {
    /// pH of a failed crossing solve, if that is what went wrong
    pub fn failed_ph(&self) -> Option<f64> {
        match self {
            Self::Crossing { ph, .. } => Some(*ph),
            _ => None,
        }
    }
}
