//! # Kink-Potential Pipeline
//!
//! Sweeps pH over a closed range, solves for the OH*/O* crossing at every
//! point, converts the resulting series to the SHE scale and fits a trend line
//! to both series.
//!
//! ```rust
//! use kinkpot::model::ModelParameters;
//! use kinkpot::pipeline::{Pipeline, PipelineConfig};
//!
//! let params = ModelParameters::new(-0.30, 1.80);
//! let output = Pipeline::new(params, PipelineConfig::default())?.run()?;
//!
//! assert_eq!(output.rhe_series.len(), 15);
//! println!("RHE trend: {}", output.rhe_fit);
//! # Ok::<(), kinkpot::pipeline::PipelineError>(())
//! ```
//!
//! The sweep either succeeds for every pH or fails with the first offending
//! pH; partial series are never fitted.

mod error;

#[cfg(test)]
mod tests;

pub use error::PipelineError;

use log::{debug, info};
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::fit::{self, TrendFit};
use crate::model::ModelParameters;
use crate::scale::{rhe_to_she, PotentialScale};
use crate::solver::{ConvergenceError, CrossingSolver, SolverConfig};

pub use crate::solver::CrossingResult;

/// Slack when counting grid points, so `max` survives rounding in `(max - min) / step`
const GRID_EPSILON: f64 = 1e-9;

/// Largest number of grid points a sweep may hold
pub const MAX_GRID_POINTS: usize = 1_000_000;

/// Inclusive, evenly spaced pH grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RangeBounds", into = "RangeBounds")]
pub struct PhRange {
    min: f64,
    max: f64,
    step: f64,
    points: usize,
}

/// Serialized form of a [`PhRange`]; deserialization goes through [`PhRange::new`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RangeBounds {
    min: f64,
    max: f64,
    step: f64,
}

impl PhRange {
    /// Create a grid from `min` to `max` (inclusive when on-grid) in `step` increments
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self, PipelineError> {
        if !min.is_finite() || !max.is_finite() || !step.is_finite() {
            return Err(PipelineError::InvalidRange(format!(
                "bounds and step must be finite (min {}, max {}, step {})",
                min, max, step
            )));
        }
        if step <= 0.0 {
            return Err(PipelineError::InvalidRange(format!(
                "step must be positive, got {}",
                step
            )));
        }
        if max < min {
            return Err(PipelineError::InvalidRange(format!(
                "max ({}) is below min ({})",
                max, min
            )));
        }

        let intervals = ((max - min) / step + GRID_EPSILON).floor();
        if !intervals.is_finite() || intervals >= MAX_GRID_POINTS as f64 {
            return Err(PipelineError::InvalidRange(format!(
                "{} to {} in steps of {} exceeds {} grid points",
                min, max, step, MAX_GRID_POINTS
            )));
        }

        Ok(Self {
            min,
            max,
            step,
            points: intervals as usize + 1,
        })
    }

    /// Lower bound
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Grid spacing
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of grid points
    pub fn len(&self) -> usize {
        self.points
    }

    /// Always false; a valid range holds at least `min`
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Grid values in increasing order
    pub fn values(&self) -> Vec<f64> {
        (0..self.points)
            .map(|i| self.min + i as f64 * self.step)
            .collect()
    }
}

impl Default for PhRange {
    /// pH 0 to 14 in unit steps
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 14.0,
            step: 1.0,
            points: 15,
        }
    }
}

impl TryFrom<RangeBounds> for PhRange {
    type Error = PipelineError;

    fn try_from(bounds: RangeBounds) -> Result<Self, Self::Error> {
        Self::new(bounds.min, bounds.max, bounds.step)
    }
}

impl From<PhRange> for RangeBounds {
    fn from(range: PhRange) -> Self {
        Self {
            min: range.min,
            max: range.max,
            step: range.step,
        }
    }
}

/// Kink potential at one pH on the SHE scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvertedResult {
    /// pH of the solve
    pub ph: f64,
    /// Crossing potential (V vs SHE)
    pub potential_she: f64,
}

impl From<&CrossingResult> for ConvertedResult {
    fn from(crossing: &CrossingResult) -> Self {
        Self {
            ph: crossing.ph,
            potential_she: rhe_to_she(crossing.potential_rhe, crossing.ph),
        }
    }
}

/// Settings for a full sweep
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// pH grid
    pub range: PhRange,
    /// Newton settings for every solve
    pub solver: SolverConfig,
    /// Solve grid points on the rayon pool (needs the `parallel` feature)
    pub parallel: bool,
}

/// Result of a full sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutput {
    /// Crossing potentials vs RHE, in pH order
    pub rhe_series: Vec<CrossingResult>,
    /// Crossing potentials vs SHE, in pH order
    pub she_series: Vec<ConvertedResult>,
    /// Trend of the RHE series
    pub rhe_fit: TrendFit,
    /// Trend of the SHE series
    pub she_fit: TrendFit,
}

impl PipelineOutput {
    /// pH values of the sweep
    pub fn ph_values(&self) -> Vec<f64> {
        self.rhe_series.iter().map(|c| c.ph).collect()
    }

    /// `(pH, potential)` pairs on the requested scale
    pub fn points(&self, scale: PotentialScale) -> Vec<(f64, f64)> {
        match scale {
            PotentialScale::Rhe => self
                .rhe_series
                .iter()
                .map(|c| (c.ph, c.potential_rhe))
                .collect(),
            PotentialScale::She => self
                .she_series
                .iter()
                .map(|c| (c.ph, c.potential_she))
                .collect(),
        }
    }

    /// Trend line on the requested scale
    pub fn fit(&self, scale: PotentialScale) -> &TrendFit {
        match scale {
            PotentialScale::Rhe => &self.rhe_fit,
            PotentialScale::She => &self.she_fit,
        }
    }
}

/// Runs the sweep for one set of model parameters
#[derive(Debug, Clone)]
pub struct Pipeline {
    params: ModelParameters,
    config: PipelineConfig,
}

impl Pipeline {
    /// Validate the parameters and build a pipeline
    pub fn new(params: ModelParameters, config: PipelineConfig) -> Result<Self, PipelineError> {
        params.validate()?;
        Ok(Self { params, config })
    }

    /// Model parameters
    pub fn params(&self) -> &ModelParameters {
        &self.params
    }

    /// Sweep settings
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Solve every grid point, convert and fit both series.
    pub fn run(&self) -> Result<PipelineOutput, PipelineError> {
        let ph_values = self.config.range.values();
        info!(
            "Solving OH*/O* crossing for {} pH values ({} to {}, step {})",
            ph_values.len(),
            self.config.range.min(),
            self.config.range.max(),
            self.config.range.step()
        );

        let solver = CrossingSolver::new(&self.params, self.config.solver);
        let outcomes = self.solve_all(&solver, &ph_values);

        // First failure in pH order, regardless of which thread hit it
        let mut rhe_series = Vec::with_capacity(outcomes.len());
        for (ph, outcome) in ph_values.iter().copied().zip(outcomes) {
            let crossing = outcome.map_err(|source| PipelineError::Crossing { ph, source })?;
            debug!(
                "pH {:>5}: U = {:.6} V vs RHE",
                ph, crossing.potential_rhe
            );
            rhe_series.push(crossing);
        }

        let she_series: Vec<ConvertedResult> =
            rhe_series.iter().map(ConvertedResult::from).collect();

        let rhe_values: Vec<f64> = rhe_series.iter().map(|c| c.potential_rhe).collect();
        let she_values: Vec<f64> = she_series.iter().map(|c| c.potential_she).collect();

        let rhe_fit = fit::fit(&ph_values, &rhe_values).map_err(|source| PipelineError::Fit {
            scale: PotentialScale::Rhe,
            source,
        })?;
        let she_fit = fit::fit(&ph_values, &she_values).map_err(|source| PipelineError::Fit {
            scale: PotentialScale::She,
            source,
        })?;

        info!("Kink trend vs RHE: {}", rhe_fit);
        info!("Kink trend vs SHE: {}", she_fit);

        Ok(PipelineOutput {
            rhe_series,
            she_series,
            rhe_fit,
            she_fit,
        })
    }

    #[cfg(feature = "parallel")]
    fn solve_all(
        &self,
        solver: &CrossingSolver<'_>,
        ph_values: &[f64],
    ) -> Vec<Result<CrossingResult, ConvergenceError>> {
        if self.config.parallel {
            ph_values
                .par_iter()
                .map(|&ph| solver.find_crossing(ph))
                .collect()
        } else {
            ph_values.iter().map(|&ph| solver.find_crossing(ph)).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn solve_all(
        &self,
        solver: &CrossingSolver<'_>,
        ph_values: &[f64],
    ) -> Vec<Result<CrossingResult, ConvergenceError>> {
        if self.config.parallel {
            log::warn!("Parallel sweep requested but the `parallel` feature is disabled");
        }
        ph_values.iter().map(|&ph| solver.find_crossing(ph)).collect()
    }
}

/// One-shot sweep with default solver settings.
///
/// Returns `(rhe_series, she_series, rhe_fit, she_fit)`.
pub fn run(
    ph_min: f64,
    ph_max: f64,
    ph_step: f64,
    params: &ModelParameters,
) -> Result<(Vec<CrossingResult>, Vec<ConvertedResult>, TrendFit, TrendFit), PipelineError> {
    let config = PipelineConfig {
        range: PhRange::new(ph_min, ph_max, ph_step)?,
        ..PipelineConfig::default()
    };
    let output = Pipeline::new(*params, config)?.run()?;
    Ok((
        output.rhe_series,
        output.she_series,
        output.rhe_fit,
        output.she_fit,
    ))
}
