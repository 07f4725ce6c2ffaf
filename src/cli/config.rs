//! TOML configuration file support.
//!
//! Every setting can also be given on the command line; flags win over the
//! file, and the file wins over built-in defaults.
//!
//! ```toml
//! # kinkpot.toml
//! [sweep]
//! ph_min = 0.0
//! ph_max = 14.0
//! ph_step = 1.0
//! parallel = false
//!
//! [solver]
//! initial_guess = 1.23
//! tolerance = 1e-10
//! max_iterations = 100
//!
//! [curve_a]
//! linear_response = -0.04
//! quadratic_response = -0.08
//!
//! [curve_b]
//! electrons = 2
//!
//! [output]
//! directory = "results"
//! plot = true
//! summary = true
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use kinkpot::model::CurveCoefficients;
use kinkpot::pipeline::PhRange;
use kinkpot::solver::SolverConfig;

/// Root configuration structure for kinkpot.toml files.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// pH sweep settings.
    #[serde(default)]
    pub sweep: SweepConfig,

    /// Newton solver settings.
    #[serde(default)]
    pub solver: SolverSettings,

    /// Coefficient overrides for the OH* curve.
    #[serde(default)]
    pub curve_a: CurveOverrides,

    /// Coefficient overrides for the O* curve.
    #[serde(default)]
    pub curve_b: CurveOverrides,

    /// Output settings.
    #[serde(default)]
    pub output: OutputSettings,
}

/// Configuration of the pH grid.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SweepConfig {
    /// Lowest pH.
    pub ph_min: Option<f64>,
    /// Highest pH (inclusive when on the grid).
    pub ph_max: Option<f64>,
    /// pH increment.
    pub ph_step: Option<f64>,
    /// Solve the grid in parallel (requires the parallel feature).
    pub parallel: Option<bool>,
}

/// Newton solver overrides.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolverSettings {
    /// Starting potential (V vs RHE).
    pub initial_guess: Option<f64>,
    /// Residual tolerance (eV).
    pub tolerance: Option<f64>,
    /// Newton step budget.
    pub max_iterations: Option<usize>,
}

/// Partial override of one curve's coefficients.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CurveOverrides {
    /// Potential-to-field coupling `k`.
    pub field_coupling: Option<f64>,
    /// Linear field response `c1`.
    pub linear_response: Option<f64>,
    /// Quadratic field response `c2`.
    pub quadratic_response: Option<f64>,
    /// Reference potential `U_pzc` (V vs SHE).
    pub reference_potential: Option<f64>,
    /// Electrons transferred `n`.
    pub electrons: Option<u32>,
}

/// Output overrides.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSettings {
    /// Directory receiving all output files.
    pub directory: Option<PathBuf>,
    /// Render SVG plots.
    pub plot: Option<bool>,
    /// Write the JSON summary.
    pub summary: Option<bool>,
}

impl CurveOverrides {
    /// Apply the set fields on top of `base`.
    pub fn apply(&self, base: CurveCoefficients) -> CurveCoefficients {
        CurveCoefficients {
            field_coupling: self.field_coupling.unwrap_or(base.field_coupling),
            linear_response: self.linear_response.unwrap_or(base.linear_response),
            quadratic_response: self.quadratic_response.unwrap_or(base.quadratic_response),
            reference_potential_v: self
                .reference_potential
                .unwrap_or(base.reference_potential_v),
            electrons: self.electrons.unwrap_or(base.electrons),
        }
    }

    fn from_coefficients(c: CurveCoefficients) -> Self {
        Self {
            field_coupling: Some(c.field_coupling),
            linear_response: Some(c.linear_response),
            quadratic_response: Some(c.quadratic_response),
            reference_potential: Some(c.reference_potential_v),
            electrons: Some(c.electrons),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Fully populated configuration holding the built-in defaults.
    pub fn defaults() -> Self {
        let range = PhRange::default();
        let solver = SolverConfig::default();
        Self {
            sweep: SweepConfig {
                ph_min: Some(range.min()),
                ph_max: Some(range.max()),
                ph_step: Some(range.step()),
                parallel: Some(false),
            },
            solver: SolverSettings {
                initial_guess: Some(solver.initial_guess_v),
                tolerance: Some(solver.tolerance),
                max_iterations: Some(solver.max_iterations),
            },
            curve_a: CurveOverrides::from_coefficients(CurveCoefficients::hydroxyl()),
            curve_b: CurveOverrides::from_coefficients(CurveCoefficients::oxo()),
            output: OutputSettings {
                directory: Some(PathBuf::from(".")),
                plot: Some(true),
                summary: Some(true),
            },
        }
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}
