//! Command handlers and shared argument handling for the `kinkpot` binary.

pub mod config;
pub mod run;
pub mod solve;

use anyhow::{Context, Result};
use clap::Args;
use log::info;
use std::path::{Path, PathBuf};

use kinkpot::input::Baselines;
use kinkpot::model::{CurveCoefficients, ModelParameters};
use kinkpot::pipeline::PhRange;
use kinkpot::solver::SolverConfig;

use self::config::Config;

/// Flags shared by every command that solves the model
#[derive(Debug, Clone, Default, Args)]
pub struct ModelArgs {
    /// TOML configuration file (flags override its values)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Starting potential for the Newton solve (V vs RHE, default: 1.23)
    #[arg(long, value_name = "VOLTS", allow_negative_numbers = true)]
    pub initial_guess: Option<f64>,

    /// Convergence threshold on |ΔG_OH - ΔG_O| (eV, default: 1e-10)
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Newton step budget per pH (default: 100)
    #[arg(long)]
    pub max_iterations: Option<usize>,
}

/// Flags describing the pH grid
#[derive(Debug, Clone, Default, Args)]
pub struct SweepArgs {
    /// Lowest pH (default: 0)
    #[arg(long, allow_negative_numbers = true)]
    pub ph_min: Option<f64>,

    /// Highest pH, inclusive (default: 14)
    #[arg(long, allow_negative_numbers = true)]
    pub ph_max: Option<f64>,

    /// pH increment (default: 1)
    #[arg(long)]
    pub ph_step: Option<f64>,

    /// Solve the pH grid on all cores (requires the parallel feature)
    #[arg(long)]
    pub parallel: bool,
}

/// Load the config file if one was given, otherwise an empty config
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            info!("Using config file: {}", path.display());
            Config::from_file(path)
        }
        None => Ok(Config::default()),
    }
}

/// Model parameters: baselines from the input file, coefficients from config
pub fn build_model(baselines: Baselines, config: &Config) -> Result<ModelParameters> {
    let params = ModelParameters::with_coefficients(
        baselines.curve_a_ev,
        baselines.curve_b_ev,
        config.curve_a.apply(CurveCoefficients::hydroxyl()),
        config.curve_b.apply(CurveCoefficients::oxo()),
    );
    params.validate().context("Invalid model parameters")?;
    Ok(params)
}

/// Solver settings with flag > config > default precedence
pub fn build_solver(args: &ModelArgs, config: &Config) -> SolverConfig {
    let defaults = SolverConfig::default();
    SolverConfig {
        initial_guess_v: args
            .initial_guess
            .or(config.solver.initial_guess)
            .unwrap_or(defaults.initial_guess_v),
        tolerance: args
            .tolerance
            .or(config.solver.tolerance)
            .unwrap_or(defaults.tolerance),
        max_iterations: args
            .max_iterations
            .or(config.solver.max_iterations)
            .unwrap_or(defaults.max_iterations),
    }
}

/// pH grid with flag > config > default precedence
pub fn build_range(args: &SweepArgs, config: &Config) -> Result<PhRange> {
    let defaults = PhRange::default();
    let range = PhRange::new(
        args.ph_min.or(config.sweep.ph_min).unwrap_or(defaults.min()),
        args.ph_max.or(config.sweep.ph_max).unwrap_or(defaults.max()),
        args.ph_step.or(config.sweep.ph_step).unwrap_or(defaults.step()),
    )?;
    Ok(range)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_overrides_config() {
        let config = Config::from_str("[solver]\ninitial_guess = 1.5\ntolerance = 1e-9\n").unwrap();
        let args = ModelArgs {
            initial_guess: Some(2.0),
            ..ModelArgs::default()
        };
        let solver = build_solver(&args, &config);
        assert_eq!(solver.initial_guess_v, 2.0);
        assert_eq!(solver.tolerance, 1e-9);
        assert_eq!(solver.max_iterations, 100);
    }

    #[test]
    fn test_range_precedence() {
        let config = Config::from_str("[sweep]\nph_max = 10.0\nph_step = 2.0\n").unwrap();
        let args = SweepArgs {
            ph_step: Some(0.5),
            ..SweepArgs::default()
        };
        let range = build_range(&args, &config).unwrap();
        assert_eq!(range.min(), 0.0);
        assert_eq!(range.max(), 10.0);
        assert_eq!(range.step(), 0.5);
    }

    #[test]
    fn test_invalid_range_reported() {
        let args = SweepArgs {
            ph_step: Some(0.0),
            ..SweepArgs::default()
        };
        assert!(build_range(&args, &Config::default()).is_err());
    }

    #[test]
    fn test_model_uses_config_coefficients() {
        let config = Config::from_str("[curve_a]\nelectrons = 0\n").unwrap();
        let baselines = Baselines {
            curve_a_ev: -0.3,
            curve_b_ev: 1.8,
        };
        assert!(build_model(baselines, &config).is_err());

        let config = Config::from_str("[curve_b]\nfield_coupling = -1.0\n").unwrap();
        let params = build_model(baselines, &config).unwrap();
        assert_eq!(params.curve_b.coefficients.field_coupling, -1.0);
        assert_eq!(params.curve_a.coefficients.field_coupling, -1.42);
    }
}
