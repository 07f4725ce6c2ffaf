use anyhow::{Context, Result};
use std::path::PathBuf;

use kinkpot::input::load_baselines;
use kinkpot::model;
use kinkpot::scale::rhe_to_she;
use kinkpot::solver::CrossingSolver;

use super::{build_model, build_solver, load_config, ModelArgs};

/// Solve the crossing at a single pH and print it
pub fn run(input: PathBuf, ph: f64, model_args: ModelArgs) -> Result<()> {
    if !ph.is_finite() {
        anyhow::bail!("pH must be finite, got {}", ph);
    }

    let config = load_config(model_args.config.as_deref())?;
    let baselines = load_baselines(&input)
        .with_context(|| format!("Failed to load baselines from {}", input.display()))?;
    let params = build_model(baselines, &config)?;
    let solver_config = build_solver(&model_args, &config);

    let crossing = CrossingSolver::new(&params, solver_config)
        .find_crossing(ph)
        .with_context(|| format!("No crossing found at pH {}", ph))?;

    let u = crossing.potential_rhe;
    println!("pH:               {}", ph);
    println!("Kink potential:   {:.6} V vs RHE", u);
    println!("                  {:.6} V vs SHE", rhe_to_she(u, ph));
    println!("ΔG(OH*) at kink:  {:.6} eV", model::curve_a(&params, u, ph));
    println!("ΔG(O*)  at kink:  {:.6} eV", model::curve_b(&params, u, ph));
    println!("Residual:         {:e} eV", model::residual(&params, u, ph));

    Ok(())
}
