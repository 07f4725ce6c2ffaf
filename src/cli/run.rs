use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use kinkpot::input::load_baselines;
use kinkpot::output::{self, OutputOptions, RunSummary};
use kinkpot::pipeline::{Pipeline, PipelineConfig};
use kinkpot::report::ConsistencyReport;
use kinkpot::scale::PotentialScale;

use super::{build_model, build_range, build_solver, load_config, ModelArgs, SweepArgs};

/// Output flags of the run command
#[derive(Debug, Clone, Default)]
pub struct RunOutputArgs {
    /// Output directory (None = config value or current directory)
    pub directory: Option<PathBuf>,
    /// Skip plot rendering
    pub no_plot: bool,
    /// Skip the JSON summary
    pub no_summary: bool,
}

/// Sweep pH, write tables/plots/summary and print the consistency report
pub fn run(input: PathBuf, model: ModelArgs, sweep: SweepArgs, out: RunOutputArgs) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let config = load_config(model.config.as_deref())?;
    let baselines = load_baselines(&input)
        .with_context(|| format!("Failed to load baselines from {}", input.display()))?;
    let params = build_model(baselines, &config)?;

    let pipeline_config = PipelineConfig {
        range: build_range(&sweep, &config)?,
        solver: build_solver(&model, &config),
        parallel: sweep.parallel || config.sweep.parallel.unwrap_or(false),
    };

    let directory = out
        .directory
        .or_else(|| config.output.directory.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let options = OutputOptions {
        plots: !out.no_plot && config.output.plot.unwrap_or(true),
        summary: !out.no_summary && config.output.summary.unwrap_or(true),
    };

    info!("kinkpot - OH*/O* kink potential vs pH");
    info!("=====================================");
    info!("Input:  {}", input.display());
    info!("Output: {}", directory.display());
    info!(
        "Baselines: A = {} eV, B = {} eV",
        params.curve_a.baseline_ev, params.curve_b.baseline_ev
    );
    info!(
        "Initial guess: {} V vs RHE, tolerance {:e}",
        pipeline_config.solver.initial_guess_v, pipeline_config.solver.tolerance
    );

    let pipeline = Pipeline::new(params, pipeline_config)?;
    let result = pipeline.run().context("Kink potential sweep failed")?;

    let summary = RunSummary::new(&params, &pipeline_config, &result).with_input_file(&input);
    let written = output::write_all(&directory, &result, &summary, options)
        .context("Failed to write results")?;

    println!("{:>6}  {:>10}  {:>10}", "pH", "URHE (V)", "USHE (V)");
    for (rhe, she) in result.rhe_series.iter().zip(&result.she_series) {
        println!(
            "{:>6}  {:>10.6}  {:>10.6}",
            output::tsv::format_ph(rhe.ph),
            rhe.potential_rhe,
            she.potential_she
        );
    }
    println!();
    for scale in PotentialScale::ALL {
        let fit = result.fit(scale);
        println!("Linear fit vs {}: {} (r² = {:.4})", scale, fit, fit.r_squared);
    }
    println!();

    let report = ConsistencyReport::evaluate(&params, &pipeline_config.range, &result);
    print!("{}", report.format_colored());

    println!();
    println!("Files written:");
    for path in &written {
        println!("  {}", path.display());
    }

    if report.has_failures() {
        anyhow::bail!("{} consistency check(s) failed", report.failure_count());
    }
    Ok(())
}
