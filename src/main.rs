//! # kinkpot
//!
//! Command-line tool computing the OH*/O* kink potential as a function of pH.
//!
//! ## Usage
//!
//! ```bash
//! # Sweep pH 0-14, write tables, plots and a JSON summary into ./results
//! kinkpot run input_data.txt -o results
//!
//! # Single pH
//! kinkpot solve input_data.txt --ph 7
//!
//! # Print the default configuration as a starting kinkpot.toml
//! kinkpot config > kinkpot.toml
//! ```
//!
//! The input file holds two lines: the OH* baseline free energy, then the O*
//! baseline free energy (eV).

mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use cli::config::Config;
use cli::run::RunOutputArgs;
use cli::{ModelArgs, SweepArgs};

/// kinkpot - OH*/O* kink potential versus pH on the RHE and SHE scales
#[derive(Parser)]
#[command(name = "kinkpot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sweep pH and write tables, plots and a summary
    Run {
        /// Two-line baseline file (OH* then O*, eV)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output directory (default: current directory)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        model: ModelArgs,

        #[command(flatten)]
        sweep: SweepArgs,

        /// Do not render SVG plots
        #[arg(long)]
        no_plot: bool,

        /// Do not write kink_summary.json
        #[arg(long)]
        no_summary: bool,
    },

    /// Solve the crossing at a single pH
    Solve {
        /// Two-line baseline file (OH* then O*, eV)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// pH to solve at
        #[arg(long, allow_negative_numbers = true)]
        ph: f64,

        #[command(flatten)]
        model: ModelArgs,
    },

    /// Print the default configuration as TOML
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Run {
            input,
            output,
            model,
            sweep,
            no_plot,
            no_summary,
        } => cli::run::run(
            input,
            model,
            sweep,
            RunOutputArgs {
                directory: output,
                no_plot,
                no_summary,
            },
        ),
        Commands::Solve { input, ph, model } => cli::solve::run(input, ph, model),
        Commands::Config => {
            print!("{}", Config::defaults().to_toml()?);
            Ok(())
        }
    }
}
