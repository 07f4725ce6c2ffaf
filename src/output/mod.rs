//! # Result Output
//!
//! Writers for the artifacts of a sweep:
//!
//! - [`tsv`]: `URHE_vs_pH.txt` / `USHE_vs_pH.txt` tab-separated tables
//! - [`plot`]: `URHE_vs_pH.svg` / `USHE_vs_pH.svg` series + trend plots
//! - [`summary`]: `kink_summary.json` with parameters, series and fits
//!
//! The numeric core never calls into this module; the CLI hands it a finished
//! [`PipelineOutput`](crate::pipeline::PipelineOutput).

mod error;
pub mod plot;
pub mod summary;
pub mod tsv;

pub use error::OutputError;
pub use plot::{render_series_plot, PlotStyle};
pub use summary::RunSummary;
pub use tsv::{write_series, write_series_file};

use std::path::{Path, PathBuf};

use log::info;

use crate::pipeline::PipelineOutput;
use crate::scale::PotentialScale;

/// File name of the JSON summary
pub const SUMMARY_FILE_NAME: &str = "kink_summary.json";

/// File name of the table for one scale
pub fn table_file_name(scale: PotentialScale) -> String {
    format!("{}_vs_pH.txt", scale.symbol())
}

/// File name of the plot for one scale
pub fn plot_file_name(scale: PotentialScale) -> String {
    format!("{}_vs_pH.svg", scale.symbol())
}

/// Which artifacts to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputOptions {
    /// Render SVG plots
    pub plots: bool,
    /// Write the JSON summary
    pub summary: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            plots: true,
            summary: true,
        }
    }
}

/// Write tables (always), plots and summary into `dir`, creating it if needed.
///
/// Returns the paths written, tables first.
pub fn write_all(
    dir: &Path,
    output: &PipelineOutput,
    summary: &RunSummary,
    options: OutputOptions,
) -> Result<Vec<PathBuf>, OutputError> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    for scale in PotentialScale::ALL {
        let path = dir.join(table_file_name(scale));
        write_series_file(&path, scale, &output.points(scale))?;
        written.push(path);
    }

    if options.plots {
        for scale in PotentialScale::ALL {
            let path = dir.join(plot_file_name(scale));
            render_series_plot(
                &path,
                &PlotStyle::for_scale(scale),
                &output.points(scale),
                output.fit(scale),
            )?;
            written.push(path);
        }
    }

    if options.summary {
        let path = dir.join(SUMMARY_FILE_NAME);
        summary.write_file(&path)?;
        written.push(path);
    }

    info!("Wrote {} output files to {}", written.len(), dir.display());
    Ok(written)
}
