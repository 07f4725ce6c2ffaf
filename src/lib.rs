//! # kinkpot - OH*/O* Kink Potential versus pH
//!
//! `kinkpot` locates the electrode potential at which the free energies of
//! two competing surface intermediates, OH* and O*, become equal (the "kink"
//! in a surface Pourbaix diagram), sweeps it over pH and reports the result on
//! the reversible (RHE) and standard (SHE) hydrogen electrode scales.
//!
//! ## Quick Start
//!
//! ```rust
//! use kinkpot::model::ModelParameters;
//! use kinkpot::pipeline::{Pipeline, PipelineConfig};
//!
//! // Baseline free energies of OH* and O* (eV)
//! let params = ModelParameters::new(-0.30, 1.80);
//!
//! let output = Pipeline::new(params, PipelineConfig::default())?.run()?;
//!
//! for point in &output.rhe_series {
//!     println!("pH {:>2}: {:.4} V vs RHE", point.ph, point.potential_rhe);
//! }
//! println!("vs RHE: {}", output.rhe_fit);
//! println!("vs SHE: {}", output.she_fit);
//! # Ok::<(), kinkpot::pipeline::PipelineError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`model`]: field-dependent free-energy curves and their parameters
//! - [`solver`]: Newton solve for the crossing potential at one pH
//! - [`scale`]: RHE <-> SHE conversion
//! - [`fit`]: least-squares trend lines
//! - [`pipeline`]: the pH sweep tying the above together
//! - [`input`]: two-line baseline input files
//! - [`output`]: TSV tables, SVG plots and the JSON summary
//! - [`report`]: consistency checks on a finished sweep
//!
//! The numeric modules have no I/O; `input`, `output` and `report` only
//! consume their types.

pub mod fit;
pub mod input;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod scale;
pub mod solver;

pub use fit::{DegenerateInputError, TrendFit};
pub use input::{load_baselines, Baselines, InputError};
pub use model::{CurveCoefficients, CurveParameters, ModelError, ModelParameters};
pub use output::{OutputError, RunSummary};
pub use pipeline::{
    ConvertedResult, PhRange, Pipeline, PipelineConfig, PipelineError, PipelineOutput,
};
pub use report::ConsistencyReport;
pub use scale::{PotentialScale, NERNST_SLOPE_V};
pub use solver::{ConvergenceError, CrossingResult, CrossingSolver, SolverConfig};

/// Current crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
