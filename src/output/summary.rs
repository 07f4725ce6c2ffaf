//! JSON record of a complete run.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::OutputError;
use crate::fit::TrendFit;
use crate::model::ModelParameters;
use crate::pipeline::{ConvertedResult, PhRange, PipelineConfig, PipelineOutput};
use crate::solver::{CrossingResult, SolverConfig};

/// Everything needed to reproduce and inspect a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Time the summary was created
    pub generated_at: DateTime<Utc>,
    /// Version of this crate
    pub kinkpot_version: String,
    /// Input file the baselines came from, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_file: Option<String>,
    /// Model parameters used
    pub parameters: ModelParameters,
    /// pH grid
    pub ph_range: PhRange,
    /// Solver settings
    pub solver: SolverConfig,
    /// Crossing potentials vs RHE
    pub rhe_series: Vec<CrossingResult>,
    /// Crossing potentials vs SHE
    pub she_series: Vec<ConvertedResult>,
    /// Trend of the RHE series
    pub rhe_fit: TrendFit,
    /// Trend of the SHE series
    pub she_fit: TrendFit,
}

impl RunSummary {
    /// Assemble a summary from a finished run
    pub fn new(params: &ModelParameters, config: &PipelineConfig, output: &PipelineOutput) -> Self {
        Self {
            generated_at: Utc::now(),
            kinkpot_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: None,
            parameters: *params,
            ph_range: config.range,
            solver: config.solver,
            rhe_series: output.rhe_series.clone(),
            she_series: output.she_series.clone(),
            rhe_fit: output.rhe_fit,
            she_fit: output.she_fit,
        }
    }

    /// Record the input file path
    pub fn with_input_file(mut self, path: &Path) -> Self {
        self.input_file = Some(path.display().to_string());
        self
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, OutputError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, OutputError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write pretty JSON to a file
    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> Result<(), OutputError> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Pipeline;

    #[test]
    fn test_summary_json_roundtrip() {
        let params = ModelParameters::new(-0.30, 1.80);
        let config = PipelineConfig::default();
        let output = Pipeline::new(params, config).unwrap().run().unwrap();
        let summary = RunSummary::new(&params, &config, &output)
            .with_input_file(Path::new("input_data.txt"));

        let json = summary.to_json().unwrap();
        assert!(json.contains("\"rhe_fit\""));
        assert!(json.contains("\"input_file\": \"input_data.txt\""));

        let restored = RunSummary::from_json(&json).unwrap();
        assert_eq!(restored.rhe_series.len(), 15);
        assert_eq!(restored.ph_range, PhRange::default());
        assert_eq!(restored.solver.max_iterations, config.solver.max_iterations);
        assert!((restored.she_fit.slope - output.she_fit.slope).abs() < 1e-12);
    }

    #[test]
    fn test_input_file_omitted_when_unknown() {
        let params = ModelParameters::new(-0.30, 1.80);
        let config = PipelineConfig::default();
        let output = Pipeline::new(params, config).unwrap().run().unwrap();
        let json = RunSummary::new(&params, &config, &output).to_json().unwrap();
        assert!(!json.contains("input_file"));
    }

    #[test]
    fn test_invalid_range_rejected_on_load() {
        let params = ModelParameters::new(-0.30, 1.80);
        let config = PipelineConfig::default();
        let output = Pipeline::new(params, config).unwrap().run().unwrap();
        let json = RunSummary::new(&params, &config, &output).to_json().unwrap();
        assert!(json.contains("\"step\": 1.0"));

        let zero_step = json.replace("\"step\": 1.0", "\"step\": 0.0");
        assert!(matches!(
            RunSummary::from_json(&zero_step),
            Err(OutputError::Json(_))
        ));

        let huge_span = json.replace("\"max\": 14.0", "\"max\": 1e300");
        assert!(RunSummary::from_json(&huge_span).is_err());
    }
}
