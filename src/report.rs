//! Post-run consistency checks on a finished sweep.

use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

use crate::model::{self, ModelParameters};
use crate::pipeline::{PhRange, PipelineOutput};
use crate::scale::{rhe_to_she, PotentialScale};

/// Largest |curve A - curve B| (eV) accepted at a reported crossing
pub const RESIDUAL_LIMIT: f64 = 1e-8;

/// r² below which a trend line is flagged
pub const MIN_R_SQUARED: f64 = 0.99;

/// Check result status
#[derive(Debug, Clone, PartialEq)]
pub enum CheckStatus {
    /// Check passed
    Ok,
    /// Check passed with warnings
    Warning(String),
    /// Check failed
    Failed(String),
}

impl CheckStatus {
    fn is_ok(&self) -> bool {
        matches!(self, CheckStatus::Ok)
    }

    fn is_failed(&self) -> bool {
        matches!(self, CheckStatus::Failed(_))
    }
}

/// One named check
#[derive(Debug, Clone)]
pub struct ConsistencyCheck {
    /// Name of the check
    pub name: String,
    /// Outcome
    pub status: CheckStatus,
}

impl ConsistencyCheck {
    fn ok(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Ok,
        }
    }

    fn warning(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Warning(message.into()),
        }
    }

    fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Failed(message.into()),
        }
    }
}

/// Outcome of all consistency checks for one run
#[derive(Debug)]
pub struct ConsistencyReport {
    /// Individual check results
    pub checks: Vec<ConsistencyCheck>,
}

impl ConsistencyReport {
    /// Run every check against a finished sweep
    pub fn evaluate(params: &ModelParameters, range: &PhRange, output: &PipelineOutput) -> Self {
        let checks = vec![
            check_crossings(params, output),
            check_scale_conversion(output),
            check_ph_grid(range, output),
            check_fit(PotentialScale::Rhe, output),
            check_fit(PotentialScale::She, output),
        ];
        Self { checks }
    }

    /// Check if any check failed
    pub fn has_failures(&self) -> bool {
        self.checks.iter().any(|c| c.status.is_failed())
    }

    /// Check if any check produced a warning
    pub fn has_warnings(&self) -> bool {
        self.checks
            .iter()
            .any(|c| matches!(c.status, CheckStatus::Warning(_)))
    }

    /// Number of passed checks
    pub fn success_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_ok()).count()
    }

    /// Number of warnings
    pub fn warning_count(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| matches!(c.status, CheckStatus::Warning(_)))
            .count()
    }

    /// Number of failures
    pub fn failure_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_failed()).count()
    }

    /// Format the report with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            let mut out = String::new();
            out.push_str(&format!("{}\n", style("Kink Potential Checks").bold().cyan()));

            for check in &self.checks {
                match &check.status {
                    CheckStatus::Ok => {
                        out.push_str(&format!("  [{}] {}\n", style("ok").green(), check.name));
                    }
                    CheckStatus::Warning(msg) => out.push_str(&format!(
                        "  [{}] {} - {}\n",
                        style("warn").yellow().bold(),
                        check.name,
                        msg
                    )),
                    CheckStatus::Failed(msg) => out.push_str(&format!(
                        "  [{}] {} - {}\n",
                        style("FAIL").red().bold(),
                        check.name,
                        msg
                    )),
                }
            }

            out.push_str(&format!(
                "{}: {} passed, {} warnings, {} failed\n",
                style("Summary").bold(),
                style(self.success_count()).green(),
                style(self.warning_count()).yellow(),
                style(self.failure_count()).red()
            ));
            out
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            self.to_string()
        }
    }
}

impl fmt::Display for ConsistencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Kink Potential Checks")?;
        for check in &self.checks {
            match &check.status {
                CheckStatus::Ok => writeln!(f, "  [ok] {}", check.name)?,
                CheckStatus::Warning(msg) => writeln!(f, "  [warn] {} - {}", check.name, msg)?,
                CheckStatus::Failed(msg) => writeln!(f, "  [FAIL] {} - {}", check.name, msg)?,
            }
        }
        writeln!(
            f,
            "Summary: {} passed, {} warnings, {} failed",
            self.success_count(),
            self.warning_count(),
            self.failure_count()
        )
    }
}

fn check_crossings(params: &ModelParameters, output: &PipelineOutput) -> ConsistencyCheck {
    const NAME: &str = "Curves intersect at every reported potential";
    let worst = output
        .rhe_series
        .iter()
        .map(|c| (c.ph, model::residual(params, c.potential_rhe, c.ph).abs()))
        .fold((f64::NAN, 0.0_f64), |acc, (ph, r)| if r > acc.1 { (ph, r) } else { acc });

    if worst.1 <= RESIDUAL_LIMIT {
        ConsistencyCheck::ok(NAME)
    } else {
        ConsistencyCheck::failed(
            NAME,
            format!("residual {:e} eV at pH {}", worst.1, worst.0),
        )
    }
}

fn check_scale_conversion(output: &PipelineOutput) -> ConsistencyCheck {
    const NAME: &str = "SHE series matches RHE series";
    if output.she_series.len() != output.rhe_series.len() {
        return ConsistencyCheck::failed(
            NAME,
            format!(
                "{} SHE points for {} RHE points",
                output.she_series.len(),
                output.rhe_series.len()
            ),
        );
    }
    for (rhe, she) in output.rhe_series.iter().zip(&output.she_series) {
        let expected = rhe_to_she(rhe.potential_rhe, rhe.ph);
        if rhe.ph != she.ph || (she.potential_she - expected).abs() > 1e-12 {
            return ConsistencyCheck::failed(NAME, format!("mismatch at pH {}", rhe.ph));
        }
    }
    ConsistencyCheck::ok(NAME)
}

fn check_ph_grid(range: &PhRange, output: &PipelineOutput) -> ConsistencyCheck {
    const NAME: &str = "pH grid complete and ordered";
    let ph = output.ph_values();
    let expected = range.values();

    if ph.windows(2).any(|w| w[1] <= w[0]) {
        return ConsistencyCheck::failed(NAME, "pH values are not strictly increasing");
    }
    if ph != expected {
        return ConsistencyCheck::failed(
            NAME,
            format!("{} points reported, {} expected", ph.len(), expected.len()),
        );
    }
    let covers_max = ph
        .last()
        .map(|&last| (last - range.max()).abs() < 1e-9)
        .unwrap_or(false);
    if !covers_max {
        return ConsistencyCheck::warning(
            NAME,
            format!("pH {} is not on the grid and was not solved", range.max()),
        );
    }
    ConsistencyCheck::ok(NAME)
}

fn check_fit(scale: PotentialScale, output: &PipelineOutput) -> ConsistencyCheck {
    let fit = output.fit(scale);
    let name = format!("{} trend is linear", scale);
    if fit.r_squared < MIN_R_SQUARED {
        ConsistencyCheck::warning(
            name,
            format!("r² = {:.4} (below {})", fit.r_squared, MIN_R_SQUARED),
        )
    } else {
        ConsistencyCheck::ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{Pipeline, PipelineConfig};

    fn reference_run() -> (ModelParameters, PipelineConfig, PipelineOutput) {
        let params = ModelParameters::new(-0.30, 1.80);
        let config = PipelineConfig::default();
        let output = Pipeline::new(params, config).unwrap().run().unwrap();
        (params, config, output)
    }

    #[test]
    fn test_reference_run_passes() {
        let (params, config, output) = reference_run();
        let report = ConsistencyReport::evaluate(&params, &config.range, &output);
        assert!(!report.has_failures());
        assert!(!report.has_warnings());
        assert_eq!(report.success_count(), 5);
    }

    #[test]
    fn test_tampered_potential_fails() {
        let (params, config, mut output) = reference_run();
        output.rhe_series[4].potential_rhe += 0.01;
        let report = ConsistencyReport::evaluate(&params, &config.range, &output);
        assert!(report.has_failures());
        // Both the crossing and the SHE comparison notice the change
        assert_eq!(report.failure_count(), 2);
        assert!(report.to_string().contains("at pH 4"));
    }

    #[test]
    fn test_low_r_squared_warns() {
        let (params, config, mut output) = reference_run();
        output.she_fit.r_squared = 0.5;
        let report = ConsistencyReport::evaluate(&params, &config.range, &output);
        assert!(report.has_warnings());
        assert!(!report.has_failures());
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn test_off_grid_max_warns() {
        let params = ModelParameters::new(-0.30, 1.80);
        let config = PipelineConfig {
            range: PhRange::new(0.0, 14.0, 4.0).unwrap(),
            ..PipelineConfig::default()
        };
        let output = Pipeline::new(params, config).unwrap().run().unwrap();
        let report = ConsistencyReport::evaluate(&params, &config.range, &output);
        assert_eq!(report.warning_count(), 1);
        assert!(report.to_string().contains("pH 14 is not on the grid"));
    }

    #[test]
    fn test_plain_rendering() {
        let (params, config, output) = reference_run();
        let text = ConsistencyReport::evaluate(&params, &config.range, &output).to_string();
        assert!(text.starts_with("Kink Potential Checks\n"));
        assert!(text.contains("[ok] RHE trend is linear"));
        assert!(text.ends_with("Summary: 5 passed, 0 warnings, 0 failed\n"));
    }
}
