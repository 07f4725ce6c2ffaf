//! Baseline free energies from a two-line text file.
//!
//! ```text
//! -0.30      <- ΔG0 of OH* (curve A), eV
//! 1.80       <- ΔG0 of O*  (curve B), eV
//! ```
//!
//! Surrounding whitespace is ignored, as is anything after the second line.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::num::ParseFloatError;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::model::ModelParameters;

/// Errors raised while loading baselines
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// I/O error reading the input file
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// Line absent or blank
    #[error("Line {line}: missing {name}")]
    Missing {
        /// 1-based line number
        line: usize,
        /// Expected quantity
        name: &'static str,
    },

    /// Line is not a number
    #[error("Line {line}: cannot parse '{value}' as a number: {source}")]
    InvalidNumber {
        /// 1-based line number
        line: usize,
        /// Offending text
        value: String,
        /// Parser error
        #[source]
        source: ParseFloatError,
    },

    /// Line parsed to NaN or infinity
    #[error("Line {line}: '{value}' is not a finite number")]
    NonFinite {
        /// 1-based line number
        line: usize,
        /// Offending text
        value: String,
    },
}

/// Baseline free energies of both curves (eV)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Baselines {
    /// OH* baseline
    pub curve_a_ev: f64,
    /// O* baseline
    pub curve_b_ev: f64,
}

impl Baselines {
    /// Model parameters with these baselines and default coefficients
    pub fn into_model(self) -> ModelParameters {
        ModelParameters::new(self.curve_a_ev, self.curve_b_ev)
    }
}

const EXPECTED: [&str; 2] = ["curve A (OH*) baseline", "curve B (O*) baseline"];

/// Parse baselines from a reader
pub fn parse_baselines<R: BufRead>(reader: R) -> Result<Baselines, InputError> {
    let mut lines = reader.lines();
    let mut values = [0.0; 2];

    for (index, &name) in EXPECTED.iter().enumerate() {
        let line = index + 1;
        let text = match lines.next() {
            Some(text) => text?,
            None => return Err(InputError::Missing { line, name }),
        };
        values[index] = parse_value(text.trim(), line, name)?;
    }

    Ok(Baselines {
        curve_a_ev: values[0],
        curve_b_ev: values[1],
    })
}

/// Load baselines from a file
pub fn load_baselines<P: AsRef<Path>>(path: P) -> Result<Baselines, InputError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let baselines = parse_baselines(BufReader::new(file))?;
    info!(
        "Loaded baselines from {}: A = {} eV, B = {} eV",
        path.display(),
        baselines.curve_a_ev,
        baselines.curve_b_ev
    );
    Ok(baselines)
}

fn parse_value(text: &str, line: usize, name: &'static str) -> Result<f64, InputError> {
    if text.is_empty() {
        return Err(InputError::Missing { line, name });
    }
    let value: f64 = text.parse().map_err(|source| InputError::InvalidNumber {
        line,
        value: text.to_string(),
        source,
    })?;
    if !value.is_finite() {
        return Err(InputError::NonFinite {
            line,
            value: text.to_string(),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_two_lines() {
        let baselines = parse_baselines(Cursor::new("-0.30\n1.80\n")).unwrap();
        assert_eq!(baselines.curve_a_ev, -0.30);
        assert_eq!(baselines.curve_b_ev, 1.80);
    }

    #[test]
    fn test_whitespace_and_trailing_lines() {
        let baselines = parse_baselines(Cursor::new("  -0.5 \r\n\t2e-1\nignored\n")).unwrap();
        assert_eq!(baselines.curve_a_ev, -0.5);
        assert_eq!(baselines.curve_b_ev, 0.2);
    }

    #[test]
    fn test_missing_second_line() {
        let err = parse_baselines(Cursor::new("-0.30\n")).unwrap_err();
        assert!(matches!(err, InputError::Missing { line: 2, .. }));
    }

    #[test]
    fn test_blank_first_line() {
        let err = parse_baselines(Cursor::new("\n1.8\n")).unwrap_err();
        assert!(matches!(err, InputError::Missing { line: 1, .. }));
    }

    #[test]
    fn test_non_numeric() {
        let err = parse_baselines(Cursor::new("-0.30\nabc\n")).unwrap_err();
        match err {
            InputError::InvalidNumber { line, value, .. } => {
                assert_eq!(line, 2);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = parse_baselines(Cursor::new("inf\n1.0\n")).unwrap_err();
        assert!(matches!(err, InputError::NonFinite { line: 1, .. }));
        let err = parse_baselines(Cursor::new("1.0\nNaN\n")).unwrap_err();
        assert!(matches!(err, InputError::NonFinite { line: 2, .. }));
    }

    #[test]
    fn test_into_model() {
        let params = Baselines {
            curve_a_ev: -0.3,
            curve_b_ev: 1.8,
        }
        .into_model();
        assert_eq!(params.curve_a.baseline_ev, -0.3);
        assert_eq!(params.curve_b.coefficients.electrons, 2);
    }
}
