//! Ordinary least-squares trend lines of a potential series against pH.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Regression input that admits no unique line
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DegenerateInputError {
    /// `xs` and `ys` differ in length
    #[error("Length mismatch: {xs} x values but {ys} y values")]
    LengthMismatch {
        /// Number of x values
        xs: usize,
        /// Number of y values
        ys: usize,
    },

    /// Fewer than two points
    #[error("At least 2 points are required for a linear fit, got {0}")]
    TooFewPoints(usize),

    /// All x values are identical
    #[error("x values have zero variance")]
    ZeroVariance,
}

/// Least-squares line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendFit {
    /// Slope (V per pH unit for kink series)
    pub slope: f64,
    /// Intercept at x = 0
    pub intercept: f64,
    /// Coefficient of determination
    pub r_squared: f64,
}

impl TrendFit {
    /// Evaluate the fitted line
    #[inline]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

impl fmt::Display for TrendFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "y = {:.4}x + {:.4}", self.slope, self.intercept)
    }
}

/// Fit `ys` against `xs` by ordinary least squares.
///
/// Uses centred sums (`slope = Sxy / Sxx`) so the result does not depend on
/// the offset of the data.
pub fn fit(xs: &[f64], ys: &[f64]) -> Result<TrendFit, DegenerateInputError> {
    if xs.len() != ys.len() {
        return Err(DegenerateInputError::LengthMismatch {
            xs: xs.len(),
            ys: ys.len(),
        });
    }
    let n = xs.len();
    if n < 2 {
        return Err(DegenerateInputError::TooFewPoints(n));
    }

    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    if sxx == 0.0 {
        return Err(DegenerateInputError::ZeroVariance);
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    // A constant series is reproduced exactly by a flat line
    let r_squared = if syy == 0.0 {
        1.0
    } else {
        (sxy * sxy / (sxx * syy)).min(1.0)
    };

    Ok(TrendFit {
        slope,
        intercept,
        r_squared,
    })
}
