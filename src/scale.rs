//! Conversion between the reversible (RHE) and standard (SHE) hydrogen
//! electrode potential scales.
//!
//! The two scales differ by the Nernstian pH shift at room temperature:
//!
//! ```text
//! U_SHE = U_RHE - 0.059 * pH
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Nernst slope at 298 K (V per pH unit)
pub const NERNST_SLOPE_V: f64 = 0.059;

/// Convert a potential on the RHE scale to the SHE scale.
#[inline]
pub fn rhe_to_she(potential_rhe: f64, ph: f64) -> f64 {
    potential_rhe - NERNST_SLOPE_V * ph
}

/// Convert a potential on the SHE scale back to the RHE scale.
#[inline]
pub fn she_to_rhe(potential_she: f64, ph: f64) -> f64 {
    potential_she + NERNST_SLOPE_V * ph
}

/// Electrochemical reference scale a potential is expressed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PotentialScale {
    /// Reversible hydrogen electrode (primary scale, where the solve happens)
    Rhe,
    /// Standard hydrogen electrode
    She,
}

impl PotentialScale {
    /// Both scales, primary first
    pub const ALL: [PotentialScale; 2] = [PotentialScale::Rhe, PotentialScale::She];

    /// Short electrode name ("RHE" / "SHE")
    pub fn electrode(&self) -> &'static str {
        match self {
            PotentialScale::Rhe => "RHE",
            PotentialScale::She => "SHE",
        }
    }

    /// Potential symbol used in table headers and file names
    pub fn symbol(&self) -> &'static str {
        match self {
            PotentialScale::Rhe => "URHE",
            PotentialScale::She => "USHE",
        }
    }

    /// Express an RHE potential on this scale.
    pub fn from_rhe(&self, potential_rhe: f64, ph: f64) -> f64 {
        match self {
            PotentialScale::Rhe => potential_rhe,
            PotentialScale::She => rhe_to_she(potential_rhe, ph),
        }
    }
}

impl fmt::Display for PotentialScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.electrode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_she_shift_at_neutral_ph() {
        let she = rhe_to_she(1.23, 7.0);
        assert!((she - (1.23 - 0.413)).abs() < 1e-12);
    }

    #[test]
    fn test_scales_coincide_at_ph_zero() {
        assert_eq!(rhe_to_she(1.5, 0.0), 1.5);
        assert_eq!(PotentialScale::She.from_rhe(1.5, 0.0), 1.5);
    }

    #[test]
    fn test_round_trip() {
        for ph in 0..=14 {
            let ph = ph as f64;
            for &p in &[-2.0, 0.0, 1.23, 2.2571, 40.0] {
                let back = rhe_to_she(p, ph) + NERNST_SLOPE_V * ph;
                assert!((back - p).abs() <= 4.0 * f64::EPSILON * p.abs().max(1.0));
                assert!((she_to_rhe(rhe_to_she(p, ph), ph) - p).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_scale_labels() {
        assert_eq!(PotentialScale::Rhe.symbol(), "URHE");
        assert_eq!(PotentialScale::She.to_string(), "SHE");
        assert_eq!(PotentialScale::Rhe.from_rhe(0.8, 14.0), 0.8);
    }
}
