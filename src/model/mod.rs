//! # Free-Energy Model
//!
//! Potential- and pH-dependent adsorption free energies of the two competing
//! surface intermediates (OH* and O*) in a field-corrected computational
//! hydrogen electrode picture.
//!
//! Each curve has the form
//!
//! ```text
//! field  = k * (U_SHE - U_pzc)          with U_SHE = U_RHE - 0.059 * pH
//! ΔG(U)  = ΔG0 + c1 * field + (c2 / 2) * field^2 - n * U_RHE
//! ```
//!
//! where `k` couples the electrode potential to the interfacial field, `c1`
//! and `c2` are the linear (dipole-like) and quadratic (polarizability-like)
//! field responses of the adsorbate, `U_pzc` is the potential of zero charge
//! and `n` the number of proton-coupled electron transfers leading to the
//! adsorbate.
//!
//! All evaluators are pure functions taking their parameters explicitly.

mod error;


pub use error::ModelError;

use serde::{Deserialize, Serialize};

use crate::scale::rhe_to_she;

/// Field coupling constant shared by both adsorbates
pub const DEFAULT_FIELD_COUPLING: f64 = -1.42;

/// Potential of zero charge (V vs SHE)
pub const DEFAULT_REFERENCE_POTENTIAL_V: f64 = 1.5;

/// Fixed coefficients of one free-energy curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveCoefficients {
    /// Potential-to-field coupling `k`
    pub field_coupling: f64,
    /// Linear field response `c1`
    pub linear_response: f64,
    /// Quadratic field response `c2`
    pub quadratic_response: f64,
    /// Reference potential `U_pzc` (V vs SHE)
    pub reference_potential_v: f64,
    /// Electrons transferred `n`
    pub electrons: u32,
}

impl CurveCoefficients {
    /// OH* coefficients (one electron transferred)
    pub const fn hydroxyl() -> Self {
        Self {
            field_coupling: DEFAULT_FIELD_COUPLING,
            linear_response: -0.04,
            quadratic_response: -0.08,
            reference_potential_v: DEFAULT_REFERENCE_POTENTIAL_V,
            electrons: 1,
        }
    }

    /// O* coefficients (two electrons transferred)
    pub const fn oxo() -> Self {
        Self {
            field_coupling: DEFAULT_FIELD_COUPLING,
            linear_response: -0.17,
            quadratic_response: -0.05,
            reference_potential_v: DEFAULT_REFERENCE_POTENTIAL_V,
            electrons: 2,
        }
    }
}

/// A single free-energy curve: baseline plus its coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveParameters {
    /// Baseline free energy `ΔG0` (eV)
    pub baseline_ev: f64,
    /// Fixed response coefficients
    #[serde(flatten)]
    pub coefficients: CurveCoefficients,
}

impl CurveParameters {
    /// Create curve parameters from a baseline and coefficients
    pub fn new(baseline_ev: f64, coefficients: CurveCoefficients) -> Self {
        Self {
            baseline_ev,
            coefficients,
        }
    }

    /// Interfacial field at the given potential (V vs RHE) and pH
    #[inline]
    pub fn field(&self, potential_rhe: f64, ph: f64) -> f64 {
        let c = &self.coefficients;
        c.field_coupling * (rhe_to_she(potential_rhe, ph) - c.reference_potential_v)
    }

    fn validate(&self, label: &'static str) -> Result<(), ModelError> {
        let c = &self.coefficients;
        let fields = [
            ("baseline_ev", self.baseline_ev),
            ("field_coupling", c.field_coupling),
            ("linear_response", c.linear_response),
            ("quadratic_response", c.quadratic_response),
            ("reference_potential_v", c.reference_potential_v),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ModelError::NonFinite {
                    curve: label,
                    field,
                    value,
                });
            }
        }
        if c.electrons == 0 {
            return Err(ModelError::NoElectronTransfer { curve: label });
        }
        Ok(())
    }
}

/// Parameters of both competing curves
///
/// Curve A is OH*, curve B is O*. Built once per run and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    /// OH* curve
    pub curve_a: CurveParameters,
    /// O* curve
    pub curve_b: CurveParameters,
}

impl ModelParameters {
    /// Default coefficients with the given baselines (eV)
    pub fn new(baseline_a: f64, baseline_b: f64) -> Self {
        Self::with_coefficients(
            baseline_a,
            baseline_b,
            CurveCoefficients::hydroxyl(),
            CurveCoefficients::oxo(),
        )
    }

    /// Fully specified parameters
    pub fn with_coefficients(
        baseline_a: f64,
        baseline_b: f64,
        coefficients_a: CurveCoefficients,
        coefficients_b: CurveCoefficients,
    ) -> Self {
        Self {
            curve_a: CurveParameters::new(baseline_a, coefficients_a),
            curve_b: CurveParameters::new(baseline_b, coefficients_b),
        }
    }

    /// Check that every parameter is usable by the evaluators
    pub fn validate(&self) -> Result<(), ModelError> {
        self.curve_a.validate("A")?;
        self.curve_b.validate("B")
    }
}

/// Free energy (eV) of one curve at a potential (V vs RHE) and pH.
pub fn free_energy(curve: &CurveParameters, potential_rhe: f64, ph: f64) -> f64 {
    let c = &curve.coefficients;
    let field = curve.field(potential_rhe, ph);
    curve.baseline_ev + c.linear_response * field + 0.5 * c.quadratic_response * field * field
        - f64::from(c.electrons) * potential_rhe
}

/// Derivative of [`free_energy`] with respect to the potential.
pub fn free_energy_slope(curve: &CurveParameters, potential_rhe: f64, ph: f64) -> f64 {
    let c = &curve.coefficients;
    let field = curve.field(potential_rhe, ph);
    c.field_coupling * (c.linear_response + c.quadratic_response * field)
        - f64::from(c.electrons)
}

/// OH* free energy
pub fn curve_a(params: &ModelParameters, potential_rhe: f64, ph: f64) -> f64 {
    free_energy(&params.curve_a, potential_rhe, ph)
}

/// O* free energy
pub fn curve_b(params: &ModelParameters, potential_rhe: f64, ph: f64) -> f64 {
    free_energy(&params.curve_b, potential_rhe, ph)
}

/// `curve_a - curve_b`; zero at the kink potential
pub fn residual(params: &ModelParameters, potential_rhe: f64, ph: f64) -> f64 {
    curve_a(params, potential_rhe, ph) - curve_b(params, potential_rhe, ph)
}

/// Derivative of [`residual`] with respect to the potential
pub fn residual_slope(params: &ModelParameters, potential_rhe: f64, ph: f64) -> f64 {
    free_energy_slope(&params.curve_a, potential_rhe, ph)
        - free_energy_slope(&params.curve_b, potential_rhe, ph)
}
