/// Errors raised when model parameters cannot be evaluated
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// A baseline or coefficient is NaN or infinite
    #[error("Curve {curve}: {field} must be finite, got {value}")]
    NonFinite {
        /// Curve label ("A" or "B")
        curve: &'static str,
        /// Offending parameter name
        field: &'static str,
        /// Offending value
        value: f64,
    },

    /// A curve transfers no electrons, so it has no potential dependence
    #[error("Curve {curve}: electron count must be at least 1")]
    NoElectronTransfer {
        /// Curve label ("A" or "B")
        curve: &'static str,
    },
}
