use thiserror::Error;

/// Errors a single run can surface. All of them are local to the run
/// that produced them; other runs are unaffected.
#[derive(Debug, Clone, Error)]
pub enum SimulationError {
    /// A parameter was non-finite or sign-invalid. Raised before any
    /// stepping occurs; no partial series is produced.
    #[error("invalid parameter {name} = {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// The state vector dimension does not match the force model.
    #[error("state dimension mismatch: field expects {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The state became non-finite mid-run. Carries the index of the
    /// step whose result diverged and the last finite sample.
    #[error("state diverged to a non-finite value at step {step} (last finite t = {last_time})")]
    NumericDivergence {
        step: usize,
        last_time: f64,
        last_state: Vec<f64>,
    },

    /// The caller-supplied cancellation check fired.
    #[error("run cancelled by caller at step {step}")]
    Cancelled { step: usize },

    /// The analytic reference only covers the drag-free, wind-free,
    /// spin-free projectile case.
    #[error("analytic reference requires zero drag, wind, and spin (got {name} = {value})")]
    UnsupportedReference { name: &'static str, value: f64 },
}
