//! Error types for the Calor solver.
//!
//! Every failure is raised synchronously at the point of construction or
//! invocation. None of them are transient, so there is no retry policy:
//! callers are expected to abort the run and report the offending
//! parameter.

use thiserror::Error;

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, SolverError>;

/// Errors produced while building or running a simulation.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SolverError {
    /// Grid extents or point counts are unusable.
    #[error("invalid grid: {param} = {value} ({reason})")]
    InvalidGrid {
        /// Name of the offending parameter (`lx`, `ly`, `nx`, `ny`).
        param: &'static str,
        /// The rejected value, formatted for diagnostics.
        value: String,
        /// Which constraint was violated.
        reason: &'static str,
    },

    /// A solver parameter (diffusivity, time step, time span, sampling
    /// interval, safety factor, pulse shape) is out of range.
    #[error("invalid parameter: {param} = {value} ({reason})")]
    InvalidParameter {
        /// Name of the offending parameter.
        param: &'static str,
        /// The rejected value, formatted for diagnostics.
        value: String,
        /// Which constraint was violated.
        reason: &'static str,
    },

    /// The initial condition cannot be normalized to unit mass.
    #[error("degenerate initial field: pre-normalization sum is {sum}")]
    DegenerateField {
        /// The zero or non-finite sum that blocked normalization.
        sum: f64,
    },

    /// A non-finite value appeared in the field while stepping.
    #[error("numerical instability at step {step}: non-finite value at cell {index}")]
    NumericalInstability {
        /// Step index whose output contained the first non-finite value.
        step: u64,
        /// Flat index of the first non-finite cell.
        index: usize,
    },

    /// A field's shape does not match the grid or the partner buffer.
    #[error("field shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        /// Expected `(nx, ny)`.
        expected: (usize, usize),
        /// Actual `(nx, ny)`.
        actual: (usize, usize),
    },
}

impl SolverError {
    /// Build an [`InvalidGrid`](Self::InvalidGrid) error.
    pub fn invalid_grid(param: &'static str, value: impl ToString, reason: &'static str) -> Self {
        Self::InvalidGrid {
            param,
            value: value.to_string(),
            reason,
        }
    }

    /// Build an [`InvalidParameter`](Self::InvalidParameter) error.
    pub fn invalid_parameter(
        param: &'static str,
        value: impl ToString,
        reason: &'static str,
    ) -> Self {
        Self::InvalidParameter {
            param,
            value: value.to_string(),
            reason,
        }
    }

    /// Name of the offending parameter, if this error names one.
    pub fn param(&self) -> Option<&'static str> {
        match self {
            Self::InvalidGrid { param, .. } | Self::InvalidParameter { param, .. } => Some(param),
            _ => None,
        }
    }
}

/// Require `value` to be finite and strictly positive.
///
/// Shared by every constructor that takes a physical length, rate, or time.
pub fn require_positive(param: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(SolverError::invalid_parameter(param, value, "must be finite"));
    }
    if value <= 0.0 {
        return Err(SolverError::invalid_parameter(param, value, "must be > 0"));
    }
    Ok(value)
}
