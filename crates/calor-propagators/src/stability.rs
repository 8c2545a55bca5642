//! Time-step selection for the explicit scheme.
//!
//! Von Neumann analysis of FTCS on the five-point Laplacian gives the bound
//!
//! ```text
//! dt_max = 1 / (2 k (1/dx² + 1/dy²))
//! ```
//!
//! Steps above `dt_max` amplify the highest-frequency mode every step and
//! the run diverges. [`StabilityPolicy`] scales the bound by a safety factor
//! in `(0, 1]`.

use calor_core::error::require_positive;
use calor_core::{Result, SolverError};
use calor_space::Grid;

/// Picks `dt = safety · dt_max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StabilityPolicy {
    safety: f64,
}

impl StabilityPolicy {
    /// Safety factor used when none is configured.
    pub const DEFAULT_SAFETY: f64 = 0.8;

    /// Policy with the given safety factor.
    ///
    /// Returns [`SolverError::InvalidParameter`] unless `0 < safety <= 1`.
    pub fn new(safety: f64) -> Result<Self> {
        if !(safety > 0.0 && safety <= 1.0) {
            return Err(SolverError::invalid_parameter(
                "safety",
                safety,
                "must be in (0, 1]",
            ));
        }
        Ok(Self { safety })
    }

    /// The configured safety factor.
    pub fn safety(&self) -> f64 {
        self.safety
    }

    /// Unscaled stability bound for diffusivity `k` and spacings `dx, dy`.
    ///
    /// # Errors
    ///
    /// [`SolverError::InvalidParameter`] if `k`, `dx`, or `dy` is not a
    /// finite positive number.
    pub fn max_stable_dt(k: f64, dx: f64, dy: f64) -> Result<f64> {
        require_positive("k", k)?;
        require_positive("dx", dx)?;
        require_positive("dy", dy)?;
        let dt = 1.0 / (2.0 * k * (1.0 / (dx * dx) + 1.0 / (dy * dy)));
        if !(dt > 0.0) || !dt.is_finite() {
            return Err(SolverError::invalid_parameter(
                "k",
                k,
                "stability bound is not representable for these spacings",
            ));
        }
        Ok(dt)
    }

    /// Scaled time step `safety / (2 k (1/dx² + 1/dy²))`.
    ///
    /// # Examples
    ///
    /// ```
    /// use calor_propagators::StabilityPolicy;
    ///
    /// let dt = StabilityPolicy::default().time_step(1.0, 0.01, 0.01).unwrap();
    /// assert_eq!(dt, 2e-5);
    /// ```
    pub fn time_step(&self, k: f64, dx: f64, dy: f64) -> Result<f64> {
        require_positive("k", k)?;
        require_positive("dx", dx)?;
        require_positive("dy", dy)?;
        let dt = self.safety / (2.0 * k * (1.0 / (dx * dx) + 1.0 / (dy * dy)));
        if !(dt > 0.0) || !dt.is_finite() {
            return Err(SolverError::invalid_parameter(
                "k",
                k,
                "stability bound is not representable for these spacings",
            ));
        }
        tracing::debug!(k, dx, dy, safety = self.safety, dt, "selected time step");
        Ok(dt)
    }

    /// [`time_step`](Self::time_step) using the spacings of `grid`.
    pub fn time_step_for(&self, k: f64, grid: &Grid) -> Result<f64> {
        self.time_step(k, grid.dx(), grid.dy())
    }
}

impl Default for StabilityPolicy {
    fn default() -> Self {
        Self {
            safety: Self::DEFAULT_SAFETY,
        }
    }
}
