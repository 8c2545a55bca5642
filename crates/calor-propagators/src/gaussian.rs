//! Normalized Gaussian initial condition.
//!
//! The pulse is sampled on the grid, the boundary ring is cleared to the
//! Dirichlet value, and the remaining interior is rescaled so the discrete
//! mass `Σ u · dx · dy` is exactly one. Clearing before rescaling keeps both
//! the unit-mass and the zero-boundary properties exact, even for pulses
//! whose tails reach the edge of the domain.

use calor_core::error::require_positive;
use calor_core::{Field, Result, SolverError};
use calor_space::Grid;

use crate::boundary::enforce_dirichlet;

/// Produces the initial temperature field for a run.
pub trait FieldInitializer {
    /// Human-readable name for logs.
    fn name(&self) -> &str;

    /// Build the initial field on `grid`.
    ///
    /// Implementations must return a field shaped like `grid` whose
    /// boundary points are zero.
    fn initialize(&self, grid: &Grid) -> Result<Field>;
}

/// A Gaussian bump `exp(-((x-x0)² + (y-y0)²) / (2σ²))`, normalized to unit
/// mass.
///
/// # Examples
///
/// ```
/// use calor_propagators::{FieldInitializer, GaussianPulse};
/// use calor_space::Grid;
///
/// let grid = Grid::unit_square(21).unwrap();
/// let u0 = GaussianPulse::new(0.5, 0.5, 0.1).unwrap().initialize(&grid).unwrap();
/// let mass = u0.sum() * grid.cell_area();
/// assert!((mass - 1.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianPulse {
    x0: f64,
    y0: f64,
    sigma: f64,
}

impl GaussianPulse {
    /// Pulse centered at `(x0, y0)` with spread `sigma`.
    ///
    /// Returns [`SolverError::InvalidParameter`] if the center is not finite
    /// or `sigma` is not a finite positive number.
    pub fn new(x0: f64, y0: f64, sigma: f64) -> Result<Self> {
        if !x0.is_finite() {
            return Err(SolverError::invalid_parameter("x0", x0, "must be finite"));
        }
        if !y0.is_finite() {
            return Err(SolverError::invalid_parameter("y0", y0, "must be finite"));
        }
        require_positive("sigma", sigma)?;
        Ok(Self { x0, y0, sigma })
    }

    /// Pulse centered in the middle of `grid`.
    pub fn centered(grid: &Grid, sigma: f64) -> Result<Self> {
        Self::new(grid.lx() / 2.0, grid.ly() / 2.0, sigma)
    }

    /// Center `x`.
    pub fn x0(&self) -> f64 {
        self.x0
    }

    /// Center `y`.
    pub fn y0(&self) -> f64 {
        self.y0
    }

    /// Spread.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Unnormalized pulse value at `(x, y)`.
    #[inline]
    pub fn profile(&self, x: f64, y: f64) -> f64 {
        let r2 = (x - self.x0).powi(2) + (y - self.y0).powi(2);
        (-r2 / (2.0 * self.sigma * self.sigma)).exp()
    }
}

/// Narrow pulse in the middle of the unit square.
impl Default for GaussianPulse {
    fn default() -> Self {
        Self {
            x0: 0.5,
            y0: 0.5,
            sigma: 0.03,
        }
    }
}

impl FieldInitializer for GaussianPulse {
    fn name(&self) -> &str {
        "GaussianPulse"
    }

    /// # Errors
    ///
    /// [`SolverError::DegenerateField`] if the interior sum is zero or not
    /// finite, e.g. when `sigma` is so small relative to `dx, dy` that every
    /// sample underflows.
    fn initialize(&self, grid: &Grid) -> Result<Field> {
        if !grid.contains_interior(self.x0, self.y0) {
            tracing::warn!(
                x0 = self.x0,
                y0 = self.y0,
                "pulse center lies outside the domain interior"
            );
        }

        let mut field = grid.sample(|x, y| self.profile(x, y));
        enforce_dirichlet(&mut field, 0.0);

        let sum = field.sum();
        if !(sum > 0.0) || !sum.is_finite() {
            return Err(SolverError::DegenerateField { sum });
        }
        let scale = 1.0 / (sum * grid.cell_area());
        if !scale.is_finite() {
            return Err(SolverError::DegenerateField { sum });
        }
        field.scale(scale);

        tracing::debug!(
            sigma = self.sigma,
            raw_sum = sum,
            peak = field.max(),
            "initialized gaussian pulse"
        );
        Ok(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::boundary_deviation;

    #[test]
    fn rejects_bad_sigma() {
        for bad in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                GaussianPulse::new(0.5, 0.5, bad),
                Err(SolverError::InvalidParameter { param: "sigma", .. })
            ));
        }
    }

    #[test]
    fn rejects_non_finite_center() {
        assert!(matches!(
            GaussianPulse::new(f64::NAN, 0.5, 0.1),
            Err(SolverError::InvalidParameter { param: "x0", .. })
        ));
        assert!(matches!(
            GaussianPulse::new(0.5, f64::NEG_INFINITY, 0.1),
            Err(SolverError::InvalidParameter { param: "y0", .. })
        ));
    }

    #[test]
    fn unit_mass_and_zero_boundary() {
        let grid = Grid::unit_square(101).unwrap();
        let u = GaussianPulse::default().initialize(&grid).unwrap();
        let mass = u.sum() * grid.cell_area();
        assert!((mass - 1.0).abs() < 1e-9, "mass = {mass}");
        assert_eq!(boundary_deviation(&u, 0.0), 0.0);
    }

    #[test]
    fn wide_pulse_touching_edges_still_unit_mass() {
        // sigma comparable to the domain: boundary samples are far from zero.
        let grid = Grid::new(1.0, 2.0, 17, 33).unwrap();
        let u = GaussianPulse::new(0.3, 1.2, 0.8)
            .unwrap()
            .initialize(&grid)
            .unwrap();
        let mass = u.sum() * grid.cell_area();
        assert!((mass - 1.0).abs() < 1e-9, "mass = {mass}");
        assert_eq!(boundary_deviation(&u, 0.0), 0.0);
    }

    #[test]
    fn peak_sits_on_center_point() {
        let grid = Grid::unit_square(11).unwrap();
        let u = GaussianPulse::new(0.5, 0.5, 0.1)
            .unwrap()
            .initialize(&grid)
            .unwrap();
        assert_eq!(u.max(), u[(5, 5)]);
        // Symmetric about the center.
        assert!((u[(4, 5)] - u[(6, 5)]).abs() < 1e-12);
        assert!((u[(5, 3)] - u[(5, 7)]).abs() < 1e-12);
    }

    #[test]
    fn underflowing_pulse_is_degenerate() {
        // Center falls between grid points and sigma is far below dx:
        // every sample underflows to exactly zero.
        let grid = Grid::unit_square(11).unwrap();
        let pulse = GaussianPulse::new(0.55, 0.55, 1e-4).unwrap();
        assert!(matches!(
            pulse.initialize(&grid),
            Err(SolverError::DegenerateField { sum }) if sum == 0.0
        ));
    }

    #[test]
    fn pulse_on_boundary_only_is_degenerate() {
        // All mass lands on the boundary ring, which is cleared.
        let grid = Grid::unit_square(11).unwrap();
        let pulse = GaussianPulse::new(0.0, 0.0, 1e-4).unwrap();
        assert!(matches!(
            pulse.initialize(&grid),
            Err(SolverError::DegenerateField { .. })
        ));
    }

    #[test]
    fn centered_uses_domain_midpoint() {
        let grid = Grid::new(2.0, 4.0, 5, 5).unwrap();
        let p = GaussianPulse::centered(&grid, 0.2).unwrap();
        assert_eq!((p.x0(), p.y0(), p.sigma()), (1.0, 2.0, 0.2));
        assert_eq!(p.name(), "GaussianPulse");
    }
}
