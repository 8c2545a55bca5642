//! Forward-time, centered-space stepping kernel.
//!
//! Each step computes, for every interior point,
//!
//! ```text
//! u'[i][j] = u[i][j] + k·dt·( (u[i+1][j] - 2u[i][j] + u[i-1][j]) / dx²
//!                           + (u[i][j+1] - 2u[i][j] + u[i][j-1]) / dy² )
//! ```
//!
//! and then forces the boundary ring of `u'` back to zero. All reads come
//! from the previous buffer and all writes go to the next one (Jacobi
//! style), so no point ever sees a partially updated neighbour.

use calor_core::error::require_positive;
use calor_core::{Field, Result, SolverError};
use calor_space::Grid;

use crate::boundary::enforce_dirichlet;
use crate::stability::StabilityPolicy;

/// Explicit five-point diffusion update with zero Dirichlet boundaries.
#[derive(Clone, Debug, PartialEq)]
pub struct FtcsKernel {
    k: f64,
    dt: f64,
    dx: f64,
    dy: f64,
    shape: (usize, usize),
    /// `k·dt/dx²`
    cx: f64,
    /// `k·dt/dy²`
    cy: f64,
}

impl FtcsKernel {
    /// Bind a kernel to `grid` with diffusivity `k` and time step `dt`.
    ///
    /// `dt == 0` is accepted and turns the step into a copy of the interior.
    /// Steps above the stability bound are accepted too; the caller decides
    /// whether to run them (see [`is_stable`](Self::is_stable)).
    ///
    /// # Errors
    ///
    /// [`SolverError::InvalidParameter`] if `k` is not a finite positive
    /// number or `dt` is negative or not finite.
    pub fn new(k: f64, dt: f64, grid: &Grid) -> Result<Self> {
        require_positive("k", k)?;
        if !dt.is_finite() || dt < 0.0 {
            return Err(SolverError::invalid_parameter(
                "dt",
                dt,
                "must be finite and >= 0",
            ));
        }
        let (dx, dy) = (grid.dx(), grid.dy());
        Ok(Self {
            k,
            dt,
            dx,
            dy,
            shape: grid.shape(),
            cx: k * dt / (dx * dx),
            cy: k * dt / (dy * dy),
        })
    }

    /// Diffusivity.
    pub fn k(&self) -> f64 {
        self.k
    }

    /// Time step.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// `(nx, ny)` of the grid this kernel was bound to.
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// The unscaled stability bound for this kernel's grid and diffusivity.
    pub fn max_dt(&self) -> f64 {
        // Inputs were validated in `new`, so this cannot fail.
        StabilityPolicy::max_stable_dt(self.k, self.dx, self.dy).unwrap_or(0.0)
    }

    /// Whether `dt` is within the von Neumann bound.
    pub fn is_stable(&self) -> bool {
        self.dt <= self.max_dt()
    }

    /// Advance `prev` by one step into `next`.
    ///
    /// Every point of `next` is overwritten: interior points with the
    /// stencil, boundary points with zero. `prev` is never written.
    ///
    /// # Errors
    ///
    /// [`SolverError::ShapeMismatch`] if either field is not shaped like
    /// the kernel's grid.
    pub fn step_into(&self, prev: &Field, next: &mut Field) -> Result<()> {
        prev.check_shape(self.shape)?;
        next.check_shape(self.shape)?;
        self.sweep(prev, next);
        Ok(())
    }

    /// Advance `prev` by one step into a freshly allocated field.
    pub fn step(&self, prev: &Field) -> Result<Field> {
        let mut next = Field::zeros(self.shape.0, self.shape.1);
        self.step_into(prev, &mut next)?;
        Ok(next)
    }

    /// Interior stencil followed by boundary re-enforcement.
    ///
    /// Shapes must already match.
    fn sweep(&self, prev: &Field, next: &mut Field) {
        let (nx, ny) = self.shape;
        let u = prev.as_slice();
        let out = next.as_mut_slice();

        for i in 1..nx - 1 {
            let row = i * ny;
            for j in 1..ny - 1 {
                let c = row + j;
                let center = u[c];
                let d2x = u[c + ny] - 2.0 * center + u[c - ny];
                let d2y = u[c + 1] - 2.0 * center + u[c - 1];
                out[c] = center + self.cx * d2x + self.cy * d2y;
            }
        }

        // The interior loop never touches the ring, but `next` may hold a
        // stale buffer from two steps back.
        enforce_dirichlet(next, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::boundary_deviation;

    fn spike(grid: &Grid, value: f64) -> Field {
        let mut f = grid.zeros();
        f[(grid.nx() / 2, grid.ny() / 2)] = value;
        f
    }

    #[test]
    fn rejects_bad_parameters() {
        let grid = Grid::unit_square(5).unwrap();
        assert!(matches!(
            FtcsKernel::new(0.0, 1e-3, &grid),
            Err(SolverError::InvalidParameter { param: "k", .. })
        ));
        assert!(matches!(
            FtcsKernel::new(1.0, -1e-3, &grid),
            Err(SolverError::InvalidParameter { param: "dt", .. })
        ));
        assert!(matches!(
            FtcsKernel::new(1.0, f64::NAN, &grid),
            Err(SolverError::InvalidParameter { param: "dt", .. })
        ));
    }

    #[test]
    fn single_spike_matches_hand_computed_stencil() {
        // 5x5 unit square: dx = dy = 0.25, k = 1, dt = 0.01
        // cx = cy = 0.01 / 0.0625 = 0.16
        let grid = Grid::unit_square(5).unwrap();
        let kernel = FtcsKernel::new(1.0, 0.01, &grid).unwrap();
        let next = kernel.step(&spike(&grid, 100.0)).unwrap();

        // center: 100 + 0.16 * (-200) + 0.16 * (-200) = 36
        assert!((next[(2, 2)] - 36.0).abs() < 1e-12);
        // each cardinal neighbour: 0 + 0.16 * 100 = 16
        for (i, j) in [(1, 2), (3, 2), (2, 1), (2, 3)] {
            assert!((next[(i, j)] - 16.0).abs() < 1e-12, "({i}, {j})");
        }
        // diagonals untouched
        assert_eq!(next[(1, 1)], 0.0);
        assert_eq!(boundary_deviation(&next, 0.0), 0.0);
    }

    #[test]
    fn anisotropic_spacing_weights_axes_separately() {
        // dx = 0.5, dy = 0.25
        let grid = Grid::new(1.0, 1.0, 3, 5).unwrap();
        let kernel = FtcsKernel::new(1.0, 0.01, &grid).unwrap();
        let mut u = grid.zeros();
        u[(1, 2)] = 1.0;
        let next = kernel.step(&u).unwrap();
        let cx = 0.01 / 0.25;
        let cy = 0.01 / 0.0625;
        assert!((next[(1, 2)] - (1.0 - 2.0 * cx - 2.0 * cy)).abs() < 1e-12);
        assert!((next[(1, 1)] - cy).abs() < 1e-12);
        assert!((next[(1, 3)] - cy).abs() < 1e-12);
    }

    #[test]
    fn zero_dt_is_identity_on_interior() {
        let grid = Grid::unit_square(7).unwrap();
        let kernel = FtcsKernel::new(1.0, 0.0, &grid).unwrap();
        let mut u = grid.sample(|x, y| (3.0 * x).sin() + y * y);
        enforce_dirichlet(&mut u, 0.0);
        assert_eq!(kernel.step(&u).unwrap(), u);
    }

    #[test]
    fn overwrites_stale_next_buffer() {
        let grid = Grid::unit_square(5).unwrap();
        let kernel = FtcsKernel::new(1.0, 0.01, &grid).unwrap();
        let prev = grid.zeros();
        let mut next = Field::from_fn(5, 5, |_, _| 99.0);
        kernel.step_into(&prev, &mut next).unwrap();
        assert!(next.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn step_reads_only_previous_state() {
        // A sequential in-place sweep would feed the updated (1, 2) value
        // into (1, 3) and break left/right symmetry.
        let grid = Grid::unit_square(5).unwrap();
        let kernel = FtcsKernel::new(1.0, 0.01, &grid).unwrap();
        let next = kernel.step(&spike(&grid, 1.0)).unwrap();
        assert_eq!(next[(2, 1)], next[(2, 3)]);
        assert_eq!(next[(1, 2)], next[(3, 2)]);
        assert_eq!(next[(1, 1)], 0.0);
        assert_eq!(next[(3, 3)], 0.0);
    }

    #[test]
    fn shape_mismatch_is_reported() {
        let grid = Grid::unit_square(5).unwrap();
        let kernel = FtcsKernel::new(1.0, 0.01, &grid).unwrap();
        let mut next = grid.zeros();
        assert!(matches!(
            kernel.step_into(&Field::zeros(4, 5), &mut next),
            Err(SolverError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            kernel.step_into(&grid.zeros(), &mut Field::zeros(5, 6)),
            Err(SolverError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn stability_flag_tracks_bound() {
        let grid = Grid::unit_square(11).unwrap();
        let bound = StabilityPolicy::max_stable_dt(1.0, grid.dx(), grid.dy()).unwrap();
        assert!(FtcsKernel::new(1.0, bound * 0.8, &grid).unwrap().is_stable());
        assert!(!FtcsKernel::new(1.0, bound * 1.5, &grid).unwrap().is_stable());
    }
}
