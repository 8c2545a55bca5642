//! Reusable grids and fields.
//!
//! - [`unit_grid`]: `n × n` points over the unit square.
//! - [`pulse_field`]: unit-mass Gaussian with a zero boundary, built
//!   independently of the propagators crate so tests can cross-check it.
//! - [`spike_field`]: a single hot interior point.
//! - [`interior_ramp`]: deterministic non-trivial interior, zero boundary.

use calor_core::Field;
use calor_space::Grid;

/// `n × n` grid over `[0, 1]²`.
///
/// Panics if `n < 3`; fixtures are for tests only.
pub fn unit_grid(n: usize) -> Grid {
    Grid::unit_square(n).unwrap_or_else(|e| panic!("unit_grid({n}): {e}"))
}

/// Gaussian at `(x0, y0)` with spread `sigma`, boundary cleared and the
/// interior rescaled to unit mass.
pub fn pulse_field(grid: &Grid, x0: f64, y0: f64, sigma: f64) -> Field {
    let mut field = grid.sample(|x, y| {
        let r2 = (x - x0).powi(2) + (y - y0).powi(2);
        (-r2 / (2.0 * sigma * sigma)).exp()
    });
    let (nx, ny) = grid.shape();
    for i in 0..nx {
        for j in 0..ny {
            if grid.is_boundary(i, j) {
                field[(i, j)] = 0.0;
            }
        }
    }
    let sum = field.sum();
    assert!(sum > 0.0, "pulse_field: interior sum underflowed");
    field.scale(1.0 / (sum * grid.cell_area()));
    field
}

/// All zeros except `value` at the central point.
pub fn spike_field(grid: &Grid, value: f64) -> Field {
    let mut field = grid.zeros();
    field[(grid.nx() / 2, grid.ny() / 2)] = value;
    field
}

/// `sin(πx)·sin(πy)`-like ramp that is exactly zero on the boundary.
pub fn interior_ramp(grid: &Grid) -> Field {
    let (nx, ny) = grid.shape();
    Field::from_fn(nx, ny, |i, j| {
        if grid.is_boundary(i, j) {
            0.0
        } else {
            ((i * (nx - 1 - i)) * (j * (ny - 1 - j))) as f64
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_close, assert_zero_boundary};

    #[test]
    fn pulse_field_has_unit_mass() {
        let grid = unit_grid(21);
        let u = pulse_field(&grid, 0.5, 0.5, 0.1);
        assert_close(u.sum() * grid.cell_area(), 1.0, 1e-12);
        assert_zero_boundary(&u);
    }

    #[test]
    fn ramp_peaks_in_the_middle() {
        let grid = unit_grid(5);
        let u = interior_ramp(&grid);
        assert_zero_boundary(&u);
        assert_eq!(u.max(), u[(2, 2)]);
    }
}
