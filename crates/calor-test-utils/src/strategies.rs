//! `proptest` strategies for fields and run parameters.

use calor_core::Field;
use calor_space::Grid;
use proptest::prelude::*;

/// Square grids small enough to step many times per case.
pub fn small_grid() -> impl Strategy<Value = Grid> {
    (3usize..24).prop_map(|n| Grid::unit_square(n).unwrap_or_else(|e| panic!("{e}")))
}

/// Non-negative field on `grid` with a zero boundary and values in
/// `[0, max)`.
pub fn interior_field(grid: &Grid, max: f64) -> impl Strategy<Value = Field> {
    let grid = grid.clone();
    prop::collection::vec(0.0..max, grid.cell_count()).prop_map(move |data| {
        let (nx, ny) = grid.shape();
        Field::from_fn(nx, ny, |i, j| {
            if grid.is_boundary(i, j) {
                0.0
            } else {
                data[i * ny + j]
            }
        })
    })
}

/// A grid together with a random zero-boundary field on it.
pub fn grid_and_field(max: f64) -> impl Strategy<Value = (Grid, Field)> {
    small_grid().prop_flat_map(move |grid| {
        let field = interior_field(&grid, max);
        (Just(grid), field)
    })
}

/// Safety factors in `(0, 1]`.
pub fn safety() -> impl Strategy<Value = f64> {
    0.05f64..=1.0
}
