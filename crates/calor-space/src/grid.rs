//! Uniform 2D grid with spacing derived from extents and point counts.

use calor_core::{Field, Result, SolverError};

/// A uniform `nx × ny` lattice over `[0, lx] × [0, ly]`.
///
/// Point `(i, j)` sits at `(i·dx, j·dy)` with `dx = lx/(nx-1)` and
/// `dy = ly/(ny-1)`, so both end points of each axis lie on the domain
/// edge. The outermost ring of points is the Dirichlet boundary; at least
/// three points per axis are required so that an interior exists.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    lx: f64,
    ly: f64,
    nx: usize,
    ny: usize,
    dx: f64,
    dy: f64,
}

impl Grid {
    /// Fewest points per axis that still leave an interior point.
    pub const MIN_POINTS: usize = 3;

    /// Build a grid over `[0, lx] × [0, ly]` with `nx × ny` points.
    ///
    /// Returns [`SolverError::InvalidGrid`] if either extent is not a
    /// finite positive number, if either point count is below
    /// [`MIN_POINTS`](Self::MIN_POINTS), or if `nx * ny` overflows.
    ///
    /// # Examples
    ///
    /// ```
    /// use calor_space::Grid;
    ///
    /// let grid = Grid::new(1.0, 2.0, 11, 21).unwrap();
    /// assert_eq!(grid.cell_count(), 231);
    /// assert!((grid.dx() - 0.1).abs() < 1e-15);
    /// assert!((grid.dy() - 0.1).abs() < 1e-15);
    /// ```
    pub fn new(lx: f64, ly: f64, nx: usize, ny: usize) -> Result<Self> {
        check_extent("lx", lx)?;
        check_extent("ly", ly)?;
        check_points("nx", nx)?;
        check_points("ny", ny)?;
        if nx.checked_mul(ny).is_none() {
            return Err(SolverError::invalid_grid(
                "ny",
                ny,
                "nx * ny overflows usize",
            ));
        }

        let dx = lx / (nx - 1) as f64;
        let dy = ly / (ny - 1) as f64;
        // Subnormal extents spread over many points can round to zero.
        if !(dx > 0.0) {
            return Err(SolverError::invalid_grid("lx", lx, "spacing dx underflows to 0"));
        }
        if !(dy > 0.0) {
            return Err(SolverError::invalid_grid("ly", ly, "spacing dy underflows to 0"));
        }

        Ok(Self {
            lx,
            ly,
            nx,
            ny,
            dx,
            dy,
        })
    }

    /// Square grid over the unit square with `n × n` points.
    pub fn unit_square(n: usize) -> Result<Self> {
        Self::new(1.0, 1.0, n, n)
    }

    /// Physical extent along `x`.
    pub fn lx(&self) -> f64 {
        self.lx
    }

    /// Physical extent along `y`.
    pub fn ly(&self) -> f64 {
        self.ly
    }

    /// Number of points along `x`.
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Number of points along `y`.
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// `(nx, ny)`, matching [`Field::shape`].
    pub fn shape(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    /// Spacing along `x`.
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Spacing along `y`.
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Area represented by one point, `dx · dy`.
    pub fn cell_area(&self) -> f64 {
        self.dx * self.dy
    }

    /// Total number of points.
    pub fn cell_count(&self) -> usize {
        self.nx * self.ny
    }

    /// Number of interior (non-boundary) points.
    pub fn interior_count(&self) -> usize {
        (self.nx - 2) * (self.ny - 2)
    }

    /// `x` coordinate of column `i`.
    #[inline]
    pub fn x_at(&self, i: usize) -> f64 {
        i as f64 * self.dx
    }

    /// `y` coordinate of row `j`.
    #[inline]
    pub fn y_at(&self, j: usize) -> f64 {
        j as f64 * self.dy
    }

    /// All `x` coordinates, `x[i] = i·dx`.
    pub fn x(&self) -> Vec<f64> {
        (0..self.nx).map(|i| self.x_at(i)).collect()
    }

    /// All `y` coordinates, `y[j] = j·dy`.
    pub fn y(&self) -> Vec<f64> {
        (0..self.ny).map(|j| self.y_at(j)).collect()
    }

    /// Flat index of `(i, j)` in a [`Field`] on this grid.
    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        i * self.ny + j
    }

    /// Whether `(i, j)` is on the Dirichlet boundary.
    #[inline]
    pub fn is_boundary(&self, i: usize, j: usize) -> bool {
        i == 0 || j == 0 || i + 1 == self.nx || j + 1 == self.ny
    }

    /// Whether the physical point `(x, y)` lies strictly inside the domain.
    pub fn contains_interior(&self, x: f64, y: f64) -> bool {
        x > 0.0 && x < self.lx && y > 0.0 && y < self.ly
    }

    /// A zero field shaped for this grid.
    pub fn zeros(&self) -> Field {
        Field::zeros(self.nx, self.ny)
    }

    /// Sample `f(x, y)` at every grid point.
    pub fn sample(&self, mut f: impl FnMut(f64, f64) -> f64) -> Field {
        Field::from_fn(self.nx, self.ny, |i, j| f(self.x_at(i), self.y_at(j)))
    }
}

fn check_extent(param: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(SolverError::invalid_grid(param, value, "extent must be finite"));
    }
    if value <= 0.0 {
        return Err(SolverError::invalid_grid(param, value, "extent must be > 0"));
    }
    Ok(())
}

fn check_points(param: &'static str, value: usize) -> Result<()> {
    if value < Grid::MIN_POINTS {
        return Err(SolverError::invalid_grid(
            param,
            value,
            "need at least 3 points for an interior",
        ));
    }
    Ok(())
}
