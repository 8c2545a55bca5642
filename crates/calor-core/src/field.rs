//! Dense 2D scalar field storage.
//!
//! A [`Field`] holds one `f64` per grid point, laid out row-major over the
//! first index: point `(i, j)` lives at `i * ny + j`. The layout matches the
//! `[i][j]` indexing used by the stencil so the inner loop walks contiguous
//! memory along `j`.

use std::ops::{Index, IndexMut};

use crate::error::{Result, SolverError};

/// A dense `nx × ny` array of temperatures.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    nx: usize,
    ny: usize,
    data: Vec<f64>,
}

impl Field {
    /// A field of zeros.
    pub fn zeros(nx: usize, ny: usize) -> Self {
        Self {
            nx,
            ny,
            data: vec![0.0; nx * ny],
        }
    }

    /// Build a field by evaluating `f(i, j)` at every point.
    pub fn from_fn(nx: usize, ny: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(nx * ny);
        for i in 0..nx {
            for j in 0..ny {
                data.push(f(i, j));
            }
        }
        Self { nx, ny, data }
    }

    /// Wrap an existing row-major buffer.
    ///
    /// Returns [`SolverError::InvalidParameter`] if `data.len() != nx * ny`.
    pub fn from_vec(nx: usize, ny: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != nx * ny {
            return Err(SolverError::invalid_parameter(
                "data",
                data.len(),
                "length must equal nx * ny",
            ));
        }
        Ok(Self { nx, ny, data })
    }

    /// Number of points along `x` (first index).
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Number of points along `y` (second index).
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// `(nx, ny)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    /// Total number of points.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the field holds no points.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat index of `(i, j)`.
    #[inline]
    pub fn flat(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.nx && j < self.ny, "({i}, {j}) out of bounds");
        i * self.ny + j
    }

    /// Value at `(i, j)`, or `None` when out of bounds.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.nx && j < self.ny {
            Some(self.data[i * self.ny + j])
        } else {
            None
        }
    }

    /// Whether `(i, j)` sits on the outer ring of the field.
    #[inline]
    pub fn is_boundary(&self, i: usize, j: usize) -> bool {
        i == 0 || j == 0 || i + 1 == self.nx || j + 1 == self.ny
    }

    /// Row-major view of the values.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutable row-major view of the values.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Consume the field, returning the row-major buffer.
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Overwrite this field with `other`'s values.
    ///
    /// Returns [`SolverError::ShapeMismatch`] if the shapes differ.
    pub fn copy_from(&mut self, other: &Field) -> Result<()> {
        self.check_shape(other.shape())?;
        self.data.copy_from_slice(&other.data);
        Ok(())
    }

    /// Fail unless this field is `expected` in shape.
    pub fn check_shape(&self, expected: (usize, usize)) -> Result<()> {
        if self.shape() != expected {
            return Err(SolverError::ShapeMismatch {
                expected,
                actual: self.shape(),
            });
        }
        Ok(())
    }

    /// Plain sum of all values.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Largest value. `NaN` entries are ignored; an empty field yields
    /// `f64::NEG_INFINITY`.
    pub fn max(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Smallest value. `NaN` entries are ignored; an empty field yields
    /// `f64::INFINITY`.
    pub fn min(&self) -> f64 {
        self.data.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Flat index of the first non-finite value, if any.
    pub fn first_non_finite(&self) -> Option<usize> {
        self.data.iter().position(|v| !v.is_finite())
    }

    /// Multiply every value by `factor`.
    pub fn scale(&mut self, factor: f64) {
        for v in &mut self.data {
            *v *= factor;
        }
    }

    /// Iterate over `(i, j, value)` for every boundary point.
    pub fn boundary_values(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let ny = self.ny;
        self.data.iter().enumerate().filter_map(move |(flat, &v)| {
            let (i, j) = (flat / ny, flat % ny);
            self.is_boundary(i, j).then_some((i, j, v))
        })
    }
}

impl Index<(usize, usize)> for Field {
    type Output = f64;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.data[self.flat(i, j)]
    }
}

impl IndexMut<(usize, usize)> for Field {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        let idx = self.flat(i, j);
        &mut self.data[idx]
    }
}
