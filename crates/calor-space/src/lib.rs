//! Spatial discretization for the Calor heat solver.
//!
//! A [`Grid`] maps physical extents and point counts onto a uniform
//! rectangular lattice. Grids are immutable once built and are shared
//! read-only by the initializer, the stability policy, and the stepping
//! kernel.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod grid;

pub use grid::Grid;
