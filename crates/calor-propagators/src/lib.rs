//! Numerical building blocks for the explicit 2D heat solver.
//!
//! # Pipeline order (each run)
//!
//! 1. [`GaussianPulse`] (or any [`FieldInitializer`]) builds the unit-mass
//!    initial field with a zero boundary.
//! 2. [`StabilityPolicy`] picks `dt` below the von Neumann bound for the
//!    five-point Laplacian.
//! 3. [`FtcsKernel`] advances the field one step at a time, reading the
//!    previous buffer and writing the next.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod boundary;
pub mod ftcs;
pub mod gaussian;
pub mod stability;

pub use boundary::{boundary_deviation, enforce_dirichlet};
pub use ftcs::FtcsKernel;
pub use gaussian::{FieldInitializer, GaussianPulse};
pub use stability::StabilityPolicy;
