//! Core types for the Calor heat-diffusion solver.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! dense scalar [`Field`] storage, the [`StepIndex`] counter, the
//! [`SimulationState`] snapshot handed to samplers, and the
//! [`SolverError`] taxonomy shared by every other crate.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod field;
pub mod id;
pub mod state;

pub use error::{Result, SolverError};
pub use field::Field;
pub use id::StepIndex;
pub use state::SimulationState;
