//! Calor: an explicit finite-difference solver for the 2D heat equation.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Calor sub-crates. For most users, adding `calor` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use calor::prelude::*;
//!
//! let mut config = SimConfig::default();
//! config.grid.nx = 11;
//! config.grid.ny = 11;
//! config.pulse.sigma = 0.1;
//!
//! let prepared = calor::prepare(&config).unwrap();
//! assert!((prepared.dt - 0.002).abs() < 1e-15);
//!
//! config.t_end = 5.0 * prepared.dt;
//! let mut samples = CollectingSampler::new();
//! let (last, report) = calor::run(&config, &mut samples).unwrap();
//! assert_eq!(report.steps, 5);
//! assert_eq!(last.step, StepIndex(5));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `calor-core` | `Field`, `StepIndex`, `SimulationState`, `SolverError` |
//! | [`space`] | `calor-space` | Uniform grid geometry |
//! | [`propagators`] | `calor-propagators` | Initial conditions, stability policy, FTCS kernel |
//! | [`engine`] | `calor-engine` | Simulator, double buffer, samplers, configuration |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod setup;

pub use setup::{prepare, run, Prepared};

/// Core types and errors (`calor-core`).
pub use calor_core as types;

/// Grid geometry (`calor-space`).
///
/// Provides [`space::Grid`], the uniform lattice every field lives on.
pub use calor_space as space;

/// Numerical building blocks (`calor-propagators`).
///
/// Includes [`propagators::GaussianPulse`], [`propagators::StabilityPolicy`],
/// and [`propagators::FtcsKernel`].
pub use calor_propagators as propagators;

/// The stepping loop and its configuration (`calor-engine`).
///
/// [`engine::Simulator`] drives runs; [`engine::SimConfig`] describes them.
pub use calor_engine as engine;

/// Common imports for typical Calor usage.
///
/// ```rust
/// use calor::prelude::*;
/// ```
pub mod prelude {
    // Core types and errors
    pub use calor_core::{Field, SimulationState, SolverError, StepIndex};

    // Geometry
    pub use calor_space::Grid;

    // Numerics
    pub use calor_propagators::{FieldInitializer, FtcsKernel, GaussianPulse, StabilityPolicy};

    // Engine
    pub use calor_engine::{
        ChannelSampler, CollectingSampler, ConfigError, RunReport, SampleFlow, Sampler, SimConfig,
        Simulator,
    };

    // Entry points
    pub use crate::{prepare, run, Prepared};
}
