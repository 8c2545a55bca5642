//! Benchmark profiles for the Calor heat solver.
//!
//! - [`reference_profile`]: 101 × 101 unit square, the default configuration
//! - [`stress_profile`]: 501 × 501 unit square (~250K points)
//! - [`Profile::simulator`]: bind a profile's initial field to a fresh run

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use calor_core::{Field, Result};
use calor_engine::{SimConfig, Simulator};
use calor_propagators::{FieldInitializer, FtcsKernel};
use calor_space::Grid;

/// A prepared grid, initial field, and time step.
#[derive(Clone, Debug)]
pub struct Profile {
    pub grid: Grid,
    pub initial: Field,
    pub k: f64,
    pub dt: f64,
}

impl Profile {
    /// Build from a config. Panics on invalid configs; profiles are fixed.
    pub fn from_config(config: &SimConfig) -> Self {
        Self::try_from_config(config).unwrap_or_else(|e| panic!("bench profile: {e}"))
    }

    fn try_from_config(config: &SimConfig) -> Result<Self> {
        config.validate()?;
        let grid = config.grid.build()?;
        let initial = config.pulse.build()?.initialize(&grid)?;
        let dt = config.policy()?.time_step_for(config.k, &grid)?;
        Ok(Self {
            grid,
            initial,
            k: config.k,
            dt,
        })
    }

    /// A kernel bound to this profile's grid.
    pub fn kernel(&self) -> FtcsKernel {
        FtcsKernel::new(self.k, self.dt, &self.grid).unwrap_or_else(|e| panic!("{e}"))
    }

    /// A simulator starting from this profile's initial field.
    pub fn simulator(&self) -> Simulator {
        Simulator::new(self.initial.clone(), self.k, self.dt, &self.grid)
            .unwrap_or_else(|e| panic!("{e}"))
    }
}

/// 101 × 101 unit square with the default narrow pulse.
pub fn reference_profile() -> Profile {
    Profile::from_config(&SimConfig::default())
}

/// 501 × 501 unit square with a wider pulse.
pub fn stress_profile() -> Profile {
    let mut config = SimConfig::default();
    config.grid.nx = 501;
    config.grid.ny = 501;
    config.pulse.sigma = 0.05;
    Profile::from_config(&config)
}
