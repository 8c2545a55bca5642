//! Construction and run entry points.

use calor_core::{Field, Result, SimulationState};
use calor_engine::{RunReport, Sampler, SimConfig, Simulator};
use calor_propagators::FieldInitializer;
use calor_space::Grid;

/// Everything a run needs, derived deterministically from a [`SimConfig`].
#[derive(Clone, Debug, PartialEq)]
pub struct Prepared {
    /// The grid.
    pub grid: Grid,
    /// Unit-mass initial field with a zero boundary.
    pub initial: Field,
    /// Time step chosen by the stability policy.
    pub dt: f64,
}

impl Prepared {
    /// Bind the prepared field to a [`Simulator`].
    pub fn into_simulator(self, k: f64) -> Result<Simulator> {
        Simulator::new(self.initial, k, self.dt, &self.grid)
    }
}

/// Validate `config` and build the grid, initial field, and time step.
///
/// The same config always yields the same [`Prepared`].
///
/// # Errors
///
/// The first [`SolverError`](calor_core::SolverError) raised by
/// validation, or [`DegenerateField`](calor_core::SolverError::DegenerateField)
/// if the pulse cannot be normalized on this grid.
pub fn prepare(config: &SimConfig) -> Result<Prepared> {
    config.validate()?;
    let grid = config.grid.build()?;
    let initial = config.pulse.build()?.initialize(&grid)?;
    let dt = config.policy()?.time_step_for(config.k, &grid)?;
    tracing::debug!(
        nx = grid.nx(),
        ny = grid.ny(),
        dx = grid.dx(),
        dy = grid.dy(),
        dt,
        "prepared run"
    );
    Ok(Prepared { grid, initial, dt })
}

/// [`prepare`] then [`Simulator::run`] to `config.t_end`.
pub fn run(config: &SimConfig, sampler: &mut dyn Sampler) -> Result<(SimulationState, RunReport)> {
    let mut sim = prepare(config)?.into_simulator(config.k)?;
    sim.run(config.t_end, config.vis_every, sampler)
}
