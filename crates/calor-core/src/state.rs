//! Owned simulation snapshots.

use crate::field::Field;
use crate::id::StepIndex;

/// A field paired with the step index and elapsed simulated time.
///
/// Snapshots own their field. A sampler that keeps one can never observe
/// later mutations of the solver's working buffers.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationState {
    /// Step at which the snapshot was taken (0 = initial condition).
    pub step: StepIndex,
    /// Elapsed simulated time, `step * dt`.
    pub time: f64,
    /// Deep copy of the field at `step`.
    pub field: Field,
}

impl SimulationState {
    /// Snapshot `field` at `step`, with `time = step * dt`.
    pub fn new(step: StepIndex, dt: f64, field: Field) -> Self {
        Self {
            step,
            time: step.0 as f64 * dt,
            field,
        }
    }

    /// Peak temperature of the snapshot.
    pub fn max(&self) -> f64 {
        self.field.max()
    }

    /// Discrete mass `Σ u · dx · dy`.
    pub fn mass(&self, cell_area: f64) -> f64 {
        self.field.sum() * cell_area
    }
}
