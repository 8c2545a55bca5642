//! Double-buffered field pair with explicit publish.
//!
//! [`PingPong`] holds two equally shaped fields. One is *current* (the
//! last published state); the other is *staging* (scratch for the step in
//! progress). The lifecycle per step is:
//!
//! 1. `begin_step()`: borrow the pair as a [`StepGuard`]
//! 2. the kernel reads `prev` and overwrites `next` via [`StepGuard::buffers`]
//! 3. `publish()`: staging becomes current and the step index advances
//!
//! Dropping the guard without publishing abandons the step. The current
//! buffer and step index are then exactly what they were before
//! `begin_step()`, which is how a failed step is discarded.
//!
//! # Buffer layout
//!
//! ```text
//! a: Field  ←─── current (even steps) / staging (odd)
//! b: Field  ←─── staging (even steps) / current (odd)
//! ```

use calor_core::{Field, SimulationState, StepIndex};

/// Exclusive access to both buffers for the duration of one step.
///
/// Created by [`PingPong::begin_step`]. Consumed by
/// [`publish`](Self::publish); dropping it instead leaves the pair as it
/// was.
#[must_use = "dropping a StepGuard without publish() discards the step"]
pub struct StepGuard<'a> {
    pair: &'a mut PingPong,
}

impl StepGuard<'_> {
    /// `(prev, next)`: the current buffer for reading and the staging
    /// buffer for writing.
    pub fn buffers(&mut self) -> (&Field, &mut Field) {
        let pair = &mut *self.pair;
        if pair.b_is_current {
            (&pair.b, &mut pair.a)
        } else {
            (&pair.a, &mut pair.b)
        }
    }

    /// The staging buffer, as written so far.
    pub fn staged(&self) -> &Field {
        self.pair.staging()
    }

    /// Step index the staged buffer will carry once published.
    pub fn target_step(&self) -> StepIndex {
        self.pair.step.next()
    }

    /// Make the staging buffer current and advance the step index.
    ///
    /// Returns the new step index.
    pub fn publish(self) -> StepIndex {
        let pair = self.pair;
        pair.b_is_current = !pair.b_is_current;
        pair.step = pair.step.next();
        pair.step
    }
}

/// Two field buffers that alternate between current and staging.
#[derive(Clone, Debug)]
pub struct PingPong {
    a: Field,
    b: Field,
    /// Which buffer is current (false = `a`, true = `b`).
    b_is_current: bool,
    /// Step index of the current buffer.
    step: StepIndex,
}

impl PingPong {
    /// Start at step 0 with `initial` as the current buffer.
    ///
    /// The staging buffer is allocated here, once, with the same shape.
    pub fn new(initial: Field) -> Self {
        let staging = Field::zeros(initial.nx(), initial.ny());
        Self {
            a: initial,
            b: staging,
            b_is_current: false,
            step: StepIndex::ZERO,
        }
    }

    /// The last published field.
    pub fn current(&self) -> &Field {
        if self.b_is_current {
            &self.b
        } else {
            &self.a
        }
    }

    fn staging(&self) -> &Field {
        if self.b_is_current {
            &self.a
        } else {
            &self.b
        }
    }

    /// Step index of [`current`](Self::current).
    pub fn step(&self) -> StepIndex {
        self.step
    }

    /// `(nx, ny)` of both buffers.
    pub fn shape(&self) -> (usize, usize) {
        self.a.shape()
    }

    /// Borrow both buffers for one step.
    pub fn begin_step(&mut self) -> StepGuard<'_> {
        StepGuard { pair: self }
    }

    /// Owned copy of the current buffer, stamped with step and time.
    pub fn snapshot(&self, dt: f64) -> SimulationState {
        SimulationState::new(self.step, dt, self.current().clone())
    }

    /// Consume the pair, returning the current buffer.
    pub fn into_current(self) -> Field {
        if self.b_is_current {
            self.b
        } else {
            self.a
        }
    }
}
