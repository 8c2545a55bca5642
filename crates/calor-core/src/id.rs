//! Strongly-typed step counter.

use std::fmt;

/// Monotonically increasing step counter.
///
/// Step 0 is the initial condition; each kernel application advances the
/// counter by one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepIndex(pub u64);

impl StepIndex {
    /// The initial-condition step.
    pub const ZERO: Self = Self(0);

    /// The step after this one.
    ///
    /// Saturates at `u64::MAX`.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Whether this step falls on a sampling boundary of `every` steps.
    ///
    /// Step 0 is always on the boundary. `every == 0` never matches.
    pub fn on_cadence(self, every: u64) -> bool {
        every != 0 && self.0 % every == 0
    }
}

impl fmt::Display for StepIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for StepIndex {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
