//! Snapshot consumers.
//!
//! The simulator hands each sampler a `&SimulationState` that it built
//! from an owned copy of the current buffer. Nothing a sampler does can
//! reach the solver's working fields. Returning [`SampleFlow::Stop`] ends
//! the run cleanly before the next step.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use calor_core::SimulationState;
use crossbeam_channel::{Receiver, Sender, TrySendError};

/// What the simulator should do after a sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SampleFlow {
    /// Keep stepping.
    #[default]
    Continue,
    /// Stop before the next step. The run reports itself as interrupted.
    Stop,
}

/// Receives snapshots at step 0 and every `vis_every`-th step.
pub trait Sampler {
    /// Handle one snapshot.
    fn sample(&mut self, state: &SimulationState) -> SampleFlow;
}

impl<F> Sampler for F
where
    F: FnMut(&SimulationState) -> SampleFlow,
{
    fn sample(&mut self, state: &SimulationState) -> SampleFlow {
        self(state)
    }
}

/// Discards every snapshot.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSampler;

impl Sampler for NullSampler {
    fn sample(&mut self, _state: &SimulationState) -> SampleFlow {
        SampleFlow::Continue
    }
}

/// Keeps every snapshot in memory, optionally stopping after `limit`.
#[derive(Clone, Debug, Default)]
pub struct CollectingSampler {
    states: Vec<SimulationState>,
    limit: Option<usize>,
}

impl CollectingSampler {
    /// Collect without limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect `limit` snapshots, then ask the run to stop.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            states: Vec::new(),
            limit: Some(limit),
        }
    }

    /// Snapshots received so far, in order.
    pub fn states(&self) -> &[SimulationState] {
        &self.states
    }

    /// Consume the sampler, returning its snapshots.
    pub fn into_states(self) -> Vec<SimulationState> {
        self.states
    }
}

impl Sampler for CollectingSampler {
    fn sample(&mut self, state: &SimulationState) -> SampleFlow {
        self.states.push(state.clone());
        match self.limit {
            Some(limit) if self.states.len() >= limit => SampleFlow::Stop,
            _ => SampleFlow::Continue,
        }
    }
}

/// Hands snapshots to another thread over a bounded channel.
///
/// The handoff never blocks the stepping loop: when the queue is full the
/// snapshot is dropped and counted. A disconnected receiver stops the run,
/// since nobody is left to consume samples.
#[derive(Debug)]
pub struct ChannelSampler {
    tx: Sender<SimulationState>,
    dropped: Arc<AtomicU64>,
}

impl ChannelSampler {
    /// Channel with room for `capacity` pending snapshots.
    ///
    /// Returns the sampler and the receiving end. `capacity` of 0 is
    /// raised to 1 so the channel can buffer at least one snapshot.
    pub fn bounded(capacity: usize) -> (Self, Receiver<SimulationState>) {
        let (tx, rx) = crossbeam_channel::bounded(capacity.max(1));
        (
            Self {
                tx,
                dropped: Arc::new(AtomicU64::new(0)),
            },
            rx,
        )
    }

    /// Snapshots dropped so far because the queue was full.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Shared handle to the drop counter, readable after the sampler moves.
    pub fn dropped_counter(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.dropped)
    }
}

impl Sampler for ChannelSampler {
    fn sample(&mut self, state: &SimulationState) -> SampleFlow {
        match self.tx.try_send(state.clone()) {
            Ok(()) => SampleFlow::Continue,
            Err(TrySendError::Full(dropped)) => {
                let total = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                tracing::warn!(
                    step = %dropped.step,
                    total_dropped = total,
                    "sample queue full, snapshot dropped"
                );
                SampleFlow::Continue
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::debug!(step = %state.step, "sample receiver gone, stopping run");
                SampleFlow::Stop
            }
        }
    }
}
