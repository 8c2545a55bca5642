//! Simulation engine for the Calor heat solver.
//!
//! Owns the double-buffered field pair, drives the FTCS kernel for a fixed
//! number of steps, and hands owned snapshots to a [`Sampler`] on a fixed
//! cadence. [`SimConfig`] bundles every run parameter and validates them
//! before anything is allocated.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod metrics;
pub mod pingpong;
pub mod sampler;
pub mod simulator;

pub use config::{ConfigError, GridConfig, PulseConfig, SimConfig};
pub use metrics::RunMetrics;
pub use pingpong::{PingPong, StepGuard};
pub use sampler::{ChannelSampler, CollectingSampler, NullSampler, SampleFlow, Sampler};
pub use simulator::{RunReport, Simulator};
