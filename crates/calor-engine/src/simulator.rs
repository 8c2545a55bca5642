//! The stepping loop.
//!
//! [`Simulator`] owns the kernel and the double-buffered field pair. Each
//! step stages the kernel's output, checks it for non-finite values, and
//! only then publishes it. A step that fails the check is never published,
//! so the current buffer always holds the last good state.

use std::time::Instant;

use calor_core::error::require_positive;
use calor_core::{Field, Result, SimulationState, SolverError, StepIndex};
use calor_propagators::FtcsKernel;
use calor_space::Grid;

use crate::metrics::RunMetrics;
use crate::pingpong::PingPong;
use crate::sampler::{SampleFlow, Sampler};

/// Tolerance, in units of `f64::EPSILON` relative to the nearest integer,
/// under which `t_end / dt` snaps to that integer. Wide enough for the
/// few ulps lost in `(n * dt) / dt`, and no wider.
const STEP_COUNT_ULPS: f64 = 4.0;

/// Summary of one [`Simulator::run`].
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    /// Steps the run was asked to take, `floor(t_end / dt)`.
    pub planned_steps: u64,
    /// Steps actually taken. Less than `planned_steps` only when a sampler
    /// stopped the run.
    pub steps: u64,
    /// Snapshots handed to the sampler, including the one at the start.
    pub samples: u64,
    /// Whether a sampler returned [`SampleFlow::Stop`].
    pub interrupted: bool,
    /// Timing.
    pub metrics: RunMetrics,
}

/// Explicit heat solver over one grid.
///
/// # Examples
///
/// ```
/// use calor_engine::{CollectingSampler, Simulator};
/// use calor_propagators::{FieldInitializer, GaussianPulse, StabilityPolicy};
/// use calor_space::Grid;
///
/// let grid = Grid::unit_square(11).unwrap();
/// let u0 = GaussianPulse::new(0.5, 0.5, 0.1).unwrap().initialize(&grid).unwrap();
/// let dt = StabilityPolicy::default().time_step_for(1.0, &grid).unwrap();
///
/// let mut sim = Simulator::new(u0, 1.0, dt, &grid).unwrap();
/// let mut samples = CollectingSampler::new();
/// let (last, report) = sim.run(5.0 * dt, 1, &mut samples).unwrap();
///
/// assert_eq!(report.steps, 5);
/// assert_eq!(samples.states().len(), 6);
/// assert_eq!(last.step.0, 5);
/// ```
#[derive(Clone, Debug)]
pub struct Simulator {
    kernel: FtcsKernel,
    buffers: PingPong,
    dt: f64,
    cell_area: f64,
}

impl Simulator {
    /// Bind `initial` to `grid` and prepare to step with diffusivity `k`
    /// and time step `dt`.
    ///
    /// A `dt` above the stability bound is accepted with a warning; such a
    /// run will usually end in [`SolverError::NumericalInstability`].
    ///
    /// # Errors
    ///
    /// - [`SolverError::InvalidParameter`] if `k` or `dt` is not a finite
    ///   positive number, or `initial` holds a non-finite value.
    /// - [`SolverError::ShapeMismatch`] if `initial` is not shaped like
    ///   `grid`.
    pub fn new(initial: Field, k: f64, dt: f64, grid: &Grid) -> Result<Self> {
        require_positive("dt", dt)?;
        initial.check_shape(grid.shape())?;
        if let Some(index) = initial.first_non_finite() {
            return Err(SolverError::invalid_parameter(
                "initial",
                format!("cell {index}"),
                "must be finite everywhere",
            ));
        }

        let kernel = FtcsKernel::new(k, dt, grid)?;
        if !kernel.is_stable() {
            tracing::warn!(
                dt,
                max_dt = kernel.max_dt(),
                "time step exceeds the stability bound"
            );
        }

        Ok(Self {
            kernel,
            buffers: PingPong::new(initial),
            dt,
            cell_area: grid.cell_area(),
        })
    }

    /// Number of steps needed to cover `t_end` with step `dt`.
    ///
    /// This is `floor(t_end / dt)`, except that a quotient within a relative
    /// `1e-9` of an integer snaps to that integer, so `t_end = 5.0 * dt`
    /// gives exactly 5 steps.
    ///
    /// # Errors
    ///
    /// [`SolverError::InvalidParameter`] if `t_end` or `dt` is not a finite
    /// positive number, or the step count does not fit in a `u64`.
    pub fn n_steps(t_end: f64, dt: f64) -> Result<u64> {
        require_positive("t_end", t_end)?;
        require_positive("dt", dt)?;

        let ratio = t_end / dt;
        if !ratio.is_finite() || ratio >= u64::MAX as f64 {
            return Err(SolverError::invalid_parameter(
                "t_end",
                t_end,
                "step count t_end / dt does not fit in u64",
            ));
        }
        let nearest = ratio.round();
        let steps = if (ratio - nearest).abs() <= STEP_COUNT_ULPS * f64::EPSILON * nearest.max(1.0) {
            nearest
        } else {
            ratio.floor()
        };
        Ok(steps as u64)
    }

    /// Time step.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// The kernel driving this simulator.
    pub fn kernel(&self) -> &FtcsKernel {
        &self.kernel
    }

    /// The last published field.
    pub fn current(&self) -> &Field {
        self.buffers.current()
    }

    /// Step index of [`current`](Self::current).
    pub fn step_index(&self) -> StepIndex {
        self.buffers.step()
    }

    /// Elapsed simulated time, `step * dt`.
    pub fn time(&self) -> f64 {
        self.buffers.step().0 as f64 * self.dt
    }

    /// Discrete mass `Σ u · dx · dy` of the current field.
    pub fn mass(&self) -> f64 {
        self.current().sum() * self.cell_area
    }

    /// Owned snapshot of the current field.
    pub fn current_state(&self) -> SimulationState {
        self.buffers.snapshot(self.dt)
    }

    /// Consume the simulator, returning the current field.
    pub fn into_field(self) -> Field {
        self.buffers.into_current()
    }

    /// Advance by one step and publish it.
    ///
    /// Returns the new step index.
    ///
    /// # Errors
    ///
    /// [`SolverError::NumericalInstability`] if the step produced a
    /// non-finite value. The step is discarded: [`current`](Self::current)
    /// and [`step_index`](Self::step_index) are unchanged.
    pub fn step_once(&mut self) -> Result<StepIndex> {
        let mut guard = self.buffers.begin_step();
        let target = guard.target_step();
        let (prev, next) = guard.buffers();
        self.kernel.step_into(prev, next)?;

        if let Some(index) = next.first_non_finite() {
            tracing::error!(
                step = %target,
                index,
                dt = self.dt,
                "non-finite value after step, discarding it"
            );
            return Err(SolverError::NumericalInstability {
                step: target.0,
                index,
            });
        }

        Ok(guard.publish())
    }

    /// Advance `floor(t_end / dt)` steps, sampling along the way.
    ///
    /// `sampler` receives the current state once before the first step and
    /// again after every `vis_every`-th step of this run. It may return
    /// [`SampleFlow::Stop`] to end the run early; the report then has
    /// `interrupted` set.
    ///
    /// Returns a snapshot of the final state and the run report.
    ///
    /// # Errors
    ///
    /// - [`SolverError::InvalidParameter`] if `t_end` is not a finite
    ///   positive number or `vis_every` is 0.
    /// - [`SolverError::NumericalInstability`] from the first step that
    ///   produced a non-finite value. Steps before it stay published.
    pub fn run(
        &mut self,
        t_end: f64,
        vis_every: u64,
        sampler: &mut dyn Sampler,
    ) -> Result<(SimulationState, RunReport)> {
        let planned_steps = Self::n_steps(t_end, self.dt)?;
        if vis_every == 0 {
            return Err(SolverError::invalid_parameter(
                "vis_every",
                vis_every,
                "must be >= 1",
            ));
        }

        let (nx, ny) = self.buffers.shape();
        tracing::debug!(
            nx,
            ny,
            dt = self.dt,
            k = self.kernel.k(),
            t_end,
            planned_steps,
            vis_every,
            "starting run"
        );

        let started = Instant::now();
        let mut metrics = RunMetrics::default();
        let mut samples = 0u64;
        let mut steps = 0u64;

        let mut interrupted = self.emit(sampler, &mut metrics) == SampleFlow::Stop;
        samples += 1;

        while !interrupted && steps < planned_steps {
            let step_started = Instant::now();
            self.step_once()?;
            metrics.record_step(step_started.elapsed());
            steps += 1;

            if StepIndex(steps).on_cadence(vis_every) {
                interrupted = self.emit(sampler, &mut metrics) == SampleFlow::Stop;
                samples += 1;
            }
        }

        metrics.total_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        let last = self.current_state();
        tracing::info!(
            steps,
            samples,
            interrupted,
            time = last.time,
            max = last.max(),
            mass = last.mass(self.cell_area),
            total_us = metrics.total_us,
            "run complete"
        );

        Ok((
            last,
            RunReport {
                planned_steps,
                steps,
                samples,
                interrupted,
                metrics,
            },
        ))
    }

    fn emit(&self, sampler: &mut dyn Sampler, metrics: &mut RunMetrics) -> SampleFlow {
        let started = Instant::now();
        let state = self.current_state();
        tracing::trace!(step = %state.step, time = state.time, max = state.max(), "sample");
        let flow = sampler.sample(&state);
        metrics.record_sample(started.elapsed());
        flow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::{CollectingSampler, NullSampler};
    use calor_propagators::StabilityPolicy;
    use calor_test_utils::{interior_ramp, spike_field, unit_grid};

    fn stable_sim(n: usize) -> (Simulator, Grid) {
        let grid = unit_grid(n);
        let dt = StabilityPolicy::default().time_step_for(1.0, &grid).unwrap();
        let sim = Simulator::new(interior_ramp(&grid), 1.0, dt, &grid).unwrap();
        (sim, grid)
    }

    // ── Step counting ───────────────────────────────────────────

    #[test]
    fn n_steps_snaps_multiples_of_dt() {
        let dt = 0.0020000000000000005;
        for n in 1..2000u64 {
            assert_eq!(Simulator::n_steps(n as f64 * dt, dt).unwrap(), n, "n = {n}");
        }
    }

    #[test]
    fn n_steps_floors_fractional_spans() {
        assert_eq!(Simulator::n_steps(1.0, 0.3).unwrap(), 3);
        assert_eq!(Simulator::n_steps(0.05, 0.1).unwrap(), 0);
        assert_eq!(Simulator::n_steps(0.01, 0.002).unwrap(), 5);
    }

    #[test]
    fn n_steps_floors_spans_just_short_of_a_step() {
        let dt = 2e-5;
        assert_eq!(Simulator::n_steps(0.9999999995 * dt, dt).unwrap(), 0);
        assert_eq!(Simulator::n_steps(2.999999999 * dt, dt).unwrap(), 2);
        assert_eq!(Simulator::n_steps(1e6 * dt * (1.0 - 1e-12), dt).unwrap(), 999_999);
    }

    #[test]
    fn n_steps_rejects_bad_inputs() {
        assert!(matches!(
            Simulator::n_steps(0.0, 0.1),
            Err(SolverError::InvalidParameter { param: "t_end", .. })
        ));
        assert!(matches!(
            Simulator::n_steps(1.0, -0.1),
            Err(SolverError::InvalidParameter { param: "dt", .. })
        ));
        assert!(Simulator::n_steps(1e300, 1e-300).is_err());
    }

    // ── Construction ────────────────────────────────────────────

    #[test]
    fn rejects_mismatched_initial_field() {
        let grid = unit_grid(5);
        assert!(matches!(
            Simulator::new(unit_grid(6).zeros(), 1.0, 1e-3, &grid),
            Err(SolverError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn rejects_non_finite_initial_field() {
        let grid = unit_grid(5);
        let mut u = grid.zeros();
        u[(2, 2)] = f64::NAN;
        assert!(matches!(
            Simulator::new(u, 1.0, 1e-3, &grid),
            Err(SolverError::InvalidParameter { param: "initial", .. })
        ));
    }

    #[test]
    fn rejects_non_positive_dt() {
        let grid = unit_grid(5);
        assert!(matches!(
            Simulator::new(grid.zeros(), 1.0, 0.0, &grid),
            Err(SolverError::InvalidParameter { param: "dt", .. })
        ));
    }

    // ── Stepping ────────────────────────────────────────────────

    #[test]
    fn step_once_advances_index_and_time() {
        let (mut sim, _) = stable_sim(7);
        assert_eq!(sim.step_once().unwrap(), StepIndex(1));
        assert_eq!(sim.step_once().unwrap(), StepIndex(2));
        assert_eq!(sim.time(), 2.0 * sim.dt());
    }

    #[test]
    fn unstable_step_is_not_published() {
        let grid = unit_grid(5);
        let mut u = spike_field(&grid, f64::MAX);
        u[(1, 1)] = -f64::MAX;
        let dt = StabilityPolicy::max_stable_dt(1.0, grid.dx(), grid.dy()).unwrap();
        let mut sim = Simulator::new(u.clone(), 1.0, dt, &grid).unwrap();

        let err = sim.step_once().unwrap_err();
        assert!(matches!(err, SolverError::NumericalInstability { step: 1, .. }));
        assert_eq!(sim.step_index(), StepIndex::ZERO);
        assert_eq!(sim.current(), &u);
    }

    // ── Runs ────────────────────────────────────────────────────

    #[test]
    fn run_samples_start_and_cadence() {
        let (mut sim, _) = stable_sim(9);
        let mut samples = CollectingSampler::new();
        let (last, report) = sim.run(10.0 * sim.dt(), 3, &mut samples).unwrap();

        let steps: Vec<u64> = samples.states().iter().map(|s| s.step.0).collect();
        assert_eq!(steps, vec![0, 3, 6, 9]);
        assert_eq!(report.planned_steps, 10);
        assert_eq!(report.steps, 10);
        assert_eq!(report.samples, 4);
        assert!(!report.interrupted);
        assert_eq!(report.metrics.steps, 10);
        assert_eq!(last.step, StepIndex(10));
    }

    #[test]
    fn sampler_stop_interrupts_between_steps() {
        let (mut sim, _) = stable_sim(9);
        let mut samples = CollectingSampler::with_limit(3);
        let (last, report) = sim.run(100.0 * sim.dt(), 2, &mut samples).unwrap();
        assert!(report.interrupted);
        assert_eq!(report.steps, 4);
        assert_eq!(last.step, StepIndex(4));
        assert_eq!(sim.step_index(), StepIndex(4));
    }

    #[test]
    fn stop_at_first_sample_takes_no_steps() {
        let (mut sim, _) = stable_sim(5);
        let mut stop = |_: &SimulationState| SampleFlow::Stop;
        let (_, report) = sim.run(1.0, 1, &mut stop).unwrap();
        assert_eq!((report.steps, report.samples), (0, 1));
        assert!(report.interrupted);
    }

    #[test]
    fn short_span_samples_only_initial_state() {
        let (mut sim, _) = stable_sim(5);
        let mut samples = CollectingSampler::new();
        let (_, report) = sim.run(0.5 * sim.dt(), 1, &mut samples).unwrap();
        assert_eq!(report.steps, 0);
        assert_eq!(samples.states().len(), 1);
    }

    #[test]
    fn run_rejects_zero_cadence_and_bad_span() {
        let (mut sim, _) = stable_sim(5);
        assert!(matches!(
            sim.run(1.0, 0, &mut NullSampler),
            Err(SolverError::InvalidParameter { param: "vis_every", .. })
        ));
        assert!(matches!(
            sim.run(-1.0, 1, &mut NullSampler),
            Err(SolverError::InvalidParameter { param: "t_end", .. })
        ));
        assert_eq!(sim.step_index(), StepIndex::ZERO);
    }

    #[test]
    fn into_field_returns_last_published_state() {
        let (mut sim, grid) = stable_sim(9);
        assert_eq!(sim.kernel().dt(), sim.dt());
        assert!(sim.kernel().is_stable());
        sim.step_once().unwrap();
        sim.step_once().unwrap();
        let expected = sim.current().clone();
        let field = sim.into_field();
        assert_eq!(field, expected);
        assert_eq!(field.shape(), (grid.nx(), grid.ny()));
    }

    #[test]
    fn samples_do_not_alias_live_buffers() {
        let (mut sim, _) = stable_sim(9);
        let mut samples = CollectingSampler::new();
        sim.run(4.0 * sim.dt(), 1, &mut samples).unwrap();
        let states = samples.into_states();
        assert_ne!(states[0].field, states[4].field);
        assert_eq!(&states[4].field, sim.current());
    }
}
