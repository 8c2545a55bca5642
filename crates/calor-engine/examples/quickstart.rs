//! Calor Quickstart: a complete, minimal heat-diffusion run.
//!
//! Demonstrates:
//!   1. Building a grid and a unit-mass Gaussian initial condition
//!   2. Choosing a stable time step
//!   3. Stepping once and comparing the peak before and after
//!   4. Running to a fixed time with a sampling closure
//!
//! Run with:
//!   cargo run --example quickstart

use calor_core::{SimulationState, SolverError};
use calor_engine::{SampleFlow, Simulator};
use calor_propagators::{FieldInitializer, GaussianPulse, StabilityPolicy};
use calor_space::Grid;

// ─── Parameters ─────────────────────────────────────────────────

const N: usize = 101;
const K: f64 = 1.0;
const SIGMA: f64 = 0.03;

fn main() -> Result<(), SolverError> {
    println!("=== Calor Quickstart ===\n");

    // ─── Setup ──────────────────────────────────────────────────
    let grid = Grid::unit_square(N)?;
    let u0 = GaussianPulse::new(0.5, 0.5, SIGMA)?.initialize(&grid)?;
    let dt = StabilityPolicy::default().time_step_for(K, &grid)?;
    println!(
        "Grid {}x{}, dx = {}, dt = {:e} (bound {:e})",
        grid.nx(),
        grid.ny(),
        grid.dx(),
        dt,
        StabilityPolicy::max_stable_dt(K, grid.dx(), grid.dy())?
    );
    println!("Initial mass: {:.12}", u0.sum() * grid.cell_area());

    let mut sim = Simulator::new(u0, K, dt, &grid)?;

    // ─── One step ───────────────────────────────────────────────
    let before = sim.current().max();
    sim.step_once()?;
    println!("max before: {before}");
    println!("max after:  {}", sim.current().max());

    // ─── Longer run ─────────────────────────────────────────────
    println!("\nRunning to t = 200 dt, sampling every 40 steps...");
    let area = grid.cell_area();
    let mut print = |s: &SimulationState| {
        println!(
            "  step {:>4}  t = {:.6}  max = {:>10.4}  mass = {:.6}",
            s.step.0,
            s.time,
            s.max(),
            s.mass(area)
        );
        SampleFlow::Continue
    };
    let (_, report) = sim.run(200.0 * dt, 40, &mut print)?;
    println!(
        "\n{} steps in {} us ({:.1} us/step)",
        report.steps,
        report.metrics.total_us,
        report.metrics.mean_step_us()
    );
    Ok(())
}
