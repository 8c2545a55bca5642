mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use calor::engine::{SampleFlow, SimConfig};
use calor::propagators::StabilityPolicy;
use calor::types::SimulationState;

use crate::config::Overrides;

#[derive(Parser)]
#[command(
    name = "calor",
    version,
    about = "Explicit finite-difference solver for the 2D heat equation"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation and print one line per sample
    Run {
        #[command(flatten)]
        overrides: Overrides,

        /// Simulated time to advance
        #[arg(short, long)]
        t_end: Option<f64>,

        /// Print a sample every N steps
        #[arg(short, long)]
        every: Option<u64>,
    },

    /// Print the time step and the stability bound for a configuration
    Dt {
        #[command(flatten)]
        overrides: Overrides,
    },

    /// Print the effective configuration as TOML
    Config {
        #[command(flatten)]
        overrides: Overrides,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            overrides,
            t_end,
            every,
        } => {
            let mut config = config::load(&overrides)?;
            if let Some(t) = t_end {
                config.t_end = t;
            }
            if let Some(n) = every {
                config.vis_every = n;
            }
            cmd_run(&config)
        }
        Commands::Dt { overrides } => cmd_dt(&config::load(&overrides)?),
        Commands::Config { overrides } => cmd_config(&config::load(&overrides)?),
    }
}

fn cmd_run(config: &SimConfig) -> Result<()> {
    let prepared = calor::prepare(config).context("preparing run")?;
    let area = prepared.grid.cell_area();
    let dt = prepared.dt;
    let mut sim = prepared
        .into_simulator(config.k)
        .context("building simulator")?;

    println!(
        "grid {}x{}  dt = {:e}  t_end = {}",
        config.grid.nx, config.grid.ny, dt, config.t_end
    );
    println!("{:>8}  {:>12}  {:>14}  {:>14}", "step", "time", "max", "mass");

    let mut first_max = None;
    let mut print = |s: &SimulationState| {
        first_max.get_or_insert(s.max());
        println!(
            "{:>8}  {:>12.6e}  {:>14.6}  {:>14.10}",
            s.step.0,
            s.time,
            s.max(),
            s.mass(area)
        );
        SampleFlow::Continue
    };
    let (last, report) = sim
        .run(config.t_end, config.vis_every, &mut print)
        .context("running simulation")?;

    if let Some(before) = first_max {
        println!("max before: {before}");
    }
    println!("max after:  {}", last.max());
    println!(
        "{} steps, {} samples, {:.1} us/step",
        report.steps,
        report.samples,
        report.metrics.mean_step_us()
    );
    Ok(())
}

fn cmd_dt(config: &SimConfig) -> Result<()> {
    let grid = config.grid.build()?;
    let bound = StabilityPolicy::max_stable_dt(config.k, grid.dx(), grid.dy())?;
    let dt = config.policy()?.time_step_for(config.k, &grid)?;
    println!("dx     = {}", grid.dx());
    println!("dy     = {}", grid.dy());
    println!("dt_max = {bound:e}");
    println!("dt     = {dt:e}  (safety {})", config.safety);
    Ok(())
}

fn cmd_config(config: &SimConfig) -> Result<()> {
    print!("{}", config.to_toml_string()?);
    Ok(())
}
