//! Config lookup and command-line overrides.
//!
//! Lookup order:
//! 1. `--config <path>`
//! 2. `$CALOR_CONFIG` environment variable
//! 3. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use calor::engine::SimConfig;
use clap::Args;

/// Name of the environment variable holding a config path.
pub const CONFIG_ENV: &str = "CALOR_CONFIG";

/// Flags that override individual config values.
#[derive(Args, Debug, Default, Clone)]
pub struct Overrides {
    /// TOML config file (default: $CALOR_CONFIG, then built-in defaults)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Grid points along x
    #[arg(long)]
    pub nx: Option<usize>,

    /// Grid points along y
    #[arg(long)]
    pub ny: Option<usize>,

    /// Thermal diffusivity
    #[arg(short, long)]
    pub k: Option<f64>,

    /// Gaussian pulse spread
    #[arg(long)]
    pub sigma: Option<f64>,

    /// Fraction of the stability bound used as dt
    #[arg(long)]
    pub safety: Option<f64>,
}

impl Overrides {
    fn apply(&self, config: &mut SimConfig) {
        if let Some(nx) = self.nx {
            config.grid.nx = nx;
        }
        if let Some(ny) = self.ny {
            config.grid.ny = ny;
        }
        if let Some(k) = self.k {
            config.k = k;
        }
        if let Some(sigma) = self.sigma {
            config.pulse.sigma = sigma;
        }
        if let Some(safety) = self.safety {
            config.safety = safety;
        }
    }
}

/// Load the base config and apply `overrides`.
///
/// The result is validated after overrides, so a flag can fix a bad file
/// value and a bad flag is reported by name.
pub fn load(overrides: &Overrides) -> Result<SimConfig> {
    load_with_env(overrides, std::env::var_os(CONFIG_ENV).map(PathBuf::from))
}

fn load_with_env(overrides: &Overrides, env_path: Option<PathBuf>) -> Result<SimConfig> {
    let mut config = match overrides.config.clone().or(env_path) {
        Some(path) => read(&path)?,
        None => SimConfig::default(),
    };
    overrides.apply(&mut config);
    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Parse without validating, so overrides can still apply.
fn read(path: &Path) -> Result<SimConfig> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config: SimConfig =
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(config)
}
