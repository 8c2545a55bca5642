//! Run configuration, validation, and TOML loading.
//!
//! [`SimConfig`] is the immutable bundle of everything a run needs. Every
//! field is optional in TOML; omitted values take the defaults below, which
//! describe a narrow pulse in the middle of a 101 × 101 unit square.
//!
//! ```toml
//! k = 1.0
//! safety = 0.8
//! t_end = 0.001
//! vis_every = 10
//!
//! [grid]
//! lx = 1.0
//! ly = 1.0
//! nx = 101
//! ny = 101
//!
//! [pulse]
//! x0 = 0.5
//! y0 = 0.5
//! sigma = 0.03
//! ```

use std::path::{Path, PathBuf};

use calor_core::error::require_positive;
use calor_core::SolverError;
use calor_propagators::{GaussianPulse, StabilityPolicy};
use calor_space::Grid;
use serde::{Deserialize, Serialize};

// ── GridConfig ─────────────────────────────────────────────────────

/// Domain extents and resolution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Extent along `x`. Default: 1.0.
    pub lx: f64,
    /// Extent along `y`. Default: 1.0.
    pub ly: f64,
    /// Points along `x`, boundary included. Default: 101.
    pub nx: usize,
    /// Points along `y`, boundary included. Default: 101.
    pub ny: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            lx: 1.0,
            ly: 1.0,
            nx: 101,
            ny: 101,
        }
    }
}

impl GridConfig {
    /// Build the grid these values describe.
    pub fn build(&self) -> Result<Grid, SolverError> {
        Grid::new(self.lx, self.ly, self.nx, self.ny)
    }
}

// ── PulseConfig ────────────────────────────────────────────────────

/// Gaussian initial condition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PulseConfig {
    /// Center `x`. Default: 0.5.
    pub x0: f64,
    /// Center `y`. Default: 0.5.
    pub y0: f64,
    /// Spread. Default: 0.03.
    pub sigma: f64,
}

impl Default for PulseConfig {
    fn default() -> Self {
        let pulse = GaussianPulse::default();
        Self {
            x0: pulse.x0(),
            y0: pulse.y0(),
            sigma: pulse.sigma(),
        }
    }
}

impl PulseConfig {
    /// Build the initializer these values describe.
    pub fn build(&self) -> Result<GaussianPulse, SolverError> {
        GaussianPulse::new(self.x0, self.y0, self.sigma)
    }
}

// ── SimConfig ──────────────────────────────────────────────────────

/// Every parameter of a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Grid extents and resolution.
    pub grid: GridConfig,
    /// Initial condition.
    pub pulse: PulseConfig,
    /// Thermal diffusivity. Default: 1.0.
    pub k: f64,
    /// Fraction of the stability bound used as `dt`. Default: 0.8.
    pub safety: f64,
    /// Simulated time to advance. Default: 0.001.
    pub t_end: f64,
    /// Emit a snapshot every this many steps. Default: 10.
    pub vis_every: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            pulse: PulseConfig::default(),
            k: 1.0,
            safety: StabilityPolicy::DEFAULT_SAFETY,
            t_end: 1e-3,
            vis_every: 10,
        }
    }
}

impl SimConfig {
    /// Check every parameter without allocating a field.
    ///
    /// The first violation is reported.
    pub fn validate(&self) -> Result<(), SolverError> {
        // 1. Grid extents and point counts.
        let grid = self.grid.build()?;
        // 2. Pulse shape.
        self.pulse.build()?;
        // 3. Diffusivity.
        require_positive("k", self.k)?;
        // 4. Safety factor, and the step it produces on this grid.
        StabilityPolicy::new(self.safety)?.time_step_for(self.k, &grid)?;
        // 5. Time span.
        require_positive("t_end", self.t_end)?;
        // 6. Sampling cadence.
        if self.vis_every == 0 {
            return Err(SolverError::invalid_parameter(
                "vis_every",
                self.vis_every,
                "must be >= 1",
            ));
        }
        Ok(())
    }

    /// The stability policy for this run.
    pub fn policy(&self) -> Result<StabilityPolicy, SolverError> {
        StabilityPolicy::new(self.safety)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Parse {
            path: None,
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: Some(path.to_path_buf()),
            source: e,
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors from loading a [`SimConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("reading {}: {source}", path.display())]
    Io {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The document is not valid TOML or does not match the schema.
    #[error("parsing {}: {source}", path.as_deref().map_or("config".into(), |p| p.display().to_string()))]
    Parse {
        /// File being parsed, if the document came from disk.
        path: Option<PathBuf>,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
    /// The config could not be rendered as TOML.
    #[error("serializing config: {0}")]
    Serialize(#[source] toml::ser::Error),
    /// The document parsed but a value is out of range.
    #[error(transparent)]
    Invalid(#[from] SolverError),
}
