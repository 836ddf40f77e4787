//! Configuration management for `synthstat-core`.
//!
//! This module defines the generator and figure settings, loads them from YAML,
//! and applies command-line overrides on top. Every field has a default, so a
//! partial YAML file only needs to name what it changes.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Seed used when nothing else is configured.
pub const DEFAULT_SEED: u64 = 42;
/// Default heatmap matrix rows.
pub const DEFAULT_ROWS: usize = 10;
/// Default heatmap matrix columns.
pub const DEFAULT_COLS: usize = 12;
/// Default number of (x, y) records in the sample table.
pub const DEFAULT_SAMPLES: usize = 50;

/// Fewest records a table can have and still support a regression fit.
pub const MIN_SAMPLES: usize = 2;
/// Upper bound on the sample table size.
pub const MAX_SAMPLES: usize = 1_000_000;
/// Upper bound on `rows * cols` for the random matrix.
pub const MAX_MATRIX_CELLS: usize = 1_000_000;

/// Name of the per-user config file looked up under the platform config dir.
pub const USER_CONFIG_FILE: &str = "config.yaml";

/// Parameters of the synthetic data generator.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Seed for the portable ChaCha generator.
    pub seed: u64,
    /// Rows of the random matrix.
    pub rows: usize,
    /// Columns of the random matrix.
    pub cols: usize,
    /// Number of records in the sample table.
    pub samples: usize,
    /// Multiplier applied to the second uniform draw when building `y`.
    pub slope: f64,
    /// Constant offset added to every `y`.
    pub intercept: f64,
    /// Scale of the standard-normal noise term.
    pub noise: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            samples: DEFAULT_SAMPLES,
            slope: 2.0,
            intercept: 1.0,
            noise: 0.1,
        }
    }
}

/// Canvas settings shared by every figure sink.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FigureConfig {
    /// Canvas width in figure units.
    pub width_units: f64,
    /// Canvas height in figure units.
    pub height_units: f64,
    /// Pixel density used by raster and vector file renderers.
    pub pixels_per_unit: u32,
    /// Whether heatmap cells carry their numeric label.
    pub annotate: bool,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width_units: 16.0,
            height_units: 6.0,
            pixels_per_unit: 100,
            annotate: true,
        }
    }
}

impl FigureConfig {
    /// Pixel dimensions of the whole canvas, proportional to the unit size.
    pub fn pixel_size(&self) -> (u32, u32) {
        let ppu = f64::from(self.pixels_per_unit);
        (
            (self.width_units * ppu).round() as u32,
            (self.height_units * ppu).round() as u32,
        )
    }
}

/// Represents the top-level configuration structure for synthstat.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub generator: GeneratorConfig,
    pub figure: FigureConfig,
}

/// Values supplied on the command line. `None` leaves the configured value alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub seed: Option<u64>,
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub samples: Option<usize>,
}

impl AnalysisConfig {
    /// Loads a configuration from a YAML file. Missing keys keep their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AnalysisConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Loads the built-in configuration from the embedded YAML.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default configuration from embedded string...");
        let default_yaml = include_str!("../config/default_config.yaml");
        serde_yml::from_str(default_yaml).context("Failed to parse default configuration")
    }

    /// Resolves the effective configuration.
    ///
    /// An explicit path wins; otherwise the per-user file is used if it exists;
    /// otherwise the embedded defaults apply.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }
        match user_config_path() {
            Some(path) if path.is_file() => Self::load_from_file(&path),
            _ => Self::load_default(),
        }
    }

    /// Applies command-line overrides on top of the loaded values.
    pub fn apply_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(seed) = overrides.seed {
            debug!("Overriding seed with command-line value: {}", seed);
            self.generator.seed = seed;
        }
        if let Some(rows) = overrides.rows {
            debug!("Overriding rows with command-line value: {}", rows);
            self.generator.rows = rows;
        }
        if let Some(cols) = overrides.cols {
            debug!("Overriding cols with command-line value: {}", cols);
            self.generator.cols = cols;
        }
        if let Some(samples) = overrides.samples {
            debug!("Overriding samples with command-line value: {}", samples);
            self.generator.samples = samples;
        }
        self
    }

    /// Checks every field and reports all problems at once.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        let g = &self.generator;
        let f = &self.figure;

        if g.rows == 0 || g.cols == 0 {
            errors.push(format!("Matrix shape {}x{} must be non-empty.", g.rows, g.cols));
        } else if g.rows.checked_mul(g.cols).is_none_or(|cells| cells > MAX_MATRIX_CELLS) {
            errors.push(format!(
                "Matrix shape {}x{} exceeds {} cells.",
                g.rows, g.cols, MAX_MATRIX_CELLS
            ));
        }
        if !(MIN_SAMPLES..=MAX_SAMPLES).contains(&g.samples) {
            errors.push(format!(
                "`samples` must be between {} and {}, got {}.",
                MIN_SAMPLES, MAX_SAMPLES, g.samples
            ));
        }
        for (name, value) in [("slope", g.slope), ("intercept", g.intercept), ("noise", g.noise)] {
            if !value.is_finite() {
                errors.push(format!("`{}` must be finite, got {}.", name, value));
            }
        }
        if g.noise < 0.0 {
            errors.push(format!("`noise` must be non-negative, got {}.", g.noise));
        }
        if !(f.width_units > 0.0 && f.height_units > 0.0) {
            errors.push(format!(
                "Figure size {}x{} must be positive.",
                f.width_units, f.height_units
            ));
        }
        if f.pixels_per_unit == 0 {
            errors.push("`pixels_per_unit` must be at least 1.".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(anyhow!("Configuration validation failed: {}", errors.join(" ")))
        }
    }
}

/// Location of the optional per-user configuration file.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("synthstat").join(USER_CONFIG_FILE))
}
