//! Seeded synthetic data generation.
//!
//! The random source is always passed in explicitly. [`generate_random_data`]
//! builds a fresh ChaCha8 stream from the configured seed on every call, so two
//! calls in the same process return identical data and tests never share state.
//!
//! Draw order is fixed: the matrix (row-major), then every `x`, then every
//! second uniform `u`, then every standard-normal `n`. The table's `y` is
//! `slope * u + intercept + noise * n`, which is independent of `x`.

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

use crate::config::{GeneratorConfig, MAX_MATRIX_CELLS, MAX_SAMPLES, MIN_SAMPLES};
use crate::dataset::{RandomMatrix, SampleTable};
use crate::errors::AnalysisError;

/// Creates the portable, seeded generator used for every analysis run.
///
/// ChaCha8 produces the same stream on every platform for a given seed.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Draws `n` values uniformly from `[0, 1)`.
pub fn draw_uniform<R: Rng>(rng: &mut R, n: usize) -> Vec<f64> {
    (0..n).map(|_| rng.random::<f64>()).collect()
}

/// Draws `n` values from the standard normal distribution.
pub fn draw_standard_normal<R: Rng>(rng: &mut R, n: usize) -> Vec<f64> {
    (0..n).map(|_| rng.sample::<f64, _>(StandardNormal)).collect()
}

/// Generates the random matrix and sample table from an explicit random source.
pub fn generate_with_rng<R: Rng>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<(RandomMatrix, SampleTable), AnalysisError> {
    let cells = check_parameters(config)?;
    let matrix = RandomMatrix::from_shape_vec(config.rows, config.cols, draw_uniform(rng, cells))?;

    let x = draw_uniform(rng, config.samples);
    let u = draw_uniform(rng, config.samples);
    let n = draw_standard_normal(rng, config.samples);

    let y: Vec<f64> = u
        .iter()
        .zip(n.iter())
        .map(|(ui, ni)| config.slope * ui + config.intercept + config.noise * ni)
        .collect();

    debug!(
        "Generated {}x{} matrix and {} samples",
        matrix.rows(),
        matrix.cols(),
        x.len()
    );
    Ok((matrix, SampleTable::from_columns(x, y)?))
}

/// Generates the random matrix and sample table, seeding a fresh generator.
pub fn generate_random_data(config: &GeneratorConfig) -> Result<(RandomMatrix, SampleTable), AnalysisError> {
    info!("Generating synthetic data with seed {}", config.seed);
    let mut rng = seeded_rng(config.seed);
    generate_with_rng(config, &mut rng)
}

/// Validates the generator settings and returns the matrix cell count.
fn check_parameters(config: &GeneratorConfig) -> Result<usize, AnalysisError> {
    if config.rows == 0 || config.cols == 0 {
        return Err(AnalysisError::InvalidShape {
            rows: config.rows,
            cols: config.cols,
            len: 0,
        });
    }
    let cells = config
        .rows
        .checked_mul(config.cols)
        .filter(|cells| *cells <= MAX_MATRIX_CELLS)
        .ok_or_else(|| AnalysisError::InvalidParameter {
            name: "rows",
            reason: format!(
                "{}x{} exceeds the {} cell limit",
                config.rows, config.cols, MAX_MATRIX_CELLS
            ),
        })?;
    if !(MIN_SAMPLES..=MAX_SAMPLES).contains(&config.samples) {
        return Err(AnalysisError::InvalidParameter {
            name: "samples",
            reason: format!(
                "must be between {} and {}, got {}",
                MIN_SAMPLES, MAX_SAMPLES, config.samples
            ),
        });
    }
    if !config.noise.is_finite() || config.noise < 0.0 {
        return Err(AnalysisError::InvalidParameter {
            name: "noise",
            reason: format!("must be finite and non-negative, got {}", config.noise),
        });
    }
    if !config.slope.is_finite() || !config.intercept.is_finite() {
        return Err(AnalysisError::InvalidParameter {
            name: "slope",
            reason: "slope and intercept must be finite".to_string(),
        });
    }
    Ok(cells)
}
