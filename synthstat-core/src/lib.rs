// synthstat-core/src/lib.rs
//! # synthstat Core Library
//!
//! `synthstat-core` provides the platform-independent logic of a synthetic data
//! analysis: seeded data generation, descriptive statistics, and the construction
//! of a two-panel figure (annotated heatmap plus scatter with regression line).
//!
//! The library never draws anything itself. Figures are handed to a pluggable
//! [`FigureSink`], so the CLI can attach an interactive viewer or a file renderer
//! while tests attach nothing at all.
//!
//! ## Modules
//!
//! * `config`: Generator and figure settings, YAML loading, command-line overrides.
//! * `dataset`: `RandomMatrix` and `SampleTable`, the immutable generated data.
//! * `generator`: Seeded sampling with an explicitly passed random source.
//! * `statistics`: Means, population standard deviations, Pearson's r.
//! * `figure`: Colour-mapped heatmap cells and the least-squares scatter panel.
//! * `colormap`: The diverging cool-warm scale.
//! * `format`: `%.2g`-style annotation formatting.
//! * `sink`: The `FigureSink` trait and trivial implementations.
//! * `pipeline`: The generate → visualize → statistics orchestration.
//! * `errors`: The `AnalysisError` enum returned by every stage.
//!
//! ## Usage Example
//!
//! ```rust
//! use synthstat_core::{run_analysis, AnalysisConfig, FigureSink, NullSink};
//!
//! fn main() -> Result<(), synthstat_core::AnalysisError> {
//!     let config = AnalysisConfig::default();
//!     let mut sinks: Vec<Box<dyn FigureSink>> = vec![Box::new(NullSink)];
//!
//!     let report = run_analysis(&config, &mut sinks)?;
//!     for line in report.report_lines() {
//!         println!("{}", line);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Pipeline stages return [`AnalysisError`]. Configuration loading uses
//! `anyhow::Result` with file context, like any other application-facing I/O.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod colormap;
pub mod config;
pub mod dataset;
pub mod errors;
pub mod figure;
pub mod format;
pub mod generator;
pub mod pipeline;
pub mod sink;
pub mod statistics;

/// Re-exports the configuration types.
pub use config::{AnalysisConfig, ConfigOverrides, FigureConfig, GeneratorConfig};

/// Re-exports the custom error type for clear error reporting.
pub use errors::AnalysisError;

/// Re-exports the generated data containers.
pub use dataset::{RandomMatrix, Sample, SampleTable};

/// Re-exports the generator entry points.
pub use generator::{generate_random_data, generate_with_rng, seeded_rng};

/// Re-exports the statistics calculator.
pub use statistics::{calculate_statistics, SummaryStatistics};

/// Re-exports the figure model.
pub use figure::{build_figure, fit_regression, ColorBarStop, Figure, HeatmapCell, HeatmapPanel, RegressionLine, ScatterPanel};
pub use colormap::{DivergingScale, Rgb};

/// Re-exports the sink seam.
pub use sink::{CollectingSink, FigureSink, NullSink};

/// Re-exports the orchestration entry points.
pub use pipeline::{analyze, failure_line, run_analysis, visualize, AnalysisReport, FAILURE_PREFIX};
