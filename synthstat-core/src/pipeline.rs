//! The analysis pipeline: generate, visualize, then compute statistics.
//!
//! Each stage returns its own `Result`. The pipeline stops at the first failure,
//! so a caller never sees statistics from a run whose figure could not be drawn.

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::config::{AnalysisConfig, FigureConfig};
use crate::dataset::{RandomMatrix, SampleTable};
use crate::errors::AnalysisError;
use crate::figure::{build_figure, RegressionLine};
use crate::generator::generate_random_data;
use crate::sink::FigureSink;
use crate::statistics::{calculate_statistics, SummaryStatistics};

/// Prefix of the single line printed when any stage fails.
pub const FAILURE_PREFIX: &str = "An error occurred:";

/// Formats the one-line failure message shown to the user.
pub fn failure_line(message: impl std::fmt::Display) -> String {
    format!("{} {}", FAILURE_PREFIX, message)
}

/// Everything a successful run produced, ready to print or serialize.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub config: AnalysisConfig,
    pub statistics: SummaryStatistics,
    pub regression: RegressionLine,
}

impl AnalysisReport {
    /// The five statistics lines, in output order.
    pub fn report_lines(&self) -> Vec<String> {
        self.statistics.report_lines()
    }

    /// Writes the report as pretty-printed JSON.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), AnalysisError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!("Wrote JSON report to {}", path.display());
        Ok(())
    }
}

/// Builds the figure for `matrix` and `table` and hands it to every sink in order.
///
/// Returns the regression line drawn on the scatter panel.
pub fn visualize(
    matrix: &RandomMatrix,
    table: &SampleTable,
    config: &FigureConfig,
    sinks: &mut [Box<dyn FigureSink>],
) -> Result<RegressionLine, AnalysisError> {
    let figure = build_figure(matrix, table, config)?;
    for sink in sinks.iter_mut() {
        debug!("Presenting figure with sink '{}'", sink.name());
        sink.present(&figure)?;
    }
    Ok(figure.scatter.regression)
}

/// Runs the visualize and statistics stages over already generated data.
pub fn analyze(
    matrix: &RandomMatrix,
    table: &SampleTable,
    config: &AnalysisConfig,
    sinks: &mut [Box<dyn FigureSink>],
) -> Result<AnalysisReport, AnalysisError> {
    let regression = visualize(matrix, table, &config.figure, sinks)?;
    let statistics = calculate_statistics(table)?;

    Ok(AnalysisReport {
        generated_at: Utc::now(),
        config: config.clone(),
        statistics,
        regression,
    })
}

/// Runs the full pipeline: generate → visualize → compute statistics.
pub fn run_analysis(
    config: &AnalysisConfig,
    sinks: &mut [Box<dyn FigureSink>],
) -> Result<AnalysisReport, AnalysisError> {
    info!("Starting analysis run.");
    let (matrix, table) = generate_random_data(&config.generator)?;
    let report = analyze(&matrix, &table, config, sinks)?;
    info!("Analysis run completed.");
    Ok(report)
}
