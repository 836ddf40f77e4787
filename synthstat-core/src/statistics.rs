//! Summary statistics over a sample table.
//!
//! Standard deviations use the population convention (divide by N), and the
//! correlation coefficient is read from the off-diagonal of the 2×2
//! correlation matrix.

use log::debug;
use serde::{Deserialize, Serialize};
use synthstat_math::{compute_stats, correlation_matrix};

use crate::dataset::SampleTable;
use crate::errors::AnalysisError;

/// The five scalars reported for every run, in their fixed output order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub mean_x: f64,
    pub mean_y: f64,
    pub std_x: f64,
    pub std_y: f64,
    pub corr_coef: f64,
}

impl SummaryStatistics {
    /// Labelled values in output order.
    pub fn labelled(&self) -> [(&'static str, f64); 5] {
        [
            ("Mean of X", self.mean_x),
            ("Mean of Y", self.mean_y),
            ("Standard Deviation of X", self.std_x),
            ("Standard Deviation of Y", self.std_y),
            ("Correlation Coefficient", self.corr_coef),
        ]
    }

    /// The user-facing report: one `Label: value` line per statistic, two decimals.
    pub fn report_lines(&self) -> Vec<String> {
        self.labelled()
            .iter()
            .map(|(label, value)| format!("{}: {:.2}", label, value))
            .collect()
    }

    /// As a plain tuple `(mean_x, mean_y, std_x, std_y, corr_coef)`.
    pub fn as_tuple(&self) -> (f64, f64, f64, f64, f64) {
        (self.mean_x, self.mean_y, self.std_x, self.std_y, self.corr_coef)
    }
}

/// Computes mean, population standard deviation and Pearson's r for `table`.
///
/// An empty table or a constant column is an error, since r is undefined there.
pub fn calculate_statistics(table: &SampleTable) -> Result<SummaryStatistics, AnalysisError> {
    let x = compute_stats(table.xs()).ok_or(AnalysisError::EmptyTable)?;
    let y = compute_stats(table.ys()).ok_or(AnalysisError::EmptyTable)?;

    if x.std_dev == 0.0 {
        return Err(AnalysisError::DegenerateColumn("x"));
    }
    if y.std_dev == 0.0 {
        return Err(AnalysisError::DegenerateColumn("y"));
    }

    let matrix = correlation_matrix(table.xs(), table.ys())
        .ok_or(AnalysisError::DegenerateColumn("x"))?;

    let stats = SummaryStatistics {
        mean_x: x.mean,
        mean_y: y.mean,
        std_x: x.std_dev,
        std_y: y.std_dev,
        corr_coef: matrix[0][1],
    };
    debug!("Computed statistics: {:?}", stats);
    Ok(stats)
}
