//! Core data structures produced by the generator and consumed by every other stage.
//!
//! Both containers are immutable once built; their checked constructors are the
//! only way to obtain one, so a matrix always matches its shape and a table's
//! columns always line up.
//!
//! License: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::errors::AnalysisError;

/// A dense `rows × cols` grid of values, stored row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomMatrix {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl RandomMatrix {
    /// Builds a matrix from a row-major buffer.
    ///
    /// Fails when either dimension is zero or the buffer length is not `rows * cols`.
    pub fn from_shape_vec(rows: usize, cols: usize, values: Vec<f64>) -> Result<Self, AnalysisError> {
        if rows == 0 || cols == 0 || rows.checked_mul(cols) != Some(values.len()) {
            return Err(AnalysisError::InvalidShape { rows, cols, len: values.len() });
        }
        Ok(Self { rows, cols, values })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// One row as a slice.
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row < self.rows {
            let start = row * self.cols;
            Some(&self.values[start..start + self.cols])
        } else {
            None
        }
    }

    /// All values in row-major order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Smallest and largest value; the matrix is never empty.
    pub fn value_range(&self) -> (f64, f64) {
        self.values.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
    }
}

/// One record of the sample table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

/// An ordered collection of paired `(x, y)` samples, held column-wise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleTable {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl SampleTable {
    /// Builds a table from two columns of equal length.
    pub fn from_columns(x: Vec<f64>, y: Vec<f64>) -> Result<Self, AnalysisError> {
        if x.len() != y.len() {
            return Err(AnalysisError::MismatchedColumns { x_len: x.len(), y_len: y.len() });
        }
        Ok(Self { x, y })
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// The `x` column.
    pub fn xs(&self) -> &[f64] {
        &self.x
    }

    /// The `y` column.
    pub fn ys(&self) -> &[f64] {
        &self.y
    }

    /// Iterates over the records in order.
    pub fn iter(&self) -> impl Iterator<Item = Sample> + '_ {
        self.x.iter().zip(self.y.iter()).map(|(&x, &y)| Sample { x, y })
    }
}
