// synthstat-math/src/lib.rs
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod summation;
pub mod statistics;
pub mod correlation;
pub mod regression;

/// Common type definitions
pub type Scalar = f64;

pub use correlation::{correlation_matrix, covariance, pearson, CorrelationMatrix};
pub use regression::{linear_fit, LinearFit};
pub use statistics::{compute_stats, mean, population_std_dev, population_variance, ColumnStats};
pub use summation::compensated_sum;
