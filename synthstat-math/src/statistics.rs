use libm::sqrt;

use crate::summation::compensated_sum;

/// Mean and spread of a single column of samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    /// The arithmetic mean of the column.
    pub mean: f64,
    /// The population standard deviation (divides by N, not N - 1).
    pub std_dev: f64,
}

/// Arithmetic mean of `values`, or `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(compensated_sum(values) / values.len() as f64)
}

/// Population variance: the average squared deviation from the mean.
pub fn population_variance(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    let len = values.len() as f64;

    let sum_sq = values
        .iter()
        .map(|value| {
            let diff = value - mean;
            diff * diff
        })
        .fold(0.0_f64, |acc, sq| acc + sq);

    Some(sum_sq / len)
}

/// Population standard deviation, the square root of [`population_variance`].
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    population_variance(values).map(sqrt)
}

/// Calculates mean and population standard deviation for a slice of values.
///
/// Returns `None` when the slice is empty, since neither quantity is defined.
pub fn compute_stats(values: &[f64]) -> Option<ColumnStats> {
    let mean = mean(values)?;
    let std_dev = population_std_dev(values)?;
    Some(ColumnStats { mean, std_dev })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn unit_vec(min_len: usize, max_len: usize) -> impl Strategy<Value = std::vec::Vec<f64>> {
        proptest::collection::vec(0.0_f64..1.0, min_len..=max_len)
    }

    proptest! {
        #[test]
        fn std_dev_is_non_negative_and_finite(data in unit_vec(1, 200)) {
            let sd = population_std_dev(&data).unwrap();
            prop_assert!(sd >= 0.0);
            prop_assert!(sd.is_finite());
        }

        #[test]
        fn mean_stays_inside_the_sample_range(data in unit_vec(1, 200)) {
            let m = mean(&data).unwrap();
            let lo = data.iter().cloned().fold(f64::INFINITY, f64::min);
            let hi = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(m >= lo - 1e-12 && m <= hi + 1e-12);
        }
    }
}
