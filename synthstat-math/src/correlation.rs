use libm::sqrt;

use crate::statistics::mean;

/// A symmetric 2×2 correlation matrix for a pair of columns.
///
/// Row and column 0 refer to `x`, row and column 1 to `y`.
pub type CorrelationMatrix = [[f64; 2]; 2];

/// Population covariance of two equally sized columns.
///
/// Returns `None` when the columns are empty or their lengths differ.
pub fn covariance(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() {
        return None;
    }
    let mean_x = mean(x)?;
    let mean_y = mean(y)?;

    let sum = x
        .iter()
        .zip(y.iter())
        .map(|(xi, yi)| (xi - mean_x) * (yi - mean_y))
        .fold(0.0_f64, |acc, p| acc + p);

    Some(sum / x.len() as f64)
}

/// Builds the normalized 2×2 correlation matrix of `x` and `y`.
///
/// Each entry is `cov(a, b) / sqrt(var(a) * var(b))`. Off-diagonal entries are
/// clipped to [-1, 1] to absorb rounding. Returns `None` if either column has
/// zero variance, since the normalization is undefined.
pub fn correlation_matrix(x: &[f64], y: &[f64]) -> Option<CorrelationMatrix> {
    let var_x = covariance(x, x)?;
    let var_y = covariance(y, y)?;
    let cov_xy = covariance(x, y)?;

    if var_x <= 0.0 || var_y <= 0.0 {
        return None;
    }

    let r = (cov_xy / sqrt(var_x * var_y)).clamp(-1.0, 1.0);
    Some([[1.0, r], [r, 1.0]])
}

/// Pearson's r, read from the off-diagonal of [`correlation_matrix`].
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    correlation_matrix(x, y).map(|m| m[0][1])
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_perfect_positive_line() {
        let x = [0.0, 0.25, 0.5, 0.75, 1.0];
        let y = [1.0, 1.5, 2.0, 2.5, 3.0];
        let r = pearson(&x, &y).unwrap();
        assert!((r - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_perfect_negative_line() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [8.0, 6.0, 4.0, 2.0];
        let r = pearson(&x, &y).unwrap();
        assert!((r + 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_matrix_is_symmetric_with_unit_diagonal() {
        let x = [0.1, 0.7, 0.3, 0.9, 0.5];
        let y = [2.0, 1.0, 4.0, 3.0, 5.0];
        let m = correlation_matrix(&x, &y).unwrap();
        assert_eq!(m[0][0], 1.0);
        assert_eq!(m[1][1], 1.0);
        assert_eq!(m[0][1], m[1][0]);
    }

    #[test]
    fn test_constant_column_has_no_correlation() {
        let x = [3.0, 3.0, 3.0];
        let y = [1.0, 2.0, 3.0];
        assert!(pearson(&x, &y).is_none());
    }

    #[test]
    fn test_mismatched_lengths() {
        assert!(covariance(&[1.0, 2.0], &[1.0]).is_none());
        assert!(pearson(&[1.0, 2.0], &[1.0]).is_none());
    }

    #[test]
    fn test_covariance_population_convention() {
        // cov = mean((x - 2) * (y - 4)) = (2 + 0 + 2) / 3
        let x = [1.0, 2.0, 3.0];
        let y = [2.0, 4.0, 6.0];
        let c = covariance(&x, &y).unwrap();
        assert!((c - 4.0 / 3.0).abs() < EPSILON);
    }
}
