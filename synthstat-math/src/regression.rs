use crate::correlation::covariance;
use crate::statistics::mean;

/// Coefficients of a degree-1 least-squares polynomial `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Evaluates the fitted line at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Ordinary least-squares fit of a straight line through `(x[i], y[i])`.
///
/// Minimizes the sum of squared vertical residuals. The closed form is
/// `slope = cov(x, y) / var(x)` and `intercept = mean(y) - slope * mean(x)`.
///
/// Returns `None` for fewer than two points, mismatched lengths, or an `x`
/// column with zero variance (a vertical line has no finite slope).
pub fn linear_fit(x: &[f64], y: &[f64]) -> Option<LinearFit> {
    if x.len() < 2 || x.len() != y.len() {
        return None;
    }

    let var_x = covariance(x, x)?;
    if var_x <= 0.0 {
        return None;
    }
    let cov_xy = covariance(x, y)?;

    let slope = cov_xy / var_x;
    let intercept = mean(y)? - slope * mean(x)?;

    Some(LinearFit { slope, intercept })
}
