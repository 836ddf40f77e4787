use libm::fabs;

/// Sums a slice with Neumaier's compensated summation.
///
/// Carries a running compensation term so that the low-order bits lost when
/// adding a small value to a large accumulator are recovered at the end.
pub fn compensated_sum(values: &[f64]) -> f64 {
    let mut sum = 0.0_f64;
    let mut compensation = 0.0_f64;

    for &value in values {
        let t = sum + value;
        if fabs(sum) >= fabs(value) {
            compensation += (sum - t) + value;
        } else {
            compensation += (value - t) + sum;
        }
        sum = t;
    }

    sum + compensation
}
