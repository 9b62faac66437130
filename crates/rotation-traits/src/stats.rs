//! Statistical helpers shared by the metrics code.

use ndarray::Array1;

/// Minimum threshold for standard deviation to avoid division by zero.
/// Values below this threshold are treated as zero variance.
pub const MIN_STD_THRESHOLD: f64 = 1e-10;

/// Finite values of `values`, in order.
pub fn finite(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|x| x.is_finite()).collect()
}

/// Sample standard deviation (N-1 denominator) of the finite values.
///
/// Returns `None` with fewer than two finite values. A deviation below
/// [`MIN_STD_THRESHOLD`] is reported as exactly zero so that constant series
/// are recognized despite floating-point noise in the mean.
///
/// # Examples
///
/// ```
/// use rotation_traits::stats::sample_std;
///
/// assert_eq!(sample_std(&[0.01; 12]), Some(0.0));
/// assert_eq!(sample_std(&[1.0]), None);
/// ```
pub fn sample_std(values: &[f64]) -> Option<f64> {
    let finite = Array1::from(finite(values));
    if finite.len() < 2 {
        return None;
    }

    let std = finite.std(1.0);
    if std < MIN_STD_THRESHOLD {
        Some(0.0)
    } else {
        Some(std)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sample_std_basic() {
        // Sample std of 1..=5 is sqrt(2.5)
        let std = sample_std(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_relative_eq!(std, 2.5_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_sample_std_constant_is_zero() {
        assert_eq!(sample_std(&[0.01; 12]), Some(0.0));
    }

    #[test]
    fn test_sample_std_too_short() {
        assert!(sample_std(&[0.5]).is_none());
        assert!(sample_std(&[0.5, f64::NAN]).is_none());
    }

    #[test]
    fn test_min_std_threshold() {
        assert!(MIN_STD_THRESHOLD > 0.0);
        assert!(MIN_STD_THRESHOLD < 1e-6);
    }
}
