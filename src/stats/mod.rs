//! Descriptive statistics and hypothesis testing.

pub mod hypothesis;

pub use hypothesis::{ttest_one_sample, ttest_paired, TTestResult};

/// Arithmetic mean. NaN for an empty slice.
#[must_use]
pub fn mean(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / data.len() as f64
}

/// Sample standard deviation with Bessel's correction (n - 1).
///
/// NaN for fewer than two observations.
#[must_use]
pub fn sample_std(data: &[f64]) -> f64 {
    let n = data.len();
    let m = mean(data);
    let variance = data.iter().map(|&x| (x - m).powi(2)).sum::<f64>() / (n as f64 - 1.0);
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_basic() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert_eq!(mean(&[5.0]), 5.0);
    }

    #[test]
    fn test_mean_empty_is_nan() {
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn test_sample_std_known_value() {
        // Variance of [2, 4, 4, 4, 5, 5, 7, 9] with n-1 is 32/7.
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((sample_std(&data) - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_sample_std_constant_is_zero() {
        assert_eq!(sample_std(&[3.0, 3.0, 3.0]), 0.0);
    }

    #[test]
    fn test_sample_std_single_is_nan() {
        assert!(sample_std(&[1.0]).is_nan());
    }
}
