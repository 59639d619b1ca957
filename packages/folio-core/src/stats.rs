//! Statistics primitives over numeric series.
//!
//! All estimators use the unbiased (n - 1) convention. Functions never fail:
//! degenerate input (too short, zero dispersion) yields 0.

/// Keep a computed value only if it is finite.
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Arithmetic mean. Returns 0 for an empty series.
///
/// # Example
///
/// ```rust
/// use folio_core::stats::mean;
///
/// assert_eq!(mean(&[]), 0.0);
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
/// ```
pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    finite_or_zero(xs.iter().sum::<f64>() / xs.len() as f64)
}

/// Sample variance (divides by n - 1). Returns 0 when n < 2.
pub fn variance(xs: &[f64]) -> f64 {
    let n = xs.len();
    if n < 2 {
        return 0.0;
    }

    let m = mean(xs);
    let sum_sq: f64 = xs.iter().map(|x| (x - m).powi(2)).sum();
    finite_or_zero(sum_sq / (n - 1) as f64)
}

/// Sample standard deviation. Returns 0 when n < 2.
pub fn std(xs: &[f64]) -> f64 {
    finite_or_zero(variance(xs).sqrt())
}

/// Align two series on their trailing `min(len(a), len(b))` elements.
///
/// The unmatched prefix of the longer series is dropped, so a shorter
/// history is compared against the most recent part of a longer one.
pub fn trailing_aligned<'a>(a: &'a [f64], b: &'a [f64]) -> (&'a [f64], &'a [f64]) {
    let n = a.len().min(b.len());
    (&a[a.len() - n..], &b[b.len() - n..])
}

/// Sample covariance over the trailing-aligned window of `a` and `b`.
///
/// Returns 0 if the aligned window has fewer than two points.
///
/// ```rust
/// use folio_core::stats::covariance;
///
/// let long = [1.0, 2.0, 3.0, 4.0];
/// let short = [10.0, 20.0];
/// assert_eq!(covariance(&long, &short), covariance(&[3.0, 4.0], &short));
/// ```
pub fn covariance(a: &[f64], b: &[f64]) -> f64 {
    let (a, b) = trailing_aligned(a, b);
    let n = a.len();
    if n < 2 {
        return 0.0;
    }

    let mean_a = mean(a);
    let mean_b = mean(b);
    let sum: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| (x - mean_a) * (y - mean_b))
        .sum();

    finite_or_zero(sum / (n - 1) as f64)
}

/// Pearson correlation over the trailing-aligned window of `a` and `b`.
///
/// Returns 0 if either aligned series has zero standard deviation.
pub fn correlation(a: &[f64], b: &[f64]) -> f64 {
    let (a_aligned, b_aligned) = trailing_aligned(a, b);
    let std_a = std(a_aligned);
    let std_b = std(b_aligned);

    if std_a == 0.0 || std_b == 0.0 {
        return 0.0;
    }

    finite_or_zero(covariance(a_aligned, b_aligned) / (std_a * std_b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[4.0]), 4.0);
        assert_relative_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), 2.5);
    }

    #[test]
    fn test_std_short_series() {
        assert_eq!(std(&[]), 0.0);
        assert_eq!(std(&[42.0]), 0.0);
    }

    #[test]
    fn test_std_sample_convention() {
        // Sample variance of 2,4,4,4,5,5,7,9 is 32/7
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(variance(&xs), 32.0 / 7.0, epsilon = 1e-12);
        assert_relative_eq!(std(&xs), (32.0_f64 / 7.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_trailing_alignment() {
        let (a, b) = trailing_aligned(&[1.0, 2.0, 3.0, 4.0], &[10.0, 20.0]);
        assert_eq!(a, &[3.0, 4.0]);
        assert_eq!(b, &[10.0, 20.0]);

        let (a, b) = trailing_aligned(&[], &[1.0]);
        assert!(a.is_empty());
        assert!(b.is_empty());
    }

    #[test]
    fn test_covariance_uses_trailing_window() {
        let cov = covariance(&[1.0, 2.0, 3.0, 4.0], &[10.0, 20.0]);
        assert_eq!(cov, covariance(&[3.0, 4.0], &[10.0, 20.0]));
        // (3-3.5)(10-15) + (4-3.5)(20-15) = 5, over n-1 = 1
        assert_relative_eq!(cov, 5.0);
    }

    #[test]
    fn test_covariance_short_window() {
        assert_eq!(covariance(&[1.0, 2.0, 3.0], &[5.0]), 0.0);
        assert_eq!(covariance(&[], &[]), 0.0);
    }

    #[test]
    fn test_correlation_self_is_one() {
        let a = [1.0, 3.0, 2.0, 5.0, 4.0];
        assert_relative_eq!(correlation(&a, &a), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_correlation_linear_relationships() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let up: Vec<f64> = a.iter().map(|x| 3.0 * x + 7.0).collect();
        let down: Vec<f64> = a.iter().map(|x| -2.0 * x + 1.0).collect();

        assert_relative_eq!(correlation(&a, &up), 1.0, epsilon = 1e-12);
        assert_relative_eq!(correlation(&a, &down), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_correlation_bounded() {
        let a = [0.01, -0.02, 0.015, 0.003, -0.007, 0.02];
        let b = [0.02, -0.01, 0.01, -0.004, 0.001, 0.012];
        let corr = correlation(&a, &b);
        assert!((-1.0..=1.0).contains(&corr));
    }

    #[test]
    fn test_correlation_constant_series() {
        assert_eq!(correlation(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]), 0.0);
        assert_eq!(correlation(&[], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_non_finite_input_collapses_to_zero() {
        assert_eq!(mean(&[1.0, f64::NAN]), 0.0);
        assert_eq!(std(&[1.0, f64::INFINITY, 2.0]), 0.0);
        assert_eq!(correlation(&[1.0, f64::NAN, 3.0], &[1.0, 2.0, 3.0]), 0.0);
    }
}
