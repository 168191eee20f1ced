//! Percentile and mean helpers.

/// Fraction used for the 95th percentile.
pub const P95: f64 = 0.95;

/// Compute the `fraction` percentile of `samples` (`0.0..=1.0`).
///
/// Uses linear interpolation between the closest ranks: with the samples
/// sorted ascending and `k = fraction * (n - 1)`, the result is
/// `sorted[floor(k)]` when `k` is integral, otherwise
/// `sorted[f] + (sorted[c] - sorted[f]) * (k - f)` for `f = floor(k)`,
/// `c = ceil(k)`.
///
/// Returns `None` for an empty slice or a fraction outside `[0, 1]`
/// (including NaN). NaN samples sort above every number.
///
/// # Example
///
/// ```
/// use regionstat::stats::{percentile, P95};
///
/// let p95 = percentile(&[10.0, 20.0, 30.0, 40.0, 50.0], P95).unwrap();
/// assert!((p95 - 48.0).abs() < 1e-9);
/// ```
pub fn percentile(samples: &[f64], fraction: f64) -> Option<f64> {
    if samples.is_empty() || !(0.0..=1.0).contains(&fraction) {
        return None;
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    let k = fraction * (sorted.len() - 1) as f64;
    let f = k.floor();
    let c = k.ceil();
    let lower = sorted[f as usize];

    if f == c {
        return Some(lower);
    }

    let upper = sorted[c as usize];
    Some(lower + (upper - lower) * (k - f))
}

/// Arithmetic mean, or `None` for an empty slice.
pub fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_p95_five_values() {
        let p95 = percentile(&[10.0, 20.0, 30.0, 40.0, 50.0], P95).unwrap();
        assert!(approx(p95, 48.0), "got {}", p95);
    }

    #[test]
    fn test_p95_two_values() {
        let p95 = percentile(&[100.0, 300.0], P95).unwrap();
        assert!(approx(p95, 290.0), "got {}", p95);
    }

    #[test]
    fn test_single_value_is_exact() {
        assert_eq!(percentile(&[42.5], P95), Some(42.5));
        assert_eq!(percentile(&[42.5], 0.0), Some(42.5));
    }

    #[test]
    fn test_unsorted_input() {
        let p95 = percentile(&[50.0, 10.0, 40.0, 20.0, 30.0], P95).unwrap();
        assert!(approx(p95, 48.0));
    }

    #[test]
    fn test_integral_rank_returns_sample() {
        // n = 21 -> k = 0.95 * 20 = 19
        let samples: Vec<f64> = (0..21).map(|i| i as f64 * 10.0).collect();
        let p95 = percentile(&samples, P95).unwrap();
        assert!(approx(p95, 190.0));
    }

    #[test]
    fn test_bounds() {
        let samples = [3.0, 1.0, 2.0];
        assert_eq!(percentile(&samples, 0.0), Some(1.0));
        assert_eq!(percentile(&samples, 1.0), Some(3.0));
        assert_eq!(percentile(&samples, 0.5), Some(2.0));
    }

    #[test]
    fn test_ties() {
        let p95 = percentile(&[7.0, 7.0, 7.0, 7.0], P95).unwrap();
        assert_eq!(p95, 7.0);
    }

    #[test]
    fn test_fraction_out_of_range() {
        let samples = [1.0, 2.0, 3.0];
        assert_eq!(percentile(&samples, 1.5), None);
        assert_eq!(percentile(&samples, -0.1), None);
        assert_eq!(percentile(&samples, f64::NAN), None);
    }

    #[test]
    fn test_nan_samples_sort_last() {
        let samples = [2.0, f64::NAN, 1.0];
        assert_eq!(percentile(&samples, 0.0), Some(1.0));
        assert_eq!(percentile(&samples, 0.5), Some(2.0));
        assert!(percentile(&samples, 1.0).unwrap().is_nan());
    }

    #[test]
    fn test_empty() {
        assert_eq!(percentile(&[], P95), None);
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[100.0, 200.0]), Some(150.0));
        assert_eq!(mean(&[99.0, 98.0]), Some(98.5));
    }
}
