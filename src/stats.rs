// 📊 Summary Statistics - Percentiles and confidence intervals
// Computed empirically from raw simulation vectors, never from a fitted
// distribution

use serde::{Deserialize, Serialize};

// ============================================================================
// METRIC SUMMARY
// ============================================================================

/// Descriptive statistics for one simulated metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub std_dev: f64,
    /// Empirical percentile at alpha/2
    pub ci_lower: f64,
    /// Empirical percentile at 1 - alpha/2
    pub ci_upper: f64,
}

impl MetricSummary {
    /// Ratio between the upper and lower confidence bounds
    ///
    /// Used to judge whether a distribution is in a realistic regime (a ~3x
    /// spread) rather than an implausibly wide one (10x and beyond). `None`
    /// when the lower bound is not positive.
    pub fn range_factor(&self) -> Option<f64> {
        if self.ci_lower > 0.0 {
            Some(self.ci_upper / self.ci_lower)
        } else {
            None
        }
    }
}

/// Summarize a vector of finite samples at the given confidence level
///
/// Returns `None` for an empty slice. Callers filter non-finite values first;
/// this function assumes every input is finite.
pub fn summarize(values: &[f64], confidence_level: f64) -> Option<MetricSummary> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len() as f64;
    let mean = sorted.iter().sum::<f64>() / n;

    let std_dev = if sorted.len() > 1 {
        let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        variance.sqrt()
    } else {
        0.0
    };

    let alpha = 1.0 - confidence_level;
    Some(MetricSummary {
        mean,
        median: percentile_sorted(&sorted, 50.0),
        std_dev,
        ci_lower: percentile_sorted(&sorted, alpha / 2.0 * 100.0),
        ci_upper: percentile_sorted(&sorted, (1.0 - alpha / 2.0) * 100.0),
    })
}

/// Empirical percentile of an ascending-sorted slice, with linear
/// interpolation between the two nearest ranks
pub fn percentile_sorted(sorted: &[f64], pct: f64) -> f64 {
    assert!(!sorted.is_empty(), "percentile of empty slice");
    if sorted.len() == 1 {
        return sorted[0];
    }

    let rank = pct.clamp(0.0, 100.0) / 100.0 * (sorted.len() - 1) as f64;
    let below = rank.floor() as usize;
    let above = rank.ceil() as usize;
    if below == above {
        return sorted[below];
    }
    let weight = rank - below as f64;
    sorted[below] * (1.0 - weight) + sorted[above] * weight
}

/// Fraction of values satisfying a predicate, measured against an explicit
/// denominator (usually the full iteration count, not just the finite rows)
pub fn probability<F: Fn(f64) -> bool>(values: &[f64], total: usize, pred: F) -> f64 {
    if total == 0 {
        return 0.0;
    }
    values.iter().filter(|&&v| pred(v)).count() as f64 / total as f64
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_interpolates() {
        let sorted = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(percentile_sorted(&sorted, 0.0), 10.0);
        assert_eq!(percentile_sorted(&sorted, 100.0), 40.0);
        assert_eq!(percentile_sorted(&sorted, 50.0), 25.0);
        // Rank 2.85 -> between 30 and 40
        assert!((percentile_sorted(&sorted, 95.0) - 38.5).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_basic() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let summary = summarize(&values, 0.95).unwrap();

        assert!((summary.mean - 5.0).abs() < 1e-9);
        assert!((summary.median - 4.5).abs() < 1e-9);
        // Sample std dev of this classic set is ~2.138
        assert!((summary.std_dev - 2.1380899).abs() < 1e-6);
    }

    #[test]
    fn test_ci_brackets_median() {
        // The ordering invariant must hold for any sample size, including 1
        for n in [1usize, 2, 3, 10, 1000] {
            let values: Vec<f64> = (0..n).map(|i| (i * 7 % 13) as f64).collect();
            let s = summarize(&values, 0.95).unwrap();
            assert!(s.ci_lower <= s.median, "n={}: lower > median", n);
            assert!(s.median <= s.ci_upper, "n={}: median > upper", n);
        }
        println!("✅ CI ordering invariant test passed");
    }

    #[test]
    fn test_summarize_empty_is_none() {
        assert!(summarize(&[], 0.95).is_none());
    }

    #[test]
    fn test_single_sample() {
        let s = summarize(&[42.0], 0.95).unwrap();
        assert_eq!(s.mean, 42.0);
        assert_eq!(s.median, 42.0);
        assert_eq!(s.std_dev, 0.0);
        assert_eq!(s.ci_lower, 42.0);
        assert_eq!(s.ci_upper, 42.0);
    }

    #[test]
    fn test_probability_uses_full_denominator() {
        let values = [1.0, 2.0, -1.0];
        // 2 of 4 iterations positive: one row was dropped before this call
        assert_eq!(probability(&values, 4, |v| v > 0.0), 0.5);
        assert_eq!(probability(&[], 0, |v| v > 0.0), 0.0);
    }

    #[test]
    fn test_range_factor() {
        let s = MetricSummary {
            mean: 2.0,
            median: 2.0,
            std_dev: 0.5,
            ci_lower: 1.0,
            ci_upper: 3.0,
        };
        assert_eq!(s.range_factor(), Some(3.0));

        let negative_lower = MetricSummary { ci_lower: -1.0, ..s };
        assert_eq!(negative_lower.range_factor(), None);
    }
}
