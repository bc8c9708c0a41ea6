//! Small aggregation helpers shared by the detection algorithms.

use std::time::Duration;

/// Median by sort-and-middle-index.
///
/// Even-length inputs take the upper middle element (index `len / 2` of the
/// sorted order) rather than interpolating; with 9 trials per configuration
/// the input length is odd in practice.
///
/// # Panics
///
/// Panics if `samples` is empty.
pub fn median(samples: &[Duration]) -> Duration {
    assert!(!samples.is_empty(), "cannot take a median of no samples");
    let mut sorted = samples.to_vec();
    sorted.sort_unstable();
    sorted[sorted.len() / 2]
}

/// Sum of all samples.
pub fn total(samples: &[Duration]) -> Duration {
    samples.iter().sum()
}

/// Exponentially weighted suffix fold.
///
/// Folds from the end backward with `out[i] = values[i] * alpha +
/// out[i + 1] * (1 - alpha)`, so each position blends everything at or
/// after it. The jump detector uses this to distinguish a sustained latency
/// regime change from a one-point spike.
pub fn smooth_suffix(values: &[f64], alpha: f64) -> Vec<f64> {
    let mut smoothed = values.to_vec();
    for i in (1..smoothed.len()).rev() {
        smoothed[i - 1] = smoothed[i - 1] * alpha + smoothed[i] * (1.0 - alpha);
    }
    smoothed
}

/// Cube root of the absolute difference between two durations, in seconds.
///
/// The cube root compresses outlier differences while preserving ordering,
/// which keeps curve-distance comparisons robust to timing noise without a
/// variance model.
pub fn cbrt_distance(a: Duration, b: Duration) -> f64 {
    (a.as_secs_f64() - b.as_secs_f64()).abs().cbrt()
}
