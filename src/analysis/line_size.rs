//! Cache-line size discovery via the lookbehind pattern.

use std::time::Duration;

use log::debug;

use crate::config::Config;
use crate::measurement::{measure, PatternSource};
use crate::pattern::Pattern;

/// Pick the line-size stride from per-stride median durations.
///
/// `medians[i]` corresponds to stride `min_stride << i`. Walking the
/// stride-to-stride ratios, the largest relative slowdown marks the stride
/// at which the read and its lookbehind write stop sharing a line, so half
/// of that stride is the line size in slots. Ties go to the later stride.
/// Returns 1 when no ratio reaches the initial threshold of 1.0.
pub fn pick_line_stride(min_stride: u64, medians: &[Duration]) -> u64 {
    let mut line_stride = 1;
    let mut max_speedup = 1.0;

    for i in 1..medians.len() {
        let stride = min_stride << i;
        let speedup = medians[i].as_secs_f64() / medians[i - 1].as_secs_f64();
        if speedup >= max_speedup {
            max_speedup = speedup;
            line_stride = stride / 2;
        }
    }

    line_stride
}

/// Sweep the lookbehind pattern over doubling strides and return the
/// estimated cache-line size in slots.
///
/// Every sweep fills the whole arena (`spots = arena_slots / stride`), far
/// past any cache level's capacity, so each access misses to the slowest
/// level and line-size effects dominate the medians.
pub fn find_cache_line_size<S: PatternSource>(source: &mut S, cfg: &Config) -> u64 {
    let mut medians = Vec::new();

    let mut stride = cfg.line_min_stride;
    while stride <= cfg.line_max_stride {
        let spots = cfg.arena_slots as u64 / stride;
        let measured = measure(source, Pattern::Lookbehind, stride, &[spots], cfg.iterations);
        let result = measured.median(spots);
        debug!("stride={stride} median={result:?}");
        medians.push(result);
        stride *= 2;
    }

    pick_line_stride(cfg.line_min_stride, &medians)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn micros(values: &[u64]) -> Vec<Duration> {
        values.iter().map(|&v| Duration::from_micros(v)).collect()
    }

    #[test]
    fn test_largest_ratio_locates_line_stride() {
        // strides 2, 4, 8, 16, 32; the 4x step sits between 8 and 16
        let medians = micros(&[10, 10, 10, 40, 40]);
        assert_eq!(pick_line_stride(2, &medians), 8);
    }

    #[test]
    fn test_ties_resolve_to_later_stride() {
        // equal 2x steps at 4->8 and 16->32
        let medians = micros(&[10, 10, 20, 20, 40]);
        assert_eq!(pick_line_stride(2, &medians), 16);
    }

    #[test]
    fn test_monotone_decreasing_medians_return_one() {
        let medians = micros(&[40, 30, 20, 10]);
        assert_eq!(pick_line_stride(2, &medians), 1);
    }
}
