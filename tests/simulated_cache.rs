//! End-to-end pipeline test against a modeled two-level cache.
//!
//! The model implements `PatternSource` with an analytic latency function
//! keyed by footprint and conflict pattern instead of real timed walks, so
//! the whole discovery pipeline runs deterministically: the recovered
//! associativity, capacity, and line size must match the model exactly.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use cacheprobe::{
    find_cache_line_size, find_jump, find_rest_spots, Config, Pattern, PatternSource, Summary,
};

const SLOT_BYTES: u64 = 8;

/// A set-associative cache with explicit hit and miss latencies.
///
/// Accesses whose cache set holds no more distinct lines than it has ways
/// hit; every line in an overloaded set misses, approximating LRU under a
/// randomized visiting order. The second level is the flat miss latency.
struct SimulatedCache {
    capacity_bytes: u64,
    ways: u64,
    line_bytes: u64,
    hit_ns: f64,
    miss_ns: f64,
    /// Latencies are deterministic per geometry, so repeated trials reuse
    /// the first computation.
    memo: HashMap<(Pattern, u64, u64), f64>,
}

impl SimulatedCache {
    fn new(capacity_bytes: u64, ways: u64, line_bytes: u64) -> Self {
        Self {
            capacity_bytes,
            ways,
            line_bytes,
            hit_ns: 1.0,
            miss_ns: 10.0,
            memo: HashMap::new(),
        }
    }

    fn sets(&self) -> u64 {
        self.capacity_bytes / (self.ways * self.line_bytes)
    }

    /// Mean per-access latency of the shuffled walk, which touches the
    /// shadow slot of each node once per cycle.
    fn shuffled_cost(&self, stride: u64, spots: u64) -> f64 {
        let sets = self.sets();

        let mut lines_per_set: HashMap<u64, HashSet<u64>> = HashMap::new();
        let mut node_lines = Vec::with_capacity(spots as usize);
        for i in 0..spots {
            let addr = (i * stride + stride / 2) * SLOT_BYTES;
            let line = addr / self.line_bytes;
            node_lines.push(line);
            lines_per_set.entry(line % sets).or_default().insert(line);
        }

        let total: f64 = node_lines
            .iter()
            .map(|line| {
                let load = lines_per_set[&(line % sets)].len() as u64;
                if load > self.ways {
                    self.miss_ns
                } else {
                    self.hit_ns
                }
            })
            .sum();
        total / spots as f64
    }

    /// Mean per-access latency of the lookbehind walk at a footprint far
    /// beyond capacity: anchors miss whenever they start a new line, and
    /// the lookbehind target hits only while it still shares its anchor's
    /// line.
    fn lookbehind_cost(&self, stride: u64) -> f64 {
        let anchor_bytes = (stride * SLOT_BYTES) as f64;
        let miss_fraction = (anchor_bytes / self.line_bytes as f64).min(1.0);
        let anchor = self.miss_ns * miss_fraction + self.hit_ns * (1.0 - miss_fraction);

        let target_offset_bytes = (stride / 2) * SLOT_BYTES;
        let target = if target_offset_bytes < self.line_bytes {
            self.hit_ns
        } else {
            self.miss_ns
        };

        (anchor + target) / 2.0
    }
}

impl PatternSource for SimulatedCache {
    fn reseed(&mut self, _seed: u64) {}

    fn time_pattern(&mut self, pattern: Pattern, stride: u64, spots: u64) -> Duration {
        let key = (pattern, stride, spots);
        let cost_ns = match self.memo.get(&key) {
            Some(&cost) => cost,
            None => {
                let cost = match pattern {
                    Pattern::Shuffled => self.shuffled_cost(stride, spots),
                    Pattern::Lookbehind => self.lookbehind_cost(stride),
                };
                self.memo.insert(key, cost);
                cost
            }
        };
        Duration::from_secs_f64(cost_ns * 1e-9 * 1024.0)
    }
}

#[test]
fn test_pipeline_recovers_modeled_cache_parameters() {
    // 32 KiB, 8-way, 64-byte lines
    let cfg = Config::default();
    let mut cache = SimulatedCache::new(32 * 1024, 8, 64);

    let rest_spots = find_rest_spots(&mut cache, &cfg);
    assert_eq!(
        rest_spots[0], 256,
        "baseline spots must equal half the way stride in slots"
    );

    let jump = find_jump(&mut cache, &cfg, &rest_spots);
    let line_stride = find_cache_line_size(&mut cache, &cfg);
    let summary = Summary::from_parts(&cfg, &rest_spots, jump, line_stride);

    assert_eq!(summary.associativity, 8);
    assert_eq!(summary.cache_size, 32 * 1024);
    assert_eq!(summary.cache_line_size, 64);
}

#[test]
fn test_pipeline_recovers_a_smaller_four_way_cache() {
    // 16 KiB, 4-way, 32-byte lines
    let cfg = Config::default();
    let mut cache = SimulatedCache::new(16 * 1024, 4, 32);

    let rest_spots = find_rest_spots(&mut cache, &cfg);
    let jump = find_jump(&mut cache, &cfg, &rest_spots);
    let line_stride = find_cache_line_size(&mut cache, &cfg);
    let summary = Summary::from_parts(&cfg, &rest_spots, jump, line_stride);

    assert_eq!(summary.associativity, 4);
    assert_eq!(summary.cache_size, 16 * 1024);
    assert_eq!(summary.cache_line_size, 32);
}

#[test]
fn test_flat_latency_reports_undetermined_associativity() {
    // A model with no latency structure at all: every walk costs the same,
    // so no jump qualifies and the summary degrades to the documented
    // sentinel values.
    struct FlatLatency;

    impl PatternSource for FlatLatency {
        fn reseed(&mut self, _seed: u64) {}
        fn time_pattern(&mut self, _pattern: Pattern, _stride: u64, _spots: u64) -> Duration {
            Duration::from_micros(5)
        }
    }

    let cfg = Config::default();
    let mut flat = FlatLatency;

    let search_spots: Vec<u64> = (1..=64).map(|i| i * 256).collect();
    let jump = find_jump(&mut flat, &cfg, &search_spots);
    assert_eq!(jump, 0, "a flat curve has no capacity boundary");

    let summary = Summary::from_parts(&cfg, &search_spots, jump, 8);
    assert_eq!(summary.associativity, 0);
    assert_eq!(summary.cache_size, 0);
}
