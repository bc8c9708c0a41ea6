//! Trial aggregation across working-set sizes.

use std::collections::BTreeMap;
use std::time::Duration;

use log::{debug, info};

use crate::pattern::Pattern;
use crate::statistics;

use super::PatternSource;

/// Duration samples keyed by spots count, in trial order.
///
/// Keys are exactly the spots values passed to the trial batch that built
/// the set; each key's list holds one sample per iteration, appended in
/// trial order.
#[derive(Debug, Clone, Default)]
pub struct MeasurementSet {
    samples: BTreeMap<u64, Vec<Duration>>,
}

impl MeasurementSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one sample for `spots`.
    pub fn push(&mut self, spots: u64, sample: Duration) {
        self.samples.entry(spots).or_default().push(sample);
    }

    /// All samples recorded for `spots`, empty if none were.
    pub fn samples(&self, spots: u64) -> &[Duration] {
        self.samples.get(&spots).map_or(&[], Vec::as_slice)
    }

    /// Summed duration across all trials at `spots`.
    pub fn total(&self, spots: u64) -> Duration {
        statistics::total(self.samples(spots))
    }

    /// Median duration across all trials at `spots`.
    ///
    /// # Panics
    ///
    /// Panics if no samples were recorded for `spots`.
    pub fn median(&self, spots: u64) -> Duration {
        statistics::median(self.samples(spots))
    }

    /// Spots values present, in ascending order.
    pub fn spots(&self) -> impl Iterator<Item = u64> + '_ {
        self.samples.keys().copied()
    }

    /// Number of distinct spots values.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no samples have been recorded.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Collect `iterations` duration samples for every spots value.
///
/// Before each trial the source is reseeded as `spots + iteration`, making
/// every rebuilt pattern reproducible per configuration yet distinct across
/// repeated trials. Progress goes to the log; it has no semantic role.
pub fn measure<S: PatternSource + ?Sized>(
    source: &mut S,
    pattern: Pattern,
    stride: u64,
    all_spots: &[u64],
    iterations: usize,
) -> MeasurementSet {
    let mut results = MeasurementSet::new();

    for iteration in 0..iterations {
        info!(
            "stride {stride}: iteration {} of {iterations}",
            iteration + 1
        );
        for &spots in all_spots {
            source.reseed(spots + iteration as u64);
            let sample = source.time_pattern(pattern, stride, spots);
            debug!("  spots={spots} sample={sample:?}");
            results.push(spots, sample);
        }
    }

    results
}
