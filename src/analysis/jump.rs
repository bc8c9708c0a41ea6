//! Jump-point detection: where does the latency curve step up for good?

use log::debug;

use crate::config::Config;
use crate::measurement::{measure, PatternSource};
use crate::pattern::Pattern;
use crate::statistics::smooth_suffix;

/// Scan a latency curve for the capacity boundary.
///
/// `totals[i]` is the summed duration (in seconds) measured at
/// `search_spots[i]`. The boundary is the first position whose immediate
/// successor is at least `jump_step_ratio` slower *and* whose smoothed
/// suffix one position ahead is at least `jump_sustain_ratio` slower:
/// capacity overflow is a sustained regime change, and the second condition
/// is what filters transient one-point spikes. Returns the spots value at
/// the boundary, or 0 if no transition qualifies.
pub fn detect_jump(cfg: &Config, search_spots: &[u64], totals: &[f64]) -> u64 {
    debug_assert_eq!(search_spots.len(), totals.len());

    let smoothed = smooth_suffix(totals, cfg.smoothing_alpha);
    for i in 0..search_spots.len().saturating_sub(1) {
        let current = totals[i];
        if totals[i + 1] / current >= cfg.jump_step_ratio
            && smoothed[i + 1] / current >= cfg.jump_sustain_ratio
        {
            debug!("capacity boundary at spots={}", search_spots[i]);
            return search_spots[i];
        }
    }

    0
}

/// Measure the shuffled pattern over `search_spots` at the initial stride
/// and detect the capacity boundary.
///
/// Returns 0 when no qualifying transition exists; downstream arithmetic
/// then yields a degenerate associativity of 0, which callers should read
/// as "undetermined".
pub fn find_jump<S: PatternSource>(source: &mut S, cfg: &Config, search_spots: &[u64]) -> u64 {
    let measured = measure(
        source,
        Pattern::Shuffled,
        cfg.initial_stride,
        search_spots,
        cfg.iterations,
    );

    let totals: Vec<f64> = search_spots
        .iter()
        .map(|&spots| measured.total(spots).as_secs_f64())
        .collect();
    for (&spots, &total) in search_spots.iter().zip(&totals) {
        debug!("spots={spots} total={total}");
    }

    detect_jump(cfg, search_spots, &totals)
}
