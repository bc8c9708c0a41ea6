//! Capacity/associativity discovery via stride doubling.

use std::collections::BTreeSet;

use log::debug;

use crate::config::Config;
use crate::measurement::{measure, PatternSource};
use crate::pattern::Pattern;
use crate::statistics::cbrt_distance;

/// Next working-set size in the spots schedule.
///
/// Small footprints (`spots * stride <= step`) grow geometrically to cover
/// the low end quickly; past that the schedule grows by a fixed footprint
/// of `step` slots per entry, degrading to single-spot increments once the
/// stride alone exceeds `step`.
pub fn next_spots(step: u64, stride: u64, spots: u64) -> u64 {
    if spots * stride <= step {
        spots * 2
    } else if stride > step {
        spots + 1
    } else {
        spots + step / stride
    }
}

/// The spots schedule for `stride`: `1, next, ...` up to one step past the
/// discovery footprint cap.
pub fn make_spots(cfg: &Config, stride: u64) -> Vec<u64> {
    let max_spots = next_spots(cfg.growth_step, stride, cfg.max_discover_slots / stride);

    let mut schedule = Vec::new();
    let mut spots = 1;
    while spots <= max_spots {
        schedule.push(spots);
        spots = next_spots(cfg.growth_step, stride, spots);
    }
    schedule
}

/// Halved spots value, kept at least 1 so it stays a valid working set.
fn half_spots(spots: u64) -> u64 {
    (spots / 2).max(1)
}

/// Locate the stride at which the shuffled latency curve stops changing and
/// return the spots schedule rescaled to that stride.
///
/// Starting from the initial stride, the loop doubles the stride and
/// re-measures over the previous schedule plus each value halved. Two
/// summed cube-root distances compare the new curve to the previous one:
/// the "full" distance at identical spots values, and the "half" distance
/// against the halved values. While doubling still materially changes the
/// curve the full distance dominates; once it drops below the half
/// distance, the footprint of one node has reached the unit that defines a
/// cache way, so the schedule is scaled by `(stride / 2) / initial_stride`
/// and returned. Its first element is the baseline that converts a spots
/// count into an associativity.
pub fn find_rest_spots<S: PatternSource>(source: &mut S, cfg: &Config) -> Vec<u64> {
    let mut stride = cfg.initial_stride;
    let mut all_spots = make_spots(cfg, stride);
    let mut prev = measure(source, Pattern::Shuffled, stride, &all_spots, cfg.iterations);

    loop {
        stride *= 2;

        let candidates: Vec<u64> = all_spots
            .iter()
            .flat_map(|&spots| [spots, half_spots(spots)])
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let next = measure(source, Pattern::Shuffled, stride, &candidates, cfg.iterations);

        let mut full_distance = 0.0;
        let mut half_distance = 0.0;
        for &spots in &all_spots {
            let prev_total = prev.total(spots);
            full_distance += cbrt_distance(prev_total, next.total(spots));
            half_distance += cbrt_distance(prev_total, next.total(half_spots(spots)));
        }
        debug!("stride {stride}: full_distance={full_distance} half_distance={half_distance}");

        if full_distance < half_distance {
            let scale = stride / 2 / cfg.initial_stride;
            debug!("settled at stride {stride}, scaling schedule by {scale}");
            for spots in &mut all_spots {
                debug!(
                    "spots={spots} prev={:?} full={:?} half={:?}",
                    prev.total(*spots),
                    next.total(*spots),
                    next.total(half_spots(*spots)),
                );
                *spots *= scale;
            }
            return all_spots;
        }

        all_spots = make_spots(cfg, stride);
        prev = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: u64 = 512;

    #[test]
    fn test_next_spots_doubles_small_footprints() {
        assert_eq!(next_spots(STEP, 256, 1), 2);
        assert_eq!(next_spots(STEP, 2, 128), 256);
    }

    #[test]
    fn test_next_spots_increments_past_step_stride() {
        assert_eq!(next_spots(STEP, 1024, 10), 11);
    }

    #[test]
    fn test_next_spots_adds_fixed_footprint() {
        assert_eq!(next_spots(STEP, 64, 100), 108);
    }

    #[test]
    fn test_make_spots_is_increasing_and_starts_at_one() {
        let cfg = Config::default();
        for stride in [2u64, 64, 1024] {
            let schedule = make_spots(&cfg, stride);
            assert_eq!(schedule[0], 1, "stride {stride}");
            assert!(
                schedule.windows(2).all(|w| w[0] < w[1]),
                "stride {stride}: schedule must be strictly increasing"
            );
        }
    }

    #[test]
    fn test_make_spots_covers_discovery_footprint() {
        let cfg = Config::default();
        let schedule = make_spots(&cfg, 2);
        let last = *schedule.last().unwrap();
        assert!(last * 2 > cfg.max_discover_slots);
    }

    #[test]
    fn test_half_spots_floor_of_one() {
        assert_eq!(half_spots(1), 1);
        assert_eq!(half_spots(2), 1);
        assert_eq!(half_spots(9), 4);
    }
}
