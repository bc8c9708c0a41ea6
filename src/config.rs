//! Configuration for the measurement pipeline.

/// Width of one arena slot in bytes.
pub const SLOT_BYTES: u64 = std::mem::size_of::<u64>() as u64;

/// Tunable parameters for a probe run.
///
/// The defaults reproduce the empirically tuned values the instrument was
/// calibrated with. The detection thresholds in particular are not derived
/// from a documented hardware model, so callers validating against new
/// hardware should treat them as starting points rather than fixed truths.
#[derive(Debug, Clone)]
pub struct Config {
    /// Stride the discovery loop starts at and the jump scan runs at
    /// (default: 2 slots).
    pub initial_stride: u64,

    /// Slots in the test arena; bounds the largest working set ever walked
    /// (default: `1 << 24`, 128 MiB).
    pub arena_slots: usize,

    /// Slots in the clutter block read and mutated before every timed walk
    /// (default: `1 << 23`, 64 MiB).
    pub clutter_slots: usize,

    /// Pointer-chase steps per walk, for both the warm-up and the timed
    /// pass; independent of the working-set size (default: `1 << 20`).
    pub walk_ops: u64,

    /// Repeated trials per (stride, spots) configuration (default: 9).
    pub iterations: usize,

    /// Footprint cap, in slots, for the discovery spots schedule
    /// (default: `1 << 15`).
    pub max_discover_slots: u64,

    /// Footprint, in slots, below which the spots schedule grows
    /// geometrically rather than additively (default: `1 << 9`).
    pub growth_step: u64,

    /// Node-count distance between a lookbehind node and its write target
    /// (default: 16).
    pub lookbehind_offset: u64,

    /// Smallest stride swept by the line-size discoverer (default: 2).
    pub line_min_stride: u64,

    /// Largest stride swept by the line-size discoverer (default: 128).
    pub line_max_stride: u64,

    /// Minimum immediate latency ratio for a capacity jump (default: 1.045).
    pub jump_step_ratio: f64,

    /// Minimum smoothed-suffix latency ratio for a capacity jump
    /// (default: 1.12).
    pub jump_sustain_ratio: f64,

    /// Weight of the nearer element in the suffix smoothing fold
    /// (default: 0.5).
    pub smoothing_alpha: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_stride: 2,
            arena_slots: 1 << 24,
            clutter_slots: 1 << 23,
            walk_ops: 1 << 20,
            iterations: 9,
            max_discover_slots: 1 << 15,
            growth_step: 1 << 9,
            lookbehind_offset: 16,
            line_min_stride: 2,
            line_max_stride: 128,
            jump_step_ratio: 1.045,
            jump_sustain_ratio: 1.12,
            smoothing_alpha: 0.5,
        }
    }
}
