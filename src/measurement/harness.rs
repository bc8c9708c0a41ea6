//! Trial context and timing harness.

use std::hint::black_box;
use std::time::{Duration, Instant};

use crate::arena::Arena;
use crate::config::Config;
use crate::pattern::{self, Pattern};
use crate::rng::SequenceGenerator;

use super::PatternSource;

/// Everything one sequence of trials mutates: the test arena, the clutter
/// block, and the sequence generator.
///
/// Constructed once per run and passed to every measurement, so the sharing
/// and lifetime rules are explicit. Trials distributed across threads would
/// each need their own context; sharing one would corrupt both the access
/// pattern and reproducibility.
pub struct TrialContext {
    arena: Arena,
    clutter: Arena,
    rng: SequenceGenerator,
    walk_ops: u64,
    lookbehind_offset: u64,
}

impl TrialContext {
    /// Allocate the arenas and set up a context for `cfg`.
    ///
    /// Aborts the process if either allocation fails; a diagnostic
    /// instrument has no fallback footprint worth testing.
    pub fn new(cfg: &Config) -> Self {
        Self {
            arena: Arena::new(cfg.arena_slots),
            clutter: Arena::new(cfg.clutter_slots),
            rng: SequenceGenerator::new(0),
            walk_ops: cfg.walk_ops,
            lookbehind_offset: cfg.lookbehind_offset,
        }
    }

    /// Read and flip every clutter slot, evicting unrelated cache state the
    /// same way before every trial.
    fn disturb_clutter(&mut self) -> u64 {
        let mut sum = 0u64;
        for slot in self.clutter.iter_mut() {
            sum = sum.wrapping_add(*slot);
            *slot ^= 1;
        }
        sum
    }

    /// Chase links for `steps` steps from `index`, accumulating the visited
    /// values so the reads stay observable.
    #[inline(never)]
    fn chase(&self, mut index: usize, steps: u64) -> u64 {
        let mut sum = 0u64;
        for _ in 0..steps {
            let next = self.arena[index];
            sum = sum.wrapping_add(next);
            index = next as usize;
        }
        sum
    }

    /// Time one walk over the currently built chain.
    ///
    /// Order matters: the clutter pass evicts cross-trial cache state, the
    /// untimed chase brings the pattern to steady state, and only then does
    /// the clock run. Both chases execute the same fixed number of steps
    /// regardless of the working-set size. The accumulated sums are fed to
    /// [`black_box`] so the compiler cannot prove the reads unobservable.
    pub fn time_walk(&mut self, start: usize) -> Duration {
        let mut sum = self.disturb_clutter();
        sum = sum.wrapping_add(self.chase(0, self.walk_ops));

        let clock = Instant::now();
        let timed = black_box(self.chase(start, self.walk_ops));
        let elapsed = clock.elapsed();

        black_box(sum.wrapping_add(timed));
        elapsed
    }
}

impl PatternSource for TrialContext {
    fn reseed(&mut self, seed: u64) {
        self.rng.reseed(seed);
    }

    fn time_pattern(&mut self, pattern: Pattern, stride: u64, spots: u64) -> Duration {
        let start = match pattern {
            Pattern::Shuffled => {
                pattern::build_shuffled(&mut self.arena, &mut self.rng, stride, spots)
            }
            Pattern::Lookbehind => pattern::build_lookbehind_chain(
                &mut self.arena,
                stride,
                spots,
                self.lookbehind_offset,
            ),
        };
        self.time_walk(start)
    }
}
