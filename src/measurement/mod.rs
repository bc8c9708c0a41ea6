//! Measurement infrastructure.
//!
//! This module provides:
//! - The trial context owning the arenas and sequence generator
//! - The timing harness isolating a timed walk from warm-up and
//!   cross-trial cache state
//! - The trial aggregator producing duration distributions per
//!   working-set size
//!
//! The detection algorithms talk to hardware only through the
//! [`PatternSource`] trait, so tests can substitute a modeled cache for the
//! real one.

mod harness;
mod trials;

pub use harness::TrialContext;
pub use trials::{measure, MeasurementSet};

use std::time::Duration;

use crate::pattern::Pattern;

/// Anything that can build an access pattern and time one walk over it.
///
/// The hardware implementation is [`TrialContext`]; integration tests use
/// an analytic cache model. Implementations are driven strictly
/// sequentially and must not be shared across concurrent trials.
pub trait PatternSource {
    /// Reset the deterministic sequence generator driving pattern
    /// construction.
    fn reseed(&mut self, seed: u64);

    /// Build `pattern` for the given geometry and return the elapsed
    /// duration of one timed walk over it.
    fn time_pattern(&mut self, pattern: Pattern, stride: u64, spots: u64) -> Duration;
}
