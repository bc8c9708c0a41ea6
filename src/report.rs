//! Final summary arithmetic and formatting.

use std::fmt;

use crate::config::{Config, SLOT_BYTES};

/// The discovered cache parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Number of ways per cache set; 0 means the capacity boundary was
    /// undetermined.
    pub associativity: u64,
    /// Cache capacity in bytes.
    pub cache_size: u64,
    /// Cache-line size in bytes.
    pub cache_line_size: u64,
}

impl Summary {
    /// Combine the pipeline outputs into the final parameters.
    ///
    /// The first element of the rescaled spots schedule is the footprint of
    /// one way, so the boundary divided by it is the associativity; the
    /// boundary itself, times the initial stride and slot width, is the
    /// capacity in bytes.
    ///
    /// # Panics
    ///
    /// Panics if `rest_spots` is empty.
    pub fn from_parts(cfg: &Config, rest_spots: &[u64], jump: u64, line_stride: u64) -> Self {
        assert!(!rest_spots.is_empty(), "spots schedule cannot be empty");
        Self {
            associativity: jump / rest_spots[0],
            cache_size: jump * cfg.initial_stride * SLOT_BYTES,
            cache_line_size: line_stride * SLOT_BYTES,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "associativity={} cache_size={} cache_line_size={}",
            self.associativity, self.cache_size, self.cache_line_size
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_arithmetic() {
        let cfg = Config::default();
        let summary = Summary::from_parts(&cfg, &[256, 512, 768], 2048, 8);
        assert_eq!(summary.associativity, 8);
        assert_eq!(summary.cache_size, 2048 * 2 * 8);
        assert_eq!(summary.cache_line_size, 64);
    }

    #[test]
    fn test_undetermined_jump_degenerates_to_zero() {
        let cfg = Config::default();
        let summary = Summary::from_parts(&cfg, &[256], 0, 8);
        assert_eq!(summary.associativity, 0);
        assert_eq!(summary.cache_size, 0);
    }

    #[test]
    fn test_display_format() {
        let summary = Summary {
            associativity: 8,
            cache_size: 32768,
            cache_line_size: 64,
        };
        assert_eq!(
            summary.to_string(),
            "associativity=8 cache_size=32768 cache_line_size=64"
        );
    }
}
