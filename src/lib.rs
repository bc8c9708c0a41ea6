//! # cacheprobe
//!
//! Empirically discover three physical characteristics of the CPU cache
//! hierarchy — set associativity, total capacity, and line size — purely by
//! timing memory walks under controlled access patterns. No hardware
//! descriptor, OS API, or configuration file is consulted.
//!
//! The instrument allocates a large page-aligned arena, embeds
//! pointer-chase chains in it (forward, randomly shuffled, or
//! lookbehind-augmented), times fixed-length walks over them, and infers
//! the hierarchy parameters from the shape of the latency curve:
//!
//! - [`find_rest_spots`] doubles the stride until the shuffled-pattern
//!   curve stops changing, locating the footprint of one cache way.
//! - [`find_jump`] scans the resulting schedule for the sustained latency
//!   step that marks the capacity boundary.
//! - [`find_cache_line_size`] sweeps the lookbehind pattern for the stride
//!   transition with the largest relative slowdown.
//!
//! Results are statistical estimates, not guaranteed-exact hardware
//! values; an undetected capacity boundary reports an associativity of 0.
//!
//! ## Quick Start
//!
//! ```no_run
//! use cacheprobe::{
//!     find_cache_line_size, find_jump, find_rest_spots, Config, Summary, TrialContext,
//! };
//!
//! let cfg = Config::default();
//! let mut ctx = TrialContext::new(&cfg);
//! let rest_spots = find_rest_spots(&mut ctx, &cfg);
//! let jump = find_jump(&mut ctx, &cfg, &rest_spots);
//! let line_stride = find_cache_line_size(&mut ctx, &cfg);
//! println!("{}", Summary::from_parts(&cfg, &rest_spots, jump, line_stride));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod arena;
pub mod config;
pub mod measurement;
pub mod pattern;
pub mod report;
pub mod rng;
pub mod statistics;

pub use analysis::{find_cache_line_size, find_jump, find_rest_spots};
pub use arena::Arena;
pub use config::Config;
pub use measurement::{measure, MeasurementSet, PatternSource, TrialContext};
pub use pattern::Pattern;
pub use report::Summary;
pub use rng::SequenceGenerator;
