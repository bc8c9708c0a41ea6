//! Statistical detection algorithms.
//!
//! Control flow of a full run: [`find_rest_spots`] locates the stride at
//! which doubling stops changing the latency curve and returns a rescaled
//! spots schedule; [`find_jump`] scans that schedule at the initial stride
//! for the sustained latency step marking the capacity boundary;
//! [`find_cache_line_size`] then sweeps the lookbehind pattern for the
//! stride transition with the largest relative speedup.

mod associativity;
mod jump;
mod line_size;

pub use associativity::{find_rest_spots, make_spots, next_spots};
pub use jump::{detect_jump, find_jump};
pub use line_size::{find_cache_line_size, pick_line_stride};
