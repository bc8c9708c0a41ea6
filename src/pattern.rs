//! Chain construction inside the arena.
//!
//! A chain is a layout imposed on arena slots: each live slot holds the
//! *index* of the next slot to visit, so a walk is `index = slots[index]`
//! repeated. Index-valued links touch exactly the same physical offsets a
//! pointer-valued chain would, without any address-as-integer aliasing.
//!
//! Builders are free functions over `&mut [u64]` so the structural
//! properties (cycle coverage, permutation, determinism) can be verified on
//! small buffers without allocating a full-size arena.

use crate::rng::SequenceGenerator;

/// Which access pattern a trial walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// Randomly permuted cycle; provokes the conflict behavior that exposes
    /// associativity and capacity limits.
    Shuffled,
    /// Forward cycle detoured through a write target a fixed node count
    /// behind each node; exposes line-size effects.
    Lookbehind,
}

/// Link `spots` anchor slots spaced `stride` apart into one forward cycle.
///
/// Anchor `i * stride` holds the index of anchor `(i + 1) * stride`; the
/// last anchor wraps back to index 0. Following the links exactly `spots`
/// times from any anchor returns to it, visiting every anchor once.
///
/// # Panics
///
/// Panics if the chain does not fit in `slots` or if `spots` is zero.
pub fn build_forward_chain(slots: &mut [u64], stride: u64, spots: u64) {
    assert!(spots > 0, "a chain needs at least one node");
    assert!(
        spots * stride <= slots.len() as u64,
        "chain of {spots} spots at stride {stride} exceeds {} slots",
        slots.len()
    );

    for i in 0..spots - 1 {
        slots[(i * stride) as usize] = (i + 1) * stride;
    }
    slots[((spots - 1) * stride) as usize] = 0;
}

/// Permute the anchor values in place with a Fisher-Yates shuffle.
///
/// Iterates from the last anchor down to the second, swapping each with a
/// uniformly chosen earlier-or-equal anchor. The multiset of anchor values
/// is preserved; only which anchor holds which link changes, which is what
/// randomizes the physical visiting order.
pub fn shuffle(slots: &mut [u64], rng: &mut SequenceGenerator, stride: u64, spots: u64) {
    for i in (1..spots).rev() {
        let j = rng.below(i + 1);
        slots.swap((i * stride) as usize, (j * stride) as usize);
    }
}

/// Build the shuffled pattern and return the walk's starting index.
///
/// After the forward chain is built and shuffled, every anchor is mirrored
/// into a shadow slot at its half-stride position: the shadow holds the
/// anchor's link shifted by the same half stride. The timed walk chases the
/// shadow chain, leaving the anchor chain intact for the warm-up pass.
pub fn build_shuffled(
    slots: &mut [u64],
    rng: &mut SequenceGenerator,
    stride: u64,
    spots: u64,
) -> usize {
    build_forward_chain(slots, stride, spots);
    shuffle(slots, rng, stride, spots);

    let half = stride / 2;
    for i in 0..spots {
        let anchor = (i * stride) as usize;
        slots[anchor + half as usize] = slots[anchor] + half;
    }

    half as usize
}

/// Build the lookbehind pattern and return the walk's starting index.
///
/// Each node's link is detoured through a target slot `lookbehind` nodes
/// behind it (wrapping modulo `spots`) at the target's half-stride
/// position: the target receives the node's original forward link, and the
/// node points at the target instead. A walk therefore alternates between
/// anchors and targets separated by the fixed lookbehind distance, which is
/// what makes the latency sensitive to how the pair lands in cache lines.
pub fn build_lookbehind_chain(
    slots: &mut [u64],
    stride: u64,
    spots: u64,
    lookbehind: u64,
) -> usize {
    build_forward_chain(slots, stride, spots);

    let half = stride / 2;
    let lookbehind = lookbehind % spots;
    for i in 0..spots {
        let behind = (i + spots - lookbehind) % spots;
        let target = (behind * stride + half) as usize;
        let anchor = (i * stride) as usize;
        slots[target] = slots[anchor];
        slots[anchor] = target as u64;
    }

    0
}
