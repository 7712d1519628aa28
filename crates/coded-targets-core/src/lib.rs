//! Core bit operations and utilities for circular coded targets.
//!
//! This crate is intentionally small and purely combinatorial. A ring code is
//! a `u32` holding `n` sectors, sector 0 in the most significant bit. Every
//! helper takes the ring width explicitly so that schemes with different
//! sector counts can share the same code.

mod logger;
mod ring;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
pub use ring::{
    canonical_rotation, circular_hamming, count_runs, format_bits, hamming, has_even_parity,
    has_opposite_pair, is_canonical, is_rotation_of, ring_mask, rotate_left, rotations,
    sector_is_set, MAX_RING_LENGTH,
};
