//! Bit operations on circular ring codes.
//!
//! A ring of `n` sectors is stored in the low `n` bits of a `u32`. Sector 0
//! (the orientation reference) is the most significant of those bits and
//! sectors advance clockwise towards bit 0. Rotating left by `k` therefore
//! turns the physical ring by `k` sectors.

/// Largest ring width the helpers (and the exhaustive generator) support.
pub const MAX_RING_LENGTH: usize = 24;

/// Mask covering the low `n` bits.
#[inline]
pub fn ring_mask(n: usize) -> u32 {
    if n >= 32 {
        u32::MAX
    } else {
        (1u32 << n) - 1
    }
}

/// Cyclic left rotation of an `n`-bit ring by `k` sectors.
#[inline]
pub fn rotate_left(code: u32, n: usize, k: usize) -> u32 {
    let mask = ring_mask(n);
    let code = code & mask;
    if n == 0 {
        return 0;
    }
    let k = k % n;
    if k == 0 {
        return code;
    }
    ((code << k) | (code >> (n - k))) & mask
}

/// All `n` rotations of `code`, starting with the identity.
pub fn rotations(code: u32, n: usize) -> impl Iterator<Item = u32> {
    (0..n.max(1)).map(move |k| rotate_left(code, n, k))
}

/// Canonical representative of the rotation class: the smallest rotation.
pub fn canonical_rotation(code: u32, n: usize) -> u32 {
    rotations(code, n).min().unwrap_or(0)
}

/// True if `code` already is the smallest member of its rotation class.
#[inline]
pub fn is_canonical(code: u32, n: usize) -> bool {
    code & !ring_mask(n) == 0 && canonical_rotation(code, n) == code
}

/// Number of differing bits.
#[inline]
pub fn hamming(a: u32, b: u32) -> u32 {
    (a ^ b).count_ones()
}

/// Minimum Hamming distance between `a` and any rotation of `b`.
///
/// Symmetric in its arguments, and zero exactly when the two rings are
/// rotation-equivalent.
pub fn circular_hamming(a: u32, b: u32, n: usize) -> u32 {
    let a = a & ring_mask(n);
    rotations(b, n)
        .map(|rb| hamming(a, rb))
        .min()
        .unwrap_or(0)
}

/// True if `a` is a cyclic rotation of `b`.
pub fn is_rotation_of(a: u32, b: u32, n: usize) -> bool {
    let a = a & ring_mask(n);
    rotations(b, n).any(|rb| rb == a)
}

/// True if an even number of sectors are set.
#[inline]
pub fn has_even_parity(code: u32) -> bool {
    code.count_ones() % 2 == 0
}

/// True if at least one pair of diametrically opposite sectors `(i, i + n/2)`
/// is set. Always false for odd `n`.
pub fn has_opposite_pair(code: u32, n: usize) -> bool {
    if n < 2 || n % 2 != 0 {
        return false;
    }
    let half = n / 2;
    let low = code & ring_mask(half);
    let high = (code >> half) & ring_mask(half);
    low & high != 0
}

/// Number of 0 -> 1 transitions around the ring.
///
/// For any non-uniform ring this equals the number of runs of set sectors.
/// Uniform rings (all clear or all set) have no transitions.
pub fn count_runs(code: u32, n: usize) -> u32 {
    let code = code & ring_mask(n);
    (rotate_left(code, n, 1) & !code).count_ones()
}

/// True if sector `sector` (clockwise from the reference) is set.
#[inline]
pub fn sector_is_set(code: u32, n: usize, sector: usize) -> bool {
    sector < n && (code >> (n - 1 - sector)) & 1 == 1
}

/// Zero-padded binary string, sector 0 first.
pub fn format_bits(code: u32, n: usize) -> String {
    format!("{:0width$b}", code & ring_mask(n), width = n)
}
