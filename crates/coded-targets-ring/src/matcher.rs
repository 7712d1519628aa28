//! Catalog lookup for observed ring patterns.

use std::collections::HashMap;

use coded_targets_core::{hamming, ring_mask, rotate_left};

use crate::RingCatalog;

/// A catalog match for an observed ring pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match {
    /// Codeword id in the catalog.
    pub id: u32,
    /// Rotation `0..ring_length` such that
    /// `observed == rotate_left(pattern, ring_length, rotation)`.
    pub rotation: u8,
    /// Hamming distance between observed and rotated codeword.
    pub hamming: u8,
}

/// Matcher for a fixed catalog.
///
/// Implementation note: this is a brute-force search over all ids and
/// rotations (516 × 14 for the published scheme), with a hash table in front
/// for exact hits. Symmetric codes match several rotations equally well; the
/// smallest rotation is reported.
#[derive(Clone, Debug)]
pub struct Matcher {
    ring_length: usize,
    max_hamming: u8,
    rotated: Vec<Vec<u32>>,
    exact: HashMap<u32, (u32, u8)>,
}

impl Matcher {
    /// Build a matcher for `catalog` accepting up to `max_hamming` flipped sectors.
    pub fn new(catalog: &RingCatalog, max_hamming: u8) -> Self {
        let n = catalog.ring_length();
        let mut rotated = Vec::with_capacity(catalog.len());
        let mut exact = HashMap::with_capacity(catalog.len() * n);

        for c in catalog {
            let rots: Vec<u32> = (0..n).map(|k| rotate_left(c.pattern, n, k)).collect();
            for (rot, &code) in rots.iter().enumerate() {
                exact.entry(code).or_insert((c.id, rot as u8));
            }
            rotated.push(rots);
        }

        Self {
            ring_length: n,
            max_hamming,
            rotated,
            exact,
        }
    }

    /// Maximum Hamming distance allowed for matches.
    #[inline]
    pub fn max_hamming(&self) -> u8 {
        self.max_hamming
    }

    /// Exact lookup, ignoring `max_hamming`.
    pub fn match_exact(&self, observed: u32) -> Option<Match> {
        let observed = observed & ring_mask(self.ring_length);
        self.exact.get(&observed).map(|&(id, rotation)| Match {
            id,
            rotation,
            hamming: 0,
        })
    }

    /// Find the best match within `max_hamming`.
    pub fn match_code(&self, observed: u32) -> Option<Match> {
        if let Some(m) = self.match_exact(observed) {
            return Some(m);
        }
        let observed = observed & ring_mask(self.ring_length);

        let mut best: Option<Match> = None;
        for (id, rots) in self.rotated.iter().enumerate() {
            for (rot, &cand) in rots.iter().enumerate() {
                let h = hamming(observed, cand) as u8;
                if h > self.max_hamming {
                    continue;
                }
                if best.map_or(true, |prev| h < prev.hamming) {
                    best = Some(Match {
                        id: id as u32,
                        rotation: rot as u8,
                        hamming: h,
                    });
                }
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate_de19733466;

    #[test]
    fn finds_rotated_code() {
        let catalog = generate_de19733466().expect("valid params");
        let matcher = Matcher::new(&catalog, 0);

        let base = catalog.get(42).expect("id 42").pattern;
        let observed = rotate_left(base, 14, 5);
        let m = matcher.match_code(observed).expect("match");
        assert_eq!(m.id, 42);
        assert_eq!(rotate_left(base, 14, m.rotation as usize), observed);
        assert_eq!(m.hamming, 0);
    }

    #[test]
    fn tolerates_single_flip_only_when_allowed() {
        let catalog = generate_de19733466().expect("valid params");
        let strict = Matcher::new(&catalog, 0);
        let tolerant = Matcher::new(&catalog, 1);

        // Odd parity: no codeword is closer than one flip.
        let observed = catalog.get(0).expect("id 0").pattern ^ (1 << 4);
        assert!(strict.match_code(observed).is_none());
        let m = tolerant.match_code(observed).expect("match");
        assert_eq!(m.hamming, 1);
    }

    #[test]
    fn every_codeword_matches_itself() {
        let catalog = generate_de19733466().expect("valid params");
        let matcher = Matcher::new(&catalog, 0);
        for c in &catalog {
            let m = matcher.match_exact(c.pattern).expect("exact");
            assert_eq!(m.id, c.id);
            assert_eq!(m.rotation, 0);
        }
    }
}
