//! Generated code catalogs and their invariants.

use coded_targets_core::{circular_hamming, format_bits, is_canonical};
use serde::{Deserialize, Serialize};

use crate::{RingCodeParams, RingParamsError, StructuralRule};

/// One accepted rotation class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Codeword {
    /// Zero-based id in acceptance order.
    pub id: u32,
    /// Canonical (smallest-rotation) pattern, sector 0 in the high bit.
    pub pattern: u32,
}

impl Codeword {
    /// One-based number printed next to the target.
    #[inline]
    pub fn label(&self) -> u32 {
        self.id + 1
    }

    /// Binary rendering of the pattern, sector 0 first.
    pub fn bits(&self, ring_length: usize) -> String {
        format_bits(self.pattern, ring_length)
    }
}

/// Invariant violations and post-condition failures.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error(transparent)]
    Params(#[from] RingParamsError),
    #[error("catalog has {got} codes, scheme expects {expected}")]
    SizeMismatch { expected: usize, got: usize },
    #[error("codeword at index {index} has id {id}")]
    IdOutOfSequence { index: usize, id: u32 },
    #[error("codeword {id} pattern {pattern:#x} is not a canonical {ring_length}-sector ring")]
    NotCanonical {
        id: u32,
        pattern: u32,
        ring_length: usize,
    },
    #[error("codeword {id} pattern {pattern:#x} fails the structural rule")]
    RuleViolation { id: u32, pattern: u32 },
    #[error("codewords {a} and {b} are rotation-equivalent")]
    Duplicate { a: u32, b: u32 },
    #[error("codewords {a} and {b} are {distance} apart, below min_distance {min_distance}")]
    TooClose {
        a: u32,
        b: u32,
        distance: u32,
        min_distance: u32,
    },
}

/// Ordered, immutable set of codewords produced from one parameter set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RingCatalog {
    params: RingCodeParams,
    codewords: Vec<Codeword>,
}

impl RingCatalog {
    /// Wrap generator output. The generator upholds every invariant itself.
    pub(crate) fn from_parts(params: RingCodeParams, codewords: Vec<Codeword>) -> Self {
        Self { params, codewords }
    }

    /// Build a catalog from externally supplied codewords, checking the
    /// parameters, ids, canonical form and pairwise distance.
    pub fn from_codewords(
        params: RingCodeParams,
        codewords: Vec<Codeword>,
    ) -> Result<Self, CatalogError> {
        params.validate()?;
        let catalog = Self { params, codewords };
        catalog.check_invariants()?;
        Ok(catalog)
    }

    /// Parameters the catalog was generated from.
    #[inline]
    pub fn params(&self) -> &RingCodeParams {
        &self.params
    }

    /// Number of sectors per ring.
    #[inline]
    pub fn ring_length(&self) -> usize {
        self.params.ring_length
    }

    #[inline]
    pub fn codewords(&self) -> &[Codeword] {
        &self.codewords
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.codewords.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.codewords.is_empty()
    }

    /// Codeword with the given id.
    #[inline]
    pub fn get(&self, id: u32) -> Option<&Codeword> {
        self.codewords.get(id as usize)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Codeword> {
        self.codewords.iter()
    }

    /// Canonical patterns in id order.
    pub fn patterns(&self) -> impl Iterator<Item = u32> + '_ {
        self.codewords.iter().map(|c| c.pattern)
    }

    /// Codeword whose pattern is exactly `pattern` (no rotation search).
    pub fn find_pattern(&self, pattern: u32) -> Option<&Codeword> {
        self.codewords.iter().find(|c| c.pattern == pattern)
    }

    /// Smallest circular distance between any two codewords, `None` for
    /// catalogs with fewer than two entries.
    pub fn min_pairwise_distance(&self) -> Option<u32> {
        let n = self.ring_length();
        let mut best: Option<u32> = None;
        for (i, a) in self.codewords.iter().enumerate() {
            for b in &self.codewords[i + 1..] {
                let d = circular_hamming(a.pattern, b.pattern, n);
                best = Some(best.map_or(d, |cur| cur.min(d)));
            }
        }
        best
    }

    /// Post-condition for callers that rely on a specific catalog size.
    pub fn expect_len(&self, expected: usize) -> Result<(), CatalogError> {
        if self.len() != expected {
            return Err(CatalogError::SizeMismatch {
                expected,
                got: self.len(),
            });
        }
        Ok(())
    }

    /// Re-check every catalog invariant, including `rule` on each pattern.
    pub fn verify<R>(&self, rule: &R) -> Result<(), CatalogError>
    where
        R: StructuralRule + ?Sized,
    {
        for c in &self.codewords {
            if !rule.accepts(c.pattern, &self.params) {
                return Err(CatalogError::RuleViolation {
                    id: c.id,
                    pattern: c.pattern,
                });
            }
        }
        self.check_invariants()
    }

    fn check_invariants(&self) -> Result<(), CatalogError> {
        let n = self.ring_length();
        for (index, c) in self.codewords.iter().enumerate() {
            if c.id as usize != index {
                return Err(CatalogError::IdOutOfSequence { index, id: c.id });
            }
            if !is_canonical(c.pattern, n) {
                return Err(CatalogError::NotCanonical {
                    id: c.id,
                    pattern: c.pattern,
                    ring_length: n,
                });
            }
        }

        let min_distance = self.params.min_distance;
        for (i, a) in self.codewords.iter().enumerate() {
            for b in &self.codewords[i + 1..] {
                let distance = circular_hamming(a.pattern, b.pattern, n);
                if distance == 0 {
                    return Err(CatalogError::Duplicate { a: a.id, b: b.id });
                }
                if distance < min_distance {
                    return Err(CatalogError::TooClose {
                        a: a.id,
                        b: b.id,
                        distance,
                        min_distance,
                    });
                }
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a RingCatalog {
    type Item = &'a Codeword;
    type IntoIter = std::slice::Iter<'a, Codeword>;

    fn into_iter(self) -> Self::IntoIter {
        self.codewords.iter()
    }
}
