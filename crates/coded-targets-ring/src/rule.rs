//! Structural validity rules for ring patterns.

use coded_targets_core::{count_runs, has_even_parity, has_opposite_pair, ring_mask};

use crate::{RingCodeParams, RingParamsError};

/// Scheme-specific eligibility test applied before any distance check.
///
/// Implemented for plain closures, so alternative marker layouts can be
/// plugged into [`generate_catalog`](crate::generate_catalog) directly:
///
/// ```
/// use coded_targets_ring::{generate_catalog, RingCodeParams};
///
/// let params = RingCodeParams::with_ring_length(8);
/// let odd_weight = |p: u32, _: &RingCodeParams| p.count_ones() % 2 == 1;
/// let catalog = generate_catalog(&params, &odd_weight).expect("valid params");
/// assert!(catalog.iter().all(|c| c.pattern.count_ones() % 2 == 1));
/// ```
pub trait StructuralRule {
    /// True if `pattern` may become a codeword.
    fn accepts(&self, pattern: u32, params: &RingCodeParams) -> bool;

    /// Reject parameters this rule can never be satisfied with.
    fn validate(&self, params: &RingCodeParams) -> Result<(), RingParamsError> {
        let _ = params;
        Ok(())
    }
}

impl<F> StructuralRule for F
where
    F: Fn(u32, &RingCodeParams) -> bool,
{
    fn accepts(&self, pattern: u32, params: &RingCodeParams) -> bool {
        self(pattern, params)
    }
}

/// Smallest ring the DE19733466A1 rule can fill.
const MIN_RING_LENGTH: usize = 4;

/// Coding rule of patent DE19733466A1.
///
/// A pattern is eligible when
/// - at least one pair of diametrically opposite sectors is set, which gives
///   the decoder a reference axis,
/// - the ring is not uniform, and has exactly `params.transitions` runs of
///   set sectors when that is given,
/// - an even number of sectors is set.
///
/// All three conditions are rotation invariant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct De19733466Rule;

impl StructuralRule for De19733466Rule {
    fn accepts(&self, pattern: u32, params: &RingCodeParams) -> bool {
        let n = params.ring_length;
        let pattern = pattern & ring_mask(n);
        if pattern == 0 || pattern == ring_mask(n) {
            return false;
        }
        if !has_even_parity(pattern) || !has_opposite_pair(pattern, n) {
            return false;
        }
        match params.transitions {
            Some(t) => count_runs(pattern, n) == t,
            None => true,
        }
    }

    fn validate(&self, params: &RingCodeParams) -> Result<(), RingParamsError> {
        let n = params.ring_length;
        if n % 2 != 0 {
            return Err(RingParamsError::OddRingLength(n));
        }
        // Two sectors: the only opposite pair is the uniform ring.
        if n < MIN_RING_LENGTH {
            return Err(RingParamsError::RingTooShort {
                got: n,
                min: MIN_RING_LENGTH,
            });
        }
        // n/2 runs means strictly alternating sectors, n/2 of them set.
        if let Some(t) = params.transitions {
            if t as usize == n / 2 && t % 2 == 1 {
                return Err(RingParamsError::OddAlternatingRuns {
                    transitions: t,
                    ring_length: n,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coded_targets_core::rotate_left;

    #[test]
    fn accepts_first_published_code() {
        let p = RingCodeParams::default();
        assert!(De19733466Rule.accepts(129, &p));
    }

    #[test]
    fn rejects_each_violated_condition() {
        let p = RingCodeParams::default();
        // No opposite pair.
        assert!(!De19733466Rule.accepts(0b11, &p));
        // Odd parity (three sectors, one opposite pair).
        assert!(!De19733466Rule.accepts(0b1000_0011, &p));
        // Uniform rings.
        assert!(!De19733466Rule.accepts(0, &p));
        assert!(!De19733466Rule.accepts(ring_mask(14), &p));
    }

    #[test]
    fn rule_is_rotation_invariant() {
        let p = RingCodeParams::default();
        for code in [129u32, 0b00_0011_0000_0011, 0b01_1010_0101_1001] {
            let base = De19733466Rule.accepts(code, &p);
            for k in 1..14 {
                assert_eq!(De19733466Rule.accepts(rotate_left(code, 14, k), &p), base);
            }
        }
    }

    #[test]
    fn transitions_restrict_run_count() {
        let mut p = RingCodeParams::default();
        p.transitions = Some(2);
        assert!(De19733466Rule.accepts(129, &p));
        p.transitions = Some(1);
        assert!(!De19733466Rule.accepts(129, &p));
    }

    #[test]
    fn odd_ring_length_is_a_configuration_error() {
        let p = RingCodeParams::with_ring_length(13);
        assert_eq!(
            De19733466Rule.validate(&p),
            Err(RingParamsError::OddRingLength(13))
        );
        assert!(De19733466Rule.validate(&RingCodeParams::default()).is_ok());
    }

    #[test]
    fn unfillable_schemes_are_configuration_errors() {
        assert_eq!(
            De19733466Rule.validate(&RingCodeParams::with_ring_length(2)),
            Err(RingParamsError::RingTooShort { got: 2, min: 4 })
        );
        assert!(De19733466Rule
            .validate(&RingCodeParams::with_ring_length(4))
            .is_ok());

        let mut p = RingCodeParams::default();
        p.transitions = Some(7);
        assert_eq!(
            De19733466Rule.validate(&p),
            Err(RingParamsError::OddAlternatingRuns {
                transitions: 7,
                ring_length: 14
            })
        );
        p.transitions = Some(6);
        assert!(De19733466Rule.validate(&p).is_ok());

        // Eight alternating sectors on 16 keep even parity.
        let mut p = RingCodeParams::with_ring_length(16);
        p.transitions = Some(8);
        assert!(De19733466Rule.validate(&p).is_ok());
    }

    #[test]
    fn closures_are_rules() {
        let p = RingCodeParams::default();
        let marker_bit = |code: u32, params: &RingCodeParams| {
            (code >> (params.ring_length - 1)) & 1 == 1
        };
        assert!(marker_bit.accepts(1 << 13, &p));
        assert!(!marker_bit.accepts(1, &p));
        assert!(marker_bit.validate(&p).is_ok());
    }
}
