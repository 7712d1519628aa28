//! Scheme parameters for ring code generation.

use coded_targets_core::MAX_RING_LENGTH;
use serde::{Deserialize, Serialize};

/// Number of codes the published DE19733466A1 parameters produce.
pub const DE19733466_CODE_COUNT: usize = 516;

const DEFAULT_RING_LENGTH: usize = 14;
const DEFAULT_MIN_DISTANCE: u32 = 2;

/// Parameters of a circular coding scheme.
///
/// These are fixed for a given scheme but kept explicit so that a catalog is
/// always a pure function of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingCodeParams {
    /// Number of sectors around the ring.
    pub ring_length: usize,
    /// Minimum circular Hamming distance between any two accepted codes.
    pub min_distance: u32,
    /// Exact number of runs of set sectors, if restricted.
    pub transitions: Option<u32>,
}

impl Default for RingCodeParams {
    fn default() -> Self {
        Self::de19733466()
    }
}

/// Parameter validation errors, reported before any search starts.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RingParamsError {
    #[error("ring_length must be in 2..={max}, got {got}")]
    RingLength { got: usize, max: usize },
    #[error("ring_length must be even to pair opposite sectors, got {0}")]
    OddRingLength(usize),
    #[error("min_distance must be in 1..={ring_length}, got {got}")]
    MinDistance { got: u32, ring_length: usize },
    #[error("transitions must be in 1..={max}, got {got}")]
    Transitions { got: u32, max: u32 },
    #[error("ring_length {got} admits no valid pattern, need at least {min}")]
    RingTooShort { got: usize, min: usize },
    #[error("{transitions} runs on {ring_length} sectors force an odd number of set sectors")]
    OddAlternatingRuns { transitions: u32, ring_length: usize },
}

impl RingCodeParams {
    /// The published 14-sector scheme.
    pub const fn de19733466() -> Self {
        Self {
            ring_length: DEFAULT_RING_LENGTH,
            min_distance: DEFAULT_MIN_DISTANCE,
            transitions: None,
        }
    }

    /// Same scheme, different sector count.
    pub fn with_ring_length(ring_length: usize) -> Self {
        Self {
            ring_length,
            ..Self::de19733466()
        }
    }

    /// Number of raw candidates the search enumerates (`2^ring_length`).
    #[inline]
    pub fn candidate_count(&self) -> usize {
        1usize << self.ring_length
    }

    /// Check the scheme-independent bounds.
    ///
    /// Rule-specific requirements (such as an even sector count) are checked
    /// by [`StructuralRule::validate`](crate::StructuralRule::validate).
    pub fn validate(&self) -> Result<(), RingParamsError> {
        if !(2..=MAX_RING_LENGTH).contains(&self.ring_length) {
            return Err(RingParamsError::RingLength {
                got: self.ring_length,
                max: MAX_RING_LENGTH,
            });
        }
        if self.min_distance == 0 || self.min_distance as usize > self.ring_length {
            return Err(RingParamsError::MinDistance {
                got: self.min_distance,
                ring_length: self.ring_length,
            });
        }
        if let Some(t) = self.transitions {
            // A ring of n sectors holds at most n/2 separate runs.
            let max = (self.ring_length / 2) as u32;
            if t == 0 || t > max {
                return Err(RingParamsError::Transitions { got: t, max });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn published_scheme_is_valid() {
        let p = RingCodeParams::default();
        assert_eq!(p.ring_length, 14);
        assert_eq!(p.min_distance, 2);
        assert_eq!(p.transitions, None);
        assert_eq!(p.candidate_count(), 16384);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_ring_length() {
        for n in [0, 1, MAX_RING_LENGTH + 1] {
            let err = RingCodeParams::with_ring_length(n).validate().unwrap_err();
            assert!(matches!(err, RingParamsError::RingLength { got, .. } if got == n));
        }
    }

    #[test]
    fn rejects_zero_and_oversized_distance() {
        let mut p = RingCodeParams::default();
        p.min_distance = 0;
        assert!(matches!(p.validate(), Err(RingParamsError::MinDistance { .. })));
        p.min_distance = 15;
        assert!(matches!(p.validate(), Err(RingParamsError::MinDistance { .. })));
        p.min_distance = 14;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn rejects_unsatisfiable_transitions() {
        let mut p = RingCodeParams::default();
        p.transitions = Some(0);
        assert_eq!(
            p.validate(),
            Err(RingParamsError::Transitions { got: 0, max: 7 })
        );
        p.transitions = Some(8);
        assert!(p.validate().is_err());
        // Within range here; the DE19733466A1 rule rejects it separately.
        p.transitions = Some(7);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn missing_json_fields_fall_back_to_published_values() {
        let p: RingCodeParams = serde_json::from_str(r#"{"min_distance": 3}"#).expect("json");
        assert_eq!(p.ring_length, 14);
        assert_eq!(p.min_distance, 3);
    }
}
