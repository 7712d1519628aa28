//! Greedy search over the full ring pattern space.
//!
//! Candidates are visited in ascending numeric order. Each one must pass the
//! structural rule, must not belong to a rotation class seen before, and must
//! keep at least `min_distance` circular Hamming distance to every codeword
//! accepted so far. The result is a maximal packing, not a maximum one, and
//! it depends on the visiting order: ids are only reproducible because that
//! order is fixed.

use coded_targets_core::{canonical_rotation, format_bits, hamming, rotations};

use crate::catalog::{Codeword, RingCatalog};
use crate::{De19733466Rule, RingCodeParams, RingParamsError, StructuralRule};

#[cfg(feature = "tracing")]
use tracing::instrument;

#[derive(Debug, Default)]
struct SearchStats {
    rule_rejected: usize,
    rotation_duplicates: usize,
    too_close: usize,
}

/// Every rotation of every accepted codeword, flattened, so that the distance
/// test is a single pass with early exit.
struct AcceptedRotations {
    ring_length: usize,
    rotated: Vec<u32>,
}

impl AcceptedRotations {
    fn new(ring_length: usize) -> Self {
        Self {
            ring_length,
            rotated: Vec::new(),
        }
    }

    fn push(&mut self, pattern: u32) {
        self.rotated.extend(rotations(pattern, self.ring_length));
    }

    /// True if `pattern` is at least `min_distance` away from every rotation.
    fn clears(&self, pattern: u32, min_distance: u32) -> bool {
        self.rotated
            .iter()
            .all(|&r| hamming(pattern, r) >= min_distance)
    }
}

/// Generate the catalog for `params` under `rule`.
///
/// Fails only on invalid parameters, before the search starts. A rule that
/// accepts nothing yields an empty catalog rather than an error.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(params, rule),
        fields(ring_length = params.ring_length, min_distance = params.min_distance)
    )
)]
pub fn generate_catalog<R>(
    params: &RingCodeParams,
    rule: &R,
) -> Result<RingCatalog, RingParamsError>
where
    R: StructuralRule + ?Sized,
{
    params.validate()?;
    rule.validate(params)?;

    let n = params.ring_length;
    let mut visited = vec![false; params.candidate_count()];
    let mut accepted = AcceptedRotations::new(n);
    let mut codewords: Vec<Codeword> = Vec::new();
    let mut stats = SearchStats::default();

    for candidate in 0..params.candidate_count() as u32 {
        if !rule.accepts(candidate, params) {
            stats.rule_rejected += 1;
            continue;
        }

        let canonical = canonical_rotation(candidate, n);
        let seen = &mut visited[canonical as usize];
        if *seen {
            stats.rotation_duplicates += 1;
            continue;
        }
        *seen = true;

        // Only rules that are not rotation invariant can get here with a
        // canonical form they reject; the whole class is dropped then.
        if canonical != candidate && !rule.accepts(canonical, params) {
            stats.rule_rejected += 1;
            continue;
        }

        if !accepted.clears(canonical, params.min_distance) {
            stats.too_close += 1;
            continue;
        }

        let id = codewords.len() as u32;
        log::trace!("accept id={id} pattern={}", format_bits(canonical, n));
        accepted.push(canonical);
        codewords.push(Codeword {
            id,
            pattern: canonical,
        });
    }

    log::debug!(
        "ring search n={} d={}: {} accepted, {} rule-rejected, {} rotation duplicates, {} too close",
        n,
        params.min_distance,
        codewords.len(),
        stats.rule_rejected,
        stats.rotation_duplicates,
        stats.too_close
    );

    Ok(RingCatalog::from_parts(*params, codewords))
}

/// Generate the published DE19733466A1 catalog (516 codes).
pub fn generate_de19733466() -> Result<RingCatalog, RingParamsError> {
    generate_catalog(&RingCodeParams::de19733466(), &De19733466Rule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DE19733466_CODE_COUNT;

    fn generate_with(mutate: impl FnOnce(&mut RingCodeParams)) -> RingCatalog {
        let mut params = RingCodeParams::default();
        mutate(&mut params);
        generate_catalog(&params, &De19733466Rule).expect("valid params")
    }

    #[test]
    fn published_scheme_yields_516_codes() {
        let catalog = generate_de19733466().expect("valid params");
        assert_eq!(catalog.len(), DE19733466_CODE_COUNT);
        assert!(catalog.expect_len(DE19733466_CODE_COUNT).is_ok());

        let patterns: Vec<u32> = catalog.patterns().collect();
        assert_eq!(&patterns[..5], &[129, 135, 139, 141, 147]);
        assert_eq!(&patterns[patterns.len() - 3..], &[7935, 8063, 8127]);
    }

    #[test]
    fn catalog_is_sorted_by_canonical_value() {
        let catalog = generate_de19733466().expect("valid params");
        assert!(catalog.codewords().windows(2).all(|w| w[0].pattern < w[1].pattern));
        for (i, c) in catalog.iter().enumerate() {
            assert_eq!(c.id as usize, i);
        }
    }

    #[test]
    fn larger_distances_thin_the_catalog() {
        let d3 = generate_with(|p| p.min_distance = 3);
        assert_eq!(d3.len(), 24);
        assert_eq!(&d3.patterns().take(3).collect::<Vec<_>>(), &[129, 159, 231]);

        assert_eq!(generate_with(|p| p.min_distance = 5).len(), 4);
        // Parity already forces distance 2, so 1 and 2 agree.
        assert_eq!(generate_with(|p| p.min_distance = 1).len(), 516);
    }

    #[test]
    fn unreachable_distance_keeps_only_first_code() {
        let catalog = generate_with(|p| p.min_distance = 14);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.codewords()[0].pattern, 129);
    }

    #[test]
    fn transitions_filter_matches_reference_counts() {
        assert_eq!(generate_with(|p| p.transitions = Some(2)).len(), 57);
        assert_eq!(generate_with(|p| p.transitions = Some(3)).len(), 183);
    }

    #[test]
    fn other_ring_widths() {
        for (n, expected) in [(4, 1), (6, 4), (8, 13), (10, 42), (12, 147)] {
            let catalog = generate_with(|p| p.ring_length = n);
            assert_eq!(catalog.len(), expected, "ring_length {n}");
        }
    }

    #[test]
    fn rule_accepting_nothing_gives_empty_catalog() {
        let params = RingCodeParams::default();
        let never = |_: u32, _: &RingCodeParams| false;
        let catalog = generate_catalog(&params, &never).expect("valid params");
        assert!(catalog.is_empty());
        assert!(catalog.expect_len(DE19733466_CODE_COUNT).is_err());
    }

    #[test]
    fn rotation_variant_rule_only_stores_accepted_canonical_forms() {
        // Sector 0 must be set: no canonical form (leading zero) passes
        // except the all-ones ring.
        let params = RingCodeParams::with_ring_length(8);
        let marker_first = |code: u32, p: &RingCodeParams| (code >> (p.ring_length - 1)) & 1 == 1;
        let catalog = generate_catalog(&params, &marker_first).expect("valid params");
        assert_eq!(catalog.patterns().collect::<Vec<_>>(), vec![0xff]);
        assert!(catalog.verify(&marker_first).is_ok());
    }

    #[test]
    fn invalid_params_fail_before_search() {
        let params = RingCodeParams::with_ring_length(13);
        assert_eq!(
            generate_catalog(&params, &De19733466Rule).unwrap_err(),
            RingParamsError::OddRingLength(13)
        );
        let mut params = RingCodeParams::default();
        params.min_distance = 0;
        assert!(generate_catalog(&params, &De19733466Rule).is_err());
    }

    #[test]
    fn unfillable_schemes_fail_instead_of_returning_empty() {
        let mut params = RingCodeParams::default();
        params.transitions = Some(7);
        assert!(matches!(
            generate_catalog(&params, &De19733466Rule),
            Err(RingParamsError::OddAlternatingRuns { .. })
        ));
        assert!(matches!(
            generate_catalog(&RingCodeParams::with_ring_length(2), &De19733466Rule),
            Err(RingParamsError::RingTooShort { .. })
        ));
    }

    #[test]
    fn generation_is_deterministic() {
        let a = generate_de19733466().expect("valid params");
        let b = generate_de19733466().expect("valid params");
        assert_eq!(a, b);
    }
}
