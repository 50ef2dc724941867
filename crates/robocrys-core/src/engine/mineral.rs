use super::matching::{MatchProvider, StructureKey};
use crate::core::models::mineral::{MatchTier, MineralCandidate, MineralCandidates, MineralMatch};
use tracing::debug;

/// Chooses a single mineral designation from tiered candidate lists.
///
/// The tiers are tried in order and the first non-empty one wins:
///
/// 1. prototype matches (exact matches carry the `-1` distance sentinel),
/// 2. fingerprint matches with the same number of species types,
/// 3. fingerprint matches ignoring the species count, named `-derived`.
///
/// Within a tier the smallest distance is chosen, so the namer does not
/// depend on the lists being pre-sorted.
pub struct MineralNamer;

impl MineralNamer {
    pub fn name(candidates: &MineralCandidates) -> MineralMatch {
        let tiers = [
            (&candidates.prototype, MatchTier::Prototype),
            (&candidates.fingerprint, MatchTier::Fingerprint),
            (&candidates.fingerprint_derived, MatchTier::Derived),
        ];

        for (list, tier) in tiers {
            if let Some(best) = closest(list) {
                debug!(mineral = %best.mineral, distance = best.distance, ?tier, "Selected mineral match");
                return MineralMatch {
                    mineral: Some(best.mineral.clone()),
                    distance: best.distance,
                    n_species_types_match: tier != MatchTier::Derived,
                    tier,
                };
            }
        }

        debug!("No mineral match");
        MineralMatch::unmatched()
    }

    /// Queries every ranking from `provider` and names the structure.
    pub fn name_structure<P: MatchProvider + ?Sized>(provider: &mut P, key: &StructureKey) -> MineralMatch {
        Self::name(&Self::gather(provider, key))
    }

    pub fn gather<P: MatchProvider + ?Sized>(provider: &mut P, key: &StructureKey) -> MineralCandidates {
        MineralCandidates {
            prototype: provider.ranked_prototype_matches(key),
            fingerprint: provider.ranked_fingerprint_matches(key, true),
            fingerprint_derived: provider.ranked_fingerprint_matches(key, false),
        }
    }
}

fn closest(candidates: &[MineralCandidate]) -> Option<&MineralCandidate> {
    candidates
        .iter()
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}
