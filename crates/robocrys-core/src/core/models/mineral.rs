/// Fingerprint distance reported for an exact prototype match.
///
/// This is a sentinel for "no distance computed" and is distinct from a
/// computed distance of zero.
pub const EXACT_MATCH_DISTANCE: f64 = -1.0;

/// Distance reported when no mineral could be matched.
pub const UNMATCHED_DISTANCE: f64 = 1.0;

/// A single named-mineral candidate produced by the matching subsystem.
#[derive(Debug, Clone, PartialEq)]
pub struct MineralCandidate {
    pub mineral: String,
    pub distance: f64,
}

impl MineralCandidate {
    pub fn new(mineral: impl Into<String>, distance: f64) -> Self {
        Self {
            mineral: mineral.into(),
            distance,
        }
    }

    pub fn exact(mineral: impl Into<String>) -> Self {
        Self::new(mineral, EXACT_MATCH_DISTANCE)
    }

    pub fn is_exact(&self) -> bool {
        self.distance == EXACT_MATCH_DISTANCE
    }
}

/// The ranked candidate lists for one structure, one list per matching tier.
///
/// Each list is expected to be sorted ascending by distance, although the
/// namer does not rely on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MineralCandidates {
    pub prototype: Vec<MineralCandidate>,
    pub fingerprint: Vec<MineralCandidate>,
    pub fingerprint_derived: Vec<MineralCandidate>,
}

impl MineralCandidates {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.prototype.is_empty() && self.fingerprint.is_empty() && self.fingerprint_derived.is_empty()
    }
}

/// Which tier of the naming policy produced a [`MineralMatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchTier {
    Prototype,
    Fingerprint,
    Derived,
    Unmatched,
}

/// The single naming decision for a structure.
#[derive(Debug, Clone, PartialEq)]
pub struct MineralMatch {
    pub mineral: Option<String>,
    pub distance: f64,
    pub n_species_types_match: bool,
    pub tier: MatchTier,
}

impl MineralMatch {
    pub fn unmatched() -> Self {
        Self {
            mineral: None,
            distance: UNMATCHED_DISTANCE,
            n_species_types_match: true,
            tier: MatchTier::Unmatched,
        }
    }

    /// The qualifier appended to the mineral name: `""`, `"-like"` or `"-derived"`.
    pub fn suffix(&self) -> &'static str {
        if self.mineral.is_none() {
            ""
        } else if !self.n_species_types_match {
            "-derived"
        } else if self.distance >= 0.0 {
            "-like"
        } else {
            ""
        }
    }

    /// The mineral name with its qualifier, e.g. `"Perovskite-like"`.
    pub fn display_name(&self) -> Option<String> {
        self.mineral
            .as_ref()
            .map(|mineral| format!("{}{}", mineral, self.suffix()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(distance: f64, n_species_types_match: bool, tier: MatchTier) -> MineralMatch {
        MineralMatch {
            mineral: Some("Rock Salt".to_string()),
            distance,
            n_species_types_match,
            tier,
        }
    }

    #[test]
    fn exact_prototype_match_has_no_suffix() {
        let m = matched(EXACT_MATCH_DISTANCE, true, MatchTier::Prototype);
        assert_eq!(m.suffix(), "");
        assert_eq!(m.display_name().as_deref(), Some("Rock Salt"));
    }

    #[test]
    fn zero_distance_is_not_treated_as_exact() {
        let m = matched(0.0, true, MatchTier::Prototype);
        assert_eq!(m.display_name().as_deref(), Some("Rock Salt-like"));
    }

    #[test]
    fn species_mismatch_takes_derived_suffix() {
        let m = matched(0.1, false, MatchTier::Derived);
        assert_eq!(m.display_name().as_deref(), Some("Rock Salt-derived"));
    }

    #[test]
    fn unmatched_has_no_display_name() {
        let m = MineralMatch::unmatched();
        assert_eq!(m.display_name(), None);
        assert_eq!(m.suffix(), "");
        assert_eq!(m.distance, UNMATCHED_DISTANCE);
    }

    #[test]
    fn exact_candidate_uses_sentinel_distance() {
        assert!(MineralCandidate::exact("Spinel").is_exact());
        assert!(!MineralCandidate::new("Spinel", 0.0).is_exact());
    }
}
