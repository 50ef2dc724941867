use crate::core::models::mineral::{MatchTier, MineralCandidate, MineralCandidates};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, trace};

/// Fingerprint matches at or beyond this distance are not reported.
pub const DEFAULT_DISTANCE_CUTOFF: f64 = 0.4;

/// Identity of a structure for the purpose of caching match rankings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructureKey(String);

impl StructureKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StructureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StructureKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// The structure-matching collaborator that ranks known minerals.
///
/// Every returned list is sorted ascending by distance.
pub trait MatchProvider {
    fn ranked_prototype_matches(&mut self, key: &StructureKey) -> Vec<MineralCandidate>;

    fn ranked_fingerprint_matches(
        &mut self,
        key: &StructureKey,
        constrain_species_count: bool,
    ) -> Vec<MineralCandidate>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Ranking {
    Prototype,
    Fingerprint,
    Unconstrained,
}

/// Memoizes the rankings of a [`MatchProvider`] per structure.
///
/// Entries live until they are dropped with [`invalidate`](Self::invalidate)
/// or [`clear`](Self::clear).
#[derive(Debug)]
pub struct RankingCache<P> {
    provider: P,
    rankings: HashMap<(StructureKey, Ranking), Vec<MineralCandidate>>,
}

impl<P: MatchProvider> RankingCache<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            rankings: HashMap::new(),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn into_inner(self) -> P {
        self.provider
    }

    pub fn is_cached(&self, key: &StructureKey) -> bool {
        self.rankings.keys().any(|(k, _)| k == key)
    }

    /// Drops every ranking held for `key`; returns whether anything was cached.
    pub fn invalidate(&mut self, key: &StructureKey) -> bool {
        let before = self.rankings.len();
        self.rankings.retain(|(k, _), _| k != key);
        let removed = before != self.rankings.len();
        if removed {
            debug!(structure = %key, "Invalidated cached mineral rankings");
        }
        removed
    }

    pub fn clear(&mut self) {
        self.rankings.clear();
    }

    /// Number of cached rankings (up to three per structure).
    pub fn len(&self) -> usize {
        self.rankings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rankings.is_empty()
    }

    fn ranking(&mut self, key: &StructureKey, ranking: Ranking) -> Vec<MineralCandidate> {
        let cache_key = (key.clone(), ranking);
        if let Some(cached) = self.rankings.get(&cache_key) {
            trace!(structure = %key, ?ranking, "Ranking cache hit");
            return cached.clone();
        }

        trace!(structure = %key, ?ranking, "Ranking cache miss");
        let computed = match ranking {
            Ranking::Prototype => self.provider.ranked_prototype_matches(key),
            Ranking::Fingerprint => self.provider.ranked_fingerprint_matches(key, true),
            Ranking::Unconstrained => self.provider.ranked_fingerprint_matches(key, false),
        };
        self.rankings.insert(cache_key, computed.clone());
        computed
    }
}

impl<P: MatchProvider> MatchProvider for RankingCache<P> {
    fn ranked_prototype_matches(&mut self, key: &StructureKey) -> Vec<MineralCandidate> {
        self.ranking(key, Ranking::Prototype)
    }

    fn ranked_fingerprint_matches(
        &mut self,
        key: &StructureKey,
        constrain_species_count: bool,
    ) -> Vec<MineralCandidate> {
        let ranking = if constrain_species_count {
            Ranking::Fingerprint
        } else {
            Ranking::Unconstrained
        };
        self.ranking(key, ranking)
    }
}

#[derive(Debug, Error)]
pub enum CandidateTableError {
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Unknown ranking tier '{tier}' for structure '{structure}'")]
    UnknownTier { structure: String, tier: String },
}

#[derive(Debug, Deserialize)]
struct CandidateRecord {
    structure: String,
    tier: String,
    mineral: String,
    distance: f64,
}

fn parse_tier(tier: &str) -> Option<MatchTier> {
    match tier.trim().to_ascii_lowercase().as_str() {
        "prototype" => Some(MatchTier::Prototype),
        "fingerprint" => Some(MatchTier::Fingerprint),
        "fingerprint-unconstrained" | "derived" => Some(MatchTier::Derived),
        _ => None,
    }
}

/// Precomputed mineral rankings, loaded from a CSV with the columns
/// `structure,tier,mineral,distance`.
#[derive(Debug, Clone)]
pub struct CandidateTable {
    entries: HashMap<StructureKey, MineralCandidates>,
    distance_cutoff: f64,
    max_matches: Option<usize>,
}

impl Default for CandidateTable {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            distance_cutoff: DEFAULT_DISTANCE_CUTOFF,
            max_matches: None,
        }
    }
}

impl CandidateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_path(path: &Path) -> Result<Self, CandidateTableError> {
        let origin = path.to_string_lossy().to_string();
        let reader = csv::Reader::from_path(path).map_err(|e| CandidateTableError::Csv {
            path: origin.clone(),
            source: e,
        })?;
        Self::load(reader, &origin)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, CandidateTableError> {
        Self::load(csv::Reader::from_reader(reader), "<reader>")
    }

    fn load<R: Read>(mut reader: csv::Reader<R>, origin: &str) -> Result<Self, CandidateTableError> {
        let mut table = Self::new();
        for result in reader.deserialize::<CandidateRecord>() {
            let record = result.map_err(|e| CandidateTableError::Csv {
                path: origin.to_string(),
                source: e,
            })?;
            let tier = parse_tier(&record.tier).ok_or_else(|| CandidateTableError::UnknownTier {
                structure: record.structure.clone(),
                tier: record.tier.clone(),
            })?;
            table.insert(
                StructureKey::new(record.structure),
                tier,
                MineralCandidate::new(record.mineral, record.distance),
            );
        }
        debug!(
            origin,
            structures = table.entries.len(),
            "Loaded mineral candidate table"
        );
        Ok(table)
    }

    /// Adds a candidate, keeping its tier's list sorted by distance.
    ///
    /// Candidates for [`MatchTier::Unmatched`] are ignored.
    pub fn insert(&mut self, key: StructureKey, tier: MatchTier, candidate: MineralCandidate) {
        let entry = self.entries.entry(key).or_default();
        let list = match tier {
            MatchTier::Prototype => &mut entry.prototype,
            MatchTier::Fingerprint => &mut entry.fingerprint,
            MatchTier::Derived => &mut entry.fingerprint_derived,
            MatchTier::Unmatched => return,
        };
        let at = list.partition_point(|c| c.distance <= candidate.distance);
        list.insert(at, candidate);
    }

    pub fn with_distance_cutoff(mut self, cutoff: f64) -> Self {
        self.distance_cutoff = cutoff;
        self
    }

    pub fn with_max_matches(mut self, max_matches: Option<usize>) -> Self {
        self.max_matches = max_matches;
        self
    }

    pub fn candidates(&self, key: &StructureKey) -> Option<&MineralCandidates> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MatchProvider for CandidateTable {
    fn ranked_prototype_matches(&mut self, key: &StructureKey) -> Vec<MineralCandidate> {
        self.entries
            .get(key)
            .map(|c| c.prototype.clone())
            .unwrap_or_default()
    }

    fn ranked_fingerprint_matches(
        &mut self,
        key: &StructureKey,
        constrain_species_count: bool,
    ) -> Vec<MineralCandidate> {
        let Some(candidates) = self.entries.get(key) else {
            return Vec::new();
        };
        let list = if constrain_species_count {
            &candidates.fingerprint
        } else {
            &candidates.fingerprint_derived
        };
        list.iter()
            .take(self.max_matches.unwrap_or(usize::MAX))
            .filter(|c| c.distance < self.distance_cutoff)
            .cloned()
            .collect()
    }
}
