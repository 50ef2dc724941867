use super::component::{Component, MAX_DIMENSIONALITY};
use super::error::ModelError;
use super::mineral::MineralCandidates;
use super::site::{Site, SiteId};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Components keyed by dimensionality, then by reduced formula, both in
/// the order the condensation step produced them.
pub type ComponentMap = IndexMap<u8, IndexMap<String, Component>>;

/// The pre-computed structural summary of a crystal.
#[derive(Debug, Clone, PartialEq)]
pub struct CondensedStructure {
    mineral: MineralCandidates,
    formula: String,
    spg_symbol: String,
    crystal_system: String,
    dimensionality: u8,
    components: ComponentMap,
    n_components: usize,
}

impl CondensedStructure {
    pub fn new(
        mineral: MineralCandidates,
        formula: impl Into<String>,
        spg_symbol: impl Into<String>,
        crystal_system: impl Into<String>,
        dimensionality: u8,
        components: ComponentMap,
        n_components: usize,
    ) -> Result<Self, ModelError> {
        if dimensionality > MAX_DIMENSIONALITY {
            return Err(ModelError::InvalidDimensionality(dimensionality));
        }

        for (&key, formula_map) in &components {
            for (formula, component) in formula_map {
                if component.dimensionality() != key {
                    return Err(ModelError::DimensionalityMismatch {
                        formula: formula.clone(),
                        key,
                        actual: component.dimensionality(),
                    });
                }
            }
        }

        let leaves: usize = components.values().map(IndexMap::len).sum();
        if leaves == 0 {
            return Err(ModelError::NoComponents);
        }
        if (n_components == 1) != (leaves == 1) || n_components < leaves {
            return Err(ModelError::ComponentCountMismatch {
                n_components,
                leaves,
            });
        }

        Ok(Self {
            mineral,
            formula: formula.into(),
            spg_symbol: spg_symbol.into(),
            crystal_system: crystal_system.into(),
            dimensionality,
            components,
            n_components,
        })
    }

    /// Replaces the mineral candidates, e.g. with rankings from a match provider.
    pub fn with_mineral_candidates(mut self, mineral: MineralCandidates) -> Self {
        self.mineral = mineral;
        self
    }

    pub fn mineral(&self) -> &MineralCandidates {
        &self.mineral
    }

    pub fn formula(&self) -> &str {
        &self.formula
    }

    pub fn spg_symbol(&self) -> &str {
        &self.spg_symbol
    }

    pub fn crystal_system(&self) -> &str {
        &self.crystal_system
    }

    pub fn dimensionality(&self) -> u8 {
        self.dimensionality
    }

    pub fn components(&self) -> &ComponentMap {
        &self.components
    }

    pub fn n_components(&self) -> usize {
        self.n_components
    }

    /// Iterates `(dimensionality, formula, component)` in input order.
    pub fn iter_components(&self) -> impl Iterator<Item = (u8, &str, &Component)> + '_ {
        self.components.iter().flat_map(|(&dimensionality, formula_map)| {
            formula_map
                .iter()
                .map(move |(formula, component)| (dimensionality, formula.as_str(), component))
        })
    }

    /// The only component, when the structure has exactly one.
    pub fn single_component(&self) -> Option<&Component> {
        if self.n_components != 1 {
            return None;
        }
        self.iter_components().next().map(|(_, _, component)| component)
    }

    /// Every site reachable through the components, keyed by site id.
    pub fn site_index(&self) -> HashMap<SiteId, &Site> {
        let mut index = HashMap::new();
        for (_, _, component) in self.iter_components() {
            for site in component.sites() {
                index.entry(site.id()).or_insert(site);
            }
            for inequivalent in component.inequivalent_components() {
                for site in inequivalent.sites() {
                    index.entry(site.id()).or_insert(site);
                }
            }
        }
        index
    }
}
