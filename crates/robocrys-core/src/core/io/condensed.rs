use super::traits::CondensedFile;
use crate::core::models::bonding::{BondGroup, InequivalentBondGroup};
use crate::core::models::component::{Component, InequivalentComponent};
use crate::core::models::error::ModelError;
use crate::core::models::mineral::{MineralCandidate, MineralCandidates};
use crate::core::models::site::{
    Connectivity, Geometry, NeighborCensus, ParseConnectivityError, Site, SiteId,
};
use crate::core::models::structure::{ComponentMap, CondensedStructure};
use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::{self, Read};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid component dimensionality key '{0}'")]
    DimensionalityKey(String),

    #[error("Bond group to '{0}' must give either 'inequiv_groups' or 'dists', not both")]
    AmbiguousBondGroup(String),

    #[error("Bond group to '{0}' gives neither 'inequiv_groups' nor 'dists'")]
    MissingDistances(String),

    #[error(transparent)]
    Connectivity(#[from] ParseConnectivityError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Unsupported file extension for '{0}'. Expected '.json' or '.toml'.")]
    UnsupportedFormat(String),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCandidate {
    mineral: String,
    distance: f64,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct RawMineral {
    #[serde(default)]
    prototype: Vec<RawCandidate>,
    #[serde(default)]
    fingerprint: Vec<RawCandidate>,
    #[serde(default)]
    fingerprint_derived: Vec<RawCandidate>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawInequivalentBondGroup {
    n_sites: usize,
    dists: Vec<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBondGroup {
    n_sites: usize,
    inequiv_groups: Option<Vec<RawInequivalentBondGroup>>,
    dists: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawGeometry {
    #[serde(rename = "type")]
    kind: String,
    likeness: f64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSite {
    id: SiteId,
    element: String,
    geometry: RawGeometry,
    nn: IndexMap<String, RawBondGroup>,
    #[serde(default)]
    nnn: BTreeMap<String, Vec<SiteId>>,
    poly_formula: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawInequivalentComponent {
    count: usize,
    orientation: Option<String>,
    sites: Vec<RawSite>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawComponent {
    dimensionality: u8,
    count: usize,
    molecule_name: Option<String>,
    inequiv_components: Vec<RawInequivalentComponent>,
    sites: Option<Vec<RawSite>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCondensedStructure {
    #[serde(default)]
    mineral: RawMineral,
    formula: String,
    spg_symbol: String,
    crystal_system: String,
    dimensionality: u8,
    components: IndexMap<String, IndexMap<String, RawComponent>>,
    n_components: usize,
}

impl RawMineral {
    fn into_model(self) -> MineralCandidates {
        let convert = |list: Vec<RawCandidate>| {
            list.into_iter()
                .map(|c| MineralCandidate::new(c.mineral, c.distance))
                .collect()
        };
        MineralCandidates {
            prototype: convert(self.prototype),
            fingerprint: convert(self.fingerprint),
            fingerprint_derived: convert(self.fingerprint_derived),
        }
    }
}

impl RawBondGroup {
    fn into_model(self, element: &str) -> Result<BondGroup, ReadError> {
        match (self.inequiv_groups, self.dists) {
            (Some(_), Some(_)) => Err(ReadError::AmbiguousBondGroup(element.to_string())),
            (None, None) => Err(ReadError::MissingDistances(element.to_string())),
            (Some(groups), None) => {
                let groups = groups
                    .into_iter()
                    .map(|g| InequivalentBondGroup {
                        n_sites: g.n_sites,
                        distances: g.dists,
                    })
                    .collect();
                Ok(BondGroup::inequivalent(element, self.n_sites, groups)?)
            }
            (None, Some(dists)) => Ok(BondGroup::merged(element, self.n_sites, dists)?),
        }
    }
}

impl RawSite {
    fn into_model(self) -> Result<Site, ReadError> {
        let geometry = Geometry::new(self.geometry.kind, self.geometry.likeness)?;

        let mut nearest_neighbors = NeighborCensus::with_capacity(self.nn.len());
        for (element, group) in self.nn {
            let group = group.into_model(&element)?;
            nearest_neighbors.insert(element, group);
        }

        let mut next_nearest_neighbors: BTreeMap<Connectivity, Vec<SiteId>> = BTreeMap::new();
        for (name, sites) in self.nnn {
            let connectivity: Connectivity = name.parse()?;
            next_nearest_neighbors
                .entry(connectivity)
                .or_default()
                .extend(sites);
        }

        let site = Site::new(self.id, self.element, geometry, nearest_neighbors)?
            .with_next_nearest_neighbors(next_nearest_neighbors);
        Ok(match self.poly_formula {
            Some(formula) => site.with_polyhedron_formula(formula),
            None => site,
        })
    }
}

impl RawComponent {
    fn into_model(self, formula: &str) -> Result<Component, ReadError> {
        let mut inequivalent_components = Vec::with_capacity(self.inequiv_components.len());
        for raw in self.inequiv_components {
            let sites = raw
                .sites
                .into_iter()
                .map(RawSite::into_model)
                .collect::<Result<Vec<_>, _>>()?;
            inequivalent_components.push(InequivalentComponent::new(
                raw.count,
                raw.orientation,
                sites,
            ));
        }

        // The flat site list defaults to the sites of every inequivalent copy.
        let sites = match self.sites {
            Some(raw_sites) => raw_sites
                .into_iter()
                .map(RawSite::into_model)
                .collect::<Result<Vec<_>, _>>()?,
            None => inequivalent_components
                .iter()
                .flat_map(|c| c.sites().iter().cloned())
                .collect(),
        };

        Ok(Component::new(
            formula,
            self.dimensionality,
            self.count,
            self.molecule_name,
            inequivalent_components,
            sites,
        )?)
    }
}

impl RawCondensedStructure {
    fn into_model(self) -> Result<CondensedStructure, ReadError> {
        let mut components = ComponentMap::new();
        for (key, formula_map) in self.components {
            let dimensionality: u8 = key
                .trim()
                .parse()
                .map_err(|_| ReadError::DimensionalityKey(key.clone()))?;
            let entry = components.entry(dimensionality).or_default();
            for (formula, raw) in formula_map {
                let component = raw.into_model(&formula)?;
                entry.insert(formula, component);
            }
        }

        debug!(
            "Parsed condensed structure '{}' with {} component(s).",
            self.formula, self.n_components
        );

        Ok(CondensedStructure::new(
            self.mineral.into_model(),
            self.formula,
            self.spg_symbol,
            self.crystal_system,
            self.dimensionality,
            components,
            self.n_components,
        )?)
    }
}

/// Condensed structure data serialized as JSON.
pub struct JsonFile;

impl CondensedFile for JsonFile {
    type Error = ReadError;

    fn read_from(reader: &mut impl Read) -> Result<CondensedStructure, Self::Error> {
        let raw: RawCondensedStructure = serde_json::from_reader(reader)?;
        raw.into_model()
    }
}

/// Condensed structure data serialized as TOML.
pub struct TomlFile;

impl CondensedFile for TomlFile {
    type Error = ReadError;

    fn read_from(reader: &mut impl Read) -> Result<CondensedStructure, Self::Error> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        let raw: RawCondensedStructure = toml::from_str(&content)?;
        raw.into_model()
    }
}

/// Reads a condensed structure, choosing the format from the file extension.
pub fn read_condensed_path(path: &Path) -> Result<CondensedStructure, ReadError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("json") => JsonFile::read_from_path(path),
        Some("toml") => TomlFile::read_from_path(path),
        _ => Err(ReadError::UnsupportedFormat(
            path.to_string_lossy().to_string(),
        )),
    }
}
