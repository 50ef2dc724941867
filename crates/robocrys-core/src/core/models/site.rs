use super::bonding::BondGroup;
use super::error::ModelError;
use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Structure-wide reference to a site, used by next-nearest-neighbor data.
pub type SiteId = usize;

/// How two coordination polyhedra are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Connectivity {
    Corner,
    Edge,
    Face,
}

impl Connectivity {
    pub const ALL: [Connectivity; 3] = [Connectivity::Corner, Connectivity::Edge, Connectivity::Face];

    pub fn as_str(&self) -> &'static str {
        match self {
            Connectivity::Corner => "corner",
            Connectivity::Edge => "edge",
            Connectivity::Face => "face",
        }
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown polyhedral connectivity: '{0}'")]
pub struct ParseConnectivityError(pub String);

impl FromStr for Connectivity {
    type Err = ParseConnectivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let name = name.strip_suffix("-sharing").unwrap_or(&name);
        match name {
            "corner" => Ok(Connectivity::Corner),
            "edge" => Ok(Connectivity::Edge),
            "face" => Ok(Connectivity::Face),
            _ => Err(ParseConnectivityError(s.to_string())),
        }
    }
}

/// Coordination geometry of a site, e.g. `octahedral` with a likeness of 0.93.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    kind: String,
    likeness: f64,
}

impl Geometry {
    pub fn new(kind: impl Into<String>, likeness: f64) -> Result<Self, ModelError> {
        if !(0.0..=1.0).contains(&likeness) {
            return Err(ModelError::LikenessOutOfRange { likeness });
        }
        Ok(Self {
            kind: kind.into(),
            likeness,
        })
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn likeness(&self) -> f64 {
        self.likeness
    }

    pub fn is_distorted(&self, distorted_tol: f64) -> bool {
        self.likeness <= distorted_tol
    }
}

/// Bond groups keyed by neighbor element, in the order they were produced.
pub type NeighborCensus = IndexMap<String, BondGroup>;

/// One inequivalent coordination environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    id: SiteId,
    element: String,
    geometry: Geometry,
    nearest_neighbors: NeighborCensus,
    next_nearest_neighbors: BTreeMap<Connectivity, Vec<SiteId>>,
    polyhedron_formula: Option<String>,
}

impl Site {
    pub fn new(
        id: SiteId,
        element: impl Into<String>,
        geometry: Geometry,
        nearest_neighbors: impl IntoIterator<Item = (String, BondGroup)>,
    ) -> Result<Self, ModelError> {
        let nearest_neighbors: NeighborCensus = nearest_neighbors.into_iter().collect();
        let element = element.into();
        if element.trim().is_empty() {
            return Err(ModelError::EmptyElement { site: id });
        }
        if nearest_neighbors.is_empty() {
            return Err(ModelError::EmptyNeighborCensus { site: id });
        }
        Ok(Self {
            id,
            element,
            geometry,
            nearest_neighbors,
            next_nearest_neighbors: BTreeMap::new(),
            polyhedron_formula: None,
        })
    }

    pub fn with_next_nearest_neighbors(mut self, nnn: BTreeMap<Connectivity, Vec<SiteId>>) -> Self {
        self.next_nearest_neighbors = nnn;
        self
    }

    pub fn with_polyhedron_formula(mut self, formula: impl Into<String>) -> Self {
        self.polyhedron_formula = Some(formula.into());
        self
    }

    pub fn id(&self) -> SiteId {
        self.id
    }

    pub fn element(&self) -> &str {
        &self.element
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn nearest_neighbors(&self) -> &NeighborCensus {
        &self.nearest_neighbors
    }

    pub fn next_nearest_neighbors(&self) -> &BTreeMap<Connectivity, Vec<SiteId>> {
        &self.next_nearest_neighbors
    }

    pub fn polyhedron_formula(&self) -> Option<&str> {
        self.polyhedron_formula.as_deref()
    }

    /// Total number of nearest neighbors over all elements.
    pub fn coordination_number(&self) -> usize {
        self.nearest_neighbors.values().map(BondGroup::n_sites).sum()
    }

    /// Connectivity types with at least one neighboring site, in corner, edge, face order.
    pub fn connectivities(&self) -> Vec<Connectivity> {
        self.next_nearest_neighbors
            .iter()
            .filter(|(_, sites)| !sites.is_empty())
            .map(|(connectivity, _)| *connectivity)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn census() -> BTreeMap<String, BondGroup> {
        let mut nn = BTreeMap::new();
        nn.insert("O2-".to_string(), BondGroup::merged("O2-", 6, vec![2.1; 6]).unwrap());
        nn
    }

    #[test]
    fn connectivity_parses_plain_and_sharing_forms() {
        assert_eq!("corner".parse::<Connectivity>(), Ok(Connectivity::Corner));
        assert_eq!("edge-sharing".parse::<Connectivity>(), Ok(Connectivity::Edge));
        assert_eq!(" Face ".parse::<Connectivity>(), Ok(Connectivity::Face));
        assert!("vertex".parse::<Connectivity>().is_err());
    }

    #[test]
    fn geometry_rejects_likeness_outside_unit_interval() {
        assert!(Geometry::new("octahedral", 1.2).is_err());
        assert!(Geometry::new("octahedral", -0.1).is_err());
        assert!(Geometry::new("octahedral", 1.0).is_ok());
    }

    #[test]
    fn geometry_at_threshold_is_distorted() {
        let geometry = Geometry::new("octahedral", 0.6).unwrap();
        assert!(geometry.is_distorted(0.6));
        assert!(!geometry.is_distorted(0.5));
    }

    #[test]
    fn site_requires_neighbors() {
        let geometry = Geometry::new("octahedral", 0.9).unwrap();
        assert_eq!(
            Site::new(3, "Ti4+", geometry, Vec::new()),
            Err(ModelError::EmptyNeighborCensus { site: 3 })
        );
    }

    #[test]
    fn connectivities_skip_empty_neighbor_lists() {
        let mut nnn = BTreeMap::new();
        nnn.insert(Connectivity::Face, vec![4]);
        nnn.insert(Connectivity::Edge, vec![]);
        nnn.insert(Connectivity::Corner, vec![1, 2]);
        let site = Site::new(0, "Ti4+", Geometry::new("octahedral", 0.9).unwrap(), census())
            .unwrap()
            .with_next_nearest_neighbors(nnn);

        assert_eq!(
            site.connectivities(),
            vec![Connectivity::Corner, Connectivity::Face]
        );
        assert_eq!(site.coordination_number(), 6);
    }
}
