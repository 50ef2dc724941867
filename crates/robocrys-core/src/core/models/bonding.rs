use super::error::ModelError;

/// Bonds to one symmetry-inequivalent group of neighbor sites.
#[derive(Debug, Clone, PartialEq)]
pub struct InequivalentBondGroup {
    pub n_sites: usize,
    pub distances: Vec<f64>,
}

/// The distances of a [`BondGroup`], either split into inequivalent groups or
/// merged upstream into a single flat list.
#[derive(Debug, Clone, PartialEq)]
pub enum BondDistances {
    Inequivalent(Vec<InequivalentBondGroup>),
    Merged(Vec<f64>),
}

/// The nearest-neighbor bonds from a site to all neighbors of one element.
///
/// When sites have been merged upstream there can be more distances than
/// `n_sites`: `n_sites` counts bonds to a single site while the distances
/// cover every merged site.
#[derive(Debug, Clone, PartialEq)]
pub struct BondGroup {
    n_sites: usize,
    distances: BondDistances,
}

impl BondGroup {
    pub fn inequivalent(
        element: &str,
        n_sites: usize,
        groups: Vec<InequivalentBondGroup>,
    ) -> Result<Self, ModelError> {
        if groups.is_empty() {
            return Err(ModelError::EmptyBondGroups {
                element: element.to_string(),
            });
        }
        if groups.iter().any(|g| g.distances.is_empty()) {
            return Err(ModelError::EmptyDistances {
                element: element.to_string(),
            });
        }
        Self::checked(element, n_sites, BondDistances::Inequivalent(groups))
    }

    pub fn merged(element: &str, n_sites: usize, distances: Vec<f64>) -> Result<Self, ModelError> {
        if distances.is_empty() {
            return Err(ModelError::EmptyDistances {
                element: element.to_string(),
            });
        }
        Self::checked(element, n_sites, BondDistances::Merged(distances))
    }

    fn checked(element: &str, n_sites: usize, distances: BondDistances) -> Result<Self, ModelError> {
        if n_sites == 0 {
            return Err(ModelError::NoNeighborSites {
                element: element.to_string(),
            });
        }
        Ok(Self { n_sites, distances })
    }

    pub fn n_sites(&self) -> usize {
        self.n_sites
    }

    pub fn distances(&self) -> &BondDistances {
        &self.distances
    }

    pub fn inequivalent_groups(&self) -> Option<&[InequivalentBondGroup]> {
        match &self.distances {
            BondDistances::Inequivalent(groups) => Some(groups),
            BondDistances::Merged(_) => None,
        }
    }

    /// Number of inequivalent groups, or `None` for merged data.
    pub fn n_inequivalent_groups(&self) -> Option<usize> {
        self.inequivalent_groups().map(<[_]>::len)
    }

    /// True when every neighbor belongs to one inequivalent group of more than one site.
    pub fn is_equivalent(&self) -> bool {
        self.n_inequivalent_groups() == Some(1) && self.n_sites > 1
    }

    /// All distances, combined across inequivalent groups.
    pub fn all_distances(&self) -> Vec<f64> {
        match &self.distances {
            BondDistances::Inequivalent(groups) => groups
                .iter()
                .flat_map(|g| g.distances.iter().copied())
                .collect(),
            BondDistances::Merged(distances) => distances.clone(),
        }
    }
}
