use super::error::ModelError;
use super::site::Site;

pub const MAX_DIMENSIONALITY: u8 = 3;

/// One symmetry-inequivalent copy of a component.
#[derive(Debug, Clone, PartialEq)]
pub struct InequivalentComponent {
    count: usize,
    orientation: Option<String>,
    sites: Vec<Site>,
}

impl InequivalentComponent {
    pub fn new(count: usize, orientation: Option<String>, sites: Vec<Site>) -> Self {
        Self {
            count,
            orientation,
            sites,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn orientation(&self) -> Option<&str> {
        self.orientation.as_deref()
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }
}

/// A maximal connected (or molecular) unit of the structure.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    dimensionality: u8,
    count: usize,
    molecule_name: Option<String>,
    inequivalent_components: Vec<InequivalentComponent>,
    sites: Vec<Site>,
}

impl Component {
    /// Builds a component, checking the invariants the describers rely on.
    ///
    /// Non-molecular components must have sites, and 1-D/2-D components must
    /// give an orientation for every inequivalent copy. Named molecules are
    /// never decomposed into sites, so their site list may be empty.
    pub fn new(
        formula: &str,
        dimensionality: u8,
        count: usize,
        molecule_name: Option<String>,
        inequivalent_components: Vec<InequivalentComponent>,
        sites: Vec<Site>,
    ) -> Result<Self, ModelError> {
        if dimensionality > MAX_DIMENSIONALITY {
            return Err(ModelError::InvalidDimensionality(dimensionality));
        }
        if count == 0 || inequivalent_components.iter().any(|c| c.count == 0) {
            return Err(ModelError::ZeroCount {
                formula: formula.to_string(),
            });
        }
        if inequivalent_components.is_empty() {
            return Err(ModelError::NoInequivalentComponents {
                formula: formula.to_string(),
            });
        }
        if molecule_name.is_none()
            && (sites.is_empty() || inequivalent_components.iter().any(|c| c.sites.is_empty()))
        {
            return Err(ModelError::NoSites {
                formula: formula.to_string(),
            });
        }
        if matches!(dimensionality, 1 | 2)
            && inequivalent_components
                .iter()
                .any(|c| c.orientation.is_none())
        {
            return Err(ModelError::MissingOrientation {
                formula: formula.to_string(),
                dimensionality,
            });
        }

        Ok(Self {
            dimensionality,
            count,
            molecule_name,
            inequivalent_components,
            sites,
        })
    }

    pub fn dimensionality(&self) -> u8 {
        self.dimensionality
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn molecule_name(&self) -> Option<&str> {
        self.molecule_name.as_deref()
    }

    pub fn is_molecule(&self) -> bool {
        self.molecule_name.is_some()
    }

    pub fn inequivalent_components(&self) -> &[InequivalentComponent] {
        &self.inequivalent_components
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Distinct orientation labels in first-seen order.
    pub fn orientations(&self) -> Vec<&str> {
        let mut orientations: Vec<&str> = Vec::new();
        for label in self
            .inequivalent_components
            .iter()
            .filter_map(InequivalentComponent::orientation)
        {
            if !orientations.contains(&label) {
                orientations.push(label);
            }
        }
        orientations
    }
}
