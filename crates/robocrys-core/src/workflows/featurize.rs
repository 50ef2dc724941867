use crate::core::models::site::{Connectivity, Site, SiteId};
use crate::core::models::structure::CondensedStructure;
use crate::engine::config::DEFAULT_DISTORTED_TOL;
use crate::engine::error::DescribeError;
use std::collections::{BTreeSet, HashMap};

/// Structural yes/no and fraction queries over a condensed structure, used
/// to build machine-learning features.
///
/// Every next-nearest-neighbor reference is resolved on construction, so
/// the queries themselves cannot fail.
pub struct StructureFeatures<'a> {
    structure: &'a CondensedStructure,
    sites: HashMap<SiteId, &'a Site>,
    weighted_sites: Vec<(&'a Site, usize)>,
    distorted_tol: f64,
}

impl<'a> StructureFeatures<'a> {
    pub fn new(structure: &'a CondensedStructure) -> Result<Self, DescribeError> {
        let sites = structure.site_index();

        for site in sites.values() {
            for neighbors in site.next_nearest_neighbors().values() {
                if let Some(&missing) = neighbors.iter().find(|&id| !sites.contains_key(id)) {
                    return Err(DescribeError::UnknownSite {
                        site: site.id(),
                        reference: missing,
                    });
                }
            }
        }

        let mut weighted_sites = Vec::new();
        for (_, _, component) in structure.iter_components() {
            for inequivalent in component.inequivalent_components() {
                let weight = component.count() * inequivalent.count();
                weighted_sites.extend(inequivalent.sites().iter().map(|site| (site, weight)));
            }
        }

        Ok(Self {
            structure,
            sites,
            weighted_sites,
            distorted_tol: DEFAULT_DISTORTED_TOL,
        })
    }

    pub fn with_distorted_tol(mut self, distorted_tol: f64) -> Self {
        self.distorted_tol = distorted_tol;
        self
    }

    /// Dimensionality of every component, repeated by component count.
    pub fn component_dimensionalities(&self) -> Vec<u8> {
        let mut dimensionalities: Vec<u8> = self
            .structure
            .iter_components()
            .flat_map(|(dim, _, component)| std::iter::repeat_n(dim, component.count()))
            .collect();
        dimensionalities.sort_unstable();
        dimensionalities
    }

    pub fn contains_named_molecule(&self) -> bool {
        self.structure
            .iter_components()
            .any(|(_, _, component)| component.is_molecule())
    }

    pub fn contains_molecule(&self, molecule_name: &str) -> bool {
        self.structure
            .iter_components()
            .any(|(_, _, component)| component.molecule_name() == Some(molecule_name))
    }

    pub fn contains_polyhedra(&self) -> bool {
        self.sites.values().any(|site| site.polyhedron_formula().is_some())
    }

    /// Whether any 0-D unit sits between the other components.
    pub fn is_intercalated(&self) -> bool {
        self.component_dimensionalities().contains(&0)
    }

    /// Whether more than one 3-D framework is present.
    pub fn is_interpenetrated(&self) -> bool {
        self.component_dimensionalities()
            .iter()
            .filter(|&&dim| dim == 3)
            .count()
            > 1
    }

    /// Whether the structure is made only of the given dimensionalities.
    pub fn is_dimensionality(&self, dimensionalities: &[u8]) -> bool {
        let wanted: BTreeSet<u8> = dimensionalities.iter().copied().collect();
        let present: BTreeSet<u8> = self.component_dimensionalities().into_iter().collect();
        wanted == present
    }

    pub fn contains_corner_sharing_polyhedra(&self) -> bool {
        self.contains_sharing_polyhedra(Connectivity::Corner, None)
    }

    pub fn contains_edge_sharing_polyhedra(&self) -> bool {
        self.contains_sharing_polyhedra(Connectivity::Edge, None)
    }

    pub fn contains_face_sharing_polyhedra(&self) -> bool {
        self.contains_sharing_polyhedra(Connectivity::Face, None)
    }

    /// Whether two polyhedra of `geometry` share a corner, edge or face.
    pub fn contains_connected_geometry(&self, connectivity: Connectivity, geometry: &str) -> bool {
        self.contains_sharing_polyhedra(connectivity, Some(geometry))
    }

    fn contains_sharing_polyhedra(&self, connectivity: Connectivity, geometry: Option<&str>) -> bool {
        let matches_geometry = |site: &Site| geometry.is_none_or(|g| site.geometry().kind() == g);

        self.sites.values().any(|site| {
            site.polyhedron_formula().is_some()
                && matches_geometry(*site)
                && site
                    .next_nearest_neighbors()
                    .get(&connectivity)
                    .into_iter()
                    .flatten()
                    .filter_map(|id| self.sites.get(id))
                    .any(|other| other.polyhedron_formula().is_some() && matches_geometry(*other))
        })
    }

    /// Whether a site has the geometry; `distorted` optionally restricts the
    /// match to distorted (or undistorted) sites.
    pub fn contains_geometry_type(&self, geometry: &str, distorted: Option<bool>) -> bool {
        self.sites.values().any(|site| {
            site.geometry().kind() == geometry
                && distorted.is_none_or(|d| site.geometry().is_distorted(self.distorted_tol) == d)
        })
    }

    pub fn frac_sites_polyhedra(&self) -> f64 {
        self.weighted_fraction(|site| site.polyhedron_formula().is_some())
    }

    pub fn frac_site_geometry(&self, geometry: &str) -> f64 {
        self.weighted_fraction(|site| site.geometry().kind() == geometry)
    }

    pub fn frac_sites_n_coordinate(&self, n_neighbors: usize) -> f64 {
        self.weighted_fraction(|site| site.coordination_number() == n_neighbors)
    }

    /// Fraction of all sites, each weighted by how often it occurs.
    fn weighted_fraction(&self, predicate: impl Fn(&Site) -> bool) -> f64 {
        let total: usize = self.weighted_sites.iter().map(|(_, w)| w).sum();
        if total == 0 {
            return 0.0;
        }
        let matching: usize = self
            .weighted_sites
            .iter()
            .filter(|&&(site, _)| predicate(site))
            .map(|(_, w)| w)
            .sum();
        matching as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::bonding::BondGroup;
    use crate::core::models::component::{Component, InequivalentComponent};
    use crate::core::models::mineral::MineralCandidates;
    use crate::core::models::site::Geometry;
    use crate::core::models::structure::ComponentMap;
    use std::collections::BTreeMap;

    fn site(id: SiteId, kind: &str, likeness: f64, n: usize) -> Site {
        let mut census = BTreeMap::new();
        census.insert("O".to_string(), BondGroup::merged("O", n, vec![2.0; n]).unwrap());
        Site::new(id, "M", Geometry::new(kind, likeness).unwrap(), census).unwrap()
    }

    fn polyhedron(id: SiteId, kind: &str, n: usize, connectivity: Connectivity, to: Vec<SiteId>) -> Site {
        let mut nnn = BTreeMap::new();
        nnn.insert(connectivity, to);
        site(id, kind, 0.95, n)
            .with_next_nearest_neighbors(nnn)
            .with_polyhedron_formula(format!("MO{n}"))
    }

    fn structure(entries: Vec<(&str, Component)>) -> CondensedStructure {
        let n_components = entries.iter().map(|(_, c)| c.count()).sum::<usize>().max(entries.len());
        let mut map = ComponentMap::new();
        for (formula, component) in entries {
            map.entry(component.dimensionality())
                .or_default()
                .insert(formula.to_string(), component);
        }
        CondensedStructure::new(MineralCandidates::none(), "X", "P1", "triclinic", 3, map, n_components)
            .unwrap()
    }

    fn framework(formula_sites: Vec<Site>, inequivalent_count: usize, count: usize) -> Component {
        let inequivalent = InequivalentComponent::new(inequivalent_count, None, formula_sites.clone());
        Component::new("MO", 3, count, None, vec![inequivalent], formula_sites).unwrap()
    }

    fn spinel_like() -> CondensedStructure {
        let tet = polyhedron(0, "tetrahedral", 4, Connectivity::Corner, vec![1]);
        let oct = polyhedron(1, "octahedral", 6, Connectivity::Edge, vec![1]);
        let anion = site(2, "trigonal planar", 0.4, 3);
        structure(vec![("MO", framework(vec![tet, oct, anion], 1, 1))])
    }

    #[test]
    fn sharing_queries_require_polyhedra_on_both_sides() {
        let s = spinel_like();
        let features = StructureFeatures::new(&s).unwrap();
        assert!(features.contains_polyhedra());
        assert!(features.contains_corner_sharing_polyhedra());
        assert!(features.contains_edge_sharing_polyhedra());
        assert!(!features.contains_face_sharing_polyhedra());
    }

    #[test]
    fn connected_geometry_requires_matching_partner_geometry() {
        let s = spinel_like();
        let features = StructureFeatures::new(&s).unwrap();
        assert!(features.contains_connected_geometry(Connectivity::Edge, "octahedral"));
        assert!(!features.contains_connected_geometry(Connectivity::Corner, "tetrahedral"));
    }

    #[test]
    fn geometry_queries_honor_the_distortion_filter() {
        let s = spinel_like();
        let features = StructureFeatures::new(&s).unwrap();
        assert!(features.contains_geometry_type("trigonal planar", None));
        assert!(features.contains_geometry_type("trigonal planar", Some(true)));
        assert!(!features.contains_geometry_type("trigonal planar", Some(false)));
        assert!(features.contains_geometry_type("octahedral", Some(false)));
        assert!(!features.contains_geometry_type("cuboctahedral", None));
    }

    #[test]
    fn fractions_are_weighted_by_multiplicity() {
        let tet = polyhedron(0, "tetrahedral", 4, Connectivity::Corner, vec![0]);
        let anion = site(1, "bent 120 degrees", 0.9, 2);
        let polyhedral = InequivalentComponent::new(1, None, vec![tet.clone()]);
        let anionic = InequivalentComponent::new(3, None, vec![anion.clone()]);
        let component = Component::new("MO", 3, 1, None, vec![polyhedral, anionic], vec![tet, anion]).unwrap();
        let s = structure(vec![("MO", component)]);
        let features = StructureFeatures::new(&s).unwrap();

        assert_eq!(features.frac_sites_polyhedra(), 0.25);
        assert_eq!(features.frac_site_geometry("bent 120 degrees"), 0.75);
        assert_eq!(features.frac_sites_n_coordinate(4), 0.25);
        assert_eq!(features.frac_sites_n_coordinate(6), 0.0);
    }

    #[test]
    fn dimensionality_queries() {
        let frameworks = framework(vec![site(0, "octahedral", 1.0, 6)], 1, 2);
        let water_site = site(5, "bent 104 degrees", 1.0, 2);
        let water = Component::new(
            "H2O",
            0,
            1,
            Some("water".to_string()),
            vec![InequivalentComponent::new(1, None, vec![water_site.clone()])],
            vec![water_site],
        )
        .unwrap();
        let s = structure(vec![("MO", frameworks), ("H2O", water)]);
        let features = StructureFeatures::new(&s).unwrap();

        assert_eq!(features.component_dimensionalities(), vec![0, 3, 3]);
        assert!(features.is_intercalated());
        assert!(features.is_interpenetrated());
        assert!(features.is_dimensionality(&[3, 0]));
        assert!(!features.is_dimensionality(&[3]));
        assert!(features.contains_named_molecule());
        assert!(features.contains_molecule("water"));
        assert!(!features.contains_molecule("ammonia"));
    }

    #[test]
    fn unresolved_neighbor_reference_is_an_error() {
        let dangling = polyhedron(0, "octahedral", 6, Connectivity::Face, vec![42]);
        let s = structure(vec![("MO", framework(vec![dangling], 1, 1))]);
        assert!(matches!(
            StructureFeatures::new(&s),
            Err(DescribeError::UnknownSite {
                site: 0,
                reference: 42
            })
        ));
    }
}
