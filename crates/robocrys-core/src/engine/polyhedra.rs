use crate::core::language::Inflector;
use crate::core::models::site::{Connectivity, Site, SiteId};
use crate::core::utils::geometry::{CONNECTED_GEOMETRIES, is_connected_geometry, polyhedra_noun};
use tracing::trace;

/// Connectivities through which `site` joins another connected polyhedron,
/// in corner, edge, face order.
///
/// A neighbor only counts when `resolve` finds it and it carries a
/// polyhedron formula with a connected geometry; sharing a corner with a
/// trigonal-planar unit does not make a tetrahedron corner-sharing.
pub fn shared_connectivities<'s>(
    site: &Site,
    resolve: impl Fn(SiteId) -> Option<&'s Site>,
) -> Vec<Connectivity> {
    Connectivity::ALL
        .into_iter()
        .filter(|connectivity| {
            site.next_nearest_neighbors()
                .get(connectivity)
                .into_iter()
                .flatten()
                .filter_map(|&id| resolve(id))
                .any(|other| {
                    other.polyhedron_formula().is_some()
                        && is_connected_geometry(other.geometry().kind())
                })
        })
        .collect()
}

/// Summarizes how polyhedron-bearing sites share corners, edges and faces.
pub struct ConnectedPolyhedraDescriber<'a> {
    inflector: &'a dyn Inflector,
}

impl<'a> ConnectedPolyhedraDescriber<'a> {
    pub fn new(inflector: &'a dyn Inflector) -> Self {
        Self { inflector }
    }

    /// One clause per (geometry, connectivity set) pair, joined into a single
    /// list; `None` when no site is a connected polyhedron. Neighbor ids are
    /// looked up through `resolve`.
    pub fn describe<'s>(
        &self,
        sites: &[&Site],
        resolve: impl Fn(SiteId) -> Option<&'s Site>,
    ) -> Option<String> {
        let mut clauses = Vec::new();

        for geometry in CONNECTED_GEOMETRIES {
            let Some(noun) = polyhedra_noun(geometry) else {
                continue;
            };

            let mut groups: Vec<(Vec<Connectivity>, Vec<String>)> = Vec::new();
            for site in sites.iter().filter(|s| s.geometry().kind() == geometry) {
                let Some(formula) = site.polyhedron_formula() else {
                    continue;
                };
                let connectivities = shared_connectivities(site, &resolve);
                if connectivities.is_empty() {
                    continue;
                }

                match groups.iter_mut().find(|(key, _)| *key == connectivities) {
                    Some((_, formulas)) => {
                        if !formulas.iter().any(|f| f == formula) {
                            formulas.push(formula.to_string());
                        }
                    }
                    None => groups.push((connectivities, vec![formula.to_string()])),
                }
            }

            for (connectivities, formulas) in &groups {
                trace!(geometry, formulas = formulas.len(), "Connected polyhedra group");
                clauses.push(format!(
                    "{} {} {}",
                    self.connectivity_phrase(connectivities),
                    self.inflector.join(formulas),
                    noun
                ));
            }
        }

        if clauses.is_empty() {
            None
        } else {
            Some(self.inflector.join(&clauses))
        }
    }

    /// `"corner-sharing"` or `"a mixture of corner- and edge-sharing"`.
    pub fn connectivity_phrase(&self, connectivities: &[Connectivity]) -> String {
        match connectivities {
            [single] => format!("{}-sharing", single),
            _ => {
                let parts: Vec<String> = connectivities.iter().map(|c| format!("{}-", c)).collect();
                format!("a mixture of {}sharing", self.inflector.join(&parts))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::language::English;
    use crate::core::models::bonding::BondGroup;
    use crate::core::models::site::Geometry;
    use std::collections::BTreeMap;

    fn polyhedron(id: SiteId, kind: &str, formula: &str, nnn: &[(Connectivity, &[SiteId])]) -> Site {
        let census = vec![("O".to_string(), BondGroup::merged("O", 4, vec![1.6; 4]).unwrap())];
        let nnn: BTreeMap<Connectivity, Vec<SiteId>> =
            nnn.iter().map(|(c, ids)| (*c, ids.to_vec())).collect();
        Site::new(id, "Si", Geometry::new(kind, 0.95).unwrap(), census)
            .unwrap()
            .with_next_nearest_neighbors(nnn)
            .with_polyhedron_formula(formula)
    }

    fn describe(sites: &[&Site]) -> Option<String> {
        ConnectedPolyhedraDescriber::new(&English)
            .describe(sites, |id| sites.iter().copied().find(|s| s.id() == id))
    }

    #[test]
    fn single_connectivity_is_hyphenated() {
        let site = polyhedron(0, "tetrahedral", "SiO4", &[(Connectivity::Corner, &[0])]);
        assert_eq!(describe(&[&site]).as_deref(), Some("corner-sharing SiO4 tetrahedra"));
    }

    #[test]
    fn mixed_connectivities_are_joined() {
        let ti = polyhedron(
            0,
            "octahedral",
            "TiO6",
            &[(Connectivity::Edge, &[0]), (Connectivity::Corner, &[0])],
        );
        assert_eq!(
            describe(&[&ti]).as_deref(),
            Some("a mixture of corner- and edge-sharing TiO6 octahedra")
        );
    }

    #[test]
    fn tetrahedra_precede_octahedra_and_formulas_are_deduplicated() {
        let oct = polyhedron(0, "octahedral", "MgO6", &[(Connectivity::Corner, &[1])]);
        let tet_a = polyhedron(1, "tetrahedral", "SiO4", &[(Connectivity::Corner, &[0])]);
        let tet_b = polyhedron(2, "tetrahedral", "SiO4", &[(Connectivity::Corner, &[0])]);
        let tet_c = polyhedron(3, "tetrahedral", "AlO4", &[(Connectivity::Corner, &[0])]);
        assert_eq!(
            describe(&[&oct, &tet_a, &tet_b, &tet_c]).as_deref(),
            Some("corner-sharing SiO4 and AlO4 tetrahedra and corner-sharing MgO6 octahedra")
        );
    }

    #[test]
    fn geometry_must_match_exactly() {
        let site = polyhedron(0, "cuboctahedral", "BaO12", &[(Connectivity::Face, &[0])]);
        assert_eq!(describe(&[&site]).as_deref(), Some("face-sharing BaO12 cuboctahedra"));
    }

    #[test]
    fn isolated_or_unconnected_sites_give_none() {
        let isolated = polyhedron(0, "tetrahedral", "SiO4", &[(Connectivity::Corner, &[])]);
        let planar = polyhedron(1, "trigonal planar", "BO3", &[(Connectivity::Corner, &[0])]);
        assert_eq!(describe(&[&isolated, &planar]), None);
    }

    #[test]
    fn only_connected_polyhedra_count_as_shared_neighbors() {
        let tet = polyhedron(
            0,
            "tetrahedral",
            "SiO4",
            &[(Connectivity::Corner, &[1]), (Connectivity::Edge, &[2])],
        );
        let planar = polyhedron(1, "trigonal planar", "BO3", &[(Connectivity::Corner, &[0])]);
        let oct = polyhedron(2, "octahedral", "AlO6", &[(Connectivity::Edge, &[0])]);
        let sites = [&tet, &planar, &oct];
        let resolve = |id: SiteId| sites.iter().copied().find(|s| s.id() == id);

        assert_eq!(shared_connectivities(&tet, resolve), vec![Connectivity::Edge]);
        assert_eq!(
            describe(&sites).as_deref(),
            Some("edge-sharing SiO4 tetrahedra and edge-sharing AlO6 octahedra")
        );
    }

    #[test]
    fn unresolved_neighbors_are_not_shared() {
        let tet = polyhedron(0, "tetrahedral", "SiO4", &[(Connectivity::Corner, &[7])]);
        assert!(shared_connectivities(&tet, |_| None).is_empty());
        assert_eq!(describe(&[&tet]), None);
    }

    #[test]
    fn three_way_mixture_uses_serial_comma() {
        let phrase = ConnectedPolyhedraDescriber::new(&English).connectivity_phrase(&Connectivity::ALL);
        assert_eq!(phrase, "a mixture of corner-, edge-, and face-sharing");
    }
}
