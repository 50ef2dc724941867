use crate::core::language::{English, Inflector};
use crate::core::models::component::InequivalentComponent;
use crate::core::models::mineral::MineralMatch;
use crate::core::models::structure::CondensedStructure;
use crate::engine::component::ComponentDescriber;
use crate::engine::config::DescriberConfig;
use crate::engine::error::DescribeError;
use crate::engine::fragments::{Fragments, capitalize};
use crate::engine::mineral::MineralNamer;
use crate::core::utils::geometry::dimensionality_to_shape;
use tracing::{debug, info, instrument};

/// Generates a text description of a condensed structure.
///
/// The describer holds no state besides its configuration and inflector, so
/// one instance can be shared across threads and reused for many structures.
///
/// # Examples
///
/// ```no_run
/// use robocrys::core::io::condensed::read_condensed_path;
/// use robocrys::workflows::describe::Describer;
/// use std::path::Path;
///
/// let structure = read_condensed_path(Path::new("SnO2.json")).unwrap();
/// let text = Describer::default().describe(&structure).unwrap();
/// println!("{text}");
/// ```
pub struct Describer {
    config: DescriberConfig,
    inflector: Box<dyn Inflector + Send + Sync>,
}

impl Default for Describer {
    fn default() -> Self {
        Self::new(DescriberConfig::default())
    }
}

impl Describer {
    pub fn new(config: DescriberConfig) -> Self {
        Self::with_inflector(config, English)
    }

    pub fn with_inflector(config: DescriberConfig, inflector: impl Inflector + Send + Sync + 'static) -> Self {
        Self {
            config,
            inflector: Box::new(inflector),
        }
    }

    pub fn config(&self) -> &DescriberConfig {
        &self.config
    }

    fn inflector(&self) -> &dyn Inflector {
        &*self.inflector
    }

    fn component_describer(&self) -> ComponentDescriber<'_> {
        ComponentDescriber::new(self.inflector(), &self.config)
    }

    /// Describes the structure, naming it from its own mineral candidates.
    #[instrument(skip_all, name = "describe", fields(formula = %structure.formula()))]
    pub fn describe(&self, structure: &CondensedStructure) -> Result<String, DescribeError> {
        let mineral = MineralNamer::name(structure.mineral());
        self.describe_with_mineral(structure, &mineral)
    }

    /// Describes the structure using a mineral match obtained elsewhere,
    /// e.g. from a [`MatchProvider`](crate::engine::matching::MatchProvider).
    pub fn describe_with_mineral(
        &self,
        structure: &CondensedStructure,
        mineral: &MineralMatch,
    ) -> Result<String, DescribeError> {
        let mut description = Fragments::new();

        if self.config.describe_mineral {
            debug!("Describing mineral and space group");
            description.push(self.describe_mineral(structure, mineral));
        }
        if self.config.describe_component_dimensionality {
            debug!("Describing component dimensionality");
            description.push(self.describe_dimensionality(structure));
        }
        if self.config.describe_components {
            debug!(n_components = structure.n_components(), "Describing components");
            description.push(self.describe_components(structure)?);
        }

        let text = description.join();
        info!(sentences = description.len(), "Description complete");
        Ok(text)
    }

    /// `"NaCl is Rock Salt structured and crystallizes in the cubic Fm-3m space group."`
    pub fn describe_mineral(&self, structure: &CondensedStructure, mineral: &MineralMatch) -> String {
        let subject = match mineral.display_name() {
            Some(name) => format!("{} is {} structured and", structure.formula(), name),
            None => structure.formula().to_string(),
        };
        format!(
            "{} crystallizes in the {} {} space group.",
            subject,
            structure.crystal_system(),
            structure.spg_symbol()
        )
    }

    pub fn describe_dimensionality(&self, structure: &CondensedStructure) -> String {
        let en = self.inflector();
        let dimensionality = en.number_to_words(usize::from(structure.dimensionality()));

        if structure.n_components() == 1 {
            return format!("The structure is {}-dimensional.", dimensionality);
        }

        let describer = self.component_describer();
        let clauses: Vec<String> = structure
            .iter_components()
            .map(|(_, formula, component)| describer.summary_clause(formula, component))
            .collect();
        format!(
            "The structure is {}-dimensional, and consists of {}.",
            dimensionality,
            en.join(&clauses)
        )
    }

    pub fn describe_components(&self, structure: &CondensedStructure) -> Result<String, DescribeError> {
        // Next-nearest-neighbor ids are structure-wide.
        let site_index = structure.site_index();
        let describer = self.component_describer().with_site_index(&site_index);

        if let Some(component) = structure.single_component() {
            if let Some(name) = component.molecule_name() {
                return Ok(format!(
                    "The structure contains {}.",
                    describer.molecule_phrase(component.count(), name)
                ));
            }
            let mut fragments = describer.describe_sites(component.sites())?;
            if describer.contains_connected_polyhedra(component.sites()) {
                fragments.prefix_first("The structure contains ");
            }
            return Ok(fragments.join());
        }

        let mut description = Fragments::new();
        for (dimensionality, formula, component) in structure.iter_components() {
            if component.is_molecule() {
                debug!(formula, "Skipping molecular component");
                continue;
            }
            let shape = dimensionality_to_shape(dimensionality);

            match component.inequivalent_components() {
                [only] => description.extend(self.describe_sole_inequivalent(
                    &describer, formula, shape, only,
                )?),
                several => {
                    for inequivalent in several {
                        description.extend(self.describe_one_of_several(
                            &describer,
                            formula,
                            shape,
                            inequivalent,
                        )?);
                    }
                }
            }
        }
        Ok(description.join())
    }

    /// `"The SiO2 sheet contains …"` or `"In each SiO2 sheet, …"`.
    fn describe_sole_inequivalent(
        &self,
        describer: &ComponentDescriber<'_>,
        formula: &str,
        shape: &str,
        inequivalent: &InequivalentComponent,
    ) -> Result<Fragments, DescribeError> {
        let article = if inequivalent.count() == 1 { "the" } else { "each" };

        let mut fragments = describer.describe_sites(inequivalent.sites())?;
        if describer.contains_connected_polyhedra(inequivalent.sites()) {
            fragments.prefix_first(&format!("{} {} {} contains ", capitalize(article), formula, shape));
        } else {
            fragments.prefix_first(&format!("In {} {} {}, ", article, formula, shape));
        }
        Ok(fragments)
    }

    /// `"Two of the SiO2 sheets contain …"` or `"In two of the SiO2 sheets, …"`.
    fn describe_one_of_several(
        &self,
        describer: &ComponentDescriber<'_>,
        formula: &str,
        shape: &str,
        inequivalent: &InequivalentComponent,
    ) -> Result<Fragments, DescribeError> {
        let en = self.inflector();
        let count = inequivalent.count();
        let words = en.number_to_words(count);
        let shapes = en.plural(shape, 2);

        let mut fragments = describer.describe_sites(inequivalent.sites())?;
        if describer.contains_connected_polyhedra(inequivalent.sites()) {
            fragments.prefix_first(&format!(
                "{} of the {} {} {} ",
                capitalize(&words),
                formula,
                shapes,
                en.plural_verb("contains", count)
            ));
        } else {
            fragments.prefix_first(&format!("In {} of the {} {}, ", words, formula, shapes));
        }
        Ok(fragments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::bonding::{BondGroup, InequivalentBondGroup};
    use crate::core::models::component::Component;
    use crate::core::models::mineral::{MineralCandidate, MineralCandidates};
    use crate::core::models::site::{Connectivity, Geometry, NeighborCensus, Site, SiteId};
    use crate::core::models::structure::ComponentMap;
    use crate::engine::config::DescriberConfigBuilder;
    use std::collections::BTreeMap;

    fn census(entries: &[(&str, usize, &[f64])]) -> NeighborCensus {
        entries
            .iter()
            .map(|(el, n, dists)| {
                let group = InequivalentBondGroup {
                    n_sites: *n,
                    distances: dists.to_vec(),
                };
                (el.to_string(), BondGroup::inequivalent(el, *n, vec![group]).unwrap())
            })
            .collect()
    }

    fn site(id: SiteId, element: &str, kind: &str, nn: &[(&str, usize, &[f64])]) -> Site {
        Site::new(id, element, Geometry::new(kind, 1.0).unwrap(), census(nn)).unwrap()
    }

    fn components(entries: Vec<(&str, Component)>) -> ComponentMap {
        let mut map = ComponentMap::new();
        for (formula, component) in entries {
            map.entry(component.dimensionality())
                .or_default()
                .insert(formula.to_string(), component);
        }
        map
    }

    fn rock_salt(mineral: MineralCandidates) -> CondensedStructure {
        let na = site(0, "Na+", "octahedral", &[("Cl-", 6, &[2.84; 6])]);
        let cl = site(1, "Cl-", "octahedral", &[("Na+", 6, &[2.84; 6])]);
        let sites = vec![na, cl];
        let inequivalent = InequivalentComponent::new(1, None, sites.clone());
        let component = Component::new("NaCl", 3, 1, None, vec![inequivalent], sites).unwrap();
        CondensedStructure::new(
            mineral,
            "NaCl",
            "Fm-3m",
            "cubic",
            3,
            components(vec![("NaCl", component)]),
            1,
        )
        .unwrap()
    }

    fn describer() -> Describer {
        Describer::new(
            DescriberConfigBuilder::new()
                .describe_oxidation_states(false)
                .build()
                .unwrap(),
        )
    }

    /// Uses digits and a fixed article so assertions do not depend on English rules.
    struct PlainInflector;

    impl Inflector for PlainInflector {
        fn number_to_words(&self, n: usize) -> String {
            n.to_string()
        }
        fn plural(&self, noun: &str, count: usize) -> String {
            if count == 1 { noun.to_string() } else { format!("{noun}(s)") }
        }
        fn with_article(&self, phrase: &str) -> String {
            format!("the {phrase}")
        }
        fn plural_verb(&self, verb: &str, _count: usize) -> String {
            verb.to_string()
        }
        fn join_with(&self, items: &[String], conjunction: &str) -> String {
            items.join(&format!(" {conjunction} "))
        }
    }

    #[test]
    fn full_description_of_rock_salt() {
        let structure = rock_salt(MineralCandidates {
            prototype: vec![MineralCandidate::exact("Rock Salt")],
            ..MineralCandidates::none()
        });
        let text = describer().describe(&structure).unwrap();
        assert_eq!(
            text,
            "NaCl is Rock Salt structured and crystallizes in the cubic Fm-3m space group. \
             The structure is three-dimensional. \
             Na is bonded in an octahedral geometry to six equivalent Cl atoms. \
             All Na–Cl bond lengths are 2.84 Å. \
             Cl is bonded in an octahedral geometry to six equivalent Na atoms. \
             All Cl–Na bond lengths are 2.84 Å."
        );
    }

    #[test]
    fn description_is_deterministic() {
        let structure = rock_salt(MineralCandidates::none());
        let describer = describer();
        assert_eq!(
            describer.describe(&structure).unwrap(),
            describer.describe(&structure).unwrap()
        );
    }

    #[test]
    fn unmatched_single_framework_omits_structured_clause() {
        let structure = rock_salt(MineralCandidates::none());
        let describer = describer();
        let mineral = MineralNamer::name(structure.mineral());
        let sentence = describer.describe_mineral(&structure, &mineral);
        assert_eq!(sentence, "NaCl crystallizes in the cubic Fm-3m space group.");
        assert!(!sentence.contains("structured and"));
        assert_eq!(
            describer.describe_dimensionality(&structure),
            "The structure is three-dimensional."
        );
    }

    #[test]
    fn sections_can_be_disabled() {
        let structure = rock_salt(MineralCandidates::none());
        let config = DescriberConfigBuilder::new()
            .describe_mineral(false)
            .describe_components(false)
            .build()
            .unwrap();
        let text = Describer::new(config).describe(&structure).unwrap();
        assert_eq!(text, "The structure is three-dimensional.");
    }

    #[test]
    fn injected_inflector_drives_every_phrase() {
        let structure = rock_salt(MineralCandidates::none());
        let config = DescriberConfigBuilder::new()
            .describe_mineral(false)
            .describe_oxidation_states(false)
            .build()
            .unwrap();
        let text = Describer::with_inflector(config, PlainInflector)
            .describe(&structure)
            .unwrap();
        assert!(text.starts_with("The structure is 3-dimensional."));
        assert!(text.contains("Na is bonded in the octahedral geometry to 6 equivalent Cl atoms."));
    }

    fn connected_framework_site(id: SiteId, partner: SiteId) -> Site {
        let mut nnn = BTreeMap::new();
        nnn.insert(Connectivity::Corner, vec![partner]);
        site(id, "Si4+", "tetrahedral", &[("O2-", 4, &[1.61; 4])])
            .with_next_nearest_neighbors(nnn)
            .with_polyhedron_formula("SiO4")
    }

    #[test]
    fn single_component_with_polyhedra_leads_with_structure_contains() {
        let si = connected_framework_site(0, 0);
        let o = site(1, "O2-", "bent 150 degrees", &[("Si4+", 2, &[1.61, 1.61])]);
        let sites = vec![si, o];
        let inequivalent = InequivalentComponent::new(1, None, sites.clone());
        let component = Component::new("SiO2", 3, 1, None, vec![inequivalent], sites).unwrap();
        let structure = CondensedStructure::new(
            MineralCandidates::none(),
            "SiO2",
            "P3_221",
            "trigonal",
            3,
            components(vec![("SiO2", component)]),
            1,
        )
        .unwrap();

        let text = describer().describe_components(&structure).unwrap();
        assert_eq!(
            text,
            "The structure contains corner-sharing SiO4 tetrahedra. \
             O is bonded in a bent 150 degrees geometry to two equivalent Si atoms. \
             Both O–Si bond lengths are 1.61 Å."
        );
    }

    fn water() -> Component {
        let o = site(10, "O", "bent 120 degrees", &[("H", 2, &[0.97, 0.97])]);
        let inequivalent = InequivalentComponent::new(1, None, vec![o.clone()]);
        Component::new("H2O", 0, 2, Some("water".to_string()), vec![inequivalent], vec![o]).unwrap()
    }

    fn hydrated_layers(layer_inequivalents: Vec<InequivalentComponent>) -> CondensedStructure {
        let li = site(0, "Li", "linear", &[("O", 2, &[2.0, 2.0])]);
        let layer = Component::new("LiO", 2, 2, None, layer_inequivalents, vec![li]).unwrap();
        CondensedStructure::new(
            MineralCandidates::none(),
            "LiO(H2O)",
            "P1",
            "triclinic",
            2,
            components(vec![("H2O", water()), ("LiO", layer)]),
            2,
        )
        .unwrap()
    }

    fn layer_inequivalent(count: usize) -> InequivalentComponent {
        let li = site(0, "Li", "linear", &[("O", 2, &[2.0, 2.0])]);
        InequivalentComponent::new(count, Some("(0, 0, 1)".to_string()), vec![li])
    }

    #[test]
    fn multi_component_dimensionality_lists_every_group() {
        let structure = hydrated_layers(vec![layer_inequivalent(1)]);
        assert_eq!(
            describer().describe_dimensionality(&structure),
            "The structure is two-dimensional, and consists of two water molecules \
             and two LiO sheets oriented in the (0, 0, 1) direction."
        );
    }

    #[test]
    fn molecules_never_reach_the_site_describer() {
        let structure = hydrated_layers(vec![layer_inequivalent(1)]);
        let text = describer().describe_components(&structure).unwrap();
        assert!(!text.contains("O is bonded"));
        assert!(!text.contains("H2O"));
        assert_eq!(
            text,
            "In the LiO sheet, Li is bonded in a linear geometry to two equivalent O atoms. \
             Both Li–O bond lengths are 2.00 Å."
        );
    }

    #[test]
    fn repeated_inequivalent_component_uses_each() {
        let structure = hydrated_layers(vec![layer_inequivalent(2)]);
        let text = describer().describe_components(&structure).unwrap();
        assert!(text.starts_with("In each LiO sheet, Li is bonded"));
    }

    #[test]
    fn several_inequivalent_components_are_enumerated() {
        let structure = hydrated_layers(vec![layer_inequivalent(1), layer_inequivalent(3)]);
        let text = describer().describe_components(&structure).unwrap();
        assert!(text.starts_with("In one of the LiO sheets, Li is bonded"));
        assert!(text.contains("Å. In three of the LiO sheets, Li is bonded"));
    }

    #[test]
    fn several_connected_inequivalent_components_agree_in_number() {
        let si = connected_framework_site(0, 0);
        let ring = |count| {
            InequivalentComponent::new(count, Some("(1, 0, 0)".to_string()), vec![si.clone()])
        };
        let chain = Component::new("SiO3", 1, 3, None, vec![ring(1), ring(2)], vec![si.clone()]).unwrap();
        let structure = CondensedStructure::new(
            MineralCandidates::none(),
            "SiO3(H2O)",
            "P1",
            "triclinic",
            1,
            components(vec![("H2O", water()), ("SiO3", chain)]),
            2,
        )
        .unwrap();

        let text = describer().describe_components(&structure).unwrap();
        assert_eq!(
            text,
            "One of the SiO3 ribbons contains corner-sharing SiO4 tetrahedra. \
             Two of the SiO3 ribbons contain corner-sharing SiO4 tetrahedra."
        );
    }

    #[test]
    fn polyhedra_connect_across_inequivalent_components() {
        let first = connected_framework_site(0, 1);
        let second = connected_framework_site(1, 0);
        let chain = Component::new(
            "SiO3",
            1,
            3,
            None,
            vec![
                InequivalentComponent::new(1, Some("(1, 0, 0)".to_string()), vec![first.clone()]),
                InequivalentComponent::new(2, Some("(1, 0, 0)".to_string()), vec![second.clone()]),
            ],
            vec![first, second],
        )
        .unwrap();
        let structure = CondensedStructure::new(
            MineralCandidates::none(),
            "SiO3(H2O)",
            "P1",
            "triclinic",
            1,
            components(vec![("H2O", water()), ("SiO3", chain)]),
            2,
        )
        .unwrap();

        let text = describer().describe_components(&structure).unwrap();
        assert_eq!(
            text,
            "One of the SiO3 ribbons contains corner-sharing SiO4 tetrahedra. \
             Two of the SiO3 ribbons contain corner-sharing SiO4 tetrahedra."
        );
    }

    #[test]
    fn single_molecular_structure_names_the_molecule() {
        let structure = CondensedStructure::new(
            MineralCandidates::none(),
            "H2O",
            "P1",
            "triclinic",
            0,
            components(vec![("H2O", water())]),
            1,
        )
        .unwrap();
        let text = describer().describe_components(&structure).unwrap();
        assert_eq!(text, "The structure contains two water molecules.");
    }
}
