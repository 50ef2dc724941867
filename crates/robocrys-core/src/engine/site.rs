use super::bond_lengths::BondLengthDescriber;
use super::config::DescriberConfig;
use super::error::DescribeError;
use super::fragments::Fragments;
use crate::core::language::Inflector;
use crate::core::models::bonding::BondGroup;
use crate::core::models::site::Site;
use crate::core::utils::elements::strip_oxidation_state;
use tracing::trace;

/// Describes the coordination geometry and bonding of a single site.
pub struct SiteDescriber<'a> {
    inflector: &'a dyn Inflector,
    distorted_tol: f64,
    describe_bond_lengths: bool,
    describe_oxidation_states: bool,
}

impl<'a> SiteDescriber<'a> {
    pub fn new(inflector: &'a dyn Inflector, config: &DescriberConfig) -> Self {
        Self {
            inflector,
            distorted_tol: config.distorted_tol,
            describe_bond_lengths: config.describe_bond_lengths,
            describe_oxidation_states: config.describe_oxidation_states,
        }
    }

    pub fn describe(&self, site: &Site) -> Result<String, DescribeError> {
        trace!(site = site.id(), element = site.element(), "Describing site");
        Ok(self.fragments(site)?.join())
    }

    pub fn fragments(&self, site: &Site) -> Result<Fragments, DescribeError> {
        let en = self.inflector;
        let element = self.label(site.element());

        let geometry = site.geometry();
        let descriptor = if geometry.is_distorted(self.distorted_tol) {
            format!("distorted {}", geometry.kind())
        } else {
            geometry.kind().to_string()
        };
        let lead = format!(
            "{} is bonded in {} geometry to",
            element,
            en.with_article(&descriptor)
        );

        let census = site.nearest_neighbors();
        let mut fragments = Fragments::new();

        if census.len() == 1 {
            if let Some((bond_element, group)) = census.iter().next() {
                let label = self.label(bond_element);
                let atoms = if group.n_sites() == 1 {
                    format!("one {} atom.", label)
                } else {
                    format!("{} atoms.", self.neighbor_count(&label, group))
                };
                fragments.push(format!("{} {}", lead, atoms));
                self.push_bond_lengths(&mut fragments, site.element(), bond_element, group)?;
            }
            return Ok(fragments);
        }

        let counts: Vec<String> = census
            .iter()
            .map(|(bond_element, group)| self.neighbor_count(&self.label(bond_element), group))
            .collect();
        fragments.push(format!("{} {} atoms.", lead, en.join(&counts)));

        let mut qualified = false;
        for (bond_element, group) in census {
            let n_groups = group.n_inequivalent_groups().unwrap_or(0);
            if n_groups > 1 && group.n_sites() > 1 {
                let intro = if qualified { "The" } else { "Of these, the" };
                qualified = true;
                fragments.push(format!(
                    "{} {} atoms are found in {} distinct environments.",
                    intro,
                    self.label(bond_element),
                    en.number_to_words(n_groups)
                ));
            }
            self.push_bond_lengths(&mut fragments, site.element(), bond_element, group)?;
        }
        Ok(fragments)
    }

    /// `"six equivalent Cl"`, `"two O"` or `"one Na"`.
    fn neighbor_count(&self, label: &str, group: &BondGroup) -> String {
        let equivalent = if group.is_equivalent() { " equivalent " } else { " " };
        format!(
            "{}{}{}",
            self.inflector.number_to_words(group.n_sites()),
            equivalent,
            label
        )
    }

    fn push_bond_lengths(
        &self,
        fragments: &mut Fragments,
        element: &str,
        bond_element: &str,
        group: &BondGroup,
    ) -> Result<(), DescribeError> {
        if self.describe_bond_lengths {
            // Bond-length sentences always use bare element symbols.
            fragments.push(BondLengthDescriber::new(self.inflector).describe(
                strip_oxidation_state(element),
                strip_oxidation_state(bond_element),
                &group.all_distances(),
            )?);
        }
        Ok(())
    }

    fn label(&self, element: &str) -> String {
        if self.describe_oxidation_states {
            element.to_string()
        } else {
            strip_oxidation_state(element).to_string()
        }
    }
}
