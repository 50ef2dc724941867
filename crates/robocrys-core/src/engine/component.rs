use super::config::DescriberConfig;
use super::error::DescribeError;
use super::fragments::Fragments;
use super::polyhedra::{ConnectedPolyhedraDescriber, shared_connectivities};
use super::site::SiteDescriber;
use crate::core::language::Inflector;
use crate::core::models::component::Component;
use crate::core::models::site::{Site, SiteId};
use crate::core::utils::elements::is_cation;
use crate::core::utils::geometry::{dimensionality_to_shape, is_connected_geometry};
use std::collections::HashMap;
use tracing::debug;

/// Describes the sites of a component: connected polyhedra first, then one
/// sentence per remaining site.
pub struct ComponentDescriber<'a> {
    inflector: &'a dyn Inflector,
    config: &'a DescriberConfig,
    site_index: Option<&'a HashMap<SiteId, &'a Site>>,
}

impl<'a> ComponentDescriber<'a> {
    pub fn new(inflector: &'a dyn Inflector, config: &'a DescriberConfig) -> Self {
        Self {
            inflector,
            config,
            site_index: None,
        }
    }

    /// Resolves next-nearest neighbors through a structure-wide index instead
    /// of only the sites being described.
    pub fn with_site_index(mut self, site_index: &'a HashMap<SiteId, &'a Site>) -> Self {
        self.site_index = Some(site_index);
        self
    }

    fn resolver<'s>(&'s self, sites: &'s [Site]) -> impl Fn(SiteId) -> Option<&'s Site> + 's {
        move |id| match self.site_index {
            Some(index) => index.get(&id).copied(),
            None => sites.iter().find(|site| site.id() == id),
        }
    }

    /// Splits sites into connected polyhedra and everything else.
    ///
    /// A site only counts as a connected polyhedron when it carries a
    /// polyhedron formula, passes the cation filter, has a connected
    /// geometry and shares at least one corner, edge or face with another
    /// connected polyhedron.
    pub fn partition_sites<'s>(&self, sites: &'s [Site]) -> (Vec<&'s Site>, Vec<&'s Site>) {
        let resolve = self.resolver(sites);
        sites
            .iter()
            .partition(|site| self.is_connected_polyhedron(site, &resolve))
    }

    pub fn contains_connected_polyhedra(&self, sites: &[Site]) -> bool {
        let resolve = self.resolver(sites);
        sites
            .iter()
            .any(|site| self.is_connected_polyhedron(site, &resolve))
    }

    fn is_connected_polyhedron<'s>(
        &self,
        site: &Site,
        resolve: impl Fn(SiteId) -> Option<&'s Site>,
    ) -> bool {
        site.polyhedron_formula().is_some()
            && (!self.config.only_describe_cation_polyhedra_connectivity || is_cation(site.element()))
            && is_connected_geometry(site.geometry().kind())
            && !shared_connectivities(site, resolve).is_empty()
    }

    pub fn describe(&self, sites: &[Site]) -> Result<String, DescribeError> {
        Ok(self.describe_sites(sites)?.join())
    }

    /// The connected-polyhedra sentence (without a lead-in) followed by the
    /// site sentences.
    pub fn describe_sites(&self, sites: &[Site]) -> Result<Fragments, DescribeError> {
        let (connected, others) = self.partition_sites(sites);
        debug!(
            connected = connected.len(),
            others = others.len(),
            "Describing component sites"
        );

        let mut fragments = Fragments::new();
        if let Some(polyhedra) =
            ConnectedPolyhedraDescriber::new(self.inflector).describe(&connected, self.resolver(sites))
        {
            fragments.push(format!("{}.", polyhedra));
        }

        let site_describer = SiteDescriber::new(self.inflector, self.config);
        for site in others {
            fragments.extend(site_describer.fragments(site)?);
        }
        Ok(fragments)
    }

    /// `"two water molecules"`.
    pub fn molecule_phrase(&self, count: usize, molecule_name: &str) -> String {
        format!(
            "{} {} {}",
            self.inflector.number_to_words(count),
            molecule_name,
            self.inflector.plural("molecule", count)
        )
    }

    /// `"oriented in the (0, 0, 1) direction"` for 1-D and 2-D components.
    pub fn orientation_phrase(&self, component: &Component) -> Option<String> {
        if !matches!(component.dimensionality(), 1 | 2) {
            return None;
        }
        let orientations: Vec<String> = component
            .orientations()
            .into_iter()
            .map(str::to_string)
            .collect();
        if orientations.is_empty() {
            return None;
        }
        Some(format!(
            "oriented in the {} {}",
            self.inflector.join(&orientations),
            self.inflector.plural("direction", orientations.len())
        ))
    }

    /// The clause naming a component group in the dimensionality summary,
    /// e.g. `"two LiO2 sheets oriented in the (0, 0, 1) direction"`.
    pub fn summary_clause(&self, formula: &str, component: &Component) -> String {
        let count = component.count();
        let mut clause = match component.molecule_name() {
            Some(name) => self.molecule_phrase(count, name),
            None => format!(
                "{} {} {}",
                self.inflector.number_to_words(count),
                formula,
                self.inflector
                    .plural(dimensionality_to_shape(component.dimensionality()), count)
            ),
        };
        if let Some(orientation) = self.orientation_phrase(component) {
            clause.push(' ');
            clause.push_str(&orientation);
        }
        clause
    }
}
