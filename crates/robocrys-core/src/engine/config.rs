use thiserror::Error;

pub const DEFAULT_DISTORTED_TOL: f64 = 0.6;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid value {value} for '{name}': {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Options controlling which sections are described and how.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriberConfig {
    /// Likeness at or below which a site geometry is called "distorted".
    pub distorted_tol: f64,
    pub describe_mineral: bool,
    pub describe_component_dimensionality: bool,
    pub describe_components: bool,
    /// Keep oxidation states in element labels, e.g. `Fe2+` instead of `Fe`.
    pub describe_oxidation_states: bool,
    pub only_describe_cation_polyhedra_connectivity: bool,
    pub describe_bond_lengths: bool,
}

impl Default for DescriberConfig {
    fn default() -> Self {
        Self {
            distorted_tol: DEFAULT_DISTORTED_TOL,
            describe_mineral: true,
            describe_component_dimensionality: true,
            describe_components: true,
            describe_oxidation_states: true,
            only_describe_cation_polyhedra_connectivity: false,
            describe_bond_lengths: true,
        }
    }
}

#[derive(Default)]
pub struct DescriberConfigBuilder {
    distorted_tol: Option<f64>,
    describe_mineral: Option<bool>,
    describe_component_dimensionality: Option<bool>,
    describe_components: Option<bool>,
    describe_oxidation_states: Option<bool>,
    only_describe_cation_polyhedra_connectivity: Option<bool>,
    describe_bond_lengths: Option<bool>,
}

impl DescriberConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn distorted_tol(mut self, tol: f64) -> Self {
        self.distorted_tol = Some(tol);
        self
    }
    pub fn describe_mineral(mut self, enabled: bool) -> Self {
        self.describe_mineral = Some(enabled);
        self
    }
    pub fn describe_component_dimensionality(mut self, enabled: bool) -> Self {
        self.describe_component_dimensionality = Some(enabled);
        self
    }
    pub fn describe_components(mut self, enabled: bool) -> Self {
        self.describe_components = Some(enabled);
        self
    }
    pub fn describe_oxidation_states(mut self, enabled: bool) -> Self {
        self.describe_oxidation_states = Some(enabled);
        self
    }
    pub fn only_describe_cation_polyhedra_connectivity(mut self, enabled: bool) -> Self {
        self.only_describe_cation_polyhedra_connectivity = Some(enabled);
        self
    }
    pub fn describe_bond_lengths(mut self, enabled: bool) -> Self {
        self.describe_bond_lengths = Some(enabled);
        self
    }

    pub fn build(self) -> Result<DescriberConfig, ConfigError> {
        let defaults = DescriberConfig::default();

        let distorted_tol = self.distorted_tol.unwrap_or(defaults.distorted_tol);
        if !(0.0..=1.0).contains(&distorted_tol) {
            return Err(ConfigError::InvalidParameter {
                name: "distorted_tol",
                value: distorted_tol,
                reason: "must lie within [0, 1]",
            });
        }

        Ok(DescriberConfig {
            distorted_tol,
            describe_mineral: self.describe_mineral.unwrap_or(defaults.describe_mineral),
            describe_component_dimensionality: self
                .describe_component_dimensionality
                .unwrap_or(defaults.describe_component_dimensionality),
            describe_components: self
                .describe_components
                .unwrap_or(defaults.describe_components),
            describe_oxidation_states: self
                .describe_oxidation_states
                .unwrap_or(defaults.describe_oxidation_states),
            only_describe_cation_polyhedra_connectivity: self
                .only_describe_cation_polyhedra_connectivity
                .unwrap_or(defaults.only_describe_cation_polyhedra_connectivity),
            describe_bond_lengths: self
                .describe_bond_lengths
                .unwrap_or(defaults.describe_bond_lengths),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_builder_gives_defaults() {
        assert_eq!(
            DescriberConfigBuilder::new().build().unwrap(),
            DescriberConfig::default()
        );
    }

    #[test]
    fn builder_overrides_individual_options() {
        let config = DescriberConfigBuilder::new()
            .distorted_tol(0.4)
            .describe_mineral(false)
            .describe_oxidation_states(false)
            .only_describe_cation_polyhedra_connectivity(true)
            .build()
            .unwrap();
        assert_eq!(config.distorted_tol, 0.4);
        assert!(!config.describe_mineral);
        assert!(!config.describe_oxidation_states);
        assert!(config.only_describe_cation_polyhedra_connectivity);
        assert!(config.describe_components);
    }

    #[test]
    fn distorted_tol_outside_unit_interval_is_rejected() {
        let result = DescriberConfigBuilder::new().distorted_tol(1.5).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "distorted_tol",
                ..
            })
        ));
    }
}
