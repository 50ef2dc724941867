use robocrys::engine::config::DEFAULT_DISTORTED_TOL;
use robocrys::engine::matching::DEFAULT_DISTANCE_CUTOFF;

pub struct DefaultsConfig {
    pub distorted_tol: f64,
    pub describe_mineral: bool,
    pub describe_component_dimensionality: bool,
    pub describe_components: bool,
    pub describe_oxidation_states: bool,
    pub only_describe_cation_polyhedra_connectivity: bool,
    pub describe_bond_lengths: bool,
    pub distance_cutoff: f64,
    pub max_matches: Option<usize>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            distorted_tol: DEFAULT_DISTORTED_TOL,
            describe_mineral: true,
            describe_component_dimensionality: true,
            describe_components: true,
            describe_oxidation_states: true,
            only_describe_cation_polyhedra_connectivity: false,
            describe_bond_lengths: true,
            distance_cutoff: DEFAULT_DISTANCE_CUTOFF,
            max_matches: None,
        }
    }
}
