use thiserror::Error;

/// Invariant violations detected while constructing the condensed structure model.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("Bond group to '{element}' has no distances")]
    EmptyDistances { element: String },

    #[error("Bond group to '{element}' has no inequivalent groups")]
    EmptyBondGroups { element: String },

    #[error("Bond group to '{element}' must report at least one neighbor site")]
    NoNeighborSites { element: String },

    #[error("Site {site} has an empty element label")]
    EmptyElement { site: usize },

    #[error("Site {site} has no nearest neighbors")]
    EmptyNeighborCensus { site: usize },

    #[error("Geometry likeness {likeness} is outside the range [0, 1]")]
    LikenessOutOfRange { likeness: f64 },

    #[error("Dimensionality {0} is outside the range 0-3")]
    InvalidDimensionality(u8),

    #[error("Component '{formula}' has no inequivalent sub-components")]
    NoInequivalentComponents { formula: String },

    #[error("Component '{formula}' has no sites to describe")]
    NoSites { formula: String },

    #[error("Component '{formula}' has a zero count")]
    ZeroCount { formula: String },

    #[error("{dimensionality}-dimensional component '{formula}' is missing an orientation")]
    MissingOrientation { formula: String, dimensionality: u8 },

    #[error(
        "Component '{formula}' is filed under dimensionality {key} but reports dimensionality {actual}"
    )]
    DimensionalityMismatch {
        formula: String,
        key: u8,
        actual: u8,
    },

    #[error("Structure has no components")]
    NoComponents,

    #[error("Structure reports {n_components} component(s) but contains {leaves} distinct component(s)")]
    ComponentCountMismatch { n_components: usize, leaves: usize },
}
