use thiserror::Error;

use crate::core::models::site::SiteId;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DescribeError {
    #[error("Cannot describe the bond lengths from {element} to {bond_element}: no distances")]
    EmptyDistances {
        element: String,
        bond_element: String,
    },

    #[error("Cannot classify an empty list of bond lengths")]
    NoBondLengths,

    #[error("Site {site} references unknown site {reference}")]
    UnknownSite { site: SiteId, reference: SiteId },

    #[error("Structure has no components to describe")]
    NoComponents,

    #[error("Internal logic error: {0}")]
    Internal(String),
}
