//! # Workflows Module
//!
//! The public entry points of the library.
//!
//! - **Description** ([`describe`]) - [`Describer`](describe::Describer) turns a condensed
//!   structure into a single paragraph: mineral and space group, dimensionality, then
//!   the components down to individual bond lengths.
//! - **Features** ([`featurize`]) - [`StructureFeatures`](featurize::StructureFeatures)
//!   answers structural queries (polyhedral connectivity, geometries, dimensionality,
//!   site fractions) for use as descriptors.

pub mod describe;
pub mod featurize;
