//! # Engine Module
//!
//! This module holds the description rules: how a condensed structure, its
//! components, sites and bonds are turned into sentences.
//!
//! ## Architecture
//!
//! Each describer is a small struct borrowing the injected
//! [`Inflector`](crate::core::language::Inflector) and producing an ordered
//! [`Fragments`](fragments::Fragments) sequence:
//!
//! - **Mineral Naming** ([`mineral`], [`matching`]) - Tiered mineral selection, the match-provider seam and its ranking cache
//! - **Bond Lengths** ([`bond_lengths`]) - Classification of distance lists and the matching sentences
//! - **Sites** ([`site`]) - Coordination geometry and neighbor census of one site
//! - **Connected Polyhedra** ([`polyhedra`]) - Corner, edge and face sharing between polyhedra
//! - **Components** ([`component`]) - Site partitioning, molecules and orientations
//! - **Configuration** ([`config`]) - Section toggles and the distortion threshold
//! - **Error Handling** ([`error`]) - Failures raised while describing

pub mod bond_lengths;
pub mod component;
pub mod config;
pub mod error;
pub mod fragments;
pub mod matching;
pub mod mineral;
pub mod polyhedra;
pub mod site;
