//! # Core Module
//!
//! This module provides the stateless building blocks of the description
//! engine: the condensed structure data model, file input, the linguistic
//! formatting capability and the small lookup tables shared by the
//! describers.
//!
//! ## Architecture
//!
//! - **Structure Representation** ([`models`]) - Condensed structures, components, sites and bonds
//! - **File Input** ([`io`]) - Reading condensed structures from JSON or TOML
//! - **Linguistics** ([`language`]) - The [`Inflector`](language::Inflector) trait and its English implementation
//! - **Utilities** ([`utils`]) - Element label handling and coordination geometry tables
//!
//! Nothing in this module performs geometric computation: every distance,
//! geometry label and connectivity is computed upstream and consumed as is.

pub mod io;
pub mod language;
pub mod models;
pub mod utils;
