//! # robocrys Core Library
//!
//! Generates human-readable descriptions of crystal structures from a
//! pre-computed "condensed structure": mineral-match candidates, the
//! decomposition into components, and the coordination environment of every
//! inequivalent site.
//!
//! ## Architectural Philosophy
//!
//! The library is organized in three layers, each depending only on the ones above it:
//!
//! - **[`core`]: The Foundation.** Validated, immutable data models
//!   (`CondensedStructure`, `Component`, `Site`, `BondGroup`), JSON/TOML input,
//!   the injected `Inflector` for English grammar, and lookup tables.
//!
//! - **[`engine`]: The Description Rules.** Bond-length classification, site,
//!   polyhedra and component describers, mineral naming with an explicit
//!   ranking cache, and configuration.
//!
//! - **[`workflows`]: The Public API.** `Describer` produces the final text and
//!   `StructureFeatures` exposes structural queries over the same data.
//!
//! No geometry is computed here: distances, geometries and connectivities
//! arrive already computed, and the engine only decides what to say.

pub mod core;
pub mod engine;
pub mod workflows;
