//! # Core Models Module
//!
//! Immutable data structures describing a condensed crystal structure, as
//! produced by an upstream condensation step and consumed read-only by the
//! describers.
//!
//! ## Key Components
//!
//! - [`structure`] - The top-level [`CondensedStructure`](structure::CondensedStructure)
//!   with its dimensionality → formula → component map
//! - [`component`] - Connected or molecular units and their inequivalent copies
//! - [`site`] - Coordination environments, geometry and polyhedral connectivity
//! - [`bonding`] - Nearest-neighbor bond groups and their distances
//! - [`mineral`] - Mineral match candidates and the final naming decision
//! - [`error`] - Invariant violations raised by the constructors
//!
//! Every constructor validates its invariants, so the describers never need
//! to check which optional piece of data is present.

pub mod bonding;
pub mod component;
pub mod error;
pub mod mineral;
pub mod site;
pub mod structure;
