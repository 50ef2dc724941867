//! Reading condensed structure files.
//!
//! Condensed structures are produced by an upstream condensation step and
//! stored as JSON or TOML. Both formats share one raw schema which is
//! converted into the validated [`models`](crate::core::models) types.

pub mod condensed;
pub mod traits;
