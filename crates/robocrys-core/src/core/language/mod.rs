//! Linguistic formatting: spelling out numbers, plurals, indefinite articles,
//! verb agreement and list joining.

pub mod inflect;

pub use inflect::{English, Inflector};
