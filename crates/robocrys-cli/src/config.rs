//! Configuration resolution for the CLI.
//!
//! Values are taken from, in order of precedence: explicit command-line
//! flags, `--set KEY=VALUE` overrides, the TOML file given with `--config`,
//! and finally the built-in defaults.

mod builder;
mod defaults;
mod file;
mod models;

pub use builder::build_config;
pub use models::MineralMatchingConfig;
