use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Section toggles under `[describe]`.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileDescribeConfig {
    pub mineral: Option<bool>,
    pub component_dimensionality: Option<bool>,
    pub components: Option<bool>,
    pub oxidation_states: Option<bool>,
    pub cation_polyhedra_only: Option<bool>,
    pub bond_lengths: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileMineralMatchingConfig {
    pub table: Option<PathBuf>,
    pub distance_cutoff: Option<f64>,
    pub max_matches: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub distorted_tol: Option<f64>,
    pub describe: Option<FileDescribeConfig>,
    pub mineral_matching: Option<FileMineralMatchingConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
