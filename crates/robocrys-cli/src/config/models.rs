use robocrys::engine::config::DescriberConfig;
use std::path::PathBuf;

/// Where mineral rankings come from when a table is configured.
#[derive(Debug, Clone, PartialEq)]
pub struct MineralMatchingConfig {
    pub table: PathBuf,
    pub distance_cutoff: f64,
    pub max_matches: Option<usize>,
}

pub struct AppConfig {
    pub inputs: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub describer_config: DescriberConfig,
    pub mineral_matching: Option<MineralMatchingConfig>,
}
