use robocrys::core::io::condensed::ReadError;
use robocrys::engine::config::ConfigError;
use robocrys::engine::error::DescribeError;
use robocrys::engine::matching::CandidateTableError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Read(#[from] ReadError),

    #[error("Failed to describe '{path}': {source}", path = path.display())]
    Describe {
        path: PathBuf,
        #[source]
        source: DescribeError,
    },

    #[error(transparent)]
    DescriberConfig(#[from] ConfigError),

    #[error(transparent)]
    MineralTable(#[from] CandidateTableError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
