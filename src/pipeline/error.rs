use std::path::PathBuf;
use thiserror::Error;

use crate::report::{AggregateError, ReportError};
use crate::tools::ConfigError;

/// Failures that abort a whole run. Per-file problems are recorded as skips instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid tool configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to read input directory '{}': {source}", path.display())]
    ReadInputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create output directory '{}': {source}", path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to merge results: {0}")]
    Aggregate(#[from] AggregateError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

impl Error {
    pub fn read_input_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadInputDir {
            path: path.into(),
            source,
        }
    }

    pub fn create_output_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CreateOutputDir {
            path: path.into(),
            source,
        }
    }
}
