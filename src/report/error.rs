use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which input table a report row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSource {
    Manifest,
    Docking,
    Contacts,
}

impl fmt::Display for RowSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RowSource::Manifest => "manifest",
            RowSource::Docking => "docking",
            RowSource::Contacts => "contacts",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    #[error("duplicate key '{key}' in {table} rows")]
    DuplicateKey { table: RowSource, key: String },
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write CSV to '{}': {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl ReportError {
    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}
