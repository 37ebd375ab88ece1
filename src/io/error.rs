use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "I/O error for {path_desc}: {source}",
        path_desc = PathDisplay(path)
    )]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "failed to parse {format} {path_desc}: {details} (line {line_number})",
        path_desc = PathDisplay(path)
    )]
    Parse {
        format: &'static str,
        path: Option<PathBuf>,
        line_number: usize,
        details: String,
    },

    #[error(
        "inconsistent data in {format} {path_desc}: {details}",
        path_desc = PathDisplay(path)
    )]
    InconsistentData {
        format: &'static str,
        path: Option<PathBuf>,
        details: String,
    },
}

impl Error {
    pub fn from_io(source: std::io::Error, path: Option<PathBuf>) -> Self {
        Self::Io { path, source }
    }

    pub fn parse(
        format: &'static str,
        path: Option<PathBuf>,
        line_number: usize,
        details: impl Into<String>,
    ) -> Self {
        Self::Parse {
            format,
            path,
            line_number,
            details: details.into(),
        }
    }

    pub fn inconsistent_data(
        format: &'static str,
        path: Option<PathBuf>,
        details: impl Into<String>,
    ) -> Self {
        Self::InconsistentData {
            format,
            path,
            details: details.into(),
        }
    }

    /// Attaches a file path to an error raised while reading or writing a stream.
    ///
    /// Errors that already name a path keep it.
    pub fn with_path(mut self, file: &Path) -> Self {
        let slot = match &mut self {
            Self::Io { path, .. } => path,
            Self::Parse { path, .. } => path,
            Self::InconsistentData { path, .. } => path,
        };
        if slot.is_none() {
            *slot = Some(file.to_path_buf());
        }
        self
    }
}

struct PathDisplay<'a>(&'a Option<PathBuf>);

impl<'a> fmt::Display for PathDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(p) => write!(f, "file '{}'", p.display()),
            None => write!(f, "stream source"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_without_path_mentions_stream() {
        let err = Error::parse("mmCIF", None, 12, "Invalid X coordinate");

        assert_eq!(
            err.to_string(),
            "failed to parse mmCIF stream source: Invalid X coordinate (line 12)"
        );
    }

    #[test]
    fn with_path_fills_missing_path() {
        let err = Error::inconsistent_data("PDB", None, "chain id too wide")
            .with_path(Path::new("out/model.pdb"));

        assert_eq!(
            err.to_string(),
            "inconsistent data in PDB file 'out/model.pdb': chain id too wide"
        );
    }

    #[test]
    fn with_path_keeps_existing_path() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::from_io(io, Some(PathBuf::from("a.cif"))).with_path(Path::new("b.cif"));

        match err {
            Error::Io { path, .. } => assert_eq!(path, Some(PathBuf::from("a.cif"))),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
