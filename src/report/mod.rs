//! Report assembly: the conversion manifest and both metric tables joined on the converted
//! file name, plus CSV serialization of the result.

mod error;
mod table;
mod writer;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::metrics::{DockingQuality, InterfaceContacts};

pub use error::{AggregateError, ReportError, RowSource};
pub use table::{ReportRow, aggregate};
pub use writer::{
    MANIFEST_COLUMNS, REPORT_COLUMNS, ReportRecord, write_manifest, write_manifest_to,
    write_report, write_report_to,
};

/// One successfully converted input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRow {
    /// Input file stem.
    #[serde(rename = "FileName")]
    pub file_name: String,
    #[serde(rename = "CIF_Location")]
    pub cif_location: PathBuf,
    #[serde(rename = "PDB_Location")]
    pub pdb_location: PathBuf,
    /// Output file name, `<stem>.pdb`; the join key.
    #[serde(rename = "PDB_File")]
    pub pdb_file: String,
}

/// Docking-quality record for one converted file.
#[derive(Debug, Clone, PartialEq)]
pub struct DockingRow {
    pub pdb_file: String,
    pub quality: DockingQuality,
}

/// Interface-contact record for one converted file.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactRow {
    pub pdb_file: String,
    pub contacts: InterfaceContacts,
}
