//! CSV serialization for the manifest and the aggregated report.
//!
//! Headers are written explicitly so an empty table still produces a header line, and absent
//! values serialize as empty cells.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{ManifestRow, ReportError, ReportRow};
use crate::metrics::contacts::COLUMN_NAMES as CONTACT_COLUMNS;

pub const MANIFEST_COLUMNS: [&str; 4] = ["FileName", "CIF_Location", "PDB_Location", "PDB_File"];

/// Report header in column order.
pub const REPORT_COLUMNS: [&str; 18] = [
    MANIFEST_COLUMNS[0],
    MANIFEST_COLUMNS[1],
    MANIFEST_COLUMNS[2],
    MANIFEST_COLUMNS[3],
    "pDockQ",
    "PPV",
    CONTACT_COLUMNS[0],
    CONTACT_COLUMNS[1],
    CONTACT_COLUMNS[2],
    CONTACT_COLUMNS[3],
    CONTACT_COLUMNS[4],
    CONTACT_COLUMNS[5],
    CONTACT_COLUMNS[6],
    CONTACT_COLUMNS[7],
    CONTACT_COLUMNS[8],
    CONTACT_COLUMNS[9],
    CONTACT_COLUMNS[10],
    CONTACT_COLUMNS[11],
];

/// Flat, serializable form of a [`ReportRow`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReportRecord {
    #[serde(rename = "FileName")]
    pub file_name: Option<String>,
    #[serde(rename = "CIF_Location")]
    pub cif_location: Option<PathBuf>,
    #[serde(rename = "PDB_Location")]
    pub pdb_location: Option<PathBuf>,
    #[serde(rename = "PDB_File")]
    pub pdb_file: String,
    #[serde(rename = "pDockQ")]
    pub p_dock_q: Option<f64>,
    #[serde(rename = "PPV")]
    pub ppv: Option<f64>,
    #[serde(rename = "No. of intermolecular contacts")]
    pub intermolecular_contacts: Option<f64>,
    #[serde(rename = "No. of charged-charged contacts")]
    pub charged_charged_contacts: Option<f64>,
    #[serde(rename = "No. of charged-polar contacts")]
    pub charged_polar_contacts: Option<f64>,
    #[serde(rename = "No. of charged-apolar contacts")]
    pub charged_apolar_contacts: Option<f64>,
    #[serde(rename = "No. of polar-polar contacts")]
    pub polar_polar_contacts: Option<f64>,
    #[serde(rename = "No. of apolar-polar contacts")]
    pub apolar_polar_contacts: Option<f64>,
    #[serde(rename = "No. of apolar-apolar contacts")]
    pub apolar_apolar_contacts: Option<f64>,
    #[serde(rename = "Percentage of apolar NIS residues")]
    pub apolar_nis_percentage: Option<f64>,
    #[serde(rename = "Percentage of charged NIS residues")]
    pub charged_nis_percentage: Option<f64>,
    #[serde(rename = "Predicted binding affinity (kcal.mol-1)")]
    pub binding_affinity: Option<f64>,
    #[serde(rename = "Temperature")]
    pub temperature: Option<f64>,
    #[serde(rename = "Predicted dissociation constant (M)")]
    pub dissociation_constant: Option<f64>,
}

impl From<&ReportRow> for ReportRecord {
    fn from(row: &ReportRow) -> Self {
        let manifest = row.manifest.as_ref();
        let docking = row.docking.as_ref();
        let contacts = row.contacts.as_ref();

        Self {
            file_name: manifest.map(|m| m.file_name.clone()),
            cif_location: manifest.map(|m| m.cif_location.clone()),
            pdb_location: manifest.map(|m| m.pdb_location.clone()),
            pdb_file: row.pdb_file.clone(),
            p_dock_q: docking.map(|d| d.p_dock_q),
            ppv: docking.map(|d| d.ppv),
            intermolecular_contacts: contacts.map(|c| c.intermolecular_contacts),
            charged_charged_contacts: contacts.map(|c| c.charged_charged_contacts),
            charged_polar_contacts: contacts.map(|c| c.charged_polar_contacts),
            charged_apolar_contacts: contacts.map(|c| c.charged_apolar_contacts),
            polar_polar_contacts: contacts.map(|c| c.polar_polar_contacts),
            apolar_polar_contacts: contacts.map(|c| c.apolar_polar_contacts),
            apolar_apolar_contacts: contacts.map(|c| c.apolar_apolar_contacts),
            apolar_nis_percentage: contacts.map(|c| c.apolar_nis_percentage),
            charged_nis_percentage: contacts.map(|c| c.charged_nis_percentage),
            binding_affinity: contacts.map(|c| c.binding_affinity),
            temperature: contacts.map(|c| c.temperature),
            dissociation_constant: contacts.map(|c| c.dissociation_constant),
        }
    }
}

/// Writes the report as CSV to `writer`.
pub fn write_report_to<W: Write>(writer: W, rows: &[ReportRow]) -> Result<(), csv::Error> {
    write_table(writer, &REPORT_COLUMNS, rows.iter().map(ReportRecord::from))
}

/// Writes the manifest as CSV to `writer`.
pub fn write_manifest_to<W: Write>(writer: W, rows: &[ManifestRow]) -> Result<(), csv::Error> {
    write_table(writer, &MANIFEST_COLUMNS, rows)
}

/// Writes the report to `path`, creating or truncating it.
pub fn write_report(path: &Path, rows: &[ReportRow]) -> Result<(), ReportError> {
    let file = File::create(path).map_err(|e| ReportError::csv(path, e.into()))?;
    write_report_to(file, rows).map_err(|e| ReportError::csv(path, e))
}

/// Writes the manifest to `path`, creating or truncating it.
pub fn write_manifest(path: &Path, rows: &[ManifestRow]) -> Result<(), ReportError> {
    let file = File::create(path).map_err(|e| ReportError::csv(path, e.into()))?;
    write_manifest_to(file, rows).map_err(|e| ReportError::csv(path, e))
}

fn write_table<W, T, I>(writer: W, header: &[&str], records: I) -> Result<(), csv::Error>
where
    W: Write,
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut out = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    out.write_record(header)?;
    for record in records {
        out.serialize(record)?;
    }
    out.flush()?;
    Ok(())
}
