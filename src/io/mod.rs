//! IO front-end: mmCIF ingestion and legacy PDB export.
//!
//! Readers and writers operate on generic `BufRead`/`Write` handles so callers decide whether
//! data comes from files, buffers, or pipes. File-level helpers attach the path to any error
//! so batch callers can report exactly which input or output failed.

mod error;
mod mmcif;
mod pdb;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::model::structure::Structure;

pub use mmcif::reader::read as read_mmcif_structure;
pub use pdb::writer::write_structure as write_pdb_structure;

pub use error::Error;

/// Reads an mmCIF file from disk.
pub fn read_mmcif_file(path: &Path) -> Result<Structure, Error> {
    let file = File::open(path).map_err(|e| Error::from_io(e, Some(path.to_path_buf())))?;
    read_mmcif_structure(BufReader::new(file)).map_err(|e| e.with_path(path))
}

/// Writes a structure to disk in PDB format, creating or truncating the file.
pub fn write_pdb_file(path: &Path, structure: &Structure) -> Result<(), Error> {
    let file = File::create(path).map_err(|e| Error::from_io(e, Some(path.to_path_buf())))?;
    let mut writer = BufWriter::new(file);
    write_pdb_structure(&mut writer, structure).map_err(|e| e.with_path(path))?;
    writer
        .flush()
        .map_err(|e| Error::from_io(e, Some(path.to_path_buf())))
}
