//! Full outer join of the manifest and metric tables on `pdb_file`.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use super::{AggregateError, ContactRow, DockingRow, ManifestRow, RowSource};
use crate::metrics::{DockingQuality, InterfaceContacts};

/// One report line; every source that produced nothing for this key stays `None`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportRow {
    pub pdb_file: String,
    pub manifest: Option<ManifestRow>,
    pub docking: Option<DockingQuality>,
    pub contacts: Option<InterfaceContacts>,
}

impl ReportRow {
    fn keyed(pdb_file: &str) -> Self {
        Self {
            pdb_file: pdb_file.to_string(),
            ..Default::default()
        }
    }

    /// True when all three sources contributed.
    pub fn is_complete(&self) -> bool {
        self.manifest.is_some() && self.docking.is_some() && self.contacts.is_some()
    }
}

/// Joins the three sources into one row per distinct `pdb_file`, in ascending key order.
///
/// Keys compare by exact string equality. A key present in any source yields a row.
///
/// # Errors
///
/// [`AggregateError::DuplicateKey`] when one source carries the same key twice.
pub fn aggregate(
    manifest: Vec<ManifestRow>,
    docking: Vec<DockingRow>,
    contacts: Vec<ContactRow>,
) -> Result<Vec<ReportRow>, AggregateError> {
    let mut rows: BTreeMap<String, ReportRow> = BTreeMap::new();

    for row in manifest {
        let key = row.pdb_file.clone();
        fill(&mut rows, RowSource::Manifest, &key, row, |r| &mut r.manifest)?;
    }
    for row in docking {
        fill(&mut rows, RowSource::Docking, &row.pdb_file, row.quality, |r| {
            &mut r.docking
        })?;
    }
    for row in contacts {
        fill(&mut rows, RowSource::Contacts, &row.pdb_file, row.contacts, |r| {
            &mut r.contacts
        })?;
    }

    Ok(rows.into_values().collect())
}

fn fill<T>(
    rows: &mut BTreeMap<String, ReportRow>,
    table: RowSource,
    key: &str,
    value: T,
    slot: impl Fn(&mut ReportRow) -> &mut Option<T>,
) -> Result<(), AggregateError> {
    let row = match rows.entry(key.to_string()) {
        Entry::Occupied(entry) => entry.into_mut(),
        Entry::Vacant(entry) => entry.insert(ReportRow::keyed(key)),
    };

    let slot = slot(row);
    if slot.is_some() {
        return Err(AggregateError::DuplicateKey {
            table,
            key: key.to_string(),
        });
    }
    *slot = Some(value);
    Ok(())
}
