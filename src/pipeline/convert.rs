//! Directory-level conversion: every `*.cif` input becomes `<stem>.pdb` plus a manifest row.

use std::fs;
use std::path::{Path, PathBuf};

use super::{Error, SkippedFile, Stage};
use crate::io::{read_mmcif_file, write_pdb_file};
use crate::ops::{ChainDecision, ChainPolicy, apply_chain_policy};
use crate::report::ManifestRow;

/// A chain left out of an output model because the identifier budget ran out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedChain {
    pub source: PathBuf,
    pub model: u32,
    pub chain: String,
}

/// Result of converting one input directory.
#[derive(Debug, Clone, Default)]
pub struct ConversionBatch {
    pub manifest: Vec<ManifestRow>,
    pub dropped: Vec<DroppedChain>,
    pub skipped: Vec<SkippedFile>,
}

/// Converts every mmCIF file in `input_dir` into `output_dir` under `policy`.
///
/// Files that fail to parse or write are skipped and recorded; a partially written output
/// file is removed. Inputs are processed in lexicographic path order.
///
/// # Errors
///
/// [`Error::ReadInputDir`] when the input directory cannot be listed and
/// [`Error::CreateOutputDir`] when the output directory cannot be created.
pub fn convert_directory(
    input_dir: &Path,
    output_dir: &Path,
    policy: ChainPolicy,
) -> Result<ConversionBatch, Error> {
    let inputs = discover_inputs(input_dir)?;
    fs::create_dir_all(output_dir).map_err(|e| Error::create_output_dir(output_dir, e))?;

    log::info!(
        "Converting {} mmCIF file(s) from {} ({:?} chain policy)",
        inputs.len(),
        input_dir.display(),
        policy
    );

    let mut batch = ConversionBatch::default();
    for source in inputs {
        match convert_file(&source, output_dir, policy) {
            Ok((row, dropped)) => {
                log::debug!("Wrote {}", row.pdb_location.display());
                batch.manifest.push(row);
                batch.dropped.extend(dropped);
            }
            Err(skip) => {
                log::warn!("Skipping {}: {}", skip.path.display(), skip.reason);
                batch.skipped.push(skip);
            }
        }
    }

    Ok(batch)
}

/// Lists regular files whose extension is exactly `cif`, sorted by path.
pub fn discover_inputs(input_dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut inputs = Vec::new();
    for entry in fs::read_dir(input_dir).map_err(|e| Error::read_input_dir(input_dir, e))? {
        let path = entry.map_err(|e| Error::read_input_dir(input_dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "cif") {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

fn convert_file(
    source: &Path,
    output_dir: &Path,
    policy: ChainPolicy,
) -> Result<(ManifestRow, Vec<DroppedChain>), SkippedFile> {
    let structure =
        read_mmcif_file(source).map_err(|e| SkippedFile::new(source, Stage::Read, e))?;
    let conversion = apply_chain_policy(&structure, policy);

    let file_name = source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let pdb_file = format!("{file_name}.pdb");
    let pdb_location = output_dir.join(&pdb_file);

    if let Err(err) = write_pdb_file(&pdb_location, &conversion.structure) {
        if pdb_location.exists() {
            if let Err(remove_err) = fs::remove_file(&pdb_location) {
                log::debug!(
                    "Could not remove partial output {}: {remove_err}",
                    pdb_location.display()
                );
            }
        }
        return Err(SkippedFile::new(source, Stage::Write, err));
    }

    let dropped: Vec<DroppedChain> = conversion
        .dropped()
        .filter_map(|decision| match decision {
            ChainDecision::Dropped { model, original } => Some(DroppedChain {
                source: source.to_path_buf(),
                model: *model,
                chain: original.clone(),
            }),
            ChainDecision::Kept { .. } => None,
        })
        .collect();
    for chain in &dropped {
        log::warn!(
            "Dropped chain '{}' of model {} in {}: no chain identifiers left",
            chain.chain,
            chain.model,
            source.display()
        );
    }

    Ok((
        ManifestRow {
            file_name,
            cif_location: source.to_path_buf(),
            pdb_location,
            pdb_file,
        },
        dropped,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_CHAIN_CIF: &str = "\
data_pair
loop_
_atom_site.group_PDB
_atom_site.id
_atom_site.type_symbol
_atom_site.label_atom_id
_atom_site.label_comp_id
_atom_site.auth_asym_id
_atom_site.auth_seq_id
_atom_site.Cartn_x
_atom_site.Cartn_y
_atom_site.Cartn_z
_atom_site.occupancy
_atom_site.B_iso_or_equiv
ATOM 1 N N GLY A 1 0.000 0.000 0.000 1.00 80.0
ATOM 2 C CA GLY A 1 1.458 0.000 0.000 1.00 81.0
ATOM 3 N N ALA BB 1 5.000 5.000 5.000 1.00 70.0
";

    fn write(dir: &Path, name: &str, text: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, text).expect("write fixture");
        path
    }

    #[test]
    fn discovery_keeps_exact_cif_extension_in_sorted_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(dir.path(), "b.cif", "");
        write(dir.path(), "a.cif", "");
        write(dir.path(), "c.CIF", "");
        write(dir.path(), "d.cif.gz", "");
        write(dir.path(), "notes.txt", "");
        fs::create_dir(dir.path().join("nested.cif")).expect("mkdir");

        let inputs = discover_inputs(dir.path()).expect("listable");

        let names: Vec<_> = inputs
            .iter()
            .filter_map(|p| p.file_name()?.to_str())
            .collect();
        assert_eq!(names, ["a.cif", "b.cif"]);
    }

    #[test]
    fn budgeted_conversion_writes_file_and_manifest_row() {
        let input = tempfile::tempdir().expect("tempdir");
        let output = tempfile::tempdir().expect("tempdir");
        let source = write(input.path(), "pair.cif", TWO_CHAIN_CIF);

        let batch = convert_directory(input.path(), output.path(), ChainPolicy::Budgeted)
            .expect("directories usable");

        assert!(batch.skipped.is_empty());
        assert_eq!(
            batch.manifest,
            [ManifestRow {
                file_name: "pair".into(),
                cif_location: source,
                pdb_location: output.path().join("pair.pdb"),
                pdb_file: "pair.pdb".into(),
            }]
        );
        let pdb = fs::read_to_string(output.path().join("pair.pdb")).expect("output written");
        assert!(pdb.lines().any(|l| l.starts_with("ATOM") && &l[21..22] == "B"));
    }

    #[test]
    fn unconstrained_wide_chain_id_is_a_write_skip_without_leftovers() {
        let input = tempfile::tempdir().expect("tempdir");
        let output = tempfile::tempdir().expect("tempdir");
        write(input.path(), "pair.cif", TWO_CHAIN_CIF);

        let batch = convert_directory(input.path(), output.path(), ChainPolicy::Unconstrained)
            .expect("directories usable");

        assert!(batch.manifest.is_empty());
        assert_eq!(batch.skipped.len(), 1);
        assert_eq!(batch.skipped[0].stage, Stage::Write);
        assert!(!output.path().join("pair.pdb").exists());
    }

    #[test]
    fn unparsable_input_is_skipped_and_others_continue() {
        let input = tempfile::tempdir().expect("tempdir");
        let output = tempfile::tempdir().expect("tempdir");
        write(input.path(), "bad.cif", "this is not mmCIF\n");
        write(input.path(), "good.cif", TWO_CHAIN_CIF);

        let batch = convert_directory(input.path(), output.path(), ChainPolicy::Budgeted)
            .expect("directories usable");

        assert_eq!(batch.manifest.len(), 1);
        assert_eq!(batch.manifest[0].file_name, "good");
        assert_eq!(batch.skipped.len(), 1);
        assert_eq!(batch.skipped[0].stage, Stage::Read);
        assert!(batch.skipped[0].path.ends_with("bad.cif"));
    }

    #[test]
    fn missing_input_directory_is_fatal() {
        let output = tempfile::tempdir().expect("tempdir");
        let missing = output.path().join("nope");

        let err = convert_directory(&missing, output.path(), ChainPolicy::Budgeted)
            .expect_err("input directory missing");

        assert!(matches!(err, Error::ReadInputDir { .. }));
    }

    #[test]
    fn output_directory_is_created() {
        let input = tempfile::tempdir().expect("tempdir");
        let scratch = tempfile::tempdir().expect("tempdir");
        let output = scratch.path().join("nested").join("pdb");
        write(input.path(), "pair.cif", TWO_CHAIN_CIF);

        let batch = convert_directory(input.path(), &output, ChainPolicy::Budgeted)
            .expect("directories usable");

        assert_eq!(batch.manifest.len(), 1);
        assert!(output.join("pair.pdb").is_file());
    }
}
