//! Runs one scoring tool over every converted file and parses what it printed.

use super::{SkippedFile, Stage};
use crate::metrics::{GrammarError, contacts, docking};
use crate::report::{ContactRow, DockingRow, ManifestRow};
use crate::tools::MetricTool;

/// Rows collected from one tool, plus the files it produced nothing for.
#[derive(Debug, Clone)]
pub struct MetricBatch<R> {
    pub rows: Vec<R>,
    /// Files whose output had no marker line at all.
    pub missing: Vec<String>,
    pub skipped: Vec<SkippedFile>,
}

impl<R> MetricBatch<R> {
    fn new() -> Self {
        Self {
            rows: Vec::new(),
            missing: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

/// Scores every manifest entry with the pDockQ tool.
///
/// A file whose output lacks a `pDockQ=` line is logged as a warning and left out.
pub fn collect_docking(
    manifest: &[ManifestRow],
    tool: &dyn MetricTool,
) -> MetricBatch<DockingRow> {
    let batch = collect_metrics(
        manifest,
        tool,
        Stage::Docking,
        docking::parse,
        |pdb_file, quality| DockingRow { pdb_file, quality },
    );
    for pdb_file in &batch.missing {
        log::warn!(
            "{} printed no '{}' line for {pdb_file}",
            tool.name(),
            docking::MARKER
        );
    }
    batch
}

/// Scores every manifest entry with the PRODIGY tool.
pub fn collect_contacts(
    manifest: &[ManifestRow],
    tool: &dyn MetricTool,
) -> MetricBatch<ContactRow> {
    let batch = collect_metrics(
        manifest,
        tool,
        Stage::Contacts,
        contacts::parse,
        |pdb_file, record| ContactRow {
            pdb_file,
            contacts: record,
        },
    );
    for pdb_file in &batch.missing {
        log::debug!(
            "{} printed no '{}' line for {pdb_file}",
            tool.name(),
            contacts::MARKER
        );
    }
    batch
}

fn collect_metrics<T, R>(
    manifest: &[ManifestRow],
    tool: &dyn MetricTool,
    stage: Stage,
    grammar: fn(&str) -> Result<Option<T>, GrammarError>,
    into_row: impl Fn(String, T) -> R,
) -> MetricBatch<R> {
    let mut batch = MetricBatch::new();

    for entry in manifest {
        let output = match tool.run(&entry.pdb_location) {
            Ok(output) => output,
            Err(err) => {
                log::warn!("{err}");
                if let Some(output) = err.captured_output().map(str::trim_end) {
                    if !output.is_empty() {
                        log::warn!("{} output for {}:\n{output}", tool.name(), entry.pdb_file);
                    }
                }
                batch.skipped.push(SkippedFile::new(&entry.pdb_location, stage, err));
                continue;
            }
        };

        match grammar(&output) {
            Ok(Some(record)) => batch.rows.push(into_row(entry.pdb_file.clone(), record)),
            Ok(None) => batch.missing.push(entry.pdb_file.clone()),
            Err(err) => {
                log::warn!("Unreadable {} output for {}: {err}", tool.name(), entry.pdb_file);
                batch.skipped.push(SkippedFile::new(&entry.pdb_location, stage, err));
            }
        }
    }

    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolError;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    /// Replays canned output per file; files without an entry fail to run.
    struct CannedTool {
        outputs: HashMap<PathBuf, String>,
    }

    impl CannedTool {
        fn new(outputs: &[(&str, &str)]) -> Self {
            Self {
                outputs: outputs
                    .iter()
                    .map(|(path, text)| (PathBuf::from(path), text.to_string()))
                    .collect(),
            }
        }
    }

    impl MetricTool for CannedTool {
        fn name(&self) -> &str {
            "canned"
        }

        fn run(&self, pdb_path: &Path) -> Result<String, ToolError> {
            self.outputs
                .get(pdb_path)
                .cloned()
                .ok_or_else(|| ToolError::failed("canned", pdb_path, Some(1), "Traceback"))
        }
    }

    fn entry(stem: &str) -> ManifestRow {
        ManifestRow {
            file_name: stem.into(),
            cif_location: format!("in/{stem}.cif").into(),
            pdb_location: format!("out/{stem}.pdb").into(),
            pdb_file: format!("{stem}.pdb"),
        }
    }

    #[test]
    fn docking_rows_are_keyed_by_pdb_file() {
        let tool = CannedTool::new(&[
            ("out/a.pdb", "pDockQ= 0.608 ,PPV= 0.94\n"),
            ("out/b.pdb", "no interface\n"),
        ]);

        let batch = collect_docking(&[entry("a"), entry("b"), entry("c")], &tool);

        assert_eq!(batch.rows.len(), 1);
        assert_eq!(batch.rows[0].pdb_file, "a.pdb");
        assert_eq!(batch.rows[0].quality.p_dock_q, 0.608);
        assert_eq!(batch.missing, ["b.pdb"]);
        assert_eq!(batch.skipped.len(), 1);
        assert_eq!(batch.skipped[0].stage, Stage::Docking);
        assert_eq!(batch.skipped[0].path, PathBuf::from("out/c.pdb"));
    }

    #[test]
    fn malformed_contact_line_is_a_skip() {
        let tool = CannedTool::new(&[
            ("out/a.pdb", "output:1,2,3\n"),
            ("out/b.pdb", "output:1,2,3,4,5,6,7,8,9,-10,25,1e-9\n"),
        ]);

        let batch = collect_contacts(&[entry("a"), entry("b")], &tool);

        assert_eq!(batch.rows.len(), 1);
        assert_eq!(batch.rows[0].pdb_file, "b.pdb");
        assert_eq!(batch.rows[0].contacts.temperature, 25.0);
        assert_eq!(batch.skipped.len(), 1);
        assert_eq!(batch.skipped[0].stage, Stage::Contacts);
        assert!(batch.skipped[0].reason.contains("expected 12"));
        assert!(batch.missing.is_empty());
    }

    #[test]
    fn empty_manifest_runs_nothing() {
        let tool = CannedTool::new(&[]);

        let batch = collect_contacts(&[], &tool);

        assert!(batch.rows.is_empty());
        assert!(batch.skipped.is_empty());
    }
}
