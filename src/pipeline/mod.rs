//! End-to-end batch: convert a directory, score every converted file with both tools, join
//! the results, and write the report.
//!
//! Everything runs sequentially. A failure confined to one file is recorded as a
//! [`SkippedFile`] and the batch moves on; only directory, configuration, merge, and report
//! failures abort the run.

mod collect;
mod convert;
mod error;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::ops::ChainPolicy;
use crate::report::{self, ManifestRow, ReportRow};
use crate::tools::{MetricTool, ToolConfig};

pub use collect::{MetricBatch, collect_contacts, collect_docking};
pub use convert::{ConversionBatch, DroppedChain, convert_directory, discover_inputs};
pub use error::Error;

/// Report file name used when no explicit path is configured.
pub const REPORT_FILE: &str = "summary.csv";

/// Manifest file name written by the conversion-only workflow.
pub const MANIFEST_FILE: &str = "manifest.csv";

/// Where a per-file failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Read,
    Write,
    Docking,
    Contacts,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Read => "read",
            Stage::Write => "write",
            Stage::Docking => "docking",
            Stage::Contacts => "contacts",
        };
        f.write_str(name)
    }
}

/// A file left out of one stage, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub stage: Stage,
    pub reason: String,
}

impl SkippedFile {
    pub fn new(path: impl Into<PathBuf>, stage: Stage, reason: impl fmt::Display) -> Self {
        Self {
            path: path.into(),
            stage,
            reason: reason.to_string(),
        }
    }
}

/// Directories and policy for one run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub policy: ChainPolicy,
    /// Report destination; defaults to `<output_dir>/summary.csv`.
    pub report_path: Option<PathBuf>,
}

impl PipelineConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            policy: ChainPolicy::default(),
            report_path: None,
        }
    }

    pub fn with_policy(mut self, policy: ChainPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = Some(path.into());
        self
    }

    pub fn report_path(&self) -> PathBuf {
        self.report_path
            .clone()
            .unwrap_or_else(|| self.output_dir.join(REPORT_FILE))
    }
}

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub manifest: Vec<ManifestRow>,
    pub rows: Vec<ReportRow>,
    pub dropped: Vec<DroppedChain>,
    pub skipped: Vec<SkippedFile>,
    pub report_path: PathBuf,
}

impl RunOutcome {
    pub fn skipped_in(&self, stage: Stage) -> impl Iterator<Item = &SkippedFile> {
        self.skipped.iter().filter(move |skip| skip.stage == stage)
    }
}

/// Resolves the tool scripts from `tools`, then runs the whole batch.
///
/// # Errors
///
/// [`Error::Config`] before any file is touched when a script cannot be resolved, otherwise
/// as [`run_with_tools`].
pub fn run(config: &PipelineConfig, tools: &ToolConfig) -> Result<RunOutcome, Error> {
    let (docking, contacts) = tools.build()?;
    run_with_tools(config, &docking, &contacts)
}

/// Runs the batch with caller-supplied tools.
///
/// # Errors
///
/// Directory errors from [`convert_directory`], [`Error::Aggregate`] when a source repeats a
/// key, and [`Error::Report`] when the report cannot be written.
pub fn run_with_tools(
    config: &PipelineConfig,
    docking: &dyn MetricTool,
    contacts: &dyn MetricTool,
) -> Result<RunOutcome, Error> {
    let conversion = convert_directory(&config.input_dir, &config.output_dir, config.policy)?;
    let docking_batch = collect_docking(&conversion.manifest, docking);
    let contact_batch = collect_contacts(&conversion.manifest, contacts);

    let report_path = config.report_path();
    let rows = merge_and_write(
        &report_path,
        &conversion.manifest,
        docking_batch.rows,
        contact_batch.rows,
    )?;

    let mut skipped = conversion.skipped;
    skipped.extend(docking_batch.skipped);
    skipped.extend(contact_batch.skipped);

    log::info!(
        "Wrote {} report row(s) to {} ({} skip(s), {} dropped chain(s))",
        rows.len(),
        report_path.display(),
        skipped.len(),
        conversion.dropped.len()
    );

    Ok(RunOutcome {
        manifest: conversion.manifest,
        rows,
        dropped: conversion.dropped,
        skipped,
        report_path,
    })
}

/// Joins the three sources and writes the report to `path`.
///
/// # Errors
///
/// [`Error::Aggregate`] on duplicate keys and [`Error::Report`] when writing fails.
pub fn merge_and_write(
    path: &Path,
    manifest: &[ManifestRow],
    docking: Vec<report::DockingRow>,
    contacts: Vec<report::ContactRow>,
) -> Result<Vec<ReportRow>, Error> {
    let rows = report::aggregate(manifest.to_vec(), docking, contacts)?;
    report::write_report(path, &rows)?;
    Ok(rows)
}
