use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use fold_forge::pipeline::{
    PipelineConfig, collect_contacts, collect_docking, convert_directory, merge_and_write,
};
use fold_forge::tools::ToolConfig;

use crate::commands::{DirectoryArgs, print_problems, print_summary, run_with_spinner};

/// Full pipeline: conversion, pDockQ, PRODIGY, and the merged report.
#[derive(Debug, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub dirs: DirectoryArgs,
    /// Temperature in °C passed to PRODIGY.
    #[arg(long, default_value_t = 25.0)]
    pub temperature: f64,
    /// Path to the pDockQ script.
    #[arg(long, value_name = "FILE")]
    pub pdockq_script: Option<PathBuf>,
    /// Path to the modified PRODIGY predictor script.
    #[arg(long, value_name = "FILE")]
    pub prodigy_script: Option<PathBuf>,
    /// Directory holding vendored copies of both scripts.
    #[arg(long, value_name = "DIR")]
    pub vendor_dir: Option<PathBuf>,
    /// Interpreter used to run the scripts.
    #[arg(long = "python", value_name = "BIN", default_value = "python")]
    pub interpreter: PathBuf,
    /// Report destination (defaults to <output-dir>/summary.csv).
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,
}

impl RunArgs {
    fn tool_config(&self) -> ToolConfig {
        ToolConfig {
            interpreter: self.interpreter.clone(),
            pdockq_script: self.pdockq_script.clone(),
            prodigy_script: self.prodigy_script.clone(),
            vendor_dir: self.vendor_dir.clone(),
            temperature: self.temperature,
        }
    }

    fn pipeline_config(&self) -> PipelineConfig {
        let config = PipelineConfig::new(&self.dirs.input_dir, &self.dirs.output_dir)
            .with_policy(self.dirs.policy());
        match &self.report {
            Some(path) => config.with_report_path(path),
            None => config,
        }
    }
}

pub fn run(args: &RunArgs) -> Result<()> {
    let (pdockq, prodigy) = args
        .tool_config()
        .build()
        .context("Failed to configure scoring tools")?;
    let config = args.pipeline_config();

    let conversion = run_with_spinner("Converting structures", || {
        convert_directory(&config.input_dir, &config.output_dir, config.policy)
            .context("Failed to convert input directory")
    })?;
    let docking = run_with_spinner("Scoring docking quality (pDockQ)", || {
        Ok(collect_docking(&conversion.manifest, &pdockq))
    })?;
    let contacts = run_with_spinner("Scoring interface contacts (PRODIGY)", || {
        Ok(collect_contacts(&conversion.manifest, &prodigy))
    })?;

    let report_path = config.report_path();
    let docking_count = docking.rows.len();
    let contact_count = contacts.rows.len();
    let rows = run_with_spinner("Writing report", || {
        merge_and_write(
            &report_path,
            &conversion.manifest,
            docking.rows,
            contacts.rows,
        )
        .context("Failed to build report")
    })?;

    let mut skipped = conversion.skipped;
    skipped.extend(docking.skipped);
    skipped.extend(contacts.skipped);

    print_summary(
        "FoldForge Run",
        &[
            ("Converted", conversion.manifest.len().to_string()),
            ("pDockQ records", docking_count.to_string()),
            ("PRODIGY records", contact_count.to_string()),
            ("Report rows", rows.len().to_string()),
            ("Skipped", skipped.len().to_string()),
            ("Report", report_path.display().to_string()),
        ],
    )?;
    print_problems(&skipped, &conversion.dropped)
}
