use anyhow::{Context, Result};
use clap::Args;

use fold_forge::pipeline::{MANIFEST_FILE, convert_directory};
use fold_forge::report::write_manifest;

use crate::commands::{DirectoryArgs, print_problems, print_summary, run_with_spinner};

/// Converts every `.cif` file and records the results in `manifest.csv`.
#[derive(Debug, Args)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub dirs: DirectoryArgs,
}

pub fn run(args: &ConvertArgs) -> Result<()> {
    let dirs = &args.dirs;
    let batch = run_with_spinner("Converting structures", || {
        convert_directory(&dirs.input_dir, &dirs.output_dir, dirs.policy())
            .context("Failed to convert input directory")
    })?;

    let manifest_path = dirs.output_dir.join(MANIFEST_FILE);
    write_manifest(&manifest_path, &batch.manifest).context("Failed to write manifest")?;

    print_summary(
        "FoldForge Conversion",
        &[
            ("Converted", batch.manifest.len().to_string()),
            ("Skipped", batch.skipped.len().to_string()),
            ("Dropped chains", batch.dropped.len().to_string()),
            ("Manifest", manifest_path.display().to_string()),
        ],
    )?;
    print_problems(&batch.skipped, &batch.dropped)
}
