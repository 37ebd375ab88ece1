use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;
use prettytable::{Table, format, row};

use fold_forge::ops::ChainPolicy;
use fold_forge::pipeline::{DroppedChain, SkippedFile};

pub mod convert;
pub mod run;

/// Input and output directories plus the chain policy, shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct DirectoryArgs {
    /// Directory containing the `.cif` files to convert.
    #[arg(long, value_name = "DIR")]
    pub input_dir: PathBuf,
    /// Directory receiving the converted `.pdb` files (created if missing).
    #[arg(long, value_name = "DIR")]
    pub output_dir: PathBuf,
    /// Relabel chains A..Z per model and drop any chain beyond the 26th.
    #[arg(long)]
    pub big: bool,
}

impl DirectoryArgs {
    pub fn policy(&self) -> ChainPolicy {
        if self.big {
            ChainPolicy::Budgeted
        } else {
            ChainPolicy::Unconstrained
        }
    }
}

/// Wraps a pipeline stage with a spinner on stderr when stderr is a terminal.
pub fn run_with_spinner<T, F>(message: &str, work: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    let spinner = if io::stderr().is_terminal() {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner
    } else {
        ProgressBar::hidden()
    };
    spinner.set_message(message.to_string());

    let result = work();

    match &result {
        Ok(_) => spinner.finish_with_message(format!("{} ✓", message)),
        Err(_) => spinner.abandon_with_message(format!("{} ✗", message)),
    }

    result
}

/// Prints a `Metric | Value` table under a boxed title.
pub fn print_summary(title: &str, metrics: &[(&str, String)]) -> Result<()> {
    let mut stderr = io::stderr().lock();

    print_boxed_label(&mut stderr, title)?;
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(row!["Metric", "Value"]);
    for (metric, value) in metrics {
        table.add_row(row![metric, value]);
    }
    table
        .print(&mut stderr)
        .context("Failed to render run summary")?;
    Ok(())
}

/// Lists skipped files and dropped chains, if there are any.
pub fn print_problems(skipped: &[SkippedFile], dropped: &[DroppedChain]) -> Result<()> {
    let mut stderr = io::stderr().lock();

    if !skipped.is_empty() {
        writeln!(&mut stderr)?;
        print_boxed_label(&mut stderr, "Skipped Files")?;
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["File", "Stage", "Reason"]);
        for skip in skipped {
            table.add_row(row![skip.path.display(), skip.stage, skip.reason]);
        }
        table
            .print(&mut stderr)
            .context("Failed to render skipped files")?;
    }

    if !dropped.is_empty() {
        writeln!(&mut stderr)?;
        print_boxed_label(&mut stderr, "Dropped Chains")?;
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["File", "Model", "Chain"]);
        for chain in dropped {
            table.add_row(row![chain.source.display(), chain.model, chain.chain]);
        }
        table
            .print(&mut stderr)
            .context("Failed to render dropped chains")?;
    }

    Ok(())
}

fn print_boxed_label<W: Write>(writer: &mut W, title: &str) -> io::Result<()> {
    let inner = format!(" {title} ");
    let width = inner.chars().count();
    writeln!(writer, "╭{}╮", "─".repeat(width))?;
    writeln!(writer, "│{}│", inner)?;
    writeln!(writer, "╰{}╯", "─".repeat(width))?;
    Ok(())
}
