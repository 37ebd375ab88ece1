use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

mod commands;

use commands::{convert, run};

#[derive(Parser, Debug)]
#[command(
    name = "foldforge",
    about = "Convert predicted assemblies from mmCIF to PDB, score them with pDockQ and PRODIGY, and collect the scores in one report.",
    version,
    author,
    arg_required_else_help = true
)]
struct Cli {
    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Only report warnings and errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a directory of mmCIF files to PDB and write a manifest.
    Convert(convert::ConvertArgs),
    /// Convert, score with both tools, and write the merged report.
    Run(run::RunArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        "warn"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Command::Convert(args) => convert::run(&args)?,
        Command::Run(args) => run::run(&args)?,
    }

    Ok(())
}
