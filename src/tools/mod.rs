//! External scoring tools invoked once per converted structure.
//!
//! The pipeline only depends on [`MetricTool`]: give it a PDB path, get back everything the
//! tool printed. [`ScriptTool`] implements it by running a Python script through
//! `std::process::Command`, and [`ToolConfig`] resolves script locations up front so a
//! missing script fails the run before any file is touched.

mod config;
mod error;
mod script;

use std::path::Path;

pub use config::{PDOCKQ_VENDOR_PATH, PRODIGY_VENDOR_PATH, ToolConfig};
pub use error::{ConfigError, ToolError};
pub use script::ScriptTool;

/// Blocking collaborator that scores one structure file and returns its captured output.
pub trait MetricTool {
    /// Short label used in logs and skip reports.
    fn name(&self) -> &str;

    /// Runs the tool against `pdb_path` and returns stdout followed by stderr.
    ///
    /// # Errors
    ///
    /// [`ToolError`] when the process cannot be started or exits unsuccessfully.
    fn run(&self, pdb_path: &Path) -> Result<String, ToolError>;
}
