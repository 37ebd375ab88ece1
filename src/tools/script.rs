use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::{MetricTool, ToolError};

/// A scoring script run through an interpreter, one process per structure file.
///
/// The command line is `<interpreter> <script> <args...> [<file_flag>] <pdb>`.
#[derive(Debug, Clone)]
pub struct ScriptTool {
    name: String,
    interpreter: PathBuf,
    script: PathBuf,
    args: Vec<OsString>,
    file_flag: Option<&'static str>,
}

impl ScriptTool {
    pub fn new(name: &str, interpreter: impl Into<PathBuf>, script: impl Into<PathBuf>) -> Self {
        Self {
            name: name.to_string(),
            interpreter: interpreter.into(),
            script: script.into(),
            args: Vec::new(),
            file_flag: None,
        }
    }

    /// pDockQ: `python pdockq.py --pdbfile <pdb>`.
    pub fn pdockq(interpreter: impl Into<PathBuf>, script: impl Into<PathBuf>) -> Self {
        Self::new("pDockQ", interpreter, script).with_file_flag("--pdbfile")
    }

    /// PRODIGY: `python predict_IC.py --temperature <t> <pdb>`.
    pub fn prodigy(
        interpreter: impl Into<PathBuf>,
        script: impl Into<PathBuf>,
        temperature: f64,
    ) -> Self {
        Self::new("PRODIGY", interpreter, script)
            .with_arg("--temperature")
            .with_arg(temperature.to_string())
    }

    pub fn with_arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn with_file_flag(mut self, flag: &'static str) -> Self {
        self.file_flag = Some(flag);
        self
    }

    pub fn script(&self) -> &Path {
        &self.script
    }

    fn command(&self, pdb_path: &Path) -> Command {
        let mut command = Command::new(&self.interpreter);
        command.arg(&self.script).args(&self.args);
        if let Some(flag) = self.file_flag {
            command.arg(flag);
        }
        command.arg(pdb_path);
        command
    }
}

impl MetricTool for ScriptTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, pdb_path: &Path) -> Result<String, ToolError> {
        let mut command = self.command(pdb_path);
        log::debug!("Running {}: {:?}", self.name, command);

        let output = command
            .output()
            .map_err(|e| ToolError::spawn(&self.name, pdb_path, e))?;

        let mut captured = String::from_utf8_lossy(&output.stdout).into_owned();
        captured.push_str(&String::from_utf8_lossy(&output.stderr));

        if output.status.success() {
            Ok(captured)
        } else {
            Err(ToolError::failed(
                &self.name,
                pdb_path,
                output.status.code(),
                captured,
            ))
        }
    }
}
