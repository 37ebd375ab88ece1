use std::path::PathBuf;
use thiserror::Error;

/// Fatal configuration problems detected before any structure is processed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no {tool} script configured: pass {flag} or a vendor directory that contains it")]
    MissingScript {
        tool: &'static str,
        flag: &'static str,
    },

    #[error("{tool} script '{}' does not exist", path.display())]
    ScriptNotFound { tool: &'static str, path: PathBuf },

    #[error("temperature must be a finite number of degrees Celsius, got {value}")]
    InvalidTemperature { value: f64 },
}

/// Per-file failure of one tool invocation.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to launch {tool} for '{}': {source}", path.display())]
    Spawn {
        tool: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {} for '{}'", describe_status(*code), path.display())]
    Failed {
        tool: String,
        path: PathBuf,
        code: Option<i32>,
        output: String,
    },
}

impl ToolError {
    pub fn spawn(tool: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Spawn {
            tool: tool.into(),
            path: path.into(),
            source,
        }
    }

    pub fn failed(
        tool: impl Into<String>,
        path: impl Into<PathBuf>,
        code: Option<i32>,
        output: impl Into<String>,
    ) -> Self {
        Self::Failed {
            tool: tool.into(),
            path: path.into(),
            code,
            output: output.into(),
        }
    }

    /// Output captured before the tool failed, if it ran at all.
    pub fn captured_output(&self) -> Option<&str> {
        match self {
            Self::Failed { output, .. } => Some(output),
            Self::Spawn { .. } => None,
        }
    }
}

fn describe_status(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}
