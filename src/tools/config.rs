use std::path::{Path, PathBuf};

use super::{ConfigError, ScriptTool};

/// Location of the pDockQ script inside a vendor directory.
pub const PDOCKQ_VENDOR_PATH: &str = "pdockq.py";

/// Location of the modified PRODIGY predictor inside a vendor directory.
pub const PRODIGY_VENDOR_PATH: &str = "prodigy_prot/src/prodigy_prot/Modified_predict_IC.py";

/// How to launch the two scoring tools.
///
/// Explicit script paths win over the vendor directory defaults. Nothing is resolved until
/// [`ToolConfig::build`] is called.
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Interpreter used to run both scripts.
    pub interpreter: PathBuf,
    pub pdockq_script: Option<PathBuf>,
    pub prodigy_script: Option<PathBuf>,
    /// Directory holding vendored copies of the scripts.
    pub vendor_dir: Option<PathBuf>,
    /// Temperature in °C handed to PRODIGY.
    pub temperature: f64,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            interpreter: PathBuf::from("python"),
            pdockq_script: None,
            prodigy_script: None,
            vendor_dir: None,
            temperature: 25.0,
        }
    }
}

impl ToolConfig {
    /// Resolves both scripts and returns the `(pDockQ, PRODIGY)` tools.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] when a script is neither given nor resolvable from the vendor
    /// directory, when the resolved file does not exist, or when the temperature is not finite.
    pub fn build(&self) -> Result<(ScriptTool, ScriptTool), ConfigError> {
        if !self.temperature.is_finite() {
            return Err(ConfigError::InvalidTemperature {
                value: self.temperature,
            });
        }

        let pdockq = resolve_script(
            "pDockQ",
            "--pdockq-script",
            self.pdockq_script.as_deref(),
            self.vendor_dir.as_deref(),
            PDOCKQ_VENDOR_PATH,
        )?;
        let prodigy = resolve_script(
            "PRODIGY",
            "--prodigy-script",
            self.prodigy_script.as_deref(),
            self.vendor_dir.as_deref(),
            PRODIGY_VENDOR_PATH,
        )?;

        Ok((
            ScriptTool::pdockq(&self.interpreter, pdockq),
            ScriptTool::prodigy(&self.interpreter, prodigy, self.temperature),
        ))
    }
}

fn resolve_script(
    tool: &'static str,
    flag: &'static str,
    explicit: Option<&Path>,
    vendor_dir: Option<&Path>,
    vendor_relative: &str,
) -> Result<PathBuf, ConfigError> {
    let path = match (explicit, vendor_dir) {
        (Some(path), _) => path.to_path_buf(),
        (None, Some(dir)) => dir.join(vendor_relative),
        (None, None) => return Err(ConfigError::MissingScript { tool, flag }),
    };

    if path.is_file() {
        Ok(path)
    } else {
        Err(ConfigError::ScriptNotFound { tool, path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::MetricTool;
    use std::fs;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(path, "print('stub')\n").expect("write stub script");
    }

    #[test]
    fn no_script_and_no_vendor_dir_is_a_configuration_error() {
        let err = ToolConfig::default().build().expect_err("nothing configured");

        assert!(matches!(
            err,
            ConfigError::MissingScript {
                tool: "pDockQ",
                ..
            }
        ));
    }

    #[test]
    fn vendor_directory_supplies_default_locations() {
        let vendor = tempfile::tempdir().expect("tempdir");
        touch(&vendor.path().join(PDOCKQ_VENDOR_PATH));
        touch(&vendor.path().join(PRODIGY_VENDOR_PATH));

        let config = ToolConfig {
            vendor_dir: Some(vendor.path().to_path_buf()),
            ..Default::default()
        };
        let (pdockq, prodigy) = config.build().expect("vendor scripts exist");

        assert_eq!(pdockq.script(), vendor.path().join(PDOCKQ_VENDOR_PATH));
        assert_eq!(prodigy.script(), vendor.path().join(PRODIGY_VENDOR_PATH));
        assert_eq!(prodigy.name(), "PRODIGY");
    }

    #[test]
    fn explicit_script_wins_over_vendor_directory() {
        let vendor = tempfile::tempdir().expect("tempdir");
        touch(&vendor.path().join(PDOCKQ_VENDOR_PATH));
        touch(&vendor.path().join(PRODIGY_VENDOR_PATH));
        let custom = vendor.path().join("custom_pdockq.py");
        touch(&custom);

        let config = ToolConfig {
            pdockq_script: Some(custom.clone()),
            vendor_dir: Some(vendor.path().to_path_buf()),
            ..Default::default()
        };
        let (pdockq, _) = config.build().expect("scripts exist");

        assert_eq!(pdockq.script(), custom);
    }

    #[test]
    fn configured_script_must_exist() {
        let vendor = tempfile::tempdir().expect("tempdir");
        touch(&vendor.path().join(PDOCKQ_VENDOR_PATH));

        let config = ToolConfig {
            vendor_dir: Some(vendor.path().to_path_buf()),
            ..Default::default()
        };
        let err = config.build().expect_err("PRODIGY script missing");

        match err {
            ConfigError::ScriptNotFound { tool, path } => {
                assert_eq!(tool, "PRODIGY");
                assert!(path.ends_with("Modified_predict_IC.py"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_finite_temperature_is_rejected() {
        let config = ToolConfig {
            temperature: f64::NAN,
            ..Default::default()
        };

        assert!(matches!(
            config.build(),
            Err(ConfigError::InvalidTemperature { .. })
        ));
    }
}
